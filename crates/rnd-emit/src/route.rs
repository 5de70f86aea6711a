//! Route network emitter — writes bytes a [`rnd_parse::rndf::parse_route`]
//! would accept back.

use std::io::{self, Write};

use rnd_model::{Lane, RouteNetwork, Segment, Spot, WaypointRef, Zone};

/// Write `route` as an RND file to `w`.
pub fn emit_route(route: &RouteNetwork, w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "RNDF_name\t{}", route.name.as_deref().unwrap_or(""))?;
    writeln!(w, "num_segments\t{}", route.segments.len())?;
    writeln!(w, "num_zones\t{}", route.zones.len())?;
    if let Some(v) = &route.format_version {
        writeln!(w, "format_version\t{v}")?;
    }
    if let Some(d) = &route.creation_date {
        writeln!(w, "creation_date\t{d}")?;
    }

    for segment in &route.segments {
        emit_segment(route, segment, w)?;
    }
    for zone in &route.zones {
        emit_zone(route, zone, w)?;
    }

    if !route.obstacles.is_empty() {
        writeln!(w, "num_obstacles\t{}", route.obstacles.len())?;
        for o in &route.obstacles {
            writeln!(w, "{} {} {} {} {} {} {}", o.id, o.lat, o.lon, o.w1, o.w2, o.height, o.orient)?;
        }
    }

    writeln!(w, "end_file")
}

fn emit_segment(route: &RouteNetwork, segment: &Segment, w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "segment\t{}", segment.id)?;
    writeln!(w, "num_lanes\t{}", segment.lanes.len())?;
    if let Some(name) = &segment.name {
        writeln!(w, "segment_name\t{name}")?;
    }
    for lane in &segment.lanes {
        emit_lane(route, segment.id, lane, w)?;
    }
    writeln!(w, "end_segment")
}

fn emit_lane(route: &RouteNetwork, seg_id: i32, lane: &Lane, w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "lane\t{seg_id}.{}", lane.id)?;
    writeln!(w, "num_waypoints\t{}", lane.waypoints.len())?;
    if let Some(width) = lane.lane_width {
        writeln!(w, "lane_width\t{width}")?;
    }
    if let Some(kw) = lane.left_boundary.keyword() {
        writeln!(w, "left_boundary\t{kw}")?;
    }
    if let Some(kw) = lane.right_boundary.keyword() {
        writeln!(w, "right_boundary\t{kw}")?;
    }

    for checkpoint in &route.checkpoints {
        if let WaypointRef::Lane { segment, lane: lane_idx, .. } = checkpoint.waypoint {
            if route.segments[segment.index()].id == seg_id
                && route.segments[segment.index()].lanes[lane_idx.index()].id == lane.id
            {
                writeln!(w, "checkpoint\t{}\t{}", route.get_waypoint_str(checkpoint.waypoint), checkpoint.id)?;
            }
        }
    }
    for waypoint in &lane.waypoints {
        if waypoint.is_stop {
            writeln!(w, "stop\t{seg_id}.{}.{}", lane.id, waypoint.id)?;
        }
    }
    for waypoint in &lane.waypoints {
        for &exit in &waypoint.exits {
            writeln!(w, "exit\t{seg_id}.{}.{}\t{}", lane.id, waypoint.id, route.get_waypoint_str(exit))?;
        }
    }
    for waypoint in &lane.waypoints {
        writeln!(w, "{seg_id}.{}.{}\t{}", lane.id, waypoint.id, waypoint.pos)?;
    }

    writeln!(w, "end_lane")
}

fn emit_zone(route: &RouteNetwork, zone: &Zone, w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "zone\t{}", zone.id)?;
    writeln!(w, "num_spots\t{}", zone.spots.len())?;
    if let Some(name) = &zone.name {
        writeln!(w, "zone_name\t{name}")?;
    }

    if !zone.perimeter.is_empty() {
        writeln!(w, "perimeter\t{}.0", zone.id)?;
        writeln!(w, "num_perimeterpoints\t{}", zone.perimeter.len())?;
        for point in &zone.perimeter {
            for &exit in &point.exits {
                writeln!(w, "exit\t{}.0.{}\t{}", zone.id, point.id, route.get_waypoint_str(exit))?;
            }
        }
        for point in &zone.perimeter {
            writeln!(w, "{}.0.{}\t{}", zone.id, point.id, point.pos)?;
        }
        writeln!(w, "end_perimeter")?;
    }

    for spot in &zone.spots {
        emit_spot(zone.id, spot, w)?;
    }

    writeln!(w, "end_zone")
}

fn emit_spot(zone_id: i32, spot: &Spot, w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "spot\t{zone_id}.{}", spot.id)?;
    if let Some(width) = spot.spot_width {
        writeln!(w, "spot_width\t{width}")?;
    }
    if let Some(cid) = spot.checkpoint_id {
        writeln!(w, "checkpoint\t{zone_id}.{}.2\t{cid}", spot.id)?;
    }
    writeln!(w, "{zone_id}.{}.1\t{}", spot.id, spot.waypoints[0].pos)?;
    writeln!(w, "{zone_id}.{}.2\t{}", spot.id, spot.waypoints[1].pos)?;
    writeln!(w, "end_spot")
}
