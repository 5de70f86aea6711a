//! Two-pass Route Network Definition parser.
//!
//! Pass 1 materializes every entity and its coordinates; Pass 2 walks the
//! same structural skeleton a second time to attach checkpoints, stop flags,
//! and exit edges, now that every waypoint a `checkpoint`/`stop`/`exit`
//! directive might reference already exists. The whole input is buffered up
//! front so a caller can hand in any `Read`, not just a `Seek`-able one, and
//! each pass gets its own reader over the buffer.

use std::io::{BufRead, BufReader, Cursor, Read};

use rnd_core::{
    fields, is_comment, reader::Line, Boundary, GeoPoint, LaneIdx, LineReader, SegmentIdx, SpotIdx,
    WaypointIdx, ZoneIdx,
};
use rnd_model::{Lane, RouteNetwork, Segment, Spot, Waypoint, WaypointRef, Zone};

use crate::error::{ParseError, ParseResult};

struct Cmd {
    line: u32,
    name: String,
    args: Vec<String>,
}

fn next_command(reader: &mut LineReader<impl BufRead>) -> ParseResult<Option<Cmd>> {
    loop {
        let Some(Line { number, text }) = reader.next_line()? else {
            return Ok(None);
        };
        let mut toks = fields(&text);
        let Some(first) = toks.next() else { continue };
        if is_comment(first) {
            continue;
        }
        return Ok(Some(Cmd {
            line: number,
            name: first.to_string(),
            args: toks.map(str::to_string).collect(),
        }));
    }
}

fn parse_int(cmd: &Cmd, arg: Option<&str>) -> ParseResult<i32> {
    arg.and_then(|s| s.parse().ok())
        .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid integer argument to {}", cmd.name)))
}

fn parse_uint(cmd: &Cmd, arg: Option<&str>) -> ParseResult<u32> {
    arg.and_then(|s| s.parse().ok())
        .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid integer argument to {}", cmd.name)))
}

fn parse_float(cmd: &Cmd, s: &str) -> ParseResult<f64> {
    s.parse()
        .map_err(|_| ParseError::syntax(cmd.line, format!("invalid number \"{s}\" after {}", cmd.name)))
}

fn dotted2(cmd: &Cmd, s: &str) -> Option<(i32, i32)> {
    let (a, b) = s.split_once('.')?;
    Some((a.parse().ok()?, b.parse().ok()?))
}

fn dotted3(s: &str) -> Option<(i32, i32, i32)> {
    let mut parts = s.split('.');
    let a = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    let c = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((a, b, c))
}

/// Parse a Route Network Definition file from `input`.
///
/// On any `Syntax`/`Schema`/`Reference`/`Io` error the whole parse aborts;
/// there is no partial network to return since errors are propagated rather
/// than recorded on a `valid: false` value the caller must remember to check.
pub fn parse_route(mut input: impl Read) -> ParseResult<RouteNetwork> {
    let mut buf = Vec::new();
    input.read_to_end(&mut buf)?;

    let mut route = {
        let mut reader = LineReader::new(BufReader::new(Cursor::new(&buf)));
        pass1(&mut reader)?
    };

    let mut reader = LineReader::new(BufReader::new(Cursor::new(&buf)));
    pass2(&mut reader, &mut route)?;
    route.valid = true;
    Ok(route)
}

fn pass1(reader: &mut LineReader<impl BufRead>) -> ParseResult<RouteNetwork> {
    let mut route = RouteNetwork::empty();
    let mut declared_segments: Option<u32> = None;
    let mut declared_zones: Option<u32> = None;

    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), "premature end of route network definition file"));
        };
        match cmd.name.as_str() {
            "RNDF_name" => route.name = cmd.args.first().cloned(),
            "format_version" => route.format_version = cmd.args.first().cloned(),
            "creation_date" => route.creation_date = cmd.args.first().cloned(),
            "num_segments" => {
                if declared_segments.is_some() {
                    return Err(ParseError::schema(cmd.line, "duplicate num_segments"));
                }
                declared_segments = Some(parse_uint(&cmd, cmd.args.first().map(String::as_str))?);
            }
            "num_zones" => {
                if declared_zones.is_some() {
                    return Err(ParseError::schema(cmd.line, "duplicate num_zones"));
                }
                declared_zones = Some(parse_uint(&cmd, cmd.args.first().map(String::as_str))?);
            }
            "segment" => {
                if route.segments.len() as u32 >= declared_segments.unwrap_or(0) {
                    return Err(ParseError::schema(cmd.line, "segment exceeds declared num_segments"));
                }
                let id = parse_int(&cmd, cmd.args.first().map(String::as_str))?;
                route.segments.push(parse_segment_pass1(reader, id)?);
            }
            "zone" => {
                if route.zones.len() as u32 >= declared_zones.unwrap_or(0) {
                    return Err(ParseError::schema(cmd.line, "zone exceeds declared num_zones"));
                }
                let id = parse_int(&cmd, cmd.args.first().map(String::as_str))?;
                route.zones.push(parse_zone_pass1(reader, id)?);
            }
            "num_obstacles" => {
                let n = parse_uint(&cmd, cmd.args.first().map(String::as_str))?;
                for _ in 0..n {
                    route.obstacles.push(parse_obstacle(reader)?);
                }
            }
            "end_file" => break,
            other => return Err(ParseError::syntax(cmd.line, format!("unknown command {other}"))),
        }
    }

    if let Some(n) = declared_segments {
        if n as usize != route.segments.len() {
            return Err(ParseError::schema(reader.lineno(), "route definition has too few segments"));
        }
    }
    if let Some(n) = declared_zones {
        if n as usize != route.zones.len() {
            return Err(ParseError::schema(reader.lineno(), "route definition has too few zones"));
        }
    }
    Ok(route)
}

fn parse_obstacle(reader: &mut LineReader<impl BufRead>) -> ParseResult<rnd_model::Obstacle> {
    let Some(cmd) = next_command(reader)? else {
        return Err(ParseError::schema(reader.lineno(), "premature end of file while reading obstacles"));
    };
    let mut nums = std::iter::once(cmd.name.as_str()).chain(cmd.args.iter().map(String::as_str));
    let mut next = |what: &str| -> ParseResult<f64> {
        let s = nums.next().ok_or_else(|| ParseError::syntax(cmd.line, format!("missing {what} in obstacle")))?;
        parse_float(&cmd, s)
    };
    let id = next("id")? as i32;
    let lat = next("lat")?;
    let lon = next("lon")?;
    let w1 = next("w1")?;
    let w2 = next("w2")?;
    let height = next("height")?;
    let orient = next("orient")?;
    Ok(rnd_model::Obstacle { id, lat, lon, w1, w2, height, orient })
}

fn parse_segment_pass1(reader: &mut LineReader<impl BufRead>, id: i32) -> ParseResult<Segment> {
    let mut segment = Segment::new(id);
    let mut declared_lanes: Option<u32> = None;

    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), format!("premature end of segment {id}")));
        };
        match cmd.name.as_str() {
            "segment_name" => segment.name = cmd.args.first().cloned(),
            "num_lanes" => {
                if declared_lanes.is_some() {
                    return Err(ParseError::schema(cmd.line, format!("duplicate num_lanes in segment {id}")));
                }
                declared_lanes = Some(parse_uint(&cmd, cmd.args.first().map(String::as_str))?);
            }
            "lane" => {
                if segment.lanes.len() as u32 >= declared_lanes.unwrap_or(0) {
                    return Err(ParseError::schema(cmd.line, format!("lane exceeds declared num_lanes in segment {id}")));
                }
                let arg = cmd.args.first().ok_or_else(|| ParseError::syntax(cmd.line, "missing lane id"))?;
                let (seg_id, lane_id) = dotted2(&cmd, arg)
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid lane id \"{arg}\"")))?;
                if seg_id != id {
                    return Err(ParseError::syntax(cmd.line, format!("lane id \"{arg}\" does not belong to segment {id}")));
                }
                segment.lanes.push(parse_lane_pass1(reader, id, lane_id)?);
            }
            "end_segment" => {
                if let Some(n) = declared_lanes {
                    if n as usize != segment.lanes.len() {
                        return Err(ParseError::schema(cmd.line, format!("segment {id} has too few lanes")));
                    }
                }
                return Ok(segment);
            }
            other => return Err(ParseError::syntax(cmd.line, format!("unknown command {other} in segment {id}"))),
        }
    }
}

fn parse_lane_pass1(reader: &mut LineReader<impl BufRead>, seg_id: i32, lane_id: i32) -> ParseResult<Lane> {
    let mut lane = Lane::new(lane_id);
    let mut declared_waypoints: Option<u32> = None;

    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), format!("premature end of lane {seg_id}.{lane_id}")));
        };
        if let Some((a, b, c)) = dotted3(&cmd.name) {
            if a != seg_id || b != lane_id {
                return Err(ParseError::syntax(cmd.line, format!("waypoint \"{}\" does not belong to lane {seg_id}.{lane_id}", cmd.name)));
            }
            if lane.waypoints.len() as u32 >= declared_waypoints.unwrap_or(0) {
                return Err(ParseError::schema(cmd.line, format!("waypoint exceeds declared num_waypoints in lane {seg_id}.{lane_id}")));
            }
            let (lat_s, lon_s) = two_args(&cmd)?;
            let pos = GeoPoint::new(parse_float(&cmd, lat_s)?, parse_float(&cmd, lon_s)?);
            lane.waypoints.push(Waypoint::new(c, pos, placeholder_parent()));
            continue;
        }
        match cmd.name.as_str() {
            "num_waypoints" => {
                if declared_waypoints.is_some() {
                    return Err(ParseError::schema(cmd.line, format!("duplicate num_waypoints in lane {seg_id}.{lane_id}")));
                }
                declared_waypoints = Some(parse_uint(&cmd, cmd.args.first().map(String::as_str))?);
            }
            "lane_width" => {
                lane.lane_width = Some(parse_uint(&cmd, cmd.args.first().map(String::as_str))?);
            }
            "left_boundary" | "right_boundary" => {
                let arg = cmd.args.first().ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid {} in lane {seg_id}.{lane_id}", cmd.name)))?;
                let boundary = Boundary::from_keyword(arg)
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid boundary \"{arg}\" in lane {seg_id}.{lane_id}")))?;
                if cmd.name == "left_boundary" {
                    lane.left_boundary = boundary;
                } else {
                    lane.right_boundary = boundary;
                }
            }
            "checkpoint" | "stop" | "exit" => {
                // Deferred to pass 2: every referent must exist first.
            }
            "end_lane" => {
                if let Some(n) = declared_waypoints {
                    if n as usize != lane.waypoints.len() {
                        return Err(ParseError::schema(cmd.line, format!("lane {seg_id}.{lane_id} has too few waypoints")));
                    }
                }
                return Ok(lane);
            }
            other => return Err(ParseError::syntax(cmd.line, format!("unknown command {other} in lane {seg_id}.{lane_id}"))),
        }
    }
}

fn parse_zone_pass1(reader: &mut LineReader<impl BufRead>, id: i32) -> ParseResult<Zone> {
    let mut zone = Zone::new(id);
    let mut declared_spots: Option<u32> = None;
    let mut has_perimeter = false;

    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), format!("premature end of zone {id}")));
        };
        match cmd.name.as_str() {
            "zone_name" => zone.name = cmd.args.first().cloned(),
            "num_spots" => {
                if declared_spots.is_some() {
                    return Err(ParseError::schema(cmd.line, format!("duplicate num_spots in zone {id}")));
                }
                declared_spots = Some(parse_uint(&cmd, cmd.args.first().map(String::as_str))?);
            }
            "spot" => {
                if zone.spots.len() as u32 >= declared_spots.unwrap_or(0) {
                    return Err(ParseError::schema(cmd.line, format!("spot exceeds declared num_spots in zone {id}")));
                }
                let arg = cmd.args.first().ok_or_else(|| ParseError::syntax(cmd.line, "missing spot id"))?;
                let (zone_id, spot_id) = dotted2(&cmd, arg)
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid spot id \"{arg}\"")))?;
                if zone_id != id {
                    return Err(ParseError::syntax(cmd.line, format!("spot id \"{arg}\" does not belong to zone {id}")));
                }
                zone.spots.push(parse_spot_pass1(reader, id, spot_id)?);
            }
            "perimeter" => {
                if has_perimeter {
                    return Err(ParseError::schema(cmd.line, format!("duplicate perimeter in zone {id}")));
                }
                let arg = cmd.args.first().ok_or_else(|| ParseError::syntax(cmd.line, "missing perimeter id"))?;
                let (zone_id, lane_id) = dotted2(&cmd, arg)
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid perimeter id \"{arg}\"")))?;
                if zone_id != id || lane_id != 0 {
                    return Err(ParseError::syntax(cmd.line, format!("invalid perimeter id \"{arg}\" in zone {id}")));
                }
                zone.perimeter = parse_perimeter_pass1(reader, id)?;
                has_perimeter = true;
            }
            "end_zone" => {
                if let Some(n) = declared_spots {
                    if n as usize != zone.spots.len() {
                        return Err(ParseError::schema(cmd.line, format!("zone {id} has too few spots")));
                    }
                }
                if !has_perimeter {
                    return Err(ParseError::schema(cmd.line, format!("zone {id} is missing perimeter")));
                }
                return Ok(zone);
            }
            other => return Err(ParseError::syntax(cmd.line, format!("unknown command {other} in zone {id}"))),
        }
    }
}

fn parse_spot_pass1(reader: &mut LineReader<impl BufRead>, zone_id: i32, spot_id: i32) -> ParseResult<Spot> {
    let mut spot_width = None;
    let mut waypoints: Vec<Waypoint> = Vec::with_capacity(2);

    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), format!("premature end of spot {zone_id}.{spot_id}")));
        };
        if let Some((a, b, c)) = dotted3(&cmd.name) {
            if a != zone_id || b != spot_id || waypoints.len() >= 2 {
                return Err(ParseError::syntax(cmd.line, format!("waypoint \"{}\" does not belong to spot {zone_id}.{spot_id}", cmd.name)));
            }
            let (lat_s, lon_s) = two_args(&cmd)?;
            let pos = GeoPoint::new(parse_float(&cmd, lat_s)?, parse_float(&cmd, lon_s)?);
            waypoints.push(Waypoint::new(c, pos, placeholder_parent()));
            continue;
        }
        match cmd.name.as_str() {
            "spot_width" => spot_width = Some(parse_uint(&cmd, cmd.args.first().map(String::as_str))?),
            "checkpoint" => {
                // Deferred to pass 2.
            }
            "end_spot" => {
                if waypoints.len() != 2 {
                    return Err(ParseError::schema(cmd.line, format!("spot {zone_id}.{spot_id} has too few waypoints")));
                }
                let [a, b] = <[Waypoint; 2]>::try_from(waypoints).expect("checked above");
                return Ok(Spot { id: spot_id, spot_width, waypoints: [a, b], checkpoint_id: None });
            }
            other => return Err(ParseError::syntax(cmd.line, format!("unknown command {other} in spot {zone_id}.{spot_id}"))),
        }
    }
}

fn parse_perimeter_pass1(reader: &mut LineReader<impl BufRead>, zone_id: i32) -> ParseResult<Vec<Waypoint>> {
    let mut declared: Option<u32> = None;
    let mut points = Vec::new();

    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), format!("premature end of perimeter in zone {zone_id}")));
        };
        if let Some((z, p)) = perimeter_point_id(&cmd.name) {
            if z != zone_id || points.len() as u32 >= declared.unwrap_or(0) {
                return Err(ParseError::syntax(cmd.line, format!("perimeter point \"{}\" invalid in zone {zone_id}", cmd.name)));
            }
            let (lat_s, lon_s) = two_args(&cmd)?;
            let pos = GeoPoint::new(parse_float(&cmd, lat_s)?, parse_float(&cmd, lon_s)?);
            points.push(Waypoint::new(p, pos, placeholder_parent()));
            continue;
        }
        match cmd.name.as_str() {
            "num_perimeterpoints" => {
                if declared.is_some() {
                    return Err(ParseError::schema(cmd.line, format!("duplicate num_perimeterpoints in zone {zone_id}")));
                }
                declared = Some(parse_uint(&cmd, cmd.args.first().map(String::as_str))?);
            }
            "exit" => {
                // Deferred to pass 2.
            }
            "end_perimeter" => {
                if let Some(n) = declared {
                    if n as usize != points.len() {
                        return Err(ParseError::schema(cmd.line, format!("zone {zone_id} has too few perimeter points")));
                    }
                }
                return Ok(points);
            }
            other => return Err(ParseError::syntax(cmd.line, format!("unknown command {other} in perimeter of zone {zone_id}"))),
        }
    }
}

fn perimeter_point_id(token: &str) -> Option<(i32, i32)> {
    let (zone, rest) = token.split_once(".0.")?;
    Some((zone.parse().ok()?, rest.parse().ok()?))
}

fn two_args(cmd: &Cmd) -> ParseResult<(&str, &str)> {
    match (cmd.args.first(), cmd.args.get(1)) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(ParseError::syntax(cmd.line, format!("missing coordinates after {}", cmd.name))),
    }
}

/// Placeholder parent used during pass 1; every waypoint's real `parent` is
/// rewritten once it is moved into its final container (see
/// [`fix_parents`]), since the container index isn't known until then.
fn placeholder_parent() -> WaypointRef {
    WaypointRef::Lane {
        segment: SegmentIdx::new(0),
        lane: LaneIdx::new(0),
        waypoint: WaypointIdx::new(0),
    }
}

/// Fix up every waypoint's `parent` tag to point at its real container
/// index, now that the whole tree has been built and nothing will move
/// again.
fn fix_parents(route: &mut RouteNetwork) {
    for (si, segment) in route.segments.iter_mut().enumerate() {
        for (li, lane) in segment.lanes.iter_mut().enumerate() {
            for (wi, wp) in lane.waypoints.iter_mut().enumerate() {
                wp.parent = WaypointRef::Lane {
                    segment: SegmentIdx::new(si),
                    lane: LaneIdx::new(li),
                    waypoint: WaypointIdx::new(wi),
                };
            }
        }
    }
    for (zi, zone) in route.zones.iter_mut().enumerate() {
        for (pi, wp) in zone.perimeter.iter_mut().enumerate() {
            wp.parent = WaypointRef::Perimeter { zone: ZoneIdx::new(zi), point: WaypointIdx::new(pi) };
        }
        for (sp_i, spot) in zone.spots.iter_mut().enumerate() {
            for (wi, wp) in spot.waypoints.iter_mut().enumerate() {
                wp.parent = WaypointRef::Spot {
                    zone: ZoneIdx::new(zi),
                    spot: SpotIdx::new(sp_i),
                    which: WaypointIdx::new(wi),
                };
            }
        }
    }
}

fn pass2(reader: &mut LineReader<impl BufRead>, route: &mut RouteNetwork) -> ParseResult<()> {
    fix_parents(route);

    let mut segment_num = 0usize;
    let mut zone_num = 0usize;

    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), "premature end of route network definition file"));
        };
        match cmd.name.as_str() {
            "segment" => {
                let seg_idx = SegmentIdx::new(segment_num);
                let seg_id = route.segments[segment_num].id;
                pass2_segment(reader, route, seg_idx, seg_id)?;
                segment_num += 1;
            }
            "zone" => {
                let zone_idx = ZoneIdx::new(zone_num);
                let zone_id = route.zones[zone_num].id;
                pass2_zone(reader, route, zone_idx, zone_id)?;
                zone_num += 1;
            }
            "end_file" => return Ok(()),
            _ => {
                // Header directives (RNDF_name, num_segments, ...) and
                // num_obstacles were already consumed in pass 1; pass 2 only
                // cares about segment/zone/end_file at the top level.
            }
        }
    }
}

fn pass2_segment(
    reader: &mut LineReader<impl BufRead>,
    route: &mut RouteNetwork,
    seg_idx: SegmentIdx,
    seg_id: i32,
) -> ParseResult<()> {
    let mut lane_num = 0usize;
    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), format!("premature end of segment {seg_id}")));
        };
        match cmd.name.as_str() {
            "lane" => {
                let lane_idx = LaneIdx::new(lane_num);
                let lane_id = route.segments[seg_idx.index()].lanes[lane_num].id;
                pass2_lane(reader, route, seg_idx, lane_idx, seg_id, lane_id)?;
                lane_num += 1;
            }
            "end_segment" => return Ok(()),
            _ => {}
        }
    }
}

fn pass2_lane(
    reader: &mut LineReader<impl BufRead>,
    route: &mut RouteNetwork,
    seg_idx: SegmentIdx,
    lane_idx: LaneIdx,
    seg_id: i32,
    lane_id: i32,
) -> ParseResult<()> {
    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), format!("premature end of lane {seg_id}.{lane_id}")));
        };
        match cmd.name.as_str() {
            "checkpoint" => {
                let rest = rest_of(&cmd);
                let mut toks = fields(&rest);
                let wp_tok = toks.next().ok_or_else(|| ParseError::syntax(cmd.line, "invalid checkpoint"))?;
                let (a, b, c) = dotted3(wp_tok)
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid checkpoint in lane {seg_id}.{lane_id}")))?;
                if a != seg_id || b != lane_id {
                    return Err(ParseError::syntax(cmd.line, format!("invalid checkpoint in lane {seg_id}.{lane_id}")));
                }
                let cid_tok = toks.next().ok_or_else(|| ParseError::syntax(cmd.line, "missing checkpoint id"))?;
                let cid: i32 = cid_tok.parse().map_err(|_| ParseError::syntax(cmd.line, format!("invalid checkpoint id \"{cid_tok}\"")))?;

                let waypoint = WaypointRef::Lane { segment: seg_idx, lane: lane_idx, waypoint: find_local_waypoint(&route.segments[seg_idx.index()].lanes[lane_idx.index()].waypoints, c).ok_or_else(|| ParseError::reference(cmd.line, format!("unknown waypoint {seg_id}.{lane_id}.{c}")))? };
                route.add_checkpoint(cid, waypoint);
            }
            "stop" => {
                let rest = rest_of(&cmd);
                let (a, b, c) = dotted3(rest.trim())
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid stop in lane {seg_id}.{lane_id}")))?;
                if a != seg_id || b != lane_id {
                    return Err(ParseError::syntax(cmd.line, format!("invalid stop in lane {seg_id}.{lane_id}")));
                }
                let wi = find_local_waypoint(&route.segments[seg_idx.index()].lanes[lane_idx.index()].waypoints, c)
                    .ok_or_else(|| ParseError::reference(cmd.line, format!("unknown waypoint {seg_id}.{lane_id}.{c}")))?;
                route.segments[seg_idx.index()].lanes[lane_idx.index()].waypoints[wi.index()].is_stop = true;
            }
            "exit" => {
                let rest = rest_of(&cmd);
                let mut toks = fields(&rest);
                let from_tok = toks.next().ok_or_else(|| ParseError::syntax(cmd.line, "invalid exit"))?;
                let to_tok = toks.next().ok_or_else(|| ParseError::syntax(cmd.line, "invalid exit"))?;
                let (a, b, c) = dotted3(from_tok)
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid exit in lane {seg_id}.{lane_id}")))?;
                if a != seg_id || b != lane_id {
                    return Err(ParseError::syntax(cmd.line, format!("invalid exit in lane {seg_id}.{lane_id}")));
                }
                let (ea, eb, ec) = dotted3(to_tok)
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid exit target \"{to_tok}\" in lane {seg_id}.{lane_id}")))?;
                let wi = find_local_waypoint(&route.segments[seg_idx.index()].lanes[lane_idx.index()].waypoints, c)
                    .ok_or_else(|| ParseError::reference(cmd.line, format!("unknown waypoint {seg_id}.{lane_id}.{c}")))?;
                let from = WaypointRef::Lane { segment: seg_idx, lane: lane_idx, waypoint: wi };
                let to = route.find_waypoint_by_id(ea, eb, ec)
                    .ok_or_else(|| ParseError::reference(cmd.line, format!("unknown waypoint {ea}.{eb}.{ec}")))?;
                route.add_exit(from, to);
            }
            "end_lane" => return Ok(()),
            _ => {}
        }
    }
}

fn pass2_zone(
    reader: &mut LineReader<impl BufRead>,
    route: &mut RouteNetwork,
    zone_idx: ZoneIdx,
    zone_id: i32,
) -> ParseResult<()> {
    let mut spot_num = 0usize;
    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), format!("premature end of zone {zone_id}")));
        };
        match cmd.name.as_str() {
            "spot" => {
                let spot_idx = SpotIdx::new(spot_num);
                let spot_id = route.zones[zone_idx.index()].spots[spot_num].id;
                pass2_spot(reader, route, zone_idx, spot_idx, zone_id, spot_id)?;
                spot_num += 1;
            }
            "perimeter" => pass2_perimeter(reader, route, zone_idx, zone_id)?,
            "end_zone" => return Ok(()),
            _ => {}
        }
    }
}

fn pass2_spot(
    reader: &mut LineReader<impl BufRead>,
    route: &mut RouteNetwork,
    zone_idx: ZoneIdx,
    spot_idx: SpotIdx,
    zone_id: i32,
    spot_id: i32,
) -> ParseResult<()> {
    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), format!("premature end of spot {zone_id}.{spot_id}")));
        };
        match cmd.name.as_str() {
            "checkpoint" => {
                let rest = rest_of(&cmd);
                let mut toks = fields(&rest);
                let wp_tok = toks.next().ok_or_else(|| ParseError::syntax(cmd.line, "invalid checkpoint"))?;
                let (a, b, c) = dotted3(wp_tok)
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid checkpoint in spot {zone_id}.{spot_id}")))?;
                if a != zone_id || b != spot_id {
                    return Err(ParseError::syntax(cmd.line, format!("invalid checkpoint in spot {zone_id}.{spot_id}")));
                }
                let cid_tok = toks.next().ok_or_else(|| ParseError::syntax(cmd.line, "missing checkpoint id"))?;
                let cid: i32 = cid_tok.parse().map_err(|_| ParseError::syntax(cmd.line, format!("invalid checkpoint id \"{cid_tok}\"")))?;

                let which = find_local_waypoint(&route.zones[zone_idx.index()].spots[spot_idx.index()].waypoints, c)
                    .ok_or_else(|| ParseError::reference(cmd.line, format!("unknown waypoint {zone_id}.{spot_id}.{c}")))?;
                let waypoint = WaypointRef::Spot { zone: zone_idx, spot: spot_idx, which };
                route.add_checkpoint(cid, waypoint);
                route.zones[zone_idx.index()].spots[spot_idx.index()].checkpoint_id = Some(cid);
            }
            "end_spot" => return Ok(()),
            _ => {}
        }
    }
}

fn pass2_perimeter(
    reader: &mut LineReader<impl BufRead>,
    route: &mut RouteNetwork,
    zone_idx: ZoneIdx,
    zone_id: i32,
) -> ParseResult<()> {
    loop {
        let Some(cmd) = next_command(reader)? else {
            return Err(ParseError::schema(reader.lineno(), format!("premature end of perimeter in zone {zone_id}")));
        };
        match cmd.name.as_str() {
            "exit" => {
                let rest = rest_of(&cmd);
                let mut toks = fields(&rest);
                let from_tok = toks.next().ok_or_else(|| ParseError::syntax(cmd.line, "invalid exit"))?;
                let to_tok = toks.next().ok_or_else(|| ParseError::syntax(cmd.line, "invalid exit"))?;
                let (z, p) = perimeter_point_id(from_tok)
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid exit in zone {zone_id}")))?;
                if z != zone_id {
                    return Err(ParseError::syntax(cmd.line, format!("invalid exit in zone {zone_id}")));
                }
                let (ea, eb, ec) = dotted3(to_tok)
                    .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid exit target \"{to_tok}\" in zone {zone_id}")))?;
                let point = find_local_waypoint(&route.zones[zone_idx.index()].perimeter, p)
                    .ok_or_else(|| ParseError::reference(cmd.line, format!("unknown perimeter point {zone_id}.0.{p}")))?;
                let from = WaypointRef::Perimeter { zone: zone_idx, point };
                let to = route.find_waypoint_by_id(ea, eb, ec)
                    .ok_or_else(|| ParseError::reference(cmd.line, format!("unknown waypoint {ea}.{eb}.{ec}")))?;
                route.add_exit(from, to);
            }
            "end_perimeter" => return Ok(()),
            _ => {}
        }
    }
}

fn find_local_waypoint(waypoints: &[Waypoint], id: i32) -> Option<WaypointIdx> {
    waypoints.iter().position(|w| w.id == id).map(WaypointIdx::new)
}

/// Rejoin a command's arguments for the handful of pass-2 directives
/// (`checkpoint`, `stop`, `exit`) whose payload is one or two dotted tokens
/// rather than a single value.
fn rest_of(cmd: &Cmd) -> String {
    cmd.args.join(" ")
}
