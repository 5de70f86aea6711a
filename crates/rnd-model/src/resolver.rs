//! Dotted-identifier resolution and graph-mutation helpers.

use rnd_core::{LaneIdx, SegmentIdx, SpotIdx, WaypointIdx, ZoneIdx};

use crate::entities::{Checkpoint, RouteNetwork, Waypoint, WaypointRef};

impl RouteNetwork {
    /// Linear scan for a segment with the given user-assigned id.
    pub fn find_segment_by_id(&self, id: i32) -> Option<SegmentIdx> {
        self.segments
            .iter()
            .position(|s| s.id == id)
            .map(SegmentIdx::new)
    }

    /// Linear scan for a zone with the given user-assigned id.
    pub fn find_zone_by_id(&self, id: i32) -> Option<ZoneIdx> {
        self.zones.iter().position(|z| z.id == id).map(ZoneIdx::new)
    }

    /// Linear scan for a checkpoint with the given id.
    pub fn find_checkpoint_by_id(&self, id: i32) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.id == id)
    }

    /// Resolve a 3-component dotted identifier (`seg.lane.pt`, `zone.0.pt`,
    /// or `zone.spot.pt`) to the waypoint it names.
    ///
    /// A segment match on `id1` takes precedence over a zone match;
    /// `id2 == 0` means a perimeter point, otherwise `id2` names a spot.
    pub fn find_waypoint_by_id(&self, id1: i32, id2: i32, id3: i32) -> Option<WaypointRef> {
        if let Some(seg_idx) = self.find_segment_by_id(id1) {
            let segment = &self.segments[seg_idx.index()];
            let Some(lane_idx) = segment.lanes.iter().position(|l| l.id == id2) else {
                return None;
            };
            let lane = &segment.lanes[lane_idx];
            return lane.waypoints.iter().position(|w| w.id == id3).map(|wp_idx| {
                WaypointRef::Lane {
                    segment: seg_idx,
                    lane: LaneIdx::new(lane_idx),
                    waypoint: WaypointIdx::new(wp_idx),
                }
            });
        }

        let zone_idx = self.find_zone_by_id(id1)?;
        let zone = &self.zones[zone_idx.index()];

        if id2 == 0 {
            zone.perimeter
                .iter()
                .position(|w| w.id == id3)
                .map(|wp_idx| WaypointRef::Perimeter { zone: zone_idx, point: WaypointIdx::new(wp_idx) })
        } else {
            let spot_idx = zone.spots.iter().position(|s| s.id == id2)?;
            let spot = &zone.spots[spot_idx];
            let which = spot.waypoints.iter().position(|w| w.id == id3)?;
            Some(WaypointRef::Spot {
                zone: zone_idx,
                spot: SpotIdx::new(spot_idx),
                which: WaypointIdx::new(which),
            })
        }
    }

    /// Resolve a [`WaypointRef`] to the waypoint it names.
    ///
    /// `WaypointRef`s only ever come from `find_waypoint_by_id` or from a
    /// parser that just inserted the waypoint it's tagging, so the indices
    /// are always in range.
    pub fn waypoint(&self, r: WaypointRef) -> &Waypoint {
        match r {
            WaypointRef::Lane { segment, lane, waypoint } => {
                &self.segments[segment.index()].lanes[lane.index()].waypoints[waypoint.index()]
            }
            WaypointRef::Perimeter { zone, point } => {
                &self.zones[zone.index()].perimeter[point.index()]
            }
            WaypointRef::Spot { zone, spot, which } => {
                &self.zones[zone.index()].spots[spot.index()].waypoints[which.index()]
            }
        }
    }

    /// Mutable counterpart of [`waypoint`](Self::waypoint).
    pub fn waypoint_mut(&mut self, r: WaypointRef) -> &mut Waypoint {
        match r {
            WaypointRef::Lane { segment, lane, waypoint } => {
                &mut self.segments[segment.index()].lanes[lane.index()].waypoints[waypoint.index()]
            }
            WaypointRef::Perimeter { zone, point } => {
                &mut self.zones[zone.index()].perimeter[point.index()]
            }
            WaypointRef::Spot { zone, spot, which } => {
                &mut self.zones[zone.index()].spots[spot.index()].waypoints[which.index()]
            }
        }
    }

    /// Render the dotted textual form of a waypoint reference
    /// (`"S.L.P"`, `"Z.0.P"`, or `"Z.SP.P"`).
    pub fn get_waypoint_str(&self, r: WaypointRef) -> String {
        match r {
            WaypointRef::Lane { segment, lane, waypoint } => {
                let s = &self.segments[segment.index()];
                let l = &s.lanes[lane.index()];
                format!("{}.{}.{}", s.id, l.id, l.waypoints[waypoint.index()].id)
            }
            WaypointRef::Perimeter { zone, point } => {
                let z = &self.zones[zone.index()];
                format!("{}.0.{}", z.id, z.perimeter[point.index()].id)
            }
            WaypointRef::Spot { zone, spot, which } => {
                let z = &self.zones[zone.index()];
                let sp = &z.spots[spot.index()];
                format!("{}.{}.{}", z.id, sp.id, sp.waypoints[which.index()].id)
            }
        }
    }

    /// Append a checkpoint targeting `waypoint`, keeping `max_checkpoint_id`
    /// up to date.
    pub fn add_checkpoint(&mut self, id: i32, waypoint: WaypointRef) {
        self.checkpoints.push(Checkpoint { id, waypoint });
        self.max_checkpoint_id = self.max_checkpoint_id.max(id);
    }

    /// Append a directed exit edge `from -> to`.
    pub fn add_exit(&mut self, from: WaypointRef, to: WaypointRef) {
        self.waypoint_mut(from).exits.push(to);
    }
}
