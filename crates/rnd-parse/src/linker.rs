//! Mission-to-route linking: validates checkpoint ids against a route and
//! projects per-checkpoint speed limits onto the enclosing segment/zone.

use rnd_model::{LinkedMission, Mission, RouteNetwork, WaypointRef};

use crate::error::LinkError;

/// Result of [`link_mission_route`]: the route with speed bounds
/// (re)applied, the compacted mission, and the accumulated link error, if
/// any. This is a pure function — `route` is consumed and an updated copy
/// is handed back, so there is always a result to inspect even when
/// `result` is `Err`.
pub struct LinkOutcome {
    pub route: RouteNetwork,
    pub mission: LinkedMission,
    pub result: Result<(), LinkError>,
}

/// Link `mission` against `route`:
///
/// 1. Reset every segment's and zone's speed bounds to 0.
/// 2. Resolve each of `mission.checkpoint_ids` to a route checkpoint,
///    compacting the ones that resolve into `mission.checkpoints` (in order)
///    and collecting the ones that don't into the returned [`LinkError`].
/// 3. For each speed-limit record, resolve its checkpoint id to a waypoint
///    and apply `(min, max)` to that waypoint's enclosing segment (lane
///    waypoints) or zone (perimeter/spot waypoints). A later record
///    targeting the same region overwrites an earlier one.
pub fn link_mission_route(mission: &Mission, route: RouteNetwork) -> LinkOutcome {
    let mut route = route;
    for segment in &mut route.segments {
        segment.min_speed = 0;
        segment.max_speed = 0;
    }
    for zone in &mut route.zones {
        zone.min_speed = 0;
        zone.max_speed = 0;
    }

    // route.name vs mission.route_name mismatch isn't treated as an error;
    // callers that care can compare the two fields themselves.

    let mut checkpoints = Vec::with_capacity(mission.checkpoint_ids.len());
    let mut unresolved = Vec::new();
    for &id in &mission.checkpoint_ids {
        match route.find_checkpoint_by_id(id) {
            Some(checkpoint) => checkpoints.push(checkpoint.waypoint),
            None => unresolved.push(id),
        }
    }

    for sl in &mission.speed_limits {
        let Some(checkpoint) = route.find_checkpoint_by_id(sl.id) else {
            if !unresolved.contains(&sl.id) {
                unresolved.push(sl.id);
            }
            continue;
        };
        let waypoint_ref = checkpoint.waypoint;
        let (min_speed, max_speed) = (sl.min_speed, sl.max_speed);
        match waypoint_ref {
            WaypointRef::Lane { segment, .. } => {
                let segment = &mut route.segments[segment.index()];
                segment.min_speed = min_speed;
                segment.max_speed = max_speed;
            }
            WaypointRef::Perimeter { zone, .. } | WaypointRef::Spot { zone, .. } => {
                let zone = &mut route.zones[zone.index()];
                zone.min_speed = min_speed;
                zone.max_speed = max_speed;
            }
        }
    }

    let result = if unresolved.is_empty() { Ok(()) } else { Err(LinkError { unresolved }) };

    LinkOutcome {
        mission: LinkedMission { name: mission.name.clone(), route_name: mission.route_name.clone(), checkpoints },
        route,
        result,
    }
}
