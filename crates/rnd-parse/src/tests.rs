//! Unit tests for rnd-parse, covering the seed scenarios and testable
//! properties from the route-network/mission format description.

#[cfg(test)]
mod rndf_tests {
    use std::io::Cursor;

    use rnd_model::WaypointRef;

    use crate::error::ParseError;
    use crate::rndf::parse_route;

    /// S1: one segment, one lane, two waypoints, no zones.
    #[test]
    fn minimal_valid_route() {
        let text = "\
RNDF_name test
num_segments 1
num_zones 0
segment 1
num_lanes 1
lane 1.1
num_waypoints 2
1.1.1 37.000000 -122.000000
1.1.2 37.000001 -122.000001
end_lane
end_segment
end_file
";
        let route = parse_route(Cursor::new(text)).unwrap();
        assert!(route.valid);
        assert_eq!(route.segments.len(), 1);
        assert_eq!(route.segments[0].lanes.len(), 1);
        assert_eq!(route.segments[0].lanes[0].waypoints.len(), 2);
        assert_eq!(route.max_checkpoint_id, 0);
    }

    /// S2: an exit across segments resolves to the target waypoint.
    #[test]
    fn exit_across_segments() {
        let text = "\
RNDF_name test
num_segments 2
num_zones 0
segment 1
num_lanes 1
lane 1.1
num_waypoints 2
1.1.1 37.000000 -122.000000
1.1.2 37.000001 -122.000001
exit 1.1.2 2.1.1
end_lane
end_segment
segment 2
num_lanes 1
lane 2.1
num_waypoints 1
2.1.1 38.000000 -123.000000
end_lane
end_segment
end_file
";
        let route = parse_route(Cursor::new(text)).unwrap();
        let source = &route.segments[0].lanes[0].waypoints[1];
        assert_eq!(source.exits.len(), 1);
        let target = route.waypoint(source.exits[0]);
        assert_eq!(target.id, 1);
        assert!(matches!(source.exits[0], WaypointRef::Lane { .. }));
    }

    /// S3: a zone with a 4-point perimeter and one spot whose checkpoint
    /// binds to its 2nd waypoint.
    #[test]
    fn zone_with_perimeter_and_checkpointed_spot() {
        let route = parse_route(Cursor::new(zone_sample())).unwrap();
        assert_eq!(route.zones.len(), 1);
        let zone = &route.zones[0];
        assert_eq!(zone.perimeter.len(), 4);
        assert_eq!(zone.spots.len(), 1);
        assert_eq!(zone.spots[0].checkpoint_id, Some(7));
        assert!(route.find_checkpoint_by_id(7).is_some());
        assert_eq!(route.max_checkpoint_id, 7);
    }

    /// S4: declared segment count exceeds what's actually provided.
    #[test]
    fn segment_count_mismatch_is_schema_error() {
        let text = "\
RNDF_name test
num_segments 2
num_zones 0
segment 1
num_lanes 1
lane 1.1
num_waypoints 1
1.1.1 37.000000 -122.000000
end_lane
end_segment
end_file
";
        let err = parse_route(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, ParseError::Schema { .. }));
    }

    /// Property 8: a line whose first token begins with `/*` is ignored.
    #[test]
    fn comment_lines_are_ignored() {
        let text = "\
RNDF_name test
/* this whole route is a scratchpad
num_segments 1
num_zones 0
segment 1
num_lanes 1
lane 1.1
num_waypoints 1
1.1.1 37.000000 -122.000000
end_lane
end_segment
end_file
";
        let route = parse_route(Cursor::new(text)).unwrap();
        assert!(route.valid);
        assert_eq!(route.segments.len(), 1);
    }

    /// Property 4: identifier faithfulness for a lane waypoint.
    #[test]
    fn get_waypoint_str_round_trips_lane_waypoint() {
        let text = "\
RNDF_name test
num_segments 1
num_zones 0
segment 1
num_lanes 1
lane 1.1
num_waypoints 1
1.1.5 37.000000 -122.000000
end_lane
end_segment
end_file
";
        let route = parse_route(Cursor::new(text)).unwrap();
        let r = route.find_waypoint_by_id(1, 1, 5).unwrap();
        assert_eq!(route.get_waypoint_str(r), "1.1.5");
    }

    pub(crate) fn zone_sample() -> &'static str {
        "\
RNDF_name test
num_segments 0
num_zones 1
zone 3
num_spots 1
spot 3.1
3.1.1 39.000000 -124.000000
3.1.2 39.000001 -124.000001
checkpoint 3.1.2 7
end_spot
perimeter 3.0
num_perimeterpoints 4
3.0.1 38.000000 -123.000000
3.0.2 38.000001 -123.000001
3.0.3 38.000002 -123.000002
3.0.4 38.000003 -123.000003
end_perimeter
end_zone
end_file
"
    }
}

#[cfg(test)]
mod mdf_tests {
    use std::io::Cursor;

    use crate::error::ParseError;
    use crate::mdf::parse_mission;

    #[test]
    fn parses_checkpoints_and_speed_limits() {
        let text = "\
MDF_name test-mission
RNDF test-route
checkpoints
num_checkpoints 2
1
7
end_checkpoints
speed_limits
num_speed_limits 1
1 5 15
end_speed_limits
end_file
";
        let mission = parse_mission(Cursor::new(text)).unwrap();
        assert!(mission.valid);
        assert_eq!(mission.checkpoint_ids, vec![1, 7]);
        assert_eq!(mission.speed_limits.len(), 1);
        assert_eq!(mission.speed_limits[0].id, 1);
        assert_eq!(mission.speed_limits[0].min_speed, 5);
        assert_eq!(mission.speed_limits[0].max_speed, 15);
    }

    #[test]
    fn count_mismatch_is_schema_error() {
        let text = "\
MDF_name test-mission
checkpoints
num_checkpoints 2
1
end_checkpoints
end_file
";
        let err = parse_mission(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, ParseError::Schema { .. }));
    }
}

#[cfg(test)]
mod linker_tests {
    use std::io::Cursor;

    use rnd_model::{Mission, Speedlimit, WaypointRef};

    use crate::linker::link_mission_route;
    use crate::rndf::parse_route;
    use crate::tests::rndf_tests::zone_sample;

    fn route_with_checkpoint() -> rnd_model::RouteNetwork {
        parse_route(Cursor::new(zone_sample())).unwrap()
    }

    /// S5: a mission referencing a missing checkpoint still compacts the
    /// valid ones, but reports a link error.
    #[test]
    fn unresolved_checkpoint_reported_but_others_compacted() {
        let route = route_with_checkpoint();
        let mission = Mission { checkpoint_ids: vec![7, 999], ..Mission::empty() };
        let outcome = link_mission_route(&mission, route);
        assert_eq!(outcome.mission.checkpoints.len(), 1);
        let err = outcome.result.unwrap_err();
        assert_eq!(err.unresolved, vec![999]);
    }

    /// Property 6: a speed limit on a checkpoint targeting a spot waypoint
    /// projects onto the spot's zone.
    #[test]
    fn link_projects_speed_limit_onto_enclosing_zone() {
        let route = route_with_checkpoint();
        let mission = Mission {
            checkpoint_ids: vec![7],
            speed_limits: vec![Speedlimit { id: 7, min_speed: 5, max_speed: 20 }],
            ..Mission::empty()
        };
        let outcome = link_mission_route(&mission, route);
        assert!(outcome.result.is_ok());
        assert!(matches!(outcome.mission.checkpoints[0], WaypointRef::Spot { .. }));
        let zone = &outcome.route.zones[0];
        assert_eq!((zone.min_speed, zone.max_speed), (5, 20));
    }

    /// Property 7: linking a second time resets speeds before reapplying.
    #[test]
    fn relinking_resets_speeds_first() {
        let route = route_with_checkpoint();
        let first = Mission {
            checkpoint_ids: vec![7],
            speed_limits: vec![Speedlimit { id: 7, min_speed: 5, max_speed: 20 }],
            ..Mission::empty()
        };
        let outcome = link_mission_route(&first, route);
        let second = Mission { checkpoint_ids: vec![7], speed_limits: vec![], ..Mission::empty() };
        let outcome = link_mission_route(&second, outcome.route);
        assert_eq!((outcome.route.zones[0].min_speed, outcome.route.zones[0].max_speed), (0, 0));
    }
}
