//! Round-trip tests: emit then re-parse and check structural equality.

#[cfg(test)]
mod route_tests {
    use std::io::Cursor;

    use rnd_model::WaypointRef;
    use rnd_parse::parse_route;

    use crate::emit_route;

    /// S6: the zone-with-perimeter-and-spot sample survives an emit/parse
    /// round trip (ignoring which order exits were discovered in, which the
    /// format itself treats as insignificant).
    #[test]
    fn zone_sample_round_trips() {
        let text = "\
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
exit 3.0.1 3.0.2
end_perimeter
end_zone
end_file
";
        let original = parse_route(Cursor::new(text)).unwrap();

        let mut buf = Vec::new();
        emit_route(&original, &mut buf).unwrap();
        let reparsed = parse_route(Cursor::new(buf)).unwrap();

        assert_eq!(reparsed.zones.len(), 1);
        let zone = &reparsed.zones[0];
        assert_eq!(zone.id, 3);
        assert_eq!(zone.perimeter.len(), 4);
        assert_eq!(zone.spots.len(), 1);
        assert_eq!(zone.spots[0].checkpoint_id, Some(7));
        assert_eq!(zone.perimeter[0].exits.len(), 1);
        assert!(matches!(zone.perimeter[0].exits[0], WaypointRef::Perimeter { .. }));
        assert_eq!(reparsed.max_checkpoint_id, original.max_checkpoint_id);
    }

    /// Lane width, boundaries, stops, and exits all round-trip.
    #[test]
    fn lane_with_all_optional_fields_round_trips() {
        let text = "\
RNDF_name test
num_segments 1
num_zones 0
segment 1
num_lanes 1
lane 1.1
num_waypoints 2
lane_width 20
left_boundary double_yellow
right_boundary broken_white
stop 1.1.1
exit 1.1.1 1.1.2
1.1.1 37.000000 -122.000000
1.1.2 37.000001 -122.000001
end_lane
end_segment
end_file
";
        let original = parse_route(Cursor::new(text)).unwrap();

        let mut buf = Vec::new();
        emit_route(&original, &mut buf).unwrap();
        let reparsed = parse_route(Cursor::new(buf)).unwrap();

        let lane = &reparsed.segments[0].lanes[0];
        assert_eq!(lane.lane_width, Some(20));
        assert_eq!(lane.left_boundary, original.segments[0].lanes[0].left_boundary);
        assert_eq!(lane.right_boundary, original.segments[0].lanes[0].right_boundary);
        assert!(lane.waypoints[0].is_stop);
        assert_eq!(lane.waypoints[0].exits.len(), 1);
    }

    /// Obstacle lines use space separators, not tabs, and round-trip.
    #[test]
    fn obstacles_round_trip() {
        let text = "\
RNDF_name test
num_segments 0
num_zones 0
num_obstacles 1
5 37.1 -122.1 1.0 2.0 3.0 0.5
end_file
";
        let original = parse_route(Cursor::new(text)).unwrap();

        let mut buf = Vec::new();
        emit_route(&original, &mut buf).unwrap();
        let out = String::from_utf8(buf.clone()).unwrap();
        assert!(out.lines().any(|l| l.starts_with("5 37.1") && !l.contains('\t')));

        let reparsed = parse_route(Cursor::new(buf)).unwrap();
        assert_eq!(reparsed.obstacles.len(), 1);
        assert_eq!(reparsed.obstacles[0].id, 5);
    }
}

#[cfg(test)]
mod mission_tests {
    use std::io::Cursor;

    use rnd_model::{Mission, Speedlimit};
    use rnd_parse::parse_mission;

    use crate::emit_mission;

    #[test]
    fn mission_round_trips() {
        let mission = Mission {
            name: Some("m1".into()),
            route_name: Some("r1".into()),
            checkpoint_ids: vec![1, 7, 12],
            speed_limits: vec![Speedlimit { id: 1, min_speed: 5, max_speed: 15 }],
            ..Mission::empty()
        };

        let mut buf = Vec::new();
        emit_mission(&mission, &mut buf).unwrap();
        let reparsed = parse_mission(Cursor::new(buf)).unwrap();

        assert!(reparsed.valid);
        assert_eq!(reparsed.name.as_deref(), Some("m1"));
        assert_eq!(reparsed.route_name.as_deref(), Some("r1"));
        assert_eq!(reparsed.checkpoint_ids, vec![1, 7, 12]);
        assert_eq!(reparsed.speed_limits, mission.speed_limits);
    }
}

#[cfg(test)]
mod path_tests {
    use tempfile::TempDir;

    use rnd_model::{Mission, RouteNetwork};

    use crate::{emit_mission_to_path, emit_route_to_path};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn emit_route_to_path_creates_file() {
        let dir = tmp();
        let path = dir.path().join("out.rnd");
        emit_route_to_path(&RouteNetwork::empty(), &path).unwrap();
        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with("end_file\n"));
    }

    #[test]
    fn emit_mission_to_path_creates_file() {
        let dir = tmp();
        let path = dir.path().join("out.mdf");
        emit_mission_to_path(&Mission::empty(), &path).unwrap();
        assert!(path.exists());
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with("end_file\n"));
    }
}
