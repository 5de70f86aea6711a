//! The route/mission entity graph.
//!
//! # Ownership
//!
//! The tree backbone is plain Rust ownership: `RouteNetwork`
//! owns `Vec<Segment>` / `Vec<Zone>` / `Vec<Obstacle>` / `Vec<Checkpoint>`,
//! `Segment` owns `Vec<Lane>`, `Lane` owns `Vec<Waypoint>`, `Zone` owns its
//! perimeter `Vec<Waypoint>` and `Vec<Spot>`, `Spot` owns `[Waypoint; 2]`.
//!
//! Everything layered on top of that tree — exit edges, checkpoint targets,
//! and each waypoint's own "where am I" back-reference — is a [`WaypointRef`]:
//! a tagged handle of typed indices (see `rnd_core::ids`), never a real
//! pointer or `Rc`. Indices into the per-container vectors plus a tag
//! identifying which container.

use rnd_core::{GeoPoint, LaneIdx, SegmentIdx, SpotIdx, WaypointIdx, ZoneIdx};

use crate::Boundary;

// ── WaypointRef ───────────────────────────────────────────────────────────────

/// A non-owning reference to a waypoint anywhere in a `RouteNetwork`.
///
/// Doubles as the discriminated "parent" tag (`type ∈
/// {LANE, PERIMETER, SPOT}` plus a back-reference) — the enum variant *is*
/// the type tag, and its fields *are* the back-reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaypointRef {
    /// A waypoint owned by `segments[segment].lanes[lane].waypoints[waypoint]`.
    Lane {
        segment: SegmentIdx,
        lane: LaneIdx,
        waypoint: WaypointIdx,
    },
    /// A waypoint owned by `zones[zone].perimeter[point]`. Addressed in text
    /// form with lane-id `0` (`zone.0.pt`).
    Perimeter { zone: ZoneIdx, point: WaypointIdx },
    /// One of the two waypoints owned by `zones[zone].spots[spot]`.
    /// `which` is always `0` or `1`.
    Spot {
        zone: ZoneIdx,
        spot: SpotIdx,
        which: WaypointIdx,
    },
}

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// A geographic point in the routing graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    /// Identifier unique within the local container (the third component of
    /// its dotted id). Not necessarily equal to its position in the owning
    /// `Vec` — lookups always match on this field, never on index.
    pub id: i32,
    pub pos: GeoPoint,
    /// Stop-line flag. Only ever set `true` for `WaypointRef::Lane` points;
    /// meaningless (always `false`) for perimeter and spot waypoints.
    pub is_stop: bool,
    /// Directed exit edges to other waypoints. Populated for lane and
    /// perimeter waypoints; spot waypoints never carry exits in this format.
    pub exits: Vec<WaypointRef>,
    /// Tagged back-reference to the container (and hence the "type") that
    /// owns this waypoint.
    pub parent: WaypointRef,
}

impl Waypoint {
    pub(crate) fn new(id: i32, pos: GeoPoint, parent: WaypointRef) -> Self {
        Self { id, pos, is_stop: false, exits: Vec::new(), parent }
    }
}

// ── Lane ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane {
    pub id: i32,
    pub lane_width: Option<u32>,
    pub left_boundary: Boundary,
    pub right_boundary: Boundary,
    pub waypoints: Vec<Waypoint>,
}

impl Lane {
    pub(crate) fn new(id: i32) -> Self {
        Self {
            id,
            lane_width: None,
            left_boundary: Boundary::Unspecified,
            right_boundary: Boundary::Unspecified,
            waypoints: Vec::new(),
        }
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub id: i32,
    pub name: Option<String>,
    pub lanes: Vec<Lane>,
    pub min_speed: i32,
    pub max_speed: i32,
}

impl Segment {
    pub(crate) fn new(id: i32) -> Self {
        Self { id, name: None, lanes: Vec::new(), min_speed: 0, max_speed: 0 }
    }
}

// ── Spot ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spot {
    pub id: i32,
    pub spot_width: Option<u32>,
    /// Exactly two waypoints, by construction of the parser.
    pub waypoints: [Waypoint; 2],
    /// Set (by convention) when the 2nd waypoint is tagged `checkpoint`.
    pub checkpoint_id: Option<i32>,
}

// ── Zone ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub id: i32,
    pub name: Option<String>,
    pub perimeter: Vec<Waypoint>,
    pub spots: Vec<Spot>,
    pub min_speed: i32,
    pub max_speed: i32,
}

impl Zone {
    pub(crate) fn new(id: i32) -> Self {
        Self {
            id,
            name: None,
            perimeter: Vec::new(),
            spots: Vec::new(),
            min_speed: 0,
            max_speed: 0,
        }
    }
}

// ── Checkpoint ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    pub id: i32,
    pub waypoint: WaypointRef,
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// A static obstacle annotation. Not referenced by any graph edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub id: i32,
    pub lat: f64,
    pub lon: f64,
    pub w1: f64,
    pub w2: f64,
    pub height: f64,
    pub orient: f64,
}

// ── RouteNetwork ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteNetwork {
    pub name: Option<String>,
    pub format_version: Option<String>,
    pub creation_date: Option<String>,
    pub valid: bool,
    pub segments: Vec<Segment>,
    pub zones: Vec<Zone>,
    pub obstacles: Vec<Obstacle>,
    pub checkpoints: Vec<Checkpoint>,
    pub max_checkpoint_id: i32,
}

impl RouteNetwork {
    pub fn empty() -> Self {
        Self::default()
    }
}

// ── Mission ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Speedlimit {
    pub id: i32,
    pub min_speed: i32,
    pub max_speed: i32,
}

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mission {
    pub name: Option<String>,
    pub route_name: Option<String>,
    pub format_version: Option<String>,
    pub creation_date: Option<String>,
    pub checkpoint_ids: Vec<i32>,
    pub speed_limits: Vec<Speedlimit>,
    pub valid: bool,
}

impl Mission {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The result of [`link_mission_route`](crate) (defined in `rnd-parse`):
/// a mission's checkpoint ids compacted down to the waypoints they resolved
/// to, in the same order as `Mission::checkpoint_ids` minus any that didn't
/// resolve.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkedMission {
    pub name: Option<String>,
    pub route_name: Option<String>,
    pub checkpoints: Vec<WaypointRef>,
}
