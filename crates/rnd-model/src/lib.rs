//! `rnd-model` — the route-network and mission entity graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|------------------------------------------------------------|
//! | [`entities`] | `RouteNetwork`, `Segment`, `Lane`, `Zone`, `Spot`, `Waypoint`, `Mission`, `WaypointRef` |
//! | [`resolver`] | Id-based lookups and graph-mutation helpers on `RouteNetwork` |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.    |

pub mod entities;
pub mod resolver;


pub use entities::{
    Checkpoint, Lane, LinkedMission, Mission, Obstacle, RouteNetwork, Segment, Speedlimit, Spot,
    Waypoint, WaypointRef, Zone,
};
pub use rnd_core::Boundary;
