//! `rnd-core` — line reader, typed index handles, and shared geo/boundary
//! types for the `rnd` route-network parser.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|---------------------------------------------------------|
//! | [`reader`]   | `LineReader`, `Line`, `fields`, `is_comment`          |
//! | [`ids`]      | `SegmentIdx`, `LaneIdx`, `ZoneIdx`, `SpotIdx`, `WaypointIdx` |
//! | [`geo`]      | `GeoPoint` (f64 lat/lon)                              |
//! | [`boundary`] | `Boundary` (lane-edge marking)                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.    |

pub mod boundary;
pub mod geo;
pub mod ids;
pub mod reader;

#[cfg(test)]
mod tests;

pub use boundary::Boundary;
pub use geo::GeoPoint;
pub use ids::{LaneIdx, SegmentIdx, SpotIdx, WaypointIdx, ZoneIdx};
pub use reader::{fields, is_comment, Line, LineReader};
