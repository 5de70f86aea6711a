//! `rnd-parse` — the two-pass route-network parser, mission parser, and
//! mission-to-route linker.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                |
//! |------------|------------------------------------------------------------|
//! | [`rndf`]   | `parse_route` — two-pass RND parser                      |
//! | [`mdf`]    | `parse_mission` — MD mode-machine parser                 |
//! | [`linker`] | `link_mission_route` — checkpoint resolution + speed projection |
//! | [`error`]  | `ParseError`, `ParseResult`, `LinkError`                 |

pub mod error;
pub mod linker;
pub mod mdf;
pub mod rndf;

#[cfg(test)]
mod tests;

pub use error::{LinkError, ParseError, ParseResult};
pub use linker::{link_mission_route, LinkOutcome};
pub use mdf::parse_mission;
pub use rndf::parse_route;
