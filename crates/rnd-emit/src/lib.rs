//! `rnd-emit` — writes a [`rnd_model::RouteNetwork`] or [`rnd_model::Mission`]
//! back out to RND/MD text.
//!
//! # Crate layout
//!
//! | Module      | Contents                                      |
//! |-------------|-------------------------------------------------|
//! | [`route`]   | `emit_route`, `emit_route_to_path`            |
//! | [`mission`] | `emit_mission`, `emit_mission_to_path`        |
//!
//! Output is byte-for-byte what [`rnd_parse::parse_route`]/
//! [`rnd_parse::parse_mission`] (in the `rnd-parse` crate) would read back,
//! modulo float formatting and checkpoint/exit/stop ordering, which the
//! format itself doesn't make significant.

pub mod mission;
pub mod route;

#[cfg(test)]
mod tests;

pub use mission::emit_mission;
pub use route::emit_route;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use rnd_model::{Mission, RouteNetwork};

/// Create (or truncate) `path` and write `route` to it.
pub fn emit_route_to_path(route: &RouteNetwork, path: &Path) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    emit_route(route, &mut w)
}

/// Create (or truncate) `path` and write `mission` to it.
pub fn emit_mission_to_path(mission: &Mission, path: &Path) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    emit_mission(mission, &mut w)
}
