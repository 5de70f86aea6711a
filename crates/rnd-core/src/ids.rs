//! Strongly typed, zero-cost index wrappers.
//!
//! The route graph has no Rust-level pointers between entities; every
//! cross-reference (parent back-reference, exit edge, checkpoint target) is
//! one of these newtypes paired with the `RouteNetwork` that owns the `Vec`
//! it indexes into. All of them are `Copy + Eq + Hash` so they work as map
//! keys without ceremony.

use std::fmt;

/// Generate a typed index wrapper around `u32`.
macro_rules! typed_idx {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            #[inline(always)]
            pub fn new(i: usize) -> Self {
                Self(i as u32)
            }

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_idx! {
    /// Position of a `Segment` in `RouteNetwork::segments`.
    pub struct SegmentIdx;
}

typed_idx! {
    /// Position of a `Lane` in its owning `Segment::lanes`.
    pub struct LaneIdx;
}

typed_idx! {
    /// Position of a `Zone` in `RouteNetwork::zones`.
    pub struct ZoneIdx;
}

typed_idx! {
    /// Position of a `Spot` in its owning `Zone::spots`.
    pub struct SpotIdx;
}

typed_idx! {
    /// Position of a `Waypoint` within whatever local `Vec` owns it — a
    /// lane's waypoints, a zone's perimeter points, or a spot's two
    /// waypoints. Only meaningful together with a tagged parent reference
    /// identifying which container it indexes into.
    pub struct WaypointIdx;
}
