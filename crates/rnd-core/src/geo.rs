//! Geographic coordinate type.
//!
//! Route-network coordinates round-trip through text at 6 fractional
//! decimal digits, so `GeoPoint` is `f64` to avoid losing precision on a
//! parse-emit-reparse cycle.

/// A decimal-degree geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}\t{:.6}", self.lat, self.lon)
    }
}
