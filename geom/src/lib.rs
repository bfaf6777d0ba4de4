//! Geometry for route conversion and URL sampling: GPS points, great-circle distances, the
//! distance bands used to stratify samples, and routes decoded from Google-encoded polylines.

pub use crate::bands::{DistanceBand, DistanceBands};
pub use crate::distance::Distance;
pub use crate::gps::LonLat;
pub use crate::route::{Route, RouteSummary};

mod bands;
mod distance;
mod gps;
mod route;

// Polylines encode 1e-5 degree units
pub const POLYLINE_PRECISION: u32 = 5;

/// Reduce the precision of an f64. Used when comparing decoded coordinates.
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000_000.0).round() / 10_000_000.0
}
