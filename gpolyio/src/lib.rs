//! Reading routing responses and writing them back out as GPX or Shapefiles, one file at a time
//! or as a concurrent batch.

#[macro_use]
extern crate log;

mod batch;
mod convert;
mod download;
mod extract;
mod gpx_out;
mod io;
mod shp_out;

pub use crate::batch::{expand_pattern, load_routes, BatchOutcome};
pub use crate::convert::{
    fetch_route, gpoly2gpx, gpoly2shp, gpolyfiles2gpx, gpolyfiles2shp, output_path,
};
pub use crate::download::fetch_json;
pub use crate::extract::{load_route, route_from_json, RoutePaths};
pub use crate::gpx_out::{to_gpx, write_gpx, Author};
pub use crate::io::{read_json, write_json};
pub use crate::shp_out::{write_shapefile, ShpFeature};

pub const DEFAULT_GEOM_PATH: &str = "routes/route/polyline-definition/polyline";
pub const DEFAULT_TIME_PATH: &str = "routes/route/summary/time";
pub const DEFAULT_LENGTH_PATH: &str = "routes/route/summary/length";
pub const DEFAULT_CONCURRENCY: usize = 4;
