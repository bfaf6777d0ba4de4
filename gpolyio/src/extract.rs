use std::path::Path;

use serde_json::Value;

use geom::{Route, RouteSummary};
use gpolyutil::{get_number, get_string, Error, Result};

use crate::{read_json, DEFAULT_GEOM_PATH, DEFAULT_LENGTH_PATH, DEFAULT_TIME_PATH};

/// Where to find things in a routing response. See `gpolyutil::get_item` for the path syntax.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePaths {
    /// The encoded polyline
    pub geom: String,
    /// Elapsed seconds
    pub time: String,
    /// Length in meters
    pub length: String,
    /// A name for the route, if the response carries one
    pub name: Option<String>,
}

impl Default for RoutePaths {
    fn default() -> RoutePaths {
        RoutePaths {
            geom: DEFAULT_GEOM_PATH.to_string(),
            time: DEFAULT_TIME_PATH.to_string(),
            length: DEFAULT_LENGTH_PATH.to_string(),
            name: None,
        }
    }
}

/// Decodes the polyline from a routing response and attaches whatever summary is present. Only
/// the polyline is required; `source_name` is just for errors.
pub fn route_from_json(doc: &Value, source_name: &str, paths: &RoutePaths) -> Result<Route> {
    let encoded = get_string(doc, &paths.geom).ok_or_else(|| Error::MissingField {
        source_name: source_name.to_string(),
        path: paths.geom.clone(),
    })?;
    let mut route = Route::from_polyline(encoded)?.with_summary(RouteSummary {
        seconds: get_number(doc, &paths.time),
        meters: get_number(doc, &paths.length),
    });
    if let Some(name) = paths.name.as_ref().and_then(|path| get_string(doc, path)) {
        route = route.named(name.to_string());
    }
    Ok(route)
}

/// Reads one file and decodes the route inside.
pub fn load_route<P: AsRef<Path>>(path: P, paths: &RoutePaths) -> Result<Route> {
    let path = path.as_ref();
    let doc = read_json(path)?;
    route_from_json(&doc, &path.display().to_string(), paths)
}
