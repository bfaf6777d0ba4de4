use gpolyutil::{Error, Result};

use crate::{Distance, LonLat, POLYLINE_PRECISION};

/// Optional attributes a routing service reports alongside the geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RouteSummary {
    pub seconds: Option<i64>,
    pub meters: Option<i64>,
}

impl RouteSummary {
    /// Something like "735 s, 10234 m", if anything is known.
    pub fn describe(&self) -> Option<String> {
        match (self.seconds, self.meters) {
            (Some(s), Some(m)) => Some(format!("{} s, {} m", s, m)),
            (Some(s), None) => Some(format!("{} s", s)),
            (None, Some(m)) => Some(format!("{} m", m)),
            (None, None) => None,
        }
    }
}

/// An ordered path. The order of `points` is the order of travel.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub name: Option<String>,
    pub points: Vec<LonLat>,
    pub summary: RouteSummary,
}

impl Route {
    pub fn new(points: Vec<LonLat>) -> Route {
        Route {
            name: None,
            points,
            summary: RouteSummary::default(),
        }
    }

    /// Decodes a Google-encoded polyline with precision 5.
    pub fn from_polyline(encoded: &str) -> Result<Route> {
        let linestring = polyline::decode_polyline(encoded, POLYLINE_PRECISION).map_err(|err| {
            Error::Decode {
                polyline: encoded.to_string(),
                reason: err.to_string(),
            }
        })?;
        Ok(Route::new(
            linestring.into_points().into_iter().map(LonLat::from).collect(),
        ))
    }

    pub fn named(mut self, name: String) -> Route {
        self.name = Some(name);
        self
    }

    pub fn with_summary(mut self, summary: RouteSummary) -> Route {
        self.summary = summary;
        self
    }

    pub fn first_pt(&self) -> Option<LonLat> {
        self.points.first().cloned()
    }

    pub fn last_pt(&self) -> Option<LonLat> {
        self.points.last().cloned()
    }

    /// The great-circle length along every point.
    pub fn length(&self) -> Distance {
        self.points
            .windows(2)
            .map(|pair| pair[0].gps_dist(pair[1]))
            .sum()
    }
}
