use std::fmt;

use serde::{Deserialize, Serialize};

use gpolyutil::{Error, Result};

use crate::{trim_f64, Distance};

/// longitude is x, latitude is y
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    pub fn x(self) -> f64 {
        self.longitude
    }

    pub fn y(self) -> f64 {
        self.latitude
    }

    pub fn gps_dist(self, other: LonLat) -> Distance {
        // Haversine distance
        let earth_radius_m = 6_371_000.0;
        let lon1 = self.longitude.to_radians();
        let lon2 = other.longitude.to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let delta_lat = lat2 - lat1;
        let delta_lon = lon2 - lon1;

        // Rounding can push this just past 1 for nearly antipodal points
        let a = ((delta_lat / 2.0).sin().powi(2)
            + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos())
        .clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::meters(earth_radius_m * c)
    }

    /// Equal after trimming both points to 1e-7 degrees.
    pub fn approx_eq(self, other: LonLat) -> bool {
        trim_f64(self.longitude) == trim_f64(other.longitude)
            && trim_f64(self.latitude) == trim_f64(other.latitude)
    }

    /// Parses "x<sep>y", like `2.35,48.85` from a `from=` query parameter. Longitude must be
    /// within [-180, 180] and latitude within [-90, 90].
    pub fn parse_xy(raw: &str, sep: char) -> Result<LonLat> {
        let parts: Vec<&str> = raw.split(sep).collect();
        if parts.len() != 2 {
            return Err(Error::malformed(
                raw,
                format!("expected 2 numbers separated by {:?}", sep),
            ));
        }
        let mut nums = Vec::new();
        for x in parts {
            let x = x.trim();
            let num = x
                .parse::<f64>()
                .map_err(|_| Error::malformed(raw, format!("{:?} isn't a number", x)))?;
            if !num.is_finite() {
                return Err(Error::malformed(raw, format!("{:?} isn't finite", x)));
            }
            nums.push(num);
        }
        if !(-180.0..=180.0).contains(&nums[0]) {
            return Err(Error::malformed(raw, "longitude must be within [-180, 180]"));
        }
        if !(-90.0..=90.0).contains(&nums[1]) {
            return Err(Error::malformed(raw, "latitude must be within [-90, 90]"));
        }
        Ok(LonLat::new(nums[0], nums[1]))
    }

    /// Describes this point with compass directions, like `N14.604398_W61.066889`. Suitable
    /// for filenames.
    pub fn to_compass(self, sep: &str) -> String {
        let lat = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let lon = if self.longitude >= 0.0 { 'E' } else { 'W' };
        format!(
            "{}{}{}{}{}",
            lat,
            self.latitude.abs(),
            sep,
            lon,
            self.longitude.abs()
        )
    }

    /// The inverse of `to_compass`. The two pieces can appear in either order.
    pub fn parse_compass(raw: &str, sep: &str) -> Result<LonLat> {
        let mut lon = None;
        let mut lat = None;
        for piece in raw.split(sep) {
            let mut chars = piece.chars();
            let direction = chars
                .next()
                .ok_or_else(|| Error::malformed(raw, "empty piece"))?;
            let value = chars
                .as_str()
                .parse::<f64>()
                .map_err(|_| Error::malformed(raw, format!("bad number in {:?}", piece)))?;
            if !value.is_finite() || value < 0.0 {
                return Err(Error::malformed(raw, format!("bad number in {:?}", piece)));
            }
            let (slot, sign) = match direction {
                'N' => (&mut lat, 1.0),
                'S' => (&mut lat, -1.0),
                'E' => (&mut lon, 1.0),
                'W' => (&mut lon, -1.0),
                x => {
                    return Err(Error::malformed(raw, format!("unknown direction {}", x)));
                }
            };
            if slot.is_some() {
                return Err(Error::malformed(raw, format!("{} appears twice", direction)));
            }
            *slot = Some(sign * value);
        }
        match (lon, lat) {
            (Some(lon), Some(lat)) => Ok(LonLat::new(lon, lat)),
            _ => Err(Error::malformed(raw, "needs both a N/S and an E/W piece")),
        }
    }

    /// Reformats raw "x<isep>y" coordinates as compass directions joined by `osep`.
    pub fn format_coord(raw: &str, isep: char, osep: &str) -> Result<String> {
        Ok(LonLat::parse_xy(raw, isep)?.to_compass(osep))
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}

impl From<LonLat> for geo::Point<f64> {
    fn from(pt: LonLat) -> Self {
        geo::Point::new(pt.longitude, pt.latitude)
    }
}

impl From<geo::Point<f64>> for LonLat {
    fn from(pt: geo::Point<f64>) -> Self {
        LonLat::new(pt.x(), pt.y())
    }
}
