use std::fmt;

use gpolyutil::{Error, Result};

use crate::Distance;

/// A half-open interval `[lo, hi)` of kilometers. The last band of a `DistanceBands` has an
/// infinite `hi`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceBand {
    pub lo: f64,
    pub hi: f64,
}

impl DistanceBand {
    pub fn contains(self, dist: Distance) -> bool {
        let km = dist.to_kilometers();
        self.lo <= km && km < self.hi
    }
}

impl fmt::Display for DistanceBand {
    /// `50_150`, or `600_inf` for the last band
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}", self.lo, self.hi)
    }
}

/// Splits `[0, +inf)` into consecutive bands at some breakpoints. Every distance belongs to
/// exactly one band; a distance equal to a breakpoint belongs to the band starting there.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceBands {
    // Always starts with 0 and ends with +inf, strictly increasing
    boundaries: Vec<f64>,
}

impl DistanceBands {
    /// Breakpoints are in kilometers and may be given in any order. 0 is implied, so passing it
    /// (or repeating a breakpoint) doesn't create an empty band.
    pub fn new(mut breakpoints: Vec<f64>) -> Result<DistanceBands> {
        for x in &breakpoints {
            if !x.is_finite() || *x < 0.0 {
                return Err(Error::malformed(
                    x.to_string(),
                    "distance breakpoints must be finite and non-negative",
                ));
            }
        }
        breakpoints.sort_by(|a, b| a.total_cmp(b));

        let mut boundaries = vec![0.0];
        for x in breakpoints {
            if x > *boundaries.last().unwrap_or(&0.0) {
                boundaries.push(x);
            }
        }
        boundaries.push(f64::INFINITY);
        Ok(DistanceBands { boundaries })
    }

    /// Parses comma-separated kilometers, like "50,150,300,600".
    pub fn parse(raw: &str) -> Result<DistanceBands> {
        let mut breakpoints = Vec::new();
        for x in raw.split(',') {
            let x = x.trim();
            if x.is_empty() {
                continue;
            }
            breakpoints.push(
                x.parse::<f64>()
                    .map_err(|_| Error::malformed(raw, format!("{:?} isn't a number", x)))?,
            );
        }
        DistanceBands::new(breakpoints)
    }

    /// How many bands there are. Always at least 1.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn band(&self, idx: usize) -> DistanceBand {
        DistanceBand {
            lo: self.boundaries[idx],
            hi: self.boundaries[idx + 1],
        }
    }

    pub fn all(&self) -> Vec<DistanceBand> {
        (0..self.len()).map(|idx| self.band(idx)).collect()
    }

    /// The index of the band containing this distance.
    pub fn classify_idx(&self, dist: Distance) -> usize {
        let km = dist.to_kilometers();
        // The number of boundaries <= km. boundaries[0] is 0, so this is at least 1, and the
        // last boundary is infinite, so it's at most len().
        let insertion_pt = self.boundaries.partition_point(|b| *b <= km);
        insertion_pt - 1
    }

    pub fn classify(&self, dist: Distance) -> DistanceBand {
        self.band(self.classify_idx(dist))
    }
}
