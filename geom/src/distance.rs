use std::{fmt, ops};

use serde::{Deserialize, Serialize};

/// A distance, in meters. Never negative or NaN.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance::const_meters(0.0);

    /// Creates a distance in meters.
    pub fn meters(value: f64) -> Distance {
        if !value.is_finite() || value < 0.0 {
            panic!("Bad Distance {}", value);
        }

        Distance(value)
    }

    // TODO Can't panic inside a const fn, seemingly. Don't pass in anything bad!
    pub const fn const_meters(value: f64) -> Distance {
        Distance(value)
    }

    /// Creates a distance in kilometers.
    pub fn kilometers(value: f64) -> Distance {
        Distance::meters(1000.0 * value)
    }

    pub fn to_kilometers(self) -> f64 {
        self.0 / 1000.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 < 1000.0 {
            write!(f, "{}m", (self.0 * 10.0).round() / 10.0)
        } else {
            write!(f, "{}km", (self.to_kilometers() * 10.0).round() / 10.0)
        }
    }
}

impl ops::Add for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Distance {
        Distance::meters(self.0 + other.0)
    }
}

impl std::iter::Sum for Distance {
    fn sum<I>(iter: I) -> Distance
    where
        I: Iterator<Item = Distance>,
    {
        let mut sum = Distance::ZERO;
        for x in iter {
            sum = sum + x;
        }
        sum
    }
}

impl Default for Distance {
    fn default() -> Distance {
        Distance::ZERO
    }
}
