use std::fmt;
use std::str::FromStr;

use crate::error::VoronoiError;
use crate::kdtree::Point;

/// Distance function used by the nearest-neighbour queries.
///
/// Every variant returns a squared proxy of the true distance. The proxies are
/// monotonic in the true distance, so they order candidates exactly like the
/// real metric without taking a square root. They are not meant for arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DistanceMetric {
    /// `dx² + dy²`
    #[default]
    Euclidean,
    /// `(|dx| + |dy|)²`
    Manhattan,
    /// `max(|dx|, |dy|)²`
    Chebyshev,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 3] = [
        DistanceMetric::Euclidean,
        DistanceMetric::Manhattan,
        DistanceMetric::Chebyshev,
    ];

    /// Squared distance proxy between `a` and `b`.
    #[inline]
    pub fn distance(self, a: &Point, b: &Point) -> f64 {
        let dx = b[0] - a[0];
        let dy = b[1] - a[1];
        match self {
            DistanceMetric::Euclidean => dx * dx + dy * dy,
            DistanceMetric::Manhattan => {
                let s = dx.abs() + dy.abs();
                s * s
            }
            DistanceMetric::Chebyshev => {
                let m = dx.abs().max(dy.abs());
                m * m
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Manhattan => "manhattan",
            DistanceMetric::Chebyshev => "chebyshev",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = VoronoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistanceMetric::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VoronoiError::UnknownMetric(s.to_string()))
    }
}
