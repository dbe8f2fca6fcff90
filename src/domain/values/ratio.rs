use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Latest-day delivery quantity divided by the trailing average.
///
/// `Unbounded` stands in for a positive quantity over a zero average and
/// ranks above every finite ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Finite(f64),
    Unbounded,
}

impl Ratio {
    /// Ratio rounded to two decimal places.
    pub fn compute(latest: f64, average: f64) -> Self {
        if average <= 0.0 {
            return Ratio::Unbounded;
        }
        Ratio::Finite(round2(latest / average))
    }

    /// Descending-rank comparison: larger ratios sort first.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Ratio::Unbounded, Ratio::Unbounded) => Ordering::Equal,
            (Ratio::Unbounded, _) => Ordering::Less,
            (_, Ratio::Unbounded) => Ordering::Greater,
            (Ratio::Finite(a), Ratio::Finite(b)) => b.partial_cmp(a).unwrap_or(Ordering::Equal),
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Finite(v) => write!(f, "{v:.2}"),
            Ratio::Unbounded => write!(f, "inf"),
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ratio::Finite(v) => serializer.serialize_f64(*v),
            Ratio::Unbounded => serializer.serialize_str("inf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(Ratio::compute(3500.0, 1000.0), Ratio::Finite(3.5));
        assert_eq!(Ratio::compute(1000.0, 3000.0), Ratio::Finite(0.33));
    }

    #[test]
    fn test_zero_average_is_unbounded() {
        assert_eq!(Ratio::compute(10.0, 0.0), Ratio::Unbounded);
        assert_eq!(Ratio::Unbounded.to_string(), "inf");
    }

    #[test]
    fn test_unbounded_ranks_first() {
        let mut ratios = vec![Ratio::Finite(2.0), Ratio::Unbounded, Ratio::Finite(9.5)];
        ratios.sort_by(|a, b| a.rank_cmp(b));
        assert_eq!(
            ratios,
            vec![Ratio::Unbounded, Ratio::Finite(9.5), Ratio::Finite(2.0)]
        );
    }
}
