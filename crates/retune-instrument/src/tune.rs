use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{InstrumentError, Result};

/// A continuous tuning curve: sampled (independent, dependent) pairs
/// evaluated by linear interpolation.
///
/// Independent points must be strictly increasing. Evaluation outside the
/// sampled domain clamps to the nearest endpoint; arrangement bounds keep
/// callers inside the domain in normal use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tune {
    independent: Vec<f64>,
    dependent: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dep_units: Option<String>,
}

impl Tune {
    /// Build a tune from sampled points.
    pub fn new(independent: Vec<f64>, dependent: Vec<f64>) -> Result<Self> {
        if independent.len() != dependent.len() {
            return Err(InstrumentError::LengthMismatch {
                independent: independent.len(),
                dependent: dependent.len(),
            });
        }
        if independent.len() < 2 {
            return Err(InstrumentError::TooFewPoints {
                points: independent.len(),
            });
        }
        if independent.windows(2).any(|w| w[0] >= w[1]) {
            return Err(InstrumentError::NotMonotonic);
        }
        Ok(Self {
            independent,
            dependent,
            dep_units: None,
        })
    }

    /// Attach dependent-axis units (informational only).
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.dep_units = Some(units.into());
        self
    }

    /// Smallest independent sample point.
    pub fn ind_min(&self) -> f64 {
        self.independent[0]
    }

    /// Largest independent sample point.
    pub fn ind_max(&self) -> f64 {
        self.independent[self.independent.len() - 1]
    }

    /// Dependent-axis units, if any.
    pub fn dep_units(&self) -> Option<&str> {
        self.dep_units.as_deref()
    }

    /// Evaluate at `position` by linear interpolation, clamping outside the
    /// sampled domain.
    pub fn at(&self, position: f64) -> f64 {
        if position <= self.ind_min() {
            return self.dependent[0];
        }
        if position >= self.ind_max() {
            return self.dependent[self.dependent.len() - 1];
        }
        // partition_point: first index with independent[i] > position.
        let hi = self.independent.partition_point(|&x| x <= position);
        let lo = hi - 1;
        let (x0, x1) = (self.independent[lo], self.independent[hi]);
        let (y0, y1) = (self.dependent[lo], self.dependent[hi]);
        y0 + (y1 - y0) * (position - x0) / (x1 - x0)
    }
}

/// A discrete tuning curve: named independent ranges mapping to string keys,
/// with an optional default for positions no range covers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscreteTune {
    ranges: BTreeMap<String, (f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<String>,
}

impl DiscreteTune {
    /// Build a discrete tune from `key -> (min, max)` ranges.
    pub fn new(ranges: BTreeMap<String, (f64, f64)>, default: Option<String>) -> Self {
        Self { ranges, default }
    }

    /// The key whose range covers `position` (inclusive), else the default.
    pub fn at(&self, position: f64) -> Option<&str> {
        self.ranges
            .iter()
            .find(|(_, (lo, hi))| *lo <= position && position <= *hi)
            .map(|(key, _)| key.as_str())
            .or(self.default.as_deref())
    }

    /// The configured default key, if any.
    pub fn default_key(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// A curve in an arrangement: either a continuous [`Tune`] or a
/// [`DiscreteTune`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Curve {
    Tune(Tune),
    Discrete(DiscreteTune),
}

impl Curve {
    /// The independent-axis domain this curve constrains the arrangement to.
    ///
    /// Discrete tunes apply everywhere and return `None`.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            Self::Tune(tune) => Some((tune.ind_min(), tune.ind_max())),
            Self::Discrete(_) => None,
        }
    }
}

impl From<Tune> for Curve {
    fn from(tune: Tune) -> Self {
        Self::Tune(tune)
    }
}

impl From<DiscreteTune> for Curve {
    fn from(tune: DiscreteTune) -> Self {
        Self::Discrete(tune)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_between_points() {
        let tune = Tune::new(vec![0.0, 1.0], vec![0.0, 10.0]).unwrap();
        assert!((tune.at(0.5) - 5.0).abs() < 1e-12);
        assert!((tune.at(0.25) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn exact_sample_points() {
        let tune = Tune::new(vec![0.0, 1.0, 2.0], vec![1.0, 3.0, -1.0]).unwrap();
        assert_eq!(tune.at(0.0), 1.0);
        assert_eq!(tune.at(1.0), 3.0);
        assert_eq!(tune.at(2.0), -1.0);
    }

    #[test]
    fn clamps_outside_domain() {
        let tune = Tune::new(vec![1.0, 2.0], vec![5.0, 7.0]).unwrap();
        assert_eq!(tune.at(0.0), 5.0);
        assert_eq!(tune.at(3.0), 7.0);
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(matches!(
            Tune::new(vec![0.0, 1.0], vec![0.0]),
            Err(InstrumentError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn rejects_single_point() {
        assert!(matches!(
            Tune::new(vec![0.0], vec![0.0]),
            Err(InstrumentError::TooFewPoints { points: 1 })
        ));
    }

    #[test]
    fn rejects_non_monotonic() {
        assert!(matches!(
            Tune::new(vec![0.0, 2.0, 1.0], vec![0.0, 1.0, 2.0]),
            Err(InstrumentError::NotMonotonic)
        ));
    }

    #[test]
    fn discrete_lookup_and_default() {
        let mut ranges = BTreeMap::new();
        ranges.insert("hi".to_string(), (0.8, 1.0));
        ranges.insert("lo".to_string(), (0.1, 0.2));
        let tune = DiscreteTune::new(ranges, Some("med".to_string()));

        assert_eq!(tune.at(0.9), Some("hi"));
        assert_eq!(tune.at(0.15), Some("lo"));
        assert_eq!(tune.at(0.5), Some("med"));
        // Range bounds are inclusive.
        assert_eq!(tune.at(0.8), Some("hi"));
        assert_eq!(tune.at(1.0), Some("hi"));
    }

    #[test]
    fn discrete_without_default() {
        let mut ranges = BTreeMap::new();
        ranges.insert("on".to_string(), (0.0, 1.0));
        let tune = DiscreteTune::new(ranges, None);
        assert_eq!(tune.at(0.5), Some("on"));
        assert_eq!(tune.at(2.0), None);
    }

    #[test]
    fn curve_bounds() {
        let tune = Tune::new(vec![1.0, 4.0], vec![0.0, 1.0]).unwrap();
        assert_eq!(Curve::from(tune).bounds(), Some((1.0, 4.0)));
        assert_eq!(
            Curve::from(DiscreteTune::new(BTreeMap::new(), None)).bounds(),
            None
        );
    }

    #[test]
    fn curve_serde_is_tagged() {
        let tune = Tune::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
        let json = serde_json::to_value(Curve::from(tune.clone())).unwrap();
        assert_eq!(json["kind"], "tune");

        let back: Curve = serde_json::from_value(json).unwrap();
        assert_eq!(back, Curve::Tune(tune));
    }
}
