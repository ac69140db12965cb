use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tune::Curve;

/// A named group of curves describing one operating mode of an instrument.
///
/// The arrangement is valid on the intersection of its continuous tunes'
/// domains; discrete tunes do not constrain validity. An arrangement with no
/// continuous tunes is valid everywhere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    name: String,
    tunes: BTreeMap<String, Curve>,
}

impl Arrangement {
    /// Build an arrangement from curves keyed by setable name.
    pub fn new(name: impl Into<String>, tunes: BTreeMap<String, Curve>) -> Self {
        Self {
            name: name.into(),
            tunes,
        }
    }

    /// The arrangement name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The curves, keyed by setable name.
    pub fn tunes(&self) -> &BTreeMap<String, Curve> {
        &self.tunes
    }

    /// The curve for one setable, if present.
    pub fn get(&self, setable: &str) -> Option<&Curve> {
        self.tunes.get(setable)
    }

    /// Lower validity bound.
    pub fn ind_min(&self) -> f64 {
        self.tunes
            .values()
            .filter_map(Curve::bounds)
            .map(|(lo, _)| lo)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Upper validity bound.
    pub fn ind_max(&self) -> f64 {
        self.tunes
            .values()
            .filter_map(Curve::bounds)
            .map(|(_, hi)| hi)
            .fold(f64::INFINITY, f64::min)
    }

    /// Whether `position` falls inside this arrangement's validity bounds
    /// (inclusive).
    pub fn contains(&self, position: f64) -> bool {
        self.ind_min() <= position && position <= self.ind_max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tune::{DiscreteTune, Tune};

    fn arrangement(ranges: &[(&str, f64, f64)]) -> Arrangement {
        let mut tunes = BTreeMap::new();
        for (name, lo, hi) in ranges {
            let tune = Tune::new(vec![*lo, *hi], vec![0.0, 1.0]).unwrap();
            tunes.insert(name.to_string(), Curve::from(tune));
        }
        Arrangement::new("arr", tunes)
    }

    #[test]
    fn bounds_intersect_tunes() {
        let arr = arrangement(&[("a", 0.0, 10.0), ("b", 2.0, 8.0)]);
        assert_eq!(arr.ind_min(), 2.0);
        assert_eq!(arr.ind_max(), 8.0);
    }

    #[test]
    fn contains_is_inclusive() {
        let arr = arrangement(&[("a", 1.0, 3.0)]);
        assert!(arr.contains(1.0));
        assert!(arr.contains(2.0));
        assert!(arr.contains(3.0));
        assert!(!arr.contains(0.999));
        assert!(!arr.contains(3.001));
    }

    #[test]
    fn discrete_tunes_do_not_constrain() {
        let mut tunes = BTreeMap::new();
        tunes.insert(
            "t".to_string(),
            Curve::from(Tune::new(vec![1.0, 2.0], vec![0.0, 1.0]).unwrap()),
        );
        tunes.insert(
            "d".to_string(),
            Curve::from(DiscreteTune::new(BTreeMap::new(), Some("x".into()))),
        );
        let arr = Arrangement::new("arr", tunes);
        assert_eq!(arr.ind_min(), 1.0);
        assert_eq!(arr.ind_max(), 2.0);
    }

    #[test]
    fn empty_arrangement_is_unbounded() {
        let arr = Arrangement::new("arr", BTreeMap::new());
        assert!(arr.contains(-1e9));
        assert!(arr.contains(1e9));
    }
}
