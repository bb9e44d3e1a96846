use std::collections::BTreeMap;

use crate::domain::{ReferenceKey, TurnoutCurve};

/// Collects each county's normalized values per age.
///
/// Every county contributes one value per age regardless of its size.
#[derive(Debug, Clone, Default)]
pub struct KeyBuilder {
    values: BTreeMap<u32, Vec<f64>>,
}

impl KeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_curve(&mut self, curve: &TurnoutCurve) {
        for (&age, point) in &curve.points {
            self.values.entry(age).or_default().push(point.normalized);
        }
    }

    /// Unweighted mean per age.
    pub fn finish(self) -> ReferenceKey {
        let means = self
            .values
            .into_iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(age, values)| {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                (age, mean)
            })
            .collect();
        ReferenceKey(means)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AgePoint;

    fn curve(points: &[(u32, usize, f64)]) -> TurnoutCurve {
        TurnoutCurve {
            points: points
                .iter()
                .map(|&(age, samples, normalized)| {
                    (age, AgePoint { samples, votes: 0, normalized })
                })
                .collect(),
            total_samples: points.iter().map(|p| p.1).sum(),
            total_votes: 0,
            overall_turnout: 0.5,
        }
    }

    #[test]
    fn mean_is_unweighted_across_counties() {
        let mut builder = KeyBuilder::new();
        // Very different county sizes still count once each.
        builder.add_curve(&curve(&[(40, 60, 0.8), (50, 60, 1.1)]));
        builder.add_curve(&curve(&[(40, 6000, 1.2)]));

        let key = builder.finish();
        assert_eq!(key.len(), 2);
        assert!((key.get(40).unwrap() - 1.0).abs() < 1e-12);
        assert!((key.get(50).unwrap() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn empty_builder_gives_empty_key() {
        assert!(KeyBuilder::new().finish().is_empty());
    }
}
