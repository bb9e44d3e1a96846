//! Normalized per-age turnout for one county.
//!
//! Ages with fewer than `minimum` registered voters are dropped from both the
//! curve and the normalization totals. The remaining per-age ratios are
//! divided by the county's turnout over those ages, so the sample-weighted
//! mean of the curve is exactly 1.0.

use std::collections::BTreeMap;

use crate::domain::{AgeBuckets, AgePoint, TurnoutCurve};

/// Compute the normalized turnout curve, or `None` when nothing can be normalized.
///
/// `None` covers two cases: no age meets `minimum`, or the qualifying ages
/// recorded zero votes (the normalization denominator would be zero).
pub fn compute_turnout(by_age: &AgeBuckets, minimum: usize) -> Option<TurnoutCurve> {
    let mut counts = BTreeMap::new();
    let mut total_samples = 0usize;
    let mut total_votes = 0usize;

    for (&age, facts) in by_age {
        let samples = facts.len();
        if samples < minimum || samples == 0 {
            continue;
        }
        let votes = facts.iter().filter(|f| f.voted).count();
        counts.insert(age, (samples, votes));
        total_samples += samples;
        total_votes += votes;
    }

    if total_samples == 0 || total_votes == 0 {
        return None;
    }

    let overall_turnout = total_votes as f64 / total_samples as f64;
    let points = counts
        .into_iter()
        .map(|(age, (samples, votes))| {
            let ratio = votes as f64 / samples as f64;
            (
                age,
                AgePoint {
                    samples,
                    votes,
                    normalized: ratio / overall_turnout,
                },
            )
        })
        .collect();

    Some(TurnoutCurve {
        points,
        total_samples,
        total_votes,
        overall_turnout,
    })
}

/// Sample-weighted mean of the normalized values (1.0 for any computed curve).
pub fn weighted_mean(curve: &TurnoutCurve) -> f64 {
    let weighted: f64 = curve
        .points
        .values()
        .map(|p| p.normalized * p.samples as f64)
        .sum();
    weighted / curve.total_samples as f64
}
