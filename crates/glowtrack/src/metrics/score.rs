//! Percent-change and 0–10 score arithmetic shared by all extractors.

use serde::{Deserialize, Serialize};

use super::MetricError;

/// Highest score a single dimension can reach.
pub(crate) const MAX_SCORE: f64 = 10.0;

/// One dimension's before/after statistic and derived improvement.
///
/// `change_pct` is signed and keeps regressions visible for risk detection;
/// `improvement_pct` is the clamped value used for reporting and scoring.
/// `score = min(10, max(0, improvement_pct) / 10)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    /// Statistic measured on the before image.
    pub before_value: f64,
    /// Statistic measured on the after image.
    pub after_value: f64,
    /// Signed percent change; negative when the dimension got worse.
    pub change_pct: f64,
    /// Reported improvement in percent, never negative.
    pub improvement_pct: f64,
    /// Dimension score in `[0, 10]`.
    pub score: f64,
}

impl MetricScore {
    /// Score for a "badness" count where fewer is better (edge pixels, pore
    /// area). The reported improvement is clamped to `[0, 100]`, and a zero
    /// before-count yields 0 rather than a division by zero.
    pub fn from_reduction(before: f64, after: f64) -> Self {
        let change_pct = reduction_pct(before, after);
        Self::from_parts(before, after, change_pct, change_pct.clamp(0.0, 100.0))
    }

    /// Score for a "goodness" ratio where more is better (evenness,
    /// smoothness). The reported improvement is floored at 0 but not capped.
    pub fn from_gain(before: f64, after: f64) -> Self {
        let change_pct = gain_pct(before, after);
        Self::from_parts(before, after, change_pct, change_pct.max(0.0))
    }

    fn from_parts(before: f64, after: f64, change_pct: f64, improvement_pct: f64) -> Self {
        Self {
            before_value: before,
            after_value: after,
            change_pct,
            improvement_pct,
            score: score_from_pct(improvement_pct),
        }
    }
}

/// `(before - after) / before * 100`, or 0 when `before` is not positive.
pub(crate) fn reduction_pct(before: f64, after: f64) -> f64 {
    if before > 0.0 && before.is_finite() && after.is_finite() {
        (before - after) / before * 100.0
    } else {
        0.0
    }
}

/// `(after - before) / before * 100`, or 0 when `before` is not positive.
pub(crate) fn gain_pct(before: f64, after: f64) -> f64 {
    if before > 0.0 && before.is_finite() && after.is_finite() {
        (after - before) / before * 100.0
    } else {
        0.0
    }
}

/// Linear 0–10 score, one point per 10 % of improvement.
pub(crate) fn score_from_pct(pct: f64) -> f64 {
    if !pct.is_finite() {
        return 0.0;
    }
    (pct.max(0.0) / 10.0).min(MAX_SCORE)
}

pub(crate) fn ensure_finite(statistic: &'static str, value: f64) -> Result<f64, MetricError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MetricError::NonFiniteStatistic { statistic })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn zero_before_count_never_divides() {
        for after in [0.0, 1.0, 1e6] {
            let m = MetricScore::from_reduction(0.0, after);
            assert_eq!(m.change_pct, 0.0);
            assert_eq!(m.improvement_pct, 0.0);
            assert_eq!(m.score, 0.0);
        }
        let g = MetricScore::from_gain(0.0, 0.5);
        assert_eq!(g.improvement_pct, 0.0);
    }

    #[test]
    fn reduction_clamps_reported_but_keeps_signed_change() {
        let worse = MetricScore::from_reduction(100.0, 150.0);
        assert_abs_diff_eq!(worse.change_pct, -50.0, epsilon = 1e-12);
        assert_eq!(worse.improvement_pct, 0.0);
        assert_eq!(worse.score, 0.0);

        let better = MetricScore::from_reduction(200.0, 50.0);
        assert_abs_diff_eq!(better.improvement_pct, 75.0, epsilon = 1e-12);
        assert_abs_diff_eq!(better.score, 7.5, epsilon = 1e-12);
    }

    #[test]
    fn gain_is_floored_but_not_capped() {
        let g = MetricScore::from_gain(0.25, 1.0);
        assert_abs_diff_eq!(g.change_pct, 300.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.improvement_pct, 300.0, epsilon = 1e-12);
        assert_eq!(g.score, MAX_SCORE);

        let loss = MetricScore::from_gain(0.8, 0.6);
        assert!(loss.change_pct < 0.0);
        assert_eq!(loss.improvement_pct, 0.0);
    }

    #[test]
    fn score_is_linear_and_bounded() {
        for p in [-40.0, 0.0, 3.0, 55.5, 100.0, 250.0] {
            let s = score_from_pct(p);
            assert!((0.0..=MAX_SCORE).contains(&s));
            assert_abs_diff_eq!(s, (f64::max(p, 0.0) / 10.0).min(10.0), epsilon = 1e-12);
        }
        assert_eq!(score_from_pct(f64::NAN), 0.0);
    }
}
