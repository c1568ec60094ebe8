//! X-bar-R control limit calculation.
//!
//! # Algorithm
//!
//! 1. For each subgroup, take its mean (X-bar) and range (R).
//! 2. Compute the grand mean (X-double-bar) and average range (R-bar).
//! 3. X-bar chart limits: CL = X-double-bar, UCL/LCL = CL +/- A2 * R-bar.
//! 4. R chart limits: CL = R-bar, UCL = D4 * R-bar, LCL = D3 * R-bar.
//!
//! The limits are computed once per series and shared by every point on it.
//!
//! # Reference
//!
//! Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//! Chapter 6: Control Charts for Variables.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chart::{ChartPoint, ControlLimits};
use super::factors::factors;
use super::rules::{RunRule, TrainingRules};
use super::subgroup::SubgroupSample;
use crate::error::SpcError;

/// Limits for both halves of an X-bar-R chart.
///
/// # Invariants
///
/// - `xbar.lcl <= xbar.cl <= xbar.ucl`
/// - `0 <= range.lcl <= range.cl <= range.ucl`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XBarRLimits {
    /// X-bar chart limits (center line = grand mean).
    pub xbar: ControlLimits,
    /// R chart limits (center line = average range).
    pub range: ControlLimits,
    /// Subgroup size used to select the chart factors.
    pub sample_size: usize,
}

impl XBarRLimits {
    /// Grand mean of the subgroup means.
    pub fn center_line(&self) -> f64 {
        self.xbar.cl
    }

    /// Mean of the subgroup ranges (R-bar).
    pub fn average_range(&self) -> f64 {
        self.range.cl
    }

    /// `center_line + A2 * R-bar`.
    pub fn upper_control_limit(&self) -> f64 {
        self.xbar.ucl
    }

    /// `center_line - A2 * R-bar`.
    pub fn lower_control_limit(&self) -> f64 {
        self.xbar.lcl
    }
}

/// Compute X-bar-R limits for a series of subgroups.
///
/// `sample_size` selects the chart factors; sizes outside 2..=10 use the
/// nearest tabulated entry.
///
/// # Errors
///
/// [`SpcError::EmptySeries`] if `series` has no subgroups.
///
/// # Examples
///
/// ```
/// use u_spc_sim::spc::{compute_control_limits, SubgroupSample};
///
/// let series = vec![SubgroupSample::new(1, vec![45.0, 47.0, 50.0, 53.0, 55.0]).unwrap()];
/// let limits = compute_control_limits(&series, 5).unwrap();
/// assert!((limits.center_line() - 50.0).abs() < 1e-12);
/// assert!((limits.average_range() - 10.0).abs() < 1e-12);
/// // UCL = 50 + 0.577 * 10
/// assert!((limits.upper_control_limit() - 55.77).abs() < 1e-9);
/// ```
pub fn compute_control_limits(
    series: &[SubgroupSample],
    sample_size: usize,
) -> Result<XBarRLimits, SpcError> {
    let xbar_values: Vec<f64> = series.iter().map(SubgroupSample::mean).collect();
    let r_values: Vec<f64> = series.iter().map(SubgroupSample::range).collect();

    let grand_mean = u_numflow::stats::mean(&xbar_values).ok_or(SpcError::EmptySeries)?;
    let r_bar = u_numflow::stats::mean(&r_values).ok_or(SpcError::EmptySeries)?;

    let f = factors(sample_size);
    let limits = XBarRLimits {
        xbar: ControlLimits {
            ucl: grand_mean + f.a2 * r_bar,
            cl: grand_mean,
            lcl: grand_mean - f.a2 * r_bar,
        },
        range: ControlLimits {
            ucl: f.d4 * r_bar,
            cl: r_bar,
            lcl: f.d3 * r_bar,
        },
        sample_size,
    };
    debug!(
        subgroups = series.len(),
        sample_size,
        cl = limits.xbar.cl,
        r_bar,
        ucl = limits.xbar.ucl,
        lcl = limits.xbar.lcl,
        "computed control limits"
    );
    Ok(limits)
}

/// Lay the series out as X-bar chart points annotated with rule violations.
///
/// The same limits apply to every point.
pub fn annotate(series: &[SubgroupSample], limits: &XBarRLimits) -> Vec<ChartPoint> {
    let mut points = chart_points(series);
    let violations = TrainingRules.check(&points, &limits.xbar);
    for (idx, vtype) in violations {
        if let Some(point) = points.get_mut(idx) {
            point.violations.push(vtype);
        }
    }
    points
}

/// X-bar chart points without annotations, indexed from zero.
pub(crate) fn chart_points(series: &[SubgroupSample]) -> Vec<ChartPoint> {
    series
        .iter()
        .enumerate()
        .map(|(i, s)| ChartPoint::new(i, s.mean()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spc::chart::ViolationType;

    fn series(groups: &[&[f64]]) -> Vec<SubgroupSample> {
        groups
            .iter()
            .enumerate()
            .map(|(i, g)| SubgroupSample::new(i + 1, g.to_vec()).expect("valid subgroup"))
            .collect()
    }

    #[test]
    fn test_basic_limits() {
        let s = series(&[
            &[72.0, 84.0, 79.0, 49.0],
            &[56.0, 87.0, 33.0, 42.0],
            &[55.0, 73.0, 22.0, 60.0],
            &[44.0, 80.0, 54.0, 74.0],
            &[97.0, 26.0, 48.0, 58.0],
        ]);
        let limits = compute_control_limits(&s, 4).expect("limits");

        // Subgroup means: 71.0, 54.5, 52.5, 63.0, 57.25
        let expected_cl = (71.0 + 54.5 + 52.5 + 63.0 + 57.25) / 5.0;
        assert!((limits.center_line() - expected_cl).abs() < 1e-9);

        // Ranges: 35, 54, 51, 36, 71
        let expected_r_bar = (35.0 + 54.0 + 51.0 + 36.0 + 71.0) / 5.0;
        assert!((limits.average_range() - expected_r_bar).abs() < 1e-9);

        assert!((limits.upper_control_limit() - (expected_cl + 0.729 * expected_r_bar)).abs() < 1e-9);
        assert!((limits.lower_control_limit() - (expected_cl - 0.729 * expected_r_bar)).abs() < 1e-9);
    }

    #[test]
    fn test_range_chart_limits_n5() {
        let s = series(&[&[45.0, 47.0, 50.0, 53.0, 55.0]]);
        let limits = compute_control_limits(&s, 5).expect("limits");
        assert!((limits.range.cl - 10.0).abs() < f64::EPSILON);
        assert!((limits.range.ucl - 21.14).abs() < 1e-9);
        assert!(limits.range.lcl.abs() < f64::EPSILON);
    }

    #[test]
    fn test_range_chart_lcl_positive_for_n7() {
        let s = series(&[&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]]);
        let limits = compute_control_limits(&s, 7).expect("limits");
        assert!((limits.range.lcl - 0.076 * 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_subgroup_uses_its_range() {
        let s = series(&[&[9.0, 11.0, 10.0]]);
        let limits = compute_control_limits(&s, 3).expect("limits");
        assert!((limits.average_range() - 2.0).abs() < f64::EPSILON);
        assert!((limits.center_line() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_constant_subgroups_collapse_limits() {
        let s = series(&[&[10.0, 10.0, 10.0], &[10.0, 10.0, 10.0]]);
        let limits = compute_control_limits(&s, 3).expect("limits");
        assert!((limits.center_line() - 10.0).abs() < f64::EPSILON);
        assert!((limits.upper_control_limit() - 10.0).abs() < f64::EPSILON);
        assert!((limits.lower_control_limit() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_series_is_rejected() {
        assert_eq!(compute_control_limits(&[], 5), Err(SpcError::EmptySeries));
    }

    #[test]
    fn test_out_of_table_sample_size_is_clamped() {
        let s = series(&[&[1.0, 3.0], &[2.0, 4.0]]);
        let clamped = compute_control_limits(&s, 2).expect("limits");
        let limits = compute_control_limits(&s, 1).expect("limits");
        assert_eq!(limits.xbar, clamped.xbar);
        assert_eq!(limits.range, clamped.range);
    }

    #[test]
    fn test_annotate_broadcasts_to_every_subgroup() {
        let s = series(&[&[10.0, 10.5, 9.5], &[10.2, 9.9, 10.1], &[9.8, 10.3, 10.0]]);
        let limits = compute_control_limits(&s, 3).expect("limits");
        let points = annotate(&s, &limits);
        assert_eq!(points.len(), 3);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.index, i);
            assert!((p.value - s[i].mean()).abs() < f64::EPSILON);
            assert!(p.violations.is_empty());
        }
    }

    #[test]
    fn test_annotate_marks_outlier() {
        let stable: &[f64] = &[10.0, 10.5, 9.5];
        let mut groups = vec![stable; 5];
        groups.push(&[50.0, 51.0, 49.0]);
        let s = series(&groups);
        let limits = compute_control_limits(&s, 3).expect("limits");
        let points = annotate(&s, &limits);
        assert!(points[5].violations.contains(&ViolationType::BeyondLimits));
    }
}
