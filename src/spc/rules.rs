//! Run rules for detecting non-random patterns on the X-bar chart.
//!
//! The simulator checks three Western-Electric-style signals:
//!
//! 1. Any point strictly beyond the control limits.
//! 2. 8 consecutive points on the same side of the center line.
//! 3. 6 consecutive points steadily increasing or decreasing.
//!
//! Run lengths count points, not steps: a trend of 6 points is 5 consecutive
//! same-direction changes. A point exactly on the center line belongs to
//! neither side and ends a run; two equal consecutive points end a trend.
//!
//! # References
//!
//! - Western Electric (1956). *Statistical Quality Control Handbook*.
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::chart::{ChartPoint, ControlLimits, ViolationType};
use super::limits::{chart_points, XBarRLimits};
use super::subgroup::SubgroupSample;

/// Points on one side of the center line needed for a run signal.
pub const RUN_LENGTH: usize = 8;

/// Points in a monotonic stretch needed for a trend signal.
pub const TREND_LENGTH: usize = 6;

/// Trait for applying run rules to chart data.
pub trait RunRule {
    /// Check points against this rule set.
    ///
    /// Returns `(point_index, violation_type)` pairs sorted by index. A point
    /// appears once per rule it triggers; a run keeps firing on every point
    /// past the threshold.
    fn check(&self, points: &[ChartPoint], limits: &ControlLimits) -> Vec<(usize, ViolationType)>;
}

/// The three rules used by the training simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainingRules;

impl RunRule for TrainingRules {
    fn check(&self, points: &[ChartPoint], limits: &ControlLimits) -> Vec<(usize, ViolationType)> {
        let mut results = Vec::new();
        results.extend(check_beyond_limits(points, limits));
        results.extend(check_run(points, limits));
        results.extend(check_trend(points));
        results.sort_by_key(|&(idx, _)| idx);
        results
    }
}

/// Summary of the rule checks over one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleViolationReport {
    /// Some subgroup mean lies strictly outside `[LCL, UCL]`.
    pub points_outside_control_limits: bool,
    /// The longest one-sided run reached [`RUN_LENGTH`].
    pub run_rule_triggered: bool,
    /// The longest monotonic stretch reached [`TREND_LENGTH`].
    pub trend_rule_triggered: bool,
    /// Longest run of points strictly on one side of the center line.
    pub longest_run: usize,
    /// Longest run of points joined by same-direction steps.
    pub longest_trend: usize,
}

impl RuleViolationReport {
    /// Whether any of the three rules fired.
    pub fn any_violation(&self) -> bool {
        self.points_outside_control_limits || self.run_rule_triggered || self.trend_rule_triggered
    }
}

/// Apply the three rules to a series against its X-bar limits.
///
/// # Examples
///
/// ```
/// use u_spc_sim::spc::{compute_control_limits, detect_violations, SubgroupSample};
///
/// let series: Vec<SubgroupSample> = (1..=10)
///     .map(|id| SubgroupSample::new(id, vec![100.0; 5]).unwrap())
///     .collect();
/// let limits = compute_control_limits(&series, 5).unwrap();
/// let report = detect_violations(&series, &limits);
/// assert!(!report.any_violation());
/// ```
pub fn detect_violations(series: &[SubgroupSample], limits: &XBarRLimits) -> RuleViolationReport {
    let points = chart_points(series);
    let longest_run = side_runs(&points, limits.xbar.cl)
        .into_iter()
        .max()
        .unwrap_or(0);
    let longest_trend = trend_runs(&points).into_iter().max().unwrap_or(0);
    RuleViolationReport {
        points_outside_control_limits: !check_beyond_limits(&points, &limits.xbar).is_empty(),
        run_rule_triggered: longest_run >= RUN_LENGTH,
        trend_rule_triggered: longest_trend >= TREND_LENGTH,
        longest_run,
        longest_trend,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Length of the one-sided run ending at each point; 0 on the center line.
fn side_runs(points: &[ChartPoint], cl: f64) -> Vec<usize> {
    let mut runs = Vec::with_capacity(points.len());
    let mut prev_side = Ordering::Equal;
    let mut run = 0_usize;
    for point in points {
        let side = point.value.partial_cmp(&cl).unwrap_or(Ordering::Equal);
        run = match side {
            Ordering::Equal => 0,
            s if s == prev_side => run + 1,
            _ => 1,
        };
        prev_side = side;
        runs.push(run);
    }
    runs
}

/// Number of points in the monotonic stretch ending at each point.
///
/// The first point, and any point equal to its predecessor, starts a fresh
/// stretch of 1. A direction change starts a stretch of 2 that shares the
/// turning point.
fn trend_runs(points: &[ChartPoint]) -> Vec<usize> {
    let mut runs = Vec::with_capacity(points.len());
    let mut prev_dir = Ordering::Equal;
    let mut run = 0_usize;
    for (i, point) in points.iter().enumerate() {
        let dir = match i {
            0 => Ordering::Equal,
            _ => point
                .value
                .partial_cmp(&points[i - 1].value)
                .unwrap_or(Ordering::Equal),
        };
        run = match dir {
            Ordering::Equal => 1,
            d if d == prev_dir => run + 1,
            _ => 2,
        };
        prev_dir = dir;
        runs.push(run);
    }
    runs
}

/// Rule 1: point strictly beyond the UCL or LCL.
fn check_beyond_limits(points: &[ChartPoint], limits: &ControlLimits) -> Vec<(usize, ViolationType)> {
    points
        .iter()
        .filter(|p| limits.is_beyond(p.value))
        .map(|p| (p.index, ViolationType::BeyondLimits))
        .collect()
}

/// Rule 2: 8 consecutive points on the same side of the center line.
///
/// Reported at the 8th point of the run and every point after it.
fn check_run(points: &[ChartPoint], limits: &ControlLimits) -> Vec<(usize, ViolationType)> {
    side_runs(points, limits.cl)
        .into_iter()
        .zip(points)
        .filter(|&(run, _)| run >= RUN_LENGTH)
        .map(|(_, p)| (p.index, ViolationType::EightOneSide))
        .collect()
}

/// Rule 3: 6 consecutive points steadily increasing or decreasing.
///
/// Reported at the 6th point of the trend and every point after it.
fn check_trend(points: &[ChartPoint]) -> Vec<(usize, ViolationType)> {
    trend_runs(points)
        .into_iter()
        .zip(points)
        .filter(|&(run, _)| run >= TREND_LENGTH)
        .map(|(_, p)| (p.index, ViolationType::SixTrend))
        .collect()
}
