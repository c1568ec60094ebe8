//! Core control chart types.
//!
//! Defines the building blocks shared by the limit calculator and the rule
//! detector: control limits, chart points with violation annotations, and the
//! violation kinds the simulator reports.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use serde::{Deserialize, Serialize};

/// Control limits for a single chart.
///
/// # Invariants
///
/// - `lcl <= cl <= ucl`
/// - All values are finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    /// Upper control limit.
    pub ucl: f64,
    /// Center line.
    pub cl: f64,
    /// Lower control limit.
    pub lcl: f64,
}

impl ControlLimits {
    /// Whether `value` lies strictly outside `[lcl, ucl]`.
    ///
    /// A value exactly on a limit is in control.
    pub fn is_beyond(&self, value: f64) -> bool {
        value > self.ucl || value < self.lcl
    }
}

/// A single point on the X-bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// The plotted statistic (the subgroup mean).
    pub value: f64,
    /// Zero-based position of this point in the series.
    pub index: usize,
    /// Violations detected at this point.
    pub violations: Vec<ViolationType>,
}

impl ChartPoint {
    /// Create a point with no violations.
    pub fn new(index: usize, value: f64) -> Self {
        Self {
            value,
            index,
            violations: Vec::new(),
        }
    }
}

/// Out-of-control signals checked by the training simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    /// Point strictly above the UCL or strictly below the LCL.
    BeyondLimits,

    /// 8 or more consecutive points on the same side of the center line.
    ///
    /// Indicates a sustained shift in the process mean.
    EightOneSide,

    /// 6 or more consecutive points steadily increasing or decreasing.
    ///
    /// Indicates a drift in the process.
    SixTrend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_beyond_strict() {
        let limits = ControlLimits {
            ucl: 30.0,
            cl: 25.0,
            lcl: 20.0,
        };
        assert!(limits.is_beyond(30.1));
        assert!(limits.is_beyond(19.9));
        assert!(!limits.is_beyond(30.0));
        assert!(!limits.is_beyond(20.0));
        assert!(!limits.is_beyond(25.0));
    }

    #[test]
    fn test_collapsed_limits_are_not_beyond() {
        let limits = ControlLimits {
            ucl: 100.0,
            cl: 100.0,
            lcl: 100.0,
        };
        assert!(!limits.is_beyond(100.0));
    }

    #[test]
    fn test_chart_point_new_has_no_violations() {
        let point = ChartPoint::new(4, 25.5);
        assert_eq!(point.index, 4);
        assert!((point.value - 25.5).abs() < f64::EPSILON);
        assert!(point.violations.is_empty());
    }

    #[test]
    fn test_violation_type_serializes_snake_case() {
        let json = serde_json::to_string(&ViolationType::EightOneSide).expect("serialize");
        assert_eq!(json, "\"eight_one_side\"");
    }
}
