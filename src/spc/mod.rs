//! X-bar-R control chart engine.
//!
//! Turns a series of measurement subgroups into shared control limits and a
//! rule-violation report.
//!
//! # Components
//!
//! - [`factors`] - A2, D3, D4 lookup for subgroup sizes 2..=10 (clamped)
//! - [`compute_control_limits`] - grand mean, average range, X-bar and R limits
//! - [`annotate`] - chart points carrying per-point violations
//! - [`detect_violations`] - beyond-limits, run-of-8, and trend-of-6 checks
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts
//! - Western Electric (1956). *Statistical Quality Control Handbook*.

mod chart;
mod factors;
mod limits;
mod rules;
mod subgroup;

pub use chart::{ChartPoint, ControlLimits, ViolationType};
pub use factors::{factors, ChartFactors, MAX_SUBGROUP_SIZE, MIN_SUBGROUP_SIZE};
pub use limits::{annotate, compute_control_limits, XBarRLimits};
pub use rules::{
    detect_violations, RuleViolationReport, RunRule, TrainingRules, RUN_LENGTH, TREND_LENGTH,
};
pub use subgroup::SubgroupSample;
