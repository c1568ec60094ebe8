//! Control chart factor table for X-bar-R charts.
//!
//! The factors correct for the bias of the subgroup range as an estimator of
//! process dispersion. Only the standard subgroup sizes n = 2..=10 are
//! tabulated; other sizes are clamped into that range so that display code
//! never has to handle a missing entry.
//!
//! # References
//!
//! - ASTM E2587 — Standard Practice for Use of Control Charts in Statistical
//!   Process Control.
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Appendix Table VI.

use serde::{Deserialize, Serialize};

/// Smallest tabulated subgroup size.
pub const MIN_SUBGROUP_SIZE: usize = 2;

/// Largest tabulated subgroup size.
pub const MAX_SUBGROUP_SIZE: usize = 10;

// Index 0 corresponds to n=2.

/// A2 factors: UCL/LCL = X-double-bar +/- A2 * R-bar.
const A2: [f64; 9] = [1.880, 1.023, 0.729, 0.577, 0.483, 0.419, 0.373, 0.337, 0.308];

/// D3 factors: LCL_R = D3 * R-bar.
const D3: [f64; 9] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.076, 0.136, 0.184, 0.223];

/// D4 factors: UCL_R = D4 * R-bar.
const D4: [f64; 9] = [3.267, 2.575, 2.282, 2.114, 2.004, 1.924, 1.864, 1.816, 1.777];

/// The three X-bar-R factors for one subgroup size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartFactors {
    /// Multiplier of R-bar for the X-bar chart limits.
    pub a2: f64,
    /// Multiplier of R-bar for the R chart lower limit.
    pub d3: f64,
    /// Multiplier of R-bar for the R chart upper limit.
    pub d4: f64,
}

/// Look up the X-bar-R factors for subgroup size `n`.
///
/// `n` below 2 is treated as 2 and `n` above 10 as 10.
///
/// # Examples
///
/// ```
/// use u_spc_sim::spc::factors;
///
/// let f = factors(5);
/// assert!((f.a2 - 0.577).abs() < 1e-12);
/// assert_eq!(factors(1), factors(2));
/// assert_eq!(factors(25), factors(10));
/// ```
pub fn factors(n: usize) -> ChartFactors {
    let idx = n.clamp(MIN_SUBGROUP_SIZE, MAX_SUBGROUP_SIZE) - MIN_SUBGROUP_SIZE;
    ChartFactors {
        a2: A2[idx],
        d3: D3[idx],
        d4: D4[idx],
    }
}
