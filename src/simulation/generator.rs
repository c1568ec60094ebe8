//! Synthetic subgroup generation with optional special causes.
//!
//! # Algorithm
//!
//! For subgroup index `i` (0-based) with `half = subgroup_count / 2`, the
//! effective mean is
//!
//! ```text
//! None:  mean
//! Trend: mean                            if i <= half
//!        mean + TREND_STEP * (i - half)  otherwise
//! Shift: mean                            if i <= half
//!        mean + SHIFT_OFFSET             otherwise
//! Cycle: mean + CYCLE_AMPLITUDE * sin(i / CYCLE_PERIOD)
//! ```
//!
//! Each measurement is `effective_mean + (u1 + u2 + u3 - 1.5) * variation`
//! with `u_k ~ U[0, 1)`, rounded to one decimal place. The noise is the
//! centered Irwin–Hall sum of three uniforms: bell-shaped, symmetric, and
//! bounded to `±1.5 * variation`.

use rand::Rng;
use tracing::debug;

use super::params::{SimulationParameters, SpecialCause};
use crate::error::SpcError;
use crate::spc::SubgroupSample;

/// Per-subgroup mean increment after the midpoint in trend mode.
pub const TREND_STEP: f64 = 1.0;

/// Mean offset applied after the midpoint in shift mode.
pub const SHIFT_OFFSET: f64 = 10.0;

/// Peak deviation of the mean in cycle mode.
pub const CYCLE_AMPLITUDE: f64 = 10.0;

/// Subgroup-index divisor of the sine argument in cycle mode.
pub const CYCLE_PERIOD: f64 = 3.0;

/// Generate a series using the thread-local RNG.
///
/// # Errors
///
/// [`SpcError::InvalidConfiguration`] if `params` fails
/// [`SimulationParameters::validate`].
///
/// # Examples
///
/// ```
/// use u_spc_sim::simulation::{generate_series, SimulationParameters};
///
/// let params = SimulationParameters { subgroup_count: 20, ..Default::default() };
/// let series = generate_series(&params).unwrap();
/// assert_eq!(series.len(), 20);
/// assert!(series.iter().all(|s| s.len() == params.sample_size));
/// ```
pub fn generate_series(params: &SimulationParameters) -> Result<Vec<SubgroupSample>, SpcError> {
    generate_series_with(params, &mut rand::rng())
}

/// Generate a series drawing noise from `rng`.
///
/// A seeded RNG makes the series reproducible.
///
/// # Errors
///
/// [`SpcError::InvalidConfiguration`] if `params` fails
/// [`SimulationParameters::validate`].
pub fn generate_series_with<R: Rng + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<Vec<SubgroupSample>, SpcError> {
    params.validate()?;

    let mut series = Vec::with_capacity(params.subgroup_count);
    for i in 0..params.subgroup_count {
        let center = effective_mean(params, i);
        let raw_values: Vec<f64> = (0..params.sample_size)
            .map(|_| round_tenth(center + noise(rng, params.variation)))
            .collect();
        let sample_id = i + 1;
        let sample = SubgroupSample::new(sample_id, raw_values)
            .ok_or(SpcError::InvalidSubgroup { sample_id })?;
        series.push(sample);
    }

    debug!(
        subgroups = series.len(),
        sample_size = params.sample_size,
        special_cause = ?params.special_cause,
        "generated subgroup series"
    );
    Ok(series)
}

/// Mean the `i`-th subgroup is drawn around.
pub fn effective_mean(params: &SimulationParameters, i: usize) -> f64 {
    let half = params.subgroup_count / 2;
    match params.special_cause {
        SpecialCause::None => params.mean,
        SpecialCause::Trend if i > half => params.mean + TREND_STEP * (i - half) as f64,
        SpecialCause::Shift if i > half => params.mean + SHIFT_OFFSET,
        SpecialCause::Trend | SpecialCause::Shift => params.mean,
        SpecialCause::Cycle => params.mean + CYCLE_AMPLITUDE * (i as f64 / CYCLE_PERIOD).sin(),
    }
}

/// Centered sum of three uniforms scaled by `variation`.
fn noise<R: Rng + ?Sized>(rng: &mut R, variation: f64) -> f64 {
    let sum: f64 = rng.random::<f64>() + rng.random::<f64>() + rng.random::<f64>();
    (sum - 1.5) * variation
}

fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
