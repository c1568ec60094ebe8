//! Simulation parameters and their validation.
//!
//! Two levels of checking apply:
//!
//! - [`SimulationParameters::validate`] enforces what the engine needs to
//!   produce a meaningful series (subgroup size 2..=10, at least one
//!   subgroup, finite non-negative variation). Generation refuses anything
//!   else instead of clamping it.
//! - [`ParameterBounds`] describes the narrower slider ranges of the
//!   training UI. It is advisory: a zero-variation run is a valid engine
//!   input even though no slider can produce it.

use serde::{Deserialize, Serialize};

use crate::error::SpcError;
use crate::spc::{MAX_SUBGROUP_SIZE, MIN_SUBGROUP_SIZE};

/// Special-cause pattern injected into a generated series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialCause {
    /// Common-cause variation only.
    #[default]
    None,
    /// Linear drift in the second half of the series.
    Trend,
    /// Sustained step change in the second half of the series.
    Shift,
    /// Sinusoidal oscillation across the whole series.
    Cycle,
}

/// User-chosen inputs for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Process mean the measurements are centered on.
    pub mean: f64,
    /// Noise magnitude; each measurement deviates by at most `1.5 * variation`.
    pub variation: f64,
    /// Measurements per subgroup (n).
    pub sample_size: usize,
    /// Number of subgroups in the series.
    pub subgroup_count: usize,
    /// Pattern injected on top of the noise.
    pub special_cause: SpecialCause,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            mean: 100.0,
            variation: 5.0,
            sample_size: 5,
            subgroup_count: 25,
            special_cause: SpecialCause::None,
        }
    }
}

impl SimulationParameters {
    /// Check the parameters the engine cannot work around.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidConfiguration`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SpcError> {
        if !self.mean.is_finite() {
            return Err(SpcError::invalid("mean", format!("must be finite, got {}", self.mean)));
        }
        if !self.variation.is_finite() || self.variation < 0.0 {
            return Err(SpcError::invalid(
                "variation",
                format!("must be finite and >= 0, got {}", self.variation),
            ));
        }
        if !(MIN_SUBGROUP_SIZE..=MAX_SUBGROUP_SIZE).contains(&self.sample_size) {
            return Err(SpcError::invalid(
                "sample_size",
                format!(
                    "must be {MIN_SUBGROUP_SIZE}..={MAX_SUBGROUP_SIZE}, got {}",
                    self.sample_size
                ),
            ));
        }
        if self.subgroup_count == 0 {
            return Err(SpcError::invalid("subgroup_count", "must be at least 1, got 0"));
        }
        Ok(())
    }
}

/// Inclusive slider ranges offered by the training UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
    /// Range of the process mean.
    pub mean: (f64, f64),
    /// Range of the noise magnitude.
    pub variation: (f64, f64),
    /// Range of the subgroup size.
    pub sample_size: (usize, usize),
    /// Range of the number of subgroups.
    pub subgroup_count: (usize, usize),
}

impl ParameterBounds {
    /// The reference UI ranges: mean around 100, variation well below it, and
    /// enough subgroups for the run and trend rules to be meaningful.
    pub const REFERENCE: Self = Self {
        mean: (50.0, 150.0),
        variation: (1.0, 30.0),
        sample_size: (2, 10),
        subgroup_count: (10, 50),
    };

    /// Check `params` against these ranges, then against the engine's own
    /// requirements.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidConfiguration`] naming the first offending field.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_spc_sim::simulation::{ParameterBounds, SimulationParameters};
    ///
    /// let params = SimulationParameters::default();
    /// assert!(ParameterBounds::REFERENCE.check(&params).is_ok());
    ///
    /// let steady = SimulationParameters { variation: 0.0, ..params };
    /// assert!(ParameterBounds::REFERENCE.check(&steady).is_err());
    /// assert!(steady.validate().is_ok());
    /// ```
    pub fn check(&self, params: &SimulationParameters) -> Result<(), SpcError> {
        params.validate()?;
        check_range("mean", params.mean, self.mean)?;
        check_range("variation", params.variation, self.variation)?;
        check_range("sample_size", params.sample_size, self.sample_size)?;
        check_range("subgroup_count", params.subgroup_count, self.subgroup_count)?;
        Ok(())
    }
}

impl Default for ParameterBounds {
    fn default() -> Self {
        Self::REFERENCE
    }
}

fn check_range<T>(field: &'static str, value: T, (lo, hi): (T, T)) -> Result<(), SpcError>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < lo || value > hi {
        return Err(SpcError::invalid(
            field,
            format!("must be within [{lo}, {hi}], got {value}"),
        ));
    }
    Ok(())
}
