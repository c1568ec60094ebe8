//! Simulation session: the current parameters and the run derived from them.
//!
//! Every parameter change regenerates the series from scratch and recomputes
//! the limits and the report. The new run replaces the old one only once the
//! whole pipeline has succeeded.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::generator::generate_series_with;
use super::params::SimulationParameters;
use crate::error::SpcError;
use crate::spc::{
    annotate, compute_control_limits, detect_violations, ChartPoint, RuleViolationReport,
    SubgroupSample, XBarRLimits,
};

/// Output of one full generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Generated subgroups, in order.
    pub series: Vec<SubgroupSample>,
    /// Limits shared by every subgroup of the series.
    pub limits: XBarRLimits,
    /// X-bar chart points with per-point violations.
    pub points: Vec<ChartPoint>,
    /// Summary of the rule checks.
    pub report: RuleViolationReport,
}

/// Run the whole pipeline: generate, compute limits, annotate, detect.
///
/// # Errors
///
/// [`SpcError::InvalidConfiguration`] if `params` is rejected by the
/// generator.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_spc_sim::simulation::{run_simulation, SimulationParameters};
///
/// let params = SimulationParameters { variation: 0.0, subgroup_count: 10, ..Default::default() };
/// let run = run_simulation(&params, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert_eq!(run.limits.center_line(), 100.0);
/// assert_eq!(run.limits.average_range(), 0.0);
/// assert!(!run.report.any_violation());
/// ```
pub fn run_simulation<R: Rng + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<SimulationRun, SpcError> {
    let series = generate_series_with(params, rng)?;
    let limits = compute_control_limits(&series, params.sample_size)?;
    let points = annotate(&series, &limits);
    let report = detect_violations(&series, &limits);
    debug!(
        any_violation = report.any_violation(),
        longest_run = report.longest_run,
        longest_trend = report.longest_trend,
        "simulation run complete"
    );
    Ok(SimulationRun {
        series,
        limits,
        points,
        report,
    })
}

/// A single user's simulation: parameters, RNG, and the current run.
#[derive(Debug)]
pub struct Simulation {
    params: SimulationParameters,
    rng: StdRng,
    run: SimulationRun,
}

impl Simulation {
    /// Start a session seeded from the operating system.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidConfiguration`] if `params` is invalid.
    pub fn new(params: SimulationParameters) -> Result<Self, SpcError> {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    /// Start a reproducible session.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidConfiguration`] if `params` is invalid.
    pub fn with_seed(params: SimulationParameters, seed: u64) -> Result<Self, SpcError> {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: SimulationParameters, mut rng: StdRng) -> Result<Self, SpcError> {
        let run = run_simulation(&params, &mut rng)?;
        Ok(Self { params, rng, run })
    }

    /// Parameters of the current run.
    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    /// The current run.
    pub fn run(&self) -> &SimulationRun {
        &self.run
    }

    /// Replace the parameters and regenerate.
    ///
    /// On error the previous parameters and run are left untouched.
    ///
    /// # Errors
    ///
    /// [`SpcError::InvalidConfiguration`] if `params` is invalid.
    pub fn set_parameters(
        &mut self,
        params: SimulationParameters,
    ) -> Result<&SimulationRun, SpcError> {
        match run_simulation(&params, &mut self.rng) {
            Ok(run) => {
                self.params = params;
                self.run = run;
                Ok(&self.run)
            }
            Err(err) => {
                warn!(error = %err, "rejected simulation parameters");
                Err(err)
            }
        }
    }

    /// Draw a fresh series with the current parameters.
    ///
    /// # Errors
    ///
    /// Only if the stored parameters became invalid, which the constructors
    /// and [`Simulation::set_parameters`] rule out.
    pub fn regenerate(&mut self) -> Result<&SimulationRun, SpcError> {
        self.run = run_simulation(&self.params, &mut self.rng)?;
        Ok(&self.run)
    }

    /// Consume the session, keeping only the current run.
    pub fn into_run(self) -> SimulationRun {
        self.run
    }
}
