//! SPC training simulator.
//!
//! Generates synthetic subgroup data from user parameters, optionally with a
//! special cause injected, and runs it through the control chart engine.
//!
//! - [`SimulationParameters`] / [`SpecialCause`] - inputs and their validation
//! - [`ParameterBounds`] - slider ranges of the reference UI
//! - [`generate_series`] - subgroup generation with Irwin–Hall noise
//! - [`run_simulation`] / [`Simulation`] - the full pipeline and a session
//!   that regenerates it on every parameter change

mod generator;
mod params;
mod session;

pub use generator::{
    effective_mean, generate_series, generate_series_with, CYCLE_AMPLITUDE, CYCLE_PERIOD,
    SHIFT_OFFSET, TREND_STEP,
};
pub use params::{ParameterBounds, SimulationParameters, SpecialCause};
pub use session::{run_simulation, Simulation, SimulationRun};
