//! # u-spc-sim
//!
//! Control chart engine for a Statistical Process Control (SPC) training
//! simulator: synthetic subgroup generation, X-bar-R control limits, and
//! run-rule detection.
//!
//! The engine is a pure in-process computation over `f64` data. It has no
//! I/O; every parameter change regenerates the whole series.
//!
//! ## Modules
//!
//! - [`spc`] - Chart factors, control limits, and the three run rules
//! - [`simulation`] - Parameters, subgroup generator, and simulation session
//! - [`error`] - The shared [`SpcError`] type
//!
//! ## Example
//!
//! ```
//! use u_spc_sim::simulation::{Simulation, SimulationParameters, SpecialCause};
//!
//! let params = SimulationParameters {
//!     special_cause: SpecialCause::Shift,
//!     subgroup_count: 30,
//!     ..Default::default()
//! };
//! let sim = Simulation::with_seed(params, 42).unwrap();
//! let run = sim.run();
//! assert_eq!(run.series.len(), 30);
//! assert!(run.limits.lower_control_limit() <= run.limits.upper_control_limit());
//! ```

pub mod error;
pub mod simulation;
pub mod spc;

pub use error::SpcError;
