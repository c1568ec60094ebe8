//! Error type shared by the simulator and the control chart engine.

use thiserror::Error;

/// Errors surfaced by the SPC engine.
///
/// Every failure is deterministic: nothing here is transient or worth
/// retrying with the same input.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SpcError {
    /// A simulation parameter is outside its supported range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        field: &'static str,
        /// Human-readable description of the violated bound.
        reason: String,
    },

    /// Control limits were requested for a series with no subgroups.
    #[error("cannot compute control limits for an empty series")]
    EmptySeries,

    /// A subgroup was built from empty or non-finite measurements.
    #[error("subgroup {sample_id} has no finite measurements")]
    InvalidSubgroup {
        /// 1-based position of the subgroup in its series.
        sample_id: usize,
    },
}

impl SpcError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}
