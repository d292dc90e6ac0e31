//! Batch-level error taxonomy.
//!
//! Per-order problems (unknown resource group, capacity overflow) are
//! recorded on the order's own `CapacityStatus` and never abort a run.
//! Everything in this module aborts the whole batch and yields no
//! partial output.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that abort an entire planning run.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The work order collection was null/absent.
    #[error("work order collection is missing")]
    MissingInput,

    /// Rule preconditions were not met; nothing was sorted or scheduled.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The raw input could not be parsed as a JSON record list.
    #[error("failed to parse input: {0}")]
    Parse(#[from] serde_json::Error),
}
