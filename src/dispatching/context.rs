//! Sort context for dispatching rule evaluation.

use chrono::NaiveDateTime;

/// Run-scoped state passed to dispatching rules.
///
/// Holds the `now` snapshot used by the critical-ratio rule. It is
/// taken once per run so every comparison within a batch uses the same
/// reference instant.
#[derive(Debug, Clone, Copy)]
pub struct SortContext {
    /// Reference instant for due-date arithmetic.
    pub now: NaiveDateTime,
}

impl SortContext {
    /// Creates a context at the given instant.
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }
}
