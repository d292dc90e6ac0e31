//! Built-in dispatching rules.
//!
//! # Score Convention
//! All rules return lower scores for higher priority orders.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use super::{DispatchingRule, RuleScore, SortContext};
use crate::models::WorkOrder;

/// Earliest Due Date.
///
/// Orders without a due date sort last. Validation rejects such
/// batches before this rule normally runs.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Edd;

impl DispatchingRule for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, order: &WorkOrder, _context: &SortContext) -> RuleScore {
        order
            .due_date
            .map(|d| d.and_utc().timestamp() as f64)
            .unwrap_or(f64::MAX)
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Shortest Processing Time.
///
/// Minimizes average flow time and WIP.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, order: &WorkOrder, _context: &SortContext) -> RuleScore {
        order.processing_time
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Weighted Shortest Processing Time.
///
/// Sequences by `priority / processing_time`, highest ratio first.
/// Zero processing time maps the ratio to 0, which sorts such orders
/// last under the descending ratio.
///
/// # Reference
/// Smith (1956), optimal for minimizing weighted mean flow time.
#[derive(Debug, Clone, Copy)]
pub struct Wspt;

impl DispatchingRule for Wspt {
    fn name(&self) -> &'static str {
        "WSPT"
    }

    fn evaluate(&self, order: &WorkOrder, _context: &SortContext) -> RuleScore {
        let ratio = if order.processing_time == 0.0 {
            0.0
        } else {
            order.priority / order.processing_time
        };
        -ratio // Higher ratio = higher priority → negate
    }

    fn description(&self) -> &'static str {
        "Weighted Shortest Processing Time"
    }
}

/// Critical Ratio.
///
/// CR = hours until due date / processing time.
/// - CR < 1.0: behind schedule
/// - CR = 1.0: on track
/// - CR > 1.0: ahead of schedule
///
/// Smallest ratio (most behind) first. Zero processing time maps to
/// `f64::MAX` and sorts last.
#[derive(Debug, Clone, Copy)]
pub struct Cr;

impl DispatchingRule for Cr {
    fn name(&self) -> &'static str {
        "CR"
    }

    fn evaluate(&self, order: &WorkOrder, context: &SortContext) -> RuleScore {
        if order.processing_time == 0.0 {
            return f64::MAX;
        }
        let due = match order.due_date {
            Some(d) => d,
            None => return f64::MAX,
        };
        let remaining_hours = (due - context.now).num_seconds() as f64 / 3600.0;
        remaining_hours / order.processing_time
    }

    fn description(&self) -> &'static str {
        "Critical Ratio"
    }
}

/// First In First Out.
///
/// Earliest arrival first.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, order: &WorkOrder, _context: &SortContext) -> RuleScore {
        order.arrival_time.and_utc().timestamp() as f64
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}
