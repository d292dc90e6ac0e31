//! Rule-specific input validation.
//!
//! Checks the data-sufficiency preconditions of the selected
//! dispatching rule before any sorting or scheduling runs. Validation
//! is fail-fast: the first violation aborts the whole batch with one
//! descriptive error, and no partial schedule is produced.
//!
//! # Preconditions
//!
//! | Rule | Requirement |
//! |------|-------------|
//! | EDD, CR | every order has a real due date |
//! | SPT, WSPT, CR | every order has `processing_time > 0` |
//! | FIFO | none |

use thiserror::Error;

use crate::dispatching::RuleKind;
use crate::models::WorkOrder;

/// A batch-level precondition violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A due-date-driven rule was selected but some order has no due date.
    #[error("rule {rule} requires a due date on every order; order '{order_id}' has none")]
    MissingDueDate {
        /// The selected rule.
        rule: RuleKind,
        /// The first offending order.
        order_id: String,
    },

    /// A processing-time-driven rule was selected but some order has a
    /// zero or negative processing time.
    #[error(
        "rule {rule} requires a positive processing time on every order; \
         order '{order_id}' has {processing_time}"
    )]
    NonPositiveProcessingTime {
        /// The selected rule.
        rule: RuleKind,
        /// The first offending order.
        order_id: String,
        /// The offending value.
        processing_time: f64,
    },
}

/// Validates a batch against the selected rule's preconditions.
///
/// Returns the first violation found, or `Ok(())` when the batch is
/// sufficient for the rule.
pub fn validate_orders(orders: &[WorkOrder], rule: RuleKind) -> Result<(), ValidationError> {
    if matches!(rule, RuleKind::Edd | RuleKind::Cr) {
        if let Some(order) = orders.iter().find(|o| o.due_date.is_none()) {
            return Err(ValidationError::MissingDueDate {
                rule,
                order_id: order.order_id.clone(),
            });
        }
    }

    if matches!(rule, RuleKind::Spt | RuleKind::Wspt | RuleKind::Cr) {
        if let Some(order) = orders.iter().find(|o| o.processing_time <= 0.0) {
            return Err(ValidationError::NonPositiveProcessingTime {
                rule,
                order_id: order.order_id.clone(),
                processing_time: order.processing_time,
            });
        }
    }

    Ok(())
}
