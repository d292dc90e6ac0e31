//! Dispatching rules and the batch sorter.
//!
//! Orders are sequenced by exactly one selectable rule before the
//! capacity pass runs; earlier-sequenced orders get first claim on
//! capacity, so the rule choice is what shapes the schedule.
//!
//! # Usage
//!
//! ```
//! use rccp_scheduler::dispatching::{DispatchSorter, RuleKind, SortContext};
//! use rccp_scheduler::models::WorkOrder;
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let sorter = DispatchSorter::new(RuleKind::Spt);
//! let orders = vec![
//!     WorkOrder::new("long").with_processing_time(9.0),
//!     WorkOrder::new("short").with_processing_time(2.0),
//! ];
//! let sorted = sorter.sort(orders, &SortContext::at(now));
//! assert_eq!(sorted[0].order_id, "short");
//! assert_eq!(sorted[0].sequence_no, 1);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
pub mod rules;
mod sorter;

pub use context::SortContext;
pub use sorter::DispatchSorter;

use crate::models::WorkOrder;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (scheduled first), following the
/// academic convention where SPT = shortest processing time first.
pub type RuleScore = f64;

/// A dispatching rule that evaluates order priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// orders that should be sequenced first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "EDD").
    fn name(&self) -> &'static str;

    /// Evaluates an order against the rule.
    fn evaluate(&self, order: &WorkOrder, context: &SortContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Selector for the five built-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleKind {
    /// Earliest due date first.
    Edd,
    /// Shortest processing time first.
    Spt,
    /// Highest priority-to-processing-time ratio first.
    Wspt,
    /// Lowest critical ratio first.
    Cr,
    /// Earliest arrival first.
    Fifo,
}

impl RuleKind {
    /// Returns the rule implementation for this selector.
    pub fn rule(&self) -> &'static dyn DispatchingRule {
        match self {
            Self::Edd => &rules::Edd,
            Self::Spt => &rules::Spt,
            Self::Wspt => &rules::Wspt,
            Self::Cr => &rules::Cr,
            Self::Fifo => &rules::Fifo,
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rule().name())
    }
}

impl std::str::FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EDD" => Ok(Self::Edd),
            "SPT" => Ok(Self::Spt),
            "WSPT" => Ok(Self::Wspt),
            "CR" => Ok(Self::Cr),
            "FIFO" => Ok(Self::Fifo),
            other => Err(format!("unknown dispatching rule: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_kind_round_trip() {
        for kind in [
            RuleKind::Edd,
            RuleKind::Spt,
            RuleKind::Wspt,
            RuleKind::Cr,
            RuleKind::Fifo,
        ] {
            let name = kind.to_string();
            assert_eq!(name.parse::<RuleKind>().unwrap(), kind);
        }
        assert!("XYZ".parse::<RuleKind>().is_err());
    }

    #[test]
    fn test_rule_kind_wire_form() {
        let kind: RuleKind = serde_json::from_str("\"WSPT\"").unwrap();
        assert_eq!(kind, RuleKind::Wspt);
        assert_eq!(serde_json::to_string(&RuleKind::Fifo).unwrap(), "\"FIFO\"");
    }
}
