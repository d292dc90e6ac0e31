//! Stable batch sorter and sequence-number assignment.
//!
//! Sorts the whole batch by a single rule's score. Scores are computed
//! once per order before sorting, so the comparison is a pure key
//! comparison and the sort's stability breaks ties by input order,
//! keeping sequence numbers deterministic for equal keys.

use super::{RuleKind, SortContext};
use crate::models::WorkOrder;

/// Sorts work orders by a dispatching rule and assigns sequence numbers.
#[derive(Debug, Clone, Copy)]
pub struct DispatchSorter {
    kind: RuleKind,
}

impl DispatchSorter {
    /// Creates a sorter for the given rule.
    pub fn new(kind: RuleKind) -> Self {
        Self { kind }
    }

    /// The rule this sorter applies.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Returns indices into `orders`, sorted by rule score (stable).
    pub fn sort_indices(&self, orders: &[WorkOrder], context: &SortContext) -> Vec<usize> {
        let rule = self.kind.rule();
        let scores: Vec<f64> = orders.iter().map(|o| rule.evaluate(o, context)).collect();

        let mut indices: Vec<usize> = (0..orders.len()).collect();
        indices.sort_by(|&a, &b| {
            scores[a]
                .partial_cmp(&scores[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        indices
    }

    /// Sorts the batch and assigns `sequence_no` 1..=N in sorted order.
    pub fn sort(&self, orders: Vec<WorkOrder>, context: &SortContext) -> Vec<WorkOrder> {
        let indices = self.sort_indices(&orders, context);

        let mut slots: Vec<Option<WorkOrder>> = orders.into_iter().map(Some).collect();
        indices
            .into_iter()
            .enumerate()
            .filter_map(|(rank, idx)| {
                let mut order = slots[idx].take()?;
                order.sequence_no = rank as i32 + 1;
                Some(order)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn ctx() -> SortContext {
        SortContext::at(dt(1))
    }

    #[test]
    fn test_edd_ordering() {
        // A(due=Day5), B(due=Day2), C(due=Day8) → B, A, C
        let orders = vec![
            WorkOrder::new("A").with_due_date(dt(5)),
            WorkOrder::new("B").with_due_date(dt(2)),
            WorkOrder::new("C").with_due_date(dt(8)),
        ];
        let sorted = DispatchSorter::new(RuleKind::Edd).sort(orders, &ctx());

        let ids: Vec<&str> = sorted.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, ["B", "A", "C"]);
        let seqs: Vec<i32> = sorted.iter().map(|o| o.sequence_no).collect();
        assert_eq!(seqs, [1, 2, 3]);
    }

    #[test]
    fn test_spt_ordering() {
        let orders = vec![
            WorkOrder::new("long").with_processing_time(9.0),
            WorkOrder::new("short").with_processing_time(2.0),
            WorkOrder::new("medium").with_processing_time(5.0),
        ];
        let sorted = DispatchSorter::new(RuleKind::Spt).sort(orders, &ctx());
        let ids: Vec<&str> = sorted.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, ["short", "medium", "long"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let orders = vec![
            WorkOrder::new("first").with_processing_time(4.0),
            WorkOrder::new("second").with_processing_time(4.0),
            WorkOrder::new("third").with_processing_time(4.0),
        ];
        let sorted = DispatchSorter::new(RuleKind::Spt).sort(orders, &ctx());
        let ids: Vec<&str> = sorted.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }

    #[test]
    fn test_sequence_numbers_complete() {
        let orders: Vec<WorkOrder> = (0..10)
            .map(|i| WorkOrder::new(format!("WO-{i}")).with_processing_time((10 - i) as f64))
            .collect();
        let sorted = DispatchSorter::new(RuleKind::Spt).sort(orders, &ctx());

        let mut seqs: Vec<i32> = sorted.iter().map(|o| o.sequence_no).collect();
        seqs.sort_unstable();
        assert_eq!(seqs, (1..=10).collect::<Vec<i32>>());
    }

    #[test]
    fn test_wspt_descending_ratio() {
        let orders = vec![
            WorkOrder::new("low")
                .with_processing_time(4.0)
                .with_priority(1.0),
            WorkOrder::new("high")
                .with_processing_time(4.0)
                .with_priority(3.0),
        ];
        let sorted = DispatchSorter::new(RuleKind::Wspt).sort(orders, &ctx());
        assert_eq!(sorted[0].order_id, "high");
    }

    #[test]
    fn test_fifo_ordering() {
        let orders = vec![
            WorkOrder::new("late").with_arrival(dt(3)),
            WorkOrder::new("early").with_arrival(dt(1)),
        ];
        let sorted = DispatchSorter::new(RuleKind::Fifo).sort(orders, &ctx());
        assert_eq!(sorted[0].order_id, "early");
    }

    #[test]
    fn test_empty_batch() {
        let sorter = DispatchSorter::new(RuleKind::Edd);
        assert!(sorter.sort(Vec::new(), &ctx()).is_empty());
        assert!(sorter.sort_indices(&[], &ctx()).is_empty());
    }
}
