//! Plan quality metrics.
//!
//! Summarizes an annotated batch after a planning run: outcome counts,
//! delay totals, and the on-time rate.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::models::{CapacityStatus, WorkOrder};

/// Batch-level outcome summary.
///
/// All counts are over the annotated order list produced by one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanKpi {
    /// Orders placed within normal capacity.
    pub scheduled_count: usize,
    /// Orders force-committed on an overloaded day.
    pub overloaded_count: usize,
    /// Orders that found no day within the search horizon.
    pub overflow_count: usize,
    /// Orders referencing an empty/unregistered resource group.
    pub unknown_resource_count: usize,
    /// Placed orders whose day falls after their due date.
    pub overdue_count: usize,
    /// Sum of delay days across overdue orders.
    pub total_delay_days: f64,
    /// Largest single delay (days).
    pub max_delay_days: f64,
    /// Fraction of placed orders meeting their due date (1.0 when
    /// nothing was placed).
    pub on_time_rate: f64,
}

impl PlanKpi {
    /// Computes KPIs from an annotated batch.
    pub fn calculate(orders: &[WorkOrder]) -> Self {
        let mut scheduled_count = 0;
        let mut overloaded_count = 0;
        let mut overflow_count = 0;
        let mut unknown_resource_count = 0;
        let mut overdue_count = 0;
        let mut total_delay_days = 0.0;
        let mut max_delay_days: f64 = 0.0;

        for order in orders {
            match &order.capacity_status {
                CapacityStatus::Scheduled => scheduled_count += 1,
                CapacityStatus::ScheduledOverloaded => overloaded_count += 1,
                CapacityStatus::CapacityOverflow => overflow_count += 1,
                CapacityStatus::UnknownResource(_) => unknown_resource_count += 1,
                CapacityStatus::Pending => {}
            }
            if order.is_overdue {
                overdue_count += 1;
                total_delay_days += order.delay_days;
                max_delay_days = max_delay_days.max(order.delay_days);
            }
        }

        let placed = scheduled_count + overloaded_count;
        let on_time_rate = if placed == 0 {
            1.0
        } else {
            (placed - overdue_count) as f64 / placed as f64
        };

        Self {
            scheduled_count,
            overloaded_count,
            overflow_count,
            unknown_resource_count,
            overdue_count,
            total_delay_days,
            max_delay_days,
            on_time_rate,
        }
    }

    /// Orders that received a scheduled day.
    pub fn placed_count(&self) -> usize {
        self.scheduled_count + self.overloaded_count
    }
}
