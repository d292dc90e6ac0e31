//! Rough-cut capacity forward-fill scheduler.
//!
//! # Algorithm
//!
//! 1. Validate the batch against the selected rule's preconditions.
//! 2. Sort by the dispatching rule and assign sequence numbers.
//! 3. For each order in sorted sequence, walk forward one day at a
//!    time from `max(plan_start, arrival)` and commit the order to the
//!    first day with enough remaining group capacity, tracking
//!    committed load in a per-run day-bucket map.
//!
//! An order larger than any single day's capacity is force-committed
//! on the first empty day it reaches, so oversized orders cannot stall
//! a group's bucket forever. A day's load therefore never exceeds its
//! capacity except when exactly one oversized order occupies an
//! otherwise-empty day.
//!
//! The search is bounded at 365 days; orders unresolved within the
//! horizon are reported as `CapacityOverflow`, never searched
//! indefinitely.
//!
//! # Complexity
//! O(n * h) where n = orders, h = horizon days (worst case).

use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::dispatching::{DispatchSorter, RuleKind, SortContext};
use crate::error::PlanError;
use crate::models::{
    CalendarException, CapacityCalendar, CapacityStatus, ResourceGroup, ResourceItem, WorkOrder,
};
use crate::validation::validate_orders;

/// Hard ceiling on the forward search, in days.
const SEARCH_HORIZON_DAYS: i64 = 365;

/// Tolerance for the remaining-capacity test, so float accumulation in
/// the buckets cannot reject an exact fit.
const CAPACITY_EPSILON: f64 = 1e-9;

/// Input container for one planning run.
///
/// The roster layers (groups, units, exceptions) are optional: absent
/// exceptions are a no-op, an absent group record means efficiency 1.0,
/// and a group without units resolves every order targeting it to
/// `UnknownResource`.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Orders to schedule.
    pub orders: Vec<WorkOrder>,
    /// Resource group efficiency records.
    pub groups: Vec<ResourceGroup>,
    /// Resource unit roster.
    pub items: Vec<ResourceItem>,
    /// Calendar exceptions.
    pub exceptions: Vec<CalendarException>,
    /// First day of the plan horizon. `None` = today.
    pub plan_start: Option<NaiveDate>,
    /// Dispatching rule for the sort stage.
    pub rule: RuleKind,
}

impl PlanRequest {
    /// Creates a request with the given orders and rule, no roster.
    pub fn new(orders: Vec<WorkOrder>, rule: RuleKind) -> Self {
        Self {
            orders,
            groups: Vec::new(),
            items: Vec::new(),
            exceptions: Vec::new(),
            plan_start: None,
            rule,
        }
    }

    /// Sets the group records.
    pub fn with_groups(mut self, groups: Vec<ResourceGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// Sets the unit roster.
    pub fn with_items(mut self, items: Vec<ResourceItem>) -> Self {
        self.items = items;
        self
    }

    /// Sets the calendar exceptions.
    pub fn with_exceptions(mut self, exceptions: Vec<CalendarException>) -> Self {
        self.exceptions = exceptions;
        self
    }

    /// Sets the plan start date.
    pub fn with_plan_start(mut self, start: NaiveDate) -> Self {
        self.plan_start = Some(start);
        self
    }
}

/// Finite-capacity forward-fill scheduler.
///
/// Stateless between runs: the day-bucket load map and the `now`
/// snapshot live only for the duration of one `plan` call.
///
/// # Example
///
/// ```
/// use rccp_scheduler::dispatching::RuleKind;
/// use rccp_scheduler::models::{ResourceGroup, ResourceItem, WorkOrder};
/// use rccp_scheduler::scheduler::{PlanRequest, RccpScheduler};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let request = PlanRequest::new(
///     vec![WorkOrder::new("WO-1").with_processing_time(4.0).with_resource_group("CNC")],
///     RuleKind::Fifo,
/// )
/// .with_groups(vec![ResourceGroup::new("CNC")])
/// .with_items(vec![ResourceItem::new("CNC-01", "CNC", 8.0)])
/// .with_plan_start(start);
///
/// let planned = RccpScheduler::new().plan(request).unwrap();
/// assert_eq!(planned[0].scheduled_date, Some(start));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RccpScheduler;

impl RccpScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Runs the full pipeline with the wall clock as `now`.
    pub fn plan(&self, request: PlanRequest) -> Result<Vec<WorkOrder>, PlanError> {
        self.plan_at(request, Local::now().naive_local())
    }

    /// Runs the full pipeline with an explicit `now` snapshot.
    ///
    /// `now` feeds the critical-ratio rule and the plan-start default;
    /// fixing it makes the run fully deterministic.
    pub fn plan_at(
        &self,
        request: PlanRequest,
        now: NaiveDateTime,
    ) -> Result<Vec<WorkOrder>, PlanError> {
        validate_orders(&request.orders, request.rule)?;

        let sorter = DispatchSorter::new(request.rule);
        let mut orders = sorter.sort(request.orders, &SortContext::at(now));

        let calendar =
            CapacityCalendar::from_parts(&request.groups, &request.items, &request.exceptions);
        let plan_start = request.plan_start.unwrap_or_else(|| now.date());

        self.fill(&mut orders, &calendar, plan_start);
        Ok(orders)
    }

    /// Forward-fill capacity pass over an already-sorted batch.
    ///
    /// Orders are processed in slice order; earlier orders get first
    /// claim on capacity. Each order's `scheduled_date`,
    /// `capacity_status`, `is_overdue`, and `delay_days` are set in
    /// place.
    pub fn fill(
        &self,
        orders: &mut [WorkOrder],
        calendar: &CapacityCalendar,
        plan_start: NaiveDate,
    ) {
        // group → day → committed load, scoped to this run.
        let mut buckets: HashMap<String, HashMap<NaiveDate, f64>> = HashMap::new();

        for order in orders.iter_mut() {
            let group_id = order.resource_group_id.clone();
            if group_id.is_empty() || !calendar.has_units(&group_id) {
                warn!(order = %order.order_id, group = %group_id, "unknown resource group");
                order.capacity_status = CapacityStatus::UnknownResource(group_id);
                continue;
            }

            // No order may start before it exists or before the horizon.
            let search_start = plan_start.max(order.arrival_time.date());
            let loads = buckets.entry(group_id.clone()).or_default();

            let mut committed = false;
            for offset in 0..SEARCH_HORIZON_DAYS {
                let day = search_start + Duration::days(offset);
                let capacity = calendar.daily_capacity(&group_id, day);
                if capacity <= 0.0 {
                    continue; // Holiday/shutdown: the bucket stays untouched.
                }

                let used = loads.get(&day).copied().unwrap_or(0.0);
                if capacity - used + CAPACITY_EPSILON >= order.processing_time {
                    *loads.entry(day).or_insert(0.0) += order.processing_time;
                    commit(order, day, CapacityStatus::Scheduled);
                    committed = true;
                    break;
                }

                // An order no single day could ever fit is forced onto
                // the first empty day it reaches.
                if used == 0.0 && order.processing_time > capacity {
                    loads.insert(day, order.processing_time);
                    commit(order, day, CapacityStatus::ScheduledOverloaded);
                    committed = true;
                    break;
                }
            }

            if !committed {
                warn!(
                    order = %order.order_id,
                    group = %group_id,
                    horizon_days = SEARCH_HORIZON_DAYS,
                    "capacity overflow"
                );
                order.capacity_status = CapacityStatus::CapacityOverflow;
            }
        }
    }
}

/// Records a placement and derives the overdue annotation.
fn commit(order: &mut WorkOrder, day: NaiveDate, status: CapacityStatus) {
    debug!(order = %order.order_id, %day, status = %status, "order committed");
    order.scheduled_date = Some(day);
    order.capacity_status = status;
    if let Some(due) = order.due_date {
        if day > due.date() {
            order.is_overdue = true;
            order.delay_days = (day - due.date()).num_days() as f64;
        }
    }
}
