//! Capacity calendar: daily capacity resolution.
//!
//! Resolves the usable capacity of a resource group on a calendar day
//! from the static roster plus sparse, additive per-unit exceptions
//! (maintenance downtime, overtime) and the group efficiency multiplier.
//!
//! # Resolution
//! Per unit: `max(standard_capacity + Σ exceptions(unit, day), 0)`,
//! summed across the group's units, then multiplied by the group's
//! efficiency (1.0 when the group has no efficiency record).
//!
//! Capacity is recomputed per `(group, day)` query; exceptions are
//! sparse and the scheduler's search horizon is bounded, so nothing is
//! pre-materialized.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ResourceGroup, ResourceItem};

/// A signed adjustment to one unit's capacity on one calendar day.
///
/// Multiple exceptions for the same unit and day are summed. Negative
/// per-unit results are floored at zero before group aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarException {
    /// The affected unit.
    #[serde(rename = "ResourceID")]
    pub resource_id: String,
    /// The affected calendar day (time-of-day already truncated).
    #[serde(rename = "ExceptionDate")]
    pub date: NaiveDate,
    /// Signed capacity delta (negative = downtime, positive = overtime).
    #[serde(rename = "ChangeValue")]
    pub change_value: f64,
}

impl CalendarException {
    /// Creates an exception for one unit on one day.
    pub fn new(resource_id: impl Into<String>, date: NaiveDate, change_value: f64) -> Self {
        Self {
            resource_id: resource_id.into(),
            date,
            change_value,
        }
    }
}

/// Resolves daily capacity for resource groups.
///
/// Built once per planning run from the roster and exception lists.
/// Unknown groups never have implicit capacity: a group with no
/// registered units resolves to zero on every day.
#[derive(Debug, Clone, Default)]
pub struct CapacityCalendar {
    /// Group efficiency records (absent = 1.0).
    efficiencies: HashMap<String, f64>,
    /// Units per group.
    units: HashMap<String, Vec<ResourceUnit>>,
    /// Summed exception deltas per unit per day.
    exceptions: HashMap<String, HashMap<NaiveDate, f64>>,
}

#[derive(Debug, Clone)]
struct ResourceUnit {
    id: String,
    standard_capacity: f64,
}

impl CapacityCalendar {
    /// Creates an empty calendar (no groups on record).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a calendar from roster and exception lists.
    pub fn from_parts(
        groups: &[ResourceGroup],
        items: &[ResourceItem],
        exceptions: &[CalendarException],
    ) -> Self {
        let mut calendar = Self::new();
        for group in groups {
            calendar.add_group(group);
        }
        for item in items {
            calendar.add_item(item);
        }
        for exception in exceptions {
            calendar.add_exception(exception);
        }
        calendar
    }

    /// Records a group's efficiency.
    pub fn add_group(&mut self, group: &ResourceGroup) {
        self.efficiencies.insert(group.id.clone(), group.efficiency);
    }

    /// Registers a unit under its group.
    pub fn add_item(&mut self, item: &ResourceItem) {
        self.units
            .entry(item.group_id.clone())
            .or_default()
            .push(ResourceUnit {
                id: item.id.clone(),
                standard_capacity: item.standard_capacity,
            });
    }

    /// Accumulates an exception delta for a unit/day.
    pub fn add_exception(&mut self, exception: &CalendarException) {
        *self
            .exceptions
            .entry(exception.resource_id.clone())
            .or_default()
            .entry(exception.date)
            .or_insert(0.0) += exception.change_value;
    }

    /// Whether the group has any registered units.
    pub fn has_units(&self, group_id: &str) -> bool {
        self.units.get(group_id).is_some_and(|u| !u.is_empty())
    }

    /// Usable capacity of a group on a given day.
    ///
    /// Returns 0 for groups with no registered units.
    pub fn daily_capacity(&self, group_id: &str, date: NaiveDate) -> f64 {
        let Some(units) = self.units.get(group_id) else {
            return 0.0;
        };

        let total: f64 = units
            .iter()
            .map(|unit| {
                let delta = self
                    .exceptions
                    .get(&unit.id)
                    .and_then(|by_day| by_day.get(&date))
                    .copied()
                    .unwrap_or(0.0);
                // A unit cannot have negative capacity.
                (unit.standard_capacity + delta).max(0.0)
            })
            .sum();

        let efficiency = self.efficiencies.get(group_id).copied().unwrap_or(1.0);
        total * efficiency
    }
}
