//! Work order (demand) model.
//!
//! A work order is one unit of schedulable demand: a quantity of
//! processing time to be placed on some day of a resource group's
//! calendar. Orders carry the sorting keys used by dispatching rules
//! (due date, priority, arrival time) and receive their scheduling
//! outcome in place (`scheduled_date`, `capacity_status`, overdue flag).
//!
//! # Time Representation
//! Due dates and arrival times are naive local datetimes; the schedule
//! itself is day-granular (`NaiveDate`). Critical-ratio sorting is the
//! only consumer of sub-day resolution.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// Sentinel order ID used when the input record carries none.
pub const UNKNOWN_ORDER_ID: &str = "N/A";

/// A work order to be scheduled.
///
/// Input fields are populated by the caller (usually via the `input`
/// adapter); `sequence_no` is assigned by the sorter and the remaining
/// output fields by the scheduler.
#[derive(Debug, Clone, Serialize)]
pub struct WorkOrder {
    /// Opaque order identifier.
    #[serde(rename = "OrderID")]
    pub order_id: String,
    /// Processing time in hours/day-units (non-negative).
    #[serde(rename = "ProcessingTime")]
    pub processing_time: f64,
    /// Due date. `None` = unbounded future (no due date on record).
    #[serde(rename = "DueDate")]
    pub due_date: Option<NaiveDateTime>,
    /// Positive priority weight (default 1.0).
    #[serde(rename = "Priority")]
    pub priority: f64,
    /// Earliest instant the order may be scheduled.
    /// Defaults to `NaiveDateTime::MIN` = available immediately.
    #[serde(rename = "ArrivalTime")]
    pub arrival_time: NaiveDateTime,
    /// Resource group this order draws capacity from. May be empty.
    #[serde(rename = "ResourceGroupID")]
    pub resource_group_id: String,
    /// 1-based rank within the sorted batch; 0 until sorted.
    #[serde(rename = "SequenceNo")]
    pub sequence_no: i32,
    /// Day the order was placed on, if any.
    #[serde(rename = "ScheduledDate", skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    /// Scheduling outcome.
    #[serde(rename = "CapacityStatus")]
    pub capacity_status: CapacityStatus,
    /// Whether the scheduled day falls after the due date.
    #[serde(rename = "IsOverdue")]
    pub is_overdue: bool,
    /// Whole days of delay; 0 when not overdue.
    #[serde(rename = "DelayDays")]
    pub delay_days: f64,
}

impl WorkOrder {
    /// Creates a new order with the given ID and no other data.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            order_id: id.into(),
            processing_time: 0.0,
            due_date: None,
            priority: 1.0,
            arrival_time: NaiveDateTime::MIN,
            resource_group_id: String::new(),
            sequence_no: 0,
            scheduled_date: None,
            capacity_status: CapacityStatus::Pending,
            is_overdue: false,
            delay_days: 0.0,
        }
    }

    /// Sets the processing time (hours/day-units).
    pub fn with_processing_time(mut self, hours: f64) -> Self {
        self.processing_time = hours;
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due: NaiveDateTime) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Sets the priority weight.
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival: NaiveDateTime) -> Self {
        self.arrival_time = arrival;
        self
    }

    /// Sets the resource group.
    pub fn with_resource_group(mut self, group_id: impl Into<String>) -> Self {
        self.resource_group_id = group_id.into();
        self
    }

    /// Whether a real (non-sentinel) due date is on record.
    pub fn has_due_date(&self) -> bool {
        self.due_date.is_some()
    }
}

/// Scheduling outcome of a single work order.
///
/// A closed set so callers can branch on the variant instead of
/// matching display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityStatus {
    /// Not yet through the scheduler.
    Pending,
    /// Placed within a day's remaining capacity.
    Scheduled,
    /// Force-committed on an empty day it alone overloads.
    ScheduledOverloaded,
    /// The referenced resource group is empty or has no registered
    /// units; the payload is the offending group ID (possibly empty).
    UnknownResource(String),
    /// No day within the search horizon could take the order.
    CapacityOverflow,
}

impl CapacityStatus {
    /// Whether the order ended up with a scheduled day.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled | Self::ScheduledOverloaded)
    }
}

impl std::fmt::Display for CapacityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Scheduled => write!(f, "Scheduled"),
            Self::ScheduledOverloaded => write!(f, "Scheduled (Overloaded)"),
            Self::UnknownResource(id) if id.is_empty() => {
                write!(f, "Unknown Resource: (Empty)")
            }
            Self::UnknownResource(id) => write!(f, "Unknown Resource: {id}"),
            Self::CapacityOverflow => write!(f, "Capacity Overflow"),
        }
    }
}

// Serialized as the display string for wire compatibility with callers
// that key off status text.
impl Serialize for CapacityStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
