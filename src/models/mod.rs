//! Scheduling domain models.
//!
//! Core data types for the RCCP planning problem: schedulable demand
//! (`WorkOrder`), the capacity supply side (`ResourceGroup`,
//! `ResourceItem`, `CalendarException`), and the resolver that turns
//! the supply side into a usable daily figure (`CapacityCalendar`).
//!
//! # Relationships
//!
//! | Entity | References |
//! |--------|-----------|
//! | WorkOrder | ResourceGroup (by `resource_group_id`, lookup not ownership) |
//! | ResourceItem | ResourceGroup (many units per group) |
//! | CalendarException | ResourceItem (one unit, one calendar day) |
//!
//! All entities are built fresh per planning run; nothing persists
//! between invocations.

mod calendar;
mod order;
mod resource;

pub use calendar::{CalendarException, CapacityCalendar};
pub use order::{CapacityStatus, WorkOrder, UNKNOWN_ORDER_ID};
pub use resource::{ResourceGroup, ResourceItem};
