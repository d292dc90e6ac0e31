//! Finite-capacity production scheduling (rough-cut capacity planning).
//!
//! Computes a day-granular forward schedule for work orders against
//! resource groups with calendar exceptions: orders are first sequenced
//! by a dispatching rule (EDD, SPT, WSPT, CR, FIFO), then greedily
//! assigned to the earliest day with sufficient remaining group capacity.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `WorkOrder`, `ResourceGroup`,
//!   `ResourceItem`, `CalendarException`, `CapacityCalendar`
//! - **`dispatching`**: Dispatching rules and the stable sorter that
//!   assigns sequence numbers
//! - **`validation`**: Rule-specific preconditions checked before any
//!   sorting or scheduling runs
//! - **`scheduler`**: The RCCP forward-fill engine and plan KPIs
//! - **`input`**: Normalization adapter for externally supplied records
//!   (field-name mapping, OADate and textual date parsing)
//!
//! # Pipeline
//!
//! raw records → `input` → `validation` → `dispatching` → `scheduler`
//! → annotated, ordered work orders.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Vollmann et al. (2005), "Manufacturing Planning and Control Systems"
//!   (rough-cut capacity planning)

pub mod dispatching;
pub mod error;
pub mod input;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::PlanError;
