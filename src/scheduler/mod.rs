//! RCCP forward-fill engine and plan metrics.
//!
//! `RccpScheduler` runs the full pipeline (validate → sort → fill) and
//! the forward-fill capacity pass itself; `PlanKpi` summarizes an
//! annotated batch.
//!
//! # References
//!
//! - Vollmann et al. (2005), "Manufacturing Planning and Control
//!   Systems", Ch. 7 (rough-cut capacity planning)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod kpi;
mod rccp;

pub use kpi::PlanKpi;
pub use rccp::{PlanRequest, RccpScheduler};
