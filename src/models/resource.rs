//! Resource roster model.
//!
//! The capacity supply side is a two-level roster: named groups
//! (interchangeable pools the orders reference) containing individual
//! units that each contribute a standard daily capacity. Orders never
//! reference units directly; calendar exceptions do.

use serde::{Deserialize, Serialize};

/// A named pool of interchangeable capacity units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// Unique group identifier.
    #[serde(rename = "ResourceGroupID")]
    pub id: String,
    /// Output multiplier applied to the group's aggregate daily
    /// capacity. Conceptually in (0, 1] but used as-is; out-of-range
    /// values are not rejected.
    #[serde(rename = "Efficiency")]
    pub efficiency: f64,
}

impl ResourceGroup {
    /// Creates a group with the default efficiency of 1.0.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            efficiency: 1.0,
        }
    }

    /// Sets the efficiency multiplier.
    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }
}

/// One physical or logical capacity unit within a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceItem {
    /// Unique unit identifier.
    #[serde(rename = "ResourceID")]
    pub id: String,
    /// Owning group.
    #[serde(rename = "ResourceGroupID")]
    pub group_id: String,
    /// Nominal capacity contributed per day (units/day, non-negative).
    #[serde(rename = "StandardCapacity")]
    pub standard_capacity: f64,
}

impl ResourceItem {
    /// Creates a unit with the given standard daily capacity.
    pub fn new(id: impl Into<String>, group_id: impl Into<String>, standard_capacity: f64) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            standard_capacity,
        }
    }
}
