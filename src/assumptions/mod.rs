//! Market assumptions: property growth, selling cost and rent

mod growth;
mod rent;
pub mod loader;

pub use growth::{PropertyGrowth, MIN_EFFECTIVE_GROWTH_PCT};
pub use rent::RentAssumptions;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for all market assumptions used alongside a loan
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    #[serde(default)]
    pub property: PropertyGrowth,
    #[serde(default)]
    pub rent: RentAssumptions,
}

impl Assumptions {
    /// Load assumptions from a specific JSON file
    pub fn from_json_path(path: &Path) -> Result<Self> {
        loader::load_assumptions(path)
    }

    pub fn validate(&self) -> Result<()> {
        self.property.validate()?;
        self.rent.validate()
    }
}
