//! Property value projection with age-based growth decay

use log::warn;
use serde::{Deserialize, Serialize};

use crate::assumptions::PropertyGrowth;
use crate::loan::LoanConfig;

/// Projected property value at the end of a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValuePoint {
    #[serde(rename = "YearIndex")]
    pub year_index: u32,
    /// Growth applied to reach this year's value (percent, 0 at year 0)
    #[serde(rename = "EffectiveGrowth")]
    pub effective_growth_pct: f64,
    #[serde(rename = "PropertyValue")]
    pub property_value: f64,
    #[serde(rename = "NetProceedsAfterSellingCost")]
    pub net_proceeds: f64,
}

/// Projects property value over the loan tenure
#[derive(Debug, Clone)]
pub struct PropertyProjector {
    initial_value: f64,
    tenure_years: u32,
    growth: PropertyGrowth,
}

impl PropertyProjector {
    pub fn new(initial_value: f64, tenure_years: u32, growth: PropertyGrowth) -> Self {
        Self {
            initial_value,
            tenure_years,
            growth,
        }
    }

    /// Project the purchase price over the loan tenure
    pub fn from_config(config: &LoanConfig, growth: PropertyGrowth) -> Self {
        Self::new(config.property_value, config.tenure_years, growth)
    }

    /// Values for years 0..=tenure
    pub fn project(&self) -> Vec<PropertyValuePoint> {
        let mut points = Vec::with_capacity(self.tenure_years as usize + 1);
        points.push(PropertyValuePoint {
            year_index: 0,
            effective_growth_pct: 0.0,
            property_value: self.initial_value,
            net_proceeds: self.growth.net_of_selling_cost(self.initial_value),
        });

        let mut value = self.initial_value;
        for year in 1..=self.tenure_years {
            if self.growth.is_clamped(year) {
                warn!("Property growth for year {} floored at -100%", year);
            }
            let growth_pct = self.growth.effective_growth_pct(year);
            value *= 1.0 + growth_pct / 100.0;

            points.push(PropertyValuePoint {
                year_index: year,
                effective_growth_pct: growth_pct,
                property_value: value,
                net_proceeds: self.growth.net_of_selling_cost(value),
            });
        }

        points
    }
}
