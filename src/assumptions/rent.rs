//! Rent assumptions for the rent-vs-buy comparison

use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, Result};

fn default_monthly_rent() -> f64 { 1500.0 }
fn default_annual_growth() -> f64 { 0.03 }

/// Monthly rent and its annual escalation (decimal)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentAssumptions {
    #[serde(default = "default_monthly_rent")]
    pub monthly_rent: f64,

    #[serde(default = "default_annual_growth")]
    pub annual_growth: f64,
}

impl Default for RentAssumptions {
    fn default() -> Self {
        Self {
            monthly_rent: default_monthly_rent(),
            annual_growth: default_annual_growth(),
        }
    }
}

impl RentAssumptions {
    /// Rent paid over year `year_index` (0 = first year)
    pub fn annual_rent(&self, year_index: usize) -> f64 {
        self.monthly_rent * (1.0 + self.annual_growth).powi(year_index as i32) * 12.0
    }

    pub fn validate(&self) -> Result<()> {
        if !self.monthly_rent.is_finite() || self.monthly_rent < 0.0 {
            return Err(MortgageError::invalid(
                "monthly_rent",
                format!("must be a non-negative number (got {})", self.monthly_rent),
            ));
        }
        if !self.annual_growth.is_finite() || self.annual_growth < 0.0 {
            return Err(MortgageError::invalid(
                "rent_growth",
                format!("must be a non-negative number (got {})", self.annual_growth),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_rent_escalates() {
        let rent = RentAssumptions::default();
        assert!((rent.annual_rent(0) - 18_000.0).abs() < 1e-9);
        assert!((rent.annual_rent(1) - 18_540.0).abs() < 1e-9);
        assert!((rent.annual_rent(2) - 1500.0 * 1.03_f64.powi(2) * 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_rent_rejected() {
        let rent = RentAssumptions {
            monthly_rent: -10.0,
            ..RentAssumptions::default()
        };
        assert!(rent.validate().is_err());
    }
}
