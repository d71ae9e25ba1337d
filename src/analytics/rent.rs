//! Rent-vs-buy comparison against non-equity ownership costs

use serde::{Deserialize, Serialize};

use crate::assumptions::RentAssumptions;
use super::yearly::YearlySummary;

/// Totals over the whole comparison horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentVsBuySummary {
    pub years: usize,
    pub total_rent: f64,
    pub total_non_equity_cost: f64,
    /// Equity at the end of the last year
    pub final_equity: f64,
    /// Years in which rent was below the non-equity cost of owning
    pub years_renting_cheaper: usize,
}

/// Projects rent alongside the yearly mortgage costs
#[derive(Debug, Clone)]
pub struct RentComparator {
    rent: RentAssumptions,
}

impl RentComparator {
    pub fn new(rent: RentAssumptions) -> Self {
        Self { rent }
    }

    /// Annual rent for `years` consecutive years, starting at index 0
    pub fn annual_rent_series(&self, years: usize) -> Vec<f64> {
        (0..years).map(|i| self.rent.annual_rent(i)).collect()
    }

    /// Copy of the yearly rows with annual rent filled in
    pub fn compare(&self, yearly: &[YearlySummary]) -> Vec<YearlySummary> {
        yearly
            .iter()
            .zip(self.annual_rent_series(yearly.len()))
            .map(|(row, rent)| YearlySummary {
                annual_rent: rent,
                ..row.clone()
            })
            .collect()
    }

    /// Totals over rows produced by [`RentComparator::compare`]
    pub fn summarize(compared: &[YearlySummary]) -> RentVsBuySummary {
        RentVsBuySummary {
            years: compared.len(),
            total_rent: compared.iter().map(|r| r.annual_rent).sum(),
            total_non_equity_cost: compared.iter().map(|r| r.total_non_equity_cost).sum(),
            final_equity: compared.last().map(|r| r.equity_built).unwrap_or(0.0),
            years_renting_cheaper: compared.iter().filter(|r| r.rent_minus_cost() < 0.0).count(),
        }
    }
}
