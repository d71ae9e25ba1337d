//! Calendar-year rollup of the amortization schedule

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::projection::PaymentRecord;

/// Totals for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "CustomerInterest")]
    pub customer_interest: f64,
    #[serde(rename = "HOA")]
    pub hoa: f64,
    #[serde(rename = "PropertyTax")]
    pub property_tax: f64,
    #[serde(rename = "Insurance")]
    pub insurance: f64,
    #[serde(rename = "Principal")]
    pub principal: f64,
    #[serde(rename = "Subsidy")]
    pub subsidy: f64,
    /// Filled by the rent comparison; zero straight out of the aggregator
    #[serde(rename = "AnnualRent")]
    pub annual_rent: f64,
    #[serde(rename = "TotalNonEquityCost")]
    pub total_non_equity_cost: f64,
    /// Principal paid in this and all earlier years
    #[serde(rename = "EquityBuilt")]
    pub equity_built: f64,
}

impl YearlySummary {
    fn empty(year: i32) -> Self {
        Self {
            year,
            customer_interest: 0.0,
            hoa: 0.0,
            property_tax: 0.0,
            insurance: 0.0,
            principal: 0.0,
            subsidy: 0.0,
            annual_rent: 0.0,
            total_non_equity_cost: 0.0,
            equity_built: 0.0,
        }
    }

    /// Rent minus non-equity ownership cost; positive when owning is cheaper
    pub fn rent_minus_cost(&self) -> f64 {
        self.annual_rent - self.total_non_equity_cost
    }
}

/// Groups payment records by calendar year
pub struct YearlyAggregator;

impl YearlyAggregator {
    /// Sum each year's costs and accumulate equity. Rows are ordered by year.
    pub fn aggregate(records: &[PaymentRecord]) -> Vec<YearlySummary> {
        let mut by_year: BTreeMap<i32, YearlySummary> = BTreeMap::new();

        for record in records {
            let row = by_year
                .entry(record.year)
                .or_insert_with(|| YearlySummary::empty(record.year));
            row.customer_interest += record.customer_interest;
            row.hoa += record.hoa;
            row.property_tax += record.property_tax;
            row.insurance += record.insurance;
            row.principal += record.principal;
            row.subsidy += record.subsidy;
        }

        let mut equity = 0.0;
        by_year
            .into_values()
            .map(|mut row| {
                equity += row.principal;
                row.equity_built = equity;
                row.total_non_equity_cost =
                    row.customer_interest + row.hoa + row.property_tax + row.insurance;
                row
            })
            .collect()
    }
}
