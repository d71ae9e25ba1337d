//! Net sale proceeds after selling costs and the outstanding loan

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::loan::LoanConfig;
use crate::projection::{PaymentRecord, PropertyValuePoint};

/// Sale outcome if the property were sold at the end of a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetProceedRow {
    #[serde(rename = "YearIndex")]
    pub year_index: u32,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "PropertyValue")]
    pub property_value: f64,
    #[serde(rename = "NetProceedsAfterSellingCost")]
    pub net_proceeds: f64,
    /// Year-end loan balance; `None` when the schedule has no rows in that year
    #[serde(rename = "Balance")]
    pub balance: Option<f64>,
    #[serde(rename = "ActualNetProceed")]
    pub actual_net_proceed: f64,
    /// Net proceeds against the original purchase price
    #[serde(rename = "NetGainOrLoss")]
    pub net_gain_or_loss: f64,
}

impl NetProceedRow {
    pub fn is_gain(&self) -> bool {
        self.net_gain_or_loss >= 0.0
    }
}

/// Combines the property projection with year-end loan balances
#[derive(Debug, Clone)]
pub struct NetProceedsCalculator {
    original_property_value: f64,
    first_year: i32,
}

impl NetProceedsCalculator {
    pub fn new(original_property_value: f64, first_year: i32) -> Self {
        Self {
            original_property_value,
            first_year,
        }
    }

    /// Purchase price and first calendar year of the loan
    pub fn from_config(config: &LoanConfig) -> Self {
        Self::new(config.property_value, config.start_date.year())
    }

    /// Balance after the last period of each calendar year
    pub fn year_end_balances(records: &[PaymentRecord]) -> BTreeMap<i32, f64> {
        let mut balances = BTreeMap::new();
        for record in records {
            balances.insert(record.year, record.balance);
        }
        balances
    }

    /// One row per projected year, index 0 being the first calendar year of the loan
    pub fn calculate(&self, points: &[PropertyValuePoint], records: &[PaymentRecord]) -> Vec<NetProceedRow> {
        let balances = Self::year_end_balances(records);

        points
            .iter()
            .map(|point| {
                let year = self.first_year + point.year_index as i32;
                let balance = balances.get(&year).copied();
                NetProceedRow {
                    year_index: point.year_index,
                    year,
                    property_value: point.property_value,
                    net_proceeds: point.net_proceeds,
                    balance,
                    actual_net_proceed: point.net_proceeds - balance.unwrap_or(0.0),
                    net_gain_or_loss: point.net_proceeds - self.original_property_value,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::PropertyGrowth;
    use crate::projection::{AmortizationEngine, PropertyProjector};
    use chrono::NaiveDate;

    fn config() -> LoanConfig {
        LoanConfig::with_defaults(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    fn rows(config: &LoanConfig) -> Vec<NetProceedRow> {
        let result = AmortizationEngine::new(config.clone()).amortize().unwrap();
        let points = PropertyProjector::from_config(config, PropertyGrowth::default()).project();
        NetProceedsCalculator::from_config(config).calculate(&points, &result.records)
    }

    #[test]
    fn test_year_zero_gain_loss() {
        let config = config();
        let table = rows(&config);

        assert_eq!(table.len(), 31);
        let first = &table[0];
        assert_eq!(first.year, 2025);
        assert_eq!(first.net_gain_or_loss, first.net_proceeds - config.property_value);
        // 8% selling cost on the purchase price
        assert!((first.net_gain_or_loss + 46_000.0).abs() < 1e-6);
        assert!(!first.is_gain());
    }

    #[test]
    fn test_balance_is_last_record_of_year() {
        let config = config();
        let result = AmortizationEngine::new(config.clone()).amortize().unwrap();
        let table = rows(&config);

        let last_2025 = result.records.iter().filter(|r| r.year == 2025).last().unwrap();
        assert_eq!(table[0].balance, Some(last_2025.balance));
        assert!((table[0].actual_net_proceed - (table[0].net_proceeds - last_2025.balance)).abs() < 1e-9);
    }

    #[test]
    fn test_years_beyond_schedule_have_no_balance() {
        let config = LoanConfig {
            additional_payment: 3_000.0,
            ..config()
        };
        let table = rows(&config);

        let last = table.last().unwrap();
        assert_eq!(last.balance, None);
        assert_eq!(last.actual_net_proceed, last.net_proceeds);
    }

    #[test]
    fn test_gain_uses_original_price() {
        let points = vec![PropertyValuePoint {
            year_index: 5,
            effective_growth_pct: 3.0,
            property_value: 700_000.0,
            net_proceeds: 644_000.0,
        }];
        let table = NetProceedsCalculator::new(575_000.0, 2025).calculate(&points, &[]);

        assert_eq!(table[0].year, 2030);
        assert_eq!(table[0].net_gain_or_loss, 69_000.0);
        assert!(table[0].is_gain());
        assert_eq!(table[0].balance, None);
    }
}
