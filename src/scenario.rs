//! Scenario runner for the full analysis pipeline
//!
//! Holds the market assumptions once, then runs any number of loans through
//! amortization, property projection, yearly rollup, rent comparison and net
//! proceeds. Every run gets its own engine and output tables.

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::analytics::{
    NetProceedRow, NetProceedsCalculator, RentComparator, RentVsBuySummary, YearlyAggregator,
    YearlySummary,
};
use crate::error::Result;
use crate::loan::{LoanConfig, LoanScenario};
use crate::projection::{
    AmortizationEngine, AmortizationResult, PropertyProjector, PropertyValuePoint, ScheduleSummary,
};
use crate::Assumptions;

/// Every output table for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub config: LoanConfig,
    pub schedule: AmortizationResult,
    pub summary: ScheduleSummary,
    pub property: Vec<PropertyValuePoint>,
    /// Yearly rollup with annual rent filled in
    pub yearly: Vec<YearlySummary>,
    pub net_proceeds: Vec<NetProceedRow>,
    pub rent_vs_buy: RentVsBuySummary,
}

/// Result of one scenario in a batch
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub report: Result<AnalysisReport>,
}

/// One line of the batch summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummaryRow {
    #[serde(rename = "Scenario")]
    pub scenario: String,
    #[serde(rename = "LoanAmount")]
    pub loan_amount: Option<f64>,
    #[serde(rename = "LevelPayment")]
    pub level_payment: Option<f64>,
    #[serde(rename = "Periods")]
    pub periods: Option<u32>,
    #[serde(rename = "PayoffDate")]
    pub payoff_date: Option<NaiveDate>,
    #[serde(rename = "TotalCustomerInterest")]
    pub total_customer_interest: Option<f64>,
    #[serde(rename = "TotalSubsidy")]
    pub total_subsidy: Option<f64>,
    #[serde(rename = "TotalPaid")]
    pub total_paid: Option<f64>,
    #[serde(rename = "EffectiveCustomerRate")]
    pub effective_customer_rate: Option<f64>,
    #[serde(rename = "FinalPropertyValue")]
    pub final_property_value: Option<f64>,
    #[serde(rename = "FinalNetGainOrLoss")]
    pub final_net_gain_or_loss: Option<f64>,
    #[serde(rename = "TotalRent")]
    pub total_rent: Option<f64>,
    #[serde(rename = "TotalNonEquityCost")]
    pub total_non_equity_cost: Option<f64>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl ScenarioSummaryRow {
    pub fn from_outcome(outcome: &ScenarioOutcome) -> Self {
        match &outcome.report {
            Ok(report) => {
                let last_sale = report.net_proceeds.last();
                Self {
                    scenario: outcome.name.clone(),
                    loan_amount: Some(report.summary.loan_amount),
                    level_payment: Some(report.summary.level_payment),
                    periods: Some(report.summary.total_periods),
                    payoff_date: report.summary.payoff_date,
                    total_customer_interest: Some(report.summary.total_customer_interest),
                    total_subsidy: Some(report.summary.total_subsidy),
                    total_paid: Some(report.summary.total_paid),
                    effective_customer_rate: report.summary.effective_customer_rate,
                    final_property_value: last_sale.map(|r| r.property_value),
                    final_net_gain_or_loss: last_sale.map(|r| r.net_gain_or_loss),
                    total_rent: Some(report.rent_vs_buy.total_rent),
                    total_non_equity_cost: Some(report.rent_vs_buy.total_non_equity_cost),
                    error: None,
                }
            }
            Err(err) => Self {
                scenario: outcome.name.clone(),
                loan_amount: None,
                level_payment: None,
                periods: None,
                payoff_date: None,
                total_customer_interest: None,
                total_subsidy: None,
                total_paid: None,
                effective_customer_rate: None,
                final_property_value: None,
                final_net_gain_or_loss: None,
                total_rent: None,
                total_non_equity_cost: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Pre-loaded runner for single and batch analyses
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with default assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }

    /// Run the whole pipeline for one loan. Nothing is returned on invalid input.
    pub fn run(&self, config: &LoanConfig) -> Result<AnalysisReport> {
        self.base_assumptions.validate()?;

        let schedule = AmortizationEngine::new(config.clone()).amortize()?;
        let summary = schedule.summary();

        let property = PropertyProjector::from_config(config, self.base_assumptions.property).project();

        let aggregated = YearlyAggregator::aggregate(&schedule.records);
        let yearly = RentComparator::new(self.base_assumptions.rent).compare(&aggregated);
        let rent_vs_buy = RentComparator::summarize(&yearly);

        let net_proceeds = NetProceedsCalculator::from_config(config).calculate(&property, &schedule.records);

        info!(
            "Analysis complete: {} periods, {} years, payoff {:?}",
            summary.total_periods,
            yearly.len(),
            summary.payoff_date
        );

        Ok(AnalysisReport {
            config: config.clone(),
            schedule,
            summary,
            property,
            yearly,
            net_proceeds,
            rent_vs_buy,
        })
    }

    /// Run each scenario in turn. A failing scenario does not stop the others.
    pub fn run_batch(&self, scenarios: &[LoanScenario]) -> Vec<ScenarioOutcome> {
        scenarios
            .iter()
            .map(|scenario| {
                let report = self.run(&scenario.config);
                if let Err(err) = &report {
                    warn!("Scenario {} failed: {}", scenario.name, err);
                }
                ScenarioOutcome {
                    name: scenario.name.clone(),
                    report,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MortgageError;

    fn config() -> LoanConfig {
        LoanConfig::with_defaults(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    #[test]
    fn test_full_pipeline() {
        let runner = ScenarioRunner::new();
        let report = runner.run(&config()).unwrap();

        assert_eq!(report.schedule.records.len(), 360);
        assert_eq!(report.property.len(), 31);
        assert_eq!(report.net_proceeds.len(), 31);
        assert_eq!(report.yearly.first().unwrap().year, 2025);
        assert!((report.yearly[0].annual_rent - 18_000.0).abs() < 1e-9);
        assert_eq!(report.rent_vs_buy.years, report.yearly.len());
        assert!((report.summary.total_principal - 460_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_effective_rate_between_subsidized_and_true() {
        let report = ScenarioRunner::new().run(&config()).unwrap();
        let rate = report.summary.effective_customer_rate.unwrap();
        assert!(rate > 0.0299 && rate < 0.0499, "effective rate {}", rate);
    }

    #[test]
    fn test_effective_rate_without_subsidy_is_true_rate() {
        let config = LoanConfig {
            year1_rate: 0.0499,
            year2_rate: 0.0499,
            ..config()
        };
        let report = ScenarioRunner::new().run(&config).unwrap();
        let rate = report.summary.effective_customer_rate.unwrap();
        assert!((rate - 0.0499).abs() < 1e-6, "effective rate {}", rate);
    }

    #[test]
    fn test_invalid_config_yields_no_report() {
        let bad = LoanConfig { true_rate: 0.0, ..config() };
        assert!(matches!(
            ScenarioRunner::new().run(&bad),
            Err(MortgageError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_invalid_assumptions_rejected() {
        let mut runner = ScenarioRunner::new();
        runner.assumptions_mut().property.selling_cost_fraction = 2.0;
        assert!(runner.run(&config()).is_err());
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let runner = ScenarioRunner::new();
        let scenarios = vec![
            LoanScenario { name: "good".to_string(), config: config() },
            LoanScenario {
                name: "bad".to_string(),
                config: LoanConfig { tenure_years: 0, ..config() },
            },
            LoanScenario {
                name: "prepay".to_string(),
                config: LoanConfig { additional_payment: 500.0, ..config() },
            },
        ];

        let outcomes = runner.run_batch(&scenarios);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].report.is_ok());
        assert!(outcomes[1].report.is_err());
        assert!(outcomes[2].report.is_ok());

        let rows: Vec<_> = outcomes.iter().map(ScenarioSummaryRow::from_outcome).collect();
        assert_eq!(rows[1].scenario, "bad");
        assert!(rows[1].error.as_deref().unwrap().contains("tenure_years"));
        assert!(rows[2].periods.unwrap() < rows[0].periods.unwrap());
    }

    #[test]
    fn test_runs_are_independent() {
        let runner = ScenarioRunner::new();
        let first = runner.run(&config()).unwrap();
        let _other = runner.run(&LoanConfig { additional_payment: 900.0, ..config() }).unwrap();
        let again = runner.run(&config()).unwrap();
        assert_eq!(first, again);
    }
}
