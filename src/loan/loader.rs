//! Load loan configurations from JSON files and scenario CSVs

use super::{LoanConfig, OneTimePayment};
use crate::error::{MortgageError, Result};
use chrono::NaiveDate;
use csv::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A named loan configuration from a scenario file
#[derive(Debug, Clone, PartialEq)]
pub struct LoanScenario {
    pub name: String,
    pub config: LoanConfig,
}

/// Raw CSV row for a loan scenario
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Scenario")]
    scenario: String,
    #[serde(rename = "PropertyValue")]
    property_value: f64,
    #[serde(rename = "DownPayment")]
    downpayment_fraction: f64,
    #[serde(rename = "StartDate")]
    start_date: NaiveDate,
    #[serde(rename = "TenureYears")]
    tenure_years: u32,
    #[serde(rename = "PaymentsPerYear")]
    payments_per_year: u32,
    #[serde(rename = "TrueRate")]
    true_rate: f64,
    #[serde(rename = "Year1Rate")]
    year1_rate: f64,
    #[serde(rename = "Year2Rate")]
    year2_rate: f64,
    #[serde(rename = "PropertyTaxRate")]
    property_tax_rate: f64,
    #[serde(rename = "HOA")]
    monthly_hoa: f64,
    #[serde(rename = "Insurance")]
    monthly_insurance: f64,
    #[serde(rename = "AdditionalPayment", default)]
    additional_payment: Option<f64>,
    #[serde(rename = "OneTimePayment", default)]
    one_time_amount: Option<f64>,
    #[serde(rename = "OneTimePaymentDate", default)]
    one_time_date: Option<NaiveDate>,
    #[serde(rename = "TaxRebate", default)]
    tax_rebate: Option<f64>,
}

impl CsvRow {
    fn into_scenario(self) -> Result<LoanScenario> {
        let one_time_payment = match (self.one_time_amount, self.one_time_date) {
            (Some(amount), Some(date)) if amount > 0.0 => Some(OneTimePayment { amount, date }),
            (Some(amount), None) if amount > 0.0 => {
                return Err(MortgageError::invalid(
                    "OneTimePaymentDate",
                    format!("is required for scenario {}", self.scenario),
                ));
            }
            _ => None,
        };

        Ok(LoanScenario {
            name: self.scenario,
            config: LoanConfig {
                property_value: self.property_value,
                downpayment_fraction: self.downpayment_fraction,
                start_date: self.start_date,
                tenure_years: self.tenure_years,
                payments_per_year: self.payments_per_year,
                true_rate: self.true_rate,
                year1_rate: self.year1_rate,
                year2_rate: self.year2_rate,
                property_tax_rate: self.property_tax_rate,
                monthly_hoa: self.monthly_hoa,
                monthly_insurance: self.monthly_insurance,
                additional_payment: self.additional_payment.unwrap_or(0.0),
                one_time_payment,
                tax_rebate: self.tax_rebate.filter(|r| *r > 0.0),
            },
        })
    }
}

/// Load a single loan configuration from a JSON file
pub fn load_loan_config<P: AsRef<Path>>(path: P) -> Result<LoanConfig> {
    let file = File::open(path)?;
    load_loan_config_from_reader(BufReader::new(file))
}

/// Load a loan configuration from any JSON reader. Omitted fields take the form defaults.
pub fn load_loan_config_from_reader<R: Read>(reader: R) -> Result<LoanConfig> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<LoanScenario>> {
    let file = File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any CSV reader
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<LoanScenario>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    Ok(scenarios)
}
