//! Loan configuration matching the mortgage input form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, Result};

/// Upper bound on payments per year (daily). Beyond this the period step is zero days.
pub const MAX_PAYMENTS_PER_YEAR: u32 = 365;

fn default_property_value() -> f64 { 575_000.0 }
fn default_downpayment_fraction() -> f64 { 0.20 }
fn default_tenure_years() -> u32 { 30 }
fn default_payments_per_year() -> u32 { 12 }
fn default_true_rate() -> f64 { 0.0499 }
fn default_year1_rate() -> f64 { 0.0299 }
fn default_year2_rate() -> f64 { 0.0399 }
fn default_property_tax_rate() -> f64 { 0.0285 }
fn default_monthly_hoa() -> f64 { 66.0 }
fn default_monthly_insurance() -> f64 { 150.0 }

/// A single extra principal payment applied once, on the first period dated on or after `date`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneTimePayment {
    pub amount: f64,
    pub date: NaiveDate,
}

/// Immutable loan input
///
/// All rates and fractions are decimals (0.0499 = 4.99%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanConfig {
    /// Purchase price of the property
    #[serde(default = "default_property_value")]
    pub property_value: f64,

    /// Down payment as a fraction of the property value
    #[serde(default = "default_downpayment_fraction")]
    pub downpayment_fraction: f64,

    /// Date of the first payment period
    pub start_date: NaiveDate,

    #[serde(default = "default_tenure_years")]
    pub tenure_years: u32,

    #[serde(default = "default_payments_per_year")]
    pub payments_per_year: u32,

    /// Contractual annual rate, drives the level payment
    #[serde(default = "default_true_rate")]
    pub true_rate: f64,

    /// Customer annual rate in year 1
    #[serde(default = "default_year1_rate")]
    pub year1_rate: f64,

    /// Customer annual rate in year 2
    #[serde(default = "default_year2_rate")]
    pub year2_rate: f64,

    /// Annual property tax rate
    #[serde(default = "default_property_tax_rate")]
    pub property_tax_rate: f64,

    /// HOA fee charged each period
    #[serde(default = "default_monthly_hoa")]
    pub monthly_hoa: f64,

    /// Insurance charged each period
    #[serde(default = "default_monthly_insurance")]
    pub monthly_insurance: f64,

    /// Extra principal added to every period
    #[serde(default)]
    pub additional_payment: f64,

    #[serde(default)]
    pub one_time_payment: Option<OneTimePayment>,

    /// Lump-sum rebate deducted from the taxable property value
    #[serde(default)]
    pub tax_rebate: Option<f64>,
}

impl LoanConfig {
    /// Create a config with the standard form defaults starting on `start_date`
    pub fn with_defaults(start_date: NaiveDate) -> Self {
        Self {
            property_value: default_property_value(),
            downpayment_fraction: default_downpayment_fraction(),
            start_date,
            tenure_years: default_tenure_years(),
            payments_per_year: default_payments_per_year(),
            true_rate: default_true_rate(),
            year1_rate: default_year1_rate(),
            year2_rate: default_year2_rate(),
            property_tax_rate: default_property_tax_rate(),
            monthly_hoa: default_monthly_hoa(),
            monthly_insurance: default_monthly_insurance(),
            additional_payment: 0.0,
            one_time_payment: None,
            tax_rebate: None,
        }
    }

    /// Amount financed after the down payment
    pub fn loan_amount(&self) -> f64 {
        self.property_value * (1.0 - self.downpayment_fraction)
    }

    /// Nominal number of periods over the full tenure
    pub fn total_periods(&self) -> u32 {
        self.tenure_years.saturating_mul(self.payments_per_year)
    }

    /// Days between consecutive payment dates (whole days, truncated)
    pub fn period_length_days(&self) -> u64 {
        (365 / self.payments_per_year.max(1)) as u64
    }

    /// Property value used as the property tax base
    pub fn taxable_property_value(&self) -> f64 {
        self.property_value - self.tax_rebate.unwrap_or(0.0)
    }

    /// Property tax charged each period
    pub fn period_property_tax(&self) -> f64 {
        self.property_tax_rate * self.taxable_property_value() / self.payments_per_year as f64
    }

    /// Check every input constraint. The engine refuses to run on an invalid config.
    pub fn validate(&self) -> Result<()> {
        if self.payments_per_year == 0 {
            return Err(MortgageError::invalid("payments_per_year", "must be at least 1"));
        }
        if self.payments_per_year > MAX_PAYMENTS_PER_YEAR {
            return Err(MortgageError::invalid(
                "payments_per_year",
                format!("must not exceed {}", MAX_PAYMENTS_PER_YEAR),
            ));
        }
        if self.tenure_years == 0 {
            return Err(MortgageError::invalid("tenure_years", "must be at least 1"));
        }

        non_negative("property_value", self.property_value)?;
        non_negative("year1_rate", self.year1_rate)?;
        non_negative("year2_rate", self.year2_rate)?;
        non_negative("property_tax_rate", self.property_tax_rate)?;
        non_negative("monthly_hoa", self.monthly_hoa)?;
        non_negative("monthly_insurance", self.monthly_insurance)?;
        non_negative("additional_payment", self.additional_payment)?;

        if !self.true_rate.is_finite() || self.true_rate <= 0.0 {
            return Err(MortgageError::invalid(
                "true_rate",
                format!("must be greater than zero (got {})", self.true_rate),
            ));
        }

        if !(0.0..=1.0).contains(&self.downpayment_fraction) {
            return Err(MortgageError::invalid(
                "downpayment_fraction",
                format!("must be between 0 and 1 (got {})", self.downpayment_fraction),
            ));
        }
        if self.loan_amount() <= 0.0 {
            return Err(MortgageError::invalid("loan_amount", "must be greater than zero"));
        }

        if let Some(payment) = &self.one_time_payment {
            non_negative("one_time_payment.amount", payment.amount)?;
        }
        if let Some(rebate) = self.tax_rebate {
            non_negative("tax_rebate", rebate)?;
            if rebate > self.property_value {
                return Err(MortgageError::invalid(
                    "tax_rebate",
                    "must not exceed the property value",
                ));
            }
        }

        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MortgageError::invalid(
            field,
            format!("must be a non-negative number (got {})", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_defaults_loan_amount() {
        let config = LoanConfig::with_defaults(start());
        assert!((config.loan_amount() - 460_000.0).abs() < 1e-9);
        assert_eq!(config.total_periods(), 360);
        assert_eq!(config.period_length_days(), 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rebate_reduces_tax_base() {
        let config = LoanConfig {
            tax_rebate: Some(75_000.0),
            ..LoanConfig::with_defaults(start())
        };
        assert!((config.taxable_property_value() - 500_000.0).abs() < 1e-9);
        // 2.85% of 500k over 12 periods
        assert!((config.period_property_tax() - 1187.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_true_rate_rejected() {
        let config = LoanConfig {
            true_rate: 0.0,
            ..LoanConfig::with_defaults(start())
        };
        match config.validate() {
            Err(MortgageError::InvalidConfiguration { field, .. }) => assert_eq!(field, "true_rate"),
            other => panic!("expected invalid true_rate, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_tenure_and_frequency_rejected() {
        let no_tenure = LoanConfig {
            tenure_years: 0,
            ..LoanConfig::with_defaults(start())
        };
        assert!(no_tenure.validate().is_err());

        let no_payments = LoanConfig {
            payments_per_year: 0,
            ..LoanConfig::with_defaults(start())
        };
        assert!(no_payments.validate().is_err());

        let too_many = LoanConfig {
            payments_per_year: 400,
            ..LoanConfig::with_defaults(start())
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_negative_money_rejected() {
        let config = LoanConfig {
            monthly_hoa: -1.0,
            ..LoanConfig::with_defaults(start())
        };
        match config.validate() {
            Err(MortgageError::InvalidConfiguration { field, .. }) => assert_eq!(field, "monthly_hoa"),
            other => panic!("expected invalid monthly_hoa, got {:?}", other),
        }
    }

    #[test]
    fn test_rebate_above_property_value_rejected() {
        let config = LoanConfig {
            tax_rebate: Some(600_000.0),
            ..LoanConfig::with_defaults(start())
        };
        match config.validate() {
            Err(MortgageError::InvalidConfiguration { field, .. }) => assert_eq!(field, "tax_rebate"),
            other => panic!("expected invalid tax_rebate, got {:?}", other),
        }

        let whole_value = LoanConfig {
            tax_rebate: Some(575_000.0),
            ..LoanConfig::with_defaults(start())
        };
        assert!(whole_value.validate().is_ok());
        assert_eq!(whole_value.period_property_tax(), 0.0);
    }

    #[test]
    fn test_full_downpayment_rejected() {
        let config = LoanConfig {
            downpayment_fraction: 1.0,
            ..LoanConfig::with_defaults(start())
        };
        assert!(config.validate().is_err());
    }
}
