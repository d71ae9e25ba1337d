//! Amortization output structures

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::irr::periodic_irr;

/// One row of the amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    // Timing
    #[serde(rename = "Period")]
    pub period: u32,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "LoanYear")]
    pub loan_year: u32,

    // Loan
    #[serde(rename = "Balance")]
    pub balance: f64,
    #[serde(rename = "Principal")]
    pub principal: f64,
    #[serde(rename = "CustomerInterest")]
    pub customer_interest: f64,
    #[serde(rename = "TrueInterest")]
    pub true_interest: f64,
    #[serde(rename = "Subsidy")]
    pub subsidy: f64,

    // Cash out of pocket
    #[serde(rename = "TotalPayment")]
    pub total_payment: f64,
    #[serde(rename = "HOA")]
    pub hoa: f64,
    #[serde(rename = "PropertyTax")]
    pub property_tax: f64,
    #[serde(rename = "Insurance")]
    pub insurance: f64,
    #[serde(rename = "Principal+Interest")]
    pub principal_and_interest: f64,
}

impl PaymentRecord {
    /// Create an empty record for a period
    pub fn new(period: u32, date: NaiveDate, loan_year: u32) -> Self {
        Self {
            period,
            date,
            year: date.year(),
            loan_year,
            balance: 0.0,
            principal: 0.0,
            customer_interest: 0.0,
            true_interest: 0.0,
            subsidy: 0.0,
            total_payment: 0.0,
            hoa: 0.0,
            property_tax: 0.0,
            insurance: 0.0,
            principal_and_interest: 0.0,
        }
    }

    /// Interest, HOA, tax and insurance: everything that does not build equity
    pub fn non_equity_cost(&self) -> f64 {
        self.customer_interest + self.hoa + self.property_tax + self.insurance
    }
}

/// Complete amortization result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Amount financed
    pub loan_amount: f64,

    /// Level payment from the true rate
    pub level_payment: f64,

    pub payments_per_year: u32,

    /// Schedule rows in period order
    pub records: Vec<PaymentRecord>,
}

impl AmortizationResult {
    pub fn new(loan_amount: f64, level_payment: f64, payments_per_year: u32) -> Self {
        Self {
            loan_amount,
            level_payment,
            payments_per_year,
            records: Vec::new(),
        }
    }

    /// Add a schedule row
    pub fn add_record(&mut self, record: PaymentRecord) {
        self.records.push(record);
    }

    /// Balance after the last recorded period
    pub fn final_balance(&self) -> f64 {
        self.records.last().map(|r| r.balance).unwrap_or(self.loan_amount)
    }

    /// Date of the last period, if the loan was fully repaid
    pub fn payoff_date(&self) -> Option<NaiveDate> {
        self.records
            .last()
            .filter(|r| r.balance <= 0.0)
            .map(|r| r.date)
    }

    /// Customer-side cash flows: loan proceeds followed by principal + interest paid
    pub fn customer_cashflows(&self) -> Vec<f64> {
        std::iter::once(self.loan_amount)
            .chain(self.records.iter().map(|r| -r.principal_and_interest))
            .collect()
    }

    /// Nominal annual rate the customer effectively pays, from the IRR of their cash flows
    pub fn effective_customer_rate(&self) -> Option<f64> {
        periodic_irr(&self.customer_cashflows()).map(|r| r * self.payments_per_year as f64)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        let total_principal: f64 = self.records.iter().map(|r| r.principal).sum();
        let total_customer_interest: f64 = self.records.iter().map(|r| r.customer_interest).sum();
        let total_true_interest: f64 = self.records.iter().map(|r| r.true_interest).sum();
        let total_subsidy: f64 = self.records.iter().map(|r| r.subsidy).sum();
        let total_hoa: f64 = self.records.iter().map(|r| r.hoa).sum();
        let total_property_tax: f64 = self.records.iter().map(|r| r.property_tax).sum();
        let total_insurance: f64 = self.records.iter().map(|r| r.insurance).sum();
        let total_paid: f64 = self.records.iter().map(|r| r.total_payment).sum();

        ScheduleSummary {
            total_periods: self.records.len() as u32,
            loan_amount: self.loan_amount,
            level_payment: self.level_payment,
            payoff_date: self.payoff_date(),
            total_principal,
            total_customer_interest,
            total_true_interest,
            total_subsidy,
            total_hoa,
            total_property_tax,
            total_insurance,
            total_paid,
            effective_customer_rate: self.effective_customer_rate(),
        }
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_periods: u32,
    pub loan_amount: f64,
    pub level_payment: f64,
    pub payoff_date: Option<NaiveDate>,
    pub total_principal: f64,
    pub total_customer_interest: f64,
    pub total_true_interest: f64,
    pub total_subsidy: f64,
    pub total_hoa: f64,
    pub total_property_tax: f64,
    pub total_insurance: f64,
    pub total_paid: f64,
    pub effective_customer_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(period: u32, balance: f64, principal: f64, interest: f64) -> PaymentRecord {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Duration::days(30 * (period as i64 - 1));
        PaymentRecord {
            balance,
            principal,
            customer_interest: interest,
            true_interest: interest,
            principal_and_interest: principal + interest,
            total_payment: principal + interest,
            ..PaymentRecord::new(period, date, 1)
        }
    }

    #[test]
    fn test_record_year_from_date() {
        let row = PaymentRecord::new(1, NaiveDate::from_ymd_opt(2031, 6, 30).unwrap(), 7);
        assert_eq!(row.year, 2031);
        assert_eq!(row.loan_year, 7);
    }

    #[test]
    fn test_payoff_date_only_when_repaid() {
        let mut result = AmortizationResult::new(1000.0, 510.0, 12);
        result.add_record(record(1, 500.0, 500.0, 10.0));
        assert!(result.payoff_date().is_none());
        assert_eq!(result.final_balance(), 500.0);

        result.add_record(record(2, 0.0, 500.0, 5.0));
        assert_eq!(result.payoff_date(), Some(result.records[1].date));
    }

    #[test]
    fn test_summary_totals() {
        let mut result = AmortizationResult::new(1000.0, 510.0, 12);
        result.add_record(record(1, 500.0, 500.0, 10.0));
        result.add_record(record(2, 0.0, 500.0, 5.0));

        let summary = result.summary();
        assert_eq!(summary.total_periods, 2);
        assert!((summary.total_principal - 1000.0).abs() < 1e-12);
        assert!((summary.total_customer_interest - 15.0).abs() < 1e-12);
        assert!((summary.total_paid - 1015.0).abs() < 1e-12);
        assert!(summary.effective_customer_rate.unwrap() > 0.0);
    }

    #[test]
    fn test_customer_cashflows() {
        let mut result = AmortizationResult::new(1000.0, 510.0, 12);
        result.add_record(record(1, 500.0, 500.0, 10.0));
        assert_eq!(result.customer_cashflows(), vec![1000.0, -510.0]);
    }
}
