//! Running state of a loan during amortization

use chrono::{Days, NaiveDate};

use crate::error::{MortgageError, Result};
use crate::loan::{LoanConfig, RateSchedule};

/// State of the loan at the start of a period
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Current period (1-indexed, 0 before the first period)
    pub period: u32,

    /// Ordinal loan year (1-indexed)
    pub loan_year: u32,

    /// Date of the current period
    pub date: NaiveDate,

    /// Outstanding balance before this period's principal
    pub balance: f64,

    /// Whether the one-time payment has been applied
    pub one_time_applied: bool,
}

impl AmortizationState {
    /// Initialize state at loan origination
    pub fn from_config(config: &LoanConfig) -> Self {
        Self {
            period: 0,
            loan_year: 1,
            date: config.start_date,
            balance: config.loan_amount(),
            one_time_applied: false,
        }
    }

    /// Move to the next period. The date is advanced separately, after the row is recorded.
    pub fn advance_period(&mut self, rates: &RateSchedule) {
        self.period += 1;
        self.loan_year = rates.ordinal_year(self.period);
    }

    /// Step the period date forward by a fixed number of days
    pub fn advance_date(&mut self, days: u64) -> Result<()> {
        self.date = self.date.checked_add_days(Days::new(days)).ok_or_else(|| {
            MortgageError::invalid("tenure_years", "schedule runs past the supported date range")
        })?;
        Ok(())
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let config = LoanConfig::with_defaults(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let state = AmortizationState::from_config(&config);
        assert_eq!(state.period, 0);
        assert_eq!(state.date, config.start_date);
        assert!((state.balance - 460_000.0).abs() < 1e-9);
        assert!(!state.is_paid_off());
    }

    #[test]
    fn test_advance() {
        let config = LoanConfig::with_defaults(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let rates = RateSchedule::from_config(&config);
        let mut state = AmortizationState::from_config(&config);

        for _ in 0..13 {
            state.advance_period(&rates);
        }
        assert_eq!(state.period, 13);
        assert_eq!(state.loan_year, 2);

        state.advance_date(30).unwrap();
        assert_eq!(state.date, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }
}
