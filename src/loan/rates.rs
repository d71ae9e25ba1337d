//! Two-tier subsidized customer rate schedule

use super::LoanConfig;

/// Resolves the customer rate charged in each period
///
/// Years 1 and 2 use the subsidized rates, year 3 onward the true rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSchedule {
    year1_rate: f64,
    year2_rate: f64,
    true_rate: f64,
    payments_per_year: u32,
}

impl RateSchedule {
    pub fn from_config(config: &LoanConfig) -> Self {
        Self {
            year1_rate: config.year1_rate,
            year2_rate: config.year2_rate,
            true_rate: config.true_rate,
            payments_per_year: config.payments_per_year.max(1),
        }
    }

    /// Ordinal loan year (1-indexed) of a 1-indexed period
    pub fn ordinal_year(&self, period: u32) -> u32 {
        period.saturating_sub(1) / self.payments_per_year + 1
    }

    /// Annual customer rate for a loan year
    pub fn annual_rate(&self, loan_year: u32) -> f64 {
        match loan_year {
            0 | 1 => self.year1_rate,
            2 => self.year2_rate,
            _ => self.true_rate,
        }
    }

    /// Per-period customer rate for a loan year
    pub fn customer_rate(&self, loan_year: u32) -> f64 {
        self.annual_rate(loan_year) / self.payments_per_year as f64
    }

    /// Per-period customer rate for a 1-indexed period
    pub fn customer_rate_for_period(&self, period: u32) -> f64 {
        self.customer_rate(self.ordinal_year(period))
    }

    /// Per-period contractual rate
    pub fn true_periodic_rate(&self) -> f64 {
        self.true_rate / self.payments_per_year as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn schedule() -> RateSchedule {
        let config = LoanConfig::with_defaults(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        RateSchedule::from_config(&config)
    }

    #[test]
    fn test_ordinal_year() {
        let rates = schedule();
        assert_eq!(rates.ordinal_year(1), 1);
        assert_eq!(rates.ordinal_year(12), 1);
        assert_eq!(rates.ordinal_year(13), 2);
        assert_eq!(rates.ordinal_year(24), 2);
        assert_eq!(rates.ordinal_year(25), 3);
        assert_eq!(rates.ordinal_year(360), 30);
    }

    #[test]
    fn test_tiered_rates() {
        let rates = schedule();
        assert!((rates.customer_rate(1) - 0.0299 / 12.0).abs() < 1e-15);
        assert!((rates.customer_rate(2) - 0.0399 / 12.0).abs() < 1e-15);
        assert!((rates.customer_rate(3) - 0.0499 / 12.0).abs() < 1e-15);
        assert!((rates.customer_rate(30) - rates.true_periodic_rate()).abs() < 1e-15);
    }

    #[test]
    fn test_rate_for_period_boundaries() {
        let rates = schedule();
        assert_eq!(rates.customer_rate_for_period(12), rates.customer_rate(1));
        assert_eq!(rates.customer_rate_for_period(13), rates.customer_rate(2));
        assert_eq!(rates.customer_rate_for_period(25), rates.true_periodic_rate());
    }

    #[test]
    fn test_quarterly_schedule() {
        let config = LoanConfig {
            payments_per_year: 4,
            ..LoanConfig::with_defaults(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        };
        let rates = RateSchedule::from_config(&config);
        assert_eq!(rates.ordinal_year(5), 2);
        assert!((rates.customer_rate_for_period(9) - 0.0499 / 4.0).abs() < 1e-15);
    }
}
