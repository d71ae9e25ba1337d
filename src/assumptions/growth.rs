//! Property appreciation with age-based growth decay

use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, Result};

/// Floor on the effective annual growth, in percent. Keeps the value from inverting.
pub const MIN_EFFECTIVE_GROWTH_PCT: f64 = -100.0;

fn default_base_growth_pct() -> f64 { 2.5 }
fn default_age_threshold_years() -> u32 { 10 }
fn default_decay_pct_per_year() -> f64 { 0.2 }
fn default_selling_cost_fraction() -> f64 { 0.08 }

/// Property growth assumptions
///
/// Growth figures are in percent points (2.5 = 2.5% a year). Once the property is
/// older than `age_threshold_years`, growth falls by `decay_pct_per_year` for every
/// year past the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyGrowth {
    #[serde(default = "default_base_growth_pct")]
    pub base_growth_pct: f64,

    #[serde(default = "default_age_threshold_years")]
    pub age_threshold_years: u32,

    #[serde(default = "default_decay_pct_per_year")]
    pub decay_pct_per_year: f64,

    /// Selling cost as a fraction of the sale price
    #[serde(default = "default_selling_cost_fraction")]
    pub selling_cost_fraction: f64,
}

impl Default for PropertyGrowth {
    fn default() -> Self {
        Self {
            base_growth_pct: default_base_growth_pct(),
            age_threshold_years: default_age_threshold_years(),
            decay_pct_per_year: default_decay_pct_per_year(),
            selling_cost_fraction: default_selling_cost_fraction(),
        }
    }
}

impl PropertyGrowth {
    /// Effective growth (percent) applied in projection year `year` (1-indexed)
    pub fn effective_growth_pct(&self, year: u32) -> f64 {
        let years_past_threshold = year.saturating_sub(self.age_threshold_years) as f64;
        let growth = self.base_growth_pct - self.decay_pct_per_year * years_past_threshold;
        growth.max(MIN_EFFECTIVE_GROWTH_PCT)
    }

    /// Whether growth for `year` hit the floor
    pub fn is_clamped(&self, year: u32) -> bool {
        let years_past_threshold = year.saturating_sub(self.age_threshold_years) as f64;
        self.base_growth_pct - self.decay_pct_per_year * years_past_threshold < MIN_EFFECTIVE_GROWTH_PCT
    }

    /// Sale proceeds after selling costs
    pub fn net_of_selling_cost(&self, value: f64) -> f64 {
        value * (1.0 - self.selling_cost_fraction)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base_growth_pct.is_finite() {
            return Err(MortgageError::invalid("base_growth_pct", "must be a finite number"));
        }
        if !self.decay_pct_per_year.is_finite() {
            return Err(MortgageError::invalid("decay_pct_per_year", "must be a finite number"));
        }
        if !(0.0..=1.0).contains(&self.selling_cost_fraction) {
            return Err(MortgageError::invalid(
                "selling_cost_fraction",
                format!("must be between 0 and 1 (got {})", self.selling_cost_fraction),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_before_threshold() {
        let growth = PropertyGrowth::default();
        assert_eq!(growth.effective_growth_pct(1), 2.5);
        assert_eq!(growth.effective_growth_pct(10), 2.5);
    }

    #[test]
    fn test_growth_decays_after_threshold() {
        let growth = PropertyGrowth::default();
        // 2.5 - 0.2 * 10
        assert!((growth.effective_growth_pct(20) - 0.5).abs() < 1e-12);
        assert!((growth.effective_growth_pct(30) - (-1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_growth_floor() {
        let growth = PropertyGrowth {
            decay_pct_per_year: 10.0,
            ..PropertyGrowth::default()
        };
        // 2.5 - 10 * 25 = -247.5, floored
        assert_eq!(growth.effective_growth_pct(35), MIN_EFFECTIVE_GROWTH_PCT);
        assert!(growth.is_clamped(35));
        assert!(!growth.is_clamped(11));
    }

    #[test]
    fn test_selling_cost() {
        let growth = PropertyGrowth::default();
        assert!((growth.net_of_selling_cost(500_000.0) - 460_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_selling_cost() {
        let growth = PropertyGrowth {
            selling_cost_fraction: 1.5,
            ..PropertyGrowth::default()
        };
        assert!(growth.validate().is_err());
    }
}
