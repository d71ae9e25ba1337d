//! Core amortization engine for period-by-period loan schedules

use log::{debug, info};

use crate::error::{MortgageError, Result};
use crate::loan::{LoanConfig, RateSchedule};
use super::state::AmortizationState;
use super::cashflows::{AmortizationResult, PaymentRecord};

/// Level payment of an ordinary annuity: `rate * PV / (1 - (1 + rate)^-n)`
pub fn annuity_payment(periodic_rate: f64, present_value: f64, periods: u32) -> Result<f64> {
    if !periodic_rate.is_finite() || periodic_rate <= 0.0 {
        return Err(MortgageError::invalid(
            "true_rate",
            format!("must be greater than zero for a level payment (periodic rate {})", periodic_rate),
        ));
    }
    if periods == 0 {
        return Err(MortgageError::invalid("total_periods", "must be at least 1"));
    }

    let payment = periodic_rate * present_value / (1.0 - (1.0 + periodic_rate).powf(-(periods as f64)));
    if !payment.is_finite() || payment <= 0.0 {
        return Err(MortgageError::invalid(
            "true_rate",
            format!("produces a non-finite level payment ({})", payment),
        ));
    }
    Ok(payment)
}

/// Main amortization engine
pub struct AmortizationEngine {
    config: LoanConfig,
    rates: RateSchedule,
}

impl AmortizationEngine {
    pub fn new(config: LoanConfig) -> Self {
        let rates = RateSchedule::from_config(&config);
        Self { config, rates }
    }

    /// Level payment from the true rate over the nominal term
    pub fn level_payment(&self) -> Result<f64> {
        annuity_payment(
            self.rates.true_periodic_rate(),
            self.config.loan_amount(),
            self.config.total_periods(),
        )
    }

    /// Build the full schedule. Validates the config first; an invalid config yields no rows.
    pub fn amortize(&self) -> Result<AmortizationResult> {
        self.config.validate()?;
        let level_payment = self.level_payment()?;

        let total_periods = self.config.total_periods();
        let step_days = self.config.period_length_days();

        info!(
            "Amortizing {:.2} over {} periods (level payment {:.2})",
            self.config.loan_amount(),
            total_periods,
            level_payment
        );

        let mut result = AmortizationResult::new(
            self.config.loan_amount(),
            level_payment,
            self.config.payments_per_year,
        );
        let mut state = AmortizationState::from_config(&self.config);

        for _period in 1..=total_periods {
            state.advance_period(&self.rates);

            let record = self.calculate_period(&mut state, level_payment, total_periods);
            result.add_record(record);

            if state.is_paid_off() {
                if state.period < total_periods {
                    info!("Loan paid off early at period {} ({})", state.period, state.date);
                }
                break;
            }

            state.advance_date(step_days)?;
        }

        Ok(result)
    }

    /// Split one period's payment and accrue carrying costs
    fn calculate_period(
        &self,
        state: &mut AmortizationState,
        level_payment: f64,
        total_periods: u32,
    ) -> PaymentRecord {
        let mut row = PaymentRecord::new(state.period, state.date, state.loan_year);
        let balance = state.balance;

        row.true_interest = balance * self.rates.true_periodic_rate();
        row.customer_interest = balance * self.rates.customer_rate_for_period(state.period);
        // Sign preserved: negative when a subsidized rate exceeds the true rate
        row.subsidy = row.true_interest - row.customer_interest;

        let mut principal = level_payment - row.true_interest + self.config.additional_payment;
        principal += self.one_time_payment_due(state);

        // Final-period rule: never overpay, and sweep any rounding residual at the end of term
        if principal > balance || state.period == total_periods {
            principal = balance;
        }
        row.principal = principal;
        state.balance = balance - principal;
        row.balance = state.balance;

        row.hoa = self.config.monthly_hoa;
        row.insurance = self.config.monthly_insurance;
        row.property_tax = self.config.period_property_tax();
        row.principal_and_interest = row.principal + row.customer_interest;
        row.total_payment = row.customer_interest
            + row.principal
            + row.hoa
            + row.insurance
            + row.property_tax;

        row
    }

    /// One-time payment amount due this period (apply-once)
    fn one_time_payment_due(&self, state: &mut AmortizationState) -> f64 {
        match &self.config.one_time_payment {
            Some(payment)
                if payment.amount > 0.0 && !state.one_time_applied && state.date >= payment.date =>
            {
                state.one_time_applied = true;
                debug!(
                    "Applying one-time payment of {:.2} at period {} ({})",
                    payment.amount, state.period, state.date
                );
                payment.amount
            }
            _ => 0.0,
        }
    }
}
