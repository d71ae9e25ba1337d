//! Loan configuration, rate schedule and loading

mod data;
mod rates;
pub mod loader;

pub use data::{LoanConfig, OneTimePayment, MAX_PAYMENTS_PER_YEAR};
pub use rates::RateSchedule;
pub use loader::{load_loan_config, load_loan_config_from_reader, load_scenarios, load_scenarios_from_reader, LoanScenario};
