//! Mortgage Analytics - amortization and property projection engine
//!
//! This library provides:
//! - Amortization schedules with a two-year subsidized customer rate
//! - One-time and recurring extra principal payments
//! - Property tax, HOA and insurance carrying costs
//! - Property value projection with age-based growth decay
//! - Yearly rollups, rent-vs-buy comparison and net sale proceeds

pub mod error;
pub mod loan;
pub mod assumptions;
pub mod projection;
pub mod analytics;
pub mod scenario;
pub mod output;

// Re-export commonly used types
pub use error::{MortgageError, Result};
pub use loan::{LoanConfig, OneTimePayment, RateSchedule};
pub use assumptions::{Assumptions, PropertyGrowth, RentAssumptions};
pub use projection::{AmortizationEngine, AmortizationResult, PaymentRecord, PropertyProjector, PropertyValuePoint};
pub use analytics::{YearlyAggregator, YearlySummary, RentComparator, NetProceedsCalculator, NetProceedRow};
pub use scenario::{ScenarioRunner, AnalysisReport};
