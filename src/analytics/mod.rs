//! Downstream analytics over the amortization schedule

mod yearly;
mod rent;
mod proceeds;

pub use yearly::{YearlyAggregator, YearlySummary};
pub use rent::{RentComparator, RentVsBuySummary};
pub use proceeds::{NetProceedsCalculator, NetProceedRow};
