//! Amortization engine and property projection

mod state;
mod engine;
mod cashflows;
mod irr;
mod property;

pub use state::AmortizationState;
pub use engine::{AmortizationEngine, annuity_payment};
pub use cashflows::{PaymentRecord, AmortizationResult, ScheduleSummary};
pub use irr::{periodic_irr, annualize};
pub use property::{PropertyProjector, PropertyValuePoint};
