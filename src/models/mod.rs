//! Data models for the tax calculation engine.
//!
//! Plain serde records: the tax breakdown, job offers, quarterly payment
//! plans, and tax-home compliance state. Persistence mapping is the caller's
//! concern; these types carry no storage framework.

mod breakdown;
mod compliance;
mod job_offer;
mod quarterly;

pub use breakdown::{StateBreakdown, TaxableIncomeBreakdown};
pub use compliance::{
    ChecklistCategory, ChecklistItemStatus, ComplianceChecklistItem, ComplianceLevel,
    TaxHomeCompliance,
};
pub use job_offer::JobOffer;
pub use quarterly::{PaymentStatus, QuarterlyEstimate, QuarterlyInstallment, QuarterlyPayment};
