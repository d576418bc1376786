//! Calculation logic for the travel-nurse tax engine.
//!
//! This module contains all the calculation functions for estimating taxes
//! and evaluating contracts, including progressive bracket tax, marginal rate
//! lookup, self-employment tax with the social security wage-base cap, state
//! tax resolution with no-tax-state short-circuits and multi-state
//! apportionment, the composed total-tax breakdown, quarterly estimated
//! payments and payment scheduling, stipend and blended-rate job offer
//! comparison, GSA per-diem compliance, tax-home compliance scoring, and the
//! standard mileage deduction.

pub(crate) mod brackets;
mod common;
pub mod compliance;
mod mileage;
mod quarterly;
mod self_employment;
mod state_tax;
mod stipend;
mod total_tax;

pub use brackets::{calculate_bracket_tax, marginal_rate, validate_brackets};
pub use common::round_half_up;
pub use compliance::{
    ComplianceAssessment, ReturnRuleStatus, days_until_return_due, recalculate_score,
    record_tax_home_visit, score_compliance,
};
pub use mileage::mileage_deduction;
pub use quarterly::{PaymentSummary, generate_payments, payment_summary, record_payment};
pub use self_employment::{SeTaxResult, calculate_se_tax};
pub use state_tax::{
    DeductionPolicy, MultiStateTaxResult, StateAllocation, StateTaxResult,
    calculate_multi_state_tax, calculate_state_tax,
};
pub use stipend::{
    OfferComparison, PerDiemCompliance, RankedOffer, best_offer, check_per_diem_compliance,
    estimate_federal_tax_bracket, rank_offers, weekly_take_home, weekly_total_with_overtime,
};
pub use total_tax::{calculate_quarterly_estimate, calculate_total_tax};
