//! Request types for the travel-nurse tax engine API.
//!
//! This module defines the JSON request structures for the four endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ChecklistItemStatus, JobOffer, QuarterlyPayment};

/// Request body for the `/tax/estimate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxEstimateRequest {
    /// The tax year the estimate covers.
    pub tax_year: i32,
    /// Gross income for the year.
    pub gross_income: Decimal,
    /// Total deductions (defaults to zero).
    #[serde(default)]
    pub deductions: Decimal,
    /// Two-letter state code; omit for no state tax.
    #[serde(default)]
    pub state: Option<String>,
    /// Whether self-employment tax applies.
    #[serde(default)]
    pub self_employed: bool,
}

/// Request body for the `/offers/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferComparisonRequest {
    /// The offers to compare, in submission order.
    pub offers: Vec<JobOffer>,
    /// Federal withholding rate to assume; estimated per offer when omitted.
    #[serde(default)]
    pub federal_tax_rate: Option<Decimal>,
    /// State withholding rate to assume (defaults to zero).
    #[serde(default)]
    pub state_tax_rate: Option<Decimal>,
}

/// A checklist status override by item id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistOverride {
    /// The canonical checklist item id (e.g. "maintain_residence").
    pub id: String,
    /// The status to set.
    pub status: ChecklistItemStatus,
}

/// Request body for the `/compliance/score` endpoint.
///
/// The checklist starts from the configured defaults (all incomplete) with
/// the given overrides applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceScoreRequest {
    /// The tax year being scored.
    pub tax_year: i32,
    /// Cumulative days spent at the tax home this year.
    #[serde(default)]
    pub days_at_tax_home: u32,
    /// Date of the most recent tax-home visit, if any.
    #[serde(default)]
    pub last_tax_home_visit: Option<NaiveDate>,
    /// The date to score as of.
    pub as_of: NaiveDate,
    /// Status overrides applied to the default checklist.
    #[serde(default)]
    pub checklist: Vec<ChecklistOverride>,
}

/// Request body for the `/quarterly/schedule` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuarterlyScheduleRequest {
    /// The tax year to schedule.
    pub tax_year: i32,
    /// Gross income estimate for the year.
    pub gross_income: Decimal,
    /// Total deductions (defaults to zero).
    #[serde(default)]
    pub deductions: Decimal,
    /// Two-letter state code; omit for no state tax.
    #[serde(default)]
    pub state: Option<String>,
    /// Whether self-employment tax applies.
    #[serde(default)]
    pub self_employed: bool,
    /// Previously generated payments; paid quarters are preserved.
    #[serde(default)]
    pub existing_payments: Vec<QuarterlyPayment>,
    /// The date to derive payment statuses as of (defaults to today).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}
