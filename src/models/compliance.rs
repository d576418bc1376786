//! Tax-home compliance models.
//!
//! The IRS tax-home rules determine whether a travel nurse's stipends remain
//! non-taxable. Compliance is tracked as a weighted checklist plus visit
//! history; the scoring itself lives in [`crate::calculation::compliance`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of a tax-home checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCategory {
    /// Maintaining the physical residence.
    Residence,
    /// Physical presence at the tax home.
    Presence,
    /// Personal and professional ties to the area.
    Ties,
    /// Financial footprint near the tax home.
    Financial,
    /// Documentation anchored to the tax-home address.
    Documentation,
}

/// Completion status of a checklist item.
///
/// Complete items earn their full weight, partial items half, and
/// incomplete or not-applicable items nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistItemStatus {
    /// Fully satisfied.
    Complete,
    /// Partially satisfied.
    Partial,
    /// Not satisfied.
    Incomplete,
    /// Does not apply to this filer.
    NotApplicable,
}

/// One item of the tax-home compliance checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceChecklistItem {
    /// Stable item id (e.g. "maintain_residence").
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// The compliance category this item belongs to.
    pub category: ChecklistCategory,
    /// Points contributed when complete.
    pub weight: u32,
    /// Current completion status.
    pub status: ChecklistItemStatus,
}

/// Overall compliance level derived from the 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceLevel {
    /// Strong tax-home position.
    Excellent,
    /// Generally compliant.
    Good,
    /// Compliance is slipping.
    AtRisk,
    /// Tax-home status is likely lost.
    NonCompliant,
    /// No compliance activity recorded.
    Unknown,
}

/// Tax-home compliance state for one filer and tax year.
///
/// `compliance_score` and `compliance_level` are snapshots, not live
/// values: they are only updated by an explicit recalculation (see
/// [`crate::calculation::compliance::recalculate_score`]) after checklist or
/// visit mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxHomeCompliance {
    /// The tax year this record covers.
    pub tax_year: i32,
    /// Cumulative days spent at the tax home this year.
    pub days_at_tax_home: u32,
    /// Date of the most recent tax-home visit, if any.
    pub last_tax_home_visit: Option<NaiveDate>,
    /// The weighted checklist.
    pub checklist_items: Vec<ComplianceChecklistItem>,
    /// Last calculated score, 0-100.
    pub compliance_score: u8,
    /// Last calculated level.
    pub compliance_level: ComplianceLevel,
}
