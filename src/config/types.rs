//! Configuration types for the tax calculation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use crate::models::{ChecklistCategory, ChecklistItemStatus, ComplianceChecklistItem};

/// Metadata about the loaded tax profile.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxProfileMetadata {
    /// The jurisdiction the tables cover (e.g. "US").
    pub jurisdiction: String,
    /// The tax year the tables apply to.
    pub tax_year: i32,
    /// The filing status the bracket tables assume (e.g. "single").
    pub filing_status: String,
    /// The version or effective date of the tables.
    pub version: String,
    /// URL to the official source documentation.
    pub source_url: String,
}

/// One bracket of a progressive tax table.
///
/// `upper` is `None` for the final, unbounded bracket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound of the bracket.
    pub lower: Decimal,
    /// Exclusive upper bound, or `None` for the top bracket.
    pub upper: Option<Decimal>,
    /// Marginal rate applied within the bracket.
    pub rate: Decimal,
}

/// Self-employment tax parameters from the Form 1040-ES SE worksheet.
#[derive(Debug, Clone, Deserialize)]
pub struct SelfEmploymentConfig {
    /// Maximum earnings subject to social security tax.
    pub ss_wage_base: Decimal,
    /// Social security tax rate (12.4%).
    pub ss_rate: Decimal,
    /// Medicare tax rate (2.9%), uncapped.
    pub medicare_rate: Decimal,
    /// Net-earnings adjustment factor (92.35%).
    pub net_earnings_factor: Decimal,
    /// No SE tax is due below this net-earnings floor.
    pub minimum_net_earnings: Decimal,
}

/// Federal configuration file structure (`federal.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct FederalConfig {
    /// The progressive federal bracket table.
    pub brackets: Vec<TaxBracket>,
    /// Self-employment tax parameters.
    pub self_employment: SelfEmploymentConfig,
}

/// State configuration file structure (`states.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct StatesConfig {
    /// States that levy no income tax on wages.
    pub no_income_tax: Vec<String>,
    /// Bracket tables for states that do, by state code.
    pub brackets: HashMap<String, Vec<TaxBracket>>,
}

/// The 30-day return rule parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnRuleConfig {
    /// Days between tax-home visits before the rule is violated.
    pub threshold_days: i64,
    /// Remaining-day window in which the rule is at risk.
    pub at_risk_window_days: i64,
    /// Points awarded while compliant.
    pub points: u32,
    /// Points awarded while at risk.
    pub at_risk_points: u32,
}

/// Days-at-tax-home scoring parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceConfig {
    /// Annual days-at-home target that earns full points.
    pub target_days: u32,
    /// Maximum points for presence.
    pub points: u32,
}

/// Inclusive lower score bounds for each compliance level.
///
/// Must be descending; a score of exactly zero maps to unknown.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelThresholds {
    /// Minimum score for the excellent level.
    pub excellent: u8,
    /// Minimum score for the good level.
    pub good: u8,
    /// Minimum score for the at-risk level.
    pub at_risk: u8,
    /// Minimum score for the non-compliant level.
    pub non_compliant: u8,
}

/// One checklist item definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistItemConfig {
    /// Stable item id.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Compliance category.
    pub category: ChecklistCategory,
    /// Points contributed when complete.
    pub weight: u32,
}

/// Compliance configuration file structure (`compliance.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceConfig {
    /// 30-day return rule parameters.
    pub return_rule: ReturnRuleConfig,
    /// Presence scoring parameters.
    pub presence: PresenceConfig,
    /// Level cut points.
    pub level_thresholds: LevelThresholds,
    /// The default checklist definitions.
    pub checklist: Vec<ChecklistItemConfig>,
}

impl ComplianceConfig {
    /// Instantiates the default checklist with every item incomplete.
    pub fn default_checklist(&self) -> Vec<ComplianceChecklistItem> {
        self.checklist
            .iter()
            .map(|item| ComplianceChecklistItem {
                id: item.id.clone(),
                title: item.title.clone(),
                category: item.category,
                weight: item.weight,
                status: ChecklistItemStatus::Incomplete,
            })
            .collect()
    }

    /// Sum of all checklist item weights.
    pub fn checklist_max_points(&self) -> u32 {
        self.checklist.iter().map(|item| item.weight).sum()
    }
}

/// GSA per-diem daily reimbursement ceilings.
#[derive(Debug, Clone, Deserialize)]
pub struct PerDiemConfig {
    /// Maximum daily lodging reimbursement.
    pub daily_lodging_limit: Decimal,
    /// Maximum daily meals reimbursement.
    pub daily_meals_limit: Decimal,
}

/// Limits configuration file structure (`limits.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// GSA per-diem ceilings.
    pub per_diem: PerDiemConfig,
    /// IRS standard mileage rate in dollars per mile, by year.
    pub mileage: HashMap<i32, Decimal>,
}

/// The complete tax configuration loaded from YAML files.
///
/// State codes are normalized to uppercase on construction so lookups are
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct TaxConfig {
    profile: TaxProfileMetadata,
    federal: FederalConfig,
    no_tax_states: HashSet<String>,
    state_brackets: HashMap<String, Vec<TaxBracket>>,
    compliance: ComplianceConfig,
    limits: LimitsConfig,
}

impl TaxConfig {
    /// Creates a new TaxConfig from its component parts.
    pub fn new(
        profile: TaxProfileMetadata,
        federal: FederalConfig,
        states: StatesConfig,
        compliance: ComplianceConfig,
        limits: LimitsConfig,
    ) -> Self {
        let no_tax_states = states
            .no_income_tax
            .into_iter()
            .map(|s| s.to_uppercase())
            .collect();
        let state_brackets = states
            .brackets
            .into_iter()
            .map(|(code, table)| (code.to_uppercase(), table))
            .collect();
        Self {
            profile,
            federal,
            no_tax_states,
            state_brackets,
            compliance,
            limits,
        }
    }

    /// Returns the profile metadata.
    pub fn profile(&self) -> &TaxProfileMetadata {
        &self.profile
    }

    /// Returns the federal bracket table.
    pub fn federal_brackets(&self) -> &[TaxBracket] {
        &self.federal.brackets
    }

    /// Returns the self-employment tax parameters.
    pub fn self_employment(&self) -> &SelfEmploymentConfig {
        &self.federal.self_employment
    }

    /// Whether the state levies no income tax on wages.
    pub fn is_no_tax_state(&self, state: &str) -> bool {
        self.no_tax_states.contains(&state.to_uppercase())
    }

    /// Returns the bracket table for a state, if the state has one.
    pub fn state_brackets(&self, state: &str) -> Option<&[TaxBracket]> {
        self.state_brackets
            .get(&state.to_uppercase())
            .map(|table| table.as_slice())
    }

    /// Iterates over all state bracket tables by code.
    pub fn all_state_brackets(&self) -> impl Iterator<Item = (&String, &Vec<TaxBracket>)> {
        self.state_brackets.iter()
    }

    /// Returns the compliance scoring configuration.
    pub fn compliance(&self) -> &ComplianceConfig {
        &self.compliance
    }

    /// Returns the GSA per-diem ceilings.
    pub fn per_diem(&self) -> &PerDiemConfig {
        &self.limits.per_diem
    }

    /// Returns the standard mileage rate for a year, if configured.
    pub fn mileage_rate(&self, year: i32) -> Option<Decimal> {
        self.limits.mileage.get(&year).copied()
    }
}
