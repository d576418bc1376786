//! Tax-home compliance scoring.
//!
//! A travel nurse keeps stipends non-taxable only while maintaining a tax
//! home. Compliance is scored from three sources: a weighted checklist of
//! tax-home ties, the 30-day return rule (how recently the nurse visited the
//! tax home), and cumulative days of physical presence. Raw points are
//! normalized to a 0-100 score and mapped to a level.
//!
//! Scores on a [`TaxHomeCompliance`] record are snapshots: they change only
//! through [`recalculate_score`] or [`record_tax_home_visit`], never as a
//! side effect of other mutations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ComplianceConfig;
use crate::models::{
    ChecklistItemStatus, ComplianceChecklistItem, ComplianceLevel, TaxHomeCompliance,
};

/// Standing under the 30-day return rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnRuleStatus {
    /// More than the warning window remains before a return is due.
    Compliant,
    /// A return is due within the warning window.
    AtRisk,
    /// The return deadline has passed, or no visit was ever recorded.
    Violated,
}

/// The full result of a compliance scoring pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceAssessment {
    /// Points earned from the checklist.
    pub checklist_points: u32,
    /// Points earned under the 30-day return rule.
    pub return_rule_points: u32,
    /// Points earned for days of physical presence.
    pub presence_points: u32,
    /// Total points earned.
    pub raw_points: u32,
    /// Maximum earnable points.
    pub max_points: u32,
    /// Normalized score, 0-100.
    pub score: u8,
    /// Level derived from the score.
    pub level: ComplianceLevel,
    /// Standing under the return rule.
    pub return_rule: ReturnRuleStatus,
    /// Days left before a tax-home return is due (0 when overdue or no
    /// visit exists).
    pub days_until_return_due: i64,
}

/// Days remaining before the 30-day return rule requires a tax-home visit.
///
/// Counts down from the threshold as days pass since the last visit, and
/// never goes below zero. With no recorded visit a return is due
/// immediately.
pub fn days_until_return_due(
    last_visit: Option<NaiveDate>,
    as_of: NaiveDate,
    threshold_days: i64,
) -> i64 {
    match last_visit {
        Some(visit) => {
            let days_since = (as_of - visit).num_days();
            (threshold_days - days_since).clamp(0, threshold_days)
        }
        None => 0,
    }
}

/// Scores tax-home compliance from checklist, visit history, and presence.
///
/// Checklist items earn their full weight when complete and half when
/// partial. The return rule earns full points while more than the warning
/// window remains, reduced points inside the window, and nothing once
/// violated. Presence earns points proportional to days at the tax home,
/// capped at the target. The score is the earned share of the maximum,
/// rounded to the nearest integer; a score of exactly zero maps to
/// [`ComplianceLevel::Unknown`].
pub fn score_compliance(
    checklist: &[ComplianceChecklistItem],
    days_at_tax_home: u32,
    last_visit: Option<NaiveDate>,
    as_of: NaiveDate,
    config: &ComplianceConfig,
) -> ComplianceAssessment {
    let checklist_points: u32 = checklist
        .iter()
        .map(|item| match item.status {
            ChecklistItemStatus::Complete => item.weight,
            ChecklistItemStatus::Partial => item.weight / 2,
            ChecklistItemStatus::Incomplete | ChecklistItemStatus::NotApplicable => 0,
        })
        .sum();
    let checklist_max: u32 = checklist.iter().map(|item| item.weight).sum();

    let rule = &config.return_rule;
    let days_until = days_until_return_due(last_visit, as_of, rule.threshold_days);
    let (return_rule_points, return_rule) = if last_visit.is_none() || days_until == 0 {
        (0, ReturnRuleStatus::Violated)
    } else if days_until <= rule.at_risk_window_days {
        (rule.at_risk_points, ReturnRuleStatus::AtRisk)
    } else {
        (rule.points, ReturnRuleStatus::Compliant)
    };

    let presence = &config.presence;
    let presence_points = if presence.target_days == 0 {
        0
    } else {
        // Widened so arbitrarily large day counts cannot overflow.
        let earned =
            u64::from(days_at_tax_home) * u64::from(presence.points) / u64::from(presence.target_days);
        earned.min(u64::from(presence.points)) as u32
    };

    let raw_points = checklist_points + return_rule_points + presence_points;
    let max_points = checklist_max + rule.points + presence.points;

    // Integer rounding half-up of raw/max as a percentage.
    let score = if max_points == 0 {
        0
    } else {
        ((raw_points * 200 + max_points) / (max_points * 2)) as u8
    };

    ComplianceAssessment {
        checklist_points,
        return_rule_points,
        presence_points,
        raw_points,
        max_points,
        score,
        level: level_for_score(score, config),
        return_rule,
        days_until_return_due: days_until,
    }
}

fn level_for_score(score: u8, config: &ComplianceConfig) -> ComplianceLevel {
    let thresholds = &config.level_thresholds;
    if score >= thresholds.excellent {
        ComplianceLevel::Excellent
    } else if score >= thresholds.good {
        ComplianceLevel::Good
    } else if score >= thresholds.at_risk {
        ComplianceLevel::AtRisk
    } else if score >= thresholds.non_compliant {
        ComplianceLevel::NonCompliant
    } else {
        ComplianceLevel::Unknown
    }
}

/// Recalculates and stores the score on a compliance record.
///
/// Idempotent: calling twice with no intervening mutation stores and
/// returns the same assessment.
pub fn recalculate_score(
    record: &mut TaxHomeCompliance,
    as_of: NaiveDate,
    config: &ComplianceConfig,
) -> ComplianceAssessment {
    let assessment = score_compliance(
        &record.checklist_items,
        record.days_at_tax_home,
        record.last_tax_home_visit,
        as_of,
        config,
    );
    record.compliance_score = assessment.score;
    record.compliance_level = assessment.level;
    assessment
}

/// Records a tax-home visit and recalculates the score in one operation.
///
/// Adds the visit's days to the cumulative presence count and advances the
/// last-visit date (an older visit never regresses it).
pub fn record_tax_home_visit(
    record: &mut TaxHomeCompliance,
    days: u32,
    visit_date: NaiveDate,
    as_of: NaiveDate,
    config: &ComplianceConfig,
) -> ComplianceAssessment {
    record.days_at_tax_home += days;
    record.last_tax_home_visit = Some(match record.last_tax_home_visit {
        Some(existing) => existing.max(visit_date),
        None => visit_date,
    });
    recalculate_score(record, as_of, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn config() -> ComplianceConfig {
        ConfigLoader::load("./config/us2024")
            .unwrap()
            .compliance()
            .clone()
    }

    fn checklist_with(status: ChecklistItemStatus, config: &ComplianceConfig) -> Vec<ComplianceChecklistItem> {
        let mut items = config.default_checklist();
        for item in &mut items {
            item.status = status;
        }
        items
    }

    fn fresh_record(config: &ComplianceConfig) -> TaxHomeCompliance {
        TaxHomeCompliance {
            tax_year: 2025,
            days_at_tax_home: 0,
            last_tax_home_visit: None,
            checklist_items: config.default_checklist(),
            compliance_score: 0,
            compliance_level: ComplianceLevel::Unknown,
        }
    }

    /// CS-001: nothing done scores zero and maps to unknown
    #[test]
    fn test_all_incomplete_scores_zero() {
        let config = config();
        let assessment = score_compliance(
            &config.default_checklist(),
            0,
            None,
            date("2025-06-01"),
            &config,
        );

        assert_eq!(assessment.raw_points, 0);
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.level, ComplianceLevel::Unknown);
        assert_eq!(assessment.return_rule, ReturnRuleStatus::Violated);
        assert_eq!(assessment.days_until_return_due, 0);
    }

    /// CS-002: everything done scores 100 and maps to excellent
    #[test]
    fn test_everything_complete_scores_100() {
        let config = config();
        let checklist = checklist_with(ChecklistItemStatus::Complete, &config);
        let assessment = score_compliance(
            &checklist,
            30,
            Some(date("2025-05-30")),
            date("2025-06-01"),
            &config,
        );

        assert_eq!(assessment.checklist_points, 85);
        assert_eq!(assessment.return_rule_points, 20);
        assert_eq!(assessment.presence_points, 20);
        assert_eq!(assessment.raw_points, 125);
        assert_eq!(assessment.max_points, 125);
        assert_eq!(assessment.score, 100);
        assert_eq!(assessment.level, ComplianceLevel::Excellent);
        assert_eq!(assessment.return_rule, ReturnRuleStatus::Compliant);
    }

    /// CS-003: partial items earn half their weight
    #[test]
    fn test_partial_items_earn_half() {
        let config = config();
        let checklist = checklist_with(ChecklistItemStatus::Partial, &config);
        let assessment =
            score_compliance(&checklist, 0, None, date("2025-06-01"), &config);

        // Half weights with integer division: 7+7+7+5+2x6 = 38.
        assert_eq!(assessment.checklist_points, 38);
    }

    /// CS-004: not-applicable items earn nothing
    #[test]
    fn test_not_applicable_earns_nothing() {
        let config = config();
        let checklist = checklist_with(ChecklistItemStatus::NotApplicable, &config);
        let assessment =
            score_compliance(&checklist, 0, None, date("2025-06-01"), &config);

        assert_eq!(assessment.checklist_points, 0);
    }

    /// CS-005: return rule transitions compliant -> at-risk -> violated
    #[test]
    fn test_return_rule_transitions() {
        let config = config();
        let checklist = config.default_checklist();
        let visit = Some(date("2025-05-01"));

        // 10 days since: 20 days remain, compliant.
        let a = score_compliance(&checklist, 0, visit, date("2025-05-11"), &config);
        assert_eq!(a.return_rule, ReturnRuleStatus::Compliant);
        assert_eq!(a.return_rule_points, 20);
        assert_eq!(a.days_until_return_due, 20);

        // 25 days since: 5 days remain, at risk.
        let b = score_compliance(&checklist, 0, visit, date("2025-05-26"), &config);
        assert_eq!(b.return_rule, ReturnRuleStatus::AtRisk);
        assert_eq!(b.return_rule_points, 10);
        assert_eq!(b.days_until_return_due, 5);

        // 30 days since: due today, violated.
        let c = score_compliance(&checklist, 0, visit, date("2025-05-31"), &config);
        assert_eq!(c.return_rule, ReturnRuleStatus::Violated);
        assert_eq!(c.return_rule_points, 0);

        // 40 days since: long overdue.
        let d = score_compliance(&checklist, 0, visit, date("2025-06-10"), &config);
        assert_eq!(d.return_rule, ReturnRuleStatus::Violated);
        assert_eq!(d.days_until_return_due, 0);
    }

    /// CS-006: presence points scale with days and cap at the target
    #[test]
    fn test_presence_points_scale_and_cap() {
        let config = config();
        let checklist = config.default_checklist();

        let half = score_compliance(&checklist, 15, None, date("2025-06-01"), &config);
        assert_eq!(half.presence_points, 10);

        let full = score_compliance(&checklist, 30, None, date("2025-06-01"), &config);
        assert_eq!(full.presence_points, 20);

        let over = score_compliance(&checklist, 300, None, date("2025-06-01"), &config);
        assert_eq!(over.presence_points, 20);
    }

    /// CS-011: enormous day counts still cap at the presence maximum
    #[test]
    fn test_huge_day_count_caps_at_maximum() {
        let config = config();
        let checklist = config.default_checklist();

        let assessment =
            score_compliance(&checklist, 3_000_000_000, None, date("2025-06-01"), &config);
        assert_eq!(assessment.presence_points, 20);

        let extreme = score_compliance(&checklist, u32::MAX, None, date("2025-06-01"), &config);
        assert_eq!(extreme.presence_points, 20);
        assert_eq!(extreme.level, ComplianceLevel::NonCompliant);
    }

    /// CS-007: recalculation is idempotent
    #[test]
    fn test_recalculate_is_idempotent() {
        let config = config();
        let mut record = fresh_record(&config);
        record.checklist_items[0].status = ChecklistItemStatus::Complete;
        record.days_at_tax_home = 12;

        let as_of = date("2025-06-01");
        let first = recalculate_score(&mut record, as_of, &config);
        let second = recalculate_score(&mut record, as_of, &config);

        assert_eq!(first, second);
        assert_eq!(record.compliance_score, second.score);
        assert_eq!(record.compliance_level, second.level);
    }

    /// CS-008: score is stale until explicitly recalculated
    #[test]
    fn test_score_is_snapshot_until_recalculated() {
        let config = config();
        let mut record = fresh_record(&config);

        for item in &mut record.checklist_items {
            item.status = ChecklistItemStatus::Complete;
        }
        assert_eq!(record.compliance_score, 0);

        recalculate_score(&mut record, date("2025-06-01"), &config);
        assert!(record.compliance_score > 0);
    }

    /// CS-009: recording a visit accumulates days and updates the snapshot
    #[test]
    fn test_record_visit_updates_record() {
        let config = config();
        let mut record = fresh_record(&config);

        let assessment = record_tax_home_visit(
            &mut record,
            4,
            date("2025-05-28"),
            date("2025-06-01"),
            &config,
        );

        assert_eq!(record.days_at_tax_home, 4);
        assert_eq!(record.last_tax_home_visit, Some(date("2025-05-28")));
        assert_eq!(assessment.return_rule, ReturnRuleStatus::Compliant);
        assert_eq!(record.compliance_score, assessment.score);

        // A second, older visit adds days but keeps the newer visit date.
        record_tax_home_visit(&mut record, 3, date("2025-05-01"), date("2025-06-01"), &config);
        assert_eq!(record.days_at_tax_home, 7);
        assert_eq!(record.last_tax_home_visit, Some(date("2025-05-28")));
    }

    /// CS-010: levels follow the configured thresholds
    #[test]
    fn test_level_thresholds() {
        let config = config();
        assert_eq!(level_for_score(0, &config), ComplianceLevel::Unknown);
        assert_eq!(level_for_score(1, &config), ComplianceLevel::NonCompliant);
        assert_eq!(level_for_score(49, &config), ComplianceLevel::NonCompliant);
        assert_eq!(level_for_score(50, &config), ComplianceLevel::AtRisk);
        assert_eq!(level_for_score(69, &config), ComplianceLevel::AtRisk);
        assert_eq!(level_for_score(70, &config), ComplianceLevel::Good);
        assert_eq!(level_for_score(84, &config), ComplianceLevel::Good);
        assert_eq!(level_for_score(85, &config), ComplianceLevel::Excellent);
        assert_eq!(level_for_score(100, &config), ComplianceLevel::Excellent);
    }

    #[test]
    fn test_days_until_return_due_future_visit_caps_at_threshold() {
        // A visit recorded for a future date never exceeds the threshold.
        let days = days_until_return_due(Some(date("2025-07-01")), date("2025-06-01"), 30);
        assert_eq!(days, 30);
    }
}
