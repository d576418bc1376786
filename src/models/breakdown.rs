//! Tax breakdown models.
//!
//! This module contains the [`TaxableIncomeBreakdown`] type capturing all
//! outputs of a total-tax calculation, and [`StateBreakdown`] describing one
//! state's share of a multi-state year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The complete result of a total-tax calculation.
///
/// All monetary fields are exact decimals. The invariants maintained by the
/// engine: `taxable_income >= 0` (deductions cannot push it negative),
/// `total_tax >= 0`, and `take_home_pay = gross_income - total_tax`.
///
/// # Example
///
/// ```
/// use traveltax_engine::models::TaxableIncomeBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let breakdown = TaxableIncomeBreakdown {
///     gross_income: Decimal::from_str("75000").unwrap(),
///     deductions: Decimal::ZERO,
///     taxable_income: Decimal::from_str("75000").unwrap(),
///     federal_tax: Decimal::from_str("11553").unwrap(),
///     state_tax: Decimal::ZERO,
///     self_employment_tax: Decimal::ZERO,
///     total_tax: Decimal::from_str("11553").unwrap(),
///     effective_tax_rate: Decimal::from_str("0.15404").unwrap(),
///     marginal_tax_rate: Decimal::from_str("0.22").unwrap(),
///     take_home_pay: Decimal::from_str("63447").unwrap(),
/// };
/// assert_eq!(breakdown.gross_income - breakdown.total_tax, breakdown.take_home_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableIncomeBreakdown {
    /// Gross income before deductions.
    pub gross_income: Decimal,
    /// Total deductions applied.
    pub deductions: Decimal,
    /// Taxable income after deductions, clamped at zero.
    pub taxable_income: Decimal,
    /// Federal income tax from the progressive bracket table.
    pub federal_tax: Decimal,
    /// State income tax (zero for no-income-tax states).
    pub state_tax: Decimal,
    /// Self-employment tax (zero unless self-employed).
    pub self_employment_tax: Decimal,
    /// Sum of federal, state, and self-employment tax.
    pub total_tax: Decimal,
    /// `total_tax / gross_income`, zero when gross income is zero.
    pub effective_tax_rate: Decimal,
    /// Rate of the top federal bracket reached by the taxable income.
    pub marginal_tax_rate: Decimal,
    /// `gross_income - total_tax`.
    pub take_home_pay: Decimal,
}

/// One state's share of a multi-state working year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBreakdown {
    /// Two-letter state code.
    pub state: String,
    /// Earnings attributed to this state.
    pub earnings: Decimal,
    /// Weeks worked in this state.
    pub weeks_worked: u32,
    /// Whether the state levies income tax on wages.
    pub has_state_tax: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_breakdown() -> TaxableIncomeBreakdown {
        TaxableIncomeBreakdown {
            gross_income: dec("75000"),
            deductions: dec("0"),
            taxable_income: dec("75000"),
            federal_tax: dec("11553"),
            state_tax: dec("0"),
            self_employment_tax: dec("0"),
            total_tax: dec("11553"),
            effective_tax_rate: dec("0.15404"),
            marginal_tax_rate: dec("0.22"),
            take_home_pay: dec("63447"),
        }
    }

    #[test]
    fn test_take_home_is_gross_minus_total() {
        let breakdown = sample_breakdown();
        assert_eq!(
            breakdown.take_home_pay,
            breakdown.gross_income - breakdown.total_tax
        );
    }

    #[test]
    fn test_breakdown_serialization() {
        let breakdown = sample_breakdown();
        let json = serde_json::to_string(&breakdown).unwrap();
        assert!(json.contains("\"gross_income\":\"75000\""));
        assert!(json.contains("\"federal_tax\":\"11553\""));
        assert!(json.contains("\"marginal_tax_rate\":\"0.22\""));
    }

    #[test]
    fn test_breakdown_deserialization() {
        let json = r#"{
            "gross_income": "50000",
            "deductions": "14600",
            "taxable_income": "35400",
            "federal_tax": "4016",
            "state_tax": "0",
            "self_employment_tax": "0",
            "total_tax": "4016",
            "effective_tax_rate": "0.08032",
            "marginal_tax_rate": "0.12",
            "take_home_pay": "45984"
        }"#;

        let breakdown: TaxableIncomeBreakdown = serde_json::from_str(json).unwrap();
        assert_eq!(breakdown.taxable_income, dec("35400"));
        assert_eq!(breakdown.marginal_tax_rate, dec("0.12"));
    }

    #[test]
    fn test_state_breakdown_serialization() {
        let sb = StateBreakdown {
            state: "TX".to_string(),
            earnings: dec("42000"),
            weeks_worked: 13,
            has_state_tax: false,
        };

        let json = serde_json::to_string(&sb).unwrap();
        assert!(json.contains("\"state\":\"TX\""));
        assert!(json.contains("\"weeks_worked\":13"));
        assert!(json.contains("\"has_state_tax\":false"));
    }
}
