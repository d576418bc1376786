//! Progressive bracket tax engine.
//!
//! This module provides the bracket arithmetic shared by the federal and
//! state calculators: summing each bracket's slice of taxable income at its
//! marginal rate, looking up the marginal rate itself, and validating bracket
//! tables at configuration load time.

use rust_decimal::Decimal;

use crate::config::TaxBracket;
use crate::error::{EngineError, EngineResult};

use super::common::round_half_up;

/// Calculates progressive tax over a bracket table.
///
/// Each bracket taxes the slice of income between its bounds at its marginal
/// rate; income is never taxed past itself. The result is rounded to cents.
/// Taxable income at or below zero yields zero tax.
///
/// # Arguments
///
/// * `taxable_income` - Income after deductions
/// * `brackets` - A validated bracket table (see [`validate_brackets`])
///
/// # Example
///
/// ```no_run
/// use traveltax_engine::calculation::calculate_bracket_tax;
/// use traveltax_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/us2024").unwrap();
/// let income = Decimal::from_str("75000").unwrap();
/// let tax = calculate_bracket_tax(income, loader.federal_brackets());
/// assert_eq!(tax, Decimal::from_str("11553").unwrap());
/// ```
pub fn calculate_bracket_tax(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut tax = Decimal::ZERO;
    for bracket in brackets {
        if taxable_income <= bracket.lower {
            break;
        }
        let ceiling = match bracket.upper {
            Some(upper) => taxable_income.min(upper),
            None => taxable_income,
        };
        tax += (ceiling - bracket.lower) * bracket.rate;
    }

    round_half_up(tax)
}

/// Returns the marginal rate for a taxable income.
///
/// The marginal rate is the rate of the highest bracket whose lower bound
/// the income exceeds, so an income exactly on a bracket boundary takes the
/// lower bracket's rate. Taxable income at or below zero has a zero
/// marginal rate.
pub fn marginal_rate(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    brackets
        .iter()
        .rev()
        .find(|bracket| taxable_income > bracket.lower)
        .map(|bracket| bracket.rate)
        .unwrap_or(Decimal::ZERO)
}

/// Validates a bracket table.
///
/// A well-formed table is non-empty, starts at a zero lower bound, is
/// contiguous (each bracket's lower bound equals the previous bracket's
/// upper bound), has ascending rates, and is unbounded only in its final
/// bracket. Tables are validated once at configuration load so the
/// calculators can assume these invariants.
///
/// # Arguments
///
/// * `table` - Name of the table for error reporting (e.g. "federal", "CA")
/// * `brackets` - The table to validate
pub fn validate_brackets(table: &str, brackets: &[TaxBracket]) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidBracketTable {
        table: table.to_string(),
        message,
    };

    let Some(first) = brackets.first() else {
        return Err(invalid("bracket table is empty".to_string()));
    };

    if first.lower != Decimal::ZERO {
        return Err(invalid(format!(
            "first bracket must start at 0, starts at {}",
            first.lower
        )));
    }

    for (i, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO {
            return Err(invalid(format!("bracket {} has a negative rate", i + 1)));
        }

        match bracket.upper {
            Some(upper) => {
                if upper <= bracket.lower {
                    return Err(invalid(format!(
                        "bracket {} has upper bound {} not above lower bound {}",
                        i + 1,
                        upper,
                        bracket.lower
                    )));
                }
                match brackets.get(i + 1) {
                    Some(next) => {
                        if next.lower != upper {
                            return Err(invalid(format!(
                                "bracket {} starts at {} but the previous bracket ends at {}",
                                i + 2,
                                next.lower,
                                upper
                            )));
                        }
                        if next.rate < bracket.rate {
                            return Err(invalid(format!(
                                "bracket {} rate {} is below the previous rate {}",
                                i + 2,
                                next.rate,
                                bracket.rate
                            )));
                        }
                    }
                    None => {
                        return Err(invalid("final bracket must be unbounded".to_string()));
                    }
                }
            }
            None => {
                if i + 1 != brackets.len() {
                    return Err(invalid(format!(
                        "bracket {} is unbounded but is not the final bracket",
                        i + 1
                    )));
                }
            }
        }
    }

    Ok(())
}
