//! Total-tax composition.
//!
//! Composes the federal bracket engine, the state resolver, and the
//! self-employment worksheet into a single [`TaxableIncomeBreakdown`], and
//! derives the four-quarter estimated payment plan from it.

use rust_decimal::Decimal;

use crate::config::TaxConfig;
use crate::error::EngineResult;
use crate::models::{QuarterlyEstimate, QuarterlyInstallment, QuarterlyPayment, TaxableIncomeBreakdown};

use super::brackets::{calculate_bracket_tax, marginal_rate};
use super::common::quarter_split;
use super::self_employment::calculate_se_tax;
use super::state_tax::calculate_state_tax;

/// Calculates the complete tax breakdown for a year of income.
///
/// Taxable income is gross income less deductions, clamped at zero (so
/// deductions beyond gross zero out every tax). Federal tax comes from the
/// progressive bracket table, state tax from the state resolver (`None`
/// state means no state tax), and self-employment tax from the worksheet
/// when the filer is self-employed. The effective rate is total tax over
/// gross income (zero at zero gross), rounded to four decimal places; the
/// marginal rate is the federal bracket rate at the taxable income.
///
/// # Arguments
///
/// * `gross_income` - Gross income for the year
/// * `deductions` - Total deductions
/// * `state` - Two-letter state code, or `None` for no state tax
/// * `is_self_employed` - Whether self-employment tax applies
/// * `config` - The loaded tax configuration
///
/// # Errors
///
/// Returns `StateNotSupported` for an unsupported state code.
///
/// # Example
///
/// ```no_run
/// use traveltax_engine::calculation::calculate_total_tax;
/// use traveltax_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/us2024").unwrap();
/// let breakdown = calculate_total_tax(
///     Decimal::from(75000),
///     Decimal::ZERO,
///     Some("TX"),
///     false,
///     loader.config(),
/// ).unwrap();
/// assert_eq!(breakdown.federal_tax, Decimal::from_str("11553.00").unwrap());
/// assert_eq!(breakdown.state_tax, Decimal::ZERO);
/// ```
pub fn calculate_total_tax(
    gross_income: Decimal,
    deductions: Decimal,
    state: Option<&str>,
    is_self_employed: bool,
    config: &TaxConfig,
) -> EngineResult<TaxableIncomeBreakdown> {
    let taxable_income = (gross_income - deductions).max(Decimal::ZERO);

    let federal_tax = calculate_bracket_tax(taxable_income, config.federal_brackets());

    let state_tax = match state {
        Some(state) => calculate_state_tax(taxable_income, state, config)?,
        None => Decimal::ZERO,
    };

    let self_employment_tax = if is_self_employed {
        calculate_se_tax(taxable_income, config.self_employment()).total
    } else {
        Decimal::ZERO
    };

    let total_tax = federal_tax + state_tax + self_employment_tax;

    let effective_tax_rate = if gross_income.is_zero() {
        Decimal::ZERO
    } else {
        (total_tax / gross_income).round_dp(4)
    };

    Ok(TaxableIncomeBreakdown {
        gross_income,
        deductions,
        taxable_income,
        federal_tax,
        state_tax,
        self_employment_tax,
        total_tax,
        effective_tax_rate,
        marginal_tax_rate: marginal_rate(taxable_income, config.federal_brackets()),
        take_home_pay: gross_income - total_tax,
    })
}

/// Derives the four-quarter estimated payment plan for a tax year.
///
/// The annual total is split evenly: the first three quarters each get the
/// quarter rounded down to cents and the fourth absorbs the remainder, so
/// the four installments always sum exactly to the annual total and no
/// installment is negative. Due dates follow the IRS schedule (April 15,
/// June 15, September 15, and January 15 of the following year).
///
/// # Errors
///
/// Returns `StateNotSupported` for an unsupported state code and
/// `InvalidTaxYear` for a year outside the calendar range.
pub fn calculate_quarterly_estimate(
    gross_income: Decimal,
    deductions: Decimal,
    state: Option<&str>,
    is_self_employed: bool,
    tax_year: i32,
    config: &TaxConfig,
) -> EngineResult<QuarterlyEstimate> {
    let breakdown = calculate_total_tax(gross_income, deductions, state, is_self_employed, config)?;
    let due_dates = QuarterlyPayment::standard_due_dates(tax_year)?;

    let amounts = quarter_split(breakdown.total_tax);

    let installments = due_dates
        .into_iter()
        .enumerate()
        .map(|(i, due_date)| QuarterlyInstallment {
            quarter: i as u8 + 1,
            amount: amounts[i],
            due_date,
        })
        .collect();

    Ok(QuarterlyEstimate {
        tax_year,
        installments,
    })
}
