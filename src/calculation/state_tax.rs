//! State tax resolution and multi-state apportionment.
//!
//! States fall into three groups: states with no income tax on wages, which
//! always owe zero; states with a configured progressive bracket table,
//! which delegate to the bracket engine; and everything else, which is a
//! configuration error rather than a zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::StateBreakdown;

use super::brackets::calculate_bracket_tax;

/// How deductions apply when income spans multiple states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionPolicy {
    /// Each state is taxed on its own gross earnings; deductions are not
    /// apportioned across states. This is the reference behavior.
    GrossPerState,
    /// Deductions are prorated to each state by its share of total earnings.
    ProrateByIncome,
}

/// Income earned in one state during a tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateAllocation {
    /// Two-letter state code (case-insensitive).
    pub state: String,
    /// Earnings attributed to the state.
    pub earnings: Decimal,
    /// Weeks worked in the state.
    pub weeks_worked: u32,
}

/// Tax resolved for one state of a multi-state year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxResult {
    /// The state's earnings breakdown.
    pub breakdown: StateBreakdown,
    /// State income tax on the apportioned taxable amount.
    pub tax: Decimal,
}

/// The combined result of a multi-state tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiStateTaxResult {
    /// Per-state results, in allocation order.
    pub states: Vec<StateTaxResult>,
    /// Sum of all state taxes.
    pub total: Decimal,
}

/// Calculates state income tax on taxable income.
///
/// No-income-tax states return zero unconditionally. States with a
/// configured bracket table delegate to the bracket engine (which returns
/// zero for non-positive taxable income). Any other state code is a
/// configuration error, not a zero: a caller asking about an unsupported
/// state should find out.
///
/// # Arguments
///
/// * `taxable_income` - Income after deductions
/// * `state` - Two-letter state code (case-insensitive)
/// * `config` - The loaded tax configuration
///
/// # Errors
///
/// Returns `StateNotSupported` when the state is neither in the no-tax list
/// nor has a bracket table.
pub fn calculate_state_tax(
    taxable_income: Decimal,
    state: &str,
    config: &TaxConfig,
) -> EngineResult<Decimal> {
    if config.is_no_tax_state(state) {
        return Ok(Decimal::ZERO);
    }

    let brackets = config
        .state_brackets(state)
        .ok_or_else(|| EngineError::StateNotSupported {
            state: state.to_uppercase(),
        })?;

    Ok(calculate_bracket_tax(taxable_income, brackets))
}

/// Calculates state tax across a multi-state year.
///
/// Each allocation is taxed by its own state's rules on a taxable amount
/// determined by the deduction policy. Under [`DeductionPolicy::GrossPerState`]
/// each state taxes its gross earnings; under
/// [`DeductionPolicy::ProrateByIncome`] the total deductions are split across
/// states in proportion to earnings and each state taxes the remainder.
///
/// # Errors
///
/// Returns `StateNotSupported` for any allocation in an unsupported state.
pub fn calculate_multi_state_tax(
    allocations: &[StateAllocation],
    total_deductions: Decimal,
    policy: DeductionPolicy,
    config: &TaxConfig,
) -> EngineResult<MultiStateTaxResult> {
    let total_earnings: Decimal = allocations.iter().map(|a| a.earnings).sum();

    let mut states = Vec::with_capacity(allocations.len());
    let mut total = Decimal::ZERO;

    for allocation in allocations {
        let taxable = match policy {
            DeductionPolicy::GrossPerState => allocation.earnings,
            DeductionPolicy::ProrateByIncome => {
                if total_earnings.is_zero() {
                    allocation.earnings
                } else {
                    let share = total_deductions * allocation.earnings / total_earnings;
                    (allocation.earnings - share).max(Decimal::ZERO)
                }
            }
        };

        let tax = calculate_state_tax(taxable, &allocation.state, config)?;
        total += tax;

        states.push(StateTaxResult {
            breakdown: StateBreakdown {
                state: allocation.state.to_uppercase(),
                earnings: allocation.earnings,
                weeks_worked: allocation.weeks_worked,
                has_state_tax: !config.is_no_tax_state(&allocation.state),
            },
            tax,
        });
    }

    Ok(MultiStateTaxResult { states, total })
}
