//! Quarterly payment scheduling.
//!
//! Generates and regenerates the four-payment plan for a tax year from
//! estimate inputs, records payments against it, and summarizes progress.
//! Regeneration is the interesting case: income estimates change mid-year,
//! but money already sent to the IRS is settled, so paid quarters carry
//! over untouched while unpaid quarters pick up the new estimates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::error::EngineResult;
use crate::models::{QuarterlyPayment, TaxableIncomeBreakdown};

use super::common::quarter_split;
use super::total_tax::calculate_total_tax;

/// Progress summary over a year's payment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Sum of estimated amounts.
    pub total_estimated: Decimal,
    /// Sum of recorded payments.
    pub total_paid: Decimal,
    /// Estimated minus paid, never negative.
    pub remaining: Decimal,
    /// Number of fully paid quarters.
    pub quarters_paid: u32,
    /// Number of unpaid quarters past their due date.
    pub quarters_overdue: u32,
    /// Paid share of the estimate, 0 to 1 (0 when nothing is estimated).
    pub progress: Decimal,
    /// All four quarters paid.
    pub is_fully_paid: bool,
    /// At least one quarter is overdue.
    pub has_overdue: bool,
}

/// Generates the four-quarter payment plan for a tax year.
///
/// Amounts come from the annual estimate split evenly (the quarter rounded
/// down to cents, the fourth absorbing the remainder so no quarter goes
/// negative); each quarter's amount is also
/// split into its federal share (bracket tax plus self-employment tax) and
/// state share. Quarters already paid in `existing` are carried over
/// unchanged; unpaid existing quarters keep their recorded partial payments
/// and notes but take the new estimates.
///
/// # Errors
///
/// Returns `StateNotSupported` for an unsupported state code and
/// `InvalidTaxYear` for a year outside the calendar range.
pub fn generate_payments(
    tax_year: i32,
    gross_income: Decimal,
    deductions: Decimal,
    state: Option<&str>,
    is_self_employed: bool,
    existing: &[QuarterlyPayment],
    config: &TaxConfig,
) -> EngineResult<Vec<QuarterlyPayment>> {
    let breakdown = calculate_total_tax(gross_income, deductions, state, is_self_employed, config)?;
    let due_dates = QuarterlyPayment::standard_due_dates(tax_year)?;

    let total = quarter_split(breakdown.total_tax);
    let state_share = quarter_split(breakdown.state_tax);

    let payments = due_dates
        .into_iter()
        .enumerate()
        .map(|(i, due_date)| {
            let quarter = i as u8 + 1;

            let carried = existing
                .iter()
                .find(|p| p.tax_year == tax_year && p.quarter == quarter);
            if let Some(paid) = carried.filter(|p| p.is_paid()) {
                return paid.clone();
            }

            QuarterlyPayment {
                tax_year,
                quarter,
                due_date,
                estimated_amount: total[i],
                paid_amount: carried.map_or(Decimal::ZERO, |p| p.paid_amount),
                paid_date: carried.and_then(|p| p.paid_date),
                federal_payment: total[i] - state_share[i],
                state_payment: state_share[i],
                state: state_for_payment(state, &breakdown),
                notes: carried.and_then(|p| p.notes.clone()),
            }
        })
        .collect();

    Ok(payments)
}

fn state_for_payment(state: Option<&str>, breakdown: &TaxableIncomeBreakdown) -> Option<String> {
    if breakdown.state_tax.is_zero() {
        None
    } else {
        state.map(str::to_uppercase)
    }
}

/// Records a payment against a quarter.
///
/// Sets the paid amount, date, and notes; whether the quarter counts as
/// paid is derived from the amounts.
pub fn record_payment(
    payment: &mut QuarterlyPayment,
    amount: Decimal,
    paid_on: NaiveDate,
    notes: Option<String>,
) {
    payment.paid_amount = amount;
    payment.paid_date = Some(paid_on);
    payment.notes = notes;
}

/// Summarizes payment progress for a year's plan.
pub fn payment_summary(payments: &[QuarterlyPayment], as_of: NaiveDate) -> PaymentSummary {
    let total_estimated: Decimal = payments.iter().map(|p| p.estimated_amount).sum();
    let total_paid: Decimal = payments.iter().map(|p| p.paid_amount).sum();

    let quarters_paid = payments.iter().filter(|p| p.is_paid()).count() as u32;
    let quarters_overdue = payments
        .iter()
        .filter(|p| !p.is_paid() && p.due_date < as_of)
        .count() as u32;

    let progress = if total_estimated.is_zero() {
        Decimal::ZERO
    } else {
        (total_paid / total_estimated).round_dp(4).min(Decimal::ONE)
    };

    PaymentSummary {
        total_estimated,
        total_paid,
        remaining: (total_estimated - total_paid).max(Decimal::ZERO),
        quarters_paid,
        quarters_overdue,
        progress,
        is_fully_paid: quarters_paid == 4,
        has_overdue: quarters_overdue > 0,
    }
}
