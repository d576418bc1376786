//! Quarterly estimated payment models.
//!
//! This module contains [`QuarterlyEstimate`] (the four-installment estimate
//! derived from an annual tax total) and [`QuarterlyPayment`] (the mutable
//! per-quarter payment record managed by the scheduler). IRS due dates are
//! fixed: April 15, June 15, and September 15 of the tax year, and
//! January 15 of the following year for the fourth quarter.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Derived payment status, ordered from settled to distant.
///
/// Unpaid quarters degrade from `Scheduled` through `Upcoming` (due within
/// 30 days) and `DueSoon` (due within 14 days) to `Overdue` as the due date
/// approaches and passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Paid in full.
    Paid,
    /// Unpaid and past the due date.
    Overdue,
    /// Due within 14 days.
    DueSoon,
    /// Due within 30 days.
    Upcoming,
    /// Due more than 30 days out.
    Scheduled,
}

/// One installment of a quarterly estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyInstallment {
    /// Quarter number, 1 through 4.
    pub quarter: u8,
    /// Amount due for this quarter.
    pub amount: Decimal,
    /// IRS due date for this quarter.
    pub due_date: NaiveDate,
}

/// The four-quarter estimated payment plan for a tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyEstimate {
    /// The tax year the estimate covers.
    pub tax_year: i32,
    /// The four installments, in quarter order.
    pub installments: Vec<QuarterlyInstallment>,
}

impl QuarterlyEstimate {
    /// Sum of the four installment amounts.
    pub fn total_annual(&self) -> Decimal {
        self.installments.iter().map(|i| i.amount).sum()
    }
}

/// A persisted-style quarterly payment record.
///
/// Created by the scheduler and mutated by payment recording. `is_paid` is
/// derived, never stored: a quarter is paid once `paid_amount` covers
/// `estimated_amount`. Regeneration for the same year must leave paid
/// quarters untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyPayment {
    /// The tax year this payment belongs to.
    pub tax_year: i32,
    /// Quarter number, 1 through 4.
    pub quarter: u8,
    /// IRS due date for this quarter.
    pub due_date: NaiveDate,
    /// The estimated amount due.
    pub estimated_amount: Decimal,
    /// The amount paid so far.
    #[serde(default)]
    pub paid_amount: Decimal,
    /// When the payment was recorded, if any.
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
    /// Federal share of the estimate.
    pub federal_payment: Decimal,
    /// State share of the estimate.
    pub state_payment: Decimal,
    /// Two-letter state code, when a state share applies.
    #[serde(default)]
    pub state: Option<String>,
    /// Free-form notes recorded with the payment.
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuarterlyPayment {
    /// Whether the quarter is fully paid (`paid_amount >= estimated_amount`).
    pub fn is_paid(&self) -> bool {
        self.paid_amount >= self.estimated_amount
    }

    /// Derived status relative to an observation date.
    pub fn status(&self, as_of: NaiveDate) -> PaymentStatus {
        if self.is_paid() {
            return PaymentStatus::Paid;
        }
        if self.due_date < as_of {
            return PaymentStatus::Overdue;
        }
        let days_until = (self.due_date - as_of).num_days();
        if days_until <= 14 {
            PaymentStatus::DueSoon
        } else if days_until <= 30 {
            PaymentStatus::Upcoming
        } else {
            PaymentStatus::Scheduled
        }
    }

    /// The IRS standard due dates for a tax year, in quarter order.
    ///
    /// The fourth quarter is due January 15 of the **following** calendar
    /// year. Years outside chrono's calendar range are rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use traveltax_engine::models::QuarterlyPayment;
    /// use chrono::NaiveDate;
    ///
    /// let dates = QuarterlyPayment::standard_due_dates(2025).unwrap();
    /// assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
    /// assert_eq!(dates[3], NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    /// ```
    pub fn standard_due_dates(year: i32) -> EngineResult<[NaiveDate; 4]> {
        let date = |y: i32, m: u32, d: u32| {
            NaiveDate::from_ymd_opt(y, m, d).ok_or(EngineError::InvalidTaxYear { year })
        };
        Ok([
            date(year, 4, 15)?,
            date(year, 6, 15)?,
            date(year, 9, 15)?,
            date(year + 1, 1, 15)?,
        ])
    }
}
