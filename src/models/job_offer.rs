//! Job offer model.
//!
//! A [`JobOffer`] captures the pay package of a travel nursing contract:
//! taxable hourly wages, non-taxable weekly stipends, and optional bonuses.
//! The derived accessors define the weekly pay arithmetic used throughout
//! the stipend calculator.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A travel nursing job offer.
///
/// Weekly stipends are non-taxable per-diem payments (housing, meals)
/// distinct from the taxable hourly wage. Zero-divisor edge cases are
/// defined as zero: an offer with zero hours has a zero blended rate, and
/// an offer with zero gross has a zero non-taxable percentage.
///
/// # Example
///
/// ```
/// use traveltax_engine::models::JobOffer;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let offer = JobOffer {
///     hourly_rate: Decimal::from_str("35").unwrap(),
///     hours_per_week: Decimal::from_str("36").unwrap(),
///     housing_stipend: Decimal::from_str("2100").unwrap(),
///     meals_stipend: Decimal::from_str("553").unwrap(),
///     travel_reimbursement: Decimal::ZERO,
///     overtime_rate: None,
///     sign_on_bonus: None,
///     completion_bonus: None,
///     referral_bonus: None,
///     contract_weeks: 13,
///     state: None,
/// };
///
/// assert_eq!(offer.weekly_gross(), Decimal::from_str("3913").unwrap());
/// assert_eq!(offer.blended_hourly_rate(), Decimal::from_str("108.69").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOffer {
    /// Taxable hourly wage.
    pub hourly_rate: Decimal,
    /// Contracted hours per week.
    pub hours_per_week: Decimal,
    /// Weekly housing stipend (non-taxable).
    pub housing_stipend: Decimal,
    /// Weekly meals stipend (non-taxable).
    pub meals_stipend: Decimal,
    /// One-time travel reimbursement.
    #[serde(default)]
    pub travel_reimbursement: Decimal,
    /// Hourly rate for overtime hours, if offered.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Sign-on bonus, if offered.
    #[serde(default)]
    pub sign_on_bonus: Option<Decimal>,
    /// Completion bonus, if offered.
    #[serde(default)]
    pub completion_bonus: Option<Decimal>,
    /// Referral bonus, if offered.
    #[serde(default)]
    pub referral_bonus: Option<Decimal>,
    /// Contract length in weeks.
    pub contract_weeks: u32,
    /// Two-letter state code of the assignment, if known.
    #[serde(default)]
    pub state: Option<String>,
}

impl JobOffer {
    /// Weekly taxable pay: `hourly_rate * hours_per_week`.
    pub fn weekly_taxable(&self) -> Decimal {
        self.hourly_rate * self.hours_per_week
    }

    /// Combined weekly stipends: housing plus meals.
    pub fn weekly_stipends(&self) -> Decimal {
        self.housing_stipend + self.meals_stipend
    }

    /// Weekly gross: taxable pay plus stipends.
    pub fn weekly_gross(&self) -> Decimal {
        self.weekly_taxable() + self.weekly_stipends()
    }

    /// Blended hourly rate: weekly gross divided by hours, rounded to cents.
    ///
    /// Zero when `hours_per_week` is zero.
    pub fn blended_hourly_rate(&self) -> Decimal {
        if self.hours_per_week.is_zero() {
            return Decimal::ZERO;
        }
        round_cents(self.weekly_gross() / self.hours_per_week)
    }

    /// Percentage of weekly gross paid as non-taxable stipends, rounded to
    /// two decimal places. Zero when weekly gross is zero.
    pub fn non_taxable_percentage(&self) -> Decimal {
        let gross = self.weekly_gross();
        if gross.is_zero() {
            return Decimal::ZERO;
        }
        round_cents(self.weekly_stipends() * Decimal::ONE_HUNDRED / gross)
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
