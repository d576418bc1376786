//! Standard mileage deduction.

use rust_decimal::Decimal;

use crate::config::TaxConfig;
use crate::error::{EngineError, EngineResult};

use super::common::round_half_up;

/// Calculates the standard mileage deduction for business miles.
///
/// Uses the IRS standard mileage rate for the year from `limits.yaml`;
/// negative miles clamp to zero.
///
/// # Errors
///
/// Returns `MileageRateNotFound` for a year outside the configured table.
pub fn mileage_deduction(miles: Decimal, year: i32, config: &TaxConfig) -> EngineResult<Decimal> {
    let rate = config
        .mileage_rate(year)
        .ok_or(EngineError::MileageRateNotFound { year })?;

    Ok(round_half_up(miles.max(Decimal::ZERO) * rate))
}
