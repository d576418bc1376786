//! Shared numeric helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a dollar amount to cents, with midpoints rounding away from zero.
///
/// This is the rounding used for every published tax component; intermediate
/// arithmetic stays exact.
///
/// # Example
///
/// ```
/// use traveltax_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = Decimal::from_str("1339.075").unwrap();
/// assert_eq!(round_half_up(value), Decimal::from_str("1339.08").unwrap());
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Splits an annual amount into four installments that sum exactly to it.
///
/// The first three installments are the quarter rounded down to cents and
/// the fourth absorbs the remainder. Rounding down keeps every installment
/// non-negative for a non-negative total; rounding the quarter up could push
/// three installments past a sub-dime total and drive the fourth negative.
pub(crate) fn quarter_split(annual: Decimal) -> [Decimal; 4] {
    let quarter = (annual / Decimal::from(4)).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    [quarter, quarter, quarter, annual - quarter * Decimal::from(3)]
}
