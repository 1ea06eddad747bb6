//! Currency rounding.
//!
//! Every public calculator rounds its currency outputs with [`round_cents`]
//! before returning. Intermediate values inside a calculator are kept at
//! full precision.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to whole cents, half away from zero.
///
/// # Examples
///
/// ```
/// use ccs_engine::calculation::round_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_cents(Decimal::from_str("107.025").unwrap()), Decimal::from_str("107.03").unwrap());
/// assert_eq!(round_cents(Decimal::from_str("-0.005").unwrap()), Decimal::from_str("-0.01").unwrap());
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
