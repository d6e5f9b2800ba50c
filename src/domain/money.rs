//! Conversions between domain amounts and stored minor units.
//!
//! Amounts are `Decimal` in the domain and integer cents in SQLite.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Decimal places kept for stored amounts
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Exact conversion to cents. `None` when the amount carries sub-cent
/// digits or does not fit in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    if amount.normalize().scale() > MINOR_UNIT_SCALE {
        return None;
    }
    amount.checked_mul(Decimal::ONE_HUNDRED)?.to_i64()
}

pub fn from_minor_units(cents: i64) -> Decimal {
    Decimal::new(cents, MINOR_UNIT_SCALE)
}
