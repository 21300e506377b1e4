//! Currency rounding helpers.
//!
//! All monetary rounding in the engine is half-away-from-zero, matching
//! how the generated documents round displayed amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole rupees.
pub(crate) fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to paise (two decimal places).
pub(crate) fn round_paise(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
