//! Indian digit-grouping currency formatting.
//!
//! Amounts are rounded to whole rupees and grouped in the lakh/crore
//! convention: the last three digits form one group, the remaining digits
//! are grouped in pairs from the right.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with Indian digit grouping and a fixed ".00" suffix.
///
/// Sub-rupee precision is rounded away (half away from zero) before
/// grouping; payroll amounts in the generated documents are whole rupees,
/// so the ".00" suffix is literal.
///
/// # Examples
///
/// ```
/// use salary_engine::format::format_inr;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_inr(Decimal::from(999)), "999.00");
/// assert_eq!(format_inr(Decimal::from(1000)), "1,000.00");
/// assert_eq!(format_inr(Decimal::from(100_000)), "1,00,000.00");
/// assert_eq!(format_inr(Decimal::from(1_234_567)), "12,34,567.00");
/// ```
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = match rounded.abs().to_u128() {
        Some(units) => units.to_string(),
        // out of u128 range; fall back to the plain decimal rendering
        None => return format!("{}.00", rounded),
    };
    format!("{}{}.00", sign, group_indian(&digits))
}

/// Groups a digit string as last-3, then pairs from the right.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = vec![tail.to_string()];
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair.to_string());
        head = rest;
    }
    if !head.is_empty() {
        groups.push(head.to_string());
    }
    groups.reverse();
    groups.join(",")
}
