//! Number-to-words conversion in the Indian numbering system.
//!
//! Amounts are verbalized using the crore/lakh/thousand scales, with a
//! "Point" suffix speaking any fractional digits individually.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const DIGITS: [&str; 10] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

/// Converts a non-negative amount into Indian-numbering-system words.
///
/// The integer part is grouped as crore (10^7), lakh (10^5), thousand,
/// hundred, and tens/units; non-zero segments are joined with their scale
/// word, and a trailing sub-hundred remainder is prefixed with "and" when
/// any segment precedes it. A fractional part is rendered as "Point"
/// followed by each digit spoken individually.
///
/// # Errors
///
/// Returns `InvalidInput` for negative amounts and `Calculation` for
/// amounts too large to verbalize.
///
/// # Examples
///
/// ```
/// use salary_engine::format::to_words;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(to_words(Decimal::from(100_000)).unwrap(), "One Lakh");
/// assert_eq!(to_words(Decimal::from(105)).unwrap(), "One Hundred and Five");
/// assert_eq!(
///     to_words(Decimal::from_str("6.5").unwrap()).unwrap(),
///     "Six Point Five"
/// );
/// ```
pub fn to_words(amount: Decimal) -> EngineResult<String> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(EngineError::InvalidInput {
            field: "amount".to_string(),
            message: "cannot verbalize a negative amount".to_string(),
        });
    }

    let integer_part = amount
        .trunc()
        .to_u128()
        .ok_or_else(|| EngineError::Calculation {
            message: format!("amount {} too large to verbalize", amount),
        })?;

    let mut words = if integer_part == 0 {
        "Zero".to_string()
    } else {
        integer_words(integer_part)
    };

    if !amount.fract().is_zero() {
        words.push_str(" Point");
        for digit in fraction_digits(amount) {
            words.push(' ');
            words.push_str(DIGITS[digit as usize]);
        }
    }

    Ok(words)
}

/// Renders a positive integer in the crore/lakh/thousand grouping.
fn integer_words(n: u128) -> String {
    let mut parts: Vec<String> = Vec::new();

    let crore = n / 10_000_000;
    let mut rem = n % 10_000_000;
    if crore > 0 {
        parts.push(format!("{} Crore", integer_words(crore)));
    }

    let lakh = rem / 100_000;
    rem %= 100_000;
    if lakh > 0 {
        parts.push(format!("{} Lakh", two_digit_words(lakh as u32)));
    }

    let thousand = rem / 1_000;
    rem %= 1_000;
    if thousand > 0 {
        parts.push(format!("{} Thousand", two_digit_words(thousand as u32)));
    }

    let hundred = rem / 100;
    rem %= 100;
    if hundred > 0 {
        parts.push(format!("{} Hundred", ONES[hundred as usize]));
    }

    if rem > 0 {
        let tail = two_digit_words(rem as u32);
        if parts.is_empty() {
            parts.push(tail);
        } else {
            parts.push(format!("and {}", tail));
        }
    }

    parts.join(" ")
}

/// Renders 1..=99 in words.
fn two_digit_words(n: u32) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

/// The fractional digits of an amount, most significant first.
fn fraction_digits(amount: Decimal) -> Vec<u8> {
    let text = amount.normalize().to_string();
    match text.split_once('.') {
        Some((_, fraction)) => fraction
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect(),
        None => Vec::new(),
    }
}
