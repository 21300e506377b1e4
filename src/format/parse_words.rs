//! Best-effort parsing of Indian-number-words strings back into numbers.
//!
//! Used to redisplay a previously generated "amount in words" string as a
//! number. The recognized word set is {zero..nineteen, twenty..ninety,
//! hundred, thousand, lakh, million, billion} plus "point" for fractional
//! digits; "and" is ignored. "crore" is deliberately not recognized, so
//! amounts of one crore and above do not round-trip through
//! [`to_words`](crate::format::to_words).

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Parses an Indian-number-words string into a numeric value.
///
/// Accumulation follows the usual rule: "hundred" multiplies the running
/// group, larger scale words flush `max(group, 1) * multiplier` into the
/// total. Parsing is case-insensitive and tolerates commas and periods.
///
/// # Errors
///
/// Returns `InvalidInput` for empty input, unrecognized words (including
/// "crore"), or a non-digit word after "point"; `Calculation` on overflow.
///
/// # Examples
///
/// ```
/// use salary_engine::format::parse_words;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(parse_words("One Lakh Fifty Thousand").unwrap(), Decimal::from(150_000));
/// assert_eq!(parse_words("One Hundred and Five").unwrap(), Decimal::from(105));
/// assert_eq!(
///     parse_words("Six Point Five").unwrap(),
///     Decimal::from_str("6.5").unwrap()
/// );
/// ```
pub fn parse_words(text: &str) -> EngineResult<Decimal> {
    let lowered = text.to_lowercase();
    let mut tokens = lowered
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| c == ',' || c == '.'))
        .filter(|t| !t.is_empty());

    let mut total: u64 = 0;
    let mut group: u64 = 0;
    let mut saw_word = false;
    let mut fraction = Decimal::ZERO;

    while let Some(token) = tokens.next() {
        if token == "and" {
            continue;
        }
        if token == "point" {
            fraction = parse_fraction(&mut tokens)?;
            saw_word = true;
            break;
        }

        saw_word = true;
        if let Some(value) = small_word_value(token) {
            group = checked(group.checked_add(value))?;
        } else if token == "hundred" {
            group = checked(group.max(1).checked_mul(100))?;
        } else if let Some(multiplier) = scale_multiplier(token) {
            let flushed = checked(group.max(1).checked_mul(multiplier))?;
            total = checked(total.checked_add(flushed))?;
            group = 0;
        } else {
            return Err(EngineError::InvalidInput {
                field: "text".to_string(),
                message: format!("unrecognized word '{}'", token),
            });
        }
    }

    if !saw_word {
        return Err(EngineError::InvalidInput {
            field: "text".to_string(),
            message: "no number words found".to_string(),
        });
    }

    total = checked(total.checked_add(group))?;
    Ok(Decimal::from(total) + fraction)
}

/// Parses the digit-by-digit fraction following "point".
fn parse_fraction<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> EngineResult<Decimal> {
    let mut digits = String::from("0.");
    let mut any = false;
    for token in tokens {
        let digit = small_word_value(token)
            .filter(|v| *v <= 9)
            .ok_or_else(|| EngineError::InvalidInput {
                field: "text".to_string(),
                message: format!("expected a digit word after 'point', got '{}'", token),
            })?;
        digits.push((b'0' + digit as u8) as char);
        any = true;
    }
    if !any {
        return Err(EngineError::InvalidInput {
            field: "text".to_string(),
            message: "'point' must be followed by digit words".to_string(),
        });
    }
    Decimal::from_str(&digits).map_err(|e| EngineError::Calculation {
        message: format!("fraction out of range: {}", e),
    })
}

fn small_word_value(token: &str) -> Option<u64> {
    let value = match token {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

fn scale_multiplier(token: &str) -> Option<u64> {
    let multiplier = match token {
        "thousand" => 1_000,
        "lakh" | "lakhs" => 100_000,
        "million" => 1_000_000,
        "billion" => 1_000_000_000,
        _ => return None,
    };
    Some(multiplier)
}

fn checked(value: Option<u64>) -> EngineResult<u64> {
    value.ok_or_else(|| EngineError::Calculation {
        message: "parsed amount overflows".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> Decimal {
        parse_words(text).unwrap()
    }

    /// WP-001: representative round-trip values
    #[test]
    fn test_round_trip_values() {
        use crate::format::to_words;

        for n in [0u64, 1, 19, 20, 99, 100, 105, 1_000, 100_000, 1_234_567] {
            let words = to_words(Decimal::from(n)).unwrap();
            assert_eq!(parsed(&words), Decimal::from(n), "words: {}", words);
        }
    }

    /// WP-002: scale words multiply the preceding group
    #[test]
    fn test_scale_words() {
        assert_eq!(parsed("One Lakh Fifty Thousand"), Decimal::from(150_000));
        assert_eq!(parsed("Three Million"), Decimal::from(3_000_000));
        assert_eq!(parsed("One Billion"), Decimal::from(1_000_000_000));
    }

    /// WP-003: a bare scale word means one of that scale
    #[test]
    fn test_bare_scale_word() {
        assert_eq!(parsed("Lakh"), Decimal::from(100_000));
        assert_eq!(parsed("Hundred"), Decimal::from(100));
    }

    /// WP-004: "and" is ignored, case does not matter
    #[test]
    fn test_and_and_case_insensitivity() {
        assert_eq!(parsed("one hundred AND five"), Decimal::from(105));
        assert_eq!(parsed("ONE LAKH"), Decimal::from(100_000));
    }

    /// WP-005: fraction digits after "point"
    #[test]
    fn test_point_fraction() {
        assert_eq!(parsed("Six Point Five"), Decimal::from_str("6.5").unwrap());
        assert_eq!(
            parsed("Four Point Two Five"),
            Decimal::from_str("4.25").unwrap()
        );
        assert_eq!(
            parsed("Zero Point Zero Five"),
            Decimal::from_str("0.05").unwrap()
        );
    }

    /// WP-006: "crore" is not recognized (documented divergence from
    /// to_words, which does emit it)
    #[test]
    fn test_crore_not_recognized() {
        use crate::format::to_words;

        let words = to_words(Decimal::from(10_000_000)).unwrap();
        assert_eq!(words, "One Crore");
        match parse_words(&words).unwrap_err() {
            EngineError::InvalidInput { message, .. } => {
                assert!(message.contains("crore"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    /// WP-007: empty and junk input rejected
    #[test]
    fn test_empty_and_junk_rejected() {
        assert!(parse_words("").is_err());
        assert!(parse_words("   ").is_err());
        assert!(parse_words("hello world").is_err());
    }

    /// WP-008: non-digit word after "point" rejected
    #[test]
    fn test_point_requires_digit_words() {
        assert!(parse_words("Six Point Twenty").is_err());
        assert!(parse_words("Six Point").is_err());
    }

    /// WP-009: "zero" parses to zero
    #[test]
    fn test_zero() {
        assert_eq!(parsed("Zero"), Decimal::ZERO);
    }

    /// WP-010: punctuation tolerated
    #[test]
    fn test_punctuation_tolerated() {
        assert_eq!(
            parsed("One Lakh, Fifty Thousand."),
            Decimal::from(150_000)
        );
    }
}
