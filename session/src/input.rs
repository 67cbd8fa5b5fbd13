//! Operand text parsing and formatting.
//!
//! Students type operands either in decimal or in binary. Invalid text is
//! rejected here, so the ALU is never called on something unparseable.

use std::fmt::Display;
use std::str::FromStr;

use alu::Operand;
use alu::bitwise::Bits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest shift amount accepted from the input field.
pub const MAX_SHIFT_AMOUNT: u32 = 31;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputBase {
    #[default]
    Dec,
    Bin,
}

impl Display for InputBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dec => f.write_str("dec"),
            Self::Bin => f.write_str("bin"),
        }
    }
}

impl FromStr for InputBase {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dec" | "decimal" | "10" => Ok(Self::Dec),
            "bin" | "binary" | "2" => Ok(Self::Bin),
            _ => Err(InputError::UnknownBase(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty input")]
    Empty,

    #[error("`{0}` is not a number")]
    InvalidDecimal(String),

    #[error("`{0}` is not a binary number (only 0 and 1 are allowed)")]
    InvalidBinary(String),

    #[error("`{0}` is too large")]
    OutOfRange(String),

    #[error("shift amount `{0}` is not a number")]
    InvalidShift(String),

    #[error("carry must be 0 or 1, got `{0}`")]
    InvalidCarry(String),

    #[error("unknown input base `{0}` (expected dec or bin)")]
    UnknownBase(String),

    #[error("bit {index} is outside a {width}-bit value")]
    BitOutOfRange { index: u32, width: u32 },
}

/// Parses operand text written in `base`.
///
/// Decimal values outside the 32-bit range wrap modulo 2^32; binary text
/// keeps its low 32 bits. Whitespace inside binary text is ignored, and an
/// empty binary field reads as 0.
///
/// # Errors
///
/// Returns an [`InputError`] describing why the text was rejected.
pub fn parse_operand(text: &str, base: InputBase) -> Result<Operand, InputError> {
    match base {
        InputBase::Dec => parse_decimal(text).map(Operand::from_wide),
        InputBase::Bin => parse_binary(text).map(Operand::from),
    }
}

/// Parses the text of a decimal field the way a number literal is read:
///
/// - integers with an optional sign: `42`, `-7`, `+3`
/// - `0x`, `0o` and `0b` prefixed integers: `0x7FFFFFFF`, `-0b101`
/// - fractions and exponents, truncated toward zero: `3.9` is 3, `1e3` is
///   1000, `-2.5` is -2
///
/// # Errors
///
/// [`InputError::Empty`], [`InputError::InvalidDecimal`] or
/// [`InputError::OutOfRange`] when the value doesn't fit an `i128`.
pub fn parse_decimal(text: &str) -> Result<i128, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let invalid = || InputError::InvalidDecimal(trimmed.to_string());
    let out_of_range = || InputError::OutOfRange(trimmed.to_string());

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let magnitude = if let Some((radix, digits)) = radix_prefixed(unsigned) {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(invalid());
        }
        i128::from_str_radix(digits, radix).map_err(|_| out_of_range())?
    } else if !unsigned.is_empty() && unsigned.chars().all(|c| c.is_ascii_digit()) {
        // only overflow is left to fail here
        unsigned.parse::<i128>().map_err(|_| out_of_range())?
    } else {
        parse_real(unsigned).ok_or_else(invalid)?.ok_or_else(out_of_range)?
    };

    Ok(if negative { -magnitude } else { magnitude })
}

/// Splits off a `0x`/`0o`/`0b` prefix, either case.
fn radix_prefixed(text: &str) -> Option<(u32, &str)> {
    let prefix = text.get(..2)?;
    let radix = match prefix.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    Some((radix, &text[2..]))
}

/// Unsigned fraction or exponent text truncated toward zero. The outer
/// `None` means the text is not a number, the inner one that it is too
/// large.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::option_option)]
fn parse_real(text: &str) -> Option<Option<i128>> {
    let well_formed = text.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !well_formed {
        return None;
    }

    let value = text.parse::<f64>().ok()?;
    let truncated = value.trunc();

    // every finite f64 below 2^127 is exact as an i128
    Some((truncated.is_finite() && truncated < 2_f64.powi(127)).then(|| truncated as i128))
}

/// Parses binary digits, keeping the low 32 bits.
///
/// # Errors
///
/// [`InputError::InvalidBinary`] if anything but `0`, `1` or whitespace
/// is found.
pub fn parse_binary(text: &str) -> Result<u32, InputError> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .try_fold(0_u32, |acc, c| match c {
            '0' => Ok(acc << 1),
            '1' => Ok((acc << 1) | 1),
            _ => Err(InputError::InvalidBinary(text.trim().to_string())),
        })
}

/// Parses the shift amount, clamping it to `0..=31`. Empty text is 0, and
/// fractions are truncated like in [`parse_decimal`].
///
/// # Errors
///
/// [`InputError::InvalidShift`] when the text is not a number.
pub fn parse_shift_amount(text: &str) -> Result<u32, InputError> {
    let value = match parse_decimal(text) {
        Ok(value) => value,
        Err(InputError::Empty) => 0,
        // too large either way, clamp it below
        Err(InputError::OutOfRange(_)) if !text.trim().starts_with('-') => i128::MAX,
        Err(InputError::OutOfRange(_)) => 0,
        Err(_) => return Err(InputError::InvalidShift(text.trim().to_string())),
    };

    let clamped = value.clamp(0, i128::from(MAX_SHIFT_AMOUNT));
    Ok(u32::try_from(clamped).unwrap_or(MAX_SHIFT_AMOUNT))
}

/// Parses a carry bit, `0` or `1`.
///
/// # Errors
///
/// [`InputError::InvalidCarry`] for anything else.
pub fn parse_carry(text: &str) -> Result<bool, InputError> {
    match text.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(InputError::InvalidCarry(other.to_string())),
    }
}

/// Formats an operand the way it is typed back into an input field:
/// signed decimal, or unsigned binary without padding.
#[must_use]
pub fn format_operand(op: Operand, base: InputBase) -> String {
    match base {
        InputBase::Dec => op.signed().to_string(),
        InputBase::Bin => format!("{:b}", op.unsigned()),
    }
}

/// `0000002A`
#[must_use]
pub fn to_hex32(op: Operand) -> String {
    format!("{:08X}", op.unsigned())
}

/// All 32 bits, most significant first.
#[must_use]
pub fn to_bin32(op: Operand) -> String {
    format!("{:032b}", op.unsigned())
}

/// All 32 bits grouped by nibble: `0000 0000 0000 0000 0000 0000 0010 1010`.
#[must_use]
pub fn format_binary(op: Operand) -> String {
    let bits = to_bin32(op);
    bits.as_bytes()
        .chunks(4)
        .map(|nibble| String::from_utf8_lossy(nibble).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The low byte as 8 binary digits, the row shown under each operand.
#[must_use]
pub fn bit_row(op: Operand) -> String {
    format!("{:08b}", op.unsigned().get_byte(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decimal_operands() {
        assert_eq!(parse_operand("5", InputBase::Dec), Ok(Operand::new(5)));
        assert_eq!(parse_operand("  -42 ", InputBase::Dec), Ok(Operand::new(-42)));
        assert_eq!(parse_operand("+7", InputBase::Dec), Ok(Operand::new(7)));
    }

    #[test]
    fn decimal_out_of_i32_range_wraps() {
        assert_eq!(
            parse_operand("4294967295", InputBase::Dec),
            Ok(Operand::new(-1))
        );
        assert_eq!(
            parse_operand("2147483648", InputBase::Dec),
            Ok(Operand::new(i32::MIN))
        );
    }

    #[test]
    fn decimal_rejections() {
        assert_eq!(parse_operand("", InputBase::Dec), Err(InputError::Empty));
        assert_eq!(parse_operand("   ", InputBase::Dec), Err(InputError::Empty));
        assert_eq!(
            parse_operand("12a", InputBase::Dec),
            Err(InputError::InvalidDecimal("12a".to_string()))
        );
        assert_eq!(
            parse_operand("-", InputBase::Dec),
            Err(InputError::InvalidDecimal("-".to_string()))
        );
        assert!(matches!(
            parse_operand("9".repeat(60).as_str(), InputBase::Dec),
            Err(InputError::OutOfRange(_))
        ));
    }

    #[test]
    fn prefixed_integers() {
        assert_eq!(
            parse_operand("0x7FFFFFFF", InputBase::Dec),
            Ok(Operand::new(i32::MAX))
        );
        assert_eq!(
            parse_operand("0xffffffff", InputBase::Dec),
            Ok(Operand::new(-1))
        );
        assert_eq!(parse_operand("0b101", InputBase::Dec), Ok(Operand::new(5)));
        assert_eq!(parse_operand("0o17", InputBase::Dec), Ok(Operand::new(15)));
        assert_eq!(parse_operand("-0x10", InputBase::Dec), Ok(Operand::new(-16)));
        assert_eq!(
            parse_operand("0x", InputBase::Dec),
            Err(InputError::InvalidDecimal("0x".to_string()))
        );
        assert_eq!(
            parse_operand("0b102", InputBase::Dec),
            Err(InputError::InvalidDecimal("0b102".to_string()))
        );
    }

    #[test]
    fn fractions_truncate_toward_zero() {
        assert_eq!(parse_operand("3.9", InputBase::Dec), Ok(Operand::new(3)));
        assert_eq!(parse_operand("-2.5", InputBase::Dec), Ok(Operand::new(-2)));
        assert_eq!(parse_operand(".5", InputBase::Dec), Ok(Operand::new(0)));
        assert_eq!(parse_operand("1e3", InputBase::Dec), Ok(Operand::new(1000)));
        assert_eq!(parse_operand("2.5E+1", InputBase::Dec), Ok(Operand::new(25)));
        // 2^32 + 1, wrapped
        assert_eq!(
            parse_operand("4294967297.0", InputBase::Dec),
            Ok(Operand::new(1))
        );
    }

    #[test]
    fn malformed_numbers() {
        for text in ["1e", ".", "+-5", "1-2", "inf", "NaN", "1.2.3", "e5"] {
            assert_eq!(
                parse_operand(text, InputBase::Dec),
                Err(InputError::InvalidDecimal(text.to_string())),
                "{text}"
            );
        }
        assert!(matches!(
            parse_operand("1e300", InputBase::Dec),
            Err(InputError::OutOfRange(_))
        ));
    }

    #[test]
    fn binary_operands() {
        assert_eq!(parse_operand("101", InputBase::Bin), Ok(Operand::new(5)));
        assert_eq!(
            parse_operand("1000 0000 0000 0000 0000 0000 0000 0000", InputBase::Bin),
            Ok(Operand::new(i32::MIN))
        );
        assert_eq!(parse_operand("", InputBase::Bin), Ok(Operand::new(0)));
    }

    #[test]
    fn binary_keeps_low_32_bits() {
        // 33 ones
        assert_eq!(
            parse_operand(&"1".repeat(33), InputBase::Bin),
            Ok(Operand::new(-1))
        );
        assert_eq!(
            parse_operand(&format!("1{}", "0".repeat(32)), InputBase::Bin),
            Ok(Operand::new(0))
        );
    }

    #[test]
    fn binary_rejects_other_digits() {
        assert_eq!(
            parse_operand("1021", InputBase::Bin),
            Err(InputError::InvalidBinary("1021".to_string()))
        );
    }

    #[test]
    fn shift_amount_is_clamped() {
        assert_eq!(parse_shift_amount("4"), Ok(4));
        assert_eq!(parse_shift_amount("-3"), Ok(0));
        assert_eq!(parse_shift_amount("99"), Ok(31));
        assert_eq!(parse_shift_amount(""), Ok(0));
        assert_eq!(parse_shift_amount("  "), Ok(0));
        assert_eq!(parse_shift_amount("2.7"), Ok(2));
        assert_eq!(parse_shift_amount("0x1F"), Ok(31));
        assert_eq!(parse_shift_amount("1e300"), Ok(31));
        assert_eq!(parse_shift_amount("-1e300"), Ok(0));
        assert_eq!(
            parse_shift_amount("two"),
            Err(InputError::InvalidShift("two".to_string()))
        );
    }

    #[test]
    fn carry_bit() {
        assert_eq!(parse_carry("1"), Ok(true));
        assert_eq!(parse_carry(" 0"), Ok(false));
        assert!(parse_carry("2").is_err());
    }

    #[test]
    fn base_names() {
        assert_eq!("BIN".parse::<InputBase>(), Ok(InputBase::Bin));
        assert_eq!("decimal".parse::<InputBase>(), Ok(InputBase::Dec));
        assert!("hex".parse::<InputBase>().is_err());
    }

    #[test]
    fn formatting() {
        let op = Operand::new(42);
        assert_eq!(format_operand(op, InputBase::Dec), "42");
        assert_eq!(format_operand(op, InputBase::Bin), "101010");
        assert_eq!(format_operand(Operand::new(-1), InputBase::Bin), "1".repeat(32));
        assert_eq!(to_hex32(op), "0000002A");
        assert_eq!(to_hex32(Operand::new(-1)), "FFFFFFFF");
        assert_eq!(
            format_binary(op),
            "0000 0000 0000 0000 0000 0000 0010 1010"
        );
        assert_eq!(bit_row(Operand::new(-2)), "11111110");
    }

    #[test]
    fn text_survives_a_base_switch() {
        for _ in 0..200 {
            let op = Operand::new(rand::random::<i32>());
            for base in [InputBase::Dec, InputBase::Bin] {
                assert_eq!(parse_operand(&format_operand(op, base), base), Ok(op));
            }
        }
    }
}
