//! # Barrel shifter
//!
//! ```text
//! LSL #n   ← zeros enter from the right      (multiply by 2^n)
//! LSR #n   → zeros enter from the left       (unsigned divide by 2^n)
//! ASR #n   → the sign bit is copied in       (signed divide by 2^n)
//! ROR #n   ↻ bits leaving the right re-enter from the left
//! ```
//!
//! The carry flag receives the last bit shifted out. Amounts follow the
//! register-specified shift rules: a shift by 0 leaves both the value and
//! the carry untouched, and amounts of 32 or more are well defined.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::flags::FlagUpdate;
use crate::operand::Operand;
use crate::operation::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftKind {
    Lsl,
    Lsr,
    Asr,
    Ror,
}

impl Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Asr => f.write_str("ASR"),
            Self::Ror => f.write_str("ROR"),
        }
    }
}

impl FromStr for ShiftKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lsl" => Ok(Self::Lsl),
            "lsr" => Ok(Self::Lsr),
            "asr" => Ok(Self::Asr),
            "ror" => Ok(Self::Ror),
            _ => Err(format!("Unknown shift `{s}`")),
        }
    }
}

/// Shifts `rm` by `shift_amount`, returning the shifted value and the
/// shifter carry-out.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_possible_wrap)]
#[allow(clippy::cast_sign_loss)]
pub fn barrel_shift(kind: ShiftKind, rm: u32, shift_amount: u32, carry: bool) -> (u32, bool) {
    // A shift by 0 is no shift at all, the C flag is NOT affected.
    if shift_amount == 0 {
        return (rm, carry);
    }

    match kind {
        ShiftKind::Lsl => match shift_amount {
            1..=31 => (rm << shift_amount, rm.get_bit((32 - shift_amount) as u8)),
            // LSL#32: result is 0, carry is bit 0
            32 => (0, rm.get_bit(0)),
            // LSL#33...: result is 0 and carry is 0
            _ => (0, false),
        },
        ShiftKind::Lsr => match shift_amount {
            1..=31 => (rm >> shift_amount, rm.get_bit((shift_amount - 1) as u8)),
            32 => (0, rm.get_bit(31)),
            _ => (0, false),
        },
        ShiftKind::Asr => match shift_amount {
            1..=31 => (
                ((rm as i32) >> shift_amount) as u32,
                rm.get_bit((shift_amount - 1) as u8),
            ),
            // ASR#32...: every bit becomes a copy of the sign bit
            _ => (((rm as i32) >> 31) as u32, rm.get_bit(31)),
        },
        ShiftKind::Ror => match shift_amount % 32 {
            // ROR by a multiple of 32 keeps the value, carry is bit 31
            0 => (rm, rm.get_bit(31)),
            rotation => (
                rm.rotate_right(rotation),
                rm.get_bit((rotation - 1) as u8),
            ),
        },
    }
}

/// Flag-setting shift (`LSLS`, `LSRS`, `ASRS`, `RORS`): writes N, Z and C,
/// V is unchanged.
#[must_use]
pub fn shift(
    kind: ShiftKind,
    value: impl Into<Operand>,
    shift_amount: u32,
    carry: bool,
) -> Outcome {
    let (result, carry) = barrel_shift(kind, value.into().unsigned(), shift_amount, carry);
    let result = Operand::from(result).signed();

    Outcome {
        result,
        flags: FlagUpdate::from_result(result).with_carry(carry),
    }
}
