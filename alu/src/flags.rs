//! # Condition flags (N, Z, C, V)
//!
//! The flags are laid out the way the ARM CPSR stores them, so that the
//! packed word can be shown to students as-is:
//!
//! ```text
//! 31 30 29 28 27                         0
//! ┌──┬──┬──┬──┬────────────────────────────┐
//! │N │Z │C │V │          (unused)          │
//! └──┴──┴──┴──┴────────────────────────────┘
//! ```
//!
//! | Flag | Bit | Name     | Set When                                   |
//! |------|-----|----------|--------------------------------------------|
//! | N    | 31  | Negative | Result has bit 31 set (is negative)        |
//! | Z    | 30  | Zero     | Result is zero                             |
//! | C    | 29  | Carry    | Addition carried out, or subtraction didn't borrow |
//! | V    | 28  | Overflow | Signed arithmetic overflowed               |

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;

const SIGN_FLAG_BIT: u8 = 31;
const ZERO_FLAG_BIT: u8 = 30;
const CARRY_FLAG_BIT: u8 = 29;
const OVERFLOW_FLAG_BIT: u8 = 28;

/// A complete set of the four condition flags.
///
/// ```
/// use alu::FlagSet;
///
/// let flags = FlagSet::from_result(0, true, false);
/// assert!(flags.zero_flag());
/// assert!(flags.carry_flag());
/// assert_eq!(u32::from(flags), 0x6000_0000);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FlagBits", into = "FlagBits")]
pub struct FlagSet(u32);

impl FlagSet {
    /// Packs the flags of an ALU result: N and Z come from the result,
    /// C and V from the adder.
    #[must_use]
    pub fn from_result(result: i32, carry: bool, overflow: bool) -> Self {
        let mut flags = Self::default();
        flags.set_sign_flag(result < 0);
        flags.set_zero_flag(result == 0);
        flags.set_carry_flag(carry);
        flags.set_overflow_flag(overflow);
        flags
    }

    /// N => Bit 31, (0=Not Signed, 1=Signed)
    #[must_use]
    pub fn sign_flag(self) -> bool {
        self.0.get_bit(SIGN_FLAG_BIT)
    }

    /// Z => Bit 30, (0=Not Zero, 1=Zero)
    #[must_use]
    pub fn zero_flag(self) -> bool {
        self.0.get_bit(ZERO_FLAG_BIT)
    }

    /// C => Bit 29, (0=Borrow/No Carry, 1=Carry/No Borrow)
    #[must_use]
    pub fn carry_flag(self) -> bool {
        self.0.get_bit(CARRY_FLAG_BIT)
    }

    /// V => Bit 28, (0=No Overflow, 1=Overflow)
    #[must_use]
    pub fn overflow_flag(self) -> bool {
        self.0.get_bit(OVERFLOW_FLAG_BIT)
    }

    pub fn set_sign_flag(&mut self, value: bool) {
        self.0.set_bit(SIGN_FLAG_BIT, value);
    }

    pub fn set_zero_flag(&mut self, value: bool) {
        self.0.set_bit(ZERO_FLAG_BIT, value);
    }

    pub fn set_carry_flag(&mut self, value: bool) {
        self.0.set_bit(CARRY_FLAG_BIT, value);
    }

    pub fn set_overflow_flag(&mut self, value: bool) {
        self.0.set_bit(OVERFLOW_FLAG_BIT, value);
    }

    /// Writes the flags produced by an operation, keeping C and V
    /// when the operation leaves them alone.
    pub fn apply(&mut self, update: FlagUpdate) {
        self.set_sign_flag(update.sign);
        self.set_zero_flag(update.zero);
        if let Some(carry) = update.carry {
            self.set_carry_flag(carry);
        }
        if let Some(overflow) = update.overflow {
            self.set_overflow_flag(overflow);
        }
    }

    /// The flags as a `NZCV` nibble.
    #[must_use]
    pub fn nzcv(self) -> u8 {
        self.0.get_byte(3) >> 4
    }
}

impl From<FlagSet> for u32 {
    fn from(flags: FlagSet) -> Self {
        flags.0
    }
}

impl Display for FlagSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "N={} Z={} C={} V={}",
            u8::from(self.sign_flag()),
            u8::from(self.zero_flag()),
            u8::from(self.carry_flag()),
            u8::from(self.overflow_flag())
        )
    }
}

/// Serialized shape of a [`FlagSet`]: one `0`/`1` field per flag.
#[derive(Clone, Copy, Serialize, Deserialize)]
struct FlagBits {
    #[serde(rename = "N")]
    n: u8,
    #[serde(rename = "Z")]
    z: u8,
    #[serde(rename = "C")]
    c: u8,
    #[serde(rename = "V")]
    v: u8,
}

impl From<FlagSet> for FlagBits {
    fn from(flags: FlagSet) -> Self {
        Self {
            n: flags.sign_flag().into(),
            z: flags.zero_flag().into(),
            c: flags.carry_flag().into(),
            v: flags.overflow_flag().into(),
        }
    }
}

impl From<FlagBits> for FlagSet {
    fn from(bits: FlagBits) -> Self {
        let mut flags = Self::default();
        flags.set_sign_flag(bits.n != 0);
        flags.set_zero_flag(bits.z != 0);
        flags.set_carry_flag(bits.c != 0);
        flags.set_overflow_flag(bits.v != 0);
        flags
    }
}

/// Flags written by a single operation.
///
/// N and Z are always written. Logical operations and MUL leave C and V
/// untouched (`None`), shifts leave V untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagUpdate {
    #[serde(rename = "N")]
    pub sign: bool,
    #[serde(rename = "Z")]
    pub zero: bool,
    #[serde(rename = "C", skip_serializing_if = "Option::is_none", default)]
    pub carry: Option<bool>,
    #[serde(rename = "V", skip_serializing_if = "Option::is_none", default)]
    pub overflow: Option<bool>,
}

impl FlagUpdate {
    /// N and Z of `result`, C and V unchanged.
    #[must_use]
    pub const fn from_result(result: i32) -> Self {
        Self {
            sign: result < 0,
            zero: result == 0,
            carry: None,
            overflow: None,
        }
    }

    #[must_use]
    pub const fn with_carry(mut self, carry: bool) -> Self {
        self.carry = Some(carry);
        self
    }

    #[must_use]
    pub const fn with_overflow(mut self, overflow: bool) -> Self {
        self.overflow = Some(overflow);
        self
    }
}

impl From<FlagSet> for FlagUpdate {
    fn from(flags: FlagSet) -> Self {
        Self {
            sign: flags.sign_flag(),
            zero: flags.zero_flag(),
            carry: Some(flags.carry_flag()),
            overflow: Some(flags.overflow_flag()),
        }
    }
}

impl Display for FlagUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bit = |value: Option<bool>| value.map_or("-", |v| if v { "1" } else { "0" });

        write!(
            f,
            "N={} Z={} C={} V={}",
            bit(Some(self.sign)),
            bit(Some(self.zero)),
            bit(self.carry),
            bit(self.overflow)
        )
    }
}
