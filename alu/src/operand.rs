//! # 32-bit operands
//!
//! Every value handled by the ALU is a 32-bit two's-complement word. The same
//! bit pattern is read in two ways:
//!
//! ```text
//!            bit 31                                bit 0
//!            ┌─┬──────────────────────────────────────┐
//! 0xFFFFFFFF │1│1111111111111111111111111111111111111│  unsigned 4294967295
//!            └─┴──────────────────────────────────────┘  signed          -1
//! ```
//!
//! - **unsigned** (`0..=2^32-1`) for carry arithmetic,
//! - **signed** (`-2^31..=2^31-1`) for the negative/zero tests and overflow.
//!
//! Values coming from a wider domain are reduced modulo 2^32 and the low
//! 32 bits are reinterpreted as signed, exactly like a truncating cast.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Bit 31 of a word: the sign bit when the word is read as signed.
pub const SIGN_BIT: u32 = 1 << 31;

/// A 32-bit ALU operand.
///
/// ```
/// use alu::Operand;
///
/// let op = Operand::from(0xFFFF_FFFF_u32);
/// assert_eq!(op.signed(), -1);
/// assert_eq!(op.unsigned(), u32::MAX);
///
/// // Out of range values wrap modulo 2^32.
/// assert_eq!(Operand::from(0x1_0000_0005_i64).signed(), 5);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operand(i32);

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_possible_wrap)]
impl Operand {
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Reduces an arbitrary integer modulo 2^32 and reinterprets the low
    /// 32 bits as signed.
    #[must_use]
    pub const fn from_wide(value: i128) -> Self {
        Self(value as i32)
    }

    #[must_use]
    pub const fn signed(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn unsigned(self) -> u32 {
        self.0 as u32
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<u32> for Operand {
    #[allow(clippy::cast_possible_wrap)]
    fn from(value: u32) -> Self {
        Self(value as i32)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::from_wide(i128::from(value))
    }
}

impl From<Operand> for i32 {
    fn from(op: Operand) -> Self {
        op.signed()
    }
}

impl From<Operand> for u32 {
    fn from(op: Operand) -> Self {
        op.unsigned()
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
