//! # ARM condition codes
//!
//! After a flag-setting operation (typically `CMP`), an ARM program picks
//! what to do next with a condition suffix. Listing which suffixes pass is
//! the quickest way to read what a set of flags means:
//!
//! ```text
//! CMP r0, r1          ; r0 = 3, r1 = 5  ->  N=1 Z=0 C=0 V=0
//!
//! passing: NE CC MI VC LS LT LE AL
//! ```
//!
//! | Suffix | Meaning             | Flags Tested   |
//! |--------|---------------------|----------------|
//! | EQ     | Equal               | Z=1            |
//! | NE     | Not equal           | Z=0            |
//! | CS     | Carry set / ≥ (uns) | C=1            |
//! | CC     | Carry clear / < (u) | C=0            |
//! | MI     | Minus / negative    | N=1            |
//! | PL     | Plus / non-negative | N=0            |
//! | VS     | Overflow set        | V=1            |
//! | VC     | Overflow clear      | V=0            |
//! | HI     | Higher (unsigned)   | C=1 AND Z=0    |
//! | LS     | Lower/same (unsig)  | C=0 OR Z=1     |
//! | GE     | ≥ (signed)          | N=V            |
//! | LT     | < (signed)          | N≠V            |
//! | GT     | > (signed)          | Z=0 AND N=V    |
//! | LE     | ≤ (signed)          | Z=1 OR N≠V     |
//! | AL     | Always              | (none)         |
//! | NV     | Never (reserved)    | (none)         |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::flags::FlagSet;

/// A conditional suffix, numbered by its 4-bit encoding. What each one
/// tests is in the table above; the comments below read them after
/// `CMP a, b`.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum Condition {
    /// a == b
    EQ = 0x0,
    /// a != b
    NE = 0x1,
    /// a >= b, unsigned. Also spelled `HS`.
    CS = 0x2,
    /// a < b, unsigned. Also spelled `LO`.
    CC = 0x3,
    MI = 0x4,
    PL = 0x5,
    VS = 0x6,
    VC = 0x7,
    /// a > b, unsigned
    HI = 0x8,
    /// a <= b, unsigned
    LS = 0x9,
    /// a >= b, signed
    GE = 0xA,
    /// a < b, signed
    LT = 0xB,
    /// a > b, signed
    GT = 0xC,
    /// a <= b, signed
    LE = 0xD,
    AL = 0xE,
    /// Passes under no flags.
    NV = 0xF,
}

impl Condition {
    pub const ALL: [Self; 16] = [
        Self::EQ,
        Self::NE,
        Self::CS,
        Self::CC,
        Self::MI,
        Self::PL,
        Self::VS,
        Self::VC,
        Self::HI,
        Self::LS,
        Self::GE,
        Self::LT,
        Self::GT,
        Self::LE,
        Self::AL,
        Self::NV,
    ];
}

impl From<u8> for Condition {
    fn from(item: u8) -> Self {
        Self::ALL[usize::from(item & 0xF)]
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EQ => f.write_str("EQ"),
            Self::NE => f.write_str("NE"),
            Self::CS => f.write_str("CS"),
            Self::CC => f.write_str("CC"),
            Self::MI => f.write_str("MI"),
            Self::PL => f.write_str("PL"),
            Self::VS => f.write_str("VS"),
            Self::VC => f.write_str("VC"),
            Self::HI => f.write_str("HI"),
            Self::LS => f.write_str("LS"),
            Self::GE => f.write_str("GE"),
            Self::LT => f.write_str("LT"),
            Self::GT => f.write_str("GT"),
            Self::LE => f.write_str("LE"),
            Self::AL => f.write_str("AL"),
            Self::NV => f.write_str("NV"),
        }
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HS" => Ok(Self::CS),
            "LO" => Ok(Self::CC),
            upper => Self::ALL
                .into_iter()
                .find(|cond| cond.to_string() == upper)
                .ok_or_else(|| format!("Unknown condition `{s}`")),
        }
    }
}

impl FlagSet {
    /// Whether an instruction with condition `cond` would execute under
    /// these flags.
    #[must_use]
    pub fn satisfies(self, cond: Condition) -> bool {
        use Condition::{AL, CC, CS, EQ, GE, GT, HI, LE, LS, LT, MI, NE, NV, PL, VC, VS};
        match cond {
            EQ => self.zero_flag(),
            NE => !self.zero_flag(),
            CS => self.carry_flag(),
            CC => !self.carry_flag(),
            MI => self.sign_flag(),
            PL => !self.sign_flag(),
            VS => self.overflow_flag(),
            VC => !self.overflow_flag(),
            HI => self.carry_flag() && !self.zero_flag(),
            LS => !self.carry_flag() || self.zero_flag(),
            GE => self.sign_flag() == self.overflow_flag(),
            LT => self.sign_flag() != self.overflow_flag(),
            GT => !self.zero_flag() && (self.sign_flag() == self.overflow_flag()),
            LE => self.zero_flag() || (self.sign_flag() != self.overflow_flag()),
            AL => true,
            NV => false,
        }
    }

    /// All conditions that hold under these flags, in encoding order.
    pub fn passing_conditions(self) -> impl Iterator<Item = Condition> {
        Condition::ALL
            .into_iter()
            .filter(move |cond| self.satisfies(*cond))
    }
}
