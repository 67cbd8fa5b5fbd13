//! Bitwise logical operations. They only ever write N and Z.

use crate::flags::FlagUpdate;
use crate::operand::Operand;
use crate::operation::Outcome;

fn logical(result: u32) -> Outcome {
    let result = Operand::from(result).signed();

    Outcome {
        result,
        flags: FlagUpdate::from_result(result),
    }
}

/// `a AND b`
#[must_use]
pub fn and(a: impl Into<Operand>, b: impl Into<Operand>) -> Outcome {
    logical(a.into().unsigned() & b.into().unsigned())
}

/// `a OR b`
#[must_use]
pub fn orr(a: impl Into<Operand>, b: impl Into<Operand>) -> Outcome {
    logical(a.into().unsigned() | b.into().unsigned())
}

/// `a XOR b`
#[must_use]
pub fn eor(a: impl Into<Operand>, b: impl Into<Operand>) -> Outcome {
    logical(a.into().unsigned() ^ b.into().unsigned())
}

/// Bit clear: `a AND NOT b`
#[must_use]
pub fn bic(a: impl Into<Operand>, b: impl Into<Operand>) -> Outcome {
    logical(a.into().unsigned() & !b.into().unsigned())
}

/// `NOT a`
#[must_use]
pub fn mvn(a: impl Into<Operand>) -> Outcome {
    logical(!a.into().unsigned())
}

/// Flags of `a AND b` (test bits).
#[must_use]
pub fn tst(a: impl Into<Operand>, b: impl Into<Operand>) -> Outcome {
    and(a, b)
}

/// Flags of `a XOR b` (test equivalence).
#[must_use]
pub fn teq(a: impl Into<Operand>, b: impl Into<Operand>) -> Outcome {
    eor(a, b)
}
