use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arithmetic::{self, OperationResult};
use crate::flags::FlagUpdate;
use crate::operand::Operand;
use crate::shift::{ShiftKind, shift};
use crate::{logical, multiply};

/// Every operation the calculator can run on its two scratch operands.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Operation {
    And,
    Orr,
    Eor,
    Bic,
    Mvn,
    Tst,
    Teq,
    Lsl,
    Lsr,
    Asr,
    Ror,
    Add,
    Adc,
    Sub,
    Sbc,
    Rsb,
    Rsc,
    Cmp,
    Cmn,
    Mul,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Orr => f.write_str("ORR"),
            Self::Eor => f.write_str("EOR"),
            Self::Bic => f.write_str("BIC"),
            Self::Mvn => f.write_str("MVN"),
            Self::Tst => f.write_str("TST"),
            Self::Teq => f.write_str("TEQ"),
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Asr => f.write_str("ASR"),
            Self::Ror => f.write_str("ROR"),
            Self::Add => f.write_str("ADD"),
            Self::Adc => f.write_str("ADC"),
            Self::Sub => f.write_str("SUB"),
            Self::Sbc => f.write_str("SBC"),
            Self::Rsb => f.write_str("RSB"),
            Self::Rsc => f.write_str("RSC"),
            Self::Cmp => f.write_str("CMP"),
            Self::Cmn => f.write_str("CMN"),
            Self::Mul => f.write_str("MUL"),
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        match upper.as_str() {
            // the aliases used by the calculator buttons
            "OR" => Ok(Self::Orr),
            "XOR" => Ok(Self::Eor),
            "NOT" => Ok(Self::Mvn),
            _ => Self::ALL
                .into_iter()
                .find(|op| op.to_string() == upper)
                .ok_or_else(|| format!("Unknown operation `{s}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OperationKind {
    Logical,
    Shift,
    Arithmetic,
    Multiply,
}

pub trait Kind {
    fn kind(&self) -> OperationKind;
}

impl Kind for Operation {
    fn kind(&self) -> OperationKind {
        use Operation::*;
        match &self {
            And | Orr | Eor | Bic | Mvn | Tst | Teq => OperationKind::Logical,
            Lsl | Lsr | Asr | Ror => OperationKind::Shift,
            Add | Adc | Sub | Sbc | Rsb | Rsc | Cmp | Cmn => OperationKind::Arithmetic,
            Mul => OperationKind::Multiply,
        }
    }
}

impl Operation {
    pub const ALL: [Self; 20] = [
        Self::And,
        Self::Orr,
        Self::Eor,
        Self::Bic,
        Self::Mvn,
        Self::Tst,
        Self::Teq,
        Self::Lsl,
        Self::Lsr,
        Self::Asr,
        Self::Ror,
        Self::Add,
        Self::Adc,
        Self::Sub,
        Self::Sbc,
        Self::Rsb,
        Self::Rsc,
        Self::Cmp,
        Self::Cmn,
        Self::Mul,
    ];

    /// Operations that read only operand A.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Mvn)
    }

    /// `false` for the comparisons, which only update the flags.
    #[must_use]
    pub const fn writes_result(self) -> bool {
        !matches!(self, Self::Cmp | Self::Cmn | Self::Tst | Self::Teq)
    }

    /// Operations that read the incoming carry flag.
    #[must_use]
    pub const fn uses_carry(self) -> bool {
        matches!(
            self,
            Self::Adc | Self::Sbc | Self::Rsc | Self::Lsl | Self::Lsr | Self::Asr | Self::Ror
        )
    }
}

/// Inputs of a single operation.
///
/// `b` is ignored by unary operations and shifts, `shift_amount` by
/// everything but shifts, `carry` by operations that don't read it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operands {
    pub a: Operand,
    pub b: Operand,
    pub shift_amount: u32,
    pub carry: bool,
}

/// Result of any operation: the 32-bit value and the flags it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub result: i32,
    pub flags: FlagUpdate,
}

impl From<OperationResult> for Outcome {
    fn from(op: OperationResult) -> Self {
        Self {
            result: op.result,
            flags: op.flags.into(),
        }
    }
}

/// Runs `operation` on `operands`.
#[must_use]
pub fn execute(operation: Operation, operands: &Operands) -> Outcome {
    let Operands {
        a,
        b,
        shift_amount,
        carry,
    } = *operands;

    let outcome = match operation {
        Operation::And => logical::and(a, b),
        Operation::Orr => logical::orr(a, b),
        Operation::Eor => logical::eor(a, b),
        Operation::Bic => logical::bic(a, b),
        Operation::Mvn => logical::mvn(a),
        Operation::Tst => logical::tst(a, b),
        Operation::Teq => logical::teq(a, b),
        Operation::Lsl => shift(ShiftKind::Lsl, a, shift_amount, carry),
        Operation::Lsr => shift(ShiftKind::Lsr, a, shift_amount, carry),
        Operation::Asr => shift(ShiftKind::Asr, a, shift_amount, carry),
        Operation::Ror => shift(ShiftKind::Ror, a, shift_amount, carry),
        Operation::Add => arithmetic::add(a, b).into(),
        Operation::Adc => arithmetic::adc(a, b, carry).into(),
        Operation::Sub => arithmetic::sub(a, b).into(),
        Operation::Sbc => arithmetic::sbc(a, b, carry).into(),
        Operation::Rsb => arithmetic::rsb(a, b).into(),
        Operation::Rsc => arithmetic::rsc(a, b, carry).into(),
        Operation::Cmp => arithmetic::cmp(a, b).into(),
        Operation::Cmn => arithmetic::cmn(a, b).into(),
        Operation::Mul => multiply::mul(a, b),
    };

    if operation.uses_carry() {
        tracing::trace!(
            "{operation} a={a} b={b} shift={shift_amount} c={} -> {} [{}]",
            u8::from(carry),
            outcome.result,
            outcome.flags
        );
    } else {
        tracing::trace!(
            "{operation} a={a} b={b} -> {} [{}]",
            outcome.result,
            outcome.flags
        );
    }

    outcome
}
