use std::fmt::Display;

use alu::{Condition, FlagSet, Kind, Operand, OperationKind, Operands, Operation, Outcome, execute};
use chrono::Local;
use serde::Serialize;

use crate::config::Config;
use crate::history::{History, HistoryEntry};
use crate::input::{self, InputBase, InputError};

pub const DEFAULT_A: i32 = 5;
pub const DEFAULT_B: i32 = 7;
pub const DEFAULT_SHIFT_AMOUNT: u32 = 1;

/// Which of the two operand registers an input goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// The state a calculator session keeps between operations.
///
/// The engine in [`alu`] is stateless; this is where the operands, the
/// carry flag fed back into `ADC`/`SBC`/`RSC` and the shifts, and the
/// history live.
#[derive(Debug, Clone)]
pub struct Calculator {
    a: Operand,
    b: Operand,
    shift_amount: u32,
    input_base: InputBase,
    result: i32,
    flags: FlagSet,
    history: History<HistoryEntry>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Serializable view of a [`Calculator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub a: i32,
    pub b: i32,
    pub shift_amount: u32,
    pub carry: bool,
    pub input_base: InputBase,
    pub result: i32,
    pub flags: FlagSet,
}

impl Calculator {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            a: Operand::new(DEFAULT_A),
            b: Operand::new(DEFAULT_B),
            shift_amount: DEFAULT_SHIFT_AMOUNT,
            input_base: config.input_base,
            result: 0,
            flags: FlagSet::default(),
            history: History::new(config.history_capacity),
        }
    }

    #[must_use]
    pub const fn a(&self) -> Operand {
        self.a
    }

    #[must_use]
    pub const fn b(&self) -> Operand {
        self.b
    }

    #[must_use]
    pub const fn shift_amount(&self) -> u32 {
        self.shift_amount
    }

    #[must_use]
    pub const fn input_base(&self) -> InputBase {
        self.input_base
    }

    /// Result of the last operation, including the flag-only ones.
    #[must_use]
    pub const fn result(&self) -> i32 {
        self.result
    }

    #[must_use]
    pub const fn flags(&self) -> FlagSet {
        self.flags
    }

    #[must_use]
    pub fn carry(&self) -> bool {
        self.flags.carry_flag()
    }

    #[must_use]
    pub const fn history(&self) -> &History<HistoryEntry> {
        &self.history
    }

    #[must_use]
    pub fn operands(&self) -> Operands {
        Operands {
            a: self.a,
            b: self.b,
            shift_amount: self.shift_amount,
            carry: self.carry(),
        }
    }

    pub fn set_operand(&mut self, slot: Slot, value: impl Into<Operand>) {
        let value = value.into();
        match slot {
            Slot::A => self.a = value,
            Slot::B => self.b = value,
        }
    }

    /// Parses `text` in the current input base into `slot`.
    ///
    /// # Errors
    ///
    /// The operand is left unchanged and the [`InputError`] returned when
    /// the text doesn't parse.
    pub fn set_operand_text(&mut self, slot: Slot, text: &str) -> Result<Operand, InputError> {
        let value = input::parse_operand(text, self.input_base)?;
        self.set_operand(slot, value);
        tracing::debug!("{slot} <- {value}");
        Ok(value)
    }

    /// # Errors
    ///
    /// See [`input::parse_shift_amount`].
    pub fn set_shift_text(&mut self, text: &str) -> Result<u32, InputError> {
        self.shift_amount = input::parse_shift_amount(text)?;
        Ok(self.shift_amount)
    }

    pub fn set_carry(&mut self, carry: bool) {
        self.flags.set_carry_flag(carry);
    }

    pub fn set_input_base(&mut self, base: InputBase) {
        self.input_base = base;
    }

    /// The text an input field shows for `slot` in the current base.
    #[must_use]
    pub fn operand_text(&self, slot: Slot) -> String {
        let value = match slot {
            Slot::A => self.a,
            Slot::B => self.b,
        };
        input::format_operand(value, self.input_base)
    }

    /// Runs `operation` on the current operands.
    ///
    /// The flags it writes are merged into the session flags, the result
    /// goes to A unless the operation only compares, and a history entry
    /// is recorded and returned.
    pub fn apply(&mut self, operation: Operation) -> HistoryEntry {
        let operands = self.operands();
        let Outcome { result, flags } = execute(operation, &operands);

        self.flags.apply(flags);
        self.result = result;
        if operation.writes_result() {
            self.a = Operand::new(result);
        }

        let entry = HistoryEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            operation,
            input: describe_input(operation, &operands),
            result,
            flags,
        };
        tracing::debug!("{operation} ({}) = {result} [{}]", entry.input, self.flags);

        self.history.push(entry.clone());
        entry
    }

    /// Conditions that would pass with the current flags.
    #[must_use]
    pub fn passing_conditions(&self) -> Vec<Condition> {
        self.flags.passing_conditions().collect()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            a: self.a.signed(),
            b: self.b.signed(),
            shift_amount: self.shift_amount,
            carry: self.carry(),
            input_base: self.input_base,
            result: self.result,
            flags: self.flags,
        }
    }
}

/// `r0=5, r1=7, C=0` for arithmetic, `r0=5, shift=1` for shifts,
/// `r0=5, r1=7` for logical operations and `r0=5` for `MVN`.
fn describe_input(operation: Operation, operands: &Operands) -> String {
    let Operands {
        a,
        b,
        shift_amount,
        carry,
    } = *operands;

    match operation.kind() {
        OperationKind::Logical if operation.is_unary() => format!("r0={a}"),
        OperationKind::Logical => format!("r0={a}, r1={b}"),
        OperationKind::Shift => format!("r0={a}, shift={shift_amount}"),
        OperationKind::Arithmetic | OperationKind::Multiply => {
            format!("r0={a}, r1={b}, C={}", u8::from(carry))
        }
    }
}
