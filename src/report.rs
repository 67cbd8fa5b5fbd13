use std::fmt::Display;

use alu::{Condition, FlagSet, Operand};
use serde::Serialize;
use session::input::{bit_row, format_binary, to_hex32};
use session::{BitRegister, BitWidth, Calculator, HistoryEntry, Slot, Snapshot};

/// What a command printed. Shown as text, or as one JSON object per line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Report {
    Operand {
        slot: String,
        value: i32,
        hex: String,
        binary: String,
    },
    Shift {
        amount: u32,
    },
    Carry {
        carry: bool,
    },
    /// A and B re-rendered in the new base.
    Base {
        base: String,
        a: String,
        b: String,
    },
    Executed {
        entry: HistoryEntry,
        /// Session flags after the update.
        flags: FlagSet,
    },
    Flags {
        flags: FlagSet,
        nzcv: u8,
    },
    Conditions {
        passing: Vec<Condition>,
    },
    State(Snapshot),
    History {
        entries: Vec<HistoryEntry>,
    },
    Cleared,
    Register {
        value: u64,
        signed: i64,
        width: u32,
        binary: String,
    },
    Help {
        text: &'static str,
    },
    Error {
        message: String,
    },
}

impl Report {
    pub fn operand(slot: Slot, value: Operand) -> Self {
        Self::Operand {
            slot: slot.to_string(),
            value: value.signed(),
            hex: to_hex32(value),
            binary: format_binary(value),
        }
    }

    pub fn base(calculator: &Calculator) -> Self {
        Self::Base {
            base: calculator.input_base().to_string(),
            a: calculator.operand_text(Slot::A),
            b: calculator.operand_text(Slot::B),
        }
    }

    pub fn flags(calculator: &Calculator) -> Self {
        let flags = calculator.flags();
        Self::Flags {
            flags,
            nzcv: flags.nzcv(),
        }
    }

    pub fn history(calculator: &Calculator) -> Self {
        Self::History {
            entries: calculator.history().iter().cloned().collect(),
        }
    }

    pub fn register(register: &BitRegister) -> Self {
        Self::Register {
            value: register.value(),
            signed: register.signed_value(),
            width: register.width().bits(),
            binary: register.to_binary(),
        }
    }

    pub fn error(message: impl Display) -> Self {
        Self::Error {
            message: message.to_string(),
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operand {
                slot,
                value,
                hex,
                binary,
            } => write!(f, "{slot} = {value} (0x{hex}) {binary}"),
            Self::Shift { amount } => write!(f, "shift = {amount}"),
            Self::Carry { carry } => write!(f, "C = {}", u8::from(*carry)),
            Self::Base { base, a, b } => write!(f, "input base = {base} (A = {a}, B = {b})"),
            Self::Executed { entry, flags } => {
                let result = Operand::new(entry.result);
                writeln!(
                    f,
                    "{} {} = {} (0x{})",
                    entry.operation,
                    entry.input,
                    entry.result,
                    to_hex32(result)
                )?;
                writeln!(f, "  {}", format_binary(result))?;
                write!(f, "  written {}  now {flags}", entry.flags)
            }
            Self::Flags { flags, nzcv } => write!(f, "{flags} (NZCV={nzcv:04b})"),
            Self::Conditions { passing } => {
                let names: Vec<String> = passing.iter().map(ToString::to_string).collect();
                write!(f, "passing: {}", names.join(" "))
            }
            Self::State(snapshot) => write_state(f, snapshot),
            Self::History { entries } if entries.is_empty() => f.write_str("history is empty"),
            Self::History { entries } => {
                let lines: Vec<String> = entries
                    .iter()
                    .map(|e| {
                        format!(
                            "{} {:<4} {:<28} = {:<12} {}",
                            e.time,
                            e.operation.to_string(),
                            e.input,
                            e.result,
                            e.flags
                        )
                    })
                    .collect();
                f.write_str(&lines.join("\n"))
            }
            Self::Cleared => f.write_str("history cleared"),
            Self::Register {
                value,
                signed,
                width,
                binary,
            } => write!(
                f,
                "reg = {value} (signed {signed}, 0x{value:X}) {}\n  {binary}",
                BitWidth::try_from(*width).map_or_else(|e| e, |w| w.to_string())
            ),
            Self::Help { text } => f.write_str(text),
            Self::Error { message } => write!(f, "error: {message}"),
        }
    }
}

fn write_state(f: &mut std::fmt::Formatter<'_>, snapshot: &Snapshot) -> std::fmt::Result {
    let a = Operand::new(snapshot.a);
    let b = Operand::new(snapshot.b);

    writeln!(f, "A = {} (0x{}) [{}]", snapshot.a, to_hex32(a), bit_row(a))?;
    writeln!(f, "B = {} (0x{}) [{}]", snapshot.b, to_hex32(b), bit_row(b))?;
    writeln!(
        f,
        "shift = {}  C = {}  base = {}",
        snapshot.shift_amount,
        u8::from(snapshot.carry),
        snapshot.input_base
    )?;
    write!(f, "result = {}  {}", snapshot.result, snapshot.flags)
}
