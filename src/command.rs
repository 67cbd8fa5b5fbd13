use std::str::FromStr;

use alu::Operation;
use session::input::parse_carry;
use session::{BitWidth, InputBase, Slot};

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Operand text, parsed later in the session's current base.
    SetOperand(Slot, String),
    SetShift(String),
    SetCarry(bool),
    SetBase(InputBase),
    Run(Operation),
    Flags,
    Conditions,
    State,
    History,
    ClearHistory,
    Register(RegisterCommand),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterCommand {
    Show,
    Set(u64),
    Toggle(u32),
    Width(BitWidth),
    Clear,
}

pub const HELP: &str = "\
a <value>            set operand A (decimal, 0x.., 0b.. or binary, see `base`)
b <value>            set operand B
shift <n>            set the shift amount (clamped to 0..=31)
carry <0|1>          set the carry flag
base <dec|bin>       switch the operand input base
<mnemonic>           run AND ORR EOR BIC MVN TST TEQ LSL LSR ASR ROR
                     ADD ADC SUB SBC RSB RSC CMP CMN MUL on A and B
flags                show N Z C V
cond                 list the condition codes that would pass
state                show operands, carry and flags
history              list executed operations, newest first
clear                clear the history
reg show             show the bit register
reg set <value>      set it (decimal, 0x.. or 0b..)
reg toggle <bit>     flip one bit
reg width <8|16|32|64>
reg clear
help
quit";

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let argument = |name: &str| {
            if rest.is_empty() {
                Err(format!("`{name}` needs an argument"))
            } else {
                Ok(rest.to_string())
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err("empty command".to_string()),
            "a" => Ok(Self::SetOperand(Slot::A, argument("a")?)),
            "b" => Ok(Self::SetOperand(Slot::B, argument("b")?)),
            "shift" => Ok(Self::SetShift(argument("shift")?)),
            "carry" => parse_carry(rest)
                .map(Self::SetCarry)
                .map_err(|e| e.to_string()),
            "base" => rest
                .parse::<InputBase>()
                .map(Self::SetBase)
                .map_err(|e| e.to_string()),
            "flags" => Ok(Self::Flags),
            "cond" | "conditions" => Ok(Self::Conditions),
            "state" => Ok(Self::State),
            "history" => Ok(Self::History),
            "clear" => Ok(Self::ClearHistory),
            "reg" => rest.parse::<RegisterCommand>().map(Self::Register),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => word.parse::<Operation>().map(Self::Run),
        }
    }
}

impl FromStr for RegisterCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let sub = words.next().unwrap_or("show");
        let value = words.next();

        let needs = |what: &str| format!("`reg {sub}` needs {what}");

        match (sub, value) {
            ("show", _) => Ok(Self::Show),
            ("clear", _) => Ok(Self::Clear),
            ("set", Some(v)) => parse_register_value(v).map(Self::Set),
            ("set", None) => Err(needs("a value")),
            ("toggle", Some(v)) => v
                .parse::<u32>()
                .map(Self::Toggle)
                .map_err(|_| format!("`{v}` is not a bit index")),
            ("toggle", None) => Err(needs("a bit index")),
            ("width", Some(v)) => v.parse::<BitWidth>().map(Self::Width),
            ("width", None) => Err(needs("8, 16, 32 or 64")),
            _ => Err(format!("Unknown register command `{sub}`")),
        }
    }
}

/// Decimal, `0x` hex or `0b` binary. Negative decimals are stored as their
/// two's complement.
#[allow(clippy::cast_sign_loss)]
fn parse_register_value(text: &str) -> Result<u64, String> {
    let invalid = |_| format!("`{text}` is not a register value");

    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(&hex.replace('_', ""), 16).map_err(invalid)
    } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        u64::from_str_radix(&bin.replace('_', ""), 2).map_err(invalid)
    } else if text.starts_with('-') {
        text.parse::<i64>().map(|v| v as u64).map_err(invalid)
    } else {
        text.parse::<u64>().map_err(invalid)
    }
}
