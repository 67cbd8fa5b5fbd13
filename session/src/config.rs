use std::path::PathBuf;

use clap::Parser;

use crate::input::InputBase;
use crate::register::BitWidth;

/// Rows kept by the operation history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 40;

/// Largest `--history` accepted.
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Start-up settings of a calculator session.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "armcalc",
    version,
    about = "32-bit ARM logical, shift and flag-setting arithmetic calculator"
)]
pub struct Config {
    /// Base operands are typed in (dec or bin).
    #[arg(long = "base", value_name = "BASE", default_value = "dec")]
    pub input_base: InputBase,

    /// Executed operations kept in the history.
    #[arg(
        long = "history",
        value_name = "N",
        default_value_t = DEFAULT_HISTORY_CAPACITY,
        value_parser = parse_history_capacity
    )]
    pub history_capacity: usize,

    /// Width of the bit register (8, 16, 32 or 64).
    #[arg(long = "width", value_name = "BITS", default_value = "64")]
    pub register_width: BitWidth,

    /// Print one JSON object per line instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_base: InputBase::Dec,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            register_width: BitWidth::W64,
            json: false,
            log_file: None,
        }
    }
}

fn parse_history_capacity(text: &str) -> Result<usize, String> {
    let capacity: usize = text
        .parse()
        .map_err(|_| format!("`{text}` is not a row count"))?;

    if capacity > MAX_HISTORY_CAPACITY {
        return Err(format!("at most {MAX_HISTORY_CAPACITY} rows can be kept"));
    }
    Ok(capacity)
}
