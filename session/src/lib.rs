//! Caller-side state around the [`alu`] engine: operand text parsing, a
//! calculator session with its flags and history, and a width-masked bit
//! register.
//!
//! ```
//! use alu::Operation;
//! use session::{Calculator, Slot};
//!
//! let mut calc = Calculator::default();
//! calc.set_operand_text(Slot::A, "-1").unwrap();
//! calc.set_operand_text(Slot::B, "1").unwrap();
//!
//! calc.apply(Operation::Add);
//! assert!(calc.carry());
//! assert_eq!(calc.a().signed(), 0);
//! ```

pub mod calculator;
pub mod config;
pub mod history;
pub mod input;
pub mod register;

pub use calculator::{Calculator, Slot, Snapshot};
pub use config::Config;
pub use history::{History, HistoryEntry};
pub use input::{InputBase, InputError};
pub use register::{BitRegister, BitWidth, RegisterUpdate};
