//! # alu
//!
//! A pure, stateless model of a 32-bit ARM ALU for teaching: logical
//! operations, barrel shifts and the flag-setting arithmetic instructions
//! (`ADD`, `ADC`, `SUB`, `SBC`, `RSB`, `RSC`, `CMP`, ...), each returning
//! its result together with the N, Z, C, V condition flags.
//!
//! ```
//! use alu::arithmetic::{add, sbc, sub};
//!
//! let r = add(0x7FFF_FFFF, 1);
//! assert_eq!(r.result, i32::MIN);
//! assert!(r.flags.overflow_flag());
//!
//! // with the carry set SBC borrows nothing
//! assert_eq!(sbc(10, 3, true), sub(10, 3));
//! ```
//!
//! Every function is referentially transparent; nothing here keeps state
//! between calls, so the engine can be shared freely between threads.

pub mod arithmetic;
pub mod bitwise;
pub mod condition;
pub mod flags;
pub mod logical;
pub mod multiply;
pub mod operand;
pub mod operation;
pub mod shift;

pub use arithmetic::OperationResult;
pub use condition::Condition;
pub use flags::{FlagSet, FlagUpdate};
pub use operand::Operand;
pub use operation::{Kind, Operands, Operation, OperationKind, Outcome, execute};
pub use shift::ShiftKind;
