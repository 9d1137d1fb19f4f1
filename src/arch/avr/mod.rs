//! The 8-bit AVR microcontroller family
//!
//! Program memory is a flat space of 16-bit words. Most instructions take a
//! single word; `call`, `jmp`, `lds`, and `sts` have 32-bit forms that take an
//! extra word for their address operand.

mod dis;
mod instr;
mod types;

pub use instr::Instruction;
pub use types::*;
