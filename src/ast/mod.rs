//! An abstract syntax tree representation of disassembled code

mod directive;
mod instr;
mod label;
mod literal;
mod operand;
mod section;

pub use directive::Directive;
pub use instr::Instruction;
pub use label::Label;
pub use literal::Literal;
pub use operand::Operand;
pub use section::Section;
