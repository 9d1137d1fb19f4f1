//! Assembler directives for the AST

use crate::ast::{Instruction, Label};
use crate::memory::Word;

/// Represents a particular assembler directive.
///
/// An assembler directive consists of a particular command to the assembler
/// that either:
///
/// 1. Generates data, such as an instruction mnemonic or raw data word
/// 2. Moves the assembled code's location around
/// 3. Creates new labels in the generated assembly
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Generate an instruction, along with the words it was decoded from.
    EmitInstr(Instruction, Vec<Word>),

    /// Generate a raw data word.
    EmitData(u16),

    /// Declare a new label.
    DeclareLabel(Label),

    /// Declare the word address of future instructions.
    DeclareOrg(u32),
}

impl Directive {
    /// How many words of program memory this directive occupies.
    pub fn size(&self) -> u32 {
        match self {
            Directive::EmitInstr(_, words) => words.len() as u32,
            Directive::EmitData(_) => 1,
            Directive::DeclareLabel(_) | Directive::DeclareOrg(_) => 0,
        }
    }

    /// The address following the last word this directive occupies, given
    /// the address it was generated for.
    ///
    /// The words of an instruction need not be contiguous, so this is taken
    /// from the last word it was decoded from.
    pub fn next_loc(&self, loc: u32) -> u32 {
        match self {
            Directive::EmitInstr(_, words) => words.last().map_or(loc, |w| w.address + 1),
            directive => loc + directive.size(),
        }
    }
}
