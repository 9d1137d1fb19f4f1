//! Atmel AVR assembler syntax

use crate::analysis::LabelTable;
use crate::asm::Assembler;
use crate::ast::{Instruction, Label, Literal};
use crate::memory::Word;
use std::io::{Result, Write};

/// AVRA/avrasm2 style output.
///
/// In listing mode, each line is prefixed with the word address and raw
/// word, and `.org` directives are left out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Avra {
    listing: bool,

    /// Width of the label column, including the `:` and padding.
    label_width: usize,
}

impl Avra {
    /// Construct the syntax for a given set of labels.
    ///
    /// The label column is sized to fit the longest label, rounded up to a
    /// multiple of four.
    pub fn new(listing: bool, labels: &LabelTable) -> Self {
        Avra {
            listing,
            label_width: ((labels.longest_name() + 1) / 4 + 1) * 4,
        }
    }

    #[cfg(test)]
    pub fn label_width(&self) -> usize {
        self.label_width
    }
}

impl Assembler for Avra {
    fn emit_org(&self, stream: &mut dyn Write, where_to: u32) -> Result<()> {
        if self.listing {
            return Ok(());
        }

        writeln!(stream, ".org 0x{:04x}", where_to)
    }

    fn emit_line_start(
        &self,
        stream: &mut dyn Write,
        words: &[Word],
        label: Option<&Label>,
    ) -> Result<()> {
        if self.listing {
            if let Some(word) = words.first() {
                write!(stream, "{:05x}: {:04x} ", word.address, word.value)?;
            }
        }

        let decl = label.map_or_else(String::new, |l| format!("{}:", l.name()));

        write!(stream, "{:width$}", decl, width = self.label_width)
    }

    fn emit_data(&self, stream: &mut dyn Write, data: u16) -> Result<()> {
        writeln!(stream, ".dw 0x{:04x}", data)
    }

    fn emit_instr_opcode(&self, stream: &mut dyn Write, opcode: &str) -> Result<()> {
        write!(stream, "{}", opcode)
    }

    fn emit_operand_start(
        &self,
        stream: &mut dyn Write,
        _instr: &Instruction,
        operand_index: usize,
    ) -> Result<()> {
        if operand_index == 0 {
            write!(stream, " ")
        } else {
            write!(stream, ", ")
        }
    }

    fn emit_symbol(&self, stream: &mut dyn Write, symbol: &str) -> Result<()> {
        write!(stream, "{}", symbol)
    }

    fn emit_literal(&self, stream: &mut dyn Write, literal: &Literal) -> Result<()> {
        match literal {
            Literal::Integer(i) => write!(stream, "{}", i),
            Literal::Address(a) => write!(stream, "0x{:02x}", a),
            Literal::Pointer(p) => write!(stream, "0x{:04x}", p),
        }
    }

    fn emit_label_operand(&self, stream: &mut dyn Write, label: &Label) -> Result<()> {
        write!(stream, "{}", label.name())
    }

    fn emit_operand_infix(&self, stream: &mut dyn Write, infix: &str) -> Result<()> {
        write!(stream, "{}", infix)
    }

    fn emit_instr_end(
        &self,
        stream: &mut dyn Write,
        _instr: &Instruction,
        words: &[Word],
    ) -> Result<()> {
        writeln!(stream)?;

        if self.listing {
            for word in words.iter().skip(1) {
                writeln!(stream, "{:05x}: {:04x}", word.address, word.value)?;
            }
        }

        Ok(())
    }
}

/// Render a whole section to a string.
#[cfg(test)]
pub fn format_section(asm: &Avra, section: &crate::ast::Section) -> String {
    let mut out = Vec::new();

    asm.emit_section(&mut out, section)
        .expect("writing to a Vec cannot fail");

    String::from_utf8(out).expect("assembly output is ASCII")
}
