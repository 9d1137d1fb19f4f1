//! Assembler trait

use crate::ast::{Directive, Instruction, Label, Literal, Operand, Section};
use crate::memory::Word;
use std::io::{Result, Write};

/// Trait which represents a particular assembler syntax.
pub trait Assembler {
    /// Emit an org statement into the disassembly stream.
    fn emit_org(&self, stream: &mut dyn Write, where_to: u32) -> Result<()>;

    /// Emit whatever precedes the instruction or data on a line.
    ///
    /// This is given the words encoding what follows, as well as the label
    /// declared at its address, if any.
    fn emit_line_start(
        &self,
        stream: &mut dyn Write,
        words: &[Word],
        label: Option<&Label>,
    ) -> Result<()>;

    /// Emit a constant data word into the disassembly stream.
    fn emit_data(&self, stream: &mut dyn Write, data: u16) -> Result<()>;

    /// Emit any instruction whitespace necessary for the start of an
    /// instruction.
    fn emit_instr_start(&self, _stream: &mut dyn Write, _instr: &Instruction) -> Result<()> {
        Ok(())
    }

    fn emit_instr_opcode(&self, stream: &mut dyn Write, opcode: &str) -> Result<()>;

    /// Emit whatever separates an operand from the one before it, or from
    /// the opcode.
    fn emit_operand_start(
        &self,
        stream: &mut dyn Write,
        instr: &Instruction,
        operand_index: usize,
    ) -> Result<()>;

    fn emit_symbol(&self, stream: &mut dyn Write, symbol: &str) -> Result<()>;

    fn emit_literal(&self, stream: &mut dyn Write, literal: &Literal) -> Result<()>;

    fn emit_label_operand(&self, stream: &mut dyn Write, label: &Label) -> Result<()>;

    /// Emit the symbol between the two halves of an infix operand.
    fn emit_operand_infix(&self, stream: &mut dyn Write, infix: &str) -> Result<()>;

    /// Emit an operand.
    ///
    /// The default implementation recurses through wrapped operands, calling
    /// the other trait methods for each part.
    fn emit_operand(&self, stream: &mut dyn Write, operand: &Operand) -> Result<()> {
        match operand {
            Operand::Symbol(symbol) => self.emit_symbol(stream, symbol)?,
            Operand::Literal(literal) => self.emit_literal(stream, literal)?,
            Operand::Label(label) => self.emit_label_operand(stream, label)?,
            Operand::CodeReference(opr) => self.emit_operand(stream, opr)?,
            Operand::Infix(opr1, infix, opr2) => {
                self.emit_operand(stream, opr1)?;
                self.emit_operand_infix(stream, infix)?;
                self.emit_operand(stream, opr2)?;
            }
        }

        Ok(())
    }

    /// Emit any instruction whitespace necessary for the end of an
    /// instruction.
    ///
    /// `words` are the words the instruction was decoded from.
    fn emit_instr_end(
        &self,
        stream: &mut dyn Write,
        instr: &Instruction,
        words: &[Word],
    ) -> Result<()>;

    /// Emit an entire instruction.
    fn emit_instr(
        &self,
        stream: &mut dyn Write,
        instr: &Instruction,
        words: &[Word],
    ) -> Result<()> {
        self.emit_instr_start(stream, instr)?;
        self.emit_instr_opcode(stream, instr.opcode())?;

        for (i, operand) in instr.iter_operands().enumerate() {
            self.emit_operand_start(stream, instr, i)?;
            self.emit_operand(stream, operand)?;
        }

        self.emit_instr_end(stream, instr, words)?;

        Ok(())
    }

    /// Emit an entire section.
    ///
    /// A label declaration is held back and emitted as part of the line of
    /// the directive that follows it.
    fn emit_section(&self, stream: &mut dyn Write, section: &Section) -> Result<()> {
        let mut label = None;

        for (directive, loc) in section.iter_directives() {
            match directive {
                Directive::DeclareOrg(org) => self.emit_org(stream, *org)?,
                Directive::DeclareLabel(decl) => label = Some(decl),
                Directive::EmitData(data) => {
                    self.emit_line_start(stream, &[Word::new(*loc, *data)], label.take())?;
                    self.emit_data(stream, *data)?;
                }
                Directive::EmitInstr(instr, words) => {
                    self.emit_line_start(stream, words, label.take())?;
                    self.emit_instr(stream, instr, words)?;
                }
            }
        }

        Ok(())
    }
}
