//! Instruction AST type

use crate::ast::Operand;
use std::slice;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    opcode: String,
    operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(opcode: &str, operands: Vec<Operand>) -> Self {
        Instruction {
            opcode: opcode.to_string(),
            operands,
        }
    }

    pub fn opcode(&self) -> &str {
        &self.opcode
    }

    pub fn iter_operands(&self) -> slice::Iter<'_, Operand> {
        self.operands.iter()
    }

    pub fn iter_operands_mut(&mut self) -> slice::IterMut<'_, Operand> {
        self.operands.iter_mut()
    }
}
