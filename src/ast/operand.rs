//! Operand AST type

use crate::ast::{Label, Literal};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// The name of a register, pointer register mode, or other operand
    /// defined by the architecture.
    Symbol(String),

    /// A literal constant value.
    Literal(Literal),

    /// A reference to a label.
    Label(Label),

    /// An operand which constitutes a code reference.
    CodeReference(Box<Operand>),

    /// Some infix operand, e.g. `Y+4`
    Infix(Box<Operand>, String, Box<Operand>),
}

impl Operand {
    pub fn sym(sym: &str) -> Self {
        Operand::Symbol(sym.to_string())
    }

    pub fn int<MI>(int: MI) -> Self
    where
        u32: From<MI>,
    {
        Operand::Literal(Literal::Integer(u32::from(int)))
    }

    pub fn addr<MI>(addr: MI) -> Self
    where
        u32: From<MI>,
    {
        Operand::Literal(Literal::Address(u32::from(addr)))
    }

    pub fn cptr(ptr: u32) -> Self {
        Operand::CodeReference(Box::new(Operand::Literal(Literal::Pointer(ptr))))
    }

    pub fn clbl(label: Label) -> Self {
        Operand::CodeReference(Box::new(Operand::Label(label)))
    }

    pub fn add(op1: Self, op2: Self) -> Self {
        Operand::Infix(Box::new(op1), "+".to_string(), Box::new(op2))
    }

    /// If this operand is a literal code pointer, yield its address.
    pub fn code_pointer(&self) -> Option<u32> {
        match self {
            Operand::CodeReference(inner) => match inner.as_ref() {
                Operand::Literal(lit) => lit.into_pointer(),
                _ => None,
            },
            _ => None,
        }
    }
}
