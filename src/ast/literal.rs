//! AST type for literal values

/// A literal value in disassembled code.
///
/// The variants differ only in how an assembler should spell them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    /// A count, bit index, or immediate; written in decimal.
    Integer(u32),

    /// An I/O or data space address; written in hexadecimal.
    Address(u32),

    /// A program memory word address.
    Pointer(u32),
}

impl Literal {
    /// If this literal is a pointer, yield its word address.
    pub fn into_pointer(self) -> Option<u32> {
        match self {
            Literal::Pointer(p) => Some(p),
            _ => None,
        }
    }
}
