//! Interop with different assembler syntaxes

pub mod avra;
mod traits;

pub use traits::Assembler;

#[cfg(test)]
mod tests;
