//! Error type for analysis

use std::{io, result};
use thiserror::Error;

/// Error type for analysis.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Instruction decoding failed because the value read from the program
    /// image is not valid code.
    #[error("Invalid instruction")]
    InvalidInstruction,

    /// A 32-bit instruction was found, but the program image ends before
    /// its second word.
    ///
    /// The address is that of the instruction's first word.
    #[error("2nd word of 32-bit opcode after {0:05x} missing")]
    TruncatedInstruction(u32),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err.to_string())
    }
}

pub type Result<T> = result::Result<T, Error>;
