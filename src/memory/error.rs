//! Error type for program image loading

use std::{io, result};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Underlying cause of error is I/O related
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record field was not a pair of hexadecimal digits.
    #[error("Error parsing \"{field}\" in record at line {line}")]
    Malformed { field: &'static str, line: usize },

    /// The record's bytes did not sum to zero modulo 256.
    #[error("Checksum error in record at line {0}")]
    Checksum(usize),

    #[error("Record found after \"End Of File\" record at line {0}")]
    RecordAfterEof(usize),

    /// Extended segment addresses may only be given before any other record.
    #[error("\"Extended Segment Address\" record at line {0} does not precede all other records")]
    MisplacedSegmentAddress(usize),

    #[error("Missing \"End Of File\" record")]
    MissingEof,
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            err => io::Error::new(io::ErrorKind::InvalidData, err.to_string()),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
