//! Intel HEX image reader
//!
//! Records are read in the usual `:LLAAAATT<data>CC` layout. Data, end of
//! file, and extended segment address records are interpreted; any other
//! record type is skipped without its checksum being checked. Data bytes are
//! paired up into little-endian words. Only whole pairs are read, so in a
//! record with an odd byte count the last data byte is taken as the checksum,
//! which then fails to verify.

use crate::memory::{Error, Image, Result, Word};
use std::fs;
use std::path::Path;

const DATA_RECORD: u8 = 0x00;
const EOF_RECORD: u8 = 0x01;
const EXTENDED_SEGMENT_ADDRESS_RECORD: u8 = 0x02;

/// Character-level cursor over the raw text of a hex file.
struct Scanner<'a> {
    text: &'a [u8],
    pos: usize,

    /// Line number of the current position, starting at 1.
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a [u8]) -> Self {
        Scanner {
            text,
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.get(self.pos).copied()
    }

    /// Step over one character, keeping the line count current.
    ///
    /// LF, CR, and CRLF each count as a single line terminator.
    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;

        match c {
            b'\n' => self.line += 1,
            b'\r' if self.peek() != Some(b'\n') => self.line += 1,
            _ => {}
        }

        Some(c)
    }

    /// Move just past the next `:` record mark.
    ///
    /// Returns false once the input is exhausted.
    fn seek_record(&mut self) -> bool {
        while let Some(c) = self.bump() {
            if c == b':' {
                return true;
            }
        }

        false
    }

    /// Move past the end of the current line.
    fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == b'\n' || (c == b'\r' && self.peek() != Some(b'\n')) {
                break;
            }
        }
    }

    fn skip_hex_digits(&mut self) {
        while self.peek().map_or(false, |c| c.is_ascii_hexdigit()) {
            self.pos += 1;
        }
    }

    /// Read one byte written as two hexadecimal digits.
    ///
    /// `field` names what was being read, for error reporting.
    fn byte(&mut self, field: &'static str) -> Result<u8> {
        let digits = self
            .text
            .get(self.pos..self.pos + 2)
            .and_then(|d| Some((hex_digit(d[0])?, hex_digit(d[1])?)));

        match digits {
            Some((hi, lo)) => {
                self.pos += 2;
                Ok(hi << 4 | lo)
            }
            None => Err(Error::Malformed {
                field,
                line: self.line,
            }),
        }
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

/// Check a record's running byte sum against its trailing checksum byte.
fn verify(scanner: &mut Scanner, sum: u8, line: usize) -> Result<()> {
    let checksum = scanner.byte("checksum")?;

    if sum.wrapping_add(checksum) == 0 {
        Ok(())
    } else {
        Err(Error::Checksum(line))
    }
}

/// Parse the text of an Intel HEX file into a program image.
///
/// Byte addresses are offset by the extended segment base and halved into
/// word addresses. Any malformed record fails the whole parse.
pub fn parse(text: &[u8]) -> Result<Image> {
    let mut scanner = Scanner::new(text);
    let mut words = Vec::new();
    let mut segment_base: u32 = 0;
    let mut seen_record = false;
    let mut seen_eof = false;

    while scanner.seek_record() {
        let line = scanner.line;

        if seen_eof {
            return Err(Error::RecordAfterEof(line));
        }

        let count = scanner.byte("byte count")?;
        let address_hi = scanner.byte("address high byte")?;
        let address_lo = scanner.byte("address low byte")?;
        let kind = scanner.byte("record type")?;
        let mut sum = count
            .wrapping_add(address_hi)
            .wrapping_add(address_lo)
            .wrapping_add(kind);

        match kind {
            DATA_RECORD => {
                let offset = u32::from(u16::from_be_bytes([address_hi, address_lo]));
                let mut address = ((segment_base << 4) + offset) >> 1;
                let mut record = Vec::with_capacity(usize::from(count / 2));

                for _ in 0..count / 2 {
                    let lo = scanner.byte("data low byte")?;
                    let hi = scanner.byte("data high byte")?;
                    sum = sum.wrapping_add(lo).wrapping_add(hi);

                    record.push(Word::new(address, u16::from_le_bytes([lo, hi])));
                    address += 1;
                }

                verify(&mut scanner, sum, line)?;
                words.extend(record);
            }
            EOF_RECORD => {
                verify(&mut scanner, sum, line)?;
                seen_eof = true;
            }
            EXTENDED_SEGMENT_ADDRESS_RECORD => {
                if seen_record {
                    return Err(Error::MisplacedSegmentAddress(line));
                }

                let base_hi = scanner.byte("segment base high byte")?;
                let base_lo = scanner.byte("segment base low byte")?;
                sum = sum.wrapping_add(base_hi).wrapping_add(base_lo);

                verify(&mut scanner, sum, line)?;
                segment_base = u32::from(u16::from_be_bytes([base_hi, base_lo]));
            }
            _ => scanner.skip_hex_digits(),
        }

        seen_record = true;
        scanner.skip_line();
    }

    if !seen_eof {
        return Err(Error::MissingEof);
    }

    Ok(Image::new(words))
}

/// Read an Intel HEX file from disk.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Image> {
    let text = fs::read(path)?;

    parse(&text)
}
