//! Program memory model
//!
//! AVR program memory is addressed in 16-bit words. Everything in here that
//! talks about an address means a word address; the byte addresses found in
//! hex files are halved on the way in.

mod error;
pub mod ihex;
mod image;

pub use error::{Error, Result};
pub use image::{Image, Word};
