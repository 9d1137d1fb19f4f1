//! Architectural support

pub mod avr;
