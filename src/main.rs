#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

#[macro_use]
extern crate clap;

mod analysis;
mod arch;
mod asm;
mod ast;
mod cli;
mod memory;
mod project;

use std::process;

fn main() {
    if let Err(e) = cli::main() {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}
