//! CLI commands

mod common;
mod dis;
mod main;
mod scan;

pub use dis::dis;
pub use main::main;
pub use scan::scan;
