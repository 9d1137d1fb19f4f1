//! Facilities for analyzing program code

mod classify;
mod error;
mod flow;
mod labels;
mod passes;
mod regions;

pub use classify::classify;
pub use error::{Error, Result};
pub use flow::Flow;
pub use labels::LabelTable;
pub use passes::{disassemble_image, inject_labels, inject_orgs, replace_labels};
pub use regions::{AddressRange, RangeSet};

#[cfg(test)]
mod tests;
