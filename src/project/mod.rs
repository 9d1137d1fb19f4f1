//! Project file structures

mod program;
mod repr;

pub use program::Program;
pub use repr::Project;
