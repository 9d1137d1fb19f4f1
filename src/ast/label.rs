//! Label AST type

use std::fmt;

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Label {
    name: String,
}

impl Label {
    pub fn new(name: &str) -> Label {
        Label {
            name: name.to_string(),
        }
    }

    /// Generate the name of the label with the given address rank.
    pub fn numbered(rank: usize) -> Label {
        Label::new(&format!("L{}", rank))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
