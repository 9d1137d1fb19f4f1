//! Top-level AST type which represents a single section.

use crate::ast::Directive;

/// A directive, and the word address it was generated for.
pub type FixedDirective = (Directive, u32);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    directives: Vec<FixedDirective>,
}

impl Section {
    pub fn new() -> Self {
        Section {
            directives: Vec::new(),
        }
    }

    pub fn iter_directives(&self) -> impl Iterator<Item = &FixedDirective> {
        self.directives.iter()
    }

    pub fn append_directive(&mut self, dir: Directive, loc: u32) {
        self.directives.push((dir, loc));
    }
}

impl IntoIterator for Section {
    type Item = FixedDirective;
    type IntoIter = std::vec::IntoIter<FixedDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.into_iter()
    }
}
