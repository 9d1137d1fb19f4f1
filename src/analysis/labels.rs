//! Label naming for code targets

use crate::ast::Label;
use std::collections::BTreeMap;

/// A named code target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelEntry {
    label: Label,

    /// Address of the first instruction found referring to the target.
    referenced_from: u32,
}

impl LabelEntry {
    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn referenced_from(&self) -> u32 {
        self.referenced_from
    }
}

/// Every code target found during analysis, each with a generated name.
///
/// Labels are numbered `L0`, `L1`, and so on in ascending address order, so
/// the same set of targets always produces the same names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTable {
    entries: BTreeMap<u32, LabelEntry>,
}

impl LabelTable {
    /// Name a set of targets.
    ///
    /// `targets` maps each target address to the address of an instruction
    /// referring to it.
    pub fn from_targets(targets: BTreeMap<u32, u32>) -> Self {
        let entries = targets
            .into_iter()
            .enumerate()
            .map(|(rank, (address, referenced_from))| {
                (
                    address,
                    LabelEntry {
                        label: Label::numbered(rank),
                        referenced_from,
                    },
                )
            })
            .collect();

        LabelTable { entries }
    }

    /// Find the label for the target at exactly `address`.
    pub fn label(&self, address: u32) -> Option<&Label> {
        self.entries.get(&address).map(|e| &e.label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &LabelEntry)> {
        self.entries.iter().map(|(a, e)| (*a, e))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest label name, or zero if there are no labels.
    pub fn longest_name(&self) -> usize {
        self.entries
            .values()
            .map(|e| e.label.name().len())
            .max()
            .unwrap_or(0)
    }
}
