//! Code and data classification
//!
//! Firmware images mix code with tables and strings, and nothing in the
//! image marks which is which. We presume that whatever follows an
//! unconditional transfer of control is data, up until the next address
//! something branches to. Targets found later on may land inside a region
//! already presumed to be data, in which case the region is cut short and the
//! rest of it scanned again as code.

use crate::analysis::{AddressRange, LabelTable, RangeSet};
use crate::arch::avr::Instruction;
use crate::memory::Image;
use std::collections::BTreeMap;

struct Classifier<'a> {
    image: &'a Image,

    /// Code targets, mapped to the first address found referring to them.
    targets: BTreeMap<u32, u32>,

    regions: RangeSet,
}

impl<'a> Classifier<'a> {
    fn new(image: &'a Image) -> Self {
        Classifier {
            image,
            targets: BTreeMap::new(),
            regions: RangeSet::new(),
        }
    }

    /// Record that the instruction at `from` refers to `target`.
    ///
    /// If the target lies within a data region, everything in that region
    /// from the target onwards is reconsidered as code.
    fn reference(&mut self, from: u32, target: u32) {
        self.targets.entry(target).or_insert(from);

        if let Some(remainder) = self.regions.split_at(target) {
            self.scan(remainder.begin(), remainder.end());
        }
    }

    /// Close a data region running from `begin` to `end`.
    ///
    /// Regions that would be empty are not recorded.
    fn close(&mut self, begin: u32, end: Option<u32>) {
        if let Some(range) = end.and_then(|end| AddressRange::new(begin, end)) {
            if !self.regions.insert(range) {
                eprintln!("WARN: Data region {} overlaps another, ignoring", range);
            }
        }
    }

    /// Scan the words between two addresses inclusive.
    fn scan(&mut self, from: u32, to: u32) {
        let mut index = self.image.first_at_or_after(from);

        // Start of the data region being scanned over, if any.
        let mut open = None;

        // Address of the last word visited.
        let mut last = None;

        let mut first = true;
        let mut after_skip = false;

        while let Some(word) = self.image.get(index).copied() {
            if word.address > to {
                break;
            }

            if let Some(begin) = open {
                if !self.targets.contains_key(&word.address) {
                    last = Some(word.address);
                    index += 1;
                    continue;
                }

                self.close(begin, last);
                open = None;
                after_skip = false;
            }

            let (instr, size) = match Instruction::from_image(self.image, index) {
                Ok(decoded) => decoded,
                Err(_) => {
                    first = false;
                    after_skip = false;
                    last = Some(word.address);
                    index += 1;
                    continue;
                }
            };

            if let Some(target) = instr.target() {
                self.reference(word.address, target);
            }

            let next = index + size as usize;
            let flow = instr.flow();

            if !flow.is_nonfinal() && !first && !after_skip {
                open = self.image.get(next).map(|w| w.address);
            }

            first = false;
            after_skip = flow.is_skipping();
            last = self.image.get(next - 1).map(|w| w.address);
            index = next;
        }

        if let Some(begin) = open {
            self.close(begin, last);
        }
    }

    /// Decode every word of a range as code, regardless of where it sits.
    ///
    /// This never opens data regions itself, but the targets it finds can
    /// still split existing ones.
    fn sweep(&mut self, range: AddressRange) {
        let mut index = self.image.first_at_or_after(range.begin());

        while let Some(word) = self.image.get(index).copied() {
            if word.address > range.end() {
                break;
            }

            match Instruction::from_image(self.image, index) {
                Ok((instr, size)) => {
                    if let Some(target) = instr.target() {
                        self.reference(word.address, target);
                    }

                    index += size as usize;
                }
                Err(_) => index += 1,
            }
        }
    }
}

/// Find all code targets in an image, and the regions presumed to be data.
///
/// `enabled` lists ranges the user has asserted are code. They are swept for
/// targets after the main scan.
pub fn classify(image: &Image, enabled: &[AddressRange]) -> (LabelTable, RangeSet) {
    let mut classifier = Classifier::new(image);

    if let (Some(first), Some(last)) = (image.first(), image.last()) {
        classifier.scan(first.address, last.address);
    }

    for range in enabled {
        classifier.sweep(*range);
    }

    (
        LabelTable::from_targets(classifier.targets),
        classifier.regions,
    )
}
