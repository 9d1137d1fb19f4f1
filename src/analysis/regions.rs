//! Address ranges and the set of presumed data regions

use std::{fmt, str};

/// An inclusive range of word addresses.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct AddressRange {
    begin: u32,
    end: u32,
}

impl AddressRange {
    /// Construct a range; yields `None` if `begin` comes after `end`.
    pub fn new(begin: u32, end: u32) -> Option<Self> {
        if begin <= end {
            Some(AddressRange { begin, end })
        } else {
            None
        }
    }

    pub fn begin(&self) -> u32 {
        self.begin
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn contains(&self, address: u32) -> bool {
        self.begin <= address && address <= self.end
    }
}

fn parse_address(s: &str) -> Option<u32> {
    let digits = s
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");

    u32::from_str_radix(digits, 16).ok()
}

/// Ranges are written `BEGIN:END` in hexadecimal, with an optional `0x`.
impl str::FromStr for AddressRange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut split = s.split(':');

        match (split.next(), split.next(), split.next()) {
            (Some(begin), Some(end), None) => {
                AddressRange::new(parse_address(begin).ok_or(())?, parse_address(end).ok_or(())?)
                    .ok_or(())
            }
            _ => Err(()),
        }
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:04x}:0x{:04x}", self.begin, self.end)
    }
}

derive_deserialize_from_str!(AddressRange, "valid address range");
derive_serialize_from_display!(AddressRange);

/// A set of disjoint address ranges, ordered by address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<AddressRange>,
}

impl RangeSet {
    pub fn new() -> Self {
        RangeSet { ranges: Vec::new() }
    }

    /// Index of the range containing `address`.
    fn find(&self, address: u32) -> Option<usize> {
        let index = self.ranges.partition_point(|r| r.end < address);

        self.ranges
            .get(index)
            .filter(|r| r.contains(address))
            .map(|_| index)
    }

    /// Add a range to the set.
    ///
    /// Returns false, leaving the set unaltered, if the range overlaps one
    /// already present.
    pub fn insert(&mut self, range: AddressRange) -> bool {
        let index = self.ranges.partition_point(|r| r.begin < range.begin);
        let clear_before = index == 0 || self.ranges[index - 1].end < range.begin;
        let clear_after = self
            .ranges
            .get(index)
            .map_or(true, |next| range.end < next.begin);

        if clear_before && clear_after {
            self.ranges.insert(index, range);
            true
        } else {
            false
        }
    }

    /// Find the range containing `address`, if any.
    #[cfg(test)]
    pub fn containing(&self, address: u32) -> Option<AddressRange> {
        self.find(address).map(|i| self.ranges[i])
    }

    pub fn contains(&self, address: u32) -> bool {
        self.find(address).is_some()
    }

    /// Cut the range containing `address` so it ends just before it.
    ///
    /// A range starting at `address` is removed outright. Returns the part
    /// that was cut away, which runs from `address` to the old end.
    pub fn split_at(&mut self, address: u32) -> Option<AddressRange> {
        let index = self.find(address)?;
        let range = self.ranges[index];

        if range.begin == address {
            self.ranges.remove(index);
        } else {
            self.ranges[index].end = address - 1;
        }

        Some(AddressRange {
            begin: address,
            end: range.end,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddressRange> {
        self.ranges.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
