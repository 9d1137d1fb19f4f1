//! Word-addressed program image

/// One 16-bit slot of program memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub address: u32,
    pub value: u16,
}

impl Word {
    pub fn new(address: u32, value: u16) -> Self {
        Word { address, value }
    }
}

/// A program image, held entirely in memory and ordered by address.
///
/// Addresses need not be contiguous. Gaps between words are how the image
/// records that the source file skipped over part of the address space.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    words: Vec<Word>,
}

impl Image {
    /// Build an image out of a list of words.
    ///
    /// The words are put in address order. The sort is stable, so words with
    /// duplicate addresses stay in the order the source listed them.
    pub fn new(mut words: Vec<Word>) -> Self {
        words.sort_by_key(|w| w.address);

        Image { words }
    }

    /// Build an image of consecutive words starting at `start`.
    #[cfg(test)]
    pub fn test_rom(start: u32, data: &[u16]) -> Self {
        Image::new(
            data.iter()
                .enumerate()
                .map(|(i, v)| Word::new(start + i as u32, *v))
                .collect(),
        )
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    pub fn first(&self) -> Option<&Word> {
        self.words.first()
    }

    pub fn last(&self) -> Option<&Word> {
        self.words.last()
    }

    /// Find the index of the first word at or after `address`.
    ///
    /// Returns the image length if no such word exists.
    pub fn first_at_or_after(&self, address: u32) -> usize {
        self.words.partition_point(|w| w.address < address)
    }

    /// The words at indices `start..end`, clipped to the end of the image.
    pub fn words(&self, start: usize, end: usize) -> &[Word] {
        self.words
            .get(start..end.min(self.words.len()))
            .unwrap_or(&[])
    }
}
