//! Set-relation operations between an area and an accumulated occlusion
//! sample. Every operation is bounded to at most 4 word ops; the only
//! mutation is through [`SampleMask::add`] and [`SampleMask::remove`].

use crate::area::AreaKey;

/// Caller-owned 256-bit accumulator of covered grid cells, same word layout
/// as an area coverage mask.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct SampleMask {
    words: [u64; 4],
}

impl SampleMask {
    pub const EMPTY: Self = Self { words: [0; 4] };
    pub const FULL: Self = Self { words: [u64::MAX; 4] };

    #[inline]
    pub fn from_words(words: [u64; 4]) -> Self {
        Self { words }
    }

    #[inline]
    pub fn words(&self) -> &[u64; 4] {
        &self.words
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words == [0; 4]
    }

    /// True when the area is already fully covered by this sample.
    #[inline]
    pub fn contains(&self, key: AreaKey) -> bool {
        let w0 = key.coverage_word(0);
        let w1 = key.coverage_word(1);
        let w2 = key.coverage_word(2);
        let w3 = key.coverage_word(3);

        (w0 & self.words[0]) == w0
            && (w1 & self.words[1]) == w1
            && (w2 & self.words[2]) == w2
            && (w3 & self.words[3]) == w3
    }

    /// True when the area overlaps at least one covered cell.
    #[inline]
    pub fn intersects(&self, key: AreaKey) -> bool {
        (key.coverage_word(0) & self.words[0]) != 0
            || (key.coverage_word(1) & self.words[1]) != 0
            || (key.coverage_word(2) & self.words[2]) != 0
            || (key.coverage_word(3) & self.words[3]) != 0
    }

    /// True when adding the area would cover at least one new cell. This is
    /// the admission test for claiming a rectangle; it is false exactly when
    /// [`contains`](Self::contains) is true.
    #[inline]
    pub fn would_add(&self, key: AreaKey) -> bool {
        (key.coverage_word(0) | self.words[0]) != self.words[0]
            || (key.coverage_word(1) | self.words[1]) != self.words[1]
            || (key.coverage_word(2) | self.words[2]) != self.words[2]
            || (key.coverage_word(3) | self.words[3]) != self.words[3]
    }

    /// ORs the area's coverage into the sample.
    #[inline]
    pub fn add(&mut self, key: AreaKey) {
        self.words[0] |= key.coverage_word(0);
        self.words[1] |= key.coverage_word(1);
        self.words[2] |= key.coverage_word(2);
        self.words[3] |= key.coverage_word(3);
    }

    /// Clears the area's coverage out of the sample.
    #[inline]
    pub fn remove(&mut self, key: AreaKey) {
        self.words[0] &= !key.coverage_word(0);
        self.words[1] &= !key.coverage_word(1);
        self.words[2] &= !key.coverage_word(2);
        self.words[3] &= !key.coverage_word(3);
    }
}
