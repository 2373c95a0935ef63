//! Bit-mask codec for area coverage.
//!
//! A coverage mask is 256 bits held in 4 x u64: word `w` holds grid rows
//! `4w..4w+3`, each row a 16-bit lane inside its word, with bit `x` of a lane
//! marking column `x`. Masks are derived from an [`AreaKey`] on demand through
//! compile-time lookup tables, so the per-box hot path has no loop or branch.

use crate::area::AreaKey;

/// Horizontal run for `x0 | x1 << 4`, replicated into all four 16-bit lanes.
static COL_TEMPLATES: [u64; 256] = build_col_templates();

/// Vertical run for `y0 | y1 << 4`, one bit per grid row.
static ROW_SPANS: [u16; 256] = build_row_spans();

/// Word mask for a 4-bit row-presence pattern. Only the 11 patterns a
/// contiguous row range can produce are populated; the rest stay zero and are
/// unreachable from valid keys.
static ROW_GROUP_MASKS: [u64; 16] = build_row_group_masks();

const fn build_col_templates() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut x0 = 0u32;

    while x0 <= 15 {
        let mut x1 = x0;

        while x1 <= 15 {
            let run = ((0xFFFFu32 << x0) & (0xFFFFu32 >> (15 - x1))) as u64;
            table[(x0 | (x1 << 4)) as usize] = run | (run << 16) | (run << 32) | (run << 48);
            x1 += 1;
        }

        x0 += 1;
    }

    table
}

const fn build_row_spans() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut y0 = 0u32;

    while y0 <= 15 {
        let mut y1 = y0;

        while y1 <= 15 {
            table[(y0 | (y1 << 4)) as usize] = ((0xFFFFu32 << y0) & (0xFFFFu32 >> (15 - y1))) as u16;
            y1 += 1;
        }

        y0 += 1;
    }

    table
}

const fn build_row_group_masks() -> [u64; 16] {
    let mut table = [0u64; 16];
    table[0b0001] = 0x0000_0000_0000_FFFF;
    table[0b0010] = 0x0000_0000_FFFF_0000;
    table[0b0100] = 0x0000_FFFF_0000_0000;
    table[0b1000] = 0xFFFF_0000_0000_0000;
    table[0b0011] = 0x0000_0000_FFFF_FFFF;
    table[0b0110] = 0x0000_FFFF_FFFF_0000;
    table[0b1100] = 0xFFFF_FFFF_0000_0000;
    table[0b0111] = 0x0000_FFFF_FFFF_FFFF;
    table[0b1110] = 0xFFFF_FFFF_FFFF_0000;
    table[0b1111] = 0xFFFF_FFFF_FFFF_FFFF;
    table
}

impl AreaKey {
    /// One word of this area's coverage mask, `word` in `0..4`.
    #[inline]
    pub fn coverage_word(self, word: usize) -> u64 {
        let packed = self.packed() as usize;
        let pattern = (ROW_SPANS[packed >> 8] >> (word * 4)) & 0xF;
        ROW_GROUP_MASKS[pattern as usize] & COL_TEMPLATES[packed & 0xFF]
    }

    /// Full 256-bit coverage mask.
    #[inline]
    pub fn coverage_words(self) -> [u64; 4] {
        [
            self.coverage_word(0),
            self.coverage_word(1),
            self.coverage_word(2),
            self.coverage_word(3),
        ]
    }

    /// True when the two rectangles share at least one grid cell.
    #[inline]
    pub fn intersects(self, other: AreaKey) -> bool {
        (self.coverage_word(0) & other.coverage_word(0)) != 0
            || (self.coverage_word(1) & other.coverage_word(1)) != 0
            || (self.coverage_word(2) & other.coverage_word(2)) != 0
            || (self.coverage_word(3) & other.coverage_word(3)) != 0
    }
}
