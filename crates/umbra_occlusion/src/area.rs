//! Static catalog of every axis-aligned rectangle on the 16x16 grid.
//!
//! The catalog is built once, sorted so that the largest rectangles come
//! first, and is immutable afterwards. Callers that scan indices in order
//! encounter the most impactful candidate areas first, which is what greedy
//! occlusion accumulation wants.

use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

/// Number of distinct rectangles: 136 valid `(lo, hi)` pairs per axis.
pub const AREA_COUNT: usize = 136 * 136;

/// Number of full-span strips: 136 full-width + 136 full-height, minus the
/// full grid counted once.
pub const SECTION_COUNT: usize = 136 + 136 - 1;

const KEY_SPACE: usize = 0x10000;
const UNUSED_KEY: u16 = u16::MAX;

/// An axis-aligned rectangle on the 16x16 grid, inclusive bounds, packed as
/// `x0 | x1 << 4 | y0 << 8 | y1 << 12`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct AreaKey(u16);

impl AreaKey {
    /// Packs a rectangle. Bounds out of `[0, 15]` or inverted bounds are a
    /// contract violation and panic.
    #[inline]
    pub fn new(x0: u8, y0: u8, x1: u8, y1: u8) -> Self {
        assert!(
            x0 <= x1 && x1 <= 15 && y0 <= y1 && y1 <= 15,
            "invalid area bounds ({x0}, {y0}) to ({x1}, {y1})"
        );
        Self(u16::from(x0) | (u16::from(x1) << 4) | (u16::from(y0) << 8) | (u16::from(y1) << 12))
    }

    /// Rebuilds a key from its packed form, validating the invariants.
    #[inline]
    pub fn from_packed(packed: u16) -> Self {
        let key = Self(packed);
        assert!(
            key.x0() <= key.x1() && key.y0() <= key.y1(),
            "invalid packed area key {packed:#06x}"
        );
        key
    }

    #[inline]
    pub fn packed(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn x0(self) -> u8 {
        (self.0 & 15) as u8
    }

    #[inline]
    pub fn x1(self) -> u8 {
        ((self.0 >> 4) & 15) as u8
    }

    #[inline]
    pub fn y0(self) -> u8 {
        ((self.0 >> 8) & 15) as u8
    }

    #[inline]
    pub fn y1(self) -> u8 {
        ((self.0 >> 12) & 15) as u8
    }

    #[inline]
    pub fn width(self) -> u32 {
        u32::from(self.x1() - self.x0()) + 1
    }

    #[inline]
    pub fn height(self) -> u32 {
        u32::from(self.y1() - self.y0()) + 1
    }

    /// Number of grid cells the rectangle covers, at most 256.
    #[inline]
    pub fn cell_count(self) -> u32 {
        self.width() * self.height()
    }

    /// Width plus height. Among equal-cell-count rectangles, lower means
    /// more compact.
    #[inline]
    pub fn edge_cells(self) -> u32 {
        self.width() + self.height()
    }

    /// True when the rectangle spans the full grid width or full height.
    #[inline]
    pub fn is_full_span(self) -> bool {
        (self.x0() == 0 && self.x1() == 15) || (self.y0() == 0 && self.y1() == 15)
    }
}

impl fmt::Debug for AreaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AreaKey(({}, {}) to ({}, {}))",
            self.x0(),
            self.y0(),
            self.x1(),
            self.y1()
        )
    }
}

/// Immutable bidirectional mapping between area keys and dense indices,
/// ordered so that index 0 is the full grid.
pub struct AreaCatalog {
    index_to_key: Box<[AreaKey]>,
    key_to_index: Box<[u16]>,
    section_keys: Box<[AreaKey]>,
}

impl AreaCatalog {
    /// Enumerates, sorts, and indexes every rectangle. Pure; the result never
    /// changes after this returns.
    pub fn build() -> Self {
        let mut keys = Vec::with_capacity(AREA_COUNT);

        for x0 in 0..16u8 {
            for x1 in x0..16u8 {
                for y0 in 0..16u8 {
                    for y1 in y0..16u8 {
                        keys.push(AreaKey::new(x0, y0, x1, y1));
                    }
                }
            }
        }

        debug_assert_eq!(keys.len(), AREA_COUNT);

        // Largest rectangles first; among equals, prefer near-square shapes.
        keys.sort_unstable_by(|a, b| match b.cell_count().cmp(&a.cell_count()) {
            Ordering::Equal => a.edge_cells().cmp(&b.edge_cells()),
            unequal => unequal,
        });

        let mut key_to_index = vec![UNUSED_KEY; KEY_SPACE].into_boxed_slice();

        for (index, key) in keys.iter().enumerate() {
            key_to_index[usize::from(key.packed())] = index as u16;
        }

        let section_keys: Vec<AreaKey> =
            keys.iter().copied().filter(|key| key.is_full_span()).collect();

        debug_assert_eq!(section_keys.len(), SECTION_COUNT);

        debug!(
            areas = keys.len(),
            sections = section_keys.len(),
            "built occlusion area catalog"
        );

        Self {
            index_to_key: keys.into_boxed_slice(),
            key_to_index,
            section_keys: section_keys.into_boxed_slice(),
        }
    }

    /// Dense index of a key, O(1).
    #[inline]
    pub fn key_to_index(&self, key: AreaKey) -> usize {
        let index = self.key_to_index[usize::from(key.packed())];
        assert!(index != UNUSED_KEY, "{key:?} was never enumerated");
        usize::from(index)
    }

    /// Key at a dense index, O(1). Panics when out of range.
    #[inline]
    pub fn index_to_key(&self, index: usize) -> AreaKey {
        self.index_to_key[index]
    }

    /// The i-th full-span strip, in catalog order.
    #[inline]
    pub fn section_key(&self, section_index: usize) -> AreaKey {
        self.section_keys[section_index]
    }

    #[inline]
    pub fn section_count(&self) -> usize {
        self.section_keys.len()
    }

    #[inline]
    pub fn area_count(&self) -> usize {
        self.index_to_key.len()
    }
}

/// Process-wide catalog, built on first use and immutable afterwards.
pub fn catalog() -> &'static AreaCatalog {
    static CATALOG: OnceLock<AreaCatalog> = OnceLock::new();
    CATALOG.get_or_init(AreaCatalog::build)
}

#[cfg(test)]
mod tests {
    use super::{catalog, AreaKey, AREA_COUNT, SECTION_COUNT};

    #[test]
    fn catalog_holds_exactly_one_index_per_rectangle() {
        let catalog = catalog();
        assert_eq!(catalog.area_count(), AREA_COUNT);
        assert_eq!(AREA_COUNT, 18_496);

        for x0 in 0..16u8 {
            for x1 in x0..16u8 {
                for y0 in 0..16u8 {
                    for y1 in y0..16u8 {
                        let key = AreaKey::new(x0, y0, x1, y1);
                        assert_eq!(catalog.index_to_key(catalog.key_to_index(key)), key);
                    }
                }
            }
        }
    }

    #[test]
    fn catalog_orders_largest_then_most_compact_first() {
        let catalog = catalog();

        let first = catalog.index_to_key(0);
        assert_eq!(first, AreaKey::new(0, 0, 15, 15));
        assert_eq!(first.cell_count(), 256);

        for index in 1..AREA_COUNT {
            let prev = catalog.index_to_key(index - 1);
            let next = catalog.index_to_key(index);

            assert!(
                prev.cell_count() > next.cell_count()
                    || (prev.cell_count() == next.cell_count()
                        && prev.edge_cells() <= next.edge_cells()),
                "catalog order broken between {prev:?} and {next:?}"
            );
        }
    }

    #[test]
    fn section_keys_are_exactly_the_full_span_strips() {
        let catalog = catalog();
        assert_eq!(catalog.section_count(), SECTION_COUNT);

        for section in 0..catalog.section_count() {
            assert!(catalog.section_key(section).is_full_span());
        }

        let full_span_total = (0..AREA_COUNT)
            .filter(|&index| catalog.index_to_key(index).is_full_span())
            .count();
        assert_eq!(full_span_total, SECTION_COUNT);
    }

    #[test]
    #[should_panic(expected = "invalid area bounds")]
    fn inverted_bounds_are_a_contract_violation() {
        AreaKey::new(5, 0, 4, 15);
    }

    #[test]
    #[should_panic(expected = "invalid packed area key")]
    fn malformed_packed_key_is_rejected() {
        // x0 = 9, x1 = 2
        AreaKey::from_packed(0x0029);
    }

    #[test]
    fn key_accessors_round_trip_the_packed_fields() {
        let key = AreaKey::new(3, 5, 12, 9);
        assert_eq!(key.x0(), 3);
        assert_eq!(key.y0(), 5);
        assert_eq!(key.x1(), 12);
        assert_eq!(key.y1(), 9);
        assert_eq!(key.width(), 10);
        assert_eq!(key.height(), 5);
        assert_eq!(key.cell_count(), 50);
        assert_eq!(key.edge_cells(), 15);
        assert_eq!(AreaKey::from_packed(key.packed()), key);
    }
}
