//! Packed region-relative boxes: six coordinates in `[0, 16]` over a 16^3
//! section, 5 bits each, in one u32.

const FIELD_MASK: u32 = 0x1F;

/// A box with inclusive-exclusive integer bounds inside one section, packed
/// as `x0 | y0 << 5 | z0 << 10 | x1 << 15 | y1 << 20 | z1 << 25`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PackedBox(u32);

impl PackedBox {
    /// The whole section.
    pub const FULL: Self = Self((16 << 15) | (16 << 20) | (16 << 25));

    /// Packs a box. Bounds out of `[0, 16]` or inverted bounds panic.
    #[inline]
    pub fn pack(x0: i32, y0: i32, z0: i32, x1: i32, y1: i32, z1: i32) -> Self {
        assert!(
            0 <= x0 && x0 <= x1 && x1 <= 16 && 0 <= y0 && y0 <= y1 && y1 <= 16 && 0 <= z0 && z0 <= z1 && z1 <= 16,
            "invalid box bounds ({x0}, {y0}, {z0}) to ({x1}, {y1}, {z1})"
        );

        Self(
            x0 as u32
                | ((y0 as u32) << 5)
                | ((z0 as u32) << 10)
                | ((x1 as u32) << 15)
                | ((y1 as u32) << 20)
                | ((z1 as u32) << 25),
        )
    }

    #[inline]
    pub fn x0(self) -> i32 {
        (self.0 & FIELD_MASK) as i32
    }

    #[inline]
    pub fn y0(self) -> i32 {
        ((self.0 >> 5) & FIELD_MASK) as i32
    }

    #[inline]
    pub fn z0(self) -> i32 {
        ((self.0 >> 10) & FIELD_MASK) as i32
    }

    #[inline]
    pub fn x1(self) -> i32 {
        ((self.0 >> 15) & FIELD_MASK) as i32
    }

    #[inline]
    pub fn y1(self) -> i32 {
        ((self.0 >> 20) & FIELD_MASK) as i32
    }

    #[inline]
    pub fn z1(self) -> i32 {
        ((self.0 >> 25) & FIELD_MASK) as i32
    }
}
