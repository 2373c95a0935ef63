//! ASCII rendering of coverage masks, for the inspector tool and debugging.

use std::fmt::Write;

use crate::area::AreaKey;

/// Renders a 256-bit mask as 16 rows of `X`/`.`, top row first (+y up).
pub fn format_mask(words: &[u64; 4]) -> String {
    let mut out = String::with_capacity(17 * 16);

    for row in (0..16usize).rev() {
        let lane = (words[row / 4] >> ((row % 4) * 16)) as u16;

        for col in 0..16 {
            out.push(if lane & (1 << col) != 0 { 'X' } else { '.' });
        }

        out.push('\n');
    }

    out
}

/// One-line summary of an area's shape and bounds.
pub fn format_area(key: AreaKey) -> String {
    let mut out = String::new();
    write!(
        out,
        "{}x{}, cells {}, ({}, {}) to ({}, {})",
        key.width(),
        key.height(),
        key.cell_count(),
        key.x0(),
        key.y0(),
        key.x1(),
        key.y1()
    )
    .expect("writing to a String cannot fail");
    out
}
