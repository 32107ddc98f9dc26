//! Neighbor propagation pass.
//!
//! Each pixel considers reusing the displacement stored at two of its
//! neighbors. Good matches spread because the sweep visits the examined
//! neighbor before the pixel itself: odd iterations read the bottom/right
//! neighbors while sweeping bottom-to-top, right-to-left, and even
//! iterations read the top/left neighbors while sweeping top-to-bottom,
//! left-to-right. Breaking that pairing would propagate stale values from
//! the previous pass instead of the current one, so both directions derive
//! from the same iteration parity.
//!
//! The in-pass dependency on already-updated neighbors is also why this pass
//! stays sequential: a pixel-parallel sweep would race with the very cells
//! it reads. A wavefront (anti-diagonal) partition would be sound, but the
//! sequential sweep is the baseline kept here.

use crate::field::{Cell, OffsetField};
use crate::image::ImageView;
use crate::kernel::patch_ssd;
use crate::search::SearchParams;

/// Runs one propagation sweep for the 1-based iteration index `iteration`.
///
/// Returns the number of cells that adopted a neighbor's displacement.
pub fn propagation_pass(
    field: &mut OffsetField,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
    iteration: usize,
) -> usize {
    debug_assert!(field.width() == a.width() && field.height() == a.height());
    let Some((cols, rows)) = params.interior(a.width(), a.height()) else {
        return 0;
    };
    let sign: i64 = if iteration % 2 == 0 { -1 } else { 1 };

    let mut improved = 0;
    if sign > 0 {
        for y in rows.rev() {
            for x in cols.clone().rev() {
                improved += visit(field, a, b, params, x, y, sign);
            }
        }
    } else {
        for y in rows {
            for x in cols.clone() {
                improved += visit(field, a, b, params, x, y, sign);
            }
        }
    }
    improved
}

fn visit(
    field: &mut OffsetField,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
    x: usize,
    y: usize,
    sign: i64,
) -> usize {
    let current = field.cell(x, y);
    let mut best = current;

    let neighbors = [
        ((x as i64 + sign) as usize, y),
        (x, (y as i64 + sign) as usize),
    ];
    for (nx, ny) in neighbors {
        let Some(candidate) = field.offset(nx, ny) else {
            continue;
        };
        if candidate == best.offset {
            continue;
        }
        // An unaddressable target counts as infinitely bad.
        if !params.target_addressable(b.width(), b.height(), x, y, candidate) {
            continue;
        }
        let bx = (x as i64 + i64::from(candidate.dx)) as usize;
        let by = (y as i64 + i64::from(candidate.dy)) as usize;
        let quality = patch_ssd(a, x, y, b, bx, by, params.match_radius);
        if quality < best.quality {
            best = Cell {
                offset: candidate,
                quality,
            };
        }
    }

    if best.offset != current.offset {
        field.put(x, y, best);
        1
    } else {
        0
    }
}
