//! Random search pass.
//!
//! Each pixel perturbs its current displacement with an exponentially
//! shrinking radius, keeping strict improvements. Perturbation directions
//! are drawn uniformly from the 8 compass directions (the same discrete set
//! for every radius), not from a continuous angle distribution; the two
//! schemes explore differently and the ratio/radius defaults are tuned for
//! the discrete one.
//!
//! The pass touches only the pixel's own cell and the two read-only images,
//! so rows are independent. Randomness is expanded from one pass seed into
//! a per-row generator, which keeps the sequential and `rayon` variants
//! bit-identical and the whole run reproducible from the caller's seed.

use crate::field::{Cell, Offset, OffsetField};
use crate::image::ImageView;
use crate::kernel::patch_ssd;
use crate::search::SearchParams;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

const COMPASS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Runs one random-search sweep over the interior, seeded by `seed`.
///
/// Returns the number of cells whose displacement improved.
pub fn random_search_pass(
    field: &mut OffsetField,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
    seed: u64,
) -> usize {
    debug_assert!(field.width() == a.width() && field.height() == a.height());
    let Some((_, rows)) = params.interior(a.width(), a.height()) else {
        return 0;
    };
    let width = field.width();
    let mut improved = 0;
    for (y, row) in field.cells_mut().chunks_mut(width).enumerate() {
        if rows.contains(&y) {
            improved += search_row(row, y, a, b, params, row_seed(seed, y as u64));
        }
    }
    improved
}

/// Row-parallel variant of [`random_search_pass`]; produces the same field.
#[cfg(feature = "rayon")]
pub fn random_search_pass_par(
    field: &mut OffsetField,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
    seed: u64,
) -> usize {
    debug_assert!(field.width() == a.width() && field.height() == a.height());
    let Some((_, rows)) = params.interior(a.width(), a.height()) else {
        return 0;
    };
    let width = field.width();
    field
        .cells_mut()
        .par_chunks_mut(width)
        .enumerate()
        .map(|(y, row)| {
            if rows.contains(&y) {
                search_row(row, y, a, b, params, row_seed(seed, y as u64))
            } else {
                0
            }
        })
        .sum()
}

fn search_row(
    row: &mut [Cell],
    y: usize,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
    seed: u64,
) -> usize {
    let Some((cols, _)) = params.interior(a.width(), a.height()) else {
        return 0;
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut improved = 0;
    for x in cols {
        let start = row[x];
        let mut best = start;

        let mut radius = params.initial_search_radius();
        while radius >= 1.0 {
            let (dir_x, dir_y) = COMPASS[rng.random_range(0..COMPASS.len())];
            let candidate = Offset::new(
                best.offset.dx + (radius * dir_x as f32).round() as i32,
                best.offset.dy + (radius * dir_y as f32).round() as i32,
            );
            radius *= params.search_ratio;

            if candidate == best.offset {
                continue;
            }
            // Reject when either axis exceeds the bound, not only when both
            // do.
            if candidate.dx.abs() > params.max_offset || candidate.dy.abs() > params.max_offset {
                continue;
            }
            if !params.target_addressable(b.width(), b.height(), x, y, candidate) {
                continue;
            }

            let bx = (x as i64 + i64::from(candidate.dx)) as usize;
            let by = (y as i64 + i64::from(candidate.dy)) as usize;
            let quality = patch_ssd(a, x, y, b, bx, by, params.match_radius);
            if quality < best.quality {
                // Later, smaller perturbations explore around the improved
                // displacement rather than the original one.
                best = Cell {
                    offset: candidate,
                    quality,
                };
            }
        }

        if best.offset != start.offset {
            row[x] = best;
            improved += 1;
        }
    }
    improved
}

/// SplitMix64-style expansion of the pass seed into per-row streams.
///
/// Rows must receive decorrelated generators no matter which thread picks
/// them up, so the row index is mixed through a full avalanche rather than
/// added to the seed.
fn row_seed(seed: u64, row: u64) -> u64 {
    let mut z = seed ^ row.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
