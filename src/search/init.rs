//! Offset field initialization.

use crate::field::{Cell, Offset, OffsetField};
use crate::image::ImageView;
use crate::kernel::patch_ssd;
use crate::search::SearchParams;
use rand::Rng;

/// Fills the interior of `field` with uniformly drawn random offsets and
/// their measured qualities. Border cells keep the default cell.
///
/// Draws are rejected until the target window is addressable; with the wide
/// processing border every draw within the displacement bound already is, so
/// the loop settles on the first attempt.
pub fn initialize_random<R: Rng>(
    field: &mut OffsetField,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
    rng: &mut R,
) {
    debug_assert!(field.width() == a.width() && field.height() == a.height());
    let Some((cols, rows)) = params.interior(a.width(), a.height()) else {
        return;
    };
    for y in rows {
        for x in cols.clone() {
            let offset = loop {
                let candidate = Offset::new(
                    rng.random_range(-params.max_offset..=params.max_offset),
                    rng.random_range(-params.max_offset..=params.max_offset),
                );
                if params.target_addressable(b.width(), b.height(), x, y, candidate) {
                    break candidate;
                }
            };
            let quality = score(a, b, x, y, offset, params);
            field.put(x, y, Cell { offset, quality });
        }
    }
}

/// Seeds the interior of `field` from a coarser-resolution field.
///
/// Grid positions are resampled nearest-neighbor and the displacement
/// magnitudes are multiplied by `scale`, the resolution ratio between the
/// two levels; a displacement measured in coarse pixels covers `scale`
/// times as many fine pixels. Scaled offsets are clamped per axis to the
/// displacement bound, and every quality is remeasured against the
/// fine-level images so the cache matches what consumers will read.
pub fn initialize_from_seed(
    field: &mut OffsetField,
    coarse: &OffsetField,
    scale: u32,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
) {
    debug_assert!(field.width() == a.width() && field.height() == a.height());
    let Some((cols, rows)) = params.interior(a.width(), a.height()) else {
        return;
    };
    let scale = scale.max(1) as usize;
    for y in rows {
        for x in cols.clone() {
            let cx = (x / scale).min(coarse.width() - 1);
            let cy = (y / scale).min(coarse.height() - 1);
            let seed = coarse.cell(cx, cy).offset;
            let offset = Offset::new(
                (seed.dx * scale as i32).clamp(-params.max_offset, params.max_offset),
                (seed.dy * scale as i32).clamp(-params.max_offset, params.max_offset),
            );
            debug_assert!(params.target_addressable(b.width(), b.height(), x, y, offset));
            let quality = score(a, b, x, y, offset, params);
            field.put(x, y, Cell { offset, quality });
        }
    }
}

fn score(
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    x: usize,
    y: usize,
    offset: Offset,
    params: &SearchParams,
) -> f32 {
    let bx = (x as i64 + i64::from(offset.dx)) as usize;
    let by = (y as i64 + i64::from(offset.dy)) as usize;
    patch_ssd(a, x, y, b, bx, by, params.match_radius)
}
