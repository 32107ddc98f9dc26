//! Patch dissimilarity kernel.

use crate::image::ImageView;

/// Sum of squared differences between two `(2 * radius + 1)` square windows
/// centered at `(ax, ay)` in `a` and `(bx, by)` in `b`.
///
/// This is a pure scoring kernel: identical inputs always yield the same
/// value (the accumulation order is fixed row-major, and every per-pixel
/// term is an exact integer below the `f32` mantissa limit). Both windows
/// must lie fully inside their images; callers are responsible for bounds
/// checks before invoking it.
pub fn patch_ssd(
    a: ImageView<'_, u8>,
    ax: usize,
    ay: usize,
    b: ImageView<'_, u8>,
    bx: usize,
    by: usize,
    radius: usize,
) -> f32 {
    let mut sum = 0.0f32;
    let span = 2 * radius + 1;
    for dy in 0..span {
        let row_a = a.row(ay - radius + dy).expect("window inside image a");
        let row_b = b.row(by - radius + dy).expect("window inside image b");
        let win_a = &row_a[ax - radius..ax + radius + 1];
        let win_b = &row_b[bx - radius..bx + radius + 1];
        for (pa, pb) in win_a.iter().zip(win_b) {
            let diff = i32::from(*pa) - i32::from(*pb);
            sum += (diff * diff) as f32;
        }
    }
    sum
}
