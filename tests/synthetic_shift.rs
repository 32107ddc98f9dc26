//! End-to-end convergence checks on synthetically shifted image pairs,
//! where the true correspondence field is known exactly.

use patchflow::{ImageView, Matcher, Offset, SearchParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn noise(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height).map(|_| rng.random()).collect()
}

/// Builds `b` such that `b[p + t] == a[p]`: the content of `a` moved by the
/// translation `t = (dx, dy)`. Uncovered samples are left at zero.
fn shift(a: &[u8], width: usize, height: usize, dx: i32, dy: i32) -> Vec<u8> {
    let mut b = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let sx = x as i32 - dx;
            let sy = y as i32 - dy;
            if sx >= 0 && sy >= 0 && (sx as usize) < width && (sy as usize) < height {
                b[y * width + x] = a[sy as usize * width + sx as usize];
            }
        }
    }
    b
}

struct InteriorStats {
    total: usize,
    exact: usize,
}

fn count_exact(
    field: &patchflow::OffsetField,
    border: usize,
    expected: Offset,
    require_zero_quality: bool,
) -> InteriorStats {
    let mut stats = InteriorStats { total: 0, exact: 0 };
    for y in border..field.height() - border {
        for x in border..field.width() - border {
            let cell = field.get(x, y).unwrap();
            stats.total += 1;
            if cell.offset == expected && (!require_zero_quality || cell.quality == 0.0) {
                stats.exact += 1;
            }
        }
    }
    stats
}

#[test]
fn constant_translation_is_recovered() {
    let (width, height) = (64, 64);
    let expected = Offset::new(5, -3);
    let data_a = noise(width, height, 2024);
    let data_b = shift(&data_a, width, height, expected.dx, expected.dy);
    let a = ImageView::from_slice(&data_a, width, height).unwrap();
    let b = ImageView::from_slice(&data_b, width, height).unwrap();

    let params = SearchParams {
        match_radius: 4,
        max_offset: 15,
        search_ratio: 0.5,
        iterations: 10,
        levels: 1,
        ..SearchParams::default()
    };
    let matcher = Matcher::new(params).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let field = matcher.compute(a, b, &mut rng).unwrap();

    let stats = count_exact(&field, params.border(), expected, true);
    assert!(stats.total > 0);
    assert!(
        stats.exact * 10 >= stats.total * 9,
        "only {}/{} interior cells recovered the translation",
        stats.exact,
        stats.total
    );
}

#[test]
fn pyramid_and_single_level_agree_on_the_limit() {
    let (width, height) = (64, 64);
    let expected = Offset::new(4, -2);
    let data_a = noise(width, height, 31337);
    let data_b = shift(&data_a, width, height, expected.dx, expected.dy);
    let a = ImageView::from_slice(&data_a, width, height).unwrap();
    let b = ImageView::from_slice(&data_b, width, height).unwrap();

    let base = SearchParams {
        match_radius: 2,
        max_offset: 6,
        search_ratio: 0.5,
        iterations: 8,
        ..SearchParams::default()
    };

    let single = Matcher::new(SearchParams { levels: 1, ..base }).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let flat = single.compute(a, b, &mut rng).unwrap();

    // Depth is capped internally once coarse levels lose their interior.
    let pyramid = Matcher::new(SearchParams { levels: 3, ..base }).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let seeded = pyramid.compute(a, b, &mut rng).unwrap();

    let border = base.border();
    let flat_stats = count_exact(&flat, border, expected, false);
    let seeded_stats = count_exact(&seeded, border, expected, false);
    assert!(flat_stats.exact * 10 >= flat_stats.total * 9);
    assert!(seeded_stats.exact * 10 >= seeded_stats.total * 9);

    let mut agreeing = 0;
    let mut total = 0;
    for y in border..height - border {
        for x in border..width - border {
            total += 1;
            if flat.offset(x, y) == seeded.offset(x, y) {
                agreeing += 1;
            }
        }
    }
    assert!(
        agreeing * 10 >= total * 9,
        "runs agree on only {agreeing}/{total} interior cells"
    );
}

#[test]
fn uniform_images_keep_every_offset_in_bounds() {
    let (width, height) = (32, 32);
    let data = vec![128u8; width * height];
    let view = ImageView::from_slice(&data, width, height).unwrap();

    let params = SearchParams {
        match_radius: 2,
        max_offset: 4,
        search_ratio: 0.5,
        iterations: 3,
        levels: 1,
        ..SearchParams::default()
    };
    let matcher = Matcher::new(params).unwrap();
    let mut rng = StdRng::seed_from_u64(12);
    let field = matcher.compute(view, view, &mut rng).unwrap();

    let border = params.border();
    let radius = params.match_radius as i64;
    for y in border..height - border {
        for x in border..width - border {
            let cell = field.get(x, y).unwrap();
            // Any offset scores zero here, so no particular value is
            // expected.
            assert_eq!(cell.quality, 0.0);
            assert!(cell.offset.dx.abs() <= params.max_offset);
            assert!(cell.offset.dy.abs() <= params.max_offset);
            let tx = x as i64 + i64::from(cell.offset.dx);
            let ty = y as i64 + i64::from(cell.offset.dy);
            assert!(tx >= radius && tx < width as i64 - radius);
            assert!(ty >= radius && ty < height as i64 - radius);
        }
    }
}
