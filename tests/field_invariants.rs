//! Invariants every pass must preserve: untouched borders, bounded offsets,
//! monotonically improving qualities, and seed-reproducible runs.

use patchflow::lowlevel::{initialize_random, propagation_pass, random_search_pass};
use patchflow::{ImageView, Matcher, OffsetField, SearchParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTH: usize = 32;
const HEIGHT: usize = 32;

fn noise(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height).map(|_| rng.random()).collect()
}

fn small_params() -> SearchParams {
    SearchParams {
        match_radius: 2,
        max_offset: 4,
        search_ratio: 0.5,
        iterations: 4,
        ..SearchParams::default()
    }
}

fn initialized_field(
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
    seed: u64,
) -> OffsetField {
    let mut field = OffsetField::new(a.width(), a.height()).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    initialize_random(&mut field, a, b, params, &mut rng);
    field
}

#[test]
fn border_cells_never_change() {
    let data_a = noise(WIDTH, HEIGHT, 10);
    let data_b = noise(WIDTH, HEIGHT, 11);
    let a = ImageView::from_slice(&data_a, WIDTH, HEIGHT).unwrap();
    let b = ImageView::from_slice(&data_b, WIDTH, HEIGHT).unwrap();
    let params = small_params();
    let border = params.border();

    let mut field = initialized_field(a, b, &params, 42);
    let after_init = field.clone();

    let mut rng = StdRng::seed_from_u64(43);
    for iteration in 1..=4 {
        propagation_pass(&mut field, a, b, &params, iteration);
        random_search_pass(&mut field, a, b, &params, rng.random());
    }

    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let interior =
                x >= border && x < WIDTH - border && y >= border && y < HEIGHT - border;
            if !interior {
                assert_eq!(field.get(x, y), after_init.get(x, y), "border cell ({x},{y})");
            }
        }
    }
}

#[test]
fn adopted_offsets_stay_bounded_and_addressable() {
    let data_a = noise(WIDTH, HEIGHT, 20);
    let data_b = noise(WIDTH, HEIGHT, 21);
    let a = ImageView::from_slice(&data_a, WIDTH, HEIGHT).unwrap();
    let b = ImageView::from_slice(&data_b, WIDTH, HEIGHT).unwrap();
    let params = small_params();

    let matcher = Matcher::new(params).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let field = matcher.compute(a, b, &mut rng).unwrap();

    let border = params.border();
    let radius = params.match_radius as i64;
    for y in border..HEIGHT - border {
        for x in border..WIDTH - border {
            let offset = field.offset(x, y).unwrap();
            assert!(offset.dx.abs() <= params.max_offset);
            assert!(offset.dy.abs() <= params.max_offset);

            let tx = x as i64 + i64::from(offset.dx);
            let ty = y as i64 + i64::from(offset.dy);
            assert!(tx >= radius && tx < WIDTH as i64 - radius);
            assert!(ty >= radius && ty < HEIGHT as i64 - radius);
        }
    }
}

#[test]
fn passes_never_worsen_quality() {
    let data_a = noise(WIDTH, HEIGHT, 30);
    let data_b = noise(WIDTH, HEIGHT, 31);
    let a = ImageView::from_slice(&data_a, WIDTH, HEIGHT).unwrap();
    let b = ImageView::from_slice(&data_b, WIDTH, HEIGHT).unwrap();
    let params = small_params();

    let mut field = initialized_field(a, b, &params, 99);
    let mut rng = StdRng::seed_from_u64(100);

    for iteration in 1..=3 {
        let before: Vec<f32> = field.cells().iter().map(|c| c.quality).collect();
        propagation_pass(&mut field, a, b, &params, iteration);
        for (cell, previous) in field.cells().iter().zip(&before) {
            assert!(cell.quality <= *previous);
        }

        let before: Vec<f32> = field.cells().iter().map(|c| c.quality).collect();
        random_search_pass(&mut field, a, b, &params, rng.random());
        for (cell, previous) in field.cells().iter().zip(&before) {
            assert!(cell.quality <= *previous);
        }
    }
}

#[test]
fn equal_seeds_give_bit_identical_fields() {
    let data_a = noise(WIDTH, HEIGHT, 40);
    let data_b = noise(WIDTH, HEIGHT, 41);
    let a = ImageView::from_slice(&data_a, WIDTH, HEIGHT).unwrap();
    let b = ImageView::from_slice(&data_b, WIDTH, HEIGHT).unwrap();

    let params = SearchParams {
        levels: 2,
        ..small_params()
    };
    let matcher = Matcher::new(params).unwrap();

    let mut rng = StdRng::seed_from_u64(1234);
    let first = matcher.compute(a, b, &mut rng).unwrap();
    let mut rng = StdRng::seed_from_u64(1234);
    let second = matcher.compute(a, b, &mut rng).unwrap();

    assert_eq!(first, second);
}

#[test]
fn zero_iterations_return_the_initialized_field() {
    let data_a = noise(WIDTH, HEIGHT, 50);
    let data_b = noise(WIDTH, HEIGHT, 51);
    let a = ImageView::from_slice(&data_a, WIDTH, HEIGHT).unwrap();
    let b = ImageView::from_slice(&data_b, WIDTH, HEIGHT).unwrap();

    let params = SearchParams {
        iterations: 0,
        ..small_params()
    };
    let matcher = Matcher::new(params).unwrap();
    let mut rng = StdRng::seed_from_u64(77);
    let field = matcher.compute(a, b, &mut rng).unwrap();

    let expected = initialized_field(a, b, &params, 77);
    assert_eq!(field, expected);
}
