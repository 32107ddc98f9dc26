//! Coarse-to-fine driver.
//!
//! Builds box-filter pyramids of both inputs and optimizes one offset field
//! per level, coarsest first. Each finished level seeds the next finer one
//! with doubled displacements; the finest field is the run's result. Levels
//! are strictly sequential, a finer level starts only from a finalized
//! coarser field.

use crate::field::OffsetField;
use crate::image::pyramid::ImagePyramid;
use crate::image::ImageView;
use crate::search::{
    initialize_from_seed, initialize_random, propagation_pass, random_search_pass, SearchParams,
};
use crate::trace::{trace_event, trace_span};
use crate::util::PatchFlowResult;
use rand::Rng;

pub(crate) fn compute<R: Rng>(
    params: &SearchParams,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    rng: &mut R,
) -> PatchFlowResult<OffsetField> {
    let depth = usable_depth(params, a.width(), a.height());
    let pyr_a = ImagePyramid::build_u8(a, depth)?;
    let pyr_b = ImagePyramid::build_u8(b, depth)?;
    let levels = pyr_a.levels().len().min(pyr_b.levels().len());

    let mut field: Option<OffsetField> = None;
    for level in (0..levels).rev() {
        let level_a = pyr_a.level(level).expect("level index in range");
        let level_b = pyr_b.level(level).expect("level index in range");

        let _span = trace_span!(
            "level",
            level = level,
            width = level_a.width(),
            height = level_a.height()
        )
        .entered();

        let mut current = OffsetField::new(level_a.width(), level_a.height())?;
        match field.take() {
            // Each halving doubled the resolution, so seeded displacements
            // are rescaled by 2.
            Some(coarse) => {
                initialize_from_seed(&mut current, &coarse, 2, level_a, level_b, params)
            }
            None => initialize_random(&mut current, level_a, level_b, params, rng),
        }

        run_level(&mut current, level_a, level_b, params, rng);
        field = Some(current);
    }

    Ok(field.expect("pyramid has at least one level"))
}

/// Alternates propagation and random search for the configured budget.
fn run_level<R: Rng>(
    field: &mut OffsetField,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
    rng: &mut R,
) {
    for iteration in 1..=params.iterations {
        let propagated = propagation_pass(field, a, b, params, iteration);
        let pass_seed = rng.random::<u64>();
        let refined = run_random_search(field, a, b, params, pass_seed);
        trace_event!(
            "iteration",
            iteration = iteration,
            propagated = propagated,
            refined = refined
        );
        if params.early_stop && propagated == 0 && refined == 0 {
            break;
        }
    }
}

#[cfg(feature = "rayon")]
fn run_random_search(
    field: &mut OffsetField,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
    seed: u64,
) -> usize {
    if params.parallel {
        crate::search::random_search_pass_par(field, a, b, params, seed)
    } else {
        random_search_pass(field, a, b, params, seed)
    }
}

#[cfg(not(feature = "rayon"))]
fn run_random_search(
    field: &mut OffsetField,
    a: ImageView<'_, u8>,
    b: ImageView<'_, u8>,
    params: &SearchParams,
    seed: u64,
) -> usize {
    random_search_pass(field, a, b, params, seed)
}

/// Caps the pyramid depth so the coarsest level still contains at least one
/// pixel outside the processing border.
fn usable_depth(params: &SearchParams, width: usize, height: usize) -> usize {
    let min_dim = width.min(height);
    let mut depth = 1;
    while depth < params.levels && (min_dim >> depth) > 2 * params.border() {
        depth += 1;
    }
    depth
}
