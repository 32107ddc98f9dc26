//! Randomized correspondence search.
//!
//! [`SearchParams`] carries the per-run configuration and [`Matcher`] is the
//! high-level entry point: it validates the parameters once, checks that the
//! two inputs agree in size, and then runs the coarse-to-fine driver.

use crate::field::{Offset, OffsetField};
use crate::image::ImageView;
use crate::util::{PatchFlowError, PatchFlowResult};
use rand::Rng;
use std::ops::Range;

pub(crate) mod init;
pub(crate) mod propagate;
pub(crate) mod pyramid;
pub(crate) mod random;

pub(crate) use init::{initialize_from_seed, initialize_random};
pub(crate) use propagate::propagation_pass;
pub(crate) use random::random_search_pass;
#[cfg(feature = "rayon")]
pub(crate) use random::random_search_pass_par;

/// Per-run configuration of the correspondence search.
#[derive(Clone, Copy, Debug)]
pub struct SearchParams {
    /// Half-width of the square comparison window.
    pub match_radius: usize,
    /// Bound on the absolute displacement per axis.
    pub max_offset: i32,
    /// Initial random-search radius; `None` uses `max_offset` (larger radii
    /// would only produce candidates past the displacement bound).
    pub search_radius: Option<u32>,
    /// Per-step contraction of the random-search radius, strictly in (0, 1).
    pub search_ratio: f32,
    /// Number of propagation/random-search pairs per pyramid level.
    pub iterations: usize,
    /// Number of pyramid levels; 1 disables coarse-to-fine seeding.
    pub levels: usize,
    /// Stop a level early once a full iteration improves no cell.
    pub early_stop: bool,
    /// Run the random-search pass on multiple threads (`rayon` feature).
    pub parallel: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            match_radius: 4,
            max_offset: 20,
            search_radius: None,
            search_ratio: 0.5,
            iterations: 4,
            levels: 1,
            early_stop: false,
            parallel: false,
        }
    }
}

impl SearchParams {
    /// Checks the configuration, returning the first violation found.
    pub fn validate(&self) -> PatchFlowResult<()> {
        if !(self.search_ratio > 0.0 && self.search_ratio < 1.0) {
            return Err(PatchFlowError::InvalidSearchRatio {
                got: self.search_ratio,
            });
        }
        if self.max_offset < 0 {
            return Err(PatchFlowError::InvalidParameter {
                name: "max_offset",
                reason: "must be non-negative",
            });
        }
        if self.levels == 0 {
            return Err(PatchFlowError::InvalidParameter {
                name: "levels",
                reason: "at least one pyramid level is required",
            });
        }
        Ok(())
    }

    /// Margin excluded from processing.
    ///
    /// The wider `match_radius + max_offset` variant is used so that every
    /// displacement within the per-axis bound keeps the target window fully
    /// addressable, for any pixel of the processed region.
    pub fn border(&self) -> usize {
        self.match_radius + self.max_offset.unsigned_abs() as usize
    }

    pub(crate) fn initial_search_radius(&self) -> f32 {
        match self.search_radius {
            Some(radius) => radius as f32,
            None => self.max_offset as f32,
        }
    }

    /// Column and row ranges of the processed region, or `None` when the
    /// image is too small to contain any interior pixel.
    pub(crate) fn interior(
        &self,
        width: usize,
        height: usize,
    ) -> Option<(Range<usize>, Range<usize>)> {
        let border = self.border();
        if width <= 2 * border || height <= 2 * border {
            return None;
        }
        Some((border..width - border, border..height - border))
    }

    /// True when the comparison window around `(x, y) + offset` lies fully
    /// inside an image of the given size.
    pub(crate) fn target_addressable(
        &self,
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        offset: Offset,
    ) -> bool {
        let radius = self.match_radius as i64;
        let tx = x as i64 + i64::from(offset.dx);
        let ty = y as i64 + i64::from(offset.dy);
        tx >= radius && ty >= radius && tx < width as i64 - radius && ty < height as i64 - radius
    }
}

/// High-level dense correspondence matcher.
pub struct Matcher {
    params: SearchParams,
}

impl Matcher {
    /// Creates a matcher, rejecting invalid configurations up front.
    pub fn new(params: SearchParams) -> PatchFlowResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the validated configuration.
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Computes the offset field mapping patches of `a` to patches of `b`.
    ///
    /// The caller supplies the random source; seeding it fixes the entire
    /// run, so equal seeds and inputs give bit-identical fields.
    pub fn compute<R: Rng>(
        &self,
        a: ImageView<'_, u8>,
        b: ImageView<'_, u8>,
        rng: &mut R,
    ) -> PatchFlowResult<OffsetField> {
        if a.width() != b.width() || a.height() != b.height() {
            return Err(PatchFlowError::DimensionMismatch {
                width_a: a.width(),
                height_a: a.height(),
                width_b: b.width(),
                height_b: b.height(),
            });
        }
        pyramid::compute(&self.params, a, b, rng)
    }
}
