//! Image pyramid construction for grayscale `u8` images.
//!
//! Downsampling uses a 2x2 box filter with integer rounding:
//! `dst = (a + b + c + d + 2) / 4`. The filter is deterministic, so two
//! pyramids built from equal inputs are equal level by level.

use crate::image::{ImageView, OwnedImage};
use crate::util::PatchFlowResult;

/// Owned image pyramid built from a base level.
///
/// Level 0 is the base resolution; each following level halves both
/// dimensions (rounding down, trailing odd rows and columns are dropped).
pub struct ImagePyramid {
    levels: Vec<OwnedImage>,
}

impl ImagePyramid {
    /// Builds a pyramid from a base grayscale view.
    ///
    /// `max_levels` is clamped to at least 1 so the base level is always
    /// present. Construction stops early once a level can no longer be
    /// halved.
    pub fn build_u8(base: ImageView<'_, u8>, max_levels: usize) -> PatchFlowResult<Self> {
        let max_levels = max_levels.max(1);
        let mut levels = vec![OwnedImage::from_view(base)];

        while levels.len() < max_levels {
            let src = levels.last().expect("levels is not empty").view();
            if src.width() < 2 || src.height() < 2 {
                break;
            }

            let dst_width = src.width() / 2;
            let dst_height = src.height() / 2;
            let mut dst = Vec::with_capacity(dst_width * dst_height);

            for y in 0..dst_height {
                let row0 = src.row(y * 2).expect("source row in bounds");
                let row1 = src.row(y * 2 + 1).expect("source row in bounds");
                for x in 0..dst_width {
                    let sum = u16::from(row0[2 * x])
                        + u16::from(row0[2 * x + 1])
                        + u16::from(row1[2 * x])
                        + u16::from(row1[2 * x + 1]);
                    dst.push(((sum + 2) / 4) as u8);
                }
            }

            levels.push(OwnedImage::new(dst, dst_width, dst_height)?);
        }

        Ok(Self { levels })
    }

    /// Returns all pyramid levels (level 0 is the base resolution).
    pub fn levels(&self) -> &[OwnedImage] {
        &self.levels
    }

    /// Returns a view for a specific pyramid level.
    pub fn level(&self, index: usize) -> Option<ImageView<'_, u8>> {
        self.levels.get(index).map(|level| level.view())
    }
}
