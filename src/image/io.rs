//! Grayscale image loading via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Decode failures are
//! surfaced as [`PatchFlowError::ImageIo`]; the matcher itself never
//! touches the filesystem.

use crate::image::{ImageView, OwnedImage};
use crate::util::{PatchFlowError, PatchFlowResult};
use std::path::Path;

/// Creates a borrowed view over a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> PatchFlowResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Copies a grayscale image buffer into an owned image.
pub fn owned_from_gray_image(img: &image::GrayImage) -> PatchFlowResult<OwnedImage> {
    OwnedImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Loads an image from disk, converting to grayscale if needed.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> PatchFlowResult<OwnedImage> {
    let img = image::open(path)
        .map_err(|err| PatchFlowError::ImageIo {
            reason: err.to_string(),
        })?
        .to_luma8();
    owned_from_gray_image(&img)
}
