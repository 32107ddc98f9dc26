//! Error types for patchflow.

use thiserror::Error;

/// Result alias for patchflow operations.
pub type PatchFlowResult<T> = std::result::Result<T, PatchFlowError>;

/// Errors that can occur when configuring or running the matcher.
#[derive(Debug, Error, PartialEq)]
pub enum PatchFlowError {
    /// Width or height is zero.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The row stride is smaller than the image width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer cannot hold the requested view.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The search ratio must lie strictly inside (0, 1).
    #[error("search ratio {got} is outside the open interval (0, 1)")]
    InvalidSearchRatio { got: f32 },
    /// A configuration value was rejected.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// The two input images differ in size.
    #[error("image dimensions differ: {width_a}x{height_a} vs {width_b}x{height_b}")]
    DimensionMismatch {
        width_a: usize,
        height_a: usize,
        width_b: usize,
        height_b: usize,
    },
    /// Decoding an image file failed.
    #[cfg(feature = "image-io")]
    #[error("image io failed: {reason}")]
    ImageIo { reason: String },
}
