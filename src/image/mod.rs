//! Image buffers, views and pyramid utilities.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit
//! stride (elements between row starts, so padded rows are representable).
//! `OwnedImage` is the contiguous owned counterpart used for pyramid levels
//! and decoded files.

use crate::util::{PatchFlowError, PatchFlowResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod pyramid;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> PatchFlowResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> PatchFlowResult<Self> {
        if width == 0 || height == 0 {
            return Err(PatchFlowError::InvalidDimensions { width, height });
        }
        if stride < width {
            return Err(PatchFlowError::InvalidStride { width, stride });
        }
        let needed = (height - 1)
            .checked_mul(stride)
            .and_then(|v| v.checked_add(width))
            .ok_or(PatchFlowError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(PatchFlowError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }
}

/// Owned contiguous grayscale image buffer.
#[derive(Clone)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Creates an owned image from a contiguous buffer of exactly
    /// `width * height` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> PatchFlowResult<Self> {
        if width == 0 || height == 0 {
            return Err(PatchFlowError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(PatchFlowError::InvalidDimensions { width, height })?;
        if data.len() != needed {
            return Err(PatchFlowError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Copies a borrowed view into an owned contiguous buffer.
    pub fn from_view(view: ImageView<'_, u8>) -> Self {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            data.extend_from_slice(view.row(y).expect("row within view bounds"));
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the raw sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageView, OwnedImage};

    #[test]
    fn view_indexes_with_stride() {
        let data: Vec<u8> = (0u8..12).collect();
        let view = ImageView::new(&data, 3, 3, 4).unwrap();
        assert_eq!(view.get(2, 1).copied(), Some(6));
        assert_eq!(view.row(2).unwrap(), &[8, 9, 10]);
        assert!(view.get(3, 0).is_none());
        assert!(view.row(3).is_none());
    }

    #[test]
    fn owned_image_round_trips_padded_views() {
        let data: Vec<u8> = (0u8..8).collect();
        let view = ImageView::new(&data, 3, 2, 4).unwrap();
        let owned = OwnedImage::from_view(view);
        assert_eq!(owned.data(), &[0, 1, 2, 4, 5, 6]);
        assert_eq!(owned.view().stride(), 3);
    }
}
