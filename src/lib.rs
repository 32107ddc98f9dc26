//! PatchFlow computes approximate dense correspondence fields between two
//! equal-sized grayscale images with the randomized PatchMatch scheme
//! (Barnes et al., 2009): random initialization, neighbor propagation and
//! shrinking-radius random search, optionally seeded through a
//! coarse-to-fine image pyramid.
//!
//! The returned field holds one integer displacement and its
//! sum-of-squared-differences quality per pixel. Randomness is injected by
//! the caller, so a fixed seed reproduces a run bit for bit. Optional
//! features: `rayon` (parallel random search), `image-io` (file loading and
//! flow visualization), `tracing` (structured per-level instrumentation).

pub mod field;
pub mod image;
pub mod kernel;
pub mod lowlevel;
mod search;
pub(crate) mod trace;
pub mod util;
#[cfg(feature = "image-io")]
pub mod viz;

pub use field::{Cell, Offset, OffsetField};
pub use image::pyramid::ImagePyramid;
pub use image::{ImageView, OwnedImage};
pub use search::{Matcher, SearchParams};
pub use util::{PatchFlowError, PatchFlowResult};
