//! Low-level building blocks for custom matching pipelines.
//!
//! These re-exports expose the individual passes behind [`crate::Matcher`]
//! for callers that drive their own schedule (custom iteration budgets,
//! per-pass instrumentation, external seeding). Most users should prefer
//! the high-level `Matcher` API.

pub use crate::search::init::{initialize_from_seed, initialize_random};
pub use crate::search::propagate::propagation_pass;
pub use crate::search::random::random_search_pass;
#[cfg(feature = "rayon")]
pub use crate::search::random::random_search_pass_par;
