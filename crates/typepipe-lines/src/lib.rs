//! Line processing for typepipe
//!
//! This crate provides type matching, normalization, the per-line transform
//! subprocess and the loop that ties them together.

mod error;
mod normalize;
mod pipeline;
mod predicate;
mod transform;

pub use error::{PipeError, Result};
pub use normalize::normalize;
pub use pipeline::{LinePipeline, LineStats, Outcome};
pub use predicate::{LineMatcher, matches, tag_matches};
pub use transform::Transformer;

// Re-export types used in our public API
pub use typepipe_types::{CommandSpec, Config, StripMode, TypeSet, TypeTag};
