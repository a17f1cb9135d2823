//! Pipelines.
//!
//! End-to-end runs over corpus trees, implementing the light [pipeline::Pipeline] trait.
mod formatting;
mod incremental;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use formatting::FormatCorpora;
pub use incremental::IncrementalSampling;
pub use pipeline::Pipeline;
