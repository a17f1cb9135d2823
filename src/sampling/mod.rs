/*! Incremental exposure sampling

Draws random subsets of a corpus' lines, each covering `1/slice_factor` of it.
See [sampler::generate_samples] for the partitioning contract.
!*/
mod sampler;
mod slice;

pub use sampler::{generate_samples, rng_from_seed, Sample, SamplingPolicy};
pub use slice::SliceFactor;
