/*! Random sample generation

Samples are drawn by shuffling every corpus index and cutting the permutation in consecutive blocks.

With [SamplingPolicy::PerSplit], new permutations are drawn from the same random stream
until enough samples are emitted: samples coming from the same permutation (split) are disjoint,
samples from different splits may overlap.

[SamplingPolicy::Strict] only allows a single permutation, and fails if it can't provide every sample.
!*/
use std::collections::HashSet;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Error;

use super::SliceFactor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingPolicy {
    /// Disjoint within a split, reshuffle when a split is exhausted.
    #[default]
    PerSplit,
    /// Disjoint across all samples, error if infeasible.
    Strict,
}

/// A set of line indices, in permutation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    split: usize,
    indices: Vec<usize>,
}

impl Sample {
    /// Index of the permutation this sample has been cut from.
    pub fn split(&self) -> usize {
        self.split
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Indices of `[0, corpus_size)` that are *not* in the sample.
    pub fn complement(&self, corpus_size: usize) -> HashSet<usize> {
        let taken: HashSet<usize> = self.indices.iter().copied().collect();
        (0..corpus_size).filter(|i| !taken.contains(i)).collect()
    }
}

/// Seeded random source. Without a seed, it is initialized from system entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Generate `k` samples of `slice_factor.sample_size(corpus_size)` indices each.
///
/// The same `(corpus_size, k, slice_factor, seed, policy)` always yields the same samples.
pub fn generate_samples(
    corpus_size: usize,
    k: usize,
    slice_factor: SliceFactor,
    seed: Option<u64>,
    policy: SamplingPolicy,
) -> Result<Vec<Sample>, Error> {
    let mut rng = rng_from_seed(seed);
    generate_samples_with_rng(corpus_size, k, slice_factor, policy, &mut rng)
}

/// Same as [generate_samples] but consumes a caller-provided random source.
fn generate_samples_with_rng<R: rand::Rng + ?Sized>(
    corpus_size: usize,
    k: usize,
    slice_factor: SliceFactor,
    policy: SamplingPolicy,
    rng: &mut R,
) -> Result<Vec<Sample>, Error> {
    if corpus_size == 0 {
        return Err(Error::InvalidInput(
            "corpus size must be positive".to_string(),
        ));
    }
    if k == 0 {
        return Err(Error::InvalidInput(
            "number of samples must be positive".to_string(),
        ));
    }

    let sample_size = slice_factor.sample_size(corpus_size);
    let per_split_capacity = (corpus_size / sample_size).max(1);

    if policy == SamplingPolicy::Strict && k > per_split_capacity {
        return Err(Error::InvalidInput(format!(
            "Cannot sample {} disjoint samples of size {} from {} lines.",
            k, sample_size, corpus_size
        )));
    }

    debug!(
        "sampling {} x {} indices out of {} ({} per split)",
        k, sample_size, corpus_size, per_split_capacity
    );

    let mut samples = Vec::with_capacity(k);
    let mut split = 0;
    while samples.len() < k {
        let mut permutation: Vec<usize> = (0..corpus_size).collect();
        permutation.shuffle(rng);

        let take = per_split_capacity.min(k - samples.len());
        samples.extend(
            permutation
                .chunks_exact(sample_size)
                .take(take)
                .map(|block| Sample {
                    split,
                    indices: block.to_vec(),
                }),
        );
        split += 1;
    }

    Ok(samples)
}
