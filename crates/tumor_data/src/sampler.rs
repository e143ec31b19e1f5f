use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

/// A `Sampler` defines the order in which a training loop visits
/// dataset indices.
///
/// `iter(epoch)` returns the sequence for that epoch. Samplers that
/// shuffle derive their RNG from `base_seed + epoch`, so the same
/// epoch always replays the same order while consecutive epochs differ.
///
/// Implementations must be `Send + Sync` so one sampler instance can be
/// shared across threads.
pub trait Sampler: Send + Sync {
    fn iter(&self, epoch: usize) -> Box<dyn Iterator<Item = usize> + Send + '_>;
}

// ============================================================================
// SequentialSampler
// ============================================================================

/// Yields `0..dataset_size` in order. The evaluation-pass sampler.
#[derive(Debug, Clone)]
pub struct SequentialSampler {
    dataset_size: usize,
}

impl SequentialSampler {
    pub fn new(dataset_size: usize) -> Self {
        Self { dataset_size }
    }
}

impl Sampler for SequentialSampler {
    fn iter(&self, _epoch: usize) -> Box<dyn Iterator<Item = usize> + Send + '_> {
        Box::new(0..self.dataset_size)
    }
}

// ============================================================================
// SubsetRandomSampler
// ============================================================================

/// Shuffles a fixed subset of indices every epoch.
///
/// This is how a persisted train/test split is consumed: hand the
/// `train_indices` side to a `SubsetRandomSampler` and the training loop
/// sees a fresh deterministic permutation of the same subset each epoch.
///
/// Indices must be unique and within `0..dataset_size`.
///
/// # Example
/// ```ignore
/// let split = load_or_create(dataset.len(), &SplitConfig::default(), false)?;
/// let sampler = SubsetRandomSampler::new(dataset.len(), split.train_indices, 42)?;
/// for index in sampler.iter(epoch) {
///     let sample = dataset.get(index)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SubsetRandomSampler {
    indices: Vec<usize>,
    base_seed: u64,
}

impl SubsetRandomSampler {
    pub fn new(dataset_size: usize, indices: Vec<usize>, base_seed: u64) -> Result<Self> {
        ensure!(!indices.is_empty(), "Indices must not be empty");

        let mut seen = HashSet::with_capacity(indices.len());
        for &index in &indices {
            ensure!(
                index < dataset_size,
                "Index {} out of bounds for dataset of size {}",
                index,
                dataset_size
            );
            ensure!(seen.insert(index), "Duplicate index {} in subset", index);
        }
        Ok(Self { indices, base_seed })
    }

    #[inline]
    fn derive_rng_for_epoch(&self, epoch: usize) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(epoch as u64))
    }
}

impl Sampler for SubsetRandomSampler {
    fn iter(&self, epoch: usize) -> Box<dyn Iterator<Item = usize> + Send + '_> {
        let mut shuffled = self.indices.clone();
        shuffled.shuffle(&mut self.derive_rng_for_epoch(epoch));
        Box::new(shuffled.into_iter())
    }
}
