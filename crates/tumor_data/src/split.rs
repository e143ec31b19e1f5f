//! Fixed train/test index split with an on-disk cache.
//!
//! The split is a single shuffle-and-slice over `0..dataset_len`. The
//! first time it is computed it is written to a cache file, and later
//! runs read the same partition back so training and evaluation always
//! see the same indices.

use anyhow::{ensure, Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A fixed partition of dataset indices.
///
/// Both sequences are stored in the order they were sliced from the
/// shuffled index list, and round-trip through the cache file unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitIndices {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl SplitIndices {
    /// Total number of indices across both sides.
    pub fn total(&self) -> usize {
        self.train_indices.len() + self.test_indices.len()
    }
}

/// Options for computing and caching a split.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Fraction of indices held out for testing.
    pub test_fraction: f64,
    /// Where the computed split is persisted.
    pub cache_path: PathBuf,
    /// Shuffle seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            cache_path: PathBuf::from("dataset/split_indices.bin"),
            seed: None,
        }
    }
}

impl SplitConfig {
    /// Overrides the held-out fraction and returns the modified config.
    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Overrides the cache location and returns the modified config.
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    /// Fixes the shuffle seed and returns the modified config.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Returns the train/test split for a dataset of `dataset_len` pairs.
///
/// If the cache file exists and `fresh` is false, the stored split is
/// decoded and returned as-is. Otherwise the indices `0..dataset_len`
/// are shuffled, sliced at `floor(test_fraction * dataset_len)` (the
/// head becomes the test side), persisted, and returned. A corrupt or
/// unreadable cache propagates as an error.
pub fn load_or_create(dataset_len: usize, config: &SplitConfig, fresh: bool) -> Result<SplitIndices> {
    ensure!(
        (0.0..=1.0).contains(&config.test_fraction),
        "Test fraction must be in [0.0, 1.0] range (got {})",
        config.test_fraction
    );

    if !fresh && config.cache_path.is_file() {
        return load(&config.cache_path);
    }

    let split = generate(dataset_len, config);
    store(&config.cache_path, &split)?;
    info!(
        "wrote train/test split ({} train / {} test) to {}",
        split.train_indices.len(),
        split.test_indices.len(),
        config.cache_path.display()
    );
    Ok(split)
}

fn generate(dataset_len: usize, config: &SplitConfig) -> SplitIndices {
    let mut indices: Vec<usize> = (0..dataset_len).collect();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    indices.shuffle(&mut rng);

    let boundary = (config.test_fraction * dataset_len as f64).floor() as usize;
    SplitIndices {
        train_indices: indices[boundary..].to_vec(),
        test_indices: indices[..boundary].to_vec(),
    }
}

fn load(path: &Path) -> Result<SplitIndices> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read split cache: {}", path.display()))?;
    bincode::deserialize(&bytes)
        .with_context(|| format!("Failed to decode split cache: {}", path.display()))
}

fn store(path: &Path, split: &SplitIndices) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create split cache directory: {}", parent.display())
            })?;
        }
    }
    let bytes = bincode::serialize(split).context("Failed to encode split indices")?;
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write split cache: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> SplitConfig {
        SplitConfig::default()
            .with_cache_path(dir.join("split_indices.bin"))
            .with_seed(42)
    }

    #[test]
    fn test_fraction_arithmetic() -> Result<()> {
        let dir = tempdir()?;
        let split = load_or_create(10, &config_in(dir.path()), false)?;
        assert_eq!(split.test_indices.len(), 2);
        assert_eq!(split.train_indices.len(), 8);
        Ok(())
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() -> Result<()> {
        let dir = tempdir()?;
        let split = load_or_create(50, &config_in(dir.path()), false)?;

        let all: HashSet<usize> = split
            .train_indices
            .iter()
            .chain(split.test_indices.iter())
            .copied()
            .collect();
        assert_eq!(all.len(), 50);
        assert_eq!(split.total(), 50);
        assert!(all.iter().all(|&index| index < 50));
        Ok(())
    }

    #[test]
    fn test_cache_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let config = config_in(dir.path());

        let first = load_or_create(20, &config, false)?;
        assert!(config.cache_path.is_file());

        // Second call must read the cache, order included.
        let second = load_or_create(20, &config, false)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_fresh_discards_cache() -> Result<()> {
        let dir = tempdir()?;
        let first = load_or_create(20, &config_in(dir.path()), false)?;
        let regenerated = load_or_create(
            20,
            &config_in(dir.path()).with_seed(7),
            true,
        )?;
        assert_ne!(first, regenerated);

        // The regenerated split becomes the cached one.
        let reread = load_or_create(20, &config_in(dir.path()), false)?;
        assert_eq!(regenerated, reread);
        Ok(())
    }

    #[test]
    fn test_seeded_generation_is_deterministic() -> Result<()> {
        let dir_a = tempdir()?;
        let dir_b = tempdir()?;
        let a = load_or_create(30, &config_in(dir_a.path()), false)?;
        let b = load_or_create(30, &config_in(dir_b.path()), false)?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_corrupt_cache_propagates() -> Result<()> {
        let dir = tempdir()?;
        let config = config_in(dir.path());
        fs::write(&config.cache_path, [0xFF; 32])?;
        assert!(load_or_create(10, &config, false).is_err());
        Ok(())
    }

    #[test]
    fn test_invalid_fraction_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let config = config_in(dir.path()).with_test_fraction(1.5);
        assert!(load_or_create(10, &config, false).is_err());
        Ok(())
    }

    #[test]
    fn test_empty_dataset_splits_empty() -> Result<()> {
        let dir = tempdir()?;
        let split = load_or_create(0, &config_in(dir.path()), false)?;
        assert!(split.train_indices.is_empty());
        assert!(split.test_indices.is_empty());
        Ok(())
    }
}
