use crate::config::DatasetConfig;
use crate::sample::TumorSample;
use crate::transforms::augmentation::PairAugmenter;
use crate::transforms::conversion::ToTensor;
use crate::transforms::geometric::{Grayscale, Resize};
use crate::transforms::io::{pair_paths, LoadPair};
use crate::transforms::Transform;
use anyhow::{bail, ensure, Context, Result};
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Unified access to prepared tumor/mask samples.
///
/// Implementations must be `Send + Sync` so a dataset can be shared
/// across training threads. `get` returns an owned sample: this crate
/// prepares pairs lazily, reading the source files on every access.
pub trait Dataset: Send + Sync {
    /// Loads and prepares the pair at `index`.
    fn get(&self, index: usize) -> Result<TumorSample>;

    /// Returns the number of pairs.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A directory of numbered tumor/mask image pairs.
///
/// Files follow the convention `<index>.png` / `<index>_mask.png` with
/// indices `0..len`. Each access loads both files, grayscales and
/// exact-resizes them, optionally runs paired random augmentation, and
/// converts both to `[1, S, S]` float tensors.
///
/// Construction scans the directory once: an odd number of regular
/// files means a scan or a mask is missing somewhere, and is rejected
/// up front. Individual missing or undecodable files surface as errors
/// from [`Dataset::get`].
///
/// # Example
/// ```ignore
/// let dataset = TumorDataset::new("dataset/png_dataset", DatasetConfig::default())?;
/// for sample in dataset.iter() {
///     let sample = sample?;
///     // sample.image, sample.mask: [1, 512, 512] f32 in [0, 1]
/// }
/// ```
pub struct TumorDataset {
    root_dir: PathBuf,
    len: usize,
    loader: LoadPair,
    grayscale: Grayscale,
    resize: Resize,
    to_tensor: ToTensor,
    augmenter: Option<PairAugmenter>,
}

impl TumorDataset {
    pub fn new(root_dir: impl Into<PathBuf>, config: DatasetConfig) -> Result<Self> {
        let root_dir = root_dir.into();
        let file_count = count_regular_files(&root_dir)?;
        ensure!(
            file_count % 2 == 0,
            "Tumor and mask image counts are not the same in {} ({} files total)",
            root_dir.display(),
            file_count
        );

        let augmenter = if config.augment {
            Some(PairAugmenter::new(
                config.step_prob,
                config.rotation_degrees.clone(),
            )?)
        } else {
            None
        };

        Ok(Self {
            len: file_count / 2,
            loader: LoadPair::new(),
            grayscale: Grayscale,
            resize: Resize::square(config.target_size, config.filter)?,
            to_tensor: ToTensor,
            augmenter,
            root_dir,
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Iterates over all pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = Result<TumorSample>> + '_ {
        (0..self.len).map(move |index| self.get(index))
    }

    /// Grayscale + exact resize, the unconditional normalization both
    /// members of every pair go through.
    fn prepare(&self, img: DynamicImage) -> Result<DynamicImage> {
        self.resize.apply(self.grayscale.apply(img)?)
    }
}

impl Dataset for TumorDataset {
    fn get(&self, index: usize) -> Result<TumorSample> {
        let (image_path, mask_path) = pair_paths(&self.root_dir, index);
        let (image, mask) = self.loader.apply((image_path, mask_path))?;

        let image = self.prepare(image)?;
        let mask = self.prepare(mask)?;

        let (image, mask) = match &self.augmenter {
            Some(augmenter) => augmenter.apply((image, mask))?,
            None => (image, mask),
        };

        Ok(TumorSample::new(
            index as i64,
            self.to_tensor.apply(image)?,
            self.to_tensor.apply(mask)?,
        ))
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Counts regular files directly under `dir`, skipping symlinks and
/// subdirectories.
fn count_regular_files(dir: &Path) -> Result<usize> {
    let metadata = fs::metadata(dir)
        .with_context(|| format!("Failed to access dataset directory: {}", dir.display()))?;
    if !metadata.is_dir() {
        bail!("Dataset path is not a directory: {}", dir.display());
    }

    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry
            .with_context(|| format!("Failed to read directory entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_symlink() {
            continue;
        }
        if entry.metadata()?.is_file() {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tumor_dataset_tests {
    use super::*;
    use image::{GrayImage, Luma};
    use tempfile::{tempdir, TempDir};

    /// Writes `count` pairs of small grayscale PNGs with values derived
    /// from the index.
    fn fixture_dir(count: usize) -> Result<TempDir> {
        let dir = tempdir()?;
        for index in 0..count {
            let (image_path, mask_path) = pair_paths(dir.path(), index);
            GrayImage::from_pixel(8, 6, Luma([(index * 10 % 256) as u8])).save(image_path)?;
            GrayImage::from_pixel(8, 6, Luma([if index % 2 == 0 { 0 } else { 255 }]))
                .save(mask_path)?;
        }
        Ok(dir)
    }

    fn small_config() -> DatasetConfig {
        DatasetConfig::builder().target_size(16).build()
    }

    #[test]
    fn test_len_is_half_the_file_count() -> Result<()> {
        let dir = fixture_dir(5)?;
        let dataset = TumorDataset::new(dir.path(), small_config())?;
        assert_eq!(dataset.len(), 5);
        assert!(!dataset.is_empty());
        Ok(())
    }

    #[test]
    fn test_odd_file_count_is_rejected() -> Result<()> {
        let dir = fixture_dir(3)?;
        GrayImage::from_pixel(8, 6, Luma([1])).save(dir.path().join("stray.png"))?;
        assert!(TumorDataset::new(dir.path(), small_config()).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let result = TumorDataset::new("no/such/dir", small_config());
        assert!(result.is_err());
    }

    #[test]
    fn test_get_prepares_both_tensors() -> Result<()> {
        let dir = fixture_dir(2)?;
        let dataset = TumorDataset::new(
            dir.path(),
            DatasetConfig::builder().target_size(16).augment(false).build(),
        )?;

        let sample = dataset.get(1)?;
        assert_eq!(sample.index, 1);
        assert_eq!(sample.image.size(), vec![1, 16, 16]);
        assert_eq!(sample.mask.size(), vec![1, 16, 16]);

        // Mask of pair 1 is all-255, so the tensor is all-ones.
        assert!((sample.mask.f_min()?.double_value(&[]) - 1.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_unaugmented_access_is_deterministic() -> Result<()> {
        let dir = fixture_dir(1)?;
        let dataset = TumorDataset::new(
            dir.path(),
            DatasetConfig::builder().target_size(16).augment(false).build(),
        )?;

        let first = dataset.get(0)?;
        let second = dataset.get(0)?;
        assert!(first.image.equal(&second.image));
        assert!(first.mask.equal(&second.mask));
        Ok(())
    }

    #[test]
    fn test_missing_mask_file_errors_on_access() -> Result<()> {
        let dir = fixture_dir(2)?;
        // Remove one mask and add an unrelated file so the count stays even.
        let (_, mask_path) = pair_paths(dir.path(), 1);
        fs::remove_file(&mask_path)?;
        fs::write(dir.path().join("notes.txt"), b"not an image pair")?;

        let dataset = TumorDataset::new(dir.path(), small_config())?;
        assert!(dataset.get(0).is_ok());
        assert!(dataset.get(1).is_err());
        Ok(())
    }

    #[test]
    fn test_iter_visits_every_pair() -> Result<()> {
        let dir = fixture_dir(4)?;
        let dataset = TumorDataset::new(
            dir.path(),
            DatasetConfig::builder().target_size(8).augment(false).build(),
        )?;

        let indices: Vec<i64> = dataset
            .iter()
            .map(|sample| sample.map(|s| s.index))
            .collect::<Result<_>>()?;
        assert_eq!(indices, vec![0, 1, 2, 3]);
        Ok(())
    }
}
