use crate::transforms::Transform;
use anyhow::{Context, Result};
use image::{io::Reader as ImageReader, DynamicImage};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// Builds the two file paths for pair `index` under `root`:
/// `<root>/<index>.png` for the scan and `<root>/<index>_mask.png` for
/// its segmentation mask.
pub fn pair_paths(root: &Path, index: usize) -> (PathBuf, PathBuf) {
    (
        root.join(format!("{index}.png")),
        root.join(format!("{index}_mask.png")),
    )
}

// ============================================================================
// LoadImage
// ============================================================================

/// Loads an image from a file path.
///
/// The whole file is read through a buffered reader, then decoded with
/// format guessing so a mislabeled extension still decodes. Missing files
/// and undecodable bytes surface as errors carrying the offending path.
#[derive(Debug, Clone)]
pub struct LoadImage {
    buffer_size: usize,
}

impl LoadImage {
    pub fn new() -> Self {
        Self { buffer_size: 8192 }
    }
}

impl Default for LoadImage {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform<PathBuf, DynamicImage> for LoadImage {
    fn apply(&self, path: PathBuf) -> Result<DynamicImage> {
        let file =
            File::open(&path).with_context(|| format!("Failed to open image: {}", path.display()))?;

        let file_size = file.metadata()?.len() as usize;
        let mut reader = BufReader::with_capacity(self.buffer_size, file);
        let mut buffer = Vec::with_capacity(file_size);
        reader
            .read_to_end(&mut buffer)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;

        ImageReader::new(Cursor::new(buffer))
            .with_guessed_format()?
            .decode()
            .with_context(|| format!("Failed to decode image: {}", path.display()))
    }
}

// ============================================================================
// LoadPair
// ============================================================================

/// Loads a tumor image and its mask in one step.
///
/// Input is the `(image_path, mask_path)` tuple produced by
/// [`pair_paths`]; output is the decoded `(image, mask)` pair. Either
/// side failing fails the whole pair, with context naming which side.
#[derive(Debug, Clone, Default)]
pub struct LoadPair {
    loader: LoadImage,
}

impl LoadPair {
    pub fn new() -> Self {
        Self {
            loader: LoadImage::new(),
        }
    }
}

impl Transform<(PathBuf, PathBuf), (DynamicImage, DynamicImage)> for LoadPair {
    fn apply(&self, (image_path, mask_path): (PathBuf, PathBuf)) -> Result<(DynamicImage, DynamicImage)> {
        let image = self
            .loader
            .apply(image_path.clone())
            .with_context(|| format!("Failed to load tumor image: {}", image_path.display()))?;
        let mask = self
            .loader
            .apply(mask_path.clone())
            .with_context(|| format!("Failed to load mask image: {}", mask_path.display()))?;
        Ok((image, mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use tempfile::tempdir;

    #[test]
    fn test_pair_paths_convention() {
        let (image, mask) = pair_paths(Path::new("data"), 17);
        assert_eq!(image, Path::new("data/17.png"));
        assert_eq!(mask, Path::new("data/17_mask.png"));
    }

    #[test]
    fn test_load_image_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("0.png");
        GrayImage::from_pixel(3, 3, Luma([42])).save(&path)?;

        let loaded = LoadImage::new().apply(path)?;
        assert_eq!(loaded.to_luma8().get_pixel(1, 1), &Luma([42]));
        Ok(())
    }

    #[test]
    fn test_missing_file_errors() {
        let result = LoadImage::new().apply(PathBuf::from("nonexistent.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_corrupt_file_errors() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not an image")?;
        assert!(LoadImage::new().apply(path).is_err());
        Ok(())
    }

    #[test]
    fn test_load_pair_requires_both_sides() -> Result<()> {
        let dir = tempdir()?;
        let (image_path, mask_path) = pair_paths(dir.path(), 0);
        GrayImage::from_pixel(2, 2, Luma([9])).save(&image_path)?;
        // mask missing on purpose
        let err = LoadPair::new()
            .apply((image_path, mask_path))
            .unwrap_err()
            .to_string();
        assert!(err.contains("mask"));
        Ok(())
    }
}
