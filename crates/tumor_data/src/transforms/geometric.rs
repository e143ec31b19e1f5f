use crate::transforms::Transform;
use anyhow::{ensure, Result};
use image::{imageops::FilterType, DynamicImage};

// ============================================================================
// Grayscale
// ============================================================================

/// Collapses an image to single-channel 8-bit luma.
///
/// Tumor scans and their masks are grayscale by nature; RGB(A) encodings
/// of the same content are converted, already-luma images pass through
/// untouched.
#[derive(Debug, Clone)]
pub struct Grayscale;

impl Transform<DynamicImage, DynamicImage> for Grayscale {
    fn apply(&self, img: DynamicImage) -> Result<DynamicImage> {
        Ok(match img {
            DynamicImage::ImageLuma8(_) => img,
            _ => DynamicImage::ImageLuma8(img.to_luma8()),
        })
    }
}

// ============================================================================
// Resize
// ============================================================================

/// Resizes an image to exactly `width` x `height`.
///
/// Unlike aspect-preserving resizing, both dimensions are forced to the
/// requested values, so non-square inputs are stretched. This keeps every
/// pair in the dataset at the same tensor shape regardless of source
/// resolution.
///
/// # Filter Types
/// - `Nearest`: nearest neighbour, fastest
/// - `Triangle`: bilinear, good all-round default
/// - `CatmullRom`: bicubic sharpening
/// - `Lanczos3`: highest quality re-sampling, slowest
///
/// # Example
/// ```ignore
/// # use image::imageops::FilterType;
/// let resize = Resize::square(512, FilterType::Triangle)?;
/// let resized = resize.apply(img)?;
/// ```
#[derive(Debug)]
pub struct Resize {
    width: u32,
    height: u32,
    filter: FilterType,
}

impl Resize {
    pub fn new(width: u32, height: u32, filter: FilterType) -> Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "Resize dimensions must be positive (got {}x{})",
            width,
            height
        );
        Ok(Self {
            width,
            height,
            filter,
        })
    }

    /// Square resize, the common case for segmentation inputs.
    pub fn square(edge: u32, filter: FilterType) -> Result<Self> {
        Self::new(edge, edge, filter)
    }
}

impl Transform<DynamicImage, DynamicImage> for Resize {
    fn apply(&self, img: DynamicImage) -> Result<DynamicImage> {
        Ok(img.resize_exact(self.width, self.height, self.filter))
    }
}
