use crate::rng::{augment_bool, augment_index, augment_range};
use crate::transforms::Transform;
use anyhow::{ensure, Result};
use image::{DynamicImage, GrayImage};
use log::debug;
use std::ops::RangeInclusive;

// ============================================================================
// PairAugmenter
// ============================================================================

/// The three augmentation steps, visited in random order per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AugmentStep {
    HorizontalFlip,
    VerticalFlip,
    Rotate,
}

/// Randomized geometric augmentation applied jointly to an image/mask pair.
///
/// Per application, the steps {horizontal flip, vertical flip, rotation}
/// are visited in a freshly randomized order and each fires independently
/// with probability `step_prob`. A step that fires is applied with
/// identical parameters to both members of the pair, so the mask keeps
/// describing the same pixels as the image.
///
/// Rotation draws a whole-degree angle uniformly from `rotation_degrees`
/// and rotates counter-clockwise about the image center. The canvas does
/// not expand: content rotated past the frame is lost, uncovered corners
/// fill with zero (background).
///
/// # Example
/// ```ignore
/// let augmenter = PairAugmenter::new(0.5, 15..=75)?;
/// let (image, mask) = augmenter.apply((image, mask))?;
/// ```
#[derive(Debug, Clone)]
pub struct PairAugmenter {
    step_prob: f64,
    rotation_degrees: RangeInclusive<i32>,
}

impl PairAugmenter {
    pub fn new(step_prob: f64, rotation_degrees: RangeInclusive<i32>) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&step_prob),
            "Step probability must be in [0.0, 1.0] range (got {})",
            step_prob
        );
        ensure!(
            !rotation_degrees.is_empty(),
            "Rotation range must not be empty (got {}..={})",
            rotation_degrees.start(),
            rotation_degrees.end()
        );
        Ok(Self {
            step_prob,
            rotation_degrees,
        })
    }

    fn apply_step(
        &self,
        step: AugmentStep,
        image: DynamicImage,
        mask: DynamicImage,
    ) -> (DynamicImage, DynamicImage) {
        match step {
            AugmentStep::HorizontalFlip => (image.fliph(), mask.fliph()),
            AugmentStep::VerticalFlip => (image.flipv(), mask.flipv()),
            AugmentStep::Rotate => {
                let degrees = augment_range(self.rotation_degrees.clone());
                debug!("rotating pair by {degrees} degrees");
                (rotate(&image, degrees), rotate(&mask, degrees))
            }
        }
    }
}

impl Transform<(DynamicImage, DynamicImage), (DynamicImage, DynamicImage)> for PairAugmenter {
    fn apply(
        &self,
        (mut image, mut mask): (DynamicImage, DynamicImage),
    ) -> Result<(DynamicImage, DynamicImage)> {
        let mut remaining = vec![
            AugmentStep::HorizontalFlip,
            AugmentStep::VerticalFlip,
            AugmentStep::Rotate,
        ];

        // Draw steps without replacement so the composition order itself
        // is randomized, then gate each step on `step_prob`.
        while !remaining.is_empty() {
            let step = remaining.remove(augment_index(remaining.len()));
            debug!("augmentation step considered: {:?}", step);
            if !augment_bool(self.step_prob) {
                continue;
            }
            debug!("applying augmentation step: {:?}", step);
            (image, mask) = self.apply_step(step, image, mask);
        }

        Ok((image, mask))
    }
}

/// Rotates `degrees` counter-clockwise about the image center.
///
/// Inverse nearest-neighbor mapping over a same-sized canvas; target
/// pixels whose source falls outside the frame become zero. Inputs reach
/// this point as Luma8 (the pipeline grayscales first); anything else is
/// collapsed to luma before rotating.
fn rotate(img: &DynamicImage, degrees: i32) -> DynamicImage {
    let luma = match img {
        DynamicImage::ImageLuma8(luma) => rotate_luma8(luma, degrees),
        _ => rotate_luma8(&img.to_luma8(), degrees),
    };
    DynamicImage::ImageLuma8(luma)
}

fn rotate_luma8(img: &GrayImage, degrees: i32) -> GrayImage {
    let (width, height) = img.dimensions();
    let radians = (degrees as f32).to_radians();
    let (sin, cos) = radians.sin_cos();
    let cx = (width.saturating_sub(1)) as f32 / 2.0;
    let cy = (height.saturating_sub(1)) as f32 / 2.0;

    GrayImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        // Inverse of a visually counter-clockwise rotation in y-down
        // pixel coordinates.
        let src_x = (cos * dx - sin * dy + cx).round();
        let src_y = (sin * dx + cos * dy + cy).round();

        if src_x >= 0.0 && src_x < width as f32 && src_y >= 0.0 && src_y < height as f32 {
            *img.get_pixel(src_x as u32, src_y as u32)
        } else {
            image::Luma([0])
        }
    })
}
