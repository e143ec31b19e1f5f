use crate::transforms::Transform;
use anyhow::{ensure, Context, Result};
use image::{DynamicImage, GenericImageView};
use tch::{Kind, Tensor};

// ============================================================================
// ToTensor
// ============================================================================

/// Converts an image to a channel-first `f32` tensor in `[0.0, 1.0]`.
///
/// | Input Format  | Output Shape |
/// |---------------|--------------|
/// | Grayscale (L) | `[1, H, W]`  |
/// | RGB           | `[3, H, W]`  |
/// | Other         | `[3, H, W]` (implicit RGB conversion) |
///
/// The grayscale row is the one this crate exercises: both members of a
/// tumor/mask pair arrive here as Luma8.
#[derive(Debug)]
pub struct ToTensor;

impl Transform<DynamicImage, Tensor> for ToTensor {
    fn apply(&self, img: DynamicImage) -> Result<Tensor> {
        let (width, height) = img.dimensions();
        ensure!(
            width > 0 && height > 0,
            "Image dimensions must be positive (got {}x{})",
            width,
            height
        );

        let tensor = match img {
            DynamicImage::ImageLuma8(img) => {
                Tensor::from_slice(img.as_raw()).reshape(&[1, height as i64, width as i64])
            }
            DynamicImage::ImageRgb8(img) => {
                Tensor::from_slice(img.as_raw()).reshape(&[3, height as i64, width as i64])
            }
            _ => {
                let rgb = img.to_rgb8();
                Tensor::from_slice(rgb.as_raw()).reshape(&[3, height as i64, width as i64])
            }
        };

        tensor
            .to_kind(Kind::Float)
            .f_div_scalar(255.0)
            .context("Failed to scale tensor into [0, 1]")
    }
}
