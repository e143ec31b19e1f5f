use anyhow::Result;
use image::{GrayImage, Luma};
use std::path::Path;
use tumor_data::transforms::pair_paths;

/// Writes one tumor/mask pair of grayscale PNGs under `dir`.
pub fn write_pair(
    dir: &Path,
    index: usize,
    (width, height): (u32, u32),
    image_value: u8,
    mask_value: u8,
) -> Result<()> {
    let (image_path, mask_path) = pair_paths(dir, index);
    GrayImage::from_pixel(width, height, Luma([image_value])).save(image_path)?;
    GrayImage::from_pixel(width, height, Luma([mask_value])).save(mask_path)?;
    Ok(())
}

/// Writes `count` pairs of 10x8 grayscale PNGs with values derived from
/// the index.
pub fn write_pairs(dir: &Path, count: usize) -> Result<()> {
    for index in 0..count {
        write_pair(
            dir,
            index,
            (10, 8),
            (index * 17 % 256) as u8,
            if index % 2 == 0 { 0 } else { 255 },
        )?;
    }
    Ok(())
}
