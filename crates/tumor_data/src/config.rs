//! Configuration for dataset preparation.
//!
//! ```ignore
//! let config = DatasetConfig::builder()
//!     .target_size(512)
//!     .augment(true)
//!     .rotation_degrees(15..=75)
//!     .build();
//! let dataset = TumorDataset::new("dataset/png_dataset", config)?;
//! ```

use image::imageops::FilterType;
use std::ops::RangeInclusive;

/// Options controlling how pairs are prepared.
///
/// Field values are validated where they are consumed: `target_size` by
/// the resize transform, `step_prob` and `rotation_degrees` by the
/// augmenter, both at dataset construction.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Square output edge; every pair is resized to exactly this size.
    pub target_size: u32,
    /// Whether to apply paired random augmentation on each access.
    pub augment: bool,
    /// Probability that each augmentation step fires.
    pub step_prob: f64,
    /// Whole-degree rotation angles drawn uniformly, counter-clockwise.
    pub rotation_degrees: RangeInclusive<i32>,
    /// Resampling filter used by the resize transform.
    pub filter: FilterType,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            target_size: 512,
            augment: true,
            step_prob: 0.5,
            rotation_degrees: 15..=75,
            filter: FilterType::Triangle,
        }
    }
}

impl DatasetConfig {
    pub fn builder() -> DatasetConfigBuilder {
        DatasetConfigBuilder::default()
    }
}

/// Builder for [`DatasetConfig`] with method chaining.
#[derive(Default)]
pub struct DatasetConfigBuilder {
    config: DatasetConfig,
}

impl DatasetConfigBuilder {
    /// Set the square output edge (must be > 0).
    pub fn target_size(mut self, size: u32) -> Self {
        self.config.target_size = size;
        self
    }

    /// Enable or disable random augmentation.
    pub fn augment(mut self, augment: bool) -> Self {
        self.config.augment = augment;
        self
    }

    /// Set the per-step augmentation probability (must be in [0, 1]).
    pub fn step_prob(mut self, prob: f64) -> Self {
        self.config.step_prob = prob;
        self
    }

    /// Set the inclusive rotation angle range in degrees.
    pub fn rotation_degrees(mut self, degrees: RangeInclusive<i32>) -> Self {
        self.config.rotation_degrees = degrees;
        self
    }

    /// Set the resize resampling filter.
    pub fn filter(mut self, filter: FilterType) -> Self {
        self.config.filter = filter;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> DatasetConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_preparation_conventions() {
        let config = DatasetConfig::default();
        assert_eq!(config.target_size, 512);
        assert!(config.augment);
        assert_eq!(config.step_prob, 0.5);
        assert_eq!(config.rotation_degrees, 15..=75);
    }

    #[test]
    fn test_builder_overrides() {
        let config = DatasetConfig::builder()
            .target_size(128)
            .augment(false)
            .step_prob(0.25)
            .rotation_degrees(5..=10)
            .build();
        assert_eq!(config.target_size, 128);
        assert!(!config.augment);
        assert_eq!(config.step_prob, 0.25);
        assert_eq!(config.rotation_degrees, 5..=10);
    }
}
