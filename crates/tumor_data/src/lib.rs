//! Dataset preparation for paired tumor/mask segmentation images.
//!
//! Loads `<index>.png` / `<index>_mask.png` pairs from a directory,
//! normalizes them (grayscale + exact resize), optionally applies paired
//! random augmentation, and exposes a persisted train/test index split
//! for an external training loop.

pub mod config;
pub mod dataset;
pub mod rng;
pub mod sample;
pub mod sampler;
pub mod split;
pub mod transforms;

pub use config::{DatasetConfig, DatasetConfigBuilder};
pub use dataset::{Dataset, TumorDataset};
pub use rng::init_augment_rng;
pub use sample::TumorSample;
pub use sampler::{Sampler, SequentialSampler, SubsetRandomSampler};
pub use split::{load_or_create, SplitConfig, SplitIndices};
