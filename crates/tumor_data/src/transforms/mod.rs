//! Image preparation transforms.
//!
//! ```text
//! transforms/
//! ├── core.rs          → Transform trait + Chain combinator
//! ├── io.rs            → pair path convention, image loading
//! ├── geometric.rs     → grayscale, exact resize
//! ├── augmentation.rs  → paired random flip/rotation
//! └── conversion.rs    → image → tensor
//! ```
//!
//! The normalization steps (`Grayscale`, `Resize`, `ToTensor`) operate
//! on single images; `PairAugmenter` operates on `(image, mask)` tuples
//! so random parameters are shared across the pair.

pub mod augmentation;
pub mod conversion;
pub mod core;
pub mod geometric;
pub mod io;

pub use augmentation::PairAugmenter;
pub use conversion::ToTensor;
pub use core::{Chain, Transform};
pub use geometric::{Grayscale, Resize};
pub use io::{pair_paths, LoadImage, LoadPair};
