use tch::Tensor;

/// A single prepared tumor/mask pair, ready for model consumption.
///
/// Both tensors are channel-first `f32` in `[0.0, 1.0]` with shape
/// `[1, S, S]`, where `S` is the configured target edge. `index` is the
/// pair's position in the on-disk naming convention, so a training loop
/// can trace a batch element back to its source files.
#[derive(Debug)]
pub struct TumorSample {
    pub index: i64,
    pub image: Tensor,
    pub mask: Tensor,
}

/// Creates a shallow clone of the sample: tensor storage is shared,
/// only the handles are duplicated.
impl Clone for TumorSample {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            image: self.image.shallow_clone(),
            mask: self.mask.shallow_clone(),
        }
    }
}

/// Safety:
/// `tch::Tensor` is marked `Send + Sync` in its source (see [tensor.rs]),
/// and `i64` is trivially both. Mutation requires `&mut self`, so shared
/// references only permit concurrent reads.
///
/// [tensor.rs]: https://docs.rs/tch/latest/src/tch/wrappers/tensor.rs.html
unsafe impl Send for TumorSample {}
unsafe impl Sync for TumorSample {}

impl TumorSample {
    pub fn new(index: i64, image: Tensor, mask: Tensor) -> Self {
        Self { index, image, mask }
    }
}
