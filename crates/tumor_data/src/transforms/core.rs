use anyhow::{Context, Result};
use std::marker::PhantomData;

/// A `Transform<I, O>` is a stateless conversion from `I` to `O`.
///
/// Individual preparation steps (decode, grayscale, resize, tensor
/// conversion) implement this trait, and `.then(...)` chains two steps
/// into a single statically-dispatched pipeline.
///
/// `then()` requires:
/// 1. type alignment: `self: Transform<I, O>`, `next: Transform<O, M>`
/// 2. concrete (`Sized`) transforms, no trait objects
/// 3. `Send` intermediate and output types
pub trait Transform<I, O>: Send + Sync {
    /// Applies the transformation to the input.
    fn apply(&self, input: I) -> Result<O>;

    #[inline]
    fn then<T, M>(self, next: T) -> Chain<Self, T, O>
    where
        Self: Sized,
        T: Transform<O, M>,
        O: Send,
        M: Send,
    {
        Chain {
            first: self,
            second: next,
            _marker: PhantomData,
        }
    }
}

/// Two transforms run back to back. `PhantomData<M>` pins the
/// intermediate type so the compiler can check alignment.
#[derive(Debug)]
pub struct Chain<A, B, M> {
    first: A,
    second: B,
    _marker: PhantomData<fn() -> M>,
}

impl<A, B, M> Chain<A, B, M> {
    /// Prefer [`Transform::then`]; `Chain::new` exists for building
    /// pipelines where the pieces are constructed separately.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<I, M, O, A, B> Transform<I, O> for Chain<A, B, M>
where
    A: Transform<I, M>,
    B: Transform<M, O>,
    M: Send,
{
    fn apply(&self, input: I) -> Result<O> {
        self.first
            .apply(input)
            .and_then(|mid| self.second.apply(mid))
            .with_context(|| {
                format!(
                    "Transform chain failed: {} → {}",
                    std::any::type_name::<A>(),
                    std::any::type_name::<B>()
                )
            })
    }
}
