//! Thread-local RNG for deterministic augmentation.
//!
//! Random transforms take `&self`, so they cannot own mutable RNG state.
//! Instead the thread carries an optional seeded RNG: call
//! [`init_augment_rng`] before iterating a dataset to make augmentation
//! reproducible, or leave it unseeded to fall back to OS entropy.

use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng};
use std::cell::RefCell;
use std::ops::RangeInclusive;

thread_local! {
    /// Seeded RNG driving augmentation decisions on this thread.
    /// `None` until [`init_augment_rng`] is called.
    pub static AUGMENT_RNG: RefCell<Option<StdRng>> = RefCell::new(None);
}

/// Seeds this thread's augmentation RNG. Repeated calls reseed, so a
/// test can replay the exact same augmentation sequence.
pub fn init_augment_rng(seed: u64) {
    AUGMENT_RNG.with(|rng| {
        *rng.borrow_mut() = Some(StdRng::seed_from_u64(seed));
    })
}

/// Draws a bool that is `true` with probability `p`.
pub fn augment_bool(p: f64) -> bool {
    AUGMENT_RNG.with(|rng| {
        let mut rng_ref = rng.borrow_mut();
        match rng_ref.as_mut() {
            Some(rng) => rng.random_bool(p),
            None => rand::rng().random_bool(p),
        }
    })
}

/// Draws a value uniformly from the inclusive range.
pub fn augment_range(range: RangeInclusive<i32>) -> i32 {
    AUGMENT_RNG.with(|rng| {
        let mut rng_ref = rng.borrow_mut();
        match rng_ref.as_mut() {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    })
}

/// Draws an index in `0..len`. `len` must be non-zero.
pub fn augment_index(len: usize) -> usize {
    AUGMENT_RNG.with(|rng| {
        let mut rng_ref = rng.borrow_mut();
        match rng_ref.as_mut() {
            Some(rng) => rng.random_range(0..len),
            None => rand::rng().random_range(0..len),
        }
    })
}
