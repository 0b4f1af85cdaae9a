//! Randomness seam for the engine.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Source of the two independent random draws made per slot: a uniform sample
/// in `[0, 1)` for picking the reward, and a uniform item number for
/// collectibles.
pub trait DrawSource {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform integer in `[1, capacity]`. Callers guarantee `capacity >= 1`.
    fn item_number(&mut self, capacity: u32) -> u32;
}

/// Adapts any `rand` generator into a [`DrawSource`].
#[derive(Debug, Clone)]
pub struct RandSource<R: Rng>(pub R);

impl RandSource<ChaCha8Rng> {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> DrawSource for RandSource<R> {
    fn unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn item_number(&mut self, capacity: u32) -> u32 {
        self.0.gen_range(1..=capacity)
    }
}

impl<S: DrawSource + ?Sized> DrawSource for &mut S {
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }

    fn item_number(&mut self, capacity: u32) -> u32 {
        (**self).item_number(capacity)
    }
}
