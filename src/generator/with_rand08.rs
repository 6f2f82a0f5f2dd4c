//! Integration with `rand` (v0.8) crate.

#![cfg(feature = "std")]
#![cfg_attr(docsrs, doc(cfg(feature = "std")))]

use std::sync::Mutex;

use super::{RandSource, StdSystemTime, V7Generator};
use rand::{Rng, RngCore};

/// The default [`RandSource`] that draws from the calling thread's [`rand::rngs::ThreadRng`].
///
/// Each thread owns its generator, so concurrent callers never contend on the random number
/// source.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn next_u64(&self) -> u64 {
        rand::thread_rng().next_u64()
    }

    /// # Panics
    ///
    /// Panics if `bound` is zero.
    fn next_bounded_u32(&self, bound: u32) -> u32 {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// An adapter that implements [`RandSource`] for [`RngCore`] types by guarding one instance with a
/// [`Mutex`].
///
/// This is the way to inject a seeded or otherwise custom random number generator. Only the random
/// number generator is locked; the generator state stays lock-free.
#[derive(Debug, Default)]
pub struct Adapter<T>(Mutex<T>);

impl<T> Adapter<T> {
    /// Wraps a random number generator.
    pub const fn new(rng: T) -> Self {
        Self(Mutex::new(rng))
    }

    /// Consumes the adapter and returns the wrapped random number generator.
    pub fn into_inner(self) -> T {
        self.0.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_rng<U>(&self, f: impl FnOnce(&mut T) -> U) -> U {
        // a panic while drawing leaves the generator itself intact
        let mut guard = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *guard)
    }
}

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u64(&self) -> u64 {
        self.with_rng(|rng| rng.next_u64())
    }

    fn next_bounded_u32(&self, bound: u32) -> u32 {
        self.with_rng(|rng| rng.gen_range(0..bound))
    }
}

impl<T: RngCore> V7Generator<Adapter<T>, StdSystemTime> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use atomic_uuid7::V7Generator;
    /// use rand::SeedableRng;
    ///
    /// let g = V7Generator::with_rand08(rand_chacha::ChaCha8Rng::seed_from_u64(42));
    /// println!("{}", g.generate());
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter::new(rng), StdSystemTime)
    }
}
