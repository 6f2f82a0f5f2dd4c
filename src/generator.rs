//! UUIDv7 generator and the capabilities it consumes.

use crate::{Sequencer, Uuid};

pub mod with_rand08;

#[cfg(feature = "secure_rng")]
pub mod secure;

/// A trait that defines the minimum random number generator interface for [`Sequencer`] and
/// [`V7Generator`].
///
/// Both methods take `&self` because one source is shared by every caller of a generator; an
/// implementation is expected to be either thread-local (e.g., [`ThreadRandom`]) or internally
/// synchronized (e.g., [`with_rand08::Adapter`]). The generator never locks it.
///
/// [`ThreadRandom`]: with_rand08::ThreadRandom
pub trait RandSource {
    /// Returns the next uniformly distributed random `u64`.
    fn next_u64(&self) -> u64;

    /// Returns the next random `u32` uniformly distributed in `[0, bound)`.
    fn next_bounded_u32(&self, bound: u32) -> u32;
}

/// A trait that defines the minimum system clock interface for [`V7Generator`].
///
/// The clock need not be monotonic; readings that go backwards are clamped by [`Sequencer`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
impl TimeSource for StdSystemTime {
    /// # Panics
    ///
    /// Panics if the system clock reports a time before the Unix epoch.
    fn unix_ts_ms(&self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }
}

/// Represents a UUIDv7 generator that combines a [`Sequencer`], a random number source, and a
/// clock, and guarantees the monotonic order of UUIDs it generates even when called from many
/// threads at once.
///
/// Unlike a generator behind a `Mutex`, this type is shared by plain reference: every method takes
/// `&self` and no call ever blocks. The process-wide generator behind [`uuid7()`](crate::uuid7) is
/// one instance of this type; create more to keep independent orderings.
///
/// # Examples
///
/// ```rust
/// use std::thread;
/// use atomic_uuid7::V7Generator;
///
/// let g = V7Generator::default();
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = &g;
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate(), i);
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug)]
pub struct V7Generator<R, T> {
    sequencer: Sequencer<R>,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R, T> V7Generator<R, T> {
    /// Creates a generator instance with a specified random number source and clock.
    pub const fn new(rand_source: R, time_source: T) -> Self {
        Self {
            sequencer: Sequencer::new(rand_source),
            time_source,
        }
    }

    /// Creates a generator instance that continues from an existing [`Sequencer`].
    pub const fn from_sequencer(sequencer: Sequencer<R>, time_source: T) -> Self {
        Self {
            sequencer,
            time_source,
        }
    }

    /// Returns a reference to the [`Sequencer`] inside.
    pub const fn sequencer(&self) -> &Sequencer<R> {
        &self.sequencer
    }
}

impl<R: RandSource, T: TimeSource> V7Generator<R, T> {
    /// Generates a new UUIDv7 object from the current timestamp.
    pub fn generate(&self) -> Uuid {
        self.generate_core(self.time_source.unix_ts_ms())
    }

    /// Generates a new UUIDv7 object and returns its 8-4-4-4-12 canonical string representation.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn generate_string(&self) -> String {
        let e = self.generate();
        crate::encode::format_identifier(e.high(), e.low())
    }
}

impl<R: RandSource, T> V7Generator<R, T> {
    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed.
    ///
    /// A `unix_ts_ms` smaller than that of the immediately preceding UUID is treated as equal to
    /// it, so the result is always greater than every UUID previously generated by this instance.
    pub fn generate_core(&self, unix_ts_ms: u64) -> Uuid {
        let (timestamp, sequence) = self.sequencer.allocate(unix_ts_ms);
        let random = self.sequencer.rand_source().next_u64();
        Uuid::from_halves(
            (timestamp << 16) | 0x7000 | u64::from(sequence),
            (random & 0x3fff_ffff_ffff_ffff) | 0x8000_0000_0000_0000,
        )
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl Default for V7Generator<with_rand08::ThreadRandom, StdSystemTime> {
    fn default() -> Self {
        Self::new(with_rand08::ThreadRandom, StdSystemTime)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use atomic_uuid7::V7Generator;
///
/// V7Generator::default()
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> core::iter::FusedIterator for V7Generator<R, T> {}
