//! Lock-free allocator of monotonic `(timestamp, sequence)` pairs.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::generator::RandSource;

/// The maximum value of the 12-bit sequence field.
pub const MAX_SEQUENCE: u16 = 0xfff;

const SEQUENCE_BITS: u32 = 12;

/// Exclusive upper bound of the 48-bit timestamp field.
const TIMESTAMP_LIMIT: u64 = 1 << 48;

/// Hands out `(timestamp, sequence)` pairs that are strictly increasing in the order the shared
/// state is updated, without ever taking a lock.
///
/// The whole state lives in one [`AtomicU64`] holding the last issued 48-bit timestamp above the
/// last issued 12-bit sequence. A pair is allocated by a compare-and-swap retry loop:
///
/// 1.  A clock reading smaller than the last issued timestamp is clamped to it.
/// 2.  A new millisecond restarts the sequence at a random 12-bit value.
/// 3.  Within the same millisecond the sequence is incremented by one.
/// 4.  When the sequence is exhausted (`4095`) within the same millisecond, the timestamp is moved
///     one millisecond ahead and the sequence restarts at a random value. Timestamps may thus run
///     slightly ahead of the real-time clock.
///
/// A `Sequencer` is an explicit handle: separate instances keep independent orderings, which is
/// handy for tests and per-tenant generators.
///
/// # Examples
///
/// ```rust
/// use atomic_uuid7::{Sequencer, ThreadRandom};
///
/// let s = Sequencer::resume(1_700_000_000_000, 10, ThreadRandom);
/// assert_eq!(s.allocate(1_700_000_000_000), (1_700_000_000_000, 11));
/// ```
#[derive(Debug, Default)]
pub struct Sequencer<R> {
    state: AtomicU64,
    rng: R,
}

impl<R> Sequencer<R> {
    /// Creates a sequencer whose last issued pair is `(0, 0)`.
    pub const fn new(rng: R) -> Self {
        Self {
            state: AtomicU64::new(0),
            rng,
        }
    }

    /// Creates a sequencer that continues after the given last issued pair.
    ///
    /// # Panics
    ///
    /// Panics if `last_timestamp` is not a 48-bit integer or `last_sequence` is not a 12-bit
    /// integer.
    pub fn resume(last_timestamp: u64, last_sequence: u16, rng: R) -> Self {
        assert!(
            last_timestamp < TIMESTAMP_LIMIT,
            "`last_timestamp` must be a 48-bit integer"
        );
        assert!(
            last_sequence <= MAX_SEQUENCE,
            "`last_sequence` must be a 12-bit integer"
        );
        Self {
            state: AtomicU64::new(pack(last_timestamp, last_sequence)),
            rng,
        }
    }

    /// Returns the last issued `(timestamp, sequence)` pair.
    pub fn last_issued(&self) -> (u64, u16) {
        unpack(self.state.load(Ordering::Acquire))
    }

    /// Returns a reference to the random number source shared with the caller.
    pub const fn rand_source(&self) -> &R {
        &self.rng
    }
}

impl<R: RandSource> Sequencer<R> {
    /// Allocates the next `(timestamp, sequence)` pair for a clock reading of `now_millis`.
    ///
    /// The returned pair is greater than every pair previously returned by this instance, and no
    /// two calls, concurrent or not, receive the same pair. Concurrent callers are ordered by the
    /// success order of their compare-and-swap; a losing caller retries immediately.
    ///
    /// The 48-bit timestamp field is assumed never to overflow (year 10889); this is checked in
    /// debug builds only.
    pub fn allocate(&self, now_millis: u64) -> (u64, u16) {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let (last_ts, last_seq) = unpack(current);
            let mut ts = now_millis.max(last_ts);

            let exhausted = ts == last_ts && last_seq == MAX_SEQUENCE;
            let seq = if ts != last_ts || exhausted {
                if exhausted {
                    ts += 1;
                }
                let r = self.rng.next_bounded_u32(u32::from(MAX_SEQUENCE) + 1);
                (r & u32::from(MAX_SEQUENCE)) as u16
            } else {
                last_seq + 1
            };
            debug_assert!(ts < TIMESTAMP_LIMIT, "timestamp overflowed 48 bits");

            match self.state.compare_exchange_weak(
                current,
                pack(ts, seq),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    if exhausted {
                        tracing::trace!(timestamp = ts, "sequence exhausted, timestamp advanced");
                    } else if now_millis < last_ts {
                        tracing::trace!(
                            now_millis,
                            last_timestamp = last_ts,
                            "clock reading behind last timestamp, clamped"
                        );
                    }
                    return (ts, seq);
                }
                Err(actual) => current = actual,
            }
        }
    }
}

const fn pack(timestamp: u64, sequence: u16) -> u64 {
    (timestamp << SEQUENCE_BITS) | sequence as u64
}

const fn unpack(state: u64) -> (u64, u16) {
    (state >> SEQUENCE_BITS, (state & MAX_SEQUENCE as u64) as u16)
}
