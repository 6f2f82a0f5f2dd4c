//! A lock-free, process-wide monotonic generator of UUID version 7
//!
//! ```rust
//! use atomic_uuid7::uuid7;
//!
//! let uuid = uuid7();
//! println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.to_bytes()); // as 16-byte big-endian array
//!
//! let text = atomic_uuid7::uuid7_string();
//! assert_eq!(text.len(), 36);
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |       sequence        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                          rand                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in milliseconds.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 12-bit `sequence` field ensures the monotonic order of IDs generated within the same
//!   millisecond. It is incremented by one for each new ID generated within the same timestamp and
//!   is randomly initialized whenever the `unix_ts_ms` changes.
//! - The 2-bit `var` field is set at `10`.
//! - The remaining 62 `rand` bits are filled with a fresh random number for each ID.
//!
//! The most significant 64 bits alone, compared as an unsigned integer, order the IDs produced by
//! one generator by creation time.
//!
//! # Monotonicity without locks
//!
//! The last issued `unix_ts_ms` and `sequence` live in a single atomic word that is only ever
//! updated by compare-and-swap, so any number of threads can generate IDs at once without blocking
//! (see [`Sequencer`]).
//!
//! If the system clock moves backwards, this library keeps using the last issued `unix_ts_ms`. In
//! the rare circumstances where the 12-bit `sequence` field reaches its maximum value within the
//! same timestamp, this library increments the `unix_ts_ms`; therefore, the `unix_ts_ms` may have
//! a larger value than that of the real-time clock.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std` enables [`ThreadRandom`], [`StdSystemTime`], and the `String` conversions. Without
//!   `std`, this crate is `no_std` and still provides [`Sequencer`], [`Uuid`], and the
//!   buffer-based [`encode`] functions.
//! - `global_gen` enables the process-wide generator behind [`uuid7()`] and [`uuid7_string()`].
//! - `secure_rng` enables [`SecureRandom`], a per-thread ChaCha12 source reseeded from the
//!   operating system.
//!
//! Optional features:
//!
//! - `serde` enables serialization and deserialization of [`Uuid`] objects.
//! - `uuid` enables conversions between [`Uuid`] and `uuid::Uuid`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{ParseError, Uuid, Variant};

pub mod encode;
#[cfg(feature = "std")]
pub use encode::format_identifier;

mod sequencer;
pub use sequencer::{Sequencer, MAX_SEQUENCE};

pub mod generator;
pub use generator::{RandSource, TimeSource, V7Generator};

#[cfg(feature = "std")]
pub use generator::{with_rand08::ThreadRandom, StdSystemTime};

#[cfg(feature = "secure_rng")]
pub use generator::secure::SecureRandom;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{global_generator, uuid7, uuid7_string, GlobalGenerator};
