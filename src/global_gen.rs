//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use crate::generator::{with_rand08::ThreadRandom, StdSystemTime, V7Generator};
use crate::Uuid;

/// The type of the process-wide generator.
pub type GlobalGenerator = V7Generator<ThreadRandom, StdSystemTime>;

static GLOBAL_GEN: GlobalGenerator = V7Generator::new(ThreadRandom, StdSystemTime);

/// Returns the process-wide generator behind [`uuid7()`] and [`uuid7_string()`].
///
/// The generator holds no lock; sharing it across threads costs one atomic compare-and-swap per
/// UUID.
pub fn global_generator() -> &'static GlobalGenerator {
    unix_fork_safety::reseed_thread_rng_upon_pid_change();
    &GLOBAL_GEN
}

/// Generates a UUIDv7 object.
///
/// This function employs a global generator and guarantees the process-wide monotonic order of
/// UUIDs generated within the same millisecond, across all threads. On Unix, this function drains
/// the thread-local random number generator when the process ID changes (i.e., upon process
/// forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = atomic_uuid7::uuid7();
/// println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.to_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = atomic_uuid7::uuid7().to_string();
/// ```
pub fn uuid7() -> Uuid {
    global_generator().generate()
}

/// Generates a UUIDv7 and returns its 8-4-4-4-12 canonical string representation.
///
/// # Examples
///
/// ```rust
/// let text = atomic_uuid7::uuid7_string();
/// assert_eq!(text.len(), 36);
/// assert_eq!(&text[14..15], "7");
/// ```
pub fn uuid7_string() -> String {
    global_generator().generate_string()
}

#[cfg(unix)]
mod unix_fork_safety {
    use std::{cell::Cell, process};

    thread_local! {
        static PID: Cell<u32> = Cell::new(process::id());
    }

    /// Reseeds ThreadRng immediately when the process ID changes (i.e. upon process forks),
    /// returning true if ThreadRng is reseeded or false otherwise.
    pub fn reseed_thread_rng_upon_pid_change() -> bool {
        PID.with(|last_pid| {
            let pid = process::id();
            if pid == last_pid.replace(pid) {
                false
            } else {
                // As of rand v0.8.5 and rand_chacha v0.3.1, up to 63 `u32` values have to be used
                // before reseeding after a fork.
                // See https://github.com/rust-random/rand/pull/1317
                let _: [[u32; 32]; 2] = rand::random();
                tracing::debug!(pid, "process ID changed, drained thread-local generator");
                true
            }
        })
    }
}

#[cfg(not(unix))]
mod unix_fork_safety {
    pub const fn reseed_thread_rng_upon_pid_change() -> bool {
        false
    }
}
