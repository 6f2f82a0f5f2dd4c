//! Cryptographically strong random number source.

#![cfg_attr(docsrs, doc(cfg(feature = "secure_rng")))]

use std::cell::RefCell;

use super::RandSource;
use inner::SecureRngState;
use rand::{Rng, RngCore};

thread_local! {
    static SECURE_RNG: RefCell<SecureRngState> = RefCell::new(SecureRngState::new());
}

/// A [`RandSource`] that draws from a per-thread ChaCha12 generator seeded by the operating
/// system and reseeded from it after every 64 KiB of output.
///
/// Use this source when the random field of identifiers must stay unpredictable, e.g., for session
/// or password-reset tokens. On Unix, the per-thread generator is rebuilt from fresh entropy when
/// the process ID changes (i.e., upon process forks).
///
/// # Examples
///
/// ```rust
/// use atomic_uuid7::{SecureRandom, StdSystemTime, V7Generator};
///
/// let g = V7Generator::new(SecureRandom, StdSystemTime);
/// println!("{}", g.generate());
/// ```
///
/// # Panics
///
/// Methods panic if the operating system's entropy source fails to seed the generator.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct SecureRandom;

impl RandSource for SecureRandom {
    fn next_u64(&self) -> u64 {
        SECURE_RNG.with(|state| state.borrow_mut().get_mut().next_u64())
    }

    fn next_bounded_u32(&self, bound: u32) -> u32 {
        SECURE_RNG.with(|state| state.borrow_mut().get_mut().gen_range(0..bound))
    }
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    /// Number of bytes generated before the core is reseeded from the operating system.
    const RESEED_THRESHOLD: u64 = 1024 * 64;

    pub type SecureRng = ReseedingRng<ChaCha12Core, OsRng>;

    /// A thin wrapper to rebuild the generator when the process ID changes (i.e., upon Unix
    /// forks).
    #[derive(Debug)]
    pub struct SecureRngState {
        #[cfg(unix)]
        pid: u32,
        rng: SecureRng,
    }

    impl SecureRngState {
        pub fn new() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("atomic-uuid7: could not seed secure random number generator");
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                rng: ReseedingRng::new(core, RESEED_THRESHOLD, OsRng),
            }
        }

        /// Returns a mutable reference to the inner generator, rebuilding it on Unix if the
        /// process ID has changed.
        pub fn get_mut(&mut self) -> &mut SecureRng {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!("process ID changed, reseeding secure random number generator");
                *self = Self::new();
            }
            &mut self.rng
        }
    }
}
