//! Entropy abstraction for deterministic testing.
//!
//! Every operation that needs randomness (data keys, nonces, ephemeral
//! secrets) draws it from an [`Entropy`] supplied by the caller. Production
//! code uses [`SystemEntropy`]; tests use a seeded source so that the same
//! seed reproduces the same containers byte for byte.

/// Source of random bytes.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `random_bytes()` uses cryptographically secure entropy in production
/// - `random_bytes()` is infallible; an environment that cannot produce
///   randomness cannot operate securely and must abort instead
pub trait Entropy: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    /// - Uses cryptographically secure RNG
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random fixed-size array.
    ///
    /// Convenience for keys and nonces.
    fn random_array<const N: usize>(&self) -> [u8; N] {
        let mut bytes = [0u8; N];
        self.random_bytes(&mut bytes);
        bytes
    }
}

/// Production entropy backed by the OS RNG (getrandom).
///
/// # Panics
///
/// Panics if the OS RNG fails. Continuing without functioning randomness
/// would silently produce predictable data keys and nonces.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEntropy;

impl SystemEntropy {
    /// Create a new system entropy source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Entropy for SystemEntropy {
    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - cannot generate key material");
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use seeded::SeededEntropy;

#[cfg(any(test, feature = "test-utils"))]
mod seeded {
    use std::sync::{Arc, Mutex, PoisonError};

    use rand_chacha::{
        ChaCha20Rng,
        rand_core::{RngCore, SeedableRng},
    };

    use super::Entropy;

    /// Deterministic entropy for tests.
    ///
    /// Clones share one ChaCha20 stream, so a protector and the test that
    /// drives it observe a single reproducible sequence.
    #[derive(Clone, Debug)]
    pub struct SeededEntropy {
        rng: Arc<Mutex<ChaCha20Rng>>,
    }

    impl SeededEntropy {
        /// Create a seeded entropy source.
        #[must_use]
        pub fn with_seed(seed: u64) -> Self {
            Self { rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))) }
        }
    }

    impl Entropy for SeededEntropy {
        fn random_bytes(&self, buffer: &mut [u8]) {
            self.rng.lock().unwrap_or_else(PoisonError::into_inner).fill_bytes(buffer);
        }
    }
}
