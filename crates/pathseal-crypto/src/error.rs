//! Error types for key capabilities.

use thiserror::Error;

/// Errors produced by the asymmetric and symmetric capabilities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key material has the wrong length for the algorithm
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Length the algorithm requires
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Encryption could not be performed
    #[error("encryption failed: {reason}")]
    EncryptionFailed {
        /// What went wrong
        reason: String,
    },

    /// Ciphertext was malformed or did not authenticate under the key
    #[error("decryption failed: {reason}")]
    DecryptionFailed {
        /// What went wrong
        reason: String,
    },

    /// The algorithm does not provide this operation
    #[error("{operation} is not supported by {algorithm}")]
    Unsupported {
        /// Operation that was requested
        operation: &'static str,
        /// Algorithm that was asked to perform it
        algorithm: &'static str,
    },

    /// Algorithm name did not match any known variant
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

impl CryptoError {
    /// Returns true if this error means "wrong key or tampered data".
    ///
    /// Callers searching for a usable key treat these as a miss and move on.
    /// Everything else signals a caller bug or configuration problem.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::DecryptionFailed { .. })
    }
}
