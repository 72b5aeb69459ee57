//! Caller-facing error type.
//!
//! One variant per failure kind a caller has to tell apart: corrupt bytes,
//! unknown version, wrong key or path, tampered payload and unimplemented
//! policy operations.

use std::path::PathBuf;

use pathseal_crypto::CryptoError;
use pathseal_proto::ProtocolError;
use thiserror::Error;

/// Errors returned by [`crate::Protector`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Container or header bytes are malformed
    #[error("malformed container: {0}")]
    Decode(ProtocolError),

    /// Header version has no defined encoding
    #[error("unsupported header version: {0}")]
    UnsupportedVersion(u32),

    /// No wrapped key opened to a data key with the supplied key material
    #[error("no usable data key among {wrapped_keys} wrapped keys")]
    KeyNotFound {
        /// Wrapped keys in the header
        wrapped_keys: usize,
    },

    /// Payload failed authentication under every candidate data key
    #[error("authentication failed: {reason}")]
    Authentication {
        /// What went wrong
        reason: String,
    },

    /// Operation exists but has no behavior yet
    #[error("{operation} is not implemented")]
    Unimplemented {
        /// Operation that was invoked
        operation: &'static str,
    },

    /// Capability failure while encrypting or wrapping
    #[error("crypto error: {0}")]
    Crypto(CryptoError),

    /// Reading a sealed file failed
    #[error("failed to read {}: {reason}", path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        reason: String,
    },
}

impl ClientError {
    /// Returns true if the container is intact but the key or path is wrong.
    ///
    /// Callers can retry with different key material. Decode and version
    /// errors mean the data itself is unusable.
    pub fn is_wrong_key(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. } | Self::Authentication { .. })
    }

    /// Returns true if the container bytes cannot be interpreted.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::UnsupportedVersion(_))
    }
}

impl From<ProtocolError> for ClientError {
    fn from(error: ProtocolError) -> Self {
        match error {
            ProtocolError::UnsupportedVersion(version) => Self::UnsupportedVersion(version),
            other => Self::Decode(other),
        }
    }
}

impl From<CryptoError> for ClientError {
    fn from(error: CryptoError) -> Self {
        Self::Crypto(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_version_is_lifted_out_of_decode() {
        let error = ClientError::from(ProtocolError::UnsupportedVersion(1000));
        assert_eq!(error, ClientError::UnsupportedVersion(1000));

        let error = ClientError::from(ProtocolError::InvalidEnvelope);
        assert_eq!(error, ClientError::Decode(ProtocolError::InvalidEnvelope));
    }

    #[test]
    fn wrong_key_and_corruption_are_disjoint() {
        let wrong_key = [
            ClientError::KeyNotFound { wrapped_keys: 3 },
            ClientError::Authentication { reason: "tag mismatch".to_string() },
        ];
        for error in &wrong_key {
            assert!(error.is_wrong_key());
            assert!(!error.is_corrupt());
        }

        let corrupt = [
            ClientError::Decode(ProtocolError::ContainerTooShort { actual: 1 }),
            ClientError::UnsupportedVersion(4000),
        ];
        for error in &corrupt {
            assert!(error.is_corrupt());
            assert!(!error.is_wrong_key());
        }

        let neither = ClientError::Unimplemented { operation: "grant" };
        assert!(!neither.is_wrong_key());
        assert!(!neither.is_corrupt());
    }

    #[test]
    fn io_error_names_the_file() {
        let error = ClientError::Io { path: PathBuf::from("/tmp/x.seal"), reason: "gone".into() };
        assert_eq!(error.to_string(), "failed to read /tmp/x.seal: gone");
    }
}
