//! Error types for container and header decoding.

use thiserror::Error;

/// Result type for wire format operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while building or parsing a container.
///
/// Every variant except [`ProtocolError::UnsupportedVersion`] means the bytes
/// are malformed. All of them are raised before any slice is taken, so
/// malformed input never causes an out-of-bounds read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Container is shorter than its 4-byte header length field
    #[error("container too short: need 4 bytes for header length, got {actual}")]
    ContainerTooShort {
        /// Bytes available
        actual: usize,
    },

    /// Header length field points past the end of the container
    #[error("header truncated: expected {expected} bytes, got {actual}")]
    HeaderTruncated {
        /// Header length claimed by the container
        expected: usize,
        /// Bytes remaining after the length field
        actual: usize,
    },

    /// Header payload ended before a fixed-size field
    #[error("header payload truncated at {field}: expected {expected} bytes, got {actual}")]
    HeaderPayloadTruncated {
        /// Field being read
        field: &'static str,
        /// Bytes the field needs
        expected: usize,
        /// Bytes remaining
        actual: usize,
    },

    /// Bytes left over after a complete structure
    #[error("{count} trailing bytes after {structure}")]
    TrailingBytes {
        /// Structure that was fully decoded
        structure: &'static str,
        /// Number of unexpected bytes
        count: usize,
    },

    /// Envelope does not start with a byte-string marker
    #[error("invalid byte envelope")]
    InvalidEnvelope,

    /// Envelope declares more bytes than are present
    #[error("byte envelope truncated: expected {expected} bytes, got {actual}")]
    EnvelopeTruncated {
        /// Length declared by the envelope
        expected: usize,
        /// Bytes present after the envelope marker
        actual: usize,
    },

    /// Payload is too large for a byte envelope (u32 length)
    #[error("payload too large for byte envelope: {size} bytes")]
    EnvelopeTooLarge {
        /// Payload size
        size: usize,
    },

    /// Header version has no defined encoding
    #[error("unsupported header version: {0}")]
    UnsupportedVersion(u32),

    /// Wrapped key has the wrong size for this header
    #[error("wrapped key size mismatch: expected {expected} bytes, got {actual}")]
    WrappedKeySize {
        /// Size every key in the header must have
        expected: usize,
        /// Size of the offending key
        actual: usize,
    },

    /// Header cannot be represented with 32-bit lengths
    #[error("header too large: {size} {unit}")]
    HeaderTooLarge {
        /// Offending size
        size: usize,
        /// What `size` counts
        unit: &'static str,
    },
}

impl ProtocolError {
    /// Returns true if the bytes are malformed (as opposed to well-formed but
    /// using a version this implementation does not handle).
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::UnsupportedVersion(_))
    }
}
