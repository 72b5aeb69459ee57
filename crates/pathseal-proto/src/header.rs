//! Versioned header listing the wrapped data keys.
//!
//! The header payload is raw binary (Big Endian) inside a byte envelope:
//!
//! ```text
//! [version: u32 BE][key_count: u32 BE][key_0][key_1]...[key_{n-1}]
//! ```
//!
//! Every wrapped key has the same fixed size. The size is not on the wire;
//! it belongs to the asymmetric scheme and is supplied when decoding.
//!
//! Only the pre-alpha scheme (`version < 1000`) has a defined layout.

use bytes::Bytes;

use crate::{
    envelope::{decode_envelope, encode_envelope},
    errors::{ProtocolError, Result},
};

/// A data key encrypted to one (possibly path-derived) public key.
///
/// Opaque fixed-size bytes; cheap to clone.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WrappedKey(Bytes);

impl WrappedKey {
    /// Wrap raw bytes produced by an asymmetric capability.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Raw wrapped key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the key has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for WrappedKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl AsRef<[u8]> for WrappedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for WrappedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WrappedKey({} bytes)", self.0.len())
    }
}

/// Decoded container header.
///
/// # Invariants
///
/// - `version < `[`Header::POST_ALPHA_VERSION`]. Enforced by [`Header::new`]
///   and [`Header::decode`].
/// - All wrapped keys have the same length. Enforced by [`Header::encode`]
///   and guaranteed by [`Header::decode`].
/// - `wrapped_keys` order is the order they were built in. For path
///   encryption that is shallowest prefix first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    version: u32,
    wrapped_keys: Vec<WrappedKey>,
}

impl Header {
    /// Current pre-alpha version tag written by encrypt.
    pub const PRE_ALPHA_VERSION: u32 = 100;

    /// First version without a defined encoding.
    pub const POST_ALPHA_VERSION: u32 = 1000;

    /// Wrapped key size of the reference re-encryption scheme.
    pub const REFERENCE_WRAPPED_KEY_SIZE: usize = 148;

    /// Size of the fixed fields before the wrapped keys.
    pub const FIXED_SIZE: usize = 8;

    /// Create a header.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::UnsupportedVersion` if `version >= 1000`
    pub fn new(version: u32, wrapped_keys: Vec<WrappedKey>) -> Result<Self> {
        check_version(version)?;
        Ok(Self { version, wrapped_keys })
    }

    /// Version tag.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Wrapped keys in header order.
    pub fn wrapped_keys(&self) -> &[WrappedKey] {
        &self.wrapped_keys
    }

    /// Consume the header, returning its wrapped keys.
    pub fn into_wrapped_keys(self) -> Vec<WrappedKey> {
        self.wrapped_keys
    }

    /// Encode into an enveloped header.
    ///
    /// The returned bytes are the container's header section; their length is
    /// the container's `headerLength`.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::WrappedKeySize` if the keys differ in size
    /// - `ProtocolError::HeaderTooLarge` if the key count does not fit in u32
    /// - `ProtocolError::EnvelopeTooLarge` if the payload exceeds the envelope
    ///   limit
    pub fn encode(&self) -> Result<Vec<u8>> {
        let key_size = self.wrapped_keys.first().map_or(0, WrappedKey::len);
        if let Some(bad) = self.wrapped_keys.iter().find(|key| key.len() != key_size) {
            return Err(ProtocolError::WrappedKeySize { expected: key_size, actual: bad.len() });
        }

        let count = u32::try_from(self.wrapped_keys.len()).map_err(|_| {
            ProtocolError::HeaderTooLarge { size: self.wrapped_keys.len(), unit: "wrapped keys" }
        })?;

        let mut payload = Vec::with_capacity(Self::FIXED_SIZE + self.wrapped_keys.len() * key_size);
        payload.extend_from_slice(&self.version.to_be_bytes());
        payload.extend_from_slice(&count.to_be_bytes());
        for key in &self.wrapped_keys {
            payload.extend_from_slice(key.as_bytes());
        }

        encode_envelope(&payload)
    }

    /// Decode an enveloped header whose wrapped keys are `key_size` bytes each.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::InvalidEnvelope`, `EnvelopeTruncated` or
    ///   `TrailingBytes` if the envelope is malformed
    /// - `ProtocolError::HeaderPayloadTruncated` if the payload is shorter
    ///   than a field requires
    /// - `ProtocolError::UnsupportedVersion` if `version >= 1000`
    /// - `ProtocolError::TrailingBytes` if bytes follow the last key
    ///
    /// # Security
    ///
    /// - The claimed key count is checked against the bytes actually present
    ///   before anything is allocated, so a forged count cannot force a large
    ///   allocation.
    /// - The version is checked before the key count is interpreted; no
    ///   layout is assumed for unknown versions.
    pub fn decode(bytes: &[u8], key_size: usize) -> Result<Self> {
        let payload = decode_envelope(bytes)?;

        let (version, rest) = read_u32(payload, "version")?;
        check_version(version)?;

        let (count, keys) = read_u32(rest, "key_count")?;
        let count = count as usize;

        if key_size == 0 {
            return match (count, keys.len()) {
                (0, 0) => Ok(Self { version, wrapped_keys: Vec::new() }),
                (0, extra) => {
                    Err(ProtocolError::TrailingBytes { structure: "header", count: extra })
                },
                (count, _) => Err(ProtocolError::HeaderTooLarge { size: count, unit: "wrapped keys" }),
            };
        }

        let needed = count.checked_mul(key_size).ok_or(ProtocolError::HeaderTooLarge {
            size: count,
            unit: "wrapped keys",
        })?;

        if keys.len() < needed {
            return Err(ProtocolError::HeaderPayloadTruncated {
                field: "wrapped_keys",
                expected: needed,
                actual: keys.len(),
            });
        }
        if keys.len() > needed {
            return Err(ProtocolError::TrailingBytes {
                structure: "header",
                count: keys.len() - needed,
            });
        }

        let wrapped_keys =
            keys.chunks_exact(key_size).map(|key| WrappedKey::new(key.to_vec())).collect();

        Ok(Self { version, wrapped_keys })
    }
}

/// Build an enveloped header from wrapped keys.
///
/// Returns the header bytes and their length as written into the container.
///
/// # Errors
///
/// See [`Header::new`] and [`Header::encode`].
pub fn build_header(wrapped_keys: Vec<WrappedKey>, version: u32) -> Result<(Vec<u8>, u32)> {
    let bytes = Header::new(version, wrapped_keys)?.encode()?;
    let length = u32::try_from(bytes.len())
        .map_err(|_| ProtocolError::HeaderTooLarge { size: bytes.len(), unit: "bytes" })?;
    Ok((bytes, length))
}

/// Parse an enveloped header into its version and wrapped keys.
///
/// # Errors
///
/// See [`Header::decode`].
pub fn read_header(bytes: &[u8], key_size: usize) -> Result<(u32, Vec<WrappedKey>)> {
    let header = Header::decode(bytes, key_size)?;
    Ok((header.version, header.wrapped_keys))
}

fn check_version(version: u32) -> Result<()> {
    if version >= Header::POST_ALPHA_VERSION {
        return Err(ProtocolError::UnsupportedVersion(version));
    }
    Ok(())
}

fn read_u32<'a>(bytes: &'a [u8], field: &'static str) -> Result<(u32, &'a [u8])> {
    let Some((value, rest)) = bytes.split_first_chunk::<4>() else {
        return Err(ProtocolError::HeaderPayloadTruncated { field, expected: 4, actual: bytes.len() });
    };
    Ok((u32::from_be_bytes(*value), rest))
}
