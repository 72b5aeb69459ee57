//! Self-describing encrypted container.
//!
//! A `Container` is the unit that gets persisted or transmitted:
//! - 4-byte header length (Big Endian)
//! - Enveloped [`Header`] holding the wrapped data keys
//! - Enveloped symmetric ciphertext
//!
//! This is a pure data holder (header bytes + ciphertext bytes). Parsing the
//! header needs the wrapped key size of the asymmetric scheme, so it happens
//! on demand through [`Container::parse_header`].

use bytes::{BufMut, Bytes};

use crate::{
    Header,
    envelope::{decode_envelope, encode_envelope},
    errors::{ProtocolError, Result},
};

/// Complete container (wire format)
///
/// Layout on the wire:
/// `[header_length: u32 BE] + [header: header_length bytes] + [ciphertext envelope]`
///
/// There is no other framing: the ciphertext envelope runs to the end of the
/// input.
///
/// # Invariants
///
/// - Length Consistency: the length field written by [`Container::encode`]
///   always equals `header.len()`. [`Container::decode`] slices exactly that
///   many bytes.
///
/// # Security
///
/// Provides structural validity only. Decoding guarantees the length field is
/// consistent with the input. It does NOT guarantee the header parses, that
/// any wrapped key opens, or that the ciphertext authenticates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Enveloped header bytes
    pub header: Bytes,

    /// Enveloped ciphertext bytes
    pub ciphertext: Bytes,
}

impl Container {
    /// Size of the header length field.
    pub const LENGTH_FIELD_SIZE: usize = 4;

    /// Create a container from already-enveloped sections.
    pub fn new(header: impl Into<Bytes>, ciphertext: impl Into<Bytes>) -> Self {
        Self { header: header.into(), ciphertext: ciphertext.into() }
    }

    /// Build a container from a header and raw symmetric ciphertext.
    ///
    /// Envelopes both sections.
    ///
    /// # Errors
    ///
    /// - Any error from [`Header::encode`]
    /// - `ProtocolError::EnvelopeTooLarge` if the ciphertext is too large
    pub fn build(header: &Header, ciphertext: &[u8]) -> Result<Self> {
        let header = header.encode()?;
        let ciphertext = encode_envelope(ciphertext)?;
        Ok(Self::new(header, ciphertext))
    }

    /// Header length as written into the length field.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::HeaderTooLarge` if the header exceeds u32
    pub fn header_length(&self) -> Result<u32> {
        u32::try_from(self.header.len())
            .map_err(|_| ProtocolError::HeaderTooLarge { size: self.header.len(), unit: "bytes" })
    }

    /// Total encoded size.
    pub fn encoded_len(&self) -> usize {
        Self::LENGTH_FIELD_SIZE + self.header.len() + self.ciphertext.len()
    }

    /// Encode container into buffer
    ///
    /// Writes: `[header_length (4 bytes)] + [header] + [ciphertext]`
    ///
    /// # Errors
    ///
    /// - `ProtocolError::HeaderTooLarge` if the header length does not fit in
    ///   the length field
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        let header_length = self.header_length()?;

        dst.put_u32(header_length);
        dst.put_slice(&self.header);
        dst.put_slice(&self.ciphertext);

        Ok(())
    }

    /// Encode container into a fresh buffer.
    ///
    /// # Errors
    ///
    /// See [`Container::encode`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.encode(&mut bytes)?;
        Ok(bytes)
    }

    /// Decode container from wire format
    ///
    /// Splits the input into header and ciphertext sections without parsing
    /// either.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::ContainerTooShort` if fewer than 4 bytes are present
    /// - `ProtocolError::HeaderTruncated` if fewer than `header_length` bytes
    ///   follow the length field
    ///
    /// # Security
    ///
    /// - Exact Size: exactly `header_length` bytes are taken as the header.
    ///   Any corruption of the length field shifts the section boundary, which
    ///   later surfaces as a header or envelope decode error, never as an
    ///   out-of-bounds read.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let Some((length, rest)) = bytes.split_first_chunk::<4>() else {
            return Err(ProtocolError::ContainerTooShort { actual: bytes.len() });
        };
        let header_length = u32::from_be_bytes(*length) as usize;

        if rest.len() < header_length {
            return Err(ProtocolError::HeaderTruncated {
                expected: header_length,
                actual: rest.len(),
            });
        }

        let (header, ciphertext) = rest.split_at(header_length);
        Ok(Self::new(Bytes::copy_from_slice(header), Bytes::copy_from_slice(ciphertext)))
    }

    /// Parse the header section.
    ///
    /// # Errors
    ///
    /// See [`Header::decode`].
    pub fn parse_header(&self, key_size: usize) -> Result<Header> {
        Header::decode(&self.header, key_size)
    }

    /// Unwrap the ciphertext envelope, borrowing the symmetric ciphertext.
    ///
    /// # Errors
    ///
    /// See [`decode_envelope`].
    pub fn ciphertext_payload(&self) -> Result<&[u8]> {
        decode_envelope(&self.ciphertext)
    }
}

/// Concatenate a header, its length and a ciphertext envelope.
///
/// # Errors
///
/// - `ProtocolError::HeaderTruncated` if `header` is shorter than
///   `header_length`
/// - `ProtocolError::TrailingBytes` if `header` is longer than
///   `header_length`
pub fn encode_container(header: &[u8], header_length: u32, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let expected = header_length as usize;
    if header.len() < expected {
        return Err(ProtocolError::HeaderTruncated { expected, actual: header.len() });
    }
    if header.len() > expected {
        return Err(ProtocolError::TrailingBytes {
            structure: "header",
            count: header.len() - expected,
        });
    }
    Container::new(header.to_vec(), ciphertext.to_vec()).to_bytes()
}

/// Split container bytes into header and ciphertext envelope.
///
/// # Errors
///
/// See [`Container::decode`].
pub fn decode_container(bytes: &[u8]) -> Result<(Bytes, Bytes)> {
    let container = Container::decode(bytes)?;
    Ok((container.header, container.ciphertext))
}
