//! Length-prefixed byte envelope.
//!
//! Both the header and the ciphertext travel inside a MessagePack `bin`
//! object. The marker and length prefix depend on the payload size:
//!
//! ```text
//! len < 2^8    [0xc4][len: u8     ][payload]
//! len < 2^16   [0xc5][len: u16 BE ][payload]
//! len < 2^32   [0xc6][len: u32 BE ][payload]
//! ```
//!
//! Decoding is strict: the envelope must span the input exactly.

use crate::errors::{ProtocolError, Result};

/// Largest payload a byte envelope can carry.
pub const MAX_ENVELOPE_PAYLOAD: usize = u32::MAX as usize;

/// Wrap `payload` in a byte envelope.
///
/// # Errors
///
/// - `ProtocolError::EnvelopeTooLarge` if `payload` exceeds
///   [`MAX_ENVELOPE_PAYLOAD`]
pub fn encode_envelope(payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > MAX_ENVELOPE_PAYLOAD {
        return Err(ProtocolError::EnvelopeTooLarge { size: payload.len() });
    }

    let mut envelope = Vec::with_capacity(envelope_overhead(payload.len()) + payload.len());
    let Ok(()) = rmp::encode::write_bin(&mut envelope, payload) else {
        unreachable!("writing a size-checked bin object to a Vec cannot fail");
    };

    debug_assert_eq!(envelope.len(), envelope_overhead(payload.len()) + payload.len());
    Ok(envelope)
}

/// Unwrap a byte envelope, borrowing the payload from `bytes`.
///
/// # Errors
///
/// - `ProtocolError::InvalidEnvelope` if `bytes` does not start with a `bin`
///   marker and complete length prefix
/// - `ProtocolError::EnvelopeTruncated` if fewer payload bytes are present
///   than the prefix declares
/// - `ProtocolError::TrailingBytes` if bytes follow the payload
pub fn decode_envelope(bytes: &[u8]) -> Result<&[u8]> {
    let mut reader = bytes;
    let declared =
        rmp::decode::read_bin_len(&mut reader).map_err(|_| ProtocolError::InvalidEnvelope)? as usize;

    if reader.len() < declared {
        return Err(ProtocolError::EnvelopeTruncated { expected: declared, actual: reader.len() });
    }
    if reader.len() > declared {
        return Err(ProtocolError::TrailingBytes {
            structure: "byte envelope",
            count: reader.len() - declared,
        });
    }

    Ok(reader)
}

/// Bytes of marker and length prefix for a payload of `len` bytes.
pub fn envelope_overhead(len: usize) -> usize {
    if len <= u8::MAX as usize {
        2
    } else if len <= u16::MAX as usize {
        3
    } else {
        5
    }
}
