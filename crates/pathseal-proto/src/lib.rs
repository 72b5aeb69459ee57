//! Pathseal wire format
//!
//! Bit-exact encoding of sealed containers. Pure functions over byte
//! buffers; nothing here touches key material.
//!
//! ```text
//! ┌──────────────────┬────────────────────────────┬───────────────────────┐
//! │ header_length    │ header (byte envelope)     │ ciphertext (byte      │
//! │ u32 BE           │ version ‖ count ‖ keys     │ envelope)             │
//! └──────────────────┴────────────────────────────┴───────────────────────┘
//! ```
//!
//! Decoding is strict. Truncation, trailing bytes and inconsistent lengths
//! are all [`ProtocolError`]s, checked before any slice is taken.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod container;
pub mod envelope;
pub mod errors;
pub mod header;

pub use container::{Container, decode_container, encode_container};
pub use envelope::{decode_envelope, encode_envelope};
pub use errors::{ProtocolError, Result};
pub use header::{Header, WrappedKey, build_header, read_header};
