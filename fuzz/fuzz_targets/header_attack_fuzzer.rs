//! Fuzz target for structurally valid but hostile containers
//!
//! # Strategy
//!
//! - Lying length: a real container whose header length field is replaced
//! - Forged count: a header claiming more (or fewer) keys than it holds
//! - Future version: version at or beyond the post-alpha boundary
//! - Truncation: a real container cut short at an arbitrary offset
//! - Trailing garbage: extra bytes appended after the ciphertext envelope
//!
//! # Invariants
//!
//! - Every mutation is rejected with an error, never a panic
//! - Forged counts are rejected before allocation
//! - Future versions are reported as unsupported, not as corruption

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pathseal_proto::{
    Container, Header, ProtocolError, WrappedKey, decode_envelope, encode_envelope,
};

const KEY_SIZE: usize = 80;

#[derive(Debug, Clone, Arbitrary)]
enum HeaderAttack {
    LyingLength { claimed: u32 },
    ForgedCount { claimed: u32 },
    FutureVersion { offset: u32 },
    Truncation { cut: u16 },
    TrailingGarbage { garbage: Vec<u8> },
}

#[derive(Debug, Clone, Arbitrary)]
struct Input {
    key_count: u8,
    fill: u8,
    ciphertext: Vec<u8>,
    attack: HeaderAttack,
}

fn wrapped_keys(count: u8, fill: u8) -> Vec<WrappedKey> {
    (0..count % 8).map(|i| WrappedKey::new(vec![fill.wrapping_add(i); KEY_SIZE])).collect()
}

/// Re-envelope `header` with the u32 field at `offset` replaced.
fn rewrite_header(header: &Header, offset: usize, value: u32) -> Vec<u8> {
    let encoded = header.encode().unwrap();
    let mut payload = decode_envelope(&encoded).unwrap().to_vec();
    payload[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
    encode_envelope(&payload).unwrap()
}

/// Split the container and parse both of its sections.
fn parses(bytes: &[u8]) -> bool {
    Container::decode(bytes).is_ok_and(|container| {
        container.parse_header(KEY_SIZE).is_ok() && container.ciphertext_payload().is_ok()
    })
}

fuzz_target!(|input: Input| {
    let header = Header::new(Header::PRE_ALPHA_VERSION, wrapped_keys(input.key_count, input.fill))
        .unwrap();
    let container = Container::build(&header, &input.ciphertext).unwrap();
    let mut bytes = container.to_bytes().unwrap();
    assert!(parses(&bytes));

    match input.attack {
        HeaderAttack::LyingLength { claimed } => {
            let honest = container.header_length().unwrap();
            if claimed == honest {
                return;
            }
            bytes[..4].copy_from_slice(&claimed.to_be_bytes());
            assert!(!parses(&bytes));
        },
        HeaderAttack::ForgedCount { claimed } => {
            if claimed as usize == header.wrapped_keys().len() {
                return;
            }
            let raw = rewrite_header(&header, 4, claimed);
            assert!(Header::decode(&raw, KEY_SIZE).is_err());
        },
        HeaderAttack::FutureVersion { offset } => {
            let version = Header::POST_ALPHA_VERSION.saturating_add(offset);
            let raw = rewrite_header(&header, 0, version);

            let result = Header::decode(&raw, KEY_SIZE);
            assert!(matches!(result, Err(ProtocolError::UnsupportedVersion(v)) if v == version));
        },
        HeaderAttack::Truncation { cut } => {
            let cut = usize::from(cut) % bytes.len();
            assert!(!parses(&bytes[..cut]));
        },
        HeaderAttack::TrailingGarbage { garbage } => {
            if garbage.is_empty() {
                return;
            }
            bytes.extend_from_slice(&garbage);
            assert!(!parses(&bytes));
        },
    }
});
