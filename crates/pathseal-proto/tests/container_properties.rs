//! Property-based tests for container and header encoding/decoding
//!
//! These tests verify that the wire format is correct for ALL valid inputs,
//! not just specific examples, and that corrupted containers are rejected
//! with a decode error rather than a panic or a silently different header.

use pathseal_proto::{
    Container, Header, ProtocolError, WrappedKey, build_header, decode_container,
    encode_container, read_header,
};
use proptest::prelude::*;

const REFERENCE_KEY_SIZE: usize = Header::REFERENCE_WRAPPED_KEY_SIZE;

/// Strategy for generating wrapped keys of one fixed size
fn arbitrary_keys(key_size: usize) -> impl Strategy<Value = Vec<WrappedKey>> {
    prop::collection::vec(
        prop::collection::vec(any::<u8>(), key_size).prop_map(WrappedKey::from),
        0..6,
    )
}

/// Strategy for generating complete containers with reference-size keys
fn arbitrary_container() -> impl Strategy<Value = (u32, Vec<WrappedKey>, Vec<u8>)> {
    (
        0u32..Header::POST_ALPHA_VERSION,
        arbitrary_keys(REFERENCE_KEY_SIZE),
        prop::collection::vec(any::<u8>(), 0..1024), // ciphertext up to 1KB
    )
}

#[test]
fn three_reference_keys_decode_in_order() {
    let keys: Vec<WrappedKey> =
        (0u8..3).map(|i| WrappedKey::from(vec![i; REFERENCE_KEY_SIZE])).collect();

    let (header, header_length) = build_header(keys.clone(), 100).unwrap();
    let container = encode_container(&header, header_length, &[0xc4, 0x00]).unwrap();

    let (header, _) = decode_container(&container).unwrap();
    let (version, decoded) = read_header(&header, REFERENCE_KEY_SIZE).unwrap();

    assert_eq!(version, 100);
    assert_eq!(decoded, keys);
    assert_eq!(decoded[0].as_bytes()[0], 0);
    assert_eq!(decoded[2].as_bytes()[0], 2);
}

#[test]
fn header_length_prefix_matches_header_section() {
    let header = Header::new(100, vec![WrappedKey::from(vec![1u8; REFERENCE_KEY_SIZE])]).unwrap();
    let container = Container::build(&header, b"payload").unwrap();
    let bytes = container.to_bytes().unwrap();

    let header_length = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    assert_eq!(header_length, container.header.len());
    assert_eq!(&bytes[4..4 + header_length], &container.header[..]);
}

proptest! {
    #[test]
    fn container_round_trip((version, keys, ciphertext) in arbitrary_container()) {
        let header = Header::new(version, keys.clone()).unwrap();
        let container = Container::build(&header, &ciphertext).unwrap();

        let bytes = container.to_bytes().unwrap();
        let decoded = Container::decode(&bytes).unwrap();

        prop_assert_eq!(&decoded, &container);
        prop_assert_eq!(decoded.parse_header(REFERENCE_KEY_SIZE).unwrap(), header);
        prop_assert_eq!(decoded.ciphertext_payload().unwrap(), ciphertext.as_slice());
    }

    #[test]
    fn header_round_trip_any_key_size(
        version in 0u32..Header::POST_ALPHA_VERSION,
        (key_size, keys) in (1usize..160).prop_flat_map(|size| (Just(size), arbitrary_keys(size))),
    ) {
        let (bytes, length) = build_header(keys.clone(), version).unwrap();
        prop_assert_eq!(length as usize, bytes.len());

        let (decoded_version, decoded_keys) = read_header(&bytes, key_size).unwrap();
        prop_assert_eq!(decoded_version, version);
        prop_assert_eq!(decoded_keys, keys);
    }

    #[test]
    fn flipped_length_bit_is_a_decode_error(
        (version, keys, ciphertext) in arbitrary_container(),
        bit in 0usize..32,
    ) {
        let header = Header::new(version, keys).unwrap();
        let mut bytes = Container::build(&header, &ciphertext).unwrap().to_bytes().unwrap();
        bytes[bit / 8] ^= 1 << (bit % 8);

        let result = Container::decode(&bytes)
            .and_then(|container| container.parse_header(REFERENCE_KEY_SIZE));

        match result {
            Err(error) => prop_assert!(error.is_malformed(), "unexpected error: {error:?}"),
            Ok(parsed) => prop_assert!(false, "corrupted length decoded to {parsed:?}"),
        }
    }

    #[test]
    fn truncated_container_never_parses(
        (version, keys, ciphertext) in arbitrary_container(),
        cut in any::<prop::sample::Index>(),
    ) {
        let header = Header::new(version, keys).unwrap();
        let bytes = Container::build(&header, &ciphertext).unwrap().to_bytes().unwrap();
        let truncated = &bytes[..cut.index(bytes.len())];

        let parsed = Container::decode(truncated).and_then(|container| {
            container.parse_header(REFERENCE_KEY_SIZE)?;
            container.ciphertext_payload().map(<[u8]>::to_vec)
        });
        prop_assert!(parsed.is_err());
    }

    #[test]
    fn decode_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..2048)) {
        if let Ok(container) = Container::decode(&bytes) {
            let _ = container.parse_header(REFERENCE_KEY_SIZE);
            let _ = container.ciphertext_payload();
        }
    }
}

#[test]
fn unsupported_version_is_distinct_from_corruption() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&5000u32.to_be_bytes());
    payload.extend_from_slice(&0u32.to_be_bytes());
    let header = pathseal_proto::encode_envelope(&payload).unwrap();

    let result = Header::decode(&header, REFERENCE_KEY_SIZE);
    assert_eq!(result, Err(ProtocolError::UnsupportedVersion(5000)));
    assert!(!result.unwrap_err().is_malformed());
}
