//! Fuzz target for container decoding
//!
//! Feeds arbitrary bytes to the container and header parsers to find:
//! - Parser crashes or panics
//! - Integer overflows in length arithmetic
//! - Forged key counts that cause large allocations
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pathseal_proto::{Container, decode_container, read_header};

fuzz_target!(|data: &[u8]| {
    let _ = decode_container(data);

    if let Ok(container) = Container::decode(data) {
        // Any successfully decoded container re-encodes to the same bytes
        let encoded = container.to_bytes().unwrap();
        assert_eq!(encoded, data);

        for key_size in [1, 32, 80, 148] {
            let _ = container.parse_header(key_size);
        }
        let _ = container.ciphertext_payload();
    }

    for key_size in [0, 1, 80] {
        let _ = read_header(data, key_size);
    }
});
