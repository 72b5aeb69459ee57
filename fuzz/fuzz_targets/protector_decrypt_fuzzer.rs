//! Fuzz target for the full decrypt pipeline
//!
//! Seals a payload with a seeded protector, mutates the container and opens
//! it again.
//!
//! # Invariants
//!
//! - Unmodified containers open under every prefix of the sealing path
//! - A mutated container either fails or yields the original payload
//! - NEVER panic

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pathseal_client::{Protector, ProtectorConfig};
use pathseal_crypto::{SeededEntropy, prefixes_of};

#[derive(Debug, Clone, Arbitrary)]
struct Input {
    seed: u64,
    data: Vec<u8>,
    path: Option<Vec<u8>>,
    flips: Vec<(u16, u8)>,
}

fuzz_target!(|input: Input| {
    let protector =
        Protector::with_env(SeededEntropy::with_seed(input.seed), ProtectorConfig::default())
            .unwrap();
    let path = input.path.as_deref();

    let sealed = protector.encrypt(&input.data, path).unwrap();
    match path {
        Some(path) => {
            for prefix in prefixes_of(path) {
                assert_eq!(protector.decrypt(&sealed, Some(prefix)).unwrap(), input.data);
            }
        },
        None => assert_eq!(protector.decrypt(&sealed, None).unwrap(), input.data),
    }

    let mut mutated = sealed.clone();
    for (offset, mask) in input.flips {
        let offset = usize::from(offset) % mutated.len();
        mutated[offset] ^= mask;
    }
    if let Ok(plaintext) = protector.decrypt(&mutated, path) {
        assert_eq!(plaintext, input.data);
    }
});
