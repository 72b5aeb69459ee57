//! Pathseal Cryptographic Primitives
//!
//! Key capabilities and the path-derived key hierarchy used by pathseal.
//! Pure functions with deterministic outputs. Callers provide an [`Entropy`]
//! source so that tests can reproduce every container byte for byte.
//!
//! # Key Hierarchy
//!
//! A protector owns one master keypair. Every prefix of a path gets its own
//! keypair, derived on demand and never stored:
//!
//! ```text
//! Master Private Key
//!        │
//!        ▼
//! Keccak256(master || prefix) → Derived Private Key (per path prefix)
//!        │
//!        ▼
//! public_from_private → Derived Public Key
//!        │
//!        ▼
//! Key Wrap (data key → wrapped key, one per prefix)
//! ```
//!
//! The bulk payload is sealed once under a fresh random data key. Only the
//! data key is wrapped, once per prefix, so any prefix holder can unwrap it.
//!
//! # Security
//!
//! Isolation:
//! - Each prefix has an independent keypair; knowing one derived private key
//!   reveals nothing about its siblings or the master key
//! - Knowing a shallow prefix's key opens everything below it, because every
//!   container under that prefix carries a wrapped key for it
//!
//! Authenticity:
//! - Both symmetric ciphers are AEADs; a wrong data key or any tampering
//!   fails the tag check instead of producing garbage
//! - Wrapped keys are sealed with an AEAD as well, so a wrong private key is
//!   detected before the payload is touched
//!
//! Hygiene:
//! - Private keys and data keys zeroize on drop
//! - `Debug` output of secret types is redacted

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod algorithm;
pub mod asymmetric;
pub mod capability;
pub mod derivation;
pub mod env;
pub mod error;
pub mod keys;
pub mod path;
pub mod symmetric;

pub use algorithm::{
    AlgorithmConfig, AsymmetricAlgorithm, AsymmetricScheme, SymmetricAlgorithm, SymmetricCipher,
};
pub use asymmetric::{WRAPPED_KEY_SIZE, X25519Wrap};
pub use capability::{AsymmetricKeyCapability, SymmetricCipherCapability};
pub use derivation::{
    derive_path_keypair, derive_path_private_key, derive_path_public_key,
    derive_prefix_public_keys,
};
#[cfg(any(test, feature = "test-utils"))]
pub use env::SeededEntropy;
pub use env::{Entropy, SystemEntropy};
pub use error::CryptoError;
pub use keys::{DATA_KEY_SIZE, DataKey, Keypair, PRIVATE_KEY_SIZE, PrivateKey, PublicKey};
pub use path::{PATH_SEPARATOR, ROOT_PATH, component_count, prefixes_of};
pub use symmetric::{Aes256GcmCipher, XChaCha20Cipher};
