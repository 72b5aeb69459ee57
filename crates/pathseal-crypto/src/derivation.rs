//! Path-derived key hierarchy using Keccak-256.
//!
//! ```text
//! master private key ──┐
//!                      ├─ Keccak256(master || prefix) ─→ derived private key
//! path prefix ─────────┘                                     │
//!                                                            ▼
//!                                          public_from_private ─→ derived public key
//! ```
//!
//! Derived keys are never stored; they are recomputed from the master key
//! whenever a prefix is wrapped to or unwrapped from.

use sha3::{Digest, Keccak256};

use crate::{
    capability::AsymmetricKeyCapability,
    keys::{Keypair, PrivateKey, PublicKey},
    path::prefixes_of,
};

/// Derive the private key for one path prefix.
///
/// The Keccak-256 digest is used directly as a private key in the same
/// representation as the master key.
///
/// # Security
///
/// - Deterministic: same inputs always produce same output
/// - Different prefixes produce different keys (collision resistance)
/// - Knowing a derived key does not reveal the master key or any sibling
pub fn derive_path_private_key(master: &PrivateKey, prefix: &[u8]) -> PrivateKey {
    let seed: [u8; 32] =
        Keccak256::new().chain_update(master.as_bytes()).chain_update(prefix).finalize().into();
    PrivateKey::from_bytes(seed)
}

/// Derive the public key for one path prefix.
pub fn derive_path_public_key<A: AsymmetricKeyCapability>(
    scheme: &A,
    master: &PrivateKey,
    prefix: &[u8],
) -> PublicKey {
    scheme.public_from_private(&derive_path_private_key(master, prefix))
}

/// Derive both halves of the keypair for one path prefix.
pub fn derive_path_keypair<A: AsymmetricKeyCapability>(
    scheme: &A,
    master: &PrivateKey,
    prefix: &[u8],
) -> Keypair {
    let private_key = derive_path_private_key(master, prefix);
    let public_key = scheme.public_from_private(&private_key);
    Keypair { private_key, public_key }
}

/// Derive the public key of every prefix of `path`, shallowest first.
///
/// Returns one key per element of [`prefixes_of`], in the same order.
pub fn derive_prefix_public_keys<A: AsymmetricKeyCapability>(
    scheme: &A,
    master: &PrivateKey,
    path: &[u8],
) -> Vec<PublicKey> {
    prefixes_of(path)
        .into_iter()
        .map(|prefix| derive_path_public_key(scheme, master, prefix))
        .collect()
}
