//! Capability traits the protector is written against.
//!
//! The protector never names a concrete algorithm. It asks an
//! [`AsymmetricKeyCapability`] to wrap data keys and a
//! [`SymmetricCipherCapability`] to seal payloads. Concrete variants live in
//! [`crate::asymmetric`] and [`crate::symmetric`] and are selected through
//! [`crate::AlgorithmConfig`].

use crate::{
    CryptoError,
    env::Entropy,
    keys::{DataKey, PrivateKey, PublicKey},
};

/// Public-key encryption used to wrap data keys.
///
/// # Invariants
///
/// - `encrypt` output for a [`crate::DATA_KEY_SIZE`]-byte plaintext is
///   exactly [`wrapped_key_size`](Self::wrapped_key_size) bytes
/// - `decrypt(private, encrypt(public_from_private(private), m)) == m`
/// - Every [`PrivateKey`] is valid input for `public_from_private`
pub trait AsymmetricKeyCapability {
    /// Short algorithm name for diagnostics.
    fn name(&self) -> &'static str;

    /// Size of a wrapped data key produced by [`encrypt`](Self::encrypt).
    fn wrapped_key_size(&self) -> usize;

    /// Generate a fresh private key.
    fn generate_private_key<E: Entropy>(&self, env: &E) -> PrivateKey;

    /// Compute the public key for a private key.
    fn public_from_private(&self, private_key: &PrivateKey) -> PublicKey;

    /// Encrypt `plaintext` to `public_key`.
    fn encrypt<E: Entropy>(
        &self,
        env: &E,
        public_key: &PublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// Decrypt `ciphertext` with `private_key`.
    ///
    /// # Errors
    ///
    /// - `DecryptionFailed` if the ciphertext is malformed or was not
    ///   produced for this key
    fn decrypt(&self, private_key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Compute a re-encryption token from `from` to `to`.
    ///
    /// Only needed by sharing, which is not implemented. Schemes without
    /// proxy re-encryption return `Unsupported`.
    fn rekey(&self, from: &PrivateKey, to: &PublicKey) -> Result<Vec<u8>, CryptoError>;
}

/// Authenticated symmetric encryption of bulk payloads.
///
/// Output is self-contained: the nonce travels with the ciphertext.
pub trait SymmetricCipherCapability {
    /// Short algorithm name for diagnostics.
    fn name(&self) -> &'static str;

    /// Encrypt `plaintext` under `key` with a fresh nonce from `env`.
    fn encrypt<E: Entropy>(
        &self,
        env: &E,
        key: &DataKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// Decrypt and authenticate `ciphertext` under `key`.
    ///
    /// # Errors
    ///
    /// - `DecryptionFailed` on a wrong key, tampering or truncation
    fn decrypt(&self, key: &DataKey, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}
