//! Bulk payload encryption.
//!
//! Both ciphers produce `nonce || ciphertext || tag` with a fresh random
//! nonce drawn from the caller's [`Entropy`].

use aes_gcm::Aes256Gcm;
use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};

use crate::{
    CryptoError, capability::SymmetricCipherCapability, env::Entropy, keys::DataKey,
};

/// Size of the `XChaCha20` nonce (24 bytes)
pub const XCHACHA_NONCE_SIZE: usize = 24;

/// Size of the AES-GCM nonce (12 bytes)
pub const AES_GCM_NONCE_SIZE: usize = 12;

/// Authentication tag size shared by both AEADs (16 bytes)
pub const TAG_SIZE: usize = 16;

/// `XChaCha20-Poly1305` with a random 24-byte nonce.
///
/// The nonce is large enough that random generation has no practical
/// collision risk, so no counter state is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct XChaCha20Cipher;

impl SymmetricCipherCapability for XChaCha20Cipher {
    fn name(&self) -> &'static str {
        "xchacha20poly1305"
    }

    fn encrypt<E: Entropy>(
        &self,
        env: &E,
        key: &DataKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let nonce: [u8; XCHACHA_NONCE_SIZE] = env.random_array();
        let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

        let Ok(ciphertext) = cipher.encrypt(XNonce::from_slice(&nonce), plaintext) else {
            unreachable!("XChaCha20-Poly1305 encryption cannot fail with valid inputs");
        };

        let mut sealed = Vec::with_capacity(XCHACHA_NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    fn decrypt(&self, key: &DataKey, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let (nonce, body) = split_sealed(ciphertext, XCHACHA_NONCE_SIZE)?;
        let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

        cipher.decrypt(XNonce::from_slice(nonce), body).map_err(|_| {
            CryptoError::DecryptionFailed { reason: "authentication failed".to_string() }
        })
    }
}

/// AES-256-GCM with a random 12-byte nonce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Aes256GcmCipher;

impl SymmetricCipherCapability for Aes256GcmCipher {
    fn name(&self) -> &'static str {
        "aes256gcm"
    }

    fn encrypt<E: Entropy>(
        &self,
        env: &E,
        key: &DataKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let nonce: [u8; AES_GCM_NONCE_SIZE] = env.random_array();
        let cipher = Aes256Gcm::new(key.as_bytes().into());

        let ciphertext = cipher
            .encrypt(aes_gcm::Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| CryptoError::EncryptionFailed {
                reason: "plaintext exceeds AES-GCM limits".to_string(),
            })?;

        let mut sealed = Vec::with_capacity(AES_GCM_NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    fn decrypt(&self, key: &DataKey, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let (nonce, body) = split_sealed(ciphertext, AES_GCM_NONCE_SIZE)?;
        let cipher = Aes256Gcm::new(key.as_bytes().into());

        cipher.decrypt(aes_gcm::Nonce::from_slice(nonce), body).map_err(|_| {
            CryptoError::DecryptionFailed { reason: "authentication failed".to_string() }
        })
    }
}

/// Split `nonce || body`, rejecting input too short to hold a nonce and tag.
fn split_sealed(sealed: &[u8], nonce_size: usize) -> Result<(&[u8], &[u8]), CryptoError> {
    if sealed.len() < nonce_size + TAG_SIZE {
        return Err(CryptoError::DecryptionFailed {
            reason: format!(
                "ciphertext too short: {} bytes, need at least {}",
                sealed.len(),
                nonce_size + TAG_SIZE
            ),
        });
    }
    Ok(sealed.split_at(nonce_size))
}
