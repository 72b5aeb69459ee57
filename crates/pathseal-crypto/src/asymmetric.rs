//! Data key wrapping with X25519.
//!
//! Each wrap generates an ephemeral X25519 secret, agrees a shared secret
//! with the recipient, stretches it with HKDF-SHA256 and seals the data key
//! with `XChaCha20-Poly1305`.
//!
//! # Wire Format
//!
//! ```text
//! [ ephemeral_public: 32 bytes ][ sealed key: len + 16 bytes ]
//! ```
//!
//! A 32-byte data key wraps to exactly [`WRAPPED_KEY_SIZE`] bytes.
//!
//! # Security
//!
//! - The wrapping key is unique per wrap (fresh ephemeral secret), so a
//!   fixed zero nonce is never reused under the same key
//! - HKDF info binds both public keys, so a wrapped key cannot be replayed
//!   against a different recipient
//! - Non-contributory shared secrets (low-order recipient points) are
//!   rejected
//! - A wrong private key fails the Poly1305 tag and is reported as
//!   `DecryptionFailed`

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use hkdf::Hkdf;
use sha2::Sha256;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroize;

use crate::{
    CryptoError,
    capability::AsymmetricKeyCapability,
    env::Entropy,
    keys::{DATA_KEY_SIZE, PRIVATE_KEY_SIZE, PrivateKey, PublicKey},
    symmetric::TAG_SIZE,
};

/// Size of an X25519 public key (32 bytes)
pub const X25519_PUBLIC_KEY_SIZE: usize = 32;

/// Size of a wrapped 32-byte data key (80 bytes)
///
/// Layout: `ephemeral_public` (32) || sealed key (32) || tag (16)
pub const WRAPPED_KEY_SIZE: usize = X25519_PUBLIC_KEY_SIZE + DATA_KEY_SIZE + TAG_SIZE;

/// Label used for wrapping key derivation
const WRAP_LABEL: &[u8] = b"pathsealWrapV1";

/// Each wrapping key seals exactly one message.
const WRAP_NONCE: [u8; 24] = [0u8; 24];

/// X25519 key wrapping scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct X25519Wrap;

impl X25519Wrap {
    fn static_secret(private_key: &PrivateKey) -> StaticSecret {
        StaticSecret::from(*private_key.as_bytes())
    }

    fn parse_public(public_key: &[u8]) -> Result<X25519PublicKey, CryptoError> {
        let bytes: [u8; X25519_PUBLIC_KEY_SIZE] =
            public_key.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: X25519_PUBLIC_KEY_SIZE,
                actual: public_key.len(),
            })?;
        Ok(X25519PublicKey::from(bytes))
    }
}

impl AsymmetricKeyCapability for X25519Wrap {
    fn name(&self) -> &'static str {
        "x25519"
    }

    fn wrapped_key_size(&self) -> usize {
        WRAPPED_KEY_SIZE
    }

    fn generate_private_key<E: Entropy>(&self, env: &E) -> PrivateKey {
        PrivateKey::from_bytes(env.random_array::<PRIVATE_KEY_SIZE>())
    }

    fn public_from_private(&self, private_key: &PrivateKey) -> PublicKey {
        let public = X25519PublicKey::from(&Self::static_secret(private_key));
        PublicKey::from_bytes(public.to_bytes().to_vec())
    }

    fn encrypt<E: Entropy>(
        &self,
        env: &E,
        public_key: &PublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let recipient = Self::parse_public(public_key.as_bytes())?;

        let ephemeral = StaticSecret::from(env.random_array::<PRIVATE_KEY_SIZE>());
        let ephemeral_public = X25519PublicKey::from(&ephemeral);

        let shared = ephemeral.diffie_hellman(&recipient);
        if !shared.was_contributory() {
            return Err(CryptoError::EncryptionFailed {
                reason: "recipient public key is a low-order point".to_string(),
            });
        }

        let mut wrapping_key =
            derive_wrapping_key(shared.as_bytes(), ephemeral_public.as_bytes(), recipient.as_bytes());
        let cipher = XChaCha20Poly1305::new((&wrapping_key).into());
        wrapping_key.zeroize();

        let Ok(sealed) = cipher.encrypt(XNonce::from_slice(&WRAP_NONCE), plaintext) else {
            unreachable!("XChaCha20-Poly1305 encryption cannot fail with valid inputs");
        };

        let mut wrapped = Vec::with_capacity(X25519_PUBLIC_KEY_SIZE + sealed.len());
        wrapped.extend_from_slice(ephemeral_public.as_bytes());
        wrapped.extend_from_slice(&sealed);
        Ok(wrapped)
    }

    fn decrypt(&self, private_key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() < X25519_PUBLIC_KEY_SIZE + TAG_SIZE {
            return Err(CryptoError::DecryptionFailed {
                reason: format!(
                    "wrapped key too short: {} bytes, need at least {}",
                    ciphertext.len(),
                    X25519_PUBLIC_KEY_SIZE + TAG_SIZE
                ),
            });
        }

        let (ephemeral_bytes, sealed) = ciphertext.split_at(X25519_PUBLIC_KEY_SIZE);
        let ephemeral_public = Self::parse_public(ephemeral_bytes)?;

        let secret = Self::static_secret(private_key);
        let recipient_public = X25519PublicKey::from(&secret);

        let shared = secret.diffie_hellman(&ephemeral_public);
        if !shared.was_contributory() {
            return Err(CryptoError::DecryptionFailed {
                reason: "ephemeral public key is a low-order point".to_string(),
            });
        }

        let mut wrapping_key = derive_wrapping_key(
            shared.as_bytes(),
            ephemeral_public.as_bytes(),
            recipient_public.as_bytes(),
        );
        let cipher = XChaCha20Poly1305::new((&wrapping_key).into());
        wrapping_key.zeroize();

        cipher.decrypt(XNonce::from_slice(&WRAP_NONCE), sealed).map_err(|_| {
            CryptoError::DecryptionFailed { reason: "authentication failed".to_string() }
        })
    }

    fn rekey(&self, _from: &PrivateKey, _to: &PublicKey) -> Result<Vec<u8>, CryptoError> {
        Err(CryptoError::Unsupported { operation: "rekey", algorithm: "x25519" })
    }
}

/// Derive a single-use wrapping key from an X25519 shared secret.
fn derive_wrapping_key(
    shared_secret: &[u8; 32],
    ephemeral_public: &[u8; 32],
    recipient_public: &[u8; 32],
) -> [u8; 32] {
    let hkdf = Hkdf::<Sha256>::new(None, shared_secret);

    // Build the info parameter: label || ephemeral_public || recipient_public
    let mut info = Vec::with_capacity(WRAP_LABEL.len() + 64);
    info.extend_from_slice(WRAP_LABEL);
    info.extend_from_slice(ephemeral_public);
    info.extend_from_slice(recipient_public);

    let mut key = [0u8; 32];
    let Ok(()) = hkdf.expand(&info, &mut key) else {
        unreachable!("32 bytes is a valid HKDF-SHA256 output length");
    };

    key
}
