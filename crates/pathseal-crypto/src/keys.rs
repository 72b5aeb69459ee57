//! Key material types.
//!
//! Private keys and data keys zeroize on drop. Public keys are opaque bytes
//! whose layout belongs to the asymmetric capability that produced them.

use std::fmt;

use zeroize::Zeroize;

use crate::{CryptoError, env::Entropy};

/// Size of a private key in bytes.
///
/// Equal to the Keccak-256 output so a path derivation seed is directly a
/// private key in the same representation as the master key.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Size of a data key in bytes.
pub const DATA_KEY_SIZE: usize = 32;

/// Raw private-key scalar.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    bytes: [u8; PRIVATE_KEY_SIZE],
}

impl PrivateKey {
    /// Wrap raw scalar bytes.
    pub fn from_bytes(bytes: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parse a private key from a slice, checking its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; PRIVATE_KEY_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKeyLength { expected: PRIVATE_KEY_SIZE, actual: bytes.len() }
        })?;
        Ok(Self { bytes })
    }

    /// Raw scalar bytes.
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Opaque public key bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Wrap raw public key bytes. Validation happens when the key is used.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }

    /// Raw public key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PublicKey(")?;
        for byte in &self.bytes {
            write!(f, "{byte:02x}")?;
        }
        f.write_str(")")
    }
}

/// A private key together with its public key.
///
/// Used for the master keypair owned by a protector and for keypairs derived
/// per path prefix.
#[derive(Clone, Debug)]
pub struct Keypair {
    /// Private half
    pub private_key: PrivateKey,
    /// Public half, computed from `private_key`
    pub public_key: PublicKey,
}

/// Ephemeral symmetric key that encrypts one payload.
///
/// Generated fresh per encryption and never persisted in plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct DataKey {
    key: [u8; DATA_KEY_SIZE],
}

impl DataKey {
    /// Generate a fresh random data key.
    pub fn generate<E: Entropy>(env: &E) -> Self {
        Self { key: env.random_array() }
    }

    /// Accept a candidate key only if it has exactly [`DATA_KEY_SIZE`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let key: [u8; DATA_KEY_SIZE] = bytes.try_into().ok()?;
        Some(Self { key })
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; DATA_KEY_SIZE] {
        &self.key
    }
}

impl From<[u8; DATA_KEY_SIZE]> for DataKey {
    fn from(key: [u8; DATA_KEY_SIZE]) -> Self {
        Self { key }
    }
}

impl Drop for DataKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl fmt::Debug for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DataKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SeededEntropy;

    #[test]
    fn private_key_rejects_wrong_length() {
        let result = PrivateKey::from_slice(&[0u8; 31]);
        assert_eq!(result, Err(CryptoError::InvalidKeyLength { expected: 32, actual: 31 }));

        assert!(PrivateKey::from_slice(&[0u8; 32]).is_ok());
    }

    #[test]
    fn data_key_only_accepts_exact_length() {
        assert!(DataKey::from_slice(&[1u8; 31]).is_none());
        assert!(DataKey::from_slice(&[1u8; 33]).is_none());
        assert!(DataKey::from_slice(&[]).is_none());

        let key = DataKey::from_slice(&[1u8; 32]).unwrap();
        assert_eq!(key.as_bytes(), &[1u8; 32]);
    }

    #[test]
    fn generated_data_keys_differ() {
        let env = SeededEntropy::with_seed(3);
        let a = DataKey::generate(&env);
        let b = DataKey::generate(&env);
        assert_ne!(a, b);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let private = PrivateKey::from_bytes([0xAB; 32]);
        assert!(!format!("{private:?}").contains("ab"));

        let data_key = DataKey::from([0xCD; 32]);
        assert!(!format!("{data_key:?}").contains("cd"));

        let public = PublicKey::from_bytes(vec![0xEF, 0x01]);
        assert_eq!(format!("{public:?}"), "PublicKey(ef01)");
    }
}
