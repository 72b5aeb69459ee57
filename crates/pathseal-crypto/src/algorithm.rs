//! Algorithm selection.
//!
//! The set of algorithms is closed. A configuration names one symmetric and
//! one asymmetric variant; [`SymmetricCipher`] and [`AsymmetricScheme`]
//! dispatch to the concrete implementation with a `match`, so callers stay
//! generic over the capability traits without trait objects.

use std::{fmt, str::FromStr};

use crate::{
    CryptoError,
    asymmetric::X25519Wrap,
    capability::{AsymmetricKeyCapability, SymmetricCipherCapability},
    env::Entropy,
    keys::{DataKey, PrivateKey, PublicKey},
    symmetric::{Aes256GcmCipher, XChaCha20Cipher},
};

/// Symmetric cipher identifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SymmetricAlgorithm {
    /// `XChaCha20-Poly1305`
    #[default]
    XChaCha20Poly1305,
    /// AES-256-GCM
    Aes256Gcm,
}

impl SymmetricAlgorithm {
    /// Every supported variant.
    pub const ALL: [Self; 2] = [Self::XChaCha20Poly1305, Self::Aes256Gcm];

    /// Canonical configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Self::XChaCha20Poly1305 => "xchacha20poly1305",
            Self::Aes256Gcm => "aes256gcm",
        }
    }
}

impl fmt::Display for SymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymmetricAlgorithm {
    type Err = CryptoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CryptoError::UnknownAlgorithm(name.to_string()))
    }
}

/// Asymmetric key-wrapping identifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AsymmetricAlgorithm {
    /// X25519 + HKDF-SHA256 + `XChaCha20-Poly1305`
    #[default]
    X25519,
}

impl AsymmetricAlgorithm {
    /// Every supported variant.
    pub const ALL: [Self; 1] = [Self::X25519];

    /// Canonical configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Self::X25519 => "x25519",
        }
    }
}

impl fmt::Display for AsymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AsymmetricAlgorithm {
    type Err = CryptoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CryptoError::UnknownAlgorithm(name.to_string()))
    }
}

/// Immutable algorithm configuration.
///
/// Passed to constructors explicitly; there is no process-wide default
/// other than [`Default`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AlgorithmConfig {
    /// Cipher for bulk payloads
    pub symmetric: SymmetricAlgorithm,
    /// Scheme for wrapping data keys
    pub asymmetric: AsymmetricAlgorithm,
}

impl AlgorithmConfig {
    /// Configuration with the given symmetric cipher and the default scheme.
    pub fn with_symmetric(symmetric: SymmetricAlgorithm) -> Self {
        Self { symmetric, ..Self::default() }
    }

    /// Resolve the symmetric capability.
    pub fn symmetric_cipher(&self) -> SymmetricCipher {
        SymmetricCipher::from(self.symmetric)
    }

    /// Resolve the asymmetric capability.
    pub fn asymmetric_scheme(&self) -> AsymmetricScheme {
        AsymmetricScheme::from(self.asymmetric)
    }
}

/// Symmetric capability selected by [`SymmetricAlgorithm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymmetricCipher {
    /// See [`XChaCha20Cipher`]
    XChaCha20(XChaCha20Cipher),
    /// See [`Aes256GcmCipher`]
    Aes256Gcm(Aes256GcmCipher),
}

impl From<SymmetricAlgorithm> for SymmetricCipher {
    fn from(algorithm: SymmetricAlgorithm) -> Self {
        match algorithm {
            SymmetricAlgorithm::XChaCha20Poly1305 => Self::XChaCha20(XChaCha20Cipher),
            SymmetricAlgorithm::Aes256Gcm => Self::Aes256Gcm(Aes256GcmCipher),
        }
    }
}

impl SymmetricCipherCapability for SymmetricCipher {
    fn name(&self) -> &'static str {
        match self {
            Self::XChaCha20(cipher) => cipher.name(),
            Self::Aes256Gcm(cipher) => cipher.name(),
        }
    }

    fn encrypt<E: Entropy>(
        &self,
        env: &E,
        key: &DataKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::XChaCha20(cipher) => cipher.encrypt(env, key, plaintext),
            Self::Aes256Gcm(cipher) => cipher.encrypt(env, key, plaintext),
        }
    }

    fn decrypt(&self, key: &DataKey, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::XChaCha20(cipher) => cipher.decrypt(key, ciphertext),
            Self::Aes256Gcm(cipher) => cipher.decrypt(key, ciphertext),
        }
    }
}

/// Asymmetric capability selected by [`AsymmetricAlgorithm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsymmetricScheme {
    /// See [`X25519Wrap`]
    X25519(X25519Wrap),
}

impl From<AsymmetricAlgorithm> for AsymmetricScheme {
    fn from(algorithm: AsymmetricAlgorithm) -> Self {
        match algorithm {
            AsymmetricAlgorithm::X25519 => Self::X25519(X25519Wrap),
        }
    }
}

impl AsymmetricKeyCapability for AsymmetricScheme {
    fn name(&self) -> &'static str {
        match self {
            Self::X25519(scheme) => scheme.name(),
        }
    }

    fn wrapped_key_size(&self) -> usize {
        match self {
            Self::X25519(scheme) => scheme.wrapped_key_size(),
        }
    }

    fn generate_private_key<E: Entropy>(&self, env: &E) -> PrivateKey {
        match self {
            Self::X25519(scheme) => scheme.generate_private_key(env),
        }
    }

    fn public_from_private(&self, private_key: &PrivateKey) -> PublicKey {
        match self {
            Self::X25519(scheme) => scheme.public_from_private(private_key),
        }
    }

    fn encrypt<E: Entropy>(
        &self,
        env: &E,
        public_key: &PublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::X25519(scheme) => scheme.encrypt(env, public_key, plaintext),
        }
    }

    fn decrypt(&self, private_key: &PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::X25519(scheme) => scheme.decrypt(private_key, ciphertext),
        }
    }

    fn rekey(&self, from: &PrivateKey, to: &PublicKey) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::X25519(scheme) => scheme.rekey(from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{asymmetric::WRAPPED_KEY_SIZE, env::SeededEntropy};

    #[test]
    fn names_parse_back() {
        for algorithm in SymmetricAlgorithm::ALL {
            assert_eq!(algorithm.name().parse::<SymmetricAlgorithm>(), Ok(algorithm));
        }
        for algorithm in AsymmetricAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<AsymmetricAlgorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!("AES256GCM".parse::<SymmetricAlgorithm>(), Ok(SymmetricAlgorithm::Aes256Gcm));
        assert_eq!("X25519".parse::<AsymmetricAlgorithm>(), Ok(AsymmetricAlgorithm::X25519));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "rot13".parse::<SymmetricAlgorithm>(),
            Err(CryptoError::UnknownAlgorithm("rot13".to_string()))
        );
        assert!("umbral".parse::<AsymmetricAlgorithm>().is_err());
    }

    #[test]
    fn default_config_resolves_to_xchacha_and_x25519() {
        let config = AlgorithmConfig::default();

        assert_eq!(config.symmetric_cipher().name(), "xchacha20poly1305");
        assert_eq!(config.asymmetric_scheme().name(), "x25519");
        assert_eq!(config.asymmetric_scheme().wrapped_key_size(), WRAPPED_KEY_SIZE);
    }

    #[test]
    fn dispatch_reaches_selected_cipher() {
        let env = SeededEntropy::with_seed(1);
        let key = DataKey::from([9u8; 32]);

        let aes = AlgorithmConfig::with_symmetric(SymmetricAlgorithm::Aes256Gcm).symmetric_cipher();
        let sealed = aes.encrypt(&env, &key, b"payload").unwrap();

        assert_eq!(Aes256GcmCipher.decrypt(&key, &sealed).unwrap(), b"payload");
        assert!(XChaCha20Cipher.decrypt(&key, &sealed).is_err());
    }

    #[test]
    fn dispatch_reaches_selected_scheme() {
        let env = SeededEntropy::with_seed(2);
        let scheme = AlgorithmConfig::default().asymmetric_scheme();

        let private = scheme.generate_private_key(&env);
        let public = scheme.public_from_private(&private);
        let wrapped = scheme.encrypt(&env, &public, &[3u8; 32]).unwrap();

        assert_eq!(X25519Wrap.decrypt(&private, &wrapped).unwrap(), [3u8; 32]);
        assert!(scheme.rekey(&private, &public).is_err());
    }
}
