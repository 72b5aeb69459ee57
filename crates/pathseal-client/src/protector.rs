//! Data protector: seals payloads into containers and opens them again.
//!
//! # Encrypt
//!
//! ```text
//! data ──► SymmetricCipher(data_key) ──► ciphertext envelope ─────────┐
//!                                                                     ├─► container
//! data_key ──► wrap to derived public key of every path prefix ──► header
//! ```
//!
//! # Decrypt
//!
//! The private key for the supplied path (or the master key) is tried
//! against every wrapped key in header order. A wrapped key that opens to a
//! data-key-sized value is only a candidate; it is accepted once the
//! payload authenticates under it.

use std::path::Path;

use pathseal_crypto::{
    AlgorithmConfig, AsymmetricKeyCapability, AsymmetricScheme, DataKey, Entropy, Keypair, PrivateKey, PublicKey,
    SymmetricCipher, SymmetricCipherCapability, SystemEntropy, derive_path_private_key,
    derive_prefix_public_keys, prefixes_of,
};
use pathseal_proto::{Container, Header, WrappedKey};
use zeroize::Zeroizing;

use crate::{ClientError, ProtectorConfig};

/// Summary of a container's framing, produced without decrypting anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Header version tag
    pub version: u32,
    /// Size of the header section
    pub header_length: u32,
    /// Wrapped keys in header order
    pub wrapped_keys: Vec<WrappedKey>,
    /// Size of the symmetric ciphertext (nonce and tag included)
    pub ciphertext_len: usize,
}

impl ContainerInfo {
    /// Decode a container's framing without any key material.
    ///
    /// Only the asymmetric algorithm matters: it fixes the wrapped key size.
    ///
    /// # Errors
    ///
    /// - `ClientError::Decode` if the container or header is malformed
    /// - `ClientError::UnsupportedVersion` if the header version is unknown
    pub fn read(container: &[u8], algorithms: &AlgorithmConfig) -> Result<Self, ClientError> {
        Self::from_wrapped_key_size(container, algorithms.asymmetric_scheme().wrapped_key_size())
    }

    fn from_wrapped_key_size(container: &[u8], key_size: usize) -> Result<Self, ClientError> {
        let container = Container::decode(container)?;
        let header_length = container.header_length()?;
        let header = container.parse_header(key_size)?;
        let ciphertext_len = container.ciphertext_payload()?.len();

        Ok(Self {
            version: header.version(),
            header_length,
            wrapped_keys: header.into_wrapped_keys(),
            ciphertext_len,
        })
    }
}

/// Client-side data protector.
///
/// Owns one master keypair, generated at construction or restored from a
/// saved private key. Every operation takes `&self`; the keypair is never
/// modified, so a protector can be shared across threads.
///
/// # Invariants
///
/// - `master.public_key == scheme.public_from_private(&master.private_key)`
/// - `config` passed [`ProtectorConfig::validate`]
#[derive(Debug, Clone)]
pub struct Protector<E: Entropy = SystemEntropy> {
    env: E,
    config: ProtectorConfig,
    symmetric: SymmetricCipher,
    scheme: AsymmetricScheme,
    master: Keypair,
}

impl Protector<SystemEntropy> {
    /// Create a protector with a fresh master keypair from the OS RNG.
    ///
    /// # Errors
    ///
    /// - `ClientError::UnsupportedVersion` if the configured header version
    ///   has no defined encoding
    pub fn new(config: ProtectorConfig) -> Result<Self, ClientError> {
        Self::with_env(SystemEntropy::new(), config)
    }

    /// Restore a protector from a saved master private key.
    ///
    /// # Errors
    ///
    /// See [`Protector::new`].
    pub fn from_private_key(
        private_key: PrivateKey,
        config: ProtectorConfig,
    ) -> Result<Self, ClientError> {
        Self::with_env_and_private_key(SystemEntropy::new(), private_key, config)
    }
}

impl<E: Entropy> Protector<E> {
    /// Create a protector drawing all randomness from `env`.
    ///
    /// # Errors
    ///
    /// See [`Protector::new`].
    pub fn with_env(env: E, config: ProtectorConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let private_key = config.algorithms.asymmetric_scheme().generate_private_key(&env);
        Self::with_env_and_private_key(env, private_key, config)
    }

    /// Restore a protector from a saved master private key, drawing all
    /// randomness from `env`.
    ///
    /// # Errors
    ///
    /// See [`Protector::new`].
    pub fn with_env_and_private_key(
        env: E,
        private_key: PrivateKey,
        config: ProtectorConfig,
    ) -> Result<Self, ClientError> {
        config.validate()?;

        let symmetric = config.algorithms.symmetric_cipher();
        let scheme = config.algorithms.asymmetric_scheme();
        let public_key = scheme.public_from_private(&private_key);

        tracing::debug!(
            symmetric = symmetric.name(),
            asymmetric = scheme.name(),
            header_version = config.header_version,
            "Protector ready"
        );

        Ok(Self { env, config, symmetric, scheme, master: Keypair { private_key, public_key } })
    }

    /// Configuration this protector was built with.
    pub fn config(&self) -> &ProtectorConfig {
        &self.config
    }

    /// Master public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.master.public_key
    }

    /// Master private key, for persisting the keypair.
    pub fn private_key(&self) -> &PrivateKey {
        &self.master.private_key
    }

    /// Seal `data` into a container.
    ///
    /// With a path, the data key is wrapped once per prefix of the path, so
    /// the key for any prefix opens the container. Without a path it is
    /// wrapped once to the master public key.
    ///
    /// # Errors
    ///
    /// Only on resource limits (payload or header too large for the wire
    /// format). Encryption never fails for well-formed input.
    pub fn encrypt(&self, data: &[u8], path: Option<&[u8]>) -> Result<Vec<u8>, ClientError> {
        let data_key = DataKey::generate(&self.env);
        let ciphertext = self.symmetric.encrypt(&self.env, &data_key, data)?;

        let wrapped_keys = self.wrap_key(&data_key, None, path)?;
        let wrapped_count = wrapped_keys.len();

        let header = Header::new(self.config.header_version, wrapped_keys)?;
        let container = Container::build(&header, &ciphertext)?.to_bytes()?;

        tracing::debug!(
            plaintext_len = data.len(),
            container_len = container.len(),
            wrapped_keys = wrapped_count,
            with_path = path.is_some(),
            "Sealed container"
        );

        Ok(container)
    }

    /// Open a container sealed by [`Protector::encrypt`].
    ///
    /// `path` may be the path used at encryption or any prefix of it.
    ///
    /// # Errors
    ///
    /// - `ClientError::Decode` if the container or header is malformed
    /// - `ClientError::UnsupportedVersion` if the header version is unknown
    /// - `ClientError::KeyNotFound` if no wrapped key opens with the key for
    ///   `path`
    /// - `ClientError::Authentication` if a data key was recovered but the
    ///   payload does not authenticate under it
    pub fn decrypt(&self, container: &[u8], path: Option<&[u8]>) -> Result<Vec<u8>, ClientError> {
        let container = Container::decode(container)?;
        let header = container.parse_header(self.scheme.wrapped_key_size())?;
        let ciphertext = container.ciphertext_payload()?;

        let private_key = self.private_key_for(path);
        let wrapped_keys = header.wrapped_keys();

        let mut last_failure = None;

        for (index, wrapped) in wrapped_keys.iter().enumerate() {
            let unwrapped = match self.scheme.decrypt(&private_key, wrapped.as_bytes()) {
                Ok(unwrapped) => Zeroizing::new(unwrapped),
                Err(error) => {
                    tracing::trace!(index, error = %error, "Wrapped key did not open");
                    continue;
                },
            };

            let Some(data_key) = DataKey::from_slice(&unwrapped) else {
                tracing::trace!(index, len = unwrapped.len(), "Unwrapped value is not a data key");
                continue;
            };

            match self.symmetric.decrypt(&data_key, ciphertext) {
                Ok(plaintext) => {
                    tracing::debug!(
                        index,
                        wrapped_keys = wrapped_keys.len(),
                        plaintext_len = plaintext.len(),
                        "Opened container"
                    );
                    return Ok(plaintext);
                },
                Err(error) => {
                    tracing::warn!(index, error = %error, "Candidate data key failed authentication");
                    last_failure = Some(error);
                },
            }
        }

        match last_failure {
            Some(error) => Err(ClientError::Authentication { reason: error.to_string() }),
            None => {
                tracing::debug!(wrapped_keys = wrapped_keys.len(), "No wrapped key opened");
                Err(ClientError::KeyNotFound { wrapped_keys: wrapped_keys.len() })
            },
        }
    }

    /// Wrap a data key.
    ///
    /// With a path, returns one wrapped key per prefix (shallowest first) and
    /// `recipient` is ignored. Without a path, returns a single wrapped key
    /// for `recipient`, or for the master public key if `recipient` is `None`.
    ///
    /// # Errors
    ///
    /// - `ClientError::Crypto` if `recipient` is not a valid public key for
    ///   the configured scheme
    pub fn wrap_key(
        &self,
        data_key: &DataKey,
        recipient: Option<&PublicKey>,
        path: Option<&[u8]>,
    ) -> Result<Vec<WrappedKey>, ClientError> {
        let Some(path) = path else {
            let public_key = recipient.unwrap_or(&self.master.public_key);
            let wrapped = self.scheme.encrypt(&self.env, public_key, data_key.as_bytes())?;
            return Ok(vec![WrappedKey::from(wrapped)]);
        };

        derive_prefix_public_keys(&self.scheme, &self.master.private_key, path)
            .iter()
            .map(|public_key| {
                let wrapped = self.scheme.encrypt(&self.env, public_key, data_key.as_bytes())?;
                Ok::<_, ClientError>(WrappedKey::from(wrapped))
            })
            .collect()
    }

    /// Unwrap a single wrapped key with the key for `path` (or the master key).
    ///
    /// `path` is used as given, so each element of [`prefixes_of`] opens the
    /// wrapped key [`Protector::wrap_key`] produced for it. Unlike
    /// [`Protector::decrypt`], the root sentinel `/` is not mapped to the
    /// root prefix.
    ///
    /// Returns the raw unwrapped bytes; callers decide whether they form a
    /// usable data key.
    ///
    /// # Errors
    ///
    /// - `ClientError::Crypto` if the wrapped key does not open
    pub fn unwrap_key(
        &self,
        wrapped: &WrappedKey,
        path: Option<&[u8]>,
    ) -> Result<Zeroizing<Vec<u8>>, ClientError> {
        let private_key = match path {
            Some(prefix) => derive_path_private_key(&self.master.private_key, prefix),
            None => self.master.private_key.clone(),
        };
        Ok(Zeroizing::new(self.scheme.decrypt(&private_key, wrapped.as_bytes())?))
    }

    /// Encrypt `data` directly under a data key.
    ///
    /// The output carries its own nonce and is not framed as a container.
    ///
    /// # Errors
    ///
    /// - `ClientError::Crypto` on cipher limits
    pub fn encrypt_bulk(&self, data: &[u8], key: &DataKey) -> Result<Vec<u8>, ClientError> {
        Ok(self.symmetric.encrypt(&self.env, key, data)?)
    }

    /// Decrypt output of [`Protector::encrypt_bulk`].
    ///
    /// # Errors
    ///
    /// - `ClientError::Authentication` on a wrong key, tampering or
    ///   truncation
    pub fn decrypt_bulk(&self, ciphertext: &[u8], key: &DataKey) -> Result<Vec<u8>, ClientError> {
        self.symmetric
            .decrypt(key, ciphertext)
            .map_err(|error| ClientError::Authentication { reason: error.to_string() })
    }

    /// Read a sealed container from the local file system and decrypt it.
    ///
    /// # Errors
    ///
    /// - `ClientError::Io` if the file cannot be read
    /// - Any error from [`Protector::decrypt`]
    pub fn open(&self, file: impl AsRef<Path>, path: Option<&[u8]>) -> Result<Vec<u8>, ClientError> {
        let file = file.as_ref();
        let sealed = std::fs::read(file).map_err(|error| ClientError::Io {
            path: file.to_path_buf(),
            reason: error.to_string(),
        })?;

        tracing::debug!(file = %file.display(), len = sealed.len(), "Read sealed file");
        self.decrypt(&sealed, path)
    }

    /// Decode a container's framing without decrypting it.
    ///
    /// # Errors
    ///
    /// - `ClientError::Decode` or `ClientError::UnsupportedVersion` as for
    ///   [`Protector::decrypt`]
    pub fn inspect(&self, container: &[u8]) -> Result<ContainerInfo, ClientError> {
        ContainerInfo::from_wrapped_key_size(container, self.scheme.wrapped_key_size())
    }

    /// Private key [`Protector::decrypt`] uses for `path`.
    ///
    /// The deepest prefix of `path` identifies the wrapped key it can open,
    /// so the root sentinel `/` maps to the root prefix.
    fn private_key_for(&self, path: Option<&[u8]>) -> PrivateKey {
        match path.and_then(|path| prefixes_of(path).last().copied()) {
            Some(prefix) => derive_path_private_key(&self.master.private_key, prefix),
            None => self.master.private_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pathseal_crypto::{SeededEntropy, SymmetricAlgorithm};
    use pathseal_proto::{decode_envelope, encode_envelope};

    use super::*;

    fn protector(seed: u64) -> Protector<SeededEntropy> {
        Protector::with_env(SeededEntropy::with_seed(seed), ProtectorConfig::default()).unwrap()
    }

    #[test]
    fn roundtrip_without_path() {
        let protector = protector(1);

        let sealed = protector.encrypt(b"hello world!", None).unwrap();
        assert_eq!(protector.decrypt(&sealed, None).unwrap(), b"hello world!");
    }

    #[test]
    fn roundtrip_with_path() {
        let protector = protector(2);
        let path = b"/foo/bar/test.jpg".as_slice();

        let sealed = protector.encrypt(b"image bytes", Some(path)).unwrap();
        assert_eq!(protector.decrypt(&sealed, Some(path)).unwrap(), b"image bytes");
    }

    #[test]
    fn wraps_one_key_per_prefix() {
        let protector = protector(3);

        let sealed = protector.encrypt(b"x", Some(b"/foo/bar".as_slice())).unwrap();
        assert_eq!(protector.inspect(&sealed).unwrap().wrapped_keys.len(), 3);

        let sealed = protector.encrypt(b"x", Some(b"foo".as_slice())).unwrap();
        assert_eq!(protector.inspect(&sealed).unwrap().wrapped_keys.len(), 1);

        let sealed = protector.encrypt(b"x", None).unwrap();
        assert_eq!(protector.inspect(&sealed).unwrap().wrapped_keys.len(), 1);
    }

    #[test]
    fn any_prefix_opens_the_container() {
        let protector = protector(4);
        let sealed = protector.encrypt(b"nested", Some(b"/foo/bar/test.jpg".as_slice())).unwrap();

        for prefix in [&b""[..], b"/foo", b"/foo/bar", b"/foo/bar/test.jpg"] {
            assert_eq!(protector.decrypt(&sealed, Some(prefix)).unwrap(), b"nested");
        }
    }

    #[test]
    fn root_sentinel_roundtrips() {
        let protector = protector(5);

        let sealed = protector.encrypt(b"root", Some(b"/".as_slice())).unwrap();
        assert_eq!(protector.inspect(&sealed).unwrap().wrapped_keys.len(), 1);
        assert_eq!(protector.decrypt(&sealed, Some(b"/".as_slice())).unwrap(), b"root");
        assert_eq!(protector.decrypt(&sealed, Some(b"".as_slice())).unwrap(), b"root");
    }

    #[test]
    fn unrelated_path_is_key_not_found() {
        let protector = protector(6);
        let sealed = protector.encrypt(b"secret", Some(b"/foo/bar".as_slice())).unwrap();

        assert_eq!(
            protector.decrypt(&sealed, Some(b"/other".as_slice())),
            Err(ClientError::KeyNotFound { wrapped_keys: 3 })
        );
        assert_eq!(
            protector.decrypt(&sealed, None),
            Err(ClientError::KeyNotFound { wrapped_keys: 3 })
        );
    }

    #[test]
    fn path_sealed_container_needs_a_path_and_vice_versa() {
        let protector = protector(7);
        let sealed = protector.encrypt(b"secret", None).unwrap();

        let result = protector.decrypt(&sealed, Some(b"/foo".as_slice()));
        assert_eq!(result, Err(ClientError::KeyNotFound { wrapped_keys: 1 }));
    }

    #[test]
    fn different_master_key_is_key_not_found() {
        let alice = protector(8);
        let mallory = protector(9);

        let sealed = alice.encrypt(b"secret", Some(b"/foo".as_slice())).unwrap();
        let result = mallory.decrypt(&sealed, Some(b"/foo".as_slice()));

        assert!(matches!(result, Err(ClientError::KeyNotFound { .. })));
        assert!(result.unwrap_err().is_wrong_key());
    }

    #[test]
    fn tampered_ciphertext_is_authentication_error() {
        let protector = protector(10);
        let mut sealed = protector.encrypt(b"secret message", None).unwrap();

        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;

        let result = protector.decrypt(&sealed, None);
        assert!(matches!(result, Err(ClientError::Authentication { .. })));
    }

    #[test]
    fn restored_protector_opens_old_containers() {
        let original = protector(11);
        let sealed = original.encrypt(b"persisted", Some(b"/docs/a.txt".as_slice())).unwrap();

        let restored = Protector::with_env_and_private_key(
            SeededEntropy::with_seed(99),
            original.private_key().clone(),
            ProtectorConfig::default(),
        )
        .unwrap();

        assert_eq!(restored.public_key(), original.public_key());
        assert_eq!(restored.decrypt(&sealed, Some(b"/docs".as_slice())).unwrap(), b"persisted");
    }

    #[test]
    fn same_seed_produces_identical_containers() {
        let first = protector(12).encrypt(b"deterministic", Some(b"/a/b".as_slice())).unwrap();
        let second = protector(12).encrypt(b"deterministic", Some(b"/a/b".as_slice())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn header_carries_configured_version() {
        let config = ProtectorConfig { header_version: 7, ..ProtectorConfig::default() };
        let protector = Protector::with_env(SeededEntropy::with_seed(13), config).unwrap();

        let sealed = protector.encrypt(b"x", None).unwrap();
        assert_eq!(protector.inspect(&sealed).unwrap().version, 7);
        assert_eq!(protector.decrypt(&sealed, None).unwrap(), b"x");
    }

    #[test]
    fn post_alpha_version_is_rejected_at_construction() {
        let config = ProtectorConfig { header_version: 1000, ..ProtectorConfig::default() };
        let result = Protector::with_env(SeededEntropy::with_seed(14), config);
        assert!(matches!(result, Err(ClientError::UnsupportedVersion(1000))));
    }

    #[test]
    fn aes_gcm_protector_roundtrips() {
        let config = ProtectorConfig::with_symmetric(SymmetricAlgorithm::Aes256Gcm);
        let protector = Protector::with_env(SeededEntropy::with_seed(15), config).unwrap();

        let sealed = protector.encrypt(b"gcm payload", Some(b"/x/y".as_slice())).unwrap();
        assert_eq!(protector.decrypt(&sealed, Some(b"/x".as_slice())).unwrap(), b"gcm payload");
    }

    #[test]
    fn cipher_mismatch_is_authentication_error() {
        let xchacha = protector(16);
        let aes = Protector::with_env_and_private_key(
            SeededEntropy::with_seed(17),
            xchacha.private_key().clone(),
            ProtectorConfig::with_symmetric(SymmetricAlgorithm::Aes256Gcm),
        )
        .unwrap();

        let sealed = xchacha.encrypt(b"payload", None).unwrap();
        assert!(matches!(aes.decrypt(&sealed, None), Err(ClientError::Authentication { .. })));
    }

    #[test]
    fn wrap_and_unwrap_key_per_prefix() {
        let protector = protector(18);
        let data_key = DataKey::from([0x42; 32]);

        let wrapped = protector.wrap_key(&data_key, None, Some(b"/a/b".as_slice())).unwrap();
        assert_eq!(wrapped.len(), 3);

        for (wrapped, prefix) in wrapped.iter().zip([&b""[..], b"/a", b"/a/b"]) {
            let unwrapped = protector.unwrap_key(wrapped, Some(prefix)).unwrap();
            assert_eq!(unwrapped.as_slice(), data_key.as_bytes());
        }

        assert!(protector.unwrap_key(&wrapped[0], Some(b"/a".as_slice())).is_err());
    }

    #[test]
    fn unwrap_key_uses_raw_prefix_for_double_slash_paths() {
        let protector = protector(27);
        let data_key = DataKey::from([0x17; 32]);
        let path = b"//x".as_slice();

        let wrapped = protector.wrap_key(&data_key, None, Some(path)).unwrap();
        let prefixes = prefixes_of(path);
        assert_eq!(prefixes, [&b""[..], b"/", b"//x"]);

        for (wrapped, prefix) in wrapped.iter().zip(prefixes) {
            let unwrapped = protector.unwrap_key(wrapped, Some(prefix)).unwrap();
            assert_eq!(unwrapped.as_slice(), data_key.as_bytes());
        }
    }

    /// Container whose header holds `keys`, all wrapped to the master key,
    /// over `data` encrypted under `payload_key`.
    fn container_with_keys(
        protector: &Protector<SeededEntropy>,
        keys: &[DataKey],
        payload_key: &DataKey,
        data: &[u8],
    ) -> Vec<u8> {
        let wrapped_keys = keys
            .iter()
            .flat_map(|key| protector.wrap_key(key, None, None).unwrap())
            .collect();
        let header = Header::new(Header::PRE_ALPHA_VERSION, wrapped_keys).unwrap();
        let ciphertext = protector.encrypt_bulk(data, payload_key).unwrap();
        Container::build(&header, &ciphertext).unwrap().to_bytes().unwrap()
    }

    #[test]
    fn decoy_candidate_before_real_key_is_skipped() {
        let protector = protector(28);
        let decoy = DataKey::from([0xD0; 32]);
        let real = DataKey::from([0x5E; 32]);

        let sealed = container_with_keys(&protector, &[decoy, real.clone()], &real, b"payload");
        assert_eq!(protector.decrypt(&sealed, None).unwrap(), b"payload");
    }

    #[test]
    fn only_decoy_candidates_is_authentication_error() {
        let protector = protector(29);
        let decoys = [DataKey::from([0xD0; 32]), DataKey::from([0xD1; 32])];
        let real = DataKey::from([0x5E; 32]);

        let sealed = container_with_keys(&protector, &decoys, &real, b"payload");
        let result = protector.decrypt(&sealed, None);

        assert!(matches!(result, Err(ClientError::Authentication { .. })), "{result:?}");
        assert!(result.unwrap_err().is_wrong_key());
    }

    #[test]
    fn post_alpha_header_is_unsupported_version_on_decrypt() {
        let protector = protector(30);
        let sealed = protector.encrypt(b"future", None).unwrap();
        let container = Container::decode(&sealed).unwrap();

        let mut payload = decode_envelope(&container.header).unwrap().to_vec();
        payload[..4].copy_from_slice(&Header::POST_ALPHA_VERSION.to_be_bytes());
        let forged = Container::new(encode_envelope(&payload).unwrap(), container.ciphertext)
            .to_bytes()
            .unwrap();

        let result = protector.decrypt(&forged, None);
        assert_eq!(result, Err(ClientError::UnsupportedVersion(Header::POST_ALPHA_VERSION)));
        assert!(result.unwrap_err().is_corrupt());
    }

    #[test]
    fn container_info_reads_without_a_protector() {
        let protector = protector(31);
        let sealed = protector.encrypt(b"x", Some(b"/a/b".as_slice())).unwrap();

        let info = ContainerInfo::read(&sealed, &AlgorithmConfig::default()).unwrap();
        assert_eq!(info, protector.inspect(&sealed).unwrap());
        assert_eq!(info.wrapped_keys.len(), 3);
    }

    #[test]
    fn wrap_key_to_recipient() {
        let alice = protector(19);
        let bob = protector(20);
        let data_key = DataKey::from([0x24; 32]);

        let wrapped = alice.wrap_key(&data_key, Some(bob.public_key()), None).unwrap();
        assert_eq!(wrapped.len(), 1);

        assert_eq!(bob.unwrap_key(&wrapped[0], None).unwrap().as_slice(), data_key.as_bytes());
        assert!(alice.unwrap_key(&wrapped[0], None).is_err());
    }

    #[test]
    fn wrap_key_rejects_malformed_recipient() {
        let protector = protector(21);
        let bogus = PublicKey::from_bytes(vec![1u8; 5]);

        let result = protector.wrap_key(&DataKey::from([0; 32]), Some(&bogus), None);
        assert!(matches!(result, Err(ClientError::Crypto(_))));
    }

    #[test]
    fn bulk_roundtrip_and_wrong_key() {
        let protector = protector(22);
        let key = DataKey::generate(&SeededEntropy::with_seed(23));
        let other = DataKey::generate(&SeededEntropy::with_seed(24));

        let sealed = protector.encrypt_bulk(b"hello world!", &key).unwrap();
        assert_eq!(protector.decrypt_bulk(&sealed, &key).unwrap(), b"hello world!");

        let result = protector.decrypt_bulk(&sealed, &other);
        assert!(matches!(result, Err(ClientError::Authentication { .. })));
    }

    #[test]
    fn inspect_reports_framing() {
        let protector = protector(25);
        let sealed = protector.encrypt(b"twelve bytes", Some(b"/a".as_slice())).unwrap();

        let info = protector.inspect(&sealed).unwrap();
        assert_eq!(info.version, 100);
        assert_eq!(info.wrapped_keys.len(), 2);
        // bin8 envelope: 168-byte payload fits a one-byte length
        assert_eq!(info.header_length as usize, 2 + 8 + 2 * pathseal_crypto::WRAPPED_KEY_SIZE);
        // 24-byte nonce + 12 bytes + 16-byte tag
        assert_eq!(info.ciphertext_len, 24 + 12 + 16);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let protector = protector(26);

        for garbage in [&b""[..], b"\x00", b"\x00\x00\x00\x05abc", b"\x00\x00\x00\x00"] {
            let result = protector.decrypt(garbage, None);
            assert!(matches!(result, Err(ClientError::Decode(_))), "{garbage:?}: {result:?}");
        }
    }
}
