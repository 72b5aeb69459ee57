//! Protector configuration.

use pathseal_crypto::{AlgorithmConfig, SymmetricAlgorithm};
use pathseal_proto::Header;

use crate::ClientError;

/// Immutable protector configuration.
///
/// Constructed once and handed to the protector. There is no ambient global
/// default: callers who want the defaults say so with [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectorConfig {
    /// Symmetric cipher and key-wrapping scheme
    pub algorithms: AlgorithmConfig,

    /// Version tag written into new headers
    pub header_version: u32,
}

impl Default for ProtectorConfig {
    fn default() -> Self {
        Self { algorithms: AlgorithmConfig::default(), header_version: Header::PRE_ALPHA_VERSION }
    }
}

impl ProtectorConfig {
    /// Default configuration with a different symmetric cipher.
    pub fn with_symmetric(symmetric: SymmetricAlgorithm) -> Self {
        Self { algorithms: AlgorithmConfig::with_symmetric(symmetric), ..Self::default() }
    }

    /// Check the configuration can produce readable containers.
    ///
    /// # Errors
    ///
    /// - `ClientError::UnsupportedVersion` if `header_version` has no defined
    ///   encoding
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.header_version >= Header::POST_ALPHA_VERSION {
            return Err(ClientError::UnsupportedVersion(self.header_version));
        }
        Ok(())
    }
}
