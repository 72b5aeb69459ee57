//! Master key files.
//!
//! A key file holds the master private key as a single line of lowercase
//! hex. Surrounding whitespace is ignored when loading.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use pathseal_client::PrivateKey;
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors reading or writing a key file.
#[derive(Error, Debug)]
pub enum KeyFileError {
    /// File could not be read or written
    #[error("key file {}: {source}", path.display())]
    Io {
        /// Key file path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// File contents are not hex
    #[error("key file {} is not valid hex: {source}", path.display())]
    InvalidHex {
        /// Key file path
        path: PathBuf,
        /// Decoder error
        source: hex::FromHexError,
    },

    /// Decoded key has the wrong length
    #[error("key file {} does not hold a private key: {reason}", path.display())]
    InvalidKey {
        /// Key file path
        path: PathBuf,
        /// Why the key was rejected
        reason: String,
    },
}

/// Write `key` to a new file at `path`.
///
/// Fails if the file already exists so an existing key is never clobbered.
/// On Unix the file is created readable by the owner only.
pub fn save(path: &Path, key: &PrivateKey) -> Result<(), KeyFileError> {
    let io_error = |source| KeyFileError::Io { path: path.to_path_buf(), source };

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let encoded = Zeroizing::new(hex::encode(key.as_bytes()));
    let mut file = options.open(path).map_err(io_error)?;
    file.write_all(encoded.as_bytes()).map_err(io_error)?;
    file.write_all(b"\n").map_err(io_error)?;
    file.sync_all().map_err(io_error)
}

/// Read a private key from `path`.
pub fn load(path: &Path) -> Result<PrivateKey, KeyFileError> {
    let contents = Zeroizing::new(
        fs::read_to_string(path)
            .map_err(|source| KeyFileError::Io { path: path.to_path_buf(), source })?,
    );

    let bytes = Zeroizing::new(
        hex::decode(contents.trim())
            .map_err(|source| KeyFileError::InvalidHex { path: path.to_path_buf(), source })?,
    );

    PrivateKey::from_slice(&bytes).map_err(|error| KeyFileError::InvalidKey {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })
}
