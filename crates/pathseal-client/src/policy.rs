//! Sharing policy operations.
//!
//! Sharing needs a re-encryption token per recipient and a network of
//! re-encryption nodes to hold it. Neither exists yet, so these operations
//! only fix the call shape and report [`ClientError::Unimplemented`]. They do
//! not touch key material.

use pathseal_crypto::{Entropy, PublicKey};

use crate::{ClientError, Protector};

impl<E: Entropy> Protector<E> {
    /// Allow `recipient` to read everything under `path` (or everything).
    ///
    /// # Errors
    ///
    /// Always `ClientError::Unimplemented`.
    pub fn grant(&self, recipient: &PublicKey, path: Option<&[u8]>) -> Result<(), ClientError> {
        unimplemented_policy("grant", Some(recipient), path)
    }

    /// Withdraw a grant made with [`Protector::grant`].
    ///
    /// # Errors
    ///
    /// Always `ClientError::Unimplemented`.
    pub fn revoke(&self, recipient: &PublicKey, path: Option<&[u8]>) -> Result<(), ClientError> {
        unimplemented_policy("revoke", Some(recipient), path)
    }

    /// Recipients holding a grant, optionally filtered by recipient and path.
    ///
    /// # Errors
    ///
    /// Always `ClientError::Unimplemented`.
    pub fn list_permissions(
        &self,
        recipient: Option<&PublicKey>,
        path: Option<&[u8]>,
    ) -> Result<Vec<PublicKey>, ClientError> {
        unimplemented_policy("list_permissions", recipient, path)
    }

    /// Remove stored data and every grant on it.
    ///
    /// # Errors
    ///
    /// Always `ClientError::Unimplemented`.
    pub fn remove(
        &self,
        recipient: Option<&PublicKey>,
        path: Option<&[u8]>,
    ) -> Result<(), ClientError> {
        unimplemented_policy("remove", recipient, path)
    }
}

fn unimplemented_policy<T>(
    operation: &'static str,
    recipient: Option<&PublicKey>,
    path: Option<&[u8]>,
) -> Result<T, ClientError> {
    tracing::warn!(
        operation,
        has_recipient = recipient.is_some(),
        path_len = path.map(<[u8]>::len),
        "Policy operation is not implemented"
    );
    Err(ClientError::Unimplemented { operation })
}
