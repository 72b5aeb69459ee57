//! Client
//!
//! Client-side data protection for pathseal. A [`Protector`] seals a payload
//! and a hierarchical path into a self-describing container and opens it
//! again given the right key material.
//!
//! # Architecture
//!
//! The protector is written against the capability traits of
//! [`pathseal_crypto`] and the wire format of [`pathseal_proto`]. Concrete
//! algorithms come from an explicit [`ProtectorConfig`]; randomness comes
//! from an injected [`Entropy`] so tests are reproducible.
//!
//! # Components
//!
//! - [`Protector`]: encrypt/decrypt orchestration, key wrapping, bulk
//!   encryption, file opening
//! - [`ProtectorConfig`]: algorithm and header version selection
//! - [`ClientError`]: caller-facing failures, distinguishing wrong key from
//!   corrupt data
//! - Policy operations (`grant`, `revoke`, `list_permissions`, `remove`):
//!   present, not implemented

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod error;
mod policy;
mod protector;

pub use config::ProtectorConfig;
pub use error::ClientError;
pub use pathseal_crypto::{
    AlgorithmConfig, AsymmetricAlgorithm, DataKey, Entropy, PrivateKey, PublicKey,
    SymmetricAlgorithm, SystemEntropy,
};
pub use pathseal_proto::WrappedKey;
pub use protector::{ContainerInfo, Protector};
