//! # tracechain-core
//!
//! Seam traits and hash primitives for the TRACECHAIN provenance toolkit.
//!
//! This crate provides:
//! - The collaborator traits (`ChainHasher`, `RegistryLookup`,
//!   `ClaimExtractor`, `CompletionTransport`, `ProductStore`)
//! - The rolling chain checksum and the SHA-256 helper both engines use
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tracechain_core::hash::{generate_hash, sha256_hex};
//!
//! assert_eq!(generate_hash("hello"), "05e918d2");
//! ```

pub mod hash;
pub mod traits;

pub use hash::{generate_hash, generate_hash_padded, sha256_hex, RollingChecksum, Sha256Hasher};
