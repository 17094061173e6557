//! # tracechain-registry
//!
//! The trust registry certificates are verified against.
//!
//! ## Overview
//!
//! This crate provides [`TrustRegistry`], which implements the
//! [`RegistryLookup`](tracechain_core::traits::RegistryLookup) trait.  The
//! trusted values are declared in a TOML file and never change after
//! construction.  Verification code takes the registry as a parameter, so a
//! database or on-chain lookup can replace it without touching verdict logic.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use tracechain_registry::TrustRegistry;
//!
//! let registry = TrustRegistry::from_file(Path::new("registries/demo.toml"))?;
//! assert!(registry.has_issuer("acme pharma ltd"));
//! ```

pub mod config;
pub mod registry;

pub use config::RegistryConfig;
pub use registry::TrustRegistry;

// ── Tests ─────────────────────────────────────────────────────────────────────
