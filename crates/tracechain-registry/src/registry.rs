//! TOML-backed trust registry.
//!
//! `TrustRegistry` loads a `RegistryConfig` from a TOML string or file and
//! implements the `RegistryLookup` trait from tracechain-core.
//!
//! Lookup rules:
//!
//! 1. Issuer: trimmed, then compared case-insensitively.
//! 2. Product id, batch, issue date: exact, case-sensitive membership.
//!    A near-miss is treated exactly like an absent value.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use tracechain_contracts::error::{TraceError, TraceResult};
use tracechain_core::traits::RegistryLookup;

use crate::config::RegistryConfig;

const DEMO_REGISTRY: &str = include_str!("../registries/demo.toml");

/// An immutable set of trusted reference values.
///
/// Construct via `from_toml_str`, `from_file` or `demo`, then pass by
/// reference into verification.
///
/// ```rust,ignore
/// use tracechain_registry::TrustRegistry;
///
/// let registry = TrustRegistry::from_file(Path::new("registries/demo.toml"))?;
/// let verdict = verify_certificate(&fields, &registry);
/// ```
#[derive(Debug, Clone)]
pub struct TrustRegistry {
    config: RegistryConfig,
    issuer_keys: HashSet<String>,
    product_ids: HashSet<String>,
    batches: HashSet<String>,
    issue_dates: HashSet<String>,
}

impl TrustRegistry {
    pub fn from_config(config: RegistryConfig) -> Self {
        let issuer_keys = config.issuers.iter().map(|i| issuer_key(i)).collect();
        let product_ids = config.product_ids.iter().cloned().collect();
        let batches = config.batches.iter().cloned().collect();
        let issue_dates = config.issue_dates.iter().cloned().collect();

        debug!(
            registry = config.name.as_deref().unwrap_or("unnamed"),
            issuers = config.issuers.len(),
            product_ids = config.product_ids.len(),
            batches = config.batches.len(),
            issue_dates = config.issue_dates.len(),
            "trust registry loaded"
        );

        Self {
            config,
            issuer_keys,
            product_ids,
            batches,
            issue_dates,
        }
    }

    /// Parse `s` as TOML and build a `TrustRegistry`.
    ///
    /// Returns `TraceError::ConfigError` if the TOML is malformed or does not
    /// match `RegistryConfig`.
    pub fn from_toml_str(s: &str) -> TraceResult<Self> {
        let config: RegistryConfig = toml::from_str(s).map_err(|e| TraceError::ConfigError {
            reason: format!("failed to parse registry TOML: {}", e),
        })?;
        Ok(Self::from_config(config))
    }

    /// Read the file at `path` and parse it as registry TOML.
    pub fn from_file(path: &Path) -> TraceResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TraceError::ConfigError {
            reason: format!("failed to read registry file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse the built-in demo registry.
    pub fn try_demo() -> TraceResult<Self> {
        Self::from_toml_str(DEMO_REGISTRY)
    }

    /// The built-in demo registry.  If the embedded file fails to parse, the
    /// failure is logged and an empty registry (which trusts nothing) is
    /// returned.
    pub fn demo() -> Self {
        Self::try_demo().unwrap_or_else(|e| {
            warn!(error = %e, "embedded demo registry unusable; trusting nothing");
            Self::from_config(RegistryConfig::default())
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        self.config.name.as_deref().unwrap_or("unnamed")
    }
}

impl Default for TrustRegistry {
    fn default() -> Self {
        Self::demo()
    }
}

fn issuer_key(issuer: &str) -> String {
    issuer.trim().to_lowercase()
}

impl RegistryLookup for TrustRegistry {
    fn has_issuer(&self, issuer: &str) -> bool {
        let key = issuer_key(issuer);
        !key.is_empty() && self.issuer_keys.contains(&key)
    }

    fn has_product_id(&self, product_id: &str) -> bool {
        self.product_ids.contains(product_id)
    }

    fn has_batch(&self, batch: &str) -> bool {
        self.batches.contains(batch)
    }

    fn has_issue_date(&self, date: &str) -> bool {
        self.issue_dates.contains(date)
    }
}
