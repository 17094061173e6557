//! Registry configuration schema.
//!
//! A `RegistryConfig` is deserialized from TOML and lists the trusted
//! reference values for each certificate field.  Unknown keys are rejected
//! so a misspelled list name cannot silently produce an empty registry.

use serde::{Deserialize, Serialize};

/// The top-level structure deserialized from a registry TOML file.
///
/// Example:
/// ```toml
/// name = "demo"
/// issuers = ["Acme Pharma Ltd"]
/// product_ids = ["PC-100", "PC-200"]
/// batches = ["BATCH-9999"]
/// issue_dates = ["2024-01-01"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Label used in logs.
    #[serde(default)]
    pub name: Option<String>,

    /// Trusted certificate issuers.  Matched trimmed and case-insensitively.
    #[serde(default)]
    pub issuers: Vec<String>,

    /// Registered product codes, e.g. `PC-100`.
    #[serde(default)]
    pub product_ids: Vec<String>,

    /// Registered batch numbers, upper-case and hyphen-joined.
    #[serde(default)]
    pub batches: Vec<String>,

    /// Registered issue dates as written on certificates, e.g. `2024-01-01`.
    #[serde(default)]
    pub issue_dates: Vec<String>,
}
