//! Verification verdicts.
//!
//! Every verification call ends in exactly one of three terminal statuses.
//! There are no transitions between them; a verdict is recomputed from
//! scratch on every call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The terminal outcome of certificate or claim verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    #[serde(rename = "Verified")]
    Verified,

    /// Issuer known, but at least one other field is missing or unknown,
    /// or the claim is free text that cannot be checked.
    #[serde(rename = "Partially Verified")]
    PartiallyVerified,

    #[serde(rename = "Fake")]
    Fake,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "Verified",
            VerificationStatus::PartiallyVerified => "Partially Verified",
            VerificationStatus::Fake => "Fake",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate verdict with the ordered reasons that justify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub status: VerificationStatus,
    pub reasons: Vec<String>,
}

impl VerificationResult {
    pub fn new(status: VerificationStatus, reasons: Vec<String>) -> Self {
        Self { status, reasons }
    }
}

/// Whether a detailed row describes the record as a whole or one claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Meta,
    Claim,
}

/// One row of a per-claim verification report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRow {
    #[serde(rename = "type")]
    pub kind: RowKind,

    pub label: String,

    /// SHA-256 hex digest used as the row's audit-trail fingerprint.
    pub hash: String,

    pub status: VerificationStatus,

    pub details: String,
}
