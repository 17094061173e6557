//! Claim records extracted from free-text certificates.
//!
//! `ClaimRecord` is the single canonical shape every extraction strategy
//! produces and every verification function consumes.  Alternate key
//! spellings found in hand-edited JSON are folded into it by the normalizer
//! in `tracechain-verify` before any verification runs.  The object as it
//! was submitted travels with the record in `source`; the meta row of a
//! detailed report fingerprints that object, not the folded fields.

use serde::Serialize;
use serde_json::Value;

/// Structured assertions pulled out of a certificate or product document.
///
/// Every field defaults to empty: extraction degrades to an empty record
/// rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClaimRecord {
    pub issuer: String,

    /// Free-form product or document label (may or may not hold a code).
    pub product_or_document: String,

    #[serde(rename = "productId")]
    pub product_id: String,

    #[serde(rename = "batchNumber")]
    pub batch_number: String,

    #[serde(rename = "issueDate")]
    pub issue_date: String,

    /// Sentence-like assertions not matched to a structured field.
    pub claims: Vec<String>,

    /// The claim object as submitted or extracted, unknown keys included.
    /// `Null` for records assembled in code.
    #[serde(skip)]
    pub source: Value,
}

impl ClaimRecord {
    pub fn is_empty(&self) -> bool {
        self.issuer.is_empty()
            && self.product_or_document.is_empty()
            && self.product_id.is_empty()
            && self.batch_number.is_empty()
            && self.issue_date.is_empty()
            && self.claims.is_empty()
    }
}

/// The four registry-checked fields of a certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateFields {
    pub issuer: String,
    pub product_id: String,
    pub batch_number: String,
    pub issue_date: String,
}

impl CertificateFields {
    pub fn is_complete(&self) -> bool {
        !self.issuer.is_empty()
            && !self.product_id.is_empty()
            && !self.batch_number.is_empty()
            && !self.issue_date.is_empty()
    }
}
