//! Registry-backed certificate and claim verification.
//!
//! Three entry points share one set of field helpers:
//!
//! 1. `verify_certificate`: the aggregate verdict over four fields.  An
//!    unknown issuer is a hard gate: `Fake`, no partial credit.  Otherwise
//!    every missing or unregistered field adds a reason and caps the verdict
//!    at `Partially Verified`.
//! 2. `verify_claims`: builds the four fields from a claim record and
//!    delegates to `verify_certificate`.
//! 3. `verify_claims_detailed`: one row per recognised field plus one per
//!    free-text claim.  Free text is never more than `Partially Verified`.
//!
//! Every call is a pure function of its inputs.  Nothing is cached.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use tracechain_contracts::{
    claim::{CertificateFields, ClaimRecord},
    error::{TraceError, TraceResult},
    verdict::{ClaimRow, RowKind, VerificationResult, VerificationStatus},
};
use tracechain_core::{sha256_hex, traits::RegistryLookup};

use crate::{
    canonical::stable_stringify,
    fields::{certificate_from_claims, extract_batch_number, extract_issue_date, extract_product_id},
    patterns::{BATCH_PSEUDO_CLAIM, PRODUCT_PSEUDO_CLAIM},
};

/// Aggregate verdict for certificate fields.
pub fn verify_certificate(
    fields: &CertificateFields,
    registry: &dyn RegistryLookup,
) -> VerificationResult {
    let issuer = fields.issuer.trim();
    if issuer.is_empty() || !registry.has_issuer(issuer) {
        info!(issuer = %issuer, status = "Fake", "certificate rejected: unknown issuer");
        return VerificationResult::new(
            VerificationStatus::Fake,
            vec!["Issuer not found on chain".to_string()],
        );
    }

    let checks = [
        (
            "Product ID",
            fields.product_id.as_str(),
            registry.has_product_id(&fields.product_id),
        ),
        (
            "Batch number",
            fields.batch_number.as_str(),
            registry.has_batch(&fields.batch_number),
        ),
        (
            "Issue date",
            fields.issue_date.as_str(),
            registry.has_issue_date(&fields.issue_date),
        ),
    ];

    let reasons: Vec<String> = checks
        .into_iter()
        .filter_map(|(label, value, registered)| {
            if value.is_empty() {
                Some(format!("{label} missing"))
            } else if !registered {
                Some(format!("{label} not registered"))
            } else {
                None
            }
        })
        .collect();

    let result = if reasons.is_empty() {
        VerificationResult::new(
            VerificationStatus::Verified,
            vec!["All checks passed".to_string()],
        )
    } else {
        VerificationResult::new(VerificationStatus::PartiallyVerified, reasons)
    };

    info!(
        issuer = %issuer,
        status = %result.status,
        reasons = result.reasons.len(),
        "certificate verified"
    );
    result
}

/// Aggregate verdict for a claim record.
pub fn verify_claims(record: &ClaimRecord, registry: &dyn RegistryLookup) -> VerificationResult {
    verify_certificate(&certificate_from_claims(record), registry)
}

/// Per-field and per-claim rows for a claim record.
///
/// The meta row's hash covers the submitted claim object (`record.source`,
/// or the serialized record when there is none) in key-sorted form.  Each
/// other row hashes a one-key JSON object (`{"product":..}`, `{"batch":..}`,
/// `{"date":..}`, `{"claim":..}`).
pub fn verify_claims_detailed(
    record: &ClaimRecord,
    registry: &dyn RegistryLookup,
) -> Vec<ClaimRow> {
    let mut rows: Vec<ClaimRow> = Vec::new();

    let issuer = record.issuer.trim();
    let issuer_known = !issuer.is_empty() && registry.has_issuer(issuer);
    rows.push(ClaimRow {
        kind: RowKind::Meta,
        label: format!(
            "Issuer: {}",
            if issuer.is_empty() { "Unknown" } else { issuer }
        ),
        hash: meta_hash(record),
        status: status_for(issuer_known),
        details: if issuer_known {
            "Issuer recognized"
        } else {
            "Issuer not recognized"
        }
        .to_string(),
    });

    if let Some(product_id) = extract_product_id(record) {
        let ok = registry.has_product_id(&product_id);
        rows.push(field_row(
            format!("Product ID: {product_id}"),
            json!({ "product": product_id }),
            ok,
            if ok { "Product recognized" } else { "Product not recognized" },
        ));
    }

    if let Some(batch) = extract_batch_number(record) {
        let ok = registry.has_batch(&batch);
        rows.push(field_row(
            format!("Batch: {batch}"),
            json!({ "batch": batch }),
            ok,
            if ok { "Batch recognized" } else { "Batch not recognized" },
        ));
    }

    if let Some(date) = extract_issue_date(record) {
        let ok = registry.has_issue_date(&date);
        rows.push(field_row(
            format!("Issued date: {date}"),
            json!({ "date": date }),
            ok,
            if ok { "Date recognized" } else { "Date not recognized" },
        ));
    }

    for claim in &record.claims {
        if BATCH_PSEUDO_CLAIM.is_match(claim) || PRODUCT_PSEUDO_CLAIM.is_match(claim) {
            continue;
        }
        rows.push(ClaimRow {
            kind: RowKind::Claim,
            label: claim.clone(),
            hash: sha256_hex(&json!({ "claim": claim }).to_string()),
            status: VerificationStatus::PartiallyVerified,
            details: "Textual claim - not verifiable on-chain in demo".to_string(),
        });
    }

    debug!(
        issuer_known,
        row_count = rows.len(),
        "detailed claim verification finished"
    );
    rows
}

fn meta_hash(record: &ClaimRecord) -> String {
    if record.source.is_null() {
        // A derived Serialize on plain strings cannot fail.
        let value = serde_json::to_value(record).unwrap_or(Value::Null);
        sha256_hex(&stable_stringify(&value))
    } else {
        sha256_hex(&stable_stringify(&record.source))
    }
}

fn status_for(ok: bool) -> VerificationStatus {
    if ok {
        VerificationStatus::Verified
    } else {
        VerificationStatus::Fake
    }
}

fn field_row(label: String, hashed: Value, ok: bool, details: &str) -> ClaimRow {
    ClaimRow {
        kind: RowKind::Claim,
        label,
        hash: sha256_hex(&hashed.to_string()),
        status: status_for(ok),
        details: details.to_string(),
    }
}

// ── Combined report ───────────────────────────────────────────────────────────

/// Everything a presentation layer shows for one certificate.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimReport {
    pub record: ClaimRecord,
    pub rows: Vec<ClaimRow>,
    pub verdict: VerificationResult,
}

impl ClaimReport {
    /// Run both verifications over an already-extracted record.
    pub fn build(record: ClaimRecord, registry: &dyn RegistryLookup) -> Self {
        let rows = verify_claims_detailed(&record, registry);
        let verdict = verify_claims(&record, registry);
        Self {
            record,
            rows,
            verdict,
        }
    }

    /// Pretty-printed JSON of the record, rows and verdict.
    pub fn to_pretty_json(&self) -> TraceResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TraceError::SerializationFailure {
            what: "claim report".to_string(),
            reason: e.to_string(),
        })
    }
}
