//! Claim JSON → `ClaimRecord`.
//!
//! Hand-edited claim JSON arrives in several spellings.  They are folded
//! into the canonical record here, once, before any verification runs:
//!
//! | field                 | accepted keys (first non-empty wins)        |
//! |-----------------------|---------------------------------------------|
//! | `product_or_document` | `product_or_document`                       |
//! | `product_id`          | `productId`, `product_id`                   |
//! | `batch_number`        | `batchNumber`, `batch`, `batch_number`      |
//! | `issue_date`          | `issued_date`, `issueDate`, `issue_date`    |
//!
//! Failures come in two classes, both distinct from a `Fake` verdict:
//! text that is not JSON (`InvalidClaimJson`) and JSON that is not a claim
//! record (`InvalidClaimShape`).

use lazy_static::lazy_static;
use serde_json::{json, Value};
use tracing::{debug, warn};

use tracechain_contracts::{
    claim::ClaimRecord,
    error::{TraceError, TraceResult},
};

const PRODUCT_KEYS: &[&str] = &["productId", "product_id"];
const BATCH_KEYS: &[&str] = &["batchNumber", "batch", "batch_number"];
const DATE_KEYS: &[&str] = &["issued_date", "issueDate", "issue_date"];

lazy_static! {
    /// Structural contract for claim JSON.  Unknown keys are allowed and
    /// ignored.
    static ref CLAIM_SCHEMA: Value = {
        let text = json!({ "type": ["string", "null"] });
        let code = json!({ "type": ["string", "number", "null"] });
        json!({
            "type": "object",
            "properties": {
                "issuer": text,
                "product_or_document": text,
                "productId": code,
                "product_id": code,
                "batchNumber": code,
                "batch": code,
                "batch_number": code,
                "issueDate": text,
                "issued_date": text,
                "issue_date": text,
                "claims": {
                    "type": ["array", "null"],
                    "items": { "type": "string" }
                }
            }
        })
    };
}

/// Parse claim JSON text into a canonical record.
pub fn parse_claim_json(text: &str) -> TraceResult<ClaimRecord> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        warn!(error = %e, "claim JSON rejected");
        TraceError::InvalidClaimJson {
            reason: e.to_string(),
        }
    })?;
    normalize_claim_value(&value)
}

/// Validate an already-parsed JSON value and fold its alternate keys.
pub fn normalize_claim_value(value: &Value) -> TraceResult<ClaimRecord> {
    validate_shape(value)?;
    let record = fold_claim_value(value);

    debug!(
        issuer = %record.issuer,
        claim_count = record.claims.len(),
        "claim record normalized"
    );
    Ok(record)
}

/// Fold an object already known to have the claim shape.  The object itself
/// is kept as the record's `source`.
pub(crate) fn fold_claim_value(value: &Value) -> ClaimRecord {
    ClaimRecord {
        issuer: text_field(value, "issuer"),
        product_or_document: text_field(value, "product_or_document"),
        product_id: first_non_empty(value, PRODUCT_KEYS),
        batch_number: first_non_empty(value, BATCH_KEYS),
        issue_date: first_non_empty(value, DATE_KEYS),
        claims: value
            .get("claims")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        source: value.clone(),
    }
}

fn validate_shape(value: &Value) -> TraceResult<()> {
    let validator =
        jsonschema::validator_for(&CLAIM_SCHEMA).map_err(|e| TraceError::InvalidClaimShape {
            reason: format!("invalid claim schema document: {e}"),
        })?;

    let violations: Vec<String> = validator
        .iter_errors(value)
        .map(|error| {
            let path = error.instance_path.to_string();
            let path = if path.is_empty() { "/".to_string() } else { path };
            format!("{path}: {error}")
        })
        .collect();

    if violations.is_empty() {
        return Ok(());
    }
    warn!(violations = violations.len(), "claim JSON has the wrong shape");
    Err(TraceError::InvalidClaimShape {
        reason: violations.join("; "),
    })
}

/// String value of `key`; numbers are rendered, anything else is empty.
fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn first_non_empty(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| text_field(value, key))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}
