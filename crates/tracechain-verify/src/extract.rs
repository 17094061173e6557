//! Deterministic claim extraction from free text.
//!
//! `extract_claims_from_text` never fails.  Empty or unrecognisable input
//! degrades to an empty (or mostly empty) `ClaimRecord`.
//!
//! Passes, in order:
//!
//! 1. Seed the structured fields from the certificate parser.
//! 2. Whole-text label searches: a labelled issuer or product/document
//!    replaces the seeded value, a labelled date fills `issued_date`, and a
//!    labelled batch adds a `Batch: X` pseudo-claim.
//! 3. Non-metadata lines with an assertive verb, or longer than 20 UTF-16
//!    code units, become claims with list markers stripped.
//! 4. With no such line, the first six sentences become the claims.
//!
//! The result is assembled as the seven-key claim object (`issuer`,
//! `product_or_document`, `productId`, `batchNumber`, `issueDate`,
//! `issued_date`, `claims`) and folded through the claim normalizer, so the
//! object stays attached to the record as its `source`.

use serde_json::{json, Value};
use tracing::debug;

use tracechain_contracts::claim::ClaimRecord;

use crate::{
    certificate::{content_lines, normalize_text, parse_certificate_text},
    normalize::fold_claim_value,
    patterns::{
        collapse_whitespace, ASSERTIVE_VERB, BATCH_ANYWHERE, DATE_ANYWHERE, ISSUER_ANYWHERE,
        LIST_MARKER, METADATA_LABEL, PRODUCT_ANYWHERE,
    },
};

/// Lines longer than this many UTF-16 code units are claims even without an
/// assertive verb.
const CLAIM_MIN_UNITS: usize = 20;

/// Sentences kept when no line qualifies as a claim.
const FALLBACK_SENTENCES: usize = 6;

/// Raw extraction output, before folding.
#[derive(Default)]
struct Extracted {
    issuer: String,
    product_or_document: String,
    product_id: String,
    batch_number: String,
    issue_date: String,
    issued_date: String,
    claims: Vec<String>,
}

impl Extracted {
    fn to_json(&self) -> Value {
        json!({
            "issuer": self.issuer,
            "product_or_document": self.product_or_document,
            "productId": self.product_id,
            "batchNumber": self.batch_number,
            "issueDate": self.issue_date,
            "issued_date": self.issued_date,
            "claims": self.claims,
        })
    }
}

/// Extract a claim record from certificate or product-document text.
pub fn extract_claims_from_text(text: &str) -> ClaimRecord {
    let extracted = if text.trim().is_empty() {
        Extracted::default()
    } else {
        scan(&normalize_text(text))
    };
    let record = fold_claim_value(&extracted.to_json());

    debug!(
        issuer = %record.issuer,
        product_id = %record.product_id,
        claim_count = record.claims.len(),
        "claims extracted from text"
    );
    record
}

fn scan(normalized: &str) -> Extracted {
    let cert = parse_certificate_text(normalized);
    let mut out = Extracted {
        issuer: cert.issuer,
        product_or_document: cert.product_id.clone(),
        product_id: cert.product_id,
        batch_number: cert.batch_number,
        issue_date: cert.issue_date,
        ..Extracted::default()
    };

    if let Some(caps) = ISSUER_ANYWHERE.captures(normalized) {
        out.issuer = caps[1].trim().to_string();
    }
    if let Some(caps) = PRODUCT_ANYWHERE.captures(normalized) {
        out.product_or_document = caps[1].trim().to_string();
    }
    if let Some(caps) = DATE_ANYWHERE.captures(normalized) {
        out.issued_date = caps[1].trim().to_string();
    }

    let mut pseudo_claims: Vec<String> = Vec::new();
    if let Some(caps) = BATCH_ANYWHERE.captures(normalized) {
        pseudo_claims.push(format!("Batch: {}", caps[1].trim()));
    }

    let mut candidates: Vec<String> = content_lines(normalized)
        .filter(|line| !METADATA_LABEL.is_match(line))
        .filter(|line| {
            ASSERTIVE_VERB.is_match(line) || line.encode_utf16().count() > CLAIM_MIN_UNITS
        })
        .map(|line| LIST_MARKER.replace(line, "").trim().to_string())
        .collect();

    if candidates.is_empty() {
        candidates = split_sentences(normalized)
            .into_iter()
            .take(FALLBACK_SENTENCES)
            .map(str::to_string)
            .collect();
    }

    out.claims = pseudo_claims
        .into_iter()
        .chain(candidates)
        .map(|claim| collapse_whitespace(&claim, " ").trim().to_string())
        .collect();
    out
}

/// Split after `.`, `!` or `?` followed by whitespace.  The terminator stays
/// with its sentence; the whitespace run is dropped.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut after_terminator = false;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() && after_terminator {
            sentences.push(&text[start..i]);
            let mut end = i + c.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = j + next.len_utf8();
                chars.next();
            }
            start = end;
            after_terminator = false;
            continue;
        }
        after_terminator = matches!(c, '.' | '!' | '?');
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
