//! Registry-checked fields recovered from a claim record.
//!
//! Each helper looks at the structured field first and then scans the
//! free-text claims.  Both the aggregate and the detailed verification use
//! these same helpers, so they always agree on what was found.

use tracechain_contracts::claim::{CertificateFields, ClaimRecord};

use crate::patterns::{
    collapse_whitespace, BATCH_CODE, BATCH_NUMBER_PHRASE, ISO_DATE, PRODUCT_CODE,
    PRODUCT_ID_PHRASE,
};

/// A `PC-` product code, upper-cased.
pub fn extract_product_id(record: &ClaimRecord) -> Option<String> {
    let labelled = if record.product_or_document.is_empty() {
        &record.product_id
    } else {
        &record.product_or_document
    };

    [labelled.as_str(), record.product_id.as_str()]
        .into_iter()
        .find_map(|field| PRODUCT_CODE.find(field))
        .map(|code| code.as_str().to_uppercase())
        .or_else(|| {
            record.claims.iter().find_map(|claim| {
                PRODUCT_CODE
                    .find(claim)
                    .map(|code| code.as_str().to_uppercase())
                    .or_else(|| {
                        PRODUCT_ID_PHRASE
                            .captures(claim)
                            .map(|caps| caps[1].to_uppercase())
                    })
            })
        })
}

/// The batch number, trimmed, hyphen-joined and upper-cased.
pub fn extract_batch_number(record: &ClaimRecord) -> Option<String> {
    if !record.batch_number.is_empty() {
        let batch = collapse_whitespace(record.batch_number.trim(), "-").to_uppercase();
        return (!batch.is_empty()).then_some(batch);
    }

    record.claims.iter().find_map(|claim| {
        BATCH_CODE
            .find(claim)
            .map(|code| collapse_whitespace(code.as_str(), "-").to_uppercase())
            .or_else(|| {
                BATCH_NUMBER_PHRASE
                    .captures(claim)
                    .map(|caps| caps[1].to_uppercase())
            })
    })
}

/// The first ISO-like date (`YYYY-M-D` or `YYYY/M/D`), verbatim.
pub fn extract_issue_date(record: &ClaimRecord) -> Option<String> {
    std::iter::once(record.issue_date.as_str())
        .chain(record.claims.iter().map(String::as_str))
        .find_map(|text| ISO_DATE.find(text))
        .map(|date| date.as_str().to_string())
}

/// The four registry-checked fields of `record`; missing ones are empty.
pub fn certificate_from_claims(record: &ClaimRecord) -> CertificateFields {
    CertificateFields {
        issuer: record.issuer.trim().to_string(),
        product_id: extract_product_id(record).unwrap_or_default(),
        batch_number: extract_batch_number(record).unwrap_or_default(),
        issue_date: extract_issue_date(record).unwrap_or_default(),
    }
}
