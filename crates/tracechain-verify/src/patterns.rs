//! Compiled patterns shared by certificate parsing, claim extraction and
//! field lookup.  All label patterns are case-insensitive.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ── Line-anchored labels (certificate parser) ────────────────────────────

    /// `Issuer: Acme Pharma Ltd`
    pub(crate) static ref ISSUER_LINE: Regex = Regex::new(
        r"(?i)^(?:issuer|issued by|issued-by|manufacturer|manufactured by)[:-]?\s*(.+)$"
    ).unwrap();

    /// `Product ID: PC-100`; the code may contain spaces.
    pub(crate) static ref PRODUCT_LINE: Regex = Regex::new(
        r"(?i)^(?:product id|product name|product|document)[:-]?\s*([A-Z0-9][A-Z0-9\s-]*)$"
    ).unwrap();

    /// `Batch Number: BATCH 9999`
    pub(crate) static ref BATCH_LINE: Regex = Regex::new(
        r"(?i)^(?:batch number|batch no\.?|batch)[:-]?\s*([A-Z0-9\s-]+)"
    ).unwrap();

    /// `Issue Date: March 5, 2024`
    pub(crate) static ref DATE_LINE: Regex = Regex::new(
        r"(?i)^(?:issue date|issued date|manufacture date|manufactured on|date)[:-]?\s*(.+)$"
    ).unwrap();

    // ── Free-standing values ─────────────────────────────────────────────────

    /// `2024-01-01`, `2024/1/1`
    pub(crate) static ref ISO_DATE: Regex = Regex::new(
        r"[0-9]{4}[-/][0-9]{1,2}[-/][0-9]{1,2}"
    ).unwrap();

    pub(crate) static ref PRODUCT_CODE: Regex = Regex::new(r"(?i)PC-[A-Z0-9-]+").unwrap();

    pub(crate) static ref PRODUCT_ID_PHRASE: Regex = Regex::new(
        r"(?i)product id[:-]?\s*([A-Z0-9-]+)"
    ).unwrap();

    pub(crate) static ref BATCH_CODE: Regex = Regex::new(r"(?i)BATCH[-\s]?[A-Z0-9]+").unwrap();

    pub(crate) static ref BATCH_NUMBER_PHRASE: Regex = Regex::new(
        r"(?i)batch number[:-]?\s*([A-Z0-9-]+)"
    ).unwrap();

    // ── Whole-text passes (claim extraction) ─────────────────────────────────

    pub(crate) static ref ISSUER_ANYWHERE: Regex = Regex::new(
        r"(?i)(?:manufactured by|manufacturer|issuer|issued by)[:-]\s*(.+)"
    ).unwrap();

    pub(crate) static ref PRODUCT_ANYWHERE: Regex = Regex::new(
        r"(?i)(?:product id|product name|product|document)[:-]\s*(.+)"
    ).unwrap();

    /// Labelled numeric date, year-first or year-last, with `-`, `/` or `.`.
    pub(crate) static ref DATE_ANYWHERE: Regex = Regex::new(
        r"(?i)(?:manufacture date|manufactured on|issued date|date)[:-]\s*([0-9]{4}[-/.][0-9]{1,2}[-/.][0-9]{1,2}|[0-9]{1,2}[-/.][0-9]{1,2}[-/.][0-9]{2,4})"
    ).unwrap();

    pub(crate) static ref BATCH_ANYWHERE: Regex = Regex::new(
        r"(?i)(?:batch number|batch no\.?|batch)[:-]\s*(\S+)"
    ).unwrap();

    /// Any metadata label followed by `:` or `-`.
    pub(crate) static ref METADATA_LABEL: Regex = Regex::new(
        r"(?i)(?:manufactured by|manufacturer|issuer|issued by|product id|product name|product|document|manufacture date|manufactured on|issued date|date|batch number|batch no\.?|batch)[:-]"
    ).unwrap();

    pub(crate) static ref ASSERTIVE_VERB: Regex = Regex::new(
        r"(?i)\bis\b|\bhas\b|\bprovides\b|\bincludes\b|\bcontains\b|\bguarantee|\bmeets\b|\bcomplies\b"
    ).unwrap();

    /// Bullets and list numbering: `- `, `1. `, `2) `.
    pub(crate) static ref LIST_MARKER: Regex = Regex::new(r"^[-0-9.)\s]+").unwrap();

    pub(crate) static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // ── Detailed-report filters ──────────────────────────────────────────────

    pub(crate) static ref BATCH_PSEUDO_CLAIM: Regex = Regex::new(r"(?i)^Batch[: ]").unwrap();

    pub(crate) static ref PRODUCT_PSEUDO_CLAIM: Regex = Regex::new(r"(?i)Product ID[: ]").unwrap();
}

/// Collapse every whitespace run to a single `replacement`.
pub(crate) fn collapse_whitespace(s: &str, replacement: &str) -> String {
    WHITESPACE_RUN.replace_all(s, replacement).into_owned()
}
