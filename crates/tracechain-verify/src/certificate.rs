//! Plain-text certificate parser.
//!
//! Scans a certificate line by line and picks out the four registry-checked
//! fields.  The first line that yields a field wins; later lines never
//! override it.  Every field is attempted on every line until all four are
//! filled, at which point the scan stops.

use chrono::NaiveDate;
use tracing::debug;

use tracechain_contracts::claim::CertificateFields;

use crate::patterns::{
    collapse_whitespace, BATCH_LINE, DATE_LINE, ISO_DATE, ISSUER_LINE, PRODUCT_CODE, PRODUCT_LINE,
};

/// Written date formats accepted after a date label when no ISO-like date is
/// present.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y.%m.%d",
];

/// `\r\n` → `\n`, tab → space, then trim.
pub(crate) fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\t', " ").trim().to_string()
}

/// Trimmed, non-empty lines.
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|l| !l.is_empty())
}

/// Extract issuer, product id, batch number and issue date from certificate
/// text.  Missing fields are empty strings.
pub fn parse_certificate_text(text: &str) -> CertificateFields {
    let mut fields = CertificateFields::default();
    let normalized = normalize_text(text);

    for line in content_lines(&normalized) {
        if fields.issuer.is_empty() {
            if let Some(caps) = ISSUER_LINE.captures(line) {
                fields.issuer = caps[1].trim().to_string();
            }
        }

        if fields.product_id.is_empty() {
            if let Some(caps) = PRODUCT_LINE.captures(line) {
                fields.product_id = collapse_whitespace(caps[1].trim(), "-");
            } else if let Some(code) = PRODUCT_CODE.find(line) {
                fields.product_id = code.as_str().to_uppercase();
            }
        }

        if fields.batch_number.is_empty() {
            if let Some(caps) = BATCH_LINE.captures(line) {
                fields.batch_number = collapse_whitespace(caps[1].trim(), "-").to_uppercase();
            }
        }

        if fields.issue_date.is_empty() {
            if let Some(caps) = DATE_LINE.captures(line) {
                fields.issue_date = normalize_date(caps[1].trim());
            } else if let Some(iso) = ISO_DATE.find(line) {
                fields.issue_date = iso.as_str().to_string();
            }
        }

        if fields.is_complete() {
            break;
        }
    }

    debug!(
        issuer = %fields.issuer,
        product_id = %fields.product_id,
        batch_number = %fields.batch_number,
        issue_date = %fields.issue_date,
        "certificate text parsed"
    );
    fields
}

/// ISO-like substring verbatim, else a parsed written date as `YYYY-MM-DD`,
/// else the raw string.
fn normalize_date(raw: &str) -> String {
    if let Some(iso) = ISO_DATE.find(raw) {
        return iso.as_str().to_string();
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labelled_certificate() {
        let fields = parse_certificate_text(
            "Issuer: Acme Pharma Ltd\nProduct ID: PC-100\nBatch Number: BATCH-9999\nIssue Date: 2024-01-01",
        );
        assert_eq!(
            fields,
            CertificateFields {
                issuer: "Acme Pharma Ltd".to_string(),
                product_id: "PC-100".to_string(),
                batch_number: "BATCH-9999".to_string(),
                issue_date: "2024-01-01".to_string(),
            }
        );
    }

    #[test]
    fn alternate_labels_and_separators() {
        let fields = parse_certificate_text(
            "Certificate of Analysis\r\nIssued by: Acme Pharma Ltd\r\nProduct ID: PC-200\r\nBatch No. BATCH 9999\r\nDate: 2024/01/01\r\n",
        );
        assert_eq!(fields.issuer, "Acme Pharma Ltd");
        assert_eq!(fields.product_id, "PC-200");
        assert_eq!(fields.batch_number, "BATCH-9999");
        assert_eq!(fields.issue_date, "2024/01/01");
    }

    #[test]
    fn written_date_is_reformatted() {
        let fields = parse_certificate_text("Manufactured on: March 5, 2024");
        assert_eq!(fields.issue_date, "2024-03-05");

        let fields = parse_certificate_text("Issue Date: 5 March 2024");
        assert_eq!(fields.issue_date, "2024-03-05");
    }

    #[test]
    fn unparseable_date_kept_raw() {
        let fields = parse_certificate_text("Issue Date: sometime in spring");
        assert_eq!(fields.issue_date, "sometime in spring");
    }

    #[test]
    fn bare_iso_date_without_label() {
        let fields = parse_certificate_text("Released for sale on 2024-1-1 after QA");
        assert_eq!(fields.issue_date, "2024-1-1");
    }

    #[test]
    fn product_code_found_mid_line() {
        let fields = parse_certificate_text("This certificate covers pc-200a-x in full");
        assert_eq!(fields.product_id, "PC-200A-X");
    }

    /// Spaces inside a labelled product code become hyphens; case is kept.
    #[test]
    fn labelled_product_code_with_spaces() {
        let fields = parse_certificate_text("Product: Pc 100");
        assert_eq!(fields.product_id, "Pc-100");
    }

    #[test]
    fn first_match_wins() {
        let fields = parse_certificate_text("Issuer: First Co\nIssuer: Second Co");
        assert_eq!(fields.issuer, "First Co");
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_certificate_text(""), CertificateFields::default());
        assert_eq!(parse_certificate_text(" \n\t \n"), CertificateFields::default());
    }
}
