//! # tracechain-verify
//!
//! Claim extraction and registry-backed certificate verification.
//!
//! ## Overview
//!
//! Free text goes in, a verdict comes out:
//!
//! ```text
//! text ──extract──▶ ClaimRecord ──verify_claims──────────▶ VerificationResult
//!                        │
//!                        └─────verify_claims_detailed───▶ Vec<ClaimRow>
//! ```
//!
//! Extraction is deterministic (`extract_claims_from_text`), optionally
//! fronted by a model-backed strategy that falls back to it on any error.
//! Hand-edited claim JSON enters through `parse_claim_json`, which folds
//! alternate key spellings onto one record and reports malformed input as an
//! error, never as a `Fake` verdict.
//!
//! The registry is always a parameter (`&dyn RegistryLookup`).
//!
//! ## Hashing disciplines
//!
//! The meta row of a detailed report hashes the claim object as submitted
//! (unknown keys included) through `stable_stringify` (keys sorted).  Per-field rows hash a one-key object in
//! plain JSON.  Neither is related to event hashing in `tracechain-ledger`.

pub mod canonical;
pub mod certificate;
pub mod engine;
pub mod explain;
pub mod extract;
pub mod fields;
pub mod normalize;
mod patterns;
pub mod strategy;

pub use canonical::stable_stringify;
pub use certificate::parse_certificate_text;
pub use engine::{verify_certificate, verify_claims, verify_claims_detailed, ClaimReport};
pub use explain::{explain_deterministic, Explanation, ExplanationSource, VerificationAssistant};
pub use extract::extract_claims_from_text;
pub use fields::{certificate_from_claims, extract_batch_number, extract_issue_date, extract_product_id};
pub use normalize::{normalize_claim_value, parse_claim_json};
pub use strategy::{FallbackExtractor, LlmClaimExtractor, LlmConfig, RegexClaimExtractor};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use tracechain_contracts::{
        claim::{CertificateFields, ClaimRecord},
        verdict::{ClaimRow, RowKind, VerificationResult, VerificationStatus},
    };
    use tracechain_registry::TrustRegistry;

    use crate::*;

    const CERTIFICATE: &str =
        "Issuer: Acme Pharma Ltd\nProduct ID: PC-100\nBatch Number: BATCH-9999\nIssue Date: 2024-01-01";

    const TEXTUAL: &str = "Textual claim - not verifiable on-chain in demo";

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn fields(issuer: &str, product_id: &str, batch: &str, date: &str) -> CertificateFields {
        CertificateFields {
            issuer: issuer.to_string(),
            product_id: product_id.to_string(),
            batch_number: batch.to_string(),
            issue_date: date.to_string(),
        }
    }

    fn verdict(status: VerificationStatus, reasons: &[&str]) -> VerificationResult {
        VerificationResult::new(status, reasons.iter().map(|r| r.to_string()).collect())
    }

    fn statuses(rows: &[ClaimRow]) -> Vec<VerificationStatus> {
        rows.iter().map(|r| r.status).collect()
    }

    // ── 1. parsing ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_reference_certificate() {
        assert_eq!(
            parse_certificate_text(CERTIFICATE),
            fields("Acme Pharma Ltd", "PC-100", "BATCH-9999", "2024-01-01")
        );
    }

    // ── 2. aggregate verdicts ─────────────────────────────────────────────────

    #[test]
    fn test_all_checks_pass() {
        let registry = TrustRegistry::demo();
        assert_eq!(
            verify_certificate(
                &fields("Acme Pharma Ltd", "PC-100", "BATCH-9999", "2024-01-01"),
                &registry
            ),
            verdict(VerificationStatus::Verified, &["All checks passed"])
        );
    }

    /// An unknown issuer is Fake no matter how good the other fields are.
    #[test]
    fn test_unknown_issuer_is_fake() {
        let registry = TrustRegistry::demo();
        let expected = verdict(VerificationStatus::Fake, &["Issuer not found on chain"]);
        assert_eq!(
            verify_certificate(
                &fields("Unknown Co", "PC-100", "BATCH-9999", "2024-01-01"),
                &registry
            ),
            expected
        );
        assert_eq!(verify_certificate(&fields("", "", "", ""), &registry), expected);
        assert_eq!(
            verify_certificate(&fields("   ", "PC-100", "BATCH-9999", "2024-01-01"), &registry),
            expected
        );
    }

    #[test]
    fn test_missing_product_is_partial() {
        let registry = TrustRegistry::demo();
        assert_eq!(
            verify_certificate(
                &fields("Acme Pharma Ltd", "", "BATCH-9999", "2024-01-01"),
                &registry
            ),
            verdict(VerificationStatus::PartiallyVerified, &["Product ID missing"])
        );
    }

    /// Reasons are reported in field order; a near miss counts as
    /// unregistered.
    #[test]
    fn test_reasons_accumulate_in_order() {
        let registry = TrustRegistry::demo();
        assert_eq!(
            verify_certificate(
                &fields("acme pharma ltd", "PC-300", "", "2024-1-1"),
                &registry
            ),
            verdict(
                VerificationStatus::PartiallyVerified,
                &["Product ID not registered", "Batch number missing", "Issue date not registered"]
            )
        );
    }

    #[test]
    fn test_verify_claims_uses_field_helpers() {
        let registry = TrustRegistry::demo();
        let record = ClaimRecord {
            issuer: "Acme Pharma Ltd".to_string(),
            product_or_document: "Paracetamol pc-200 blister".to_string(),
            claims: vec![
                "Batch: batch 9999".to_string(),
                "Released on 2024-01-01".to_string(),
            ],
            ..ClaimRecord::default()
        };
        assert_eq!(
            verify_claims(&record, &registry),
            verdict(VerificationStatus::Verified, &["All checks passed"])
        );
    }

    // ── 3. detailed rows ──────────────────────────────────────────────────────

    #[test]
    fn test_detailed_reference_certificate() {
        let registry = TrustRegistry::demo();
        let record = extract_claims_from_text(CERTIFICATE);
        let rows = verify_claims_detailed(&record, &registry);

        assert_eq!(rows.len(), 4, "pseudo-claims are not repeated: {rows:?}");
        assert_eq!(rows[0].kind, RowKind::Meta);
        assert_eq!(rows[0].label, "Issuer: Acme Pharma Ltd");
        assert_eq!(rows[0].details, "Issuer recognized");
        assert_eq!(
            rows[0].hash,
            "08247f02a0fea51e456a705cb24f2bc9b1e0f9e5f1562d23cad0faf899e9d6bf"
        );

        assert_eq!(rows[1].label, "Product ID: PC-100");
        assert_eq!(
            rows[1].hash,
            "d4015b7cc1c547b46d5bc66cd1824d76b9dd3a32b00d75489d7436be51ef4a28"
        );
        assert_eq!(rows[2].label, "Batch: BATCH-9999");
        assert_eq!(
            rows[2].hash,
            "da42fc06e637019c975d4c7865722dfc6310790266c2c047ff97df1796daaed6"
        );
        assert_eq!(rows[3].label, "Issued date: 2024-01-01");
        assert_eq!(
            rows[3].hash,
            "065d305acccd17dd32019d62b6678295f30bcf869b4399fc7b29be7756a3b228"
        );
        assert!(rows.iter().all(|r| r.status == VerificationStatus::Verified));
    }

    #[test]
    fn test_detailed_unknown_values() {
        let registry = TrustRegistry::demo();
        let record = extract_claims_from_text(
            "Manufacturer: Unknown Co\nProduct: PC-999\nBatch: BATCH-0001\nManufactured on: March 5, 2024\nThe product is sterile.",
        );
        let rows = verify_claims_detailed(&record, &registry);

        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Issuer: Unknown Co",
                "Product ID: PC-999",
                "Batch: BATCH-0001",
                "Issued date: 2024-03-05",
                "The product is sterile.",
            ]
        );
        assert_eq!(
            statuses(&rows),
            vec![
                VerificationStatus::Fake,
                VerificationStatus::Fake,
                VerificationStatus::Fake,
                VerificationStatus::Fake,
                VerificationStatus::PartiallyVerified,
            ]
        );
        assert_eq!(rows[1].details, "Product not recognized");
        assert_eq!(rows[2].details, "Batch not recognized");
        assert_eq!(rows[3].details, "Date not recognized");
        assert_eq!(rows[4].details, TEXTUAL);
        assert_eq!(
            rows[4].hash,
            "f08ea1735088e37c12b9b81695bfeaf7dfeca0b486a13e533072c90d8e5d0d46"
        );

        assert_eq!(
            verify_claims(&record, &registry),
            verdict(VerificationStatus::Fake, &["Issuer not found on chain"])
        );
    }

    /// With nothing recognisable, only the meta row and free text remain.
    #[test]
    fn test_detailed_free_text_only() {
        let registry = TrustRegistry::demo();
        let record = extract_claims_from_text("Nice. Good! Ok?");
        let rows = verify_claims_detailed(&record, &registry);

        assert_eq!(rows[0].label, "Issuer: Unknown");
        assert_eq!(rows[0].details, "Issuer not recognized");
        assert_eq!(
            rows[0].hash,
            "70c16e3ea1a2288d139b3de4acd3eb8b99a2fec96af27c01a61d8751a54eae7d"
        );
        assert_eq!(
            statuses(&rows[1..]),
            vec![VerificationStatus::PartiallyVerified; 3]
        );
    }

    /// Empty text still yields the seven-key object; a record built in code
    /// hashes its own six serialized keys.
    #[test]
    fn test_detailed_empty_record() {
        let registry = TrustRegistry::demo();
        let rows = verify_claims_detailed(&extract_claims_from_text(""), &registry);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, VerificationStatus::Fake);
        assert_eq!(
            rows[0].hash,
            "ac312dca1fe4e762c4c138192fe57d1acf3fddf6b93264e1e4c1ab364ef18e0a"
        );

        let rows = verify_claims_detailed(&ClaimRecord::default(), &registry);
        assert_eq!(
            rows[0].hash,
            "b32a6763686b0459fdf7a652f07855294ea37916c6f6dbc813970aa952afa664"
        );
    }

    /// Rows serialize with the `type` key and display status names.
    #[test]
    fn test_row_wire_format() {
        let rows = verify_claims_detailed(
            &extract_claims_from_text("\tIssuer:\tAcme Pharma Ltd\n\tThe\tpackaging   is tamper-evident\n"),
            &TrustRegistry::demo(),
        );
        let value = serde_json::to_value(&rows).unwrap();
        assert_eq!(value[0]["type"], "meta");
        assert_eq!(
            value[0]["hash"],
            "5b10b02bee3dce4d43c949fce0124a96ac008c7a9eddbebe7e92986a0507466c"
        );
        assert_eq!(value[1]["type"], "claim");
        assert_eq!(value[1]["label"], "The packaging is tamper-evident");
        assert_eq!(value[1]["status"], "Partially Verified");
    }

    // ── 4. serialization disciplines ──────────────────────────────────────────

    #[test]
    fn test_stable_stringify_ignores_insertion_order() {
        let ab = json!({"a": 1, "b": 2});
        let ba = json!({"b": 2, "a": 1});
        assert_eq!(ab.to_string(), r#"{"a":1,"b":2}"#);
        assert_eq!(ba.to_string(), r#"{"b":2,"a":1}"#, "plain JSON keeps insertion order");
        assert_eq!(stable_stringify(&ab), stable_stringify(&ba));
        assert_eq!(stable_stringify(&ba), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_stable_stringify_nested() {
        let value = json!({"b": 2, "a": 1, "é": 1, "Z": [{"y": 1, "x": null}], "_": true});
        assert_eq!(
            stable_stringify(&value),
            r#"{"Z":[{"x":null,"y":1}],"_":true,"a":1,"b":2,"é":1}"#
        );
        assert_eq!(stable_stringify(&json!([3, "x", null])), r#"[3,"x",null]"#);
        assert_eq!(stable_stringify(&json!("q\"uote")), r#""q\"uote""#);
    }

    /// The meta hash depends on content, not on how the JSON was written.
    #[test]
    fn test_meta_hash_independent_of_key_order() {
        let registry = TrustRegistry::demo();
        let a = parse_claim_json(r#"{"issuer":"Acme Pharma Ltd","claims":["x"],"batch":"B-1"}"#).unwrap();
        let b = parse_claim_json(r#"{"batch":"B-1","claims":["x"],"issuer":"Acme Pharma Ltd"}"#).unwrap();
        assert_eq!(
            verify_claims_detailed(&a, &registry)[0].hash,
            verify_claims_detailed(&b, &registry)[0].hash
        );
        assert_eq!(
            verify_claims_detailed(&a, &registry)[0].hash,
            "4f351258d59f34ae5aea0ce45ecaf8c30e4b4ec273c43095ccf0f3416fda8d4c"
        );
    }

    /// Keys the normalizer ignores still change the fingerprint.
    #[test]
    fn test_meta_hash_covers_submitted_keys() {
        let registry = TrustRegistry::demo();
        let noted =
            parse_claim_json(r#"{"issuer":"Acme Pharma Ltd","notes":"counterfeit lot"}"#).unwrap();
        let plain = parse_claim_json(r#"{"issuer":"Acme Pharma Ltd"}"#).unwrap();

        let noted_rows = verify_claims_detailed(&noted, &registry);
        let plain_rows = verify_claims_detailed(&plain, &registry);
        assert_eq!(
            noted_rows[0].hash,
            "32fce4b438c2baab465ca84a0f4f6ff0d5ff43946ffc599cf76f3592d45cc20a"
        );
        assert_eq!(
            plain_rows[0].hash,
            "89aab5fedfbd3ee30932b131258a0a24cd601d1f29b1b247e2c634449d385590"
        );
        assert_eq!(verify_claims(&noted, &registry), verify_claims(&plain, &registry));
    }

    // ── 5. edited JSON round ──────────────────────────────────────────────────

    /// Alternate key spellings verify exactly like canonical ones.
    #[test]
    fn test_alternate_keys_verify_identically() {
        let registry = TrustRegistry::demo();
        let legacy = parse_claim_json(
            r#"{"issuer":"Acme Pharma Ltd","product_or_document":"","productId":"PC-100",
                "batch":"BATCH-9999","issued_date":"2024-01-01","claims":[]}"#,
        )
        .unwrap();
        assert_eq!(
            verify_claims(&legacy, &registry),
            verdict(VerificationStatus::Verified, &["All checks passed"])
        );
    }

    #[test]
    fn test_report_bundles_both_views() {
        let registry = TrustRegistry::demo();
        let report = ClaimReport::build(extract_claims_from_text(CERTIFICATE), &registry);
        assert_eq!(report.verdict.status, VerificationStatus::Verified);
        assert_eq!(report.rows.len(), 4);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["record"]["productId"], "PC-100");
        assert_eq!(value["verdict"]["reasons"][0], "All checks passed");

        let pretty = report.to_pretty_json().unwrap();
        assert!(pretty.contains("\n  \"rows\": ["), "got: {pretty}");
        let reparsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(reparsed, value);
    }

    /// The fail-closed wrapper around the deterministic extractor is a no-op.
    #[test]
    fn test_regex_extractor_through_fallback() {
        use tracechain_core::traits::ClaimExtractor;

        let extractor = FallbackExtractor::new(RegexClaimExtractor);
        assert_eq!(
            extractor.extract(CERTIFICATE).unwrap(),
            extract_claims_from_text(CERTIFICATE)
        );
    }
}
