//! Scenario 3: Claim Verification
//!
//! Runs each sample certificate through extraction, per-claim rows and the
//! aggregate verdict against the demo registry, then verifies a hand-edited
//! claim record and shows that malformed JSON is an input error rather than
//! a `Fake` verdict.

use tracechain_contracts::{claim::ClaimRecord, error::TraceResult};
use tracechain_core::traits::{ClaimExtractor, RegistryLookup};
use tracechain_registry::TrustRegistry;
use tracechain_verify::{
    parse_certificate_text, parse_claim_json, ClaimReport, RegexClaimExtractor,
    VerificationAssistant,
};

use crate::mock_data::{EDITED_CLAIM_JSON, MALFORMED_CLAIM_JSON, SAMPLE_CERTIFICATES};

/// Run Scenario 3: Claim Verification.
pub fn run_scenario() -> TraceResult<()> {
    println!("=== Scenario 3: Claim Verification ===");
    println!();

    let registry = TrustRegistry::demo();
    let extractor = RegexClaimExtractor;
    let assistant = VerificationAssistant::deterministic();

    println!("  Registry: {}", registry.name());
    println!();

    // ── Part A: certificate text ─────────────────────────────────────────────

    for (n, sample) in SAMPLE_CERTIFICATES.iter().enumerate() {
        println!("  Certificate {}: {}", n + 1, sample.title);

        let fields = parse_certificate_text(sample.text);
        println!(
            "  Parsed fields:    issuer={:?} product={:?} batch={:?} date={:?}",
            fields.issuer, fields.product_id, fields.batch_number, fields.issue_date
        );

        let record = extractor.extract(sample.text)?;
        let report = print_report(record, &registry);

        let explanation = assistant.explain(Some(report.verdict.status), &report.verdict.reasons);
        if let Some(recommendation) = explanation
            .text
            .split("\n\n")
            .find(|p| p.starts_with("Recommendation:"))
        {
            println!("  {recommendation}");
        }
        println!();
    }

    // ── Part B: edited claim JSON ────────────────────────────────────────────

    println!("  Edited claim record (alternate key spellings)");
    let record = parse_claim_json(EDITED_CLAIM_JSON)?;
    print_report(record, &registry);
    println!();

    println!("  Malformed claim record");
    match parse_claim_json(MALFORMED_CLAIM_JSON) {
        Ok(record) => println!("  UNEXPECTED: accepted {} claim(s)", record.claims.len()),
        Err(e) => println!("  REJECTED (input error, no verdict): {}", e),
    }
    println!();

    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

fn print_report(record: ClaimRecord, registry: &dyn RegistryLookup) -> ClaimReport {
    let report = ClaimReport::build(record, registry);
    for row in &report.rows {
        println!(
            "    [{:<18}] {} ({}) #{}",
            row.status.as_str(),
            row.label,
            row.details,
            &row.hash[..12]
        );
    }
    println!(
        "  Verdict:          {} ({})",
        report.verdict.status,
        report.verdict.reasons.join("; ")
    );
    report
}
