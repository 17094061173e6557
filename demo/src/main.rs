//! TRACECHAIN Supply-Chain Reference Runtime: Demo CLI
//!
//! Runs the reference scenarios, or verifies a certificate supplied on stdin
//! or from a file against the demo registry (or one loaded from TOML).
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- blockchain-log --block-size 3
//!   cargo run -p demo -- verify-text --file certificate.txt --json
//!   echo '{"issuer":"Acme Pharma Ltd"}' | cargo run -p demo -- verify-json

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tracechain_contracts::{
    claim::ClaimRecord,
    error::{TraceError, TraceResult},
};
use tracechain_ledger::DEFAULT_BLOCK_SIZE;
use tracechain_ref_supply::scenarios::{blockchain_log, claim_verification, product_tracking};
use tracechain_registry::TrustRegistry;
use tracechain_verify::{
    explain_deterministic, extract_claims_from_text, parse_claim_json, ClaimReport,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// TRACECHAIN: supply-chain provenance and certificate verification demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "TRACECHAIN supply-chain reference runtime demo",
    long_about = "Runs TRACECHAIN demo scenarios showing hash-chained custody events,\n\
                  tamper detection, the block log view, and certificate claim verification."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: Product Tracking (checkpoints and tamper detection).
    ProductTracking,
    /// Scenario 2: Blockchain Log (events grouped into display blocks).
    BlockchainLog {
        /// Events per block.
        #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: usize,
    },
    /// Scenario 3: Claim Verification (sample certificates).
    ClaimVerification,
    /// Extract claims from certificate text and verify them.
    VerifyText(InputArgs),
    /// Verify a claim record given as JSON.
    VerifyJson(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Read input from this file instead of stdin.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Registry TOML to verify against instead of the built-in demo registry.
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => {
            print_banner();
            run_all()
        }
        Command::ProductTracking => {
            print_banner();
            product_tracking::run_scenario()
        }
        Command::BlockchainLog { block_size } => {
            print_banner();
            blockchain_log::run_with_block_size(block_size)
        }
        Command::ClaimVerification => {
            print_banner();
            claim_verification::run_scenario()
        }
        Command::VerifyText(args) => verify_input(&args, |text| Ok(extract_claims_from_text(text))),
        Command::VerifyJson(args) => verify_input(&args, parse_claim_json),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> TraceResult<()> {
    product_tracking::run_scenario()?;
    blockchain_log::run_scenario()?;
    claim_verification::run_scenario()?;
    println!("All selected scenarios completed successfully.");
    Ok(())
}

// ── Ad-hoc verification ───────────────────────────────────────────────────────

fn verify_input<F>(args: &InputArgs, to_record: F) -> TraceResult<()>
where
    F: Fn(&str) -> TraceResult<ClaimRecord>,
{
    let registry = match &args.registry {
        Some(path) => TrustRegistry::from_file(path)?,
        None => TrustRegistry::try_demo()?,
    };
    debug!(registry = %registry.name(), "registry ready");

    let input = read_input(args.file.as_deref())?;
    let report = ClaimReport::build(to_record(&input)?, &registry);

    if args.json {
        println!("{}", report.to_pretty_json()?);
        return Ok(());
    }

    for row in &report.rows {
        println!("[{}] {}: {}", row.status, row.label, row.details);
        println!("    hash {}", row.hash);
    }
    println!();
    println!(
        "{}",
        explain_deterministic(Some(report.verdict.status), &report.verdict.reasons)
    );
    Ok(())
}

fn read_input(file: Option<&Path>) -> TraceResult<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| TraceError::InputUnreadable {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| TraceError::InputUnreadable {
                    source_name: "stdin".to_string(),
                    reason: e.to_string(),
                })?;
            Ok(text)
        }
    }
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("TRACECHAIN Supply-Chain Provenance");
    println!("Reference Demo");
    println!("====================================");
    println!();
    println!("Each custody checkpoint is hash-linked to the one before it:");
    println!("  [1] Canonical payload: productId, timestamp, location, status, stakeholder, data");
    println!("  [2] hash = digest(payload + previousHash); the first event links to 00000000");
    println!("  [3] Verification recomputes every hash and checks every link");
    println!("Certificates are checked field by field against a trust registry.");
    println!();
}
