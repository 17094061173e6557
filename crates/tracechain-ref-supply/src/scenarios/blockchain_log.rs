//! Scenario 2: Blockchain Log
//!
//! Groups every sample event into display blocks, then edits one product's
//! chain and shows which blocks turn invalid.  Block hashes only chain the
//! blocks for display; validity always comes from the product chains.

use tracechain_contracts::error::TraceResult;
use tracechain_ledger::{build_block_log, BlockLog, DEFAULT_BLOCK_SIZE};

use crate::mock_data::sample_products;

/// The sample product whose chain Part B edits.
const TAMPERED_PRODUCT: &str = "PROD_0005";

/// Run Scenario 2 with the default block size.
pub fn run_scenario() -> TraceResult<()> {
    run_with_block_size(DEFAULT_BLOCK_SIZE)
}

/// Run Scenario 2 with `block_size` events per block (minimum 1).
pub fn run_with_block_size(block_size: usize) -> TraceResult<()> {
    println!("=== Scenario 2: Blockchain Log ===");
    println!();

    // ── Part A: intact log ────────────────────────────────────────────────────

    let products = sample_products();
    let log = build_block_log(&products, block_size);
    println!(
        "  Part A: {} events from {} products in blocks of {}",
        log.event_count(),
        products.len(),
        block_size.max(1)
    );
    print_blocks(&log);

    let matches = log.search("walmart");
    println!(
        "  Search \"walmart\": blocks {:?}",
        matches.iter().map(|b| b.block_number).collect::<Vec<_>>()
    );
    println!();

    // ── Part B: one product edited ───────────────────────────────────────────

    let mut tampered = products;
    if let Some(product) = tampered.iter_mut().find(|p| p.id == TAMPERED_PRODUCT) {
        if let Some(event) = product.events.get_mut(1) {
            event.stakeholder = "Grey Market Traders".to_string();
        }
    }

    let log = build_block_log(&tampered, block_size);
    println!("  Part B: stakeholder of {TAMPERED_PRODUCT} event 1 edited");
    print_blocks(&log);
    println!(
        "  Invalid blocks: {:?}",
        log.blocks
            .iter()
            .filter(|b| !b.is_valid)
            .map(|b| b.block_number)
            .collect::<Vec<_>>()
    );
    println!();

    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}

fn print_blocks(log: &BlockLog) {
    for block in &log.blocks {
        println!(
            "  Block #{:<3} {}  prev {}  {} event(s)  {}",
            block.block_number,
            block.block_hash,
            block.previous_block_hash,
            block.events.len(),
            if block.is_valid { "VALID" } else { "INVALID" }
        );
    }
    println!(
        "  Overall integrity: {}",
        if log.overall_integrity { "PASS" } else { "FAIL" }
    );
}
