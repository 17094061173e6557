//! Scenario 1: Product Tracking
//!
//! Walks one product through a new custody checkpoint and shows the three
//! ways the store and the chain push back:
//!
//! Part A: a valid checkpoint is linked to the chain tip and stock moves
//! Part B: blank fields and unknown products are rejected before hashing
//! Part C: an edited event is caught, with the index and kind of break

use tracechain_contracts::{
    error::TraceResult,
    product::{CheckpointInput, EventData, EventStatus, StakeholderType, SupplyChainEvent},
};
use tracechain_core::{traits::ProductStore, RollingChecksum};
use tracechain_ledger::{chain::expected_hash, find_first_break, verify_blockchain_integrity};

use crate::mock_data::sample_store;

/// The in-transit sample product the scenario delivers.
const TRACKED_PRODUCT: &str = "PROD_0002";

/// Run Scenario 1: Product Tracking.
pub fn run_scenario() -> TraceResult<()> {
    println!("=== Scenario 1: Product Tracking ===");
    println!();

    let store = sample_store();
    let summary = store.summary()?;
    println!("  Inventory:      {} products", summary.total_products);
    println!("  In transit:     {}", summary.in_transit);
    println!("  Delivered:      {}", summary.delivered);
    println!(
        "  Authenticity:   {:.0}% ({} alert(s))",
        summary.authenticity_percent, summary.alerts
    );
    println!("  Units in stock: {}", summary.total_stock);
    println!("  Chain hasher:   {}", store.hasher_name());
    println!();

    // ── Part A: record a delivery ────────────────────────────────────────────

    let before = store.get(TRACKED_PRODUCT)?;
    println!("  Part A: Record delivery of {}", before.id);
    println!("  Current status:   {} @ {}", before.current_status, before.current_location);
    println!("  Chain tip:        {}", before.tip_hash());
    println!("  Stock:            {}", before.current_stock);

    let event = store.record_checkpoint(
        TRACKED_PRODUCT,
        CheckpointInput {
            status: EventStatus::Delivered,
            location: "Walmart Store #1234".to_string(),
            stakeholder: "Walmart".to_string(),
            stakeholder_type: StakeholderType::Retailer,
            data: EventData::new()
                .with_temperature(21.0)
                .with_humidity(48.0)
                .with_notes("Received at loading dock 3")
                .with_stock_change(-25),
        },
    )?;

    let after = store.get(TRACKED_PRODUCT)?;
    println!("  New event:        {} (previous {})", event.hash, event.previous_hash);
    if let (Some(celsius), Some(percent)) = (event.data.temperature(), event.data.humidity()) {
        println!("  Conditions:       {celsius:.1} C, {percent:.0}% RH");
    }
    if let Some(notes) = event.data.notes() {
        println!("  Notes:            {notes}");
    }
    println!("  Linked to tip:    {}", event.previous_hash == before.tip_hash());
    println!("  Status now:       {} @ {}", after.current_status, after.current_location);
    println!("  Stock now:        {}", after.current_stock);
    println!("  Chain integrity:  {}", pass_fail(store.verify_integrity(TRACKED_PRODUCT)?));
    println!();

    // ── Part B: rejected checkpoints ─────────────────────────────────────────

    println!("  Part B: Rejected checkpoints");
    let blank = CheckpointInput {
        status: EventStatus::Warehoused,
        location: "Central Warehouse".to_string(),
        stakeholder: "   ".to_string(),
        stakeholder_type: StakeholderType::Warehouse,
        data: EventData::new(),
    };
    match store.record_checkpoint(TRACKED_PRODUCT, blank.clone()) {
        Ok(event) => println!("  UNEXPECTED: blank stakeholder accepted as {}", event.hash),
        Err(e) => println!("  Blank stakeholder → REJECTED: {}", e),
    }
    match store.record_checkpoint("PROD_9999", blank) {
        Ok(event) => println!("  UNEXPECTED: unknown product accepted as {}", event.hash),
        Err(e) => println!("  Unknown product   → REJECTED: {}", e),
    }
    println!();

    // ── Part C: tamper detection ─────────────────────────────────────────────

    println!("  Part C: Tamper detection on {}", after.id);
    let mut events = after.events.clone();
    events[1].location = "Unlisted Depot".to_string();
    report_break("Edited location", &events);

    let mut events = after.events.clone();
    events[1].location = "Unlisted Depot".to_string();
    events[1].hash = expected_hash(&events[1], &RollingChecksum);
    report_break("Edited and rehashed", &events);

    let truncated = after.events[1..].to_vec();
    println!(
        "  {:<22} {}",
        "First event dropped:",
        pass_fail(verify_blockchain_integrity(&truncated))
    );
    println!("  (the first stored event is never checked against its own hash)");
    println!();

    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}

fn report_break(title: &str, events: &[SupplyChainEvent]) {
    match find_first_break(events, &RollingChecksum) {
        Some(found) => println!(
            "  {:<22} FAIL ({:?} at event {})",
            format!("{title}:"),
            found.kind,
            found.index
        ),
        None => println!("  {:<22} PASS", format!("{title}:")),
    }
}

fn pass_fail(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}
