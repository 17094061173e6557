//! # tracechain-ledger
//!
//! Per-product, append-only, hash-chained custody ledger.
//!
//! ## Overview
//!
//! Every checkpoint a product passes through is a `SupplyChainEvent` that
//! commits to its predecessor through `previous_hash`.  Editing any hashed
//! field of a stored event, or relinking it, is detected by
//! `verify_blockchain_integrity`.
//!
//! The default link digest is a 32-bit rolling checksum kept for
//! compatibility with existing chains.  It gives tamper-evidence against
//! accidents, not against an adversary; build stores with
//! `InMemoryProductStore::with_hasher(Box::new(Sha256Hasher))` when that
//! matters.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tracechain_ledger::{create_supply_chain_event, verify_blockchain_integrity};
//!
//! let first = create_supply_chain_event("PROD_0001", EventStatus::Manufactured,
//!     "TechCorp Factory", "TechCorp", StakeholderType::Manufacturer,
//!     SupplyChainEvent::GENESIS_HASH, EventData::new().with_stock_change(120));
//! assert!(verify_blockchain_integrity(&[first]));
//! ```

pub mod block;
pub mod chain;
pub mod event;
pub mod memory;

pub use block::{build_block_log, Block, BlockLog, DEFAULT_BLOCK_SIZE, GENESIS_BLOCK_HASH};
pub use chain::{
    canonical_payload, event_payload, find_first_break, verify_blockchain_integrity,
    verify_chain_with, BreakKind, ChainBreak,
};
pub use event::{create_supply_chain_event, EventDraft};
pub use memory::{InMemoryProductStore, InventorySummary};

// ── Tests ─────────────────────────────────────────────────────────────────────
