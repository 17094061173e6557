//! Block-log view over all product chains.
//!
//! Events from every product are sorted by timestamp and grouped into
//! fixed-size display blocks, each carrying a checksum of its event hashes
//! chained to the previous block.  This is a presentation of the per-product
//! chains, not an extra integrity layer: a block is valid exactly when the
//! chains of all products it touches verify.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use tracechain_contracts::product::{Product, SupplyChainEvent};
use tracechain_core::generate_hash_padded;

use crate::chain::verify_blockchain_integrity;

/// Events per block when the caller does not choose.
pub const DEFAULT_BLOCK_SIZE: usize = 5;

/// `previous_block_hash` of the first block.
pub const GENESIS_BLOCK_HASH: &str = "0000000000000000";

/// A display block of consecutive (by timestamp) events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// 1-based.
    pub block_number: usize,
    pub events: Vec<SupplyChainEvent>,
    pub block_hash: String,
    pub previous_block_hash: String,
    /// Timestamp of the block's first event.
    pub timestamp: i64,
    pub is_valid: bool,
}

/// All blocks plus the conjunction of their validity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockLog {
    pub blocks: Vec<Block>,
    pub overall_integrity: bool,
}

impl BlockLog {
    /// Blocks whose hash, or any event's product id, stakeholder or
    /// location, contains `query` (case-insensitive).
    pub fn search(&self, query: &str) -> Vec<&Block> {
        let needle = query.to_lowercase();
        self.blocks
            .iter()
            .filter(|block| {
                block.block_hash.to_lowercase().contains(&needle)
                    || block.events.iter().any(|event| {
                        event.product_id.to_lowercase().contains(&needle)
                            || event.stakeholder.to_lowercase().contains(&needle)
                            || event.location.to_lowercase().contains(&needle)
                    })
            })
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.blocks.iter().map(|b| b.events.len()).sum()
    }
}

/// Group every product's events into blocks of `block_size` (minimum 1).
pub fn build_block_log(products: &[Product], block_size: usize) -> BlockLog {
    let block_size = block_size.max(1);

    // First product wins when ids repeat.
    let mut chain_valid: HashMap<&str, bool> = HashMap::new();
    for product in products {
        chain_valid
            .entry(product.id.as_str())
            .or_insert_with(|| verify_blockchain_integrity(&product.events));
    }

    let mut events: Vec<&SupplyChainEvent> =
        products.iter().flat_map(|p| p.events.iter()).collect();
    events.sort_by_key(|e| e.timestamp);

    let mut blocks: Vec<Block> = Vec::new();
    for (chunk_index, chunk) in events.chunks(block_size).enumerate() {
        let hashes: Vec<&str> = chunk.iter().map(|e| e.hash.as_str()).collect();
        let block_data = serde_json::to_string(&hashes).unwrap_or_default();
        let previous_block_hash = blocks
            .last()
            .map(|b| b.block_hash.clone())
            .unwrap_or_else(|| GENESIS_BLOCK_HASH.to_string());
        let block_hash =
            generate_hash_padded(&format!("{block_data}{previous_block_hash}"), 16);

        let is_valid = chunk
            .iter()
            .all(|e| chain_valid.get(e.product_id.as_str()).copied().unwrap_or(true));

        blocks.push(Block {
            block_number: chunk_index + 1,
            events: chunk.iter().map(|e| (*e).clone()).collect(),
            block_hash,
            previous_block_hash,
            timestamp: chunk[0].timestamp,
            is_valid,
        });
    }

    let overall_integrity = blocks.iter().all(|b| b.is_valid);
    debug!(
        product_count = products.len(),
        block_count = blocks.len(),
        overall_integrity,
        "block log built"
    );

    BlockLog {
        blocks,
        overall_integrity,
    }
}
