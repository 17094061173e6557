//! In-memory implementation of `ProductStore`.
//!
//! `InMemoryProductStore` is the reference persistence collaborator.  It
//! keeps products in a `Vec` behind a `Mutex`, appends checkpoints to the
//! owning product's chain, and recomputes `current_stock` on every load so
//! a stale stored value can never leak out.
//!
//! JSON snapshots (`from_json` / `to_json`) use the same camelCase layout
//! browser front-ends write to local storage.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info};

use tracechain_contracts::{
    error::{TraceError, TraceResult},
    product::{CheckpointInput, EventStatus, Product, SupplyChainEvent},
};
use tracechain_core::{
    traits::{ChainHasher, ProductStore},
    RollingChecksum,
};

use crate::{
    block::{build_block_log, BlockLog},
    chain::verify_chain_with,
    event::EventDraft,
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct StoreState {
    /// Products in insertion order.
    pub(crate) products: Vec<Product>,
}

// ── Dashboard counters ────────────────────────────────────────────────────────

/// Headline counters over a set of products.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_products: usize,
    pub in_transit: usize,
    pub delivered: usize,
    /// Share of products flagged authentic, 0–100.  Zero when empty.
    pub authenticity_percent: f64,
    /// Products flagged not authentic.
    pub alerts: usize,
    pub total_stock: i64,
}

impl InventorySummary {
    pub fn from_products(products: &[Product]) -> Self {
        let total_products = products.len();
        let count_status =
            |status: EventStatus| products.iter().filter(|p| p.current_status == status).count();
        let authentic = products.iter().filter(|p| p.authenticity).count();
        let authenticity_percent = if total_products > 0 {
            authentic as f64 / total_products as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_products,
            in_transit: count_status(EventStatus::InTransit),
            delivered: count_status(EventStatus::Delivered),
            authenticity_percent,
            alerts: total_products - authentic,
            total_stock: products
                .iter()
                .map(Product::computed_stock)
                .fold(0i64, i64::saturating_add),
        }
    }
}

// ── Public store ──────────────────────────────────────────────────────────────

/// An in-memory product store whose chains are linked with a configurable
/// hasher (the rolling checksum by default).
pub struct InMemoryProductStore {
    pub(crate) state: Arc<Mutex<StoreState>>,
    hasher: Box<dyn ChainHasher>,
}

impl InMemoryProductStore {
    /// An empty store using the rolling checksum.
    pub fn new() -> Self {
        Self::with_hasher(Box::new(RollingChecksum))
    }

    pub fn with_hasher(hasher: Box<dyn ChainHasher>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState { products: Vec::new() })),
            hasher,
        }
    }

    /// Seed the store.  Stock is recomputed for every product.
    pub fn from_products(mut products: Vec<Product>) -> Self {
        for product in &mut products {
            product.recompute_stock();
        }
        Self {
            state: Arc::new(Mutex::new(StoreState { products })),
            hasher: Box::new(RollingChecksum),
        }
    }

    /// Load a JSON array of products, as exported by `to_json`.
    pub fn from_json(json: &str) -> TraceResult<Self> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|e| TraceError::StoreFailure {
                reason: format!("failed to parse product snapshot: {e}"),
            })?;
        info!(product_count = products.len(), "product snapshot loaded");
        Ok(Self::from_products(products))
    }

    /// Export every product as a JSON array.
    pub fn to_json(&self) -> TraceResult<String> {
        let products = self.load_all()?;
        serde_json::to_string(&products).map_err(|e| TraceError::StoreFailure {
            reason: format!("failed to serialize product snapshot: {e}"),
        })
    }

    /// Whether the stored chain of `product_id` verifies with this store's
    /// hasher.
    pub fn verify_integrity(&self, product_id: &str) -> TraceResult<bool> {
        let product = self.get(product_id)?;
        Ok(verify_chain_with(&product.events, self.hasher.as_ref()))
    }

    pub fn summary(&self) -> TraceResult<InventorySummary> {
        Ok(InventorySummary::from_products(&self.load_all()?))
    }

    pub fn block_log(&self, block_size: usize) -> TraceResult<BlockLog> {
        Ok(build_block_log(&self.load_all()?, block_size))
    }

    pub fn hasher_name(&self) -> &'static str {
        self.hasher.name()
    }

    fn lock(&self) -> TraceResult<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|e| TraceError::StoreFailure {
            reason: format!("product store lock poisoned: {e}"),
        })
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── ProductStore impl ─────────────────────────────────────────────────────────

impl ProductStore for InMemoryProductStore {
    fn load_all(&self) -> TraceResult<Vec<Product>> {
        let state = self.lock()?;
        Ok(state
            .products
            .iter()
            .cloned()
            .map(|mut p| {
                p.recompute_stock();
                p
            })
            .collect())
    }

    fn get(&self, product_id: &str) -> TraceResult<Product> {
        let state = self.lock()?;
        let mut product = state
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| TraceError::ProductNotFound {
                product_id: product_id.to_string(),
            })?;
        product.recompute_stock();
        Ok(product)
    }

    fn upsert(&self, mut product: Product) -> TraceResult<()> {
        product.recompute_stock();
        let mut state = self.lock()?;
        match state.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                debug!(product_id = %product.id, "product replaced");
                *existing = product;
            }
            None => {
                debug!(product_id = %product.id, "product added");
                state.products.push(product);
            }
        }
        Ok(())
    }

    /// Append a checkpoint to the product's chain.
    ///
    /// Rejects blank `location` or `stakeholder` before touching the chain.
    /// The new event links to the current tip (or the genesis sentinel), and
    /// the product's status, location and stock follow the new event.
    fn record_checkpoint(
        &self,
        product_id: &str,
        checkpoint: CheckpointInput,
    ) -> TraceResult<SupplyChainEvent> {
        if checkpoint.location.trim().is_empty() {
            return Err(TraceError::InvalidCheckpoint {
                reason: "location is required".to_string(),
            });
        }
        if checkpoint.stakeholder.trim().is_empty() {
            return Err(TraceError::InvalidCheckpoint {
                reason: "stakeholder is required".to_string(),
            });
        }

        let mut state = self.lock()?;
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| TraceError::ProductNotFound {
                product_id: product_id.to_string(),
            })?;

        let previous_hash = product.tip_hash().to_string();
        let event = EventDraft::from_checkpoint(product_id, checkpoint)
            .seal(&previous_hash, self.hasher.as_ref());

        product.current_status = event.status;
        product.current_location = event.location.clone();
        product.events.push(event.clone());
        product.recompute_stock();

        info!(
            product_id = %product_id,
            status = %event.status,
            hash = %event.hash,
            previous_hash = %event.previous_hash,
            event_count = product.events.len(),
            "checkpoint recorded"
        );

        Ok(event)
    }
}
