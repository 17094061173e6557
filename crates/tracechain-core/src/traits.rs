//! Core trait definitions for the TRACECHAIN engines.
//!
//! These traits mark every seam where a collaborator can be swapped:
//!
//! - `ChainHasher`        : digest used to link events (checksum or SHA-256)
//! - `RegistryLookup`     : trusted reference values claims are checked against
//! - `ClaimExtractor`     : free text → claim record (regex or model-backed)
//! - `CompletionTransport`: the host's connection to a text-completion service
//! - `ProductStore`       : persistence collaborator owning product chains
//!
//! The engines only ever see these traits, never a concrete backend.

use tracechain_contracts::{
    claim::ClaimRecord,
    completion::CompletionRequest,
    error::TraceResult,
    product::{CheckpointInput, Product, SupplyChainEvent},
};

/// Digest used to link one event to the next.
///
/// Implementations must be deterministic: the same input always yields the
/// same string, or previously built chains stop verifying.
pub trait ChainHasher: Send + Sync {
    /// Digest `data` (the canonical payload concatenated with the previous
    /// hash) into a printable string.
    fn digest(&self, data: &str) -> String;

    /// Stable identifier for logs and configuration.
    fn name(&self) -> &'static str;
}

/// The trusted reference set claims are verified against.
///
/// Implementations are read-only for their whole lifetime.  The in-tree
/// implementation is a TOML-backed set; an on-chain indexer or database
/// could stand in without touching verification logic.
pub trait RegistryLookup: Send + Sync {
    /// Issuer membership; the only case-insensitive check.
    fn has_issuer(&self, issuer: &str) -> bool;

    fn has_product_id(&self, product_id: &str) -> bool;

    fn has_batch(&self, batch: &str) -> bool;

    fn has_issue_date(&self, date: &str) -> bool;
}

/// Turns unstructured certificate text into a `ClaimRecord`.
pub trait ClaimExtractor: Send + Sync {
    /// Extract a claim record from `text`.
    ///
    /// The deterministic implementation never fails.  Best-effort
    /// implementations return `Err` so a fallback wrapper can take over.
    fn extract(&self, text: &str) -> TraceResult<ClaimRecord>;
}

/// A single prompt → completion round trip supplied by the host.
///
/// The toolkit performs no network I/O itself; a host that wants
/// model-backed extraction or explanations provides this transport.
pub trait CompletionTransport: Send + Sync {
    /// Send `request` and return the raw response body.
    ///
    /// Any failure (unreachable endpoint, non-success status, timeout) is an
    /// `Err`; callers fall back to deterministic output.
    fn complete(&self, request: &CompletionRequest) -> TraceResult<String>;
}

/// The persistence collaborator that owns product records.
///
/// Whatever the backend, `current_stock` must be recomputed from the
/// events on every load; stored values are never trusted.
pub trait ProductStore: Send + Sync {
    /// Every product, with derived fields recomputed.
    fn load_all(&self) -> TraceResult<Vec<Product>>;

    /// One product by id, with derived fields recomputed.
    fn get(&self, product_id: &str) -> TraceResult<Product>;

    /// Insert or replace a product.
    fn upsert(&self, product: Product) -> TraceResult<()>;

    /// Append a checkpoint to a product's chain, linking it to the current
    /// tip, and return the created event.
    fn record_checkpoint(
        &self,
        product_id: &str,
        checkpoint: CheckpointInput,
    ) -> TraceResult<SupplyChainEvent>;
}
