//! Error types for the TRACECHAIN toolkit.
//!
//! Verification verdicts are never errors: a `Fake` certificate or a broken
//! event chain is a successful evaluation with a negative outcome.  The
//! variants below cover the cases where evaluation could not happen at all
//! (bad input shape, bad configuration, missing collaborators).

use thiserror::Error;

/// The unified error type for the TRACECHAIN crates.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A claim record supplied as JSON text could not be parsed.
    #[error("invalid claim JSON: {reason}")]
    InvalidClaimJson { reason: String },

    /// The claim JSON parsed, but its structure is not a claim record
    /// (e.g. `claims` is not an array of strings).
    #[error("invalid claim record shape: {reason}")]
    InvalidClaimShape { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The product store has no product with this id.
    #[error("product '{product_id}' not found")]
    ProductNotFound { product_id: String },

    /// A checkpoint was rejected before being appended to the chain.
    #[error("invalid checkpoint: {reason}")]
    InvalidCheckpoint { reason: String },

    /// The product store could not read or write its contents.
    #[error("product store failure: {reason}")]
    StoreFailure { reason: String },

    /// A best-effort claim extractor could not produce a record.
    #[error("claim extraction failed: {reason}")]
    ExtractionFailed { reason: String },

    /// Certificate text or claim JSON could not be read from its source.
    #[error("could not read input from {source_name}: {reason}")]
    InputUnreadable { source_name: String, reason: String },

    /// A report or snapshot could not be rendered as JSON.
    #[error("could not serialize {what}: {reason}")]
    SerializationFailure { what: String, reason: String },

    /// No completion endpoint is configured or the endpoint call failed.
    #[error("completion transport unavailable: {reason}")]
    TransportUnavailable { reason: String },
}

/// Convenience alias used throughout the TRACECHAIN crates.
pub type TraceResult<T> = Result<T, TraceError>;
