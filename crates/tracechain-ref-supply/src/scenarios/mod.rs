//! Supply-chain reference runtime demo scenarios.
//!
//! Each scenario wires real TRACECHAIN components (product store, chain
//! verification, block log, claim extraction and verification) to the
//! hardcoded sample data and prints what happens.

pub mod blockchain_log;
pub mod claim_verification;
pub mod product_tracking;
