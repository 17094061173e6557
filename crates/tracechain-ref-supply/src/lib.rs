//! # tracechain-ref-supply
//!
//! Supply-chain reference runtime for the TRACECHAIN provenance toolkit.
//!
//! Demonstrates three scenarios using mock data:
//!
//! 1. **Product Tracking**: a checkpoint appended through the product store,
//!    rejected checkpoints, and tamper detection on an edited chain.
//! 2. **Blockchain Log**: every event grouped into display blocks, before and
//!    after one product's chain is edited.
//! 3. **Claim Verification**: sample certificates extracted and verified
//!    against the demo registry, plus edited and malformed claim JSON.
//!
//! All data is hardcoded and fictional. No external API calls are made.

pub mod mock_data;
pub mod scenarios;
