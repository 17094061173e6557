//! Hash-chain primitives: canonical payloads and chain verification.
//!
//! Hash input for an event is the canonical payload string immediately
//! followed by the event's `previous_hash`:
//!
//!   1. `productId`, `timestamp`, `location`, `status`, `stakeholder`,
//!      `stakeholderType`, in exactly this order
//!   2. every `data` key, spread in its insertion order (a key that
//!      collides with a base field replaces that value in place)
//!
//! Keys are NOT sorted.  Field order is part of the hash input, which is the
//! opposite discipline from claim hashing in `tracechain-verify`.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use tracechain_contracts::product::{EventData, EventStatus, StakeholderType, SupplyChainEvent};
use tracechain_core::{traits::ChainHasher, RollingChecksum};

/// Serialize the fields an event's hash commits to.
pub fn canonical_payload(
    product_id: &str,
    timestamp: i64,
    location: &str,
    status: EventStatus,
    stakeholder: &str,
    stakeholder_type: StakeholderType,
    data: &EventData,
) -> String {
    let mut object = Map::new();
    object.insert("productId".to_string(), Value::from(product_id));
    object.insert("timestamp".to_string(), Value::from(timestamp));
    object.insert("location".to_string(), Value::from(location));
    object.insert("status".to_string(), Value::from(status.as_str()));
    object.insert("stakeholder".to_string(), Value::from(stakeholder));
    object.insert(
        "stakeholderType".to_string(),
        Value::from(stakeholder_type.as_str()),
    );
    for (key, value) in data.iter() {
        object.insert(key.clone(), value.clone());
    }
    Value::Object(object).to_string()
}

/// The canonical payload of an existing event.
pub fn event_payload(event: &SupplyChainEvent) -> String {
    canonical_payload(
        &event.product_id,
        event.timestamp,
        &event.location,
        event.status,
        &event.stakeholder,
        event.stakeholder_type,
        &event.data,
    )
}

/// Digest `payload` concatenated with `previous_hash`.
pub fn link_hash(payload: &str, previous_hash: &str, hasher: &dyn ChainHasher) -> String {
    let mut input = String::with_capacity(payload.len() + previous_hash.len());
    input.push_str(payload);
    input.push_str(previous_hash);
    hasher.digest(&input)
}

/// The hash an event should carry, recomputed from its own fields.
pub fn expected_hash(event: &SupplyChainEvent, hasher: &dyn ChainHasher) -> String {
    link_hash(&event_payload(event), &event.previous_hash, hasher)
}

/// Why a chain failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    /// `previous_hash` does not equal the predecessor's `hash`.
    LinkMismatch,
    /// `hash` does not match the recomputed digest of the event.
    HashMismatch,
}

/// The first position at which a chain fails verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainBreak {
    pub index: usize,
    pub kind: BreakKind,
}

/// Locate the first broken link, checking the same rules in the same order
/// as `verify_chain_with`.
///
/// The first event is never checked on its own: its sentinel and hash are
/// trusted, so any chain of length ≤ 1 has no break.
pub fn find_first_break(events: &[SupplyChainEvent], hasher: &dyn ChainHasher) -> Option<ChainBreak> {
    for (offset, pair) in events.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        let index = offset + 1;

        if current.previous_hash != previous.hash {
            warn!(
                product_id = %current.product_id,
                index,
                expected = %previous.hash,
                found = %current.previous_hash,
                "event chain link mismatch"
            );
            return Some(ChainBreak { index, kind: BreakKind::LinkMismatch });
        }

        let recomputed = expected_hash(current, hasher);
        if current.hash != recomputed {
            warn!(
                product_id = %current.product_id,
                index,
                stored = %current.hash,
                recomputed = %recomputed,
                "event hash mismatch"
            );
            return Some(ChainBreak { index, kind: BreakKind::HashMismatch });
        }
    }
    None
}

/// Verify a product's event chain with an explicit hasher.
///
/// Returns `true` for an empty slice.  Otherwise each event after the first
/// must link to its predecessor's hash and carry the hash recomputed from its
/// own content; the scan stops at the first mismatch.
pub fn verify_chain_with(events: &[SupplyChainEvent], hasher: &dyn ChainHasher) -> bool {
    let valid = find_first_break(events, hasher).is_none();
    debug!(
        event_count = events.len(),
        hasher = hasher.name(),
        valid,
        "event chain verified"
    );
    valid
}

/// Verify a product's event chain with the default rolling checksum.
pub fn verify_blockchain_integrity(events: &[SupplyChainEvent]) -> bool {
    verify_chain_with(events, &RollingChecksum)
}
