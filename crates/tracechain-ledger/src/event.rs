//! Event construction.
//!
//! `EventDraft` holds the caller-supplied fields of a checkpoint.  Sealing a
//! draft stamps it with a timestamp and id, links it to the previous hash
//! and computes its own hash.  Sealing never fails, even for empty strings.

use chrono::Utc;
use uuid::Uuid;

use tracechain_contracts::product::{
    CheckpointInput, EventData, EventStatus, StakeholderType, SupplyChainEvent,
};
use tracechain_core::{traits::ChainHasher, RollingChecksum};

use crate::chain::{canonical_payload, link_hash};

/// The unsealed content of a checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub product_id: String,
    pub status: EventStatus,
    pub location: String,
    pub stakeholder: String,
    pub stakeholder_type: StakeholderType,
    pub data: EventData,
}

impl EventDraft {
    pub fn new(
        product_id: impl Into<String>,
        status: EventStatus,
        location: impl Into<String>,
        stakeholder: impl Into<String>,
        stakeholder_type: StakeholderType,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            status,
            location: location.into(),
            stakeholder: stakeholder.into(),
            stakeholder_type,
            data: EventData::new(),
        }
    }

    pub fn from_checkpoint(product_id: impl Into<String>, checkpoint: CheckpointInput) -> Self {
        Self {
            product_id: product_id.into(),
            status: checkpoint.status,
            location: checkpoint.location,
            stakeholder: checkpoint.stakeholder,
            stakeholder_type: checkpoint.stakeholder_type,
            data: checkpoint.data,
        }
    }

    pub fn with_data(mut self, data: EventData) -> Self {
        self.data = data;
        self
    }

    /// Seal the draft at an explicit time with an explicit hasher.
    pub fn seal_at(
        self,
        previous_hash: &str,
        timestamp: i64,
        hasher: &dyn ChainHasher,
    ) -> SupplyChainEvent {
        let payload = canonical_payload(
            &self.product_id,
            timestamp,
            &self.location,
            self.status,
            &self.stakeholder,
            self.stakeholder_type,
            &self.data,
        );
        let hash = link_hash(&payload, previous_hash, hasher);

        SupplyChainEvent {
            id: new_event_id(timestamp),
            product_id: self.product_id,
            timestamp,
            location: self.location,
            status: self.status,
            stakeholder: self.stakeholder,
            stakeholder_type: self.stakeholder_type,
            hash,
            previous_hash: previous_hash.to_string(),
            data: self.data,
        }
    }

    /// Seal the draft now, reading the wall clock once.
    pub fn seal(self, previous_hash: &str, hasher: &dyn ChainHasher) -> SupplyChainEvent {
        self.seal_at(previous_hash, Utc::now().timestamp_millis(), hasher)
    }
}

/// `event_<millis>_<9 random hex chars>`.  Collisions are unlikely, not
/// impossible.
fn new_event_id(timestamp: i64) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("event_{}_{}", timestamp, &suffix[..9])
}

/// Create a checkpoint linked to `previous_hash` using the rolling checksum.
///
/// Pass `SupplyChainEvent::GENESIS_HASH` for a product's first event.
pub fn create_supply_chain_event(
    product_id: &str,
    status: EventStatus,
    location: &str,
    stakeholder: &str,
    stakeholder_type: StakeholderType,
    previous_hash: &str,
    data: EventData,
) -> SupplyChainEvent {
    EventDraft::new(product_id, status, location, stakeholder, stakeholder_type)
        .with_data(data)
        .seal(previous_hash, &RollingChecksum)
}
