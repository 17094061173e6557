//! Products and their custody checkpoints.
//!
//! A `Product` exclusively owns an ordered list of `SupplyChainEvent`s.  Each
//! event links to its predecessor through `previous_hash`, forming a
//! per-product event chain.  Field names serialize in camelCase so snapshots
//! produced by existing front-ends load unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Categorical fields ────────────────────────────────────────────────────────

/// The custody stage a checkpoint records.
///
/// This is a label, not a state machine: nothing prevents a `Delivered`
/// event from being followed by a `Manufactured` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    Manufactured,
    Warehoused,
    InTransit,
    Delivered,
    Verified,
}

impl EventStatus {
    /// The wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Manufactured => "manufactured",
            EventStatus::Warehoused => "warehoused",
            EventStatus::InTransit => "in-transit",
            EventStatus::Delivered => "delivered",
            EventStatus::Verified => "verified",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manufactured" => Ok(EventStatus::Manufactured),
            "warehoused" => Ok(EventStatus::Warehoused),
            "in-transit" => Ok(EventStatus::InTransit),
            "delivered" => Ok(EventStatus::Delivered),
            "verified" => Ok(EventStatus::Verified),
            other => Err(format!("unknown event status '{other}'")),
        }
    }
}

/// The kind of party that recorded a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakeholderType {
    Manufacturer,
    Warehouse,
    Transporter,
    Retailer,
    Customer,
}

impl StakeholderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StakeholderType::Manufacturer => "manufacturer",
            StakeholderType::Warehouse => "warehouse",
            StakeholderType::Transporter => "transporter",
            StakeholderType::Retailer => "retailer",
            StakeholderType::Customer => "customer",
        }
    }
}

impl fmt::Display for StakeholderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StakeholderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manufacturer" => Ok(StakeholderType::Manufacturer),
            "warehouse" => Ok(StakeholderType::Warehouse),
            "transporter" => Ok(StakeholderType::Transporter),
            "retailer" => Ok(StakeholderType::Retailer),
            "customer" => Ok(StakeholderType::Customer),
            other => Err(format!("unknown stakeholder type '{other}'")),
        }
    }
}

// ── Event attributes ──────────────────────────────────────────────────────────

/// Encode an `f64` the way a JavaScript `JSON.stringify` would.
///
/// Integral values become JSON integers (`22`, not `22.0`) and non-finite
/// values become `null`.  Event hashes are computed over serialized JSON, so
/// this matters for reproducing hashes of existing chains.
pub fn json_number(value: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// A geographic position attached to a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Optional checkpoint attributes.
///
/// An insertion-ordered JSON object: the keys are spread into the event's
/// canonical hash payload in the order they were added, so the order is part
/// of the event's identity.  The well-known keys are `temperature`,
/// `humidity`, `coordinates`, `notes` and `stockChange`; any other key is
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventData(Map<String, Value>);

impl EventData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a raw attribute.  Replacing keeps the key's
    /// original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_temperature(self, celsius: f64) -> Self {
        self.with("temperature", json_number(celsius))
    }

    pub fn with_humidity(self, percent: f64) -> Self {
        self.with("humidity", json_number(percent))
    }

    pub fn with_coordinates(self, point: GeoPoint) -> Self {
        let mut coords = Map::new();
        coords.insert("lat".to_string(), json_number(point.lat));
        coords.insert("lng".to_string(), json_number(point.lng));
        self.with("coordinates", Value::Object(coords))
    }

    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        self.with("notes", Value::String(notes.into()))
    }

    /// Positive for stock in, negative for stock out.
    pub fn with_stock_change(self, delta: i64) -> Self {
        self.with("stockChange", Value::from(delta))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn temperature(&self) -> Option<f64> {
        self.0.get("temperature").and_then(Value::as_f64)
    }

    pub fn humidity(&self) -> Option<f64> {
        self.0.get("humidity").and_then(Value::as_f64)
    }

    pub fn notes(&self) -> Option<&str> {
        self.0.get("notes").and_then(Value::as_str)
    }

    pub fn coordinates(&self) -> Option<GeoPoint> {
        let coords = self.0.get("coordinates")?;
        Some(GeoPoint {
            lat: coords.get("lat")?.as_f64()?,
            lng: coords.get("lng")?.as_f64()?,
        })
    }

    /// The stock delta carried by this event; absent or non-numeric is 0.
    pub fn stock_change(&self) -> i64 {
        match self.0.get("stockChange") {
            Some(v) => v
                .as_i64()
                .or_else(|| v.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            None => 0,
        }
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// ── Events and products ───────────────────────────────────────────────────────

/// A single checkpoint in a product's custody history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainEvent {
    /// Generated at creation time; practically, not globally, unique.
    pub id: String,

    /// The product this event belongs to.
    pub product_id: String,

    /// Creation time in milliseconds since the Unix epoch.  Informational;
    /// chain order is array order.
    pub timestamp: i64,

    pub location: String,

    pub status: EventStatus,

    pub stakeholder: String,

    pub stakeholder_type: StakeholderType,

    /// Digest of the canonical payload concatenated with `previous_hash`.
    pub hash: String,

    /// `hash` of the preceding event, or `GENESIS_HASH` for the first one.
    pub previous_hash: String,

    #[serde(default)]
    pub data: EventData,
}

impl SupplyChainEvent {
    /// The sentinel `previous_hash` for the first event of every product.
    pub const GENESIS_HASH: &'static str = "00000000";
}

/// A tracked product: the aggregate root owning its event chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub manufacturing_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    pub authenticity: bool,
    pub current_status: EventStatus,
    pub current_location: String,

    /// Derived from `events`.  Never trust a stored value: call
    /// `recompute_stock()` after every load.
    #[serde(default)]
    pub current_stock: i64,

    #[serde(default)]
    pub events: Vec<SupplyChainEvent>,
}

impl Product {
    /// Sum of every event's `stockChange`, saturating at the `i64` bounds.
    pub fn computed_stock(&self) -> i64 {
        self.events
            .iter()
            .fold(0i64, |stock, e| stock.saturating_add(e.data.stock_change()))
    }

    /// Overwrite `current_stock` with the value derived from the events.
    pub fn recompute_stock(&mut self) {
        self.current_stock = self.computed_stock();
    }

    /// The hash the next appended event must link to.
    pub fn tip_hash(&self) -> &str {
        self.events
            .last()
            .map(|e| e.hash.as_str())
            .unwrap_or(SupplyChainEvent::GENESIS_HASH)
    }
}

/// A new checkpoint to append to a product's chain, as submitted by a
/// scanning or data-entry front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointInput {
    pub status: EventStatus,
    pub location: String,
    pub stakeholder: String,
    pub stakeholder_type: StakeholderType,
    pub data: EventData,
}
