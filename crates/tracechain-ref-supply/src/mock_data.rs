//! Simulated supply-chain data for the TRACECHAIN reference runtime.
//!
//! All data in this module is hardcoded and fictional.  Products are built
//! from fixed timestamps so every run produces the same event hashes; only
//! event ids (random suffixes) differ between runs.

use chrono::{DateTime, Days};
use tracing::debug;

use tracechain_contracts::product::{
    EventData, EventStatus, GeoPoint, Product, StakeholderType, SupplyChainEvent,
};
use tracechain_core::RollingChecksum;
use tracechain_ledger::{EventDraft, InMemoryProductStore};

// ── Catalogue ────────────────────────────────────────────────────────────────

pub const SAMPLE_PRODUCT_COUNT: usize = 10;

/// 2024-01-01T00:00:00Z in milliseconds.
pub const BASE_TIMESTAMP: i64 = 1_704_067_200_000;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const STAGE_MS: i64 = 6 * 60 * 60 * 1000;

const CATEGORIES: [&str; 5] = [
    "Electronics",
    "Food & Beverage",
    "Pharmaceuticals",
    "Clothing",
    "Home & Garden",
];

const MANUFACTURERS: [&str; 5] = [
    "TechCorp",
    "FreshFoods Inc",
    "PharmaSafe",
    "StyleWear",
    "HomeGoods Ltd",
];

/// How many checkpoints each sample product has reached (1 = manufactured
/// only, 4 = delivered).
const JOURNEY_LENGTHS: [usize; SAMPLE_PRODUCT_COUNT] = [4, 3, 2, 1, 4, 3, 2, 3, 1, 2];

/// The one sample product flagged as not authentic.
pub const COUNTERFEIT_PRODUCT_ID: &str = "PROD_0007";

struct Leg {
    status: EventStatus,
    location: &'static str,
    stakeholder: &'static str,
    stakeholder_type: StakeholderType,
    temperature: f64,
    humidity: f64,
    origin: GeoPoint,
}

/// Checkpoints after manufacturing, in journey order.
const ONWARD_LEGS: [Leg; 3] = [
    Leg {
        status: EventStatus::Warehoused,
        location: "Central Warehouse",
        stakeholder: "WareHouse Co",
        stakeholder_type: StakeholderType::Warehouse,
        temperature: 20.0,
        humidity: 50.0,
        origin: GeoPoint { lat: 40.758, lng: -73.9855 },
    },
    Leg {
        status: EventStatus::InTransit,
        location: "Highway 101",
        stakeholder: "FastShip Logistics",
        stakeholder_type: StakeholderType::Transporter,
        temperature: 18.0,
        humidity: 55.0,
        origin: GeoPoint { lat: 40.7489, lng: -73.968 },
    },
    Leg {
        status: EventStatus::Delivered,
        location: "Walmart Store #1234",
        stakeholder: "Walmart",
        stakeholder_type: StakeholderType::Retailer,
        temperature: 21.0,
        humidity: 48.0,
        origin: GeoPoint { lat: 40.7831, lng: -73.9712 },
    },
];

// ── Products ─────────────────────────────────────────────────────────────────

/// The ten sample products, `PROD_0001` to `PROD_0010`.
pub fn sample_products() -> Vec<Product> {
    (1..=SAMPLE_PRODUCT_COUNT).map(sample_product).collect()
}

/// A store seeded with `sample_products()`.
pub fn sample_store() -> InMemoryProductStore {
    InMemoryProductStore::from_products(sample_products())
}

fn sample_product(index: usize) -> Product {
    let slot = (index - 1) % CATEGORIES.len();
    let category = CATEGORIES[slot];
    let manufacturer = MANUFACTURERS[slot];
    let id = format!("PROD_{index:04}");
    let factory = format!("{manufacturer} Factory");

    let started = BASE_TIMESTAMP + (index as i64 - 1) * DAY_MS;
    let initial_stock = 50 + (index as i64 * 37) % 200;
    let drift = index as f64 * 0.25;

    let mut drafts = vec![EventDraft::new(
        &id,
        EventStatus::Manufactured,
        factory.as_str(),
        manufacturer,
        StakeholderType::Manufacturer,
    )
    .with_data(
        EventData::new()
            .with_temperature(22.0)
            .with_humidity(45.0)
            .with_coordinates(GeoPoint {
                lat: 40.7128 + drift,
                lng: -74.006 + drift,
            })
            .with_stock_change(initial_stock),
    )];

    for leg in ONWARD_LEGS.iter().take(JOURNEY_LENGTHS[index - 1] - 1) {
        let mut data = EventData::new()
            .with_temperature(leg.temperature)
            .with_humidity(leg.humidity)
            .with_coordinates(GeoPoint {
                lat: leg.origin.lat + drift,
                lng: leg.origin.lng + drift,
            });
        if leg.status == EventStatus::Delivered {
            data = data.with_stock_change(-(initial_stock / 3 + 1));
        }
        drafts.push(
            EventDraft::new(
                &id,
                leg.status,
                leg.location,
                leg.stakeholder,
                leg.stakeholder_type,
            )
            .with_data(data),
        );
    }

    let mut events: Vec<SupplyChainEvent> = Vec::with_capacity(drafts.len());
    for (step, draft) in drafts.into_iter().enumerate() {
        let previous_hash = events
            .last()
            .map(|e| e.hash.clone())
            .unwrap_or_else(|| SupplyChainEvent::GENESIS_HASH.to_string());
        let timestamp = started + step as i64 * STAGE_MS;
        events.push(draft.seal_at(&previous_hash, timestamp, &RollingChecksum));
    }

    let made = DateTime::from_timestamp_millis(started).map(|t| t.date_naive());
    let expiry_date = if matches!(category, "Food & Beverage" | "Pharmaceuticals") {
        made.and_then(|d| d.checked_add_days(Days::new(365)))
            .map(|d| d.format("%Y-%m-%d").to_string())
    } else {
        None
    };

    let (current_status, current_location) = events
        .last()
        .map(|e| (e.status, e.location.clone()))
        .unwrap_or((EventStatus::Manufactured, factory));

    let batch_number = format!("BATCH_{}", tracechain_core::generate_hash(&id).to_uppercase());
    let authenticity = id != COUNTERFEIT_PRODUCT_ID;

    let mut product = Product {
        id,
        name: format!("{category} Product {index}"),
        category: category.to_string(),
        manufacturer: manufacturer.to_string(),
        manufacturing_date: made
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        expiry_date,
        batch_number,
        authenticity,
        current_status,
        current_location,
        current_stock: 0,
        events,
    };
    product.recompute_stock();

    debug!(
        product_id = %product.id,
        event_count = product.events.len(),
        stock = product.current_stock,
        tip = %product.tip_hash(),
        "sample product built"
    );
    product
}

// ── Certificates ─────────────────────────────────────────────────────────────

/// A certificate as a user would paste it.
#[derive(Debug, Clone, Copy)]
pub struct SampleCertificate {
    pub title: &'static str,
    pub text: &'static str,
}

/// Labelled fields that all match the demo registry.
pub const GENUINE_CERTIFICATE: &str =
    "Issuer: Acme Pharma Ltd\nProduct ID: PC-100\nBatch Number: BATCH-9999\nIssue Date: 2024-01-01";

/// A scanned certificate with CRLF line endings, list markers and a
/// slash-separated date the registry does not hold.
pub const SCANNED_CERTIFICATE: &str = "Certificate of Analysis\r\nIssued by: Acme Pharma Ltd\r\n\
Product ID: PC-200\r\nBatch No. BATCH 9999\r\nDate: 2024/01/01\r\n\r\n\
1. This product meets USP standards.\r\n2) Contains no lactose\r\n\
- Stored below 25C for the full duration of transport\r\nOK\r\n";

/// An issuer that is not on record.
pub const COUNTERFEIT_CERTIFICATE: &str = "Manufacturer: Unknown Co\nProduct: PC-999\n\
Batch: BATCH-0001\nManufactured on: March 5, 2024\nThe product is sterile.";

/// A known issuer and nothing else checkable.
pub const SPARSE_CERTIFICATE: &str =
    "\tIssuer:\tAcme Pharma Ltd\n\tThe\tpackaging   is tamper-evident\n";

pub const SAMPLE_CERTIFICATES: [SampleCertificate; 4] = [
    SampleCertificate {
        title: "Genuine certificate",
        text: GENUINE_CERTIFICATE,
    },
    SampleCertificate {
        title: "Scanned certificate",
        text: SCANNED_CERTIFICATE,
    },
    SampleCertificate {
        title: "Counterfeit certificate",
        text: COUNTERFEIT_CERTIFICATE,
    },
    SampleCertificate {
        title: "Sparse certificate",
        text: SPARSE_CERTIFICATE,
    },
];

/// Claim JSON as edited by hand, using the alternate key spellings.
pub const EDITED_CLAIM_JSON: &str = r#"{
  "issuer": "Acme Pharma Ltd",
  "product_or_document": "Paracetamol 500mg (PC-200)",
  "batch": "batch 9999",
  "issued_date": "2024-01-01",
  "claims": ["Stored below 25C"]
}"#;

/// Claim JSON whose `claims` is not a list.
pub const MALFORMED_CLAIM_JSON: &str = r#"{"issuer": "Acme Pharma Ltd", "claims": "sterile"}"#;
