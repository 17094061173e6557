//! # tracechain-contracts
//!
//! Shared types and error contracts for the TRACECHAIN provenance toolkit.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only data definitions and error types.

pub mod claim;
pub mod completion;
pub mod error;
pub mod product;
pub mod verdict;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use claim::{CertificateFields, ClaimRecord};
    use error::TraceError;
    use product::{
        json_number, EventData, EventStatus, GeoPoint, Product, StakeholderType, SupplyChainEvent,
    };
    use verdict::{ClaimRow, RowKind, VerificationResult, VerificationStatus};

    fn make_event(stock_change: Option<i64>) -> SupplyChainEvent {
        let mut data = EventData::new().with_temperature(21.0);
        if let Some(delta) = stock_change {
            data = data.with_stock_change(delta);
        }
        SupplyChainEvent {
            id: "event_1_abc".to_string(),
            product_id: "PROD_0001".to_string(),
            timestamp: 1_700_000_000_000,
            location: "Central Warehouse".to_string(),
            status: EventStatus::Warehoused,
            stakeholder: "WareHouse Co".to_string(),
            stakeholder_type: StakeholderType::Warehouse,
            hash: "0000abcd".to_string(),
            previous_hash: SupplyChainEvent::GENESIS_HASH.to_string(),
            data,
        }
    }

    fn make_product(events: Vec<SupplyChainEvent>) -> Product {
        Product {
            id: "PROD_0001".to_string(),
            name: "Electronics Product 1".to_string(),
            category: "Electronics".to_string(),
            manufacturer: "TechCorp".to_string(),
            batch_number: "BATCH_AB12CD34".to_string(),
            manufacturing_date: "2024-01-01".to_string(),
            expiry_date: None,
            authenticity: true,
            current_status: EventStatus::Warehoused,
            current_location: "Central Warehouse".to_string(),
            current_stock: 0,
            events,
        }
    }

    // ── Categorical wire names ───────────────────────────────────────────────

    #[test]
    fn event_status_uses_kebab_case_on_the_wire() {
        assert_eq!(serde_json::to_string(&EventStatus::InTransit).unwrap(), "\"in-transit\"");
        let decoded: EventStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(decoded, EventStatus::Delivered);
        assert_eq!("in-transit".parse::<EventStatus>().unwrap(), EventStatus::InTransit);
        assert!("shipped".parse::<EventStatus>().is_err());
    }

    #[test]
    fn stakeholder_type_uses_lowercase_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&StakeholderType::Transporter).unwrap(),
            "\"transporter\""
        );
        assert_eq!(StakeholderType::Retailer.to_string(), "retailer");
    }

    #[test]
    fn verification_status_uses_display_labels() {
        assert_eq!(
            serde_json::to_string(&VerificationStatus::PartiallyVerified).unwrap(),
            "\"Partially Verified\""
        );
        assert_eq!(VerificationStatus::Fake.to_string(), "Fake");
    }

    #[test]
    fn claim_row_serializes_kind_as_type() {
        let row = ClaimRow {
            kind: RowKind::Meta,
            label: "Issuer: Acme Pharma Ltd".to_string(),
            hash: "ab".to_string(),
            status: VerificationStatus::Verified,
            details: "Issuer recognized".to_string(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["type"], "meta");
        assert_eq!(value["status"], "Verified");
    }

    // ── Event data ───────────────────────────────────────────────────────────

    #[test]
    fn json_number_renders_integral_floats_without_fraction() {
        assert_eq!(json_number(22.0).to_string(), "22");
        assert_eq!(json_number(40.7128).to_string(), "40.7128");
        assert_eq!(json_number(-3.0).to_string(), "-3");
        assert!(json_number(f64::NAN).is_null());
    }

    #[test]
    fn event_data_preserves_insertion_order() {
        let data = EventData::new()
            .with_notes("fragile")
            .with_temperature(18.5)
            .with_coordinates(GeoPoint { lat: 40.0, lng: -74.25 });
        let keys: Vec<&str> = data.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["notes", "temperature", "coordinates"]);
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"notes":"fragile","temperature":18.5,"coordinates":{"lat":40,"lng":-74.25}}"#
        );
        assert_eq!(data.coordinates(), Some(GeoPoint { lat: 40.0, lng: -74.25 }));
        assert_eq!(data.temperature(), Some(18.5));
        assert_eq!(data.notes(), Some("fragile"));
        assert_eq!(data.humidity(), None);
        assert_eq!(EventData::new().with_humidity(45.0).humidity(), Some(45.0));
    }

    #[test]
    fn event_data_stock_change_defaults_to_zero() {
        assert_eq!(EventData::new().stock_change(), 0);
        assert_eq!(EventData::new().with_stock_change(-12).stock_change(), -12);
        assert_eq!(EventData::new().with("stockChange", json!(7.0)).stock_change(), 7);
        assert_eq!(EventData::new().with("stockChange", json!("ten")).stock_change(), 0);
    }

    // ── Products ─────────────────────────────────────────────────────────────

    #[test]
    fn product_stock_is_derived_from_events() {
        let mut product = make_product(vec![
            make_event(Some(120)),
            make_event(None),
            make_event(Some(-20)),
        ]);
        product.current_stock = 9999;
        product.recompute_stock();
        assert_eq!(product.current_stock, 100);
    }

    #[test]
    fn product_tip_hash_falls_back_to_genesis() {
        let empty = make_product(vec![]);
        assert_eq!(empty.tip_hash(), SupplyChainEvent::GENESIS_HASH);

        let product = make_product(vec![make_event(None)]);
        assert_eq!(product.tip_hash(), "0000abcd");
    }

    #[test]
    fn event_round_trips_through_camel_case_json() {
        let event = make_event(Some(5));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["productId"], "PROD_0001");
        assert_eq!(json["stakeholderType"], "warehouse");
        assert_eq!(json["previousHash"], "00000000");
        let decoded: SupplyChainEvent = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, event);
    }

    // ── Claims ───────────────────────────────────────────────────────────────

    #[test]
    fn claim_record_serializes_with_front_end_keys() {
        let record = ClaimRecord {
            issuer: "Acme Pharma Ltd".to_string(),
            product_id: "PC-100".to_string(),
            ..ClaimRecord::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["productId"], "PC-100");
        assert_eq!(value["batchNumber"], "");
        assert!(value["claims"].as_array().unwrap().is_empty());
        assert!(value.get("source").is_none());
        assert!(ClaimRecord::default().is_empty());
        assert!(!record.is_empty());
    }

    #[test]
    fn certificate_completeness() {
        let mut fields = CertificateFields {
            issuer: "Acme Pharma Ltd".to_string(),
            product_id: "PC-100".to_string(),
            batch_number: "BATCH-9999".to_string(),
            issue_date: "2024-01-01".to_string(),
        };
        assert!(fields.is_complete());
        fields.batch_number.clear();
        assert!(!fields.is_complete());
    }

    #[test]
    fn verification_result_constructor() {
        let result = VerificationResult::new(
            VerificationStatus::Verified,
            vec!["All checks passed".to_string()],
        );
        assert_eq!(result.status, VerificationStatus::Verified);
        assert_eq!(result.reasons, vec!["All checks passed"]);
    }

    // ── Error display messages ───────────────────────────────────────────────

    #[test]
    fn error_invalid_claim_json_display() {
        let err = TraceError::InvalidClaimJson {
            reason: "expected value at line 1 column 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid claim JSON"));
        assert!(msg.contains("line 1 column 1"));
    }

    #[test]
    fn error_product_not_found_display() {
        let err = TraceError::ProductNotFound {
            product_id: "PROD_0042".to_string(),
        };
        assert_eq!(err.to_string(), "product 'PROD_0042' not found");
    }

    #[test]
    fn error_transport_unavailable_display() {
        let err = TraceError::TransportUnavailable {
            reason: "endpoint not configured".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("completion transport unavailable"));
        assert!(msg.contains("endpoint not configured"));
    }

    #[test]
    fn error_serialization_failure_display() {
        let err = TraceError::SerializationFailure {
            what: "claim report".to_string(),
            reason: "key must be a string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not serialize claim report: key must be a string"
        );
    }

    // ── Completion requests ──────────────────────────────────────────────────

    /// The wire body carries model, prompt and token limit; the key only
    /// travels in the header.
    #[test]
    fn completion_request_body_omits_key() {
        let request = completion::CompletionRequest {
            endpoint: "https://llm.internal/v1/complete".to_string(),
            api_key: "sk-secret".to_string(),
            model: "gemini-pro".to_string(),
            prompt: "Explain".to_string(),
            max_output_tokens: 400,
        };
        assert_eq!(
            request.body(),
            json!({"model": "gemini-pro", "prompt": "Explain", "max_output_tokens": 400})
        );
        assert_eq!(request.authorization(), "Bearer sk-secret");
        let serialized = serde_json::to_string(&request).unwrap();
        assert!(!serialized.contains("sk-secret"));
    }
}
