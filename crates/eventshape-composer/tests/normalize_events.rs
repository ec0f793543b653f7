//! End-to-end checks: inclusion spec → field map → normalized payload.

use eventshape_composer::{
    EventError, EventSchema, EventType, Inclusion, InclusionSpec, RequireFlags, SchemaCatalog,
};
use eventshape_core::fields::keys;
use eventshape_core::OptionalField;
use serde_json::{json, Value};

fn all_specs() -> Vec<InclusionSpec> {
    let states = [Inclusion::Absent, Inclusion::Optional, Inclusion::Required];
    let mut specs = vec![InclusionSpec::none()];
    for field in OptionalField::ALL {
        specs = specs
            .into_iter()
            .flat_map(|spec| states.into_iter().map(move |s| spec.with(field, s)))
            .collect();
    }
    specs
}

fn full_instance() -> Value {
    json!({
        "eventId": "evt-1",
        "timestamp": "2024-05-01T08:30:00.000Z",
        "channelType": "APP",
        "userId": "user-1",
        "device": { "os": "ios", "osVersion": "17.1", "advertisingId": "ad-1", "ip": "216.212.237.213" },
        "sessionId": "anon-1",
        "decisionTrackId": "track-1",
        "items": [{ "id": "sku1", "price": { "amount": 12.34 }, "quantity": 2, "itemGroupId": "g1", "sellerId": "s1" }],
        "revenue": { "amount": 24.68, "currency": "USD" },
        "searchQuery": "sneakers",
        "pageId": "/products/sku1",
        "referrerPageId": "/search",
        "shippingCharge": { "amount": 3 }
    })
}

#[test]
fn field_map_is_common_fields_plus_enabled_optionals() {
    for spec in all_specs() {
        let schema = EventSchema::new("PAGE_VIEW", spec).expect("schema composes");
        let names: Vec<&str> = schema.fields().keys().collect();

        let mut expected: Vec<&str> = keys::COMMON.to_vec();
        expected.extend(
            OptionalField::ALL
                .into_iter()
                .filter(|f| spec.get(*f).is_present())
                .map(OptionalField::key),
        );
        assert_eq!(names, expected, "{spec:?}");

        for field in OptionalField::ALL {
            if let Some(descriptor) = schema.fields().get(field.key()) {
                assert_eq!(descriptor.required, spec.get(field).is_required());
            }
        }
    }
}

#[test]
fn payload_keys_stay_within_the_schema() {
    let instance = full_instance();
    for spec in all_specs() {
        let schema = EventSchema::new("LAND", spec).expect("schema composes");
        let payload = schema.normalize_value(&instance).expect("full instance normalizes");
        let body = schema.to_json_body(&payload).expect("serializes");
        let body = body.as_object().expect("object body");

        for field in OptionalField::ALL {
            assert_eq!(
                body.contains_key(field.wire_key()),
                spec.get(field).is_present(),
                "{field:?} with {spec:?}"
            );
        }
        for common in ["event_type", "event_id", "timestamp", "channel_type", "user_id", "device", "session_id", "decision_track_id"] {
            assert!(body.contains_key(common), "{common}");
        }
    }
}

#[test]
fn normalizing_twice_is_byte_identical() {
    let schema = EventSchema::for_event_type(EventType::Purchase).expect("schema composes");
    let instance = full_instance();
    let first = serde_json::to_string(&schema.normalize_value(&instance).expect("ok")).expect("ser");
    let second = serde_json::to_string(&schema.normalize_value(&instance).expect("ok")).expect("ser");
    assert_eq!(first, second);
}

#[test]
fn required_fields_decide_success() {
    for field in OptionalField::ALL {
        let spec = InclusionSpec::none().with(field, Inclusion::Required);
        let schema = EventSchema::new("CUSTOM", spec).expect("schema composes");

        let mut missing = full_instance();
        missing
            .as_object_mut()
            .expect("object")
            .remove(field.key());
        let err = schema.normalize_value(&missing).expect_err("missing required field");
        assert!(
            matches!(err, EventError::ShapeMismatch { field: ref f, .. } if f == field.key()),
            "{err}"
        );

        assert!(schema.normalize_value(&full_instance()).is_ok(), "{field:?}");
    }
}

#[test]
fn optional_fields_may_be_missing() {
    let all_optional = OptionalField::ALL
        .into_iter()
        .fold(InclusionSpec::none(), |spec, f| spec.with(f, Inclusion::Optional));
    let schema = EventSchema::new("HOME", all_optional).expect("schema composes");
    let payload = schema
        .normalize_value(&json!({ "timestamp": 1_714_552_200, "channelType": "SITE" }))
        .expect("only common required fields given");
    let body = schema.to_json_body(&payload).expect("serializes");
    assert_eq!(
        body,
        json!({ "event_type": "HOME", "timestamp": 1_714_552_200, "channel_type": "SITE" })
    );
}

#[test]
fn item_currency_falls_back_to_unknown_then_default() {
    let schema = EventSchema::for_event_type(EventType::ItemPageView).expect("schema composes");
    let mut instance = json!({
        "timestamp": "2024-05-01T08:30:00Z",
        "channelType": "SITE",
        "items": [{ "id": "sku1", "price": { "amount": 12.34 } }]
    });

    let payload = schema.normalize_value(&instance).expect("ok");
    let price = payload.items.expect("items")[0].price.clone().expect("price");
    assert_eq!(price.currency, "UNKNOWN_CURRENCY");

    instance["defaultCurrency"] = json!("KRW");
    let payload = schema.normalize_value(&instance).expect("ok");
    let price = payload.items.expect("items")[0].price.clone().expect("price");
    assert_eq!(price.currency, "KRW");
}

#[test]
fn home_without_optionals_emits_common_fields_only() {
    let schema = EventSchema::new("HOME", InclusionSpec::none()).expect("schema composes");
    assert_eq!(schema.fields().len(), 7);

    let payload = schema.normalize_value(&full_instance()).expect("ok");
    let body = schema.to_json_body(&payload).expect("serializes");
    let mut keys: Vec<&String> = body.as_object().expect("object").keys().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "channel_type",
            "decision_track_id",
            "device",
            "event_id",
            "event_type",
            "session_id",
            "timestamp",
            "user_id"
        ]
    );
}

#[test]
fn purchase_without_revenue_is_rejected() {
    let schema = EventSchema::new(
        "PURCHASE",
        RequireFlags {
            require_items: Some(true),
            require_revenue: Some(true),
            ..RequireFlags::default()
        }
        .into(),
    )
    .expect("schema composes");

    let err = schema
        .normalize_value(&json!({
            "timestamp": "2024-05-01T08:30:00Z",
            "channelType": "APP",
            "items": [{ "id": "sku1" }]
        }))
        .expect_err("revenue is required");
    assert!(matches!(err, EventError::ShapeMismatch { ref field, .. } if field == "revenue"));
}

#[test]
fn default_currency_fills_item_price() {
    let schema = EventSchema::for_event_type(EventType::AddToCart).expect("schema composes");
    let payload = schema
        .normalize_value(&json!({
            "timestamp": "2024-05-01T08:30:00Z",
            "channelType": "APP",
            "defaultCurrency": "USD",
            "items": [{ "id": "sku1", "price": { "amount": 9.99 } }]
        }))
        .expect("ok");

    let items = serde_json::to_value(payload.items.expect("items")).expect("serializes");
    assert_eq!(
        items,
        json!([{ "id": "sku1", "price": { "amount": 9.99, "currency": "USD" } }])
    );
}

#[test]
fn device_and_item_keys_become_snake_case() {
    let schema = EventSchema::for_event_type(EventType::Purchase).expect("schema composes");
    let payload = schema.normalize_value(&full_instance()).expect("ok");
    let body = schema.to_json_body(&payload).expect("serializes");

    assert_eq!(
        body["device"],
        json!({ "os": "ios", "os_version": "17.1", "advertising_id": "ad-1", "ip": "216.212.237.213" })
    );
    assert_eq!(
        body["items"][0],
        json!({
            "id": "sku1",
            "price": { "currency": "UNKNOWN_CURRENCY", "amount": 12.34 },
            "quantity": 2,
            "item_group_id": "g1",
            "seller_id": "s1"
        })
    );
    assert_eq!(body["shipping_charge"], json!({ "currency": "UNKNOWN_CURRENCY", "amount": 3 }));
    assert!(body.get("search_query").is_none());
}

#[test]
fn schema_is_shareable_across_threads() {
    let catalog = SchemaCatalog::presets();
    let schema = std::sync::Arc::new(catalog.schema("SEARCH").expect("preset"));
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let schema = std::sync::Arc::clone(&schema);
            std::thread::spawn(move || {
                schema
                    .normalize_value(&json!({
                        "timestamp": n,
                        "channelType": "SITE",
                        "searchQuery": format!("query {n}")
                    }))
                    .map(|p| p.search_query)
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let query = handle.join().expect("thread").expect("normalizes");
        assert_eq!(query, Some(format!("query {n}")));
    }
}

#[test]
fn home_ignores_excluded_keys_of_any_shape() {
    let schema = EventSchema::new("HOME", InclusionSpec::none()).expect("schema composes");
    let payload = schema
        .normalize_value(&json!({
            "timestamp": "2024-05-01T08:30:00Z",
            "channelType": "APP",
            "items": "sku1",
            "revenue": "12"
        }))
        .expect("excluded keys are not decoded");
    let body = schema.to_json_body(&payload).expect("serializes");
    assert_eq!(
        body,
        json!({ "event_type": "HOME", "timestamp": "2024-05-01T08:30:00Z", "channel_type": "APP" })
    );
}
