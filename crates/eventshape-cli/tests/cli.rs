//! Integration tests for the `eventshape` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn eventshape() -> Command {
    let mut cmd = Command::cargo_bin("eventshape")
        .unwrap_or_else(|e| panic!("eventshape binary not built: {e}"));
    cmd.env_remove("EVENTSHAPE_CONFIG");
    cmd
}

fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("eventshape_{name}_{}", std::process::id()));
    fs::write(&path, content)
        .unwrap_or_else(|e| panic!("failed to write temp file {path:?}: {e}"));
    path
}

#[test]
fn fields_prints_ordered_field_map() {
    let output = eventshape()
        .args(["fields", "SEARCH"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8_lossy(&output);
    let event_id = text.find("\"eventId\"").unwrap_or(usize::MAX);
    let decision = text.find("\"decisionTrackId\"").unwrap_or(usize::MAX);
    let query = text.find("\"searchQuery\"").unwrap_or(usize::MAX);
    assert!(event_id < decision && decision < query, "{text}");
    assert!(!text.contains("\"revenue\""));
}

#[test]
fn fields_rejects_unknown_event_type() {
    eventshape()
        .args(["fields", "CHECKOUT"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown event type: CHECKOUT"));
}

#[test]
fn config_file_defines_extra_event_type() {
    let config = write_temp(
        "config.json",
        r#"{"CHECKOUT": {"items": "required", "shippingCharge": "optional"}}"#,
    );
    eventshape()
        .args(["fields", "CHECKOUT", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"shippingCharge\"").and(predicate::str::contains("\"items\"")));

    eventshape()
        .env("EVENTSHAPE_CONFIG", &config)
        .args(["event-types"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CHECKOUT\titems=required shippingCharge=optional"));
    let _ = fs::remove_file(config);
}

#[test]
fn normalize_reads_stdin() {
    let input = r#"{"timestamp": "2024-05-01T08:30:00Z", "channelType": "SITE", "defaultCurrency": "USD", "items": [{"id": "sku1", "price": {"amount": 9.99}}]}"#;
    eventshape()
        .args(["normalize", "ADD_TO_CART"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""items":[{"id":"sku1","price":{"currency":"USD","amount":9.99}}]"#,
        ))
        .stderr(predicate::str::contains("Normalized 1 ADD_TO_CART events (0 failed)"));
}

#[test]
fn normalize_file_stops_on_shape_mismatch() {
    let path = write_temp(
        "purchase.jsonl",
        "{\"timestamp\": 1, \"channelType\": \"APP\", \"items\": [{\"id\": \"a\"}], \"revenue\": 3}\n{\"timestamp\": 2, \"channelType\": \"APP\", \"items\": [{\"id\": \"b\"}]}\n",
    );
    eventshape()
        .args(["normalize", "PURCHASE", "--path"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2").and(predicate::str::contains("revenue")));
    let _ = fs::remove_file(path);
}

#[test]
fn normalize_keep_going_reports_summary() {
    let input = "{\"timestamp\": 1, \"channelType\": \"APP\"}\n{\"channelType\": \"APP\"}\n";
    eventshape()
        .args(["normalize", "HOME", "--keep-going"])
        .write_stdin(input)
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"event_type\":\"HOME\""))
        .stderr(
            predicate::str::contains("line 2:")
                .and(predicate::str::contains("1 of 2 events failed normalization"))
                .and(predicate::str::contains("rejected at").not()),
        );
}

#[test]
fn event_types_json_lists_presets() {
    let output = eventshape()
        .args(["event-types", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let specs: serde_json::Value = serde_json::from_slice(&output)
        .unwrap_or_else(|e| panic!("event-types --json is not JSON: {e}"));
    assert_eq!(specs["PURCHASE"]["revenue"], "required");
    assert_eq!(specs["HOME"]["searchQuery"], "absent");
    assert_eq!(specs.as_object().map(|o| o.len()), Some(8));
}
