//! End-to-end tests for the field-order binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn field_order(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("field-order").unwrap();
    cmd.current_dir(dir)
        .env_remove("FIELD_ORDER_STORAGE__PATH")
        .env_remove("FIELD_ORDER_EVENT_CAPACITY")
        .env_remove("RUST_LOG");
    cmd
}

fn header_orders(dir: &Path) -> serde_json::Value {
    let output = field_order(dir)
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["collapsedHeader"]["order"].clone())
        .collect()
}

#[test]
fn test_list_without_state_shows_default_catalog() {
    let temp = TempDir::new().unwrap();
    field_order(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Field 1"))
        .stdout(predicate::str::contains("Field 10"));

    // read-only commands never create the state file
    assert!(!temp.path().join(".field-order").exists());
}

#[test]
fn test_visible_persists_and_appends() {
    let temp = TempDir::new().unwrap();
    field_order(temp.path())
        .args(["visible", "1", "header", "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Field 1 shown in collapsedHeader"));
    field_order(temp.path())
        .args(["visible", "2", "header", "on"])
        .assert()
        .success();

    assert!(temp.path().join(".field-order/fields.yaml").exists());

    let orders = header_orders(temp.path());
    assert_eq!(orders[0], 1);
    assert_eq!(orders[1], 2);
    assert!(orders[2].is_null());
}

#[test]
fn test_hide_closes_gap_and_orders_reports_range() {
    let temp = TempDir::new().unwrap();
    for id in ["1", "2"] {
        field_order(temp.path())
            .args(["visible", id, "collapsedHeader", "on"])
            .assert()
            .success();
    }
    field_order(temp.path())
        .args(["visible", "1", "collapsedHeader", "off"])
        .assert()
        .success();

    field_order(temp.path())
        .args(["orders", "header"])
        .assert()
        .success()
        .stdout(predicate::str::contains("collapsedHeader: 1 visible, orders [1]"));
}

#[test]
fn test_order_swaps() {
    let temp = TempDir::new().unwrap();
    for id in ["1", "2"] {
        field_order(temp.path())
            .args(["visible", id, "header", "on"])
            .assert()
            .success();
    }
    field_order(temp.path())
        .args(["order", "1", "header", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("swapped with field 2"));

    let orders = header_orders(temp.path());
    assert_eq!(orders[0], 2);
    assert_eq!(orders[1], 1);
}

#[test]
fn test_order_on_hidden_field_fails() {
    let temp = TempDir::new().unwrap();
    field_order(temp.path())
        .args(["order", "3", "pane", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not visible in samplePane"));
}

#[test]
fn test_unknown_projection_fails() {
    let temp = TempDir::new().unwrap();
    field_order(temp.path())
        .args(["visible", "1", "footer", "on"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid projection"));
}

#[test]
fn test_apply_is_all_or_nothing() {
    let temp = TempDir::new().unwrap();
    let actions = temp.path().join("actions.yaml");
    std::fs::write(
        &actions,
        "- action: set-visibility\n  id: 1\n  projection: samplePane\n  visible: true\n\
         - action: set-order\n  id: 2\n  projection: samplePane\n  order: 1\n",
    )
    .unwrap();

    field_order(temp.path())
        .arg("apply")
        .arg(&actions)
        .assert()
        .failure()
        .stderr(predicate::str::contains("action #1 failed"));

    field_order(temp.path())
        .args(["orders", "pane", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"checkedCount\": 0"));
}

#[test]
fn test_apply_and_reset() {
    let temp = TempDir::new().unwrap();
    let actions = temp.path().join("actions.yaml");
    std::fs::write(
        &actions,
        "- action: set-visibility\n  id: 4\n  projection: samplePane\n  visible: true\n\
         - action: set-visibility\n  id: 2\n  projection: samplePane\n  visible: true\n\
         - action: set-order\n  id: 2\n  projection: samplePane\n  order: 1\n",
    )
    .unwrap();

    field_order(temp.path())
        .arg("apply")
        .arg(&actions)
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 3 actions"));

    field_order(temp.path())
        .args(["list", "--projection", "pane", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Field 2"))
        .stdout(predicate::str::contains("Field 4"));

    field_order(temp.path())
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("All fields hidden"));

    field_order(temp.path())
        .args(["orders", "pane"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 visible"));
}

#[test]
fn test_config_file_catalog_and_file_override() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("field-order.yaml"),
        "catalog:\n  - id: 7\n    name: Status\n",
    )
    .unwrap();
    let state = temp.path().join("custom-state.yaml");

    field_order(temp.path())
        .arg("--file")
        .arg(&state)
        .args(["visible", "7", "pane", "on"])
        .assert()
        .success();
    assert!(state.exists());

    field_order(temp.path())
        .arg("--file")
        .arg(&state)
        .args(["show", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status"))
        .stdout(predicate::str::contains("✓ 1"));
}

#[test]
fn test_show_unknown_field_fails() {
    let temp = TempDir::new().unwrap();
    field_order(temp.path())
        .args(["show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("field not found: 99"));
}

#[test]
fn test_first_run_logs_nothing_to_stderr() {
    let temp = TempDir::new().unwrap();
    field_order(temp.path())
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    field_order(temp.path())
        .args(["visible", "1", "pane", "on"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_oversized_event_capacity_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    field_order(temp.path())
        .env("FIELD_ORDER_EVENT_CAPACITY", "1000000000")
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("event capacity 1000000000 out of range"));
}

#[test]
fn test_noop_mutation_writes_back_normalized_state() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".field-order");
    std::fs::create_dir_all(&dir).unwrap();
    let state = dir.join("fields.yaml");
    std::fs::write(
        &state,
        "fields:\n\
         - id: 1\n  fieldName: One\n  collapsedHeader: {visible: true, order: 4}\n  samplePane: {visible: false, order: null}\n\
         - id: 2\n  fieldName: Two\n  collapsedHeader: {visible: true, order: 9}\n  samplePane: {visible: false, order: null}\n",
    )
    .unwrap();

    // read-only commands leave the file alone
    field_order(temp.path()).arg("list").assert().success();
    assert!(std::fs::read_to_string(&state).unwrap().contains("order: 9"));

    field_order(temp.path())
        .args(["visible", "1", "header", "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No change"));

    let content = std::fs::read_to_string(&state).unwrap();
    assert!(!content.contains("order: 9"));
    let orders = header_orders(temp.path());
    assert_eq!(orders[0], 1);
    assert_eq!(orders[1], 2);
}
