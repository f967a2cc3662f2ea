//! Verify that `--format json` output matches the published JSON schema.

use jsonschema::Validator;
use rusqlite::Connection;
use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

fn schema_erd_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_schema-erd"))
}

fn load_schema() -> Validator {
    let schema = serde_json::to_value(schema_erd::json_schema::erd_schema()).unwrap();
    Validator::new(&schema).expect("Failed to compile schema")
}

fn create_db(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("shop.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        r#"
CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL);
CREATE TABLE orders (id INTEGER PRIMARY KEY, user_id INTEGER REFERENCES users(id), total NUMERIC);
CREATE TABLE order_items (id INTEGER PRIMARY KEY, order_id INTEGER, sku);
"#,
    )
    .unwrap();
    path
}

#[test]
fn test_json_output_matches_schema() {
    let dir = TempDir::new().unwrap();
    let db = create_db(&dir);

    let output = schema_erd_bin()
        .args(["graph", db.to_str().unwrap(), "--format", "json", "--guess"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "Command failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    // JSON on stdout keeps stderr free of status lines
    assert!(output.stderr.is_empty());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(load_schema().is_valid(&json), "JSON output doesn't match schema:\n{}", json);

    assert_eq!(json["stats"]["table_count"], 3);
    assert_eq!(json["stats"]["declared_count"], 1);
    assert_eq!(json["stats"]["guessed_count"], 1);
    assert_eq!(json["tables"][2]["columns"][2]["type"], "TEXT");
}

#[test]
fn test_empty_json_output_matches_schema() {
    let dir = TempDir::new().unwrap();
    let db = create_db(&dir);

    let output = schema_erd_bin()
        .args(["graph", db.to_str().unwrap(), "-f", "json", "-t", "missing"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(load_schema().is_valid(&json));
    assert_eq!(json["tables"].as_array().unwrap().len(), 0);
}
