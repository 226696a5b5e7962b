//! Integration tests for the textloc binary.

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn textloc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_textloc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run textloc")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "textloc failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_locate_by_label_text() {
    let document = fixture("login.json");
    let output = textloc(&[
        "locate",
        "--document",
        document.to_str().unwrap(),
        "--kind",
        "password",
        "Password",
    ]);
    let json = stdout_json(&output);

    let matches = json.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(
        matches[0]["description"],
        "input[type=password] (id='pass') (name='password')"
    );
    assert_eq!(matches[0]["found_type"], "BY_LABEL_TEXT");
    assert_eq!(matches[0]["coverage"], 0);
    assert_eq!(matches[0]["distance"], 0);
    assert_eq!(matches[0]["start"], 30);
}

#[test]
fn test_locate_with_config() {
    let document = fixture("login.json");
    let config = fixture("tuple.yaml");
    let output = textloc(&[
        "locate",
        "-d",
        document.to_str().unwrap(),
        "-c",
        config.to_str().unwrap(),
        "-k",
        "password",
        "Password",
    ]);
    let json = stdout_json(&output);

    // Without deduplication every strategy keeps its entry
    let matches = json.as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert!(matches
        .iter()
        .all(|m| m["description"] == "input[type=password] (id='pass') (name='password')"));
}

#[test]
fn test_locate_nothing() {
    let document = fixture("login.json");
    let output = textloc(&[
        "locate",
        "--document",
        document.to_str().unwrap(),
        "Nowhere > Username",
    ]);
    let json = stdout_json(&output);
    assert_eq!(json, Value::Array(Vec::new()));
}

#[test]
fn test_text() {
    let document = fixture("login.json");
    let output = textloc(&["text", "--document", document.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Welcome back Username Password Log in\n"
    );

    let output = textloc(&[
        "text",
        "--document",
        document.to_str().unwrap(),
        "--without-form-controls",
    ]);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Welcome back Username Password\n"
    );
}

#[test]
fn test_schema() {
    let json = stdout_json(&textloc(&["schema"]));
    assert_eq!(json["$schema"], "http://json-schema.org/draft-07/schema#");
    assert!(json["definitions"]["Node"].is_object());

    let json = stdout_json(&textloc(&["schema", "matches"]));
    assert_eq!(json["type"], "array");
}

#[test]
fn test_errors_exit_non_zero() {
    let document = fixture("login.json");
    let document = document.to_str().unwrap();

    let output = textloc(&["locate", "--document", "missing.json", "Username"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read document"));

    let invalid = fixture("invalid.yaml");
    let output = textloc(&[
        "locate",
        "-d",
        document,
        "-c",
        invalid.to_str().unwrap(),
        "Username",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("logging.level"));

    let output = textloc(&["locate", "-d", document, "[a] > b > [c] > d"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid path"));

    let output = textloc(&["locate", "-d", document, "--kind", "slider", "x"]);
    assert!(!output.status.success());
}
