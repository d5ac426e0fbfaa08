//! End-to-end runs of the `trinomial` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

fn trinomial(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_trinomial"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("TRINOMIAL_LOG_LEVEL")
        .output()
        .expect("failed to run trinomial")
}

fn request_file() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("requests/american_put.toml")
        .to_string_lossy()
        .into_owned()
}

const EUROPEAN_CALL: &[&str] = &[
    "--spot",
    "100",
    "--rate",
    "0.05",
    "--vol",
    "0.2",
    "--strike",
    "100",
    "--pricing-date",
    "2025-01-01",
    "--maturity",
    "2026-01-01",
];

#[test]
fn test_price_json() {
    let mut args = vec!["price", "-n", "200", "--format", "json", "--log-level", "error"];
    args.extend_from_slice(EUROPEAN_CALL);
    let output = trinomial(&args);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let iterative = report["iterative"].as_f64().unwrap();
    let recursive = report["recursive"].as_f64().unwrap();
    assert!((iterative - 10.4506).abs() < 0.01);
    assert!((iterative - recursive).abs() < 1e-9);
    assert_eq!(report["n_steps"], 200);
}

#[test]
fn test_request_file_with_override() {
    let file = request_file();
    let output = trinomial(&["price", "--config", &file, "--format", "json", "-n", "100"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "Put");
    assert_eq!(report["style"], "American");
    assert_eq!(report["n_steps"], 100);
    assert!(report["dividend_step"].is_u64());
}

#[test]
fn test_strikes_csv() {
    let mut args = vec!["strikes", "-n", "50", "--format", "csv", "--strikes", "90,100,110"];
    args.extend_from_slice(EUROPEAN_CALL);
    let output = trinomial(&args);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "strike,tree_price,reference_price,difference");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("90"));
}

#[test]
fn test_check_passes() {
    let file = request_file();
    let output = trinomial(&["check", "--config", &file]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("column reach"));
}

#[test]
fn test_unknown_kind_fails() {
    let mut args = vec!["price", "--kind", "straddle"];
    args.extend_from_slice(EUROPEAN_CALL);
    let output = trinomial(&args);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("straddle"));
}

#[test]
fn test_missing_maturity_fails() {
    let output = trinomial(&["greeks", "--spot", "100", "--rate", "0.05", "--vol", "0.2", "--strike", "100"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("contract.maturity_date"));
}
