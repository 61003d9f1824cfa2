use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;

fn seed_store(dir: &Path) {
    let payload = json!({
        "anomalies": [
            {"id": "TXN-100", "amount": "$1,200.00", "score": 91.0, "artifact": "SHELL"},
            {"id": "TXN-200", "amount": "$88.10", "score": 64.0, "artifact": "V14"}
        ],
        "stats": {"total": 250, "found": 2, "exposure": 1288.10, "avg": 644.05}
    });
    fs::write(dir.join("auditData.json"), payload.to_string()).unwrap();
}

#[test]
fn audit_without_data_shows_the_waiting_placeholder() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("areola-cli").unwrap();
    cmd.args(["--store-dir", temp.path().to_str().unwrap(), "audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Waiting for Audit Stream..."));
}

#[test]
fn audit_renders_the_persisted_table() {
    let temp = tempfile::tempdir().unwrap();
    seed_store(temp.path());
    let mut cmd = Command::cargo_bin("areola-cli").unwrap();
    cmd.args(["--store-dir", temp.path().to_str().unwrap(), "audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TXN-100"))
        .stdout(predicate::str::contains("TXN-200"))
        .stdout(predicate::str::contains("Exposure at Risk: $1288.10"));
}

#[test]
fn audit_query_narrows_the_table() {
    let temp = tempfile::tempdir().unwrap();
    seed_store(temp.path());
    let mut cmd = Command::cargo_bin("areola-cli").unwrap();
    cmd.args([
        "--store-dir",
        temp.path().to_str().unwrap(),
        "audit",
        "--query",
        "shell",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("TXN-100"))
    .stdout(predicate::str::contains("TXN-200").not());
}

#[test]
fn audit_query_without_matches_says_so() {
    let temp = tempfile::tempdir().unwrap();
    seed_store(temp.path());
    let mut cmd = Command::cargo_bin("areola-cli").unwrap();
    cmd.args([
        "--store-dir",
        temp.path().to_str().unwrap(),
        "audit",
        "--query",
        "wire_transfer",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("No records match your filter"));
}

#[test]
fn audit_json_emits_filtered_rows() {
    let temp = tempfile::tempdir().unwrap();
    seed_store(temp.path());
    let mut cmd = Command::cargo_bin("areola-cli").unwrap();
    let output = cmd
        .args([
            "--store-dir",
            temp.path().to_str().unwrap(),
            "audit",
            "--query",
            "v14",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["anomalies"].as_array().unwrap().len(), 1);
    assert_eq!(value["anomalies"][0]["id"], json!("TXN-200"));
}

#[test]
fn export_writes_the_csv_blob() {
    let temp = tempfile::tempdir().unwrap();
    seed_store(temp.path());
    let out = temp.path().join("audit.csv");
    let mut cmd = Command::cargo_bin("areola-cli").unwrap();
    cmd.args([
        "--store-dir",
        temp.path().to_str().unwrap(),
        "export",
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("exported 2 anomalies"));

    let csv = fs::read_to_string(&out).unwrap();
    assert_eq!(
        csv,
        "Transaction_Signature,Amount,Risk_Score,Artifact_Pattern\n\
         TXN-100,1200.00,91%,SHELL\n\
         TXN-200,88.10,64%,V14"
    );
}

#[test]
fn export_without_data_shows_the_waiting_placeholder() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("areola-cli").unwrap();
    cmd.args(["--store-dir", temp.path().to_str().unwrap(), "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Waiting for Audit Stream..."));
}
