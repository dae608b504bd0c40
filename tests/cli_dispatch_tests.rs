use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_podium")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("podium-{name}-{stamp}.json"))
}

const VALID_FORM: &str = r#"{
    "name": "Season Cup",
    "totalPlayers": "100",
    "totalAmount": "1000",
    "tiers": [{"label": "1-100", "startRank": 1, "endRank": 100, "amountPerUser": "10"}]
}"#;

const GAPPED_FORM: &str = r#"{
    "name": "Gappy",
    "totalPlayers": "10",
    "totalAmount": "550",
    "tiers": [
        {"label": "1-5", "startRank": 1, "endRank": 5, "amountPerUser": "100"},
        {"label": "7-10", "startRank": 7, "endRank": 10, "amountPerUser": "12.5"}
    ]
}"#;

#[test]
fn missing_command_prints_usage_and_exits_2() {
    let output = Command::new(bin()).output().expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: podium <serve|validate|preview|submit>"));
}

#[test]
fn validate_command_accepts_a_clean_form() {
    let path = unique_temp_path("valid-form");
    fs::write(&path, VALID_FORM).expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("validate should emit json");
    assert_eq!(payload["valid"], true);
    assert_eq!(payload["distributed"], 1000.0);

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_exits_non_zero_on_a_gapped_form() {
    let path = unique_temp_path("gapped-form");
    fs::write(&path, GAPPED_FORM).expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Label must start at rank 6."));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_without_path_prints_usage() {
    let output = Command::new(bin())
        .arg("validate")
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: podium validate"));
}

#[test]
fn preview_command_prints_aligned_form_fields() {
    let path = unique_temp_path("preview-form");
    fs::write(&path, VALID_FORM).expect("fixture should be written");

    let output = Command::new(bin())
        .args(["preview", path.to_string_lossy().as_ref()])
        .output()
        .expect("preview should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Name: Season Cup"));
    assert!(stdout.contains("TotalPlayers: 100"));
    assert!(stdout.contains("TotalAmount: 1000"));
    assert!(stdout.contains("Labels: 1-100"));
    assert!(stdout.contains("StartRanks: 1"));
    assert!(stdout.contains("EndRanks: 100"));
    assert!(stdout.contains("AmountsPerUser: 10"));

    let _ = fs::remove_file(path);
}

#[test]
fn preview_command_blocks_an_underspent_budget() {
    let path = unique_temp_path("underspent-form");
    let form = VALID_FORM.replace("\"1000\"", "\"1500\"");
    fs::write(&path, form).expect("fixture should be written");

    let output = Command::new(bin())
        .args(["preview", path.to_string_lossy().as_ref()])
        .output()
        .expect("preview should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr
        .contains("Total tier amount (1000.00) must equal Total Amount (1500.00)."));

    let _ = fs::remove_file(path);
}

#[test]
fn submit_command_requires_a_configured_backend() {
    let path = unique_temp_path("submit-form");
    fs::write(&path, VALID_FORM).expect("fixture should be written");

    let output = Command::new(bin())
        .args(["submit", path.to_string_lossy().as_ref()])
        .env_remove("PODIUM_BACKEND_URL")
        .output()
        .expect("submit should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PODIUM_BACKEND_URL is not set"));

    let _ = fs::remove_file(path);
}
