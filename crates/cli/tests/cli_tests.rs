// Integration tests for the safra binary.
//
// stdout from --json commands must be exactly one JSON value; logs and
// summaries go to stderr.
//
// Run with: cargo test -p safra-cli --test cli_tests -- --nocapture

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn safra() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_safra"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env_remove("SAFRA_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_with_fixtures(args: &[&str]) -> Output {
    let dir = fixtures_dir();
    safra()
        .args(args)
        .arg("--products")
        .arg(dir.join("products.json"))
        .arg("--analyses")
        .arg(dir.join("analyses.json"))
        .output()
        .expect("run safra")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "exit code: {:?}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("stdout must be valid JSON: {e}\nstdout:\n{stdout}"))
}

fn products_in(month: &serde_json::Value) -> Vec<String> {
    month
        .as_array()
        .expect("month bucket must be an array")
        .iter()
        .map(|i| i["product"].as_str().unwrap().to_string())
        .collect()
}

// ===========================================================================
// calendar
// ===========================================================================

#[test]
fn calendar_json_has_twelve_months() {
    let val = stdout_json(&run_with_fixtures(&["calendar", "--json"]));
    let months = val["months"].as_object().expect("months object");
    assert_eq!(months.len(), 12);

    let codes: Vec<&String> = months.keys().collect();
    assert_eq!(codes[0], "JAN");
    assert_eq!(codes[11], "DEZ");

    assert_eq!(products_in(&months["DEZ"]), vec!["CAFÉ", "CACAU"]);
    assert_eq!(products_in(&months["MAR"]), vec!["CAFÉ", "SOJA", "CACAU", "ARROZ"]);
    assert_eq!(months["MAR"][0]["marker"], "negative");
    assert_eq!(months["MAR"][3]["marker"], "untracked");
    assert!(products_in(&months["JUL"]).is_empty());
}

#[test]
fn calendar_single_month() {
    let val = stdout_json(&run_with_fixtures(&["calendar", "--month", "jun", "--json"]));
    assert_eq!(val["month"], "JUN");
    assert_eq!(val["label"], "Junho");
    assert_eq!(products_in(&val["items"]), vec!["SOJA"]);
}

#[test]
fn calendar_text_uses_placeholders() {
    let output = run_with_fixtures(&["calendar"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dezembro"));
    assert!(stdout.contains("CACAU  (Origem não informada)"));
    assert!(stdout.contains("Sem produtos"));
}

#[test]
fn calendar_unknown_month_is_usage_error() {
    let output = run_with_fixtures(&["calendar", "--month", "DEC"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown month code"));
}

// ===========================================================================
// metrics / alerts / stats / analyses
// ===========================================================================

#[test]
fn metrics_json() {
    let val = stdout_json(&run_with_fixtures(&["metrics", "--json"]));
    assert_eq!(val["total_products"], 5);
    assert_eq!(val["tracked_products"], 3);
    assert_eq!(val["total_analyses"], 3);
    assert_eq!(val["positive"], 1);
    assert_eq!(val["neutral"], 1);
    assert_eq!(val["negative"], 1);
}

#[test]
fn alerts_json_limits_links() {
    let val = stdout_json(&run_with_fixtures(&["alerts", "--json"]));
    let alerts = val.as_array().expect("alerts array");
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["produto"], "CAFÉ");
    assert_eq!(alerts[0]["links"].as_array().unwrap().len(), 3);
}

#[test]
fn alerts_fail_on_alert_exit_code() {
    let output = run_with_fixtures(&["alerts", "--fail-on-alert"]);
    assert_eq!(output.status.code(), Some(20));
}

#[test]
fn stats_default_filter_drops_empty_country() {
    let val = stdout_json(&run_with_fixtures(&["stats", "--json"]));
    assert_eq!(val["sentiments"], serde_json::json!({"POSITIVO": 1, "NEGATIVO": 1}));
    assert_eq!(val["countries"], serde_json::json!({"Argentina": 1, "Brasil": 1}));
    assert_eq!(val["available_countries"], serde_json::json!(["Argentina", "Brasil"]));
}

#[test]
fn analyses_filtered_by_sentiment() {
    let val = stdout_json(&run_with_fixtures(&["analyses", "--sentiment", "NEGATIVO", "--json"]));
    let groups = val["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["sentiment"], "NEGATIVO");
    assert_eq!(groups[0]["analyses"][0]["links"].as_array().unwrap().len(), 4);
    assert_eq!(val["distributions"]["sentiments"], serde_json::json!({"NEGATIVO": 1}));
}

#[test]
fn analyses_rejects_unknown_sentiment() {
    let output = run_with_fixtures(&["analyses", "--sentiment", "MISTO"]);
    assert_eq!(output.status.code(), Some(2));
}

// ===========================================================================
// products / window / errors
// ===========================================================================

#[test]
fn products_add_and_recent() {
    let dir = tempfile::tempdir().unwrap();
    let products = dir.path().join("products.json");
    std::fs::copy(fixtures_dir().join("products.json"), &products).unwrap();
    let analyses = fixtures_dir().join("analyses.json");

    let add = |name: &str, origin: &str| {
        safra()
            .args(["products", "add", name, origin, "--json"])
            .arg("--products")
            .arg(&products)
            .arg("--analyses")
            .arg(&analyses)
            .output()
            .unwrap()
    };

    let val = stdout_json(&add("trigo", "Rússia"));
    assert_eq!(val["PRODUTO"], "TRIGO");
    assert_eq!(val["STATUS"], "ADICIONADO");

    let dup = add(" Trigo ", "Rússia");
    assert_eq!(dup.status.code(), Some(5));

    let recent = safra()
        .args(["products", "recent", "--json"])
        .arg("--products")
        .arg(&products)
        .output()
        .unwrap();
    let val = stdout_json(&recent);
    assert_eq!(val.as_array().unwrap().len(), 1);
    assert_eq!(val[0]["PRODUTO"], "TRIGO");
}

#[test]
fn window_helper() {
    let output = safra().args(["window", "DEZ-MAR"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let codes: Vec<&str> = stdout.lines().map(|l| &l[..3]).collect();
    assert_eq!(codes, vec!["JAN", "FEV", "MAR", "DEZ"]);
}

#[test]
fn missing_snapshot_file_exit_code() {
    let output = safra()
        .args(["metrics", "--products", "/nonexistent/products.json", "--analyses", "/nonexistent/a.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("hint:"));
}

#[test]
fn malformed_rows_warn_on_stderr_only() {
    let output = run_with_fixtures(&["metrics", "--json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("TRIGO"), "expected a skip warning, stderr: {stderr}");
    stdout_json(&output);
}

#[test]
fn non_string_window_keeps_other_products() {
    let dir = tempfile::tempdir().unwrap();
    let products = dir.path().join("products.json");
    std::fs::write(
        &products,
        r#"[{"PRODUTO": "CAFÉ", "COLHEITA": "DEZ-MAR", "LOCAL": "Brasil"},
            {"PRODUTO": "SOJA", "COLHEITA": 12, "LOCAL": "Argentina"}]"#,
    )
    .unwrap();

    let output = safra()
        .args(["calendar", "--json", "--products"])
        .arg(&products)
        .arg("--analyses")
        .arg(fixtures_dir().join("analyses.json"))
        .output()
        .unwrap();
    let val = stdout_json(&output);
    assert_eq!(products_in(&val["months"]["DEZ"]), vec!["CAFÉ"]);
    let months = val["months"].as_object().unwrap();
    assert!(months.values().all(|items| !products_in(items).contains(&"SOJA".to_string())));
}
