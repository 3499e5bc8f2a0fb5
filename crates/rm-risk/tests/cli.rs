use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::NamedTempFile;

const HEDGED_BOOK: &str = r#"{
    "alpha": 2.5,
    "sentiment": "BULLISH",
    "longs": [
        {"ticker": "AAPL", "allocation": "40%", "beta": 1.2},
        {"ticker": "MSFT", "allocation": "35%", "beta": 0.9},
        {"ticker": "GOOGL", "allocation": "25%", "beta": 1.1}
    ],
    "shorts": [
        {"ticker": "TSLA", "allocation": "-15%", "beta": 2.0},
        {"ticker": "NVDA", "allocation": "-20%", "beta": 1.8}
    ]
}"#;

fn rm_metrics() -> Command {
    let mut cmd = Command::cargo_bin("rm-metrics").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("RM_INVESTMENT_AMOUNT")
        .env_remove("RM_MARGIN_REQUIREMENT")
        .env_remove("RM_BETA_CONVENTION");
    cmd
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is a single JSON document")
}

#[test]
fn stdout_is_json_and_logs_go_to_stderr() {
    let input = write_temp(HEDGED_BOOK);
    let output = rm_metrics()
        .arg("--verbose")
        .arg(input.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("computing portfolio metrics"));

    let metrics = stdout_json(&output);
    assert_eq!(metrics["portfolio_beta"].as_f64(), Some(0.41));
    assert_eq!(metrics["net_exposure"].as_f64(), Some(65.0));
    assert_eq!(metrics["net_capital_required"].as_f64(), Some(825.0));
    assert_eq!(metrics["sentiment"], "BULLISH");
}

#[test]
fn reads_recommendation_from_stdin() {
    let output = rm_metrics().write_stdin(HEDGED_BOOK).output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["gross_exposure"].as_f64(), Some(135.0));
}

#[test]
fn flags_override_config_and_environment() {
    let config = write_temp(r#"{"investment_amount": 5000}"#);
    let output = rm_metrics()
        .env("RM_INVESTMENT_AMOUNT", "2000")
        .args(["--beta-convention", "magnitude", "--investment", "10000", "--config"])
        .arg(config.path())
        .write_stdin(HEDGED_BOOK)
        .output()
        .unwrap();

    assert!(output.status.success());
    let metrics = stdout_json(&output);
    assert_eq!(metrics["portfolio_beta"].as_f64(), Some(1.73));
    assert_eq!(metrics["long_dollars"].as_f64(), Some(10000.0));
}

#[test]
fn environment_overrides_config_file() {
    let config = write_temp(r#"{"investment_amount": 5000}"#);
    let output = rm_metrics()
        .env("RM_INVESTMENT_AMOUNT", "2000")
        .arg("--config")
        .arg(config.path())
        .write_stdin(HEDGED_BOOK)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["long_dollars"].as_f64(), Some(2000.0));
}

#[test]
fn extras_produce_a_report() {
    let output = rm_metrics()
        .args(["--breakdown", "--alerts"])
        .write_stdin(HEDGED_BOOK)
        .output()
        .unwrap();

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["metrics"]["portfolio_beta"].as_f64(), Some(0.41));
    assert_eq!(report["breakdown"].as_array().map(Vec::len), Some(5));
    assert_eq!(report["breakdown"][3]["side"], "short");
}

#[test]
fn invalid_config_fails_without_output() {
    let config = write_temp(r#"{"margin_requirement": 1.5}"#);
    rm_metrics()
        .arg("--config")
        .arg(config.path())
        .write_stdin(HEDGED_BOOK)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("margin_requirement"));
}

#[test]
fn unparseable_environment_override_fails() {
    rm_metrics()
        .env("RM_MARGIN_REQUIREMENT", "half")
        .write_stdin(HEDGED_BOOK)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("RM_MARGIN_REQUIREMENT"));
}

#[test]
fn malformed_json_fails() {
    rm_metrics()
        .write_stdin("{\"longs\": [")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("parsing recommendation JSON"));
}

#[test]
fn empty_input_fails() {
    rm_metrics()
        .write_stdin("  \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty recommendation input"));
}

#[test]
fn missing_input_file_fails() {
    rm_metrics()
        .arg("/nonexistent/recommendation.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading /nonexistent/recommendation.json"));
}

#[test]
fn malformed_positions_still_succeed() {
    let output = rm_metrics()
        .write_stdin(
            r#"{"longs": [{"ticker": "A", "allocation": "abc"}, {"ticker": "B", "allocation": "79228162514264337593543950335%"}, {"ticker": "C", "allocation": "1%"}]}"#,
        )
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout_json(&output)["long_exposure"].as_f64().is_some());
}
