#![allow(non_snake_case)]

use super::*;

fn sample_report() -> BuildReport {
    let mut report = BuildReport::new(PathBuf::from("."), PathBuf::from("dist"));
    report.push(ActionRecord::new(
        &StagingAction::file("src/manifest.json", "manifest.json"),
        ActionOutcome::Success {
            files: 1,
            bytes: 120,
        },
    ));
    report.push(ActionRecord::new(
        &StagingAction::file("src/background/Background.res.js", "background.js").optional(),
        ActionOutcome::SkippedMissing,
    ));
    report.push(ActionRecord::new(
        &StagingAction::directory("icons", "icons").optional(),
        ActionOutcome::Failed {
            reason: "permission denied".to_string(),
        },
    ));
    report.push(ActionRecord::new(
        &StagingAction::directory("rust_core/pkg", "wasm").optional(),
        ActionOutcome::Success {
            files: 2,
            bytes: 30,
        },
    ));
    report.finish(BuildOutcome::Success);
    report
}

#[test]
fn BuildReport___new___starts_pending_and_empty() {
    let report = BuildReport::new(PathBuf::from("."), PathBuf::from("dist"));

    assert_eq!(report.outcome, BuildOutcome::Pending);
    assert!(report.records.is_empty());
    assert!(!report.is_success());
}

#[test]
fn BuildReport___counts___split_by_outcome() {
    let report = sample_report();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.bytes_copied(), 150);
}

#[test]
fn BuildReport___outcome_kinds___preserve_order() {
    let report = sample_report();

    assert_eq!(
        report.outcome_kinds(),
        vec!["success", "skipped_missing", "failed", "success"]
    );
}

#[test]
fn BuildReport___record___finds_by_label() {
    let report = sample_report();

    let record = report.record("background.js").unwrap();

    assert!(!record.required);
    assert_eq!(record.outcome, ActionOutcome::SkippedMissing);
    assert!(report.record("missing.js").is_none());
}

#[test]
fn BuildReport___to_json___tags_outcomes() {
    let report = sample_report();

    let json = report.to_json().unwrap();

    assert!(json.contains("\"status\": \"skipped_missing\""));
    assert!(json.contains("\"outcome\": \"success\""));
    assert!(json.contains("\"reason\": \"permission denied\""));
}

#[test]
fn BuildReport___json___parses_back() {
    let report = sample_report();

    let parsed: BuildReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(parsed, report);
}

#[test]
fn BuildOutcome___display___lowercase() {
    assert_eq!(BuildOutcome::Aborted.to_string(), "aborted");
    assert_eq!(BuildOutcome::Success.to_string(), "success");
}
