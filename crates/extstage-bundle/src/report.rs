//! Build report types.

use crate::{ActionKind, StagingAction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What happened to one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The artifact was copied.
    Success { files: u64, bytes: u64 },
    /// The artifact was absent and the action is optional.
    SkippedMissing,
    /// The artifact was absent (required) or the copy failed.
    Failed { reason: String },
}

impl ActionOutcome {
    /// Outcome name without payload, for comparing runs.
    #[must_use]
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::SkippedMissing => "skipped_missing",
            Self::Failed { .. } => "failed",
        }
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub label: String,
    pub source: PathBuf,
    pub dest: PathBuf,
    pub kind: ActionKind,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub outcome: ActionOutcome,
}

impl ActionRecord {
    pub(crate) fn new(action: &StagingAction, outcome: ActionOutcome) -> Self {
        Self {
            label: action.label(),
            source: action.source().to_path_buf(),
            dest: action.dest().to_path_buf(),
            kind: action.kind(),
            required: action.is_required(),
            hint: action.hint().map(str::to_string),
            outcome,
        }
    }
}

/// Overall result of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildOutcome {
    /// Still running.
    Pending,
    /// Every action ran and no required action failed.
    Success,
    /// A required action failed and the remaining actions were not run.
    Aborted,
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Aborted => "aborted",
        })
    }
}

/// Ordered record of every action a build executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub records: Vec<ActionRecord>,
    pub outcome: BuildOutcome,
}

impl BuildReport {
    #[must_use]
    pub fn new(source_root: PathBuf, dest_root: PathBuf) -> Self {
        Self {
            source_root,
            dest_root,
            records: Vec::new(),
            outcome: BuildOutcome::Pending,
        }
    }

    pub(crate) fn push(&mut self, record: ActionRecord) -> &ActionRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub(crate) fn finish(&mut self, outcome: BuildOutcome) {
        self.outcome = outcome;
    }

    pub fn is_success(&self) -> bool {
        self.outcome == BuildOutcome::Success
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, ActionOutcome::Success { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ActionOutcome::SkippedMissing))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ActionOutcome::Failed { .. }))
    }

    /// Total bytes written across all successful actions.
    pub fn bytes_copied(&self) -> u64 {
        self.records
            .iter()
            .map(|r| match r.outcome {
                ActionOutcome::Success { bytes, .. } => bytes,
                _ => 0,
            })
            .sum()
    }

    /// Outcome kinds in execution order.
    pub fn outcome_kinds(&self) -> Vec<&'static str> {
        self.records.iter().map(|r| r.outcome.kind_str()).collect()
    }

    pub fn record(&self, label: &str) -> Option<&ActionRecord> {
        self.records.iter().find(|r| r.label == label)
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn count(&self, pred: impl Fn(&ActionOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }
}

#[cfg(test)]
#[path = "report/report_tests.rs"]
mod report_tests;
