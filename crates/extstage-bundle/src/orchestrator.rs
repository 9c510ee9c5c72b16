//! The staging orchestrator.
//!
//! Runs an ordered list of [`StagingAction`]s against a source root and a
//! destination root, one at a time, and accumulates a [`BuildReport`].
//!
//! Per action:
//!
//! ```text
//! probe(source)
//!   ├── Missing ── optional ──> SkippedMissing, continue
//!   │          └── required ──> Failed, abort
//!   └── Found ── ensure parent, copy
//!                  ├── ok ─────────────> Success, continue
//!                  └── err ── optional ──> Failed, continue
//!                         └── required ──> Failed, abort
//! ```
//!
//! An abort leaves everything already staged in place.

use crate::fsops::{self, CopyStats, Probe};
use crate::report::{ActionOutcome, ActionRecord, BuildOutcome, BuildReport};
use crate::{ActionKind, BuildAborted, StageError, StagingAction, validate_actions};
use std::io;
use std::path::{Path, PathBuf};

/// Receives each record as soon as it is appended to the report.
pub trait StageObserver {
    fn on_record(&mut self, record: &ActionRecord);
}

impl<F> StageObserver for F
where
    F: FnMut(&ActionRecord),
{
    fn on_record(&mut self, record: &ActionRecord) {
        self(record)
    }
}

/// Observer that ignores every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn on_record(&mut self, _record: &ActionRecord) {}
}

/// Executes staging actions between two roots.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    source_root: PathBuf,
    dest_root: PathBuf,
}

/// What the loop does after an action.
enum Step {
    Continue(ActionOutcome),
    Abort(ActionOutcome, StageError),
}

impl Orchestrator {
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Run every action in order.
    ///
    /// Returns the finished report, or [`BuildAborted`] with the partial
    /// report when a required action fails or a root is unusable.
    pub fn run(
        &self,
        actions: &[StagingAction],
        observer: &mut dyn StageObserver,
    ) -> Result<BuildReport, BuildAborted> {
        let mut report = BuildReport::new(self.source_root.clone(), self.dest_root.clone());

        if let Err(error) = self.prepare(actions) {
            tracing::error!(%error, "build cannot start");
            report.finish(BuildOutcome::Aborted);
            return Err(BuildAborted::new(report, error));
        }

        tracing::info!(
            source_root = %self.source_root.display(),
            dest_root = %self.dest_root.display(),
            actions = actions.len(),
            "staging bundle"
        );

        for action in actions {
            match self.execute(action) {
                Step::Continue(outcome) => {
                    let record = report.push(ActionRecord::new(action, outcome));
                    observer.on_record(record);
                }
                Step::Abort(outcome, error) => {
                    let record = report.push(ActionRecord::new(action, outcome));
                    observer.on_record(record);
                    tracing::error!(action = %action.label(), %error, "aborting build");
                    report.finish(BuildOutcome::Aborted);
                    return Err(BuildAborted::new(report, error));
                }
            }
        }

        report.finish(BuildOutcome::Success);
        tracing::info!(
            succeeded = report.succeeded(),
            skipped = report.skipped(),
            failed = report.failed(),
            "staging complete"
        );
        Ok(report)
    }

    /// Validate the action list and both roots before touching anything.
    fn prepare(&self, actions: &[StagingAction]) -> Result<(), StageError> {
        validate_actions(actions)?;

        let source_root = match fsops::probe(&self.source_root) {
            Ok(Probe::Found(ActionKind::Directory)) => fsops::resolve(&self.source_root)
                .map_err(|_| StageError::SourceRootNotFound(self.source_root.clone()))?,
            _ => return Err(StageError::SourceRootNotFound(self.source_root.clone())),
        };

        let not_writable = |source| StageError::DestRootNotWritable {
            path: self.dest_root.clone(),
            source,
        };
        if fsops::resolve(&self.dest_root).map_err(not_writable)? == source_root {
            return Err(StageError::InvalidAction(format!(
                "destination root {} is the source root",
                self.dest_root.display()
            )));
        }

        fsops::ensure_dir(&self.dest_root).map_err(not_writable)
    }

    fn execute(&self, action: &StagingAction) -> Step {
        let source = self.source_root.join(action.source());
        let dest = self.dest_root.join(action.dest());

        tracing::debug!(
            action = %action.label(),
            source = %source.display(),
            dest = %dest.display(),
            kind = %action.kind(),
            "probing source"
        );

        let found = match fsops::probe(&source) {
            Ok(Probe::Found(kind)) => kind,
            Ok(Probe::Missing) => return Self::missing(action, &source),
            Err(e) => return Self::copy_failed(action, e.into()),
        };

        match copy_artifact(action.kind(), found, &source, &dest) {
            Ok(stats) => {
                tracing::info!(
                    action = %action.label(),
                    files = stats.files,
                    bytes = stats.bytes,
                    "copied"
                );
                Step::Continue(ActionOutcome::Success {
                    files: stats.files,
                    bytes: stats.bytes,
                })
            }
            Err(e) => Self::copy_failed(action, e),
        }
    }

    fn missing(action: &StagingAction, source: &Path) -> Step {
        if action.is_required() {
            let error = StageError::RequiredArtifactMissing {
                action: action.label(),
                path: source.to_path_buf(),
            };
            Step::Abort(
                ActionOutcome::Failed {
                    reason: error.to_string(),
                },
                error,
            )
        } else {
            tracing::warn!(
                action = %action.label(),
                source = %source.display(),
                hint = action.hint().unwrap_or_default(),
                "optional artifact not found"
            );
            Step::Continue(ActionOutcome::SkippedMissing)
        }
    }

    fn copy_failed(action: &StagingAction, failure: CopyFailure) -> Step {
        let (reason, error) = match failure {
            CopyFailure::Ensure { path, source } => {
                let error = StageError::DirectoryEnsureFailed { path, source };
                (error.to_string(), error)
            }
            CopyFailure::Io(source) => (
                source.to_string(),
                StageError::RequiredCopyFailed {
                    action: action.label(),
                    source,
                },
            ),
        };

        if action.is_required() {
            Step::Abort(ActionOutcome::Failed { reason }, error)
        } else {
            tracing::warn!(action = %action.label(), error = %reason, "optional copy failed");
            Step::Continue(ActionOutcome::Failed { reason })
        }
    }
}

/// Why a found artifact could not be staged.
enum CopyFailure {
    /// A destination directory could not be created.
    Ensure { path: PathBuf, source: io::Error },
    Io(io::Error),
}

impl From<io::Error> for CopyFailure {
    fn from(e: io::Error) -> Self {
        CopyFailure::Io(e)
    }
}

fn ensure(path: &Path) -> Result<(), CopyFailure> {
    fsops::ensure_dir(path).map_err(|source| CopyFailure::Ensure {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy one artifact once it is known to exist.
///
/// Refuses to copy a file onto itself or a directory into its own subtree,
/// before anything is created at the destination.
fn copy_artifact(
    declared: ActionKind,
    found: ActionKind,
    source: &Path,
    dest: &Path,
) -> Result<CopyStats, CopyFailure> {
    if declared != found {
        return Err(invalid_input(format!(
            "expected a {declared} at {} but found a {found}",
            source.display()
        )));
    }

    let resolved_source = fsops::resolve(source)?;
    let resolved_dest = fsops::resolve(dest)?;

    match declared {
        ActionKind::File => {
            if resolved_source == resolved_dest {
                return Err(invalid_input(format!(
                    "{} is both source and destination",
                    source.display()
                )));
            }
            if let Some(parent) = dest.parent() {
                ensure(parent)?;
            }
            Ok(fsops::copy_file(source, dest)?)
        }
        ActionKind::Directory => {
            if resolved_dest.starts_with(&resolved_source) {
                return Err(invalid_input(format!(
                    "{} lies inside its source {}",
                    dest.display(),
                    source.display()
                )));
            }
            ensure(dest)?;
            Ok(fsops::copy_dir_recursive(source, dest)?)
        }
    }
}

fn invalid_input(message: String) -> CopyFailure {
    CopyFailure::Io(io::Error::new(io::ErrorKind::InvalidInput, message))
}

/// Run a build without observing progress.
///
/// # Example
///
/// ```no_run
/// use extstage_bundle::{default_layout, run_build};
///
/// let report = run_build(".", "dist", &default_layout())?;
/// println!("staged {} artifacts", report.succeeded());
/// # Ok::<(), extstage_bundle::BuildAborted>(())
/// ```
pub fn run_build(
    source_root: impl Into<PathBuf>,
    dest_root: impl Into<PathBuf>,
    actions: &[StagingAction],
) -> Result<BuildReport, BuildAborted> {
    Orchestrator::new(source_root, dest_root).run(actions, &mut NoopObserver)
}
