//! Staging action declarations.
//!
//! A [`StagingAction`] names one artifact to move from the source tree into
//! the bundle. Actions are declared up front and never mutated afterwards;
//! the orchestrator only reads them.

use crate::{StageError, StageResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// What an action copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// A single file, overwritten byte for byte at the destination.
    #[default]
    File,
    /// A directory tree, copied recursively over the destination.
    Directory,
}

impl ActionKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of staging work.
///
/// # Example
///
/// ```
/// use extstage_bundle::{ActionKind, StagingAction};
///
/// let manifest = StagingAction::file("src/manifest.json", "manifest.json").required();
/// let icons = StagingAction::directory("icons", "icons").optional();
///
/// assert!(manifest.is_required());
/// assert_eq!(icons.kind(), ActionKind::Directory);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingAction {
    source: PathBuf,
    dest: PathBuf,
    required: bool,
    kind: ActionKind,
    hint: Option<String>,
}

impl StagingAction {
    /// Declare a required single-file copy.
    #[must_use]
    pub fn file(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self::new(source, dest, ActionKind::File)
    }

    /// Declare a required recursive directory copy.
    #[must_use]
    pub fn directory(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self::new(source, dest, ActionKind::Directory)
    }

    /// Declare an action of the given kind. Actions start out required.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>, kind: ActionKind) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            required: true,
            kind,
            hint: None,
        }
    }

    /// Absence or copy failure aborts the build.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Absence is reported as a skip and copy failure as a recorded failure.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attach a hint shown when the source is missing, such as which
    /// upstream toolchain produces it.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Source path, relative to the source root.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Destination path, relative to the destination root.
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Short name used in progress lines and errors.
    pub fn label(&self) -> String {
        self.dest.display().to_string()
    }

    /// Check that both paths are non-empty and stay inside their roots.
    pub fn validate(&self) -> StageResult<()> {
        check_relative("source", &self.source)?;
        check_relative("dest", &self.dest)?;
        Ok(())
    }
}

impl fmt::Display for StagingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}, {})",
            self.source.display(),
            self.dest.display(),
            self.kind,
            if self.required { "required" } else { "optional" }
        )
    }
}

/// Validate a whole action list: each action individually, plus unique
/// destinations.
pub fn validate_actions(actions: &[StagingAction]) -> StageResult<()> {
    let mut seen = HashSet::new();
    for action in actions {
        action.validate()?;
        if !seen.insert(action.dest()) {
            return Err(StageError::InvalidAction(format!(
                "duplicate destination: {}",
                action.dest().display()
            )));
        }
    }
    Ok(())
}

fn check_relative(field: &str, path: &Path) -> StageResult<()> {
    if path.as_os_str().is_empty() {
        return Err(StageError::InvalidAction(format!("{field} path is empty")));
    }

    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(StageError::InvalidAction(format!(
                    "{field} path escapes its root: {}",
                    path.display()
                )));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(StageError::InvalidAction(format!(
                    "{field} path must be relative: {}",
                    path.display()
                )));
            }
        }
    }

    Ok(())
}
