//! Staging orchestrator for browser-extension bundles
//!
//! This crate assembles a distributable extension directory from artifacts
//! that independent toolchains have already built: a compiled application
//! layer, a compiled native module package and static assets. Nothing is
//! compiled here; artifacts are only copied into their final layout.
//!
//! # Bundle Structure
//!
//! ```text
//! dist/
//! ├── manifest.json
//! ├── popup.html, options.html, dashboard.html
//! ├── popup.css, options.css, dashboard.css
//! ├── background.js, content.js, popup.js, ...   (optional)
//! ├── wasm/                                      (optional)
//! │   ├── core_bg.wasm
//! │   └── core.js
//! └── icons/                                     (optional)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use extstage_bundle::{StagingAction, run_build};
//!
//! let actions = vec![
//!     StagingAction::file("src/manifest.json", "manifest.json"),
//!     StagingAction::directory("rust_core/pkg", "wasm").optional(),
//! ];
//!
//! let report = run_build(".", "dist", &actions)?;
//! assert!(report.is_success());
//! # Ok::<(), extstage_bundle::BuildAborted>(())
//! ```

mod action;
mod error;
mod report;

pub mod archive;
pub mod digest;
pub mod fsops;
pub mod layout;
pub mod orchestrator;

pub use action::{ActionKind, StagingAction, validate_actions};
pub use archive::{PackSummary, pack_directory};
pub use digest::{compute_sha256, digest_tree};
pub use error::{BuildAborted, StageError};
pub use layout::default_layout;
pub use orchestrator::{NoopObserver, Orchestrator, StageObserver, run_build};
pub use report::{ActionOutcome, ActionRecord, BuildOutcome, BuildReport};

/// Result type for staging operations.
pub type StageResult<T> = Result<T, StageError>;

/// Manifest file name at the bundle root.
pub const MANIFEST_FILE: &str = "manifest.json";
