//! extstage-logging - Diagnostic logging for extstage
//!
//! This crate provides:
//! - [`LogLevel`] for selecting verbosity from flags and config files
//! - [`init_logging`] to install a stderr `tracing` subscriber
//! - [`build_filter`] combining the configured level with `RUST_LOG`

mod layer;
mod level;

pub use layer::{LOG_ENV_VAR, build_filter, init_logging};
pub use level::{LogLevel, ParseLogLevelError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, init_logging};
}
