//! Subscriber installation

use crate::LogLevel;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable that overrides the configured level
pub const LOG_ENV_VAR: &str = "RUST_LOG";

/// Build the filter for a configured level.
///
/// A non-empty `env_directives` string (normally the value of `RUST_LOG`)
/// wins over `level`. Invalid directives fall back to `level`.
pub fn build_filter(level: LogLevel, env_directives: Option<&str>) -> EnvFilter {
    let fallback = || EnvFilter::default().add_directive(level.to_filter().into());

    match env_directives.map(str::trim) {
        Some(directives) if !directives.is_empty() => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| fallback())
        }
        _ => fallback(),
    }
}

/// Initialize diagnostic logging on stderr.
///
/// Progress output is not routed through here; this only carries tracing
/// events. Calling it more than once keeps the first subscriber.
pub fn init_logging(level: LogLevel) {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(level, env.as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    let subscriber = tracing_subscriber::registry().with(fmt_layer);

    // Try to set as global default (ignore error if already set)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
