//! Build command implementation

use crate::config::StageConfig;
use crate::output;
use crate::progress::ConsoleProgress;
use anyhow::{Context, Result};
use extstage_bundle::{BuildReport, Orchestrator};
use std::path::{Path, PathBuf};

/// Run the build command
pub fn run(
    config: &StageConfig,
    source_root: Option<PathBuf>,
    dest_root: Option<PathBuf>,
    report_path: Option<PathBuf>,
) -> Result<()> {
    config.validate()?;

    let source_root = source_root.unwrap_or_else(|| config.bundle.source_root.clone());
    let dest_root = dest_root.unwrap_or_else(|| config.bundle.dest_root.clone());
    let actions = config.actions();

    println!("📦 Building {} bundle...", config.name());

    let mut progress = ConsoleProgress::stdout();
    let result = Orchestrator::new(&source_root, &dest_root).run(&actions, &mut progress);

    let report = match result {
        Ok(report) => report,
        Err(aborted) => {
            if let Some(path) = &report_path {
                if let Err(error) = save_report(path, &aborted.report) {
                    tracing::error!(error = %format!("{error:#}"), "report of aborted build not saved");
                }
            }
            return Err(anyhow::Error::new(aborted).context("Build aborted"));
        }
    };

    if let Some(path) = &report_path {
        save_report(path, &report)?;
    }

    println!(
        "\n✅ Build complete! {} copied, {} skipped, {} failed ({} bytes)",
        report.succeeded(),
        report.skipped(),
        report.failed(),
        report.bytes_copied()
    );
    println!(
        "Load {}/ as an unpacked extension in your browser.",
        dest_root.display()
    );

    Ok(())
}

fn save_report(path: &Path, report: &BuildReport) -> Result<()> {
    output::write_json(path, report)
        .with_context(|| format!("Failed to write build report: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "build report written");
    Ok(())
}
