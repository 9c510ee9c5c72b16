//! One progress line per staging action.

use extstage_bundle::{ActionKind, ActionOutcome, ActionRecord, StageObserver};
use std::io::{self, Write};

/// Prints each record to a writer as it arrives.
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl ConsoleProgress<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StageObserver for ConsoleProgress<W> {
    fn on_record(&mut self, record: &ActionRecord) {
        // Progress output is best effort; a closed stdout must not fail the build.
        let _ = writeln!(self.out, "{}", format_line(record));
    }
}

/// Render the progress line for one record.
pub fn format_line(record: &ActionRecord) -> String {
    match &record.outcome {
        ActionOutcome::Success { files, .. } => match record.kind {
            ActionKind::File => format!("  ✓ Copied {}", record.label),
            ActionKind::Directory => format!(
                "  ✓ Copied {}/ ({} {})",
                record.label,
                files,
                if *files == 1 { "file" } else { "files" }
            ),
        },
        ActionOutcome::SkippedMissing => match &record.hint {
            Some(hint) => format!("  ⚠ {} not found ({hint})", record.source.display()),
            None => format!("  ⚠ {} not found", record.source.display()),
        },
        ActionOutcome::Failed { reason } if record.required => {
            format!("  ✗ {}: {reason}", record.label)
        }
        ActionOutcome::Failed { reason } => {
            format!("  ⚠ {} skipped: {reason}", record.label)
        }
    }
}
