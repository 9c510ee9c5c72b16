//! Zip packaging of a staged bundle.
//!
//! Browsers accept extensions as a zip archive of the bundle directory with
//! `manifest.json` at the archive root.

use crate::digest::{archive_name, compute_sha256, list_files};
use crate::{StageError, StageResult};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// What was written by [`pack_directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSummary {
    pub archive: PathBuf,
    pub entries: usize,
    pub bytes: u64,
    /// SHA256 of the finished archive file.
    pub checksum: String,
}

/// Write every file under `dir` into a deflated zip at `output`.
///
/// Entry names are relative to `dir` and written in sorted order. The
/// archive may not live inside `dir`.
pub fn pack_directory(dir: &Path, output: &Path) -> StageResult<PackSummary> {
    if !dir.is_dir() {
        return Err(StageError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("bundle directory not found: {}", dir.display()),
        )));
    }

    let dir_abs = fs::canonicalize(dir)?;
    let output_parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => fs::canonicalize(p)?,
        _ => std::env::current_dir()?,
    };
    if output_parent.starts_with(&dir_abs) {
        return Err(StageError::InvalidAction(format!(
            "archive {} would be written inside the bundle directory",
            output.display()
        )));
    }

    let files = list_files(dir)?;

    let file = File::create(output)?;
    let mut zip = ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut bytes = 0u64;
    for rel in &files {
        let contents = fs::read(dir.join(rel))?;
        zip.start_file(archive_name(rel), options)?;
        zip.write_all(&contents)?;
        bytes += contents.len() as u64;
    }

    zip.finish()?;

    let checksum = compute_sha256(&fs::read(output)?);
    tracing::info!(
        archive = %output.display(),
        entries = files.len(),
        bytes,
        "bundle packed"
    );

    Ok(PackSummary {
        archive: output.to_path_buf(),
        entries: files.len(),
        bytes,
        checksum,
    })
}
