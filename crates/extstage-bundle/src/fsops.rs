//! Filesystem primitives used by the orchestrator.
//!
//! Existence checks are kept separate from copying so that a missing source
//! is never confused with a copy that failed for some other I/O reason.

use crate::ActionKind;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of looking for a source artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Something exists at the path.
    Found(ActionKind),
    /// Nothing exists at the path.
    Missing,
}

/// Totals for a completed copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: u64,
    pub bytes: u64,
}

impl CopyStats {
    fn add_file(&mut self, bytes: u64) {
        self.files += 1;
        self.bytes += bytes;
    }
}

/// Look for a source artifact.
///
/// Only `NotFound` maps to [`Probe::Missing`]; any other metadata error
/// (permissions, broken mount) is returned as an error.
pub fn probe(path: &Path) -> io::Result<Probe> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(Probe::Found(ActionKind::Directory)),
        Ok(_) => Ok(Probe::Found(ActionKind::File)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Probe::Missing),
        Err(e) => Err(e),
    }
}

/// Create a directory and all parents, idempotent.
///
/// Fails if the path exists as something other than a directory.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)?;
    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists and is not a directory", path.display()),
        ));
    }
    Ok(())
}

/// Canonical form of a path that may not exist yet.
///
/// The nearest existing ancestor is canonicalized and the remaining
/// components are appended unchanged.
pub fn resolve(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut rest = Vec::new();
    loop {
        match fs::canonicalize(existing) {
            Ok(base) => return Ok(rest.iter().rev().fold(base, |acc, part| acc.join(part))),
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Err(e);
                };
                rest.push(name.to_os_string());
                existing = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            Err(e) => return Err(e),
        }
    }
}

/// Copy one file, overwriting the destination if it exists.
pub fn copy_file(source: &Path, dest: &Path) -> io::Result<CopyStats> {
    let bytes = fs::copy(source, dest)?;
    Ok(CopyStats { files: 1, bytes })
}

/// Copy a directory tree over `dest`.
///
/// Files at matching relative paths are overwritten. Files that exist only
/// under `dest` are left alone. Entries are visited in name order.
pub fn copy_dir_recursive(source: &Path, dest: &Path) -> io::Result<CopyStats> {
    let mut stats = CopyStats::default();
    copy_dir_into(source, dest, &mut stats)?;
    Ok(stats)
}

fn copy_dir_into(source: &Path, dest: &Path, stats: &mut CopyStats) -> io::Result<()> {
    ensure_dir(dest)?;

    let mut entries = fs::read_dir(source)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let from = entry.path();
        let to = dest.join(entry.file_name());

        // Follow symlinks so linked artifacts are copied as their targets.
        if fs::metadata(&from)?.is_dir() {
            copy_dir_into(&from, &to, stats)?;
        } else {
            stats.add_file(fs::copy(&from, &to)?);
        }
    }

    Ok(())
}
