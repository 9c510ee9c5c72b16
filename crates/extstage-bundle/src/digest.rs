//! Content digests for staged trees.

use crate::StageResult;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Compute SHA256 hash of data and return as hex string.
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute a single SHA256 over a whole directory tree.
///
/// Every regular file contributes its `/`-separated relative path and its
/// contents, in sorted path order, so two trees hash equal exactly when they
/// hold the same files with the same bytes.
pub fn digest_tree(root: &Path) -> StageResult<String> {
    let mut hasher = Sha256::new();
    for rel in list_files(root)? {
        let contents = fs::read(root.join(&rel))?;
        let name = archive_name(&rel);

        hasher.update((name.len() as u64).to_le_bytes());
        hasher.update(name.as_bytes());
        hasher.update((contents.len() as u64).to_le_bytes());
        hasher.update(&contents);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Relative paths of every file under `root`, sorted.
pub fn list_files(root: &Path) -> StageResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(root, Path::new(""), &mut files)?;
    files.sort();
    Ok(files)
}

/// Relative path rendered with `/` separators on every platform.
pub(crate) fn archive_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn walk(root: &Path, rel: &Path, files: &mut Vec<PathBuf>) -> StageResult<()> {
    for entry in fs::read_dir(root.join(rel))? {
        let entry = entry?;
        let child = rel.join(entry.file_name());
        if fs::metadata(entry.path())?.is_dir() {
            walk(root, &child, files)?;
        } else {
            files.push(child);
        }
    }
    Ok(())
}
