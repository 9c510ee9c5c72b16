//! Commands that work on an already staged bundle directory.

use crate::config::StageConfig;
use anyhow::{Context, Result};
use extstage_bundle::digest::list_files;
use extstage_bundle::{MANIFEST_FILE, digest_tree, pack_directory};
use std::path::{Path, PathBuf};

/// Zip the staged bundle.
pub fn pack(config: &StageConfig, dest_root: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let dest_root = dest_root.unwrap_or_else(|| config.bundle.dest_root.clone());
    let output = output
        .or_else(|| config.bundle.archive.clone())
        .unwrap_or_else(|| default_archive_name(config.name()));

    ensure_staged(&dest_root)?;

    println!("Packing bundle: {}", dest_root.display());
    let summary = pack_directory(&dest_root, &output)
        .with_context(|| format!("Failed to write archive: {}", output.display()))?;

    println!("  Entries: {}", summary.entries);
    println!("  Size: {} bytes (uncompressed)", summary.bytes);
    println!("  Checksum: sha256:{}", summary.checksum);
    println!("Archive created: {}", summary.archive.display());
    Ok(())
}

/// Print the content digest of a staged bundle.
pub fn digest(config: &StageConfig, dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.bundle.dest_root.clone());

    let digest =
        digest_tree(&dir).with_context(|| format!("Failed to digest: {}", dir.display()))?;

    println!("sha256:{digest}  {}", dir.display());
    Ok(())
}

/// List the files in a staged bundle.
pub fn list(config: &StageConfig, dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.bundle.dest_root.clone());

    let files = list_files(&dir).with_context(|| format!("Failed to read: {}", dir.display()))?;

    println!("Bundle: {}", dir.display());
    println!("\nFiles:");
    for file in &files {
        println!("  {}", file.display());
    }
    println!("\n{} files", files.len());
    Ok(())
}

fn ensure_staged(dest_root: &Path) -> Result<()> {
    if !dest_root.join(MANIFEST_FILE).is_file() {
        anyhow::bail!(
            "No {MANIFEST_FILE} in {}. Run `extstage build` first.",
            dest_root.display()
        );
    }
    Ok(())
}

fn default_archive_name(name: &str) -> PathBuf {
    PathBuf::from(format!("{name}.zip"))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_archive_name___uses_bundle_name() {
        assert_eq!(
            default_archive_name("doubletrack"),
            PathBuf::from("doubletrack.zip")
        );
    }

    #[test]
    fn ensure_staged___missing_manifest___fails_with_hint() {
        let temp = TempDir::new().unwrap();

        let err = ensure_staged(temp.path()).unwrap_err();

        assert!(err.to_string().contains("extstage build"));
    }

    #[test]
    fn pack___staged_bundle___writes_archive() {
        let temp = TempDir::new().unwrap();
        let dist = temp.path().join("dist");
        std::fs::create_dir(&dist).unwrap();
        std::fs::write(dist.join(MANIFEST_FILE), b"{}").unwrap();
        let output = temp.path().join("out.zip");

        pack(&StageConfig::default(), Some(dist), Some(output.clone())).unwrap();

        assert!(output.is_file());
    }
}
