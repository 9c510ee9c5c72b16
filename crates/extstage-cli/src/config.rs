//! extstage.toml parsing and validation

use anyhow::{Context, Result};
use extstage_bundle::{ActionKind, StagingAction, default_layout, layout, validate_actions};
use extstage_logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const CONFIG_FILE: &str = "extstage.toml";

/// extstage.toml structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageConfig {
    #[serde(default)]
    pub bundle: BundleSection,

    /// Replaces the built-in layout when non-empty
    #[serde(default, rename = "action")]
    pub actions: Vec<ActionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleSection {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    #[serde(default = "default_dest_root")]
    pub dest_root: PathBuf,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Default output of `extstage pack`
    #[serde(default)]
    pub archive: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEntry {
    pub source: PathBuf,
    pub dest: PathBuf,

    #[serde(default)]
    pub kind: ActionKind,

    #[serde(default = "default_required")]
    pub required: bool,

    #[serde(default)]
    pub hint: Option<String>,
}

fn default_source_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_dest_root() -> PathBuf {
    PathBuf::from(layout::DIST_DIR)
}

fn default_required() -> bool {
    true
}

impl Default for BundleSection {
    fn default() -> Self {
        Self {
            name: None,
            source_root: default_source_root(),
            dest_root: default_dest_root(),
            log_level: LogLevel::default(),
            archive: None,
        }
    }
}

impl ActionEntry {
    pub fn to_action(&self) -> StagingAction {
        let action = StagingAction::new(&self.source, &self.dest, self.kind);
        let action = if self.required {
            action.required()
        } else {
            action.optional()
        };
        match &self.hint {
            Some(hint) => action.with_hint(hint.clone()),
            None => action,
        }
    }
}

impl StageConfig {
    /// Load config from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;

        Self::parse(&content)
    }

    /// Parse config from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Load the explicit config, or `extstage.toml` in `dir` if present,
    /// or fall back to built-in defaults.
    ///
    /// Relative paths in an explicit config resolve against the config
    /// file's directory.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            let mut config = Self::from_file(path)?;
            if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                config.rebase(base);
            }
            return Ok(config);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn rebase(&mut self, base: &Path) {
        let rebase = |p: &Path| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.to_path_buf()
            }
        };
        self.bundle.source_root = rebase(&self.bundle.source_root);
        self.bundle.dest_root = rebase(&self.bundle.dest_root);
        self.bundle.archive = self.bundle.archive.as_deref().map(rebase);
    }

    /// Bundle name for banners
    pub fn name(&self) -> &str {
        self.bundle.name.as_deref().unwrap_or("extension")
    }

    /// The action list this config describes
    pub fn actions(&self) -> Vec<StagingAction> {
        if self.actions.is_empty() {
            default_layout()
        } else {
            self.actions.iter().map(ActionEntry::to_action).collect()
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.bundle.name {
            if name.trim().is_empty() {
                anyhow::bail!("Bundle name cannot be empty");
            }
        }

        if self.bundle.dest_root.as_os_str().is_empty() {
            anyhow::bail!("Destination root cannot be empty");
        }

        validate_actions(&self.actions()).context("Invalid action list")?;

        Ok(())
    }
}

/// Check command implementation
pub fn check(config: &StageConfig) -> Result<()> {
    config.validate()?;

    let actions = config.actions();
    let required = actions.iter().filter(|a| a.is_required()).count();

    println!("✓ Bundle: {}", config.name());
    println!("✓ Source root: {}", config.bundle.source_root.display());
    println!("✓ Destination root: {}", config.bundle.dest_root.display());
    println!(
        "✓ Actions: {} ({} required, {} optional)",
        actions.len(),
        required,
        actions.len() - required
    );

    let rows = actions
        .iter()
        .map(|a| {
            vec![
                a.source().display().to_string(),
                a.dest().display().to_string(),
                a.kind().to_string(),
                if a.is_required() { "required" } else { "optional" }.to_string(),
            ]
        })
        .collect();
    println!();
    crate::output::print_table(&["SOURCE", "DEST", "KIND", "POLICY"], rows);

    println!("\nConfig is valid!");

    Ok(())
}
