//! Integration tests for staging the default extension layout.
//!
//! Each test builds a throwaway project tree, runs the orchestrator and
//! inspects the resulting bundle directory.

#![allow(non_snake_case)]

use extstage_bundle::{
    ActionOutcome, BuildOutcome, StageError, StagingAction, default_layout, digest_tree,
    run_build,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Project {
    temp: TempDir,
}

impl Project {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("project")).unwrap();
        Self { temp }
    }

    fn root(&self) -> PathBuf {
        self.temp.path().join("project")
    }

    fn dist(&self) -> PathBuf {
        self.temp.path().join("dist")
    }

    fn write(&self, rel: &str, contents: &[u8]) {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Manifest, pages and stylesheets: everything the layout requires.
    fn with_required_assets(self) -> Self {
        self.write("src/manifest.json", b"{\"manifest_version\":3}");
        for page in ["popup", "options", "dashboard"] {
            self.write(
                &format!("src/{page}/{page}.html"),
                format!("<html>{page}</html>").as_bytes(),
            );
            self.write(
                &format!("src/{page}/{page}.css"),
                format!(".{page} {{}}").as_bytes(),
            );
        }
        self
    }

    fn with_icons(self) -> Self {
        self.write("icons/icon-16.png", b"16");
        self.write("icons/icon-48.png", b"48");
        self
    }

    fn with_scripts(self) -> Self {
        self.write("src/background/Background.res.js", b"// background");
        self.write("src/content/Content.res.js", b"// content");
        self.write("src/popup/Popup.res.js", b"// popup");
        self.write("src/options/Options.res.js", b"// options");
        self.write("src/dashboard/Dashboard.res.js", b"// dashboard");
        self
    }
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Optional artifacts
// =============================================================================

mod optional_artifacts {
    use super::*;

    #[test]
    fn run_build___missing_optional_sources___succeed_as_skipped() {
        let project = Project::new().with_required_assets();

        let report = run_build(project.root(), project.dist(), &default_layout()).unwrap();

        assert!(report.is_success());
        for label in [
            "background.js",
            "content.js",
            "popup.js",
            "options.js",
            "dashboard.js",
            "wasm",
            "icons",
        ] {
            let record = report.record(label).unwrap();
            assert_eq!(record.outcome, ActionOutcome::SkippedMissing, "{label}");
            assert!(!project.dist().join(label).exists(), "{label} was created");
        }
    }

    #[test]
    fn run_build___static_assets_only___stages_flat_layout() {
        let project = Project::new().with_required_assets().with_icons();

        let report = run_build(project.root(), project.dist(), &default_layout()).unwrap();

        assert_eq!(report.outcome, BuildOutcome::Success);
        assert_eq!(
            dir_entries(&project.dist()),
            vec![
                "dashboard.css",
                "dashboard.html",
                "icons",
                "manifest.json",
                "options.css",
                "options.html",
                "popup.css",
                "popup.html",
            ]
        );
        assert_eq!(
            dir_entries(&project.dist().join("icons")),
            vec!["icon-16.png", "icon-48.png"]
        );
        assert!(!project.dist().join("wasm").exists());
        assert!(!project.dist().join("background.js").exists());
    }

    #[test]
    fn run_build___native_package_present___copied_under_wasm() {
        let project = Project::new().with_required_assets();
        project.write("rust_core/pkg/a.wasm", b"\0asm\x01\0\0\0");
        project.write("rust_core/pkg/b.js", b"export default init;");

        run_build(project.root(), project.dist(), &default_layout()).unwrap();

        assert_eq!(
            fs::read(project.dist().join("wasm/a.wasm")).unwrap(),
            b"\0asm\x01\0\0\0"
        );
        assert_eq!(
            fs::read(project.dist().join("wasm/b.js")).unwrap(),
            b"export default init;"
        );
    }

    #[test]
    fn run_build___compiled_scripts_present___flattened_and_renamed() {
        let project = Project::new().with_required_assets().with_scripts();

        let report = run_build(project.root(), project.dist(), &default_layout()).unwrap();

        assert_eq!(report.skipped(), 2);
        assert_eq!(
            fs::read(project.dist().join("background.js")).unwrap(),
            b"// background"
        );
        assert_eq!(
            fs::read(project.dist().join("dashboard.js")).unwrap(),
            b"// dashboard"
        );
    }
}

// =============================================================================
// Required artifacts
// =============================================================================

mod required_artifacts {
    use super::*;

    #[test]
    fn run_build___missing_manifest___aborts_with_empty_dest() {
        let project = Project::new().with_required_assets().with_icons();
        fs::remove_file(project.root().join("src/manifest.json")).unwrap();

        let aborted = run_build(project.root(), project.dist(), &default_layout()).unwrap_err();

        assert!(matches!(
            aborted.error,
            StageError::RequiredArtifactMissing { ref action, .. } if action == "manifest.json"
        ));
        assert_eq!(aborted.report.outcome, BuildOutcome::Aborted);
        assert_eq!(aborted.report.records.len(), 1);
        assert!(project.dist().is_dir());
        assert!(dir_entries(&project.dist()).is_empty());
    }

    #[test]
    fn run_build___missing_required_in_middle___stops_after_failing_action() {
        let project = Project::new().with_required_assets().with_icons();
        fs::remove_file(project.root().join("src/options/options.css")).unwrap();
        let actions = default_layout();
        let failing_index = actions
            .iter()
            .position(|a| a.label() == "options.css")
            .unwrap();

        let aborted = run_build(project.root(), project.dist(), &actions).unwrap_err();

        assert_eq!(aborted.report.records.len(), failing_index + 1);
        assert!(matches!(
            aborted.report.records[failing_index].outcome,
            ActionOutcome::Failed { .. }
        ));
        // Earlier actions stay on disk, later ones never ran.
        assert!(project.dist().join("popup.css").exists());
        assert!(!project.dist().join("dashboard.css").exists());
        assert!(!project.dist().join("icons").exists());
    }

    #[test]
    fn run_build___missing_source_root___returns_error() {
        let project = Project::new();

        let aborted = run_build(
            project.root().join("absent"),
            project.dist(),
            &default_layout(),
        )
        .unwrap_err();

        assert!(matches!(aborted.error, StageError::SourceRootNotFound(_)));
    }
}

// =============================================================================
// Idempotence
// =============================================================================

mod idempotence {
    use super::*;

    #[test]
    fn run_build___twice___identical_tree_and_outcomes() {
        let project = Project::new()
            .with_required_assets()
            .with_icons()
            .with_scripts();
        project.write("rust_core/pkg/core_bg.wasm", b"\0asm");

        let first = run_build(project.root(), project.dist(), &default_layout()).unwrap();
        let first_digest = digest_tree(&project.dist()).unwrap();
        let second = run_build(project.root(), project.dist(), &default_layout()).unwrap();
        let second_digest = digest_tree(&project.dist()).unwrap();

        assert_eq!(first.outcome_kinds(), second.outcome_kinds());
        assert_eq!(first.records, second.records);
        assert_eq!(first_digest, second_digest);
    }

    #[test]
    fn run_build___existing_dest_files___are_kept_and_overwritten() {
        let project = Project::new().with_required_assets();
        fs::create_dir_all(project.dist()).unwrap();
        fs::write(project.dist().join("manifest.json"), b"stale").unwrap();
        fs::write(project.dist().join("notes.txt"), b"unrelated").unwrap();

        run_build(project.root(), project.dist(), &default_layout()).unwrap();

        assert_eq!(
            fs::read(project.dist().join("manifest.json")).unwrap(),
            b"{\"manifest_version\":3}"
        );
        assert_eq!(
            fs::read(project.dist().join("notes.txt")).unwrap(),
            b"unrelated"
        );
    }

    #[test]
    fn run_build___directory_copy___is_additive() {
        let project = Project::new().with_required_assets().with_icons();
        run_build(project.root(), project.dist(), &default_layout()).unwrap();
        fs::remove_file(project.root().join("icons/icon-48.png")).unwrap();

        run_build(project.root(), project.dist(), &default_layout()).unwrap();

        assert!(project.dist().join("icons/icon-48.png").exists());
    }
}

// =============================================================================
// Custom action lists
// =============================================================================

mod custom_actions {
    use super::*;

    #[test]
    fn run_build___optional_missing_vs_optional_failed___are_distinct() {
        let project = Project::new();
        project.write("not-a-dir", b"file");
        let actions = vec![
            StagingAction::file("absent.js", "absent.js").optional(),
            StagingAction::directory("not-a-dir", "pkg").optional(),
        ];

        let report = run_build(project.root(), project.dist(), &actions).unwrap();

        assert_eq!(report.outcome_kinds(), vec!["skipped_missing", "failed"]);
    }
}
