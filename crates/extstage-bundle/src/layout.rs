//! The browser-extension bundle layout.
//!
//! Paths are relative to the project root. Every page, stylesheet and
//! compiled script lands flat at the bundle root; the native module package
//! goes under `wasm/` and icons under `icons/`.

use crate::StagingAction;

/// Directory the application layer's pages and compiled scripts live in.
pub const SOURCE_DIR: &str = "src";

/// Output directory of the native module toolchain.
pub const NATIVE_PKG_DIR: &str = "rust_core/pkg";

/// Static icon assets.
pub const ICONS_DIR: &str = "icons";

/// Default destination root.
pub const DIST_DIR: &str = "dist";

const PAGES: [&str; 3] = ["popup", "options", "dashboard"];

/// (source relative to `src/`, flattened destination)
const SCRIPTS: [(&str, &str); 5] = [
    ("background/Background.res.js", "background.js"),
    ("content/Content.res.js", "content.js"),
    ("popup/Popup.res.js", "popup.js"),
    ("options/Options.res.js", "options.js"),
    ("dashboard/Dashboard.res.js", "dashboard.js"),
];

const SCRIPT_HINT: &str = "build the application layer first";
const NATIVE_HINT: &str = "build the native module first";
const ICONS_HINT: &str = "icons directory not found";

/// The ordered action list for a complete extension bundle.
///
/// Manifest, pages and stylesheets are required. Compiled scripts, the
/// native module package and icons are optional since they come from
/// toolchains that may not have run yet.
#[must_use]
pub fn default_layout() -> Vec<StagingAction> {
    let mut actions = vec![StagingAction::file(
        src("manifest.json"),
        crate::MANIFEST_FILE,
    )];

    for page in PAGES {
        actions.push(StagingAction::file(
            src(&format!("{page}/{page}.html")),
            format!("{page}.html"),
        ));
    }

    for page in PAGES {
        actions.push(StagingAction::file(
            src(&format!("{page}/{page}.css")),
            format!("{page}.css"),
        ));
    }

    for (source, dest) in SCRIPTS {
        actions.push(
            StagingAction::file(src(source), dest)
                .optional()
                .with_hint(SCRIPT_HINT),
        );
    }

    actions.push(
        StagingAction::directory(NATIVE_PKG_DIR, "wasm")
            .optional()
            .with_hint(NATIVE_HINT),
    );
    actions.push(
        StagingAction::directory(ICONS_DIR, "icons")
            .optional()
            .with_hint(ICONS_HINT),
    );

    actions
}

fn src(rel: &str) -> String {
    format!("{SOURCE_DIR}/{rel}")
}
