//! Filesystem layout for sift-setup.
//!
//! Every path the reconciler touches is derived from a single resolved
//! [`Layout`]. Resolution order for each root:
//! 1. Environment variable (`SIFT_CLAUDE_DIR`, `SIFT_INSTALL_DIR`)
//! 2. Default under the user's home directory
//!
//! Tests construct layouts with [`Layout::with_roots`] so nothing in the
//! reconciler ever touches the real home directory.

use std::env;
use std::path::{Path, PathBuf};

/// Name of the per-project data directory.
pub const DATA_DIR_NAME: &str = ".sift";

/// Historical name of the per-project data directory.
///
/// Renamed to [`DATA_DIR_NAME`] on first encounter, once, never merged.
pub const LEGACY_DATA_DIR_NAME: &str = ".sift-data";

/// Name of the installed binary.
pub const BINARY_NAME: &str = "sift";

/// Resolved filesystem layout for one reconciliation run.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Claude Code's configuration directory (default `~/.claude`).
    claude_dir: PathBuf,
    /// Directory the sift binary is installed into (default `~/.local/bin`).
    install_dir: PathBuf,
}

impl Layout {
    /// Resolve the layout from the environment.
    ///
    /// Returns `None` when no home directory can be determined and neither
    /// override variable is set.
    pub fn resolve() -> Option<Self> {
        let claude_dir = dir_from_env("SIFT_CLAUDE_DIR")
            .or_else(|| dirs::home_dir().map(|h| h.join(".claude")))?;
        let install_dir = dir_from_env("SIFT_INSTALL_DIR")
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("bin")))?;

        Some(Self {
            claude_dir,
            install_dir,
        })
    }

    /// Construct a layout with explicit roots. Used by tests.
    pub fn with_roots(claude_dir: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            claude_dir: claude_dir.into(),
            install_dir: install_dir.into(),
        }
    }

    /// Claude Code's configuration directory.
    pub fn claude_dir(&self) -> &Path {
        &self.claude_dir
    }

    /// Path to the shared settings document.
    pub fn settings_path(&self) -> PathBuf {
        self.claude_dir.join("settings.json")
    }

    /// Directory the hook scripts are installed into.
    pub fn hooks_dir(&self) -> PathBuf {
        self.claude_dir.join("hooks")
    }

    /// Path of one installed template document.
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.claude_dir.join(name)
    }

    /// Path of the memory document that carries the marked directive section.
    pub fn memory_doc_path(&self) -> PathBuf {
        self.claude_dir.join(crate::manifest::MEMORY_DOC)
    }

    /// Directory the binary is installed into.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Final path of the installed binary.
    pub fn binary_path(&self) -> PathBuf {
        self.install_dir.join(BINARY_NAME)
    }

    /// Per-project data directory under the given project root.
    pub fn data_dir(project_root: &Path) -> PathBuf {
        project_root.join(DATA_DIR_NAME)
    }

    /// Historical per-project data directory under the given project root.
    pub fn legacy_data_dir(project_root: &Path) -> PathBuf {
        project_root.join(LEGACY_DATA_DIR_NAME)
    }
}

/// Read a directory override from the environment.
///
/// Empty values are ignored with a warning. Relative paths are
/// canonicalized when possible, otherwise used as given.
fn dir_from_env(var: &str) -> Option<PathBuf> {
    let value = env::var(var).ok()?;
    if value.is_empty() {
        tracing::warn!("{} is empty, using default", var);
        return None;
    }

    let path = PathBuf::from(&value);
    if path.is_absolute() {
        return Some(path);
    }
    if let Ok(canonical) = path.canonicalize() {
        return Some(canonical);
    }
    tracing::warn!("{} is relative and doesn't exist, using as-is", var);
    Some(path)
}
