//! sift-setup - Installer for the Sift Claude Code integration
//!
//! Installs and removes sift's footprint on a machine: the binary, the
//! Markdown template documents, the shell hook scripts, and sift's entries
//! in Claude Code's shared `settings.json`. Every operation is an idempotent
//! reconciliation: running install or uninstall any number of times
//! converges to the same state without duplicating entries or touching
//! content the user added themselves.

pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod platform;
pub mod prompt;
pub mod reconcile;
pub mod registrar;
pub mod release;
pub mod settings;
pub mod template;

pub use config::Layout;
pub use error::{Result, SetupError};
pub use platform::Platform;
pub use prompt::{AssumeDefault, Confirmer, TtyConfirmer};
pub use reconcile::{Driver, Outcome, StepReport, StepStatus};
pub use registrar::{ClaudeCli, Registrar, RegistrarOutcome};
pub use release::{GithubReleases, ReleaseSource};
pub use settings::SettingsDocument;

// CLI commands
pub use cli::{InstallCommand, StatusCommand, UninstallCommand};
