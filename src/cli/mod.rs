//! CLI commands for sift-setup.
//!
//! - `install` — reconcile the machine toward the manifest's desired state
//! - `uninstall` — mirrored removal of everything sift owns
//! - `status` — read-only report of what is and isn't configured

pub mod install;
pub mod status;
pub mod uninstall;

pub use install::InstallCommand;
pub use status::StatusCommand;
pub use uninstall::UninstallCommand;
