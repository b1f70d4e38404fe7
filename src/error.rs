//! Unified error types for sift-setup.
//!
//! Most failures are step-local: the reconciliation driver reports them and
//! moves on to the next step. The exceptions are the fatal pre-flight errors
//! (`UnsupportedPlatform`, `NoRelease`), which abort an install before any
//! mutation happens.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for sift-setup operations.
#[derive(Error, Debug)]
pub enum SetupError {
    /// I/O errors from reading or writing files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings document exists but is not valid JSON.
    ///
    /// Distinguished from `Storage` so callers can refuse to overwrite a
    /// file the user may still want to repair by hand.
    #[error("settings file {path} is corrupt: {source}")]
    CorruptSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Network errors while talking to the release host.
    #[error("network error: {message}")]
    Network { message: String },

    /// Subprocess errors from the external registrar CLI.
    #[error("subprocess error: {message}")]
    Subprocess { message: String },

    /// The running host is not one of the supported release targets.
    #[error("unsupported platform: {os} {arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// The release host reported no published releases.
    #[error("could not determine latest release")]
    NoRelease,

    /// Layout or environment configuration errors.
    #[error("config error: {message}")]
    Config { message: String },
}

/// A specialized Result type for sift-setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

impl SetupError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a corrupt-settings error.
    pub fn corrupt_settings(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CorruptSettings {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a subprocess error.
    pub fn subprocess(message: impl Into<String>) -> Self {
        Self::Subprocess {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error must abort the whole run rather than one step.
    ///
    /// Fatal errors are detected during pre-flight, before any mutation.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnsupportedPlatform { .. } | Self::NoRelease)
    }
}

impl From<io::Error> for SetupError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}
