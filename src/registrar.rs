//! External MCP server registration via the host application's CLI.
//!
//! The host owns its server registry; sift only shells out to `claude mcp
//! add`/`claude mcp remove` and classifies the result. "Already registered"
//! and "not found" are idempotent no-ops, everything else with a non-zero
//! exit is a hard step failure.

use std::io;
use std::process::Command;

use crate::error::{Result, SetupError};

/// Result of a registrar invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrarOutcome {
    /// The server was added.
    Registered,
    /// The server was already present; nothing changed.
    AlreadyRegistered,
    /// The server was removed.
    Removed,
    /// The server was not present; nothing changed.
    NotRegistered,
    /// The host CLI is not installed; the caller decides how to report it.
    CliMissing,
}

/// Narrow interface to the host's server registry.
pub trait Registrar {
    /// Register `name` to run `command`.
    fn add(&self, name: &str, command: &[&str]) -> Result<RegistrarOutcome>;
    /// Remove the registration for `name`.
    fn remove(&self, name: &str) -> Result<RegistrarOutcome>;
}

/// Registrar backed by the `claude` CLI.
#[derive(Debug, Clone)]
pub struct ClaudeCli {
    program: String,
}

impl ClaudeCli {
    pub fn new() -> Self {
        Self::with_program("claude")
    }

    /// Use a different program name. Used by tests.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Option<(bool, String)>> {
        match Command::new(&self.program).args(args).output() {
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                Ok(Some((output.status.success(), stderr)))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SetupError::subprocess(format!(
                "failed to run {}: {}",
                self.program, err
            ))),
        }
    }
}

impl Default for ClaudeCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Registrar for ClaudeCli {
    fn add(&self, name: &str, command: &[&str]) -> Result<RegistrarOutcome> {
        let mut args = vec!["mcp", "add", "--scope", "user", name, "--"];
        args.extend_from_slice(command);

        match self.run(&args)? {
            None => Ok(RegistrarOutcome::CliMissing),
            Some((success, stderr)) => classify_add(success, &stderr),
        }
    }

    fn remove(&self, name: &str) -> Result<RegistrarOutcome> {
        match self.run(&["mcp", "remove", "--scope", "user", name])? {
            None => Ok(RegistrarOutcome::CliMissing),
            Some((success, stderr)) => classify_remove(success, &stderr),
        }
    }
}

/// Classify an `mcp add` result from its exit status and stderr text.
fn classify_add(success: bool, stderr: &str) -> Result<RegistrarOutcome> {
    if success {
        return Ok(RegistrarOutcome::Registered);
    }
    let lower = stderr.to_lowercase();
    if lower.contains("already") || lower.contains("exists") {
        return Ok(RegistrarOutcome::AlreadyRegistered);
    }
    Err(SetupError::subprocess(format!(
        "mcp registration failed: {}",
        stderr.trim()
    )))
}

/// Classify an `mcp remove` result from its exit status and stderr text.
fn classify_remove(success: bool, stderr: &str) -> Result<RegistrarOutcome> {
    if success {
        return Ok(RegistrarOutcome::Removed);
    }
    let lower = stderr.to_lowercase();
    if lower.contains("not found") || lower.contains("does not exist") {
        return Ok(RegistrarOutcome::NotRegistered);
    }
    Err(SetupError::subprocess(format!(
        "mcp removal failed: {}",
        stderr.trim()
    )))
}
