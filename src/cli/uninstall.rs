//! Uninstall command for sift-setup.
//!
//! Mirrors the install steps: removes the binary, the owned templates and
//! hook scripts, the sift hook events and deny patterns from settings, the
//! sift sections from the memory document, and the MCP registration.
//! Per-project `.sift/` data is preserved.

use std::fs;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Layout;
use crate::error::{Result, SetupError};
use crate::manifest;
use crate::prompt::Confirmer;
use crate::reconcile::{Driver, Outcome, StepReport};
use crate::registrar::{Registrar, RegistrarOutcome};
use crate::release::temp_path_for;
use crate::settings::{hooks, permissions, SettingsDocument};
use crate::template::editor;

/// Options for the uninstall command.
#[derive(Debug, Clone, Default)]
pub struct UninstallOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the uninstall command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UninstallOutput {
    /// Whether every executed step succeeded.
    pub success: bool,
    /// Whether the user declined the uninstall entirely.
    pub cancelled: bool,
    /// Per-step reports, in execution order.
    pub steps: Vec<StepReport>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl UninstallOutput {
    fn cancelled() -> Self {
        Self {
            success: true,
            cancelled: true,
            steps: Vec::new(),
            finished_at: Utc::now(),
        }
    }

    fn completed(steps: Vec<StepReport>, success: bool) -> Self {
        Self {
            success,
            cancelled: false,
            steps,
            finished_at: Utc::now(),
        }
    }
}

/// The uninstall command implementation.
pub struct UninstallCommand {
    layout: Layout,
    registrar: Box<dyn Registrar>,
    confirmer: Box<dyn Confirmer>,
}

impl UninstallCommand {
    /// Create a new uninstall command over explicit collaborators.
    pub fn new(
        layout: Layout,
        registrar: Box<dyn Registrar>,
        confirmer: Box<dyn Confirmer>,
    ) -> Self {
        Self {
            layout,
            registrar,
            confirmer,
        }
    }

    /// Run the uninstall command.
    pub fn run(&self, _options: &UninstallOptions) -> UninstallOutput {
        let question = "Remove the sift binary, templates, hooks and settings entries? \
                        (.sift/ project data is preserved)";
        if !self.confirmer.confirm(question, true) {
            return UninstallOutput::cancelled();
        }

        let mut driver = Driver::new();

        driver.run_step("binary", || self.remove_binary());
        driver.run_step("templates", || self.remove_templates());
        driver.run_step("memory directive", || self.strip_memory_sections());
        driver.run_step("hook scripts", || self.remove_hook_scripts());
        driver.run_step("hooks", || self.remove_hook_events());
        driver.run_step("deny list", || self.remove_deny_patterns());
        driver.run_step("mcp server", || self.unregister_mcp());

        let success = !driver.has_failures();
        UninstallOutput::completed(driver.into_reports(), success)
    }

    fn remove_binary(&self) -> Result<Outcome> {
        let binary = self.layout.binary_path();
        let mut removed = false;

        if binary.exists() {
            fs::remove_file(&binary).map_err(|e| SetupError::storage(&binary, e))?;
            removed = true;
        }

        // A crashed install may have left a staged download behind.
        let staged = temp_path_for(&binary)?;
        if staged.exists() {
            fs::remove_file(&staged).map_err(|e| SetupError::storage(&staged, e))?;
            removed = true;
        }

        if removed {
            Ok(Outcome::changed(format!("removed {}", binary.display())))
        } else {
            Ok(Outcome::already("binary not present"))
        }
    }

    fn remove_templates(&self) -> Result<Outcome> {
        let mut removed = 0;
        for name in manifest::TEMPLATES {
            let path = self.layout.template_path(name);
            if path.exists() {
                fs::remove_file(&path).map_err(|e| SetupError::storage(&path, e))?;
                removed += 1;
            }
        }

        if removed > 0 {
            Ok(Outcome::changed(format!("removed {} templates", removed)))
        } else {
            Ok(Outcome::already("no templates present"))
        }
    }

    fn strip_memory_sections(&self) -> Result<Outcome> {
        let path = self.layout.memory_doc_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Outcome::already("no memory document"));
            }
            Err(err) => return Err(SetupError::storage(&path, err)),
        };

        let (stripped, removed) = editor::strip_all_sections(&text);
        if removed == 0 {
            return Ok(Outcome::already("no sift sections found"));
        }

        fs::write(&path, stripped).map_err(|e| SetupError::storage(&path, e))?;
        Ok(Outcome::changed(format!(
            "removed {} sections from {}",
            removed,
            path.display()
        )))
    }

    fn remove_hook_scripts(&self) -> Result<Outcome> {
        let mut removed = 0;
        for script in manifest::HOOK_SCRIPTS {
            let path = self.layout.hooks_dir().join(script.name);
            if path.exists() {
                fs::remove_file(&path).map_err(|e| SetupError::storage(&path, e))?;
                removed += 1;
            }
        }

        if removed > 0 {
            Ok(Outcome::changed(format!("removed {} scripts", removed)))
        } else {
            Ok(Outcome::already("no hook scripts present"))
        }
    }

    fn remove_hook_events(&self) -> Result<Outcome> {
        let settings_path = self.layout.settings_path();
        let mut doc = SettingsDocument::load(&settings_path)?;

        let removed: Vec<&str> = manifest::hook_events()
            .filter(|event| hooks::remove_event(&mut doc, event))
            .collect();

        if removed.is_empty() {
            return Ok(Outcome::already("no sift hook events configured"));
        }

        doc.save(&settings_path)?;
        Ok(Outcome::changed(format!(
            "removed hooks: {}",
            removed.join(", ")
        )))
    }

    fn remove_deny_patterns(&self) -> Result<Outcome> {
        let settings_path = self.layout.settings_path();
        let mut doc = SettingsDocument::load(&settings_path)?;

        if permissions::remove_denied(&mut doc, manifest::DENY_PATTERNS) {
            doc.save(&settings_path)?;
            Ok(Outcome::changed("re-enabled TodoWrite"))
        } else {
            Ok(Outcome::already("no sift deny patterns present"))
        }
    }

    fn unregister_mcp(&self) -> Result<Outcome> {
        match self.registrar.remove(manifest::MCP_SERVER_NAME)? {
            RegistrarOutcome::Removed => Ok(Outcome::changed("removed sift MCP server")),
            RegistrarOutcome::NotRegistered => Ok(Outcome::already("MCP server not registered")),
            RegistrarOutcome::CliMissing => {
                Ok(Outcome::skipped("claude CLI not found, skipping MCP removal"))
            }
            _ => Ok(Outcome::already("MCP server not registered")),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &UninstallOutput, options: &UninstallOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            format_human_readable(output)
        }
    }
}

/// Format output as human-readable text.
fn format_human_readable(output: &UninstallOutput) -> String {
    let mut lines = Vec::new();
    lines.push("Sift Uninstaller".to_string());
    lines.push("================".to_string());

    if output.cancelled {
        lines.push(String::new());
        lines.push("Cancelled.".to_string());
        return lines.join("\n") + "\n";
    }

    lines.push(String::new());
    for step in &output.steps {
        let mut line = format!("  {}: {}", step.name, step.status.label());
        if let Some(detail) = &step.detail {
            line.push_str(&format!(" ({})", detail));
        }
        lines.push(line);
    }

    lines.push(String::new());
    if output.success {
        lines.push("Done! Sift has been uninstalled.".to_string());
        lines.push("Your .sift/ directories have been preserved.".to_string());
    } else {
        lines.push("Completed with failures; re-run to retry the failed steps.".to_string());
    }

    lines.join("\n") + "\n"
}
