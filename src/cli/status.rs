//! Status command for sift-setup.
//!
//! Read-only report of every reconcilable item. Never writes anything, so
//! it tolerates a corrupt settings file by treating it as empty (and saying
//! so), where the mutating commands refuse to proceed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Layout;
use crate::manifest;
use crate::settings::{hooks, permissions, SettingsDocument};
use crate::template::editor;

/// Options for the status command.
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// One reconcilable item and whether it is in its target state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusItem {
    pub name: String,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StatusItem {
    fn new(name: &str, configured: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            configured,
            detail: Some(detail.into()),
        }
    }
}

/// Output format for the status command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    /// Whether every item is in its target state.
    pub all_configured: bool,
    /// Per-item state.
    pub items: Vec<StatusItem>,
    /// Set when the settings file could not be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// The status command implementation.
pub struct StatusCommand {
    layout: Layout,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Run the status command. `cwd` is the project checked for a pending
    /// data-dir migration.
    pub fn run(&self, cwd: &Path, _options: &StatusOptions) -> StatusOutput {
        let mut items = Vec::new();

        let binary = self.layout.binary_path();
        items.push(StatusItem::new(
            "binary",
            binary.exists(),
            binary.display().to_string(),
        ));

        let present = manifest::TEMPLATES
            .iter()
            .filter(|name| self.layout.template_path(name).exists())
            .count();
        items.push(StatusItem::new(
            "templates",
            present == manifest::TEMPLATES.len(),
            format!("{}/{} present", present, manifest::TEMPLATES.len()),
        ));

        let settings_path = self.layout.settings_path();
        let warning = match SettingsDocument::load(&settings_path) {
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        };
        let doc = SettingsDocument::load_or_default(&settings_path);

        for group in manifest::HOOK_GROUPS {
            let configured = group
                .commands
                .iter()
                .any(|cmd| hooks::is_configured(&doc, group.event, hooks::fingerprint(cmd)));
            items.push(StatusItem::new(
                &format!("hook: {}", group.event),
                configured,
                if configured { "registered" } else { "missing" },
            ));
        }

        let denied = permissions::all_denied(&doc, manifest::DENY_PATTERNS);
        items.push(StatusItem::new(
            "deny list",
            denied,
            if denied {
                "TodoWrite disabled"
            } else {
                "TodoWrite not disabled"
            },
        ));

        let memory_path = self.layout.memory_doc_path();
        let has_section = fs::read_to_string(&memory_path)
            .map(|text| editor::has_section(&text))
            .unwrap_or(false);
        items.push(StatusItem::new(
            "memory directive",
            has_section,
            memory_path.display().to_string(),
        ));

        let migration_pending =
            Layout::legacy_data_dir(cwd).exists() && !Layout::data_dir(cwd).exists();
        items.push(StatusItem::new(
            "data migration",
            !migration_pending,
            if migration_pending {
                "legacy directory pending rename"
            } else {
                "nothing to migrate"
            },
        ));

        StatusOutput {
            all_configured: items.iter().all(|item| item.configured),
            items,
            warning,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatusOutput, options: &StatusOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            return serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string());
        }

        let mut lines = Vec::new();
        lines.push("Sift Status".to_string());
        lines.push("===========".to_string());

        if let Some(warning) = &output.warning {
            lines.push(format!("Warning: {}", warning));
        }
        lines.push(String::new());

        for item in &output.items {
            let mark = if item.configured { "ok" } else { "--" };
            let mut line = format!("  [{}] {}", mark, item.name);
            if let Some(detail) = &item.detail {
                line.push_str(&format!(" ({})", detail));
            }
            lines.push(line);
        }

        lines.push(String::new());
        if output.all_configured {
            lines.push("Everything is configured.".to_string());
        } else {
            lines.push("Run `sift-setup install` to configure the missing items.".to_string());
        }

        lines.join("\n") + "\n"
    }
}
