//! Install command for sift-setup.
//!
//! Runs the canonical reconciliation: pre-flight (platform + release
//! discovery, fatal on failure), then eight independent steps. Each step
//! checks current state first and writes nothing when the target is already
//! in place, so re-running after a partial failure converges without
//! duplicating anything.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Layout;
use crate::error::{Result, SetupError};
use crate::manifest;
use crate::platform::Platform;
use crate::prompt::Confirmer;
use crate::reconcile::{Driver, Outcome, StepReport};
use crate::registrar::{Registrar, RegistrarOutcome};
use crate::release::ReleaseSource;
use crate::settings::{hooks, permissions, SettingsDocument};
use crate::template::editor;

/// Options for the install command.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the install command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallOutput {
    /// Whether every executed step succeeded.
    pub success: bool,
    /// The release that was reconciled against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    /// Per-step reports, in execution order.
    pub steps: Vec<StepReport>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// Fatal pre-flight error, when the run aborted before any step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InstallOutput {
    fn completed(release: String, steps: Vec<StepReport>, success: bool) -> Self {
        Self {
            success,
            release: Some(release),
            steps,
            finished_at: Utc::now(),
            error: None,
        }
    }

    fn fatal(error: impl Into<String>) -> Self {
        Self {
            success: false,
            release: None,
            steps: Vec::new(),
            finished_at: Utc::now(),
            error: Some(error.into()),
        }
    }
}

/// The install command implementation.
pub struct InstallCommand {
    layout: Layout,
    platform: Platform,
    source: Box<dyn ReleaseSource>,
    registrar: Box<dyn Registrar>,
    confirmer: Box<dyn Confirmer>,
}

impl InstallCommand {
    /// Create a new install command over explicit collaborators.
    pub fn new(
        layout: Layout,
        platform: Platform,
        source: Box<dyn ReleaseSource>,
        registrar: Box<dyn Registrar>,
        confirmer: Box<dyn Confirmer>,
    ) -> Self {
        Self {
            layout,
            platform,
            source,
            registrar,
            confirmer,
        }
    }

    /// Run the install command. `cwd` is the project the data-dir migration
    /// applies to.
    pub fn run(&self, cwd: &Path, _options: &InstallOptions) -> InstallOutput {
        // Pre-flight: no mutation happens before the release is known.
        let tag = match self.source.latest_tag() {
            Ok(tag) => tag,
            Err(err) => return InstallOutput::fatal(err.to_string()),
        };

        let mut driver = Driver::new();

        driver.run_step("binary", || self.install_binary(&tag));
        driver.run_step("templates", || self.install_templates(&tag));
        driver.run_step("mcp server", || self.register_mcp());
        driver.run_step("hooks", || self.install_hooks());
        driver.run_step("deny list", || self.apply_deny_list());
        driver.run_step("memory directive", || self.insert_directive(&tag));
        driver.run_step("data migration", || self.migrate_data_dir(cwd));

        let success = !driver.has_failures();
        InstallOutput::completed(tag, driver.into_reports(), success)
    }

    fn install_binary(&self, tag: &str) -> Result<Outcome> {
        let dest = self.layout.binary_path();

        if dest.exists() {
            if !self
                .confirmer
                .confirm(&format!("sift already installed at {}. Reinstall?", dest.display()), false)
            {
                return Ok(Outcome::already(format!("present at {}", dest.display())));
            }
        } else if !self
            .confirmer
            .confirm(&format!("Install sift to {}?", dest.display()), true)
        {
            return Ok(Outcome::skipped("declined"));
        }

        self.source
            .fetch(tag, self.platform.asset_name(), &dest, true)?;
        Ok(Outcome::changed(format!("installed {}", dest.display())))
    }

    fn install_templates(&self, tag: &str) -> Result<Outcome> {
        let missing: Vec<&str> = manifest::TEMPLATES
            .iter()
            .copied()
            .filter(|name| !self.layout.template_path(name).exists())
            .collect();

        let to_fetch: Vec<&str> = if missing.is_empty() {
            if !self
                .confirmer
                .confirm("Templates already installed. Reinstall?", false)
            {
                return Ok(Outcome::already(format!(
                    "{} templates present",
                    manifest::TEMPLATES.len()
                )));
            }
            manifest::TEMPLATES.to_vec()
        } else {
            missing
        };

        for name in &to_fetch {
            self.source
                .fetch(tag, name, &self.layout.template_path(name), false)?;
        }
        Ok(Outcome::changed(format!(
            "installed {} templates",
            to_fetch.len()
        )))
    }

    fn register_mcp(&self) -> Result<Outcome> {
        if !self
            .confirmer
            .confirm("Register sift as an MCP server?", true)
        {
            return Ok(Outcome::skipped("declined"));
        }

        match self
            .registrar
            .add(manifest::MCP_SERVER_NAME, manifest::MCP_SERVER_COMMAND)?
        {
            RegistrarOutcome::Registered => Ok(Outcome::changed("registered sift MCP server")),
            RegistrarOutcome::CliMissing => Ok(Outcome::skipped(
                "claude CLI not found; run: claude mcp add --scope user sift -- sift --mcp",
            )),
            _ => Ok(Outcome::already("MCP server already registered")),
        }
    }

    fn install_hooks(&self) -> Result<Outcome> {
        let settings_path = self.layout.settings_path();
        let mut doc = SettingsDocument::load(&settings_path)?;

        let missing_groups: Vec<&manifest::HookGroup> = manifest::HOOK_GROUPS
            .iter()
            .filter(|group| !group_configured(&doc, group))
            .collect();
        let stale_scripts = manifest::HOOK_SCRIPTS
            .iter()
            .any(|script| !script_current(&self.layout, script));

        if missing_groups.is_empty() && !stale_scripts {
            return Ok(Outcome::already("all sift hooks configured"));
        }

        if !self
            .confirmer
            .confirm("Configure Claude Code hooks?", true)
        {
            return Ok(Outcome::skipped("declined"));
        }

        let hooks_dir = self.layout.hooks_dir();
        fs::create_dir_all(&hooks_dir)
            .map_err(|e| SetupError::storage(&hooks_dir, e))?;
        for script in manifest::HOOK_SCRIPTS {
            write_hook_script(&self.layout, script)?;
        }

        let mut added = Vec::new();
        for group in &missing_groups {
            if hooks::add_hook_group(&mut doc, group.event, group.commands) {
                added.push(group.event);
            }
        }

        if !added.is_empty() {
            doc.save(&settings_path)?;
        }

        Ok(Outcome::changed(format!(
            "installed {} scripts, added hooks: {}",
            manifest::HOOK_SCRIPTS.len(),
            if added.is_empty() {
                "none".to_string()
            } else {
                added.join(", ")
            }
        )))
    }

    fn apply_deny_list(&self) -> Result<Outcome> {
        if !self
            .confirmer
            .confirm("Disable built-in TodoWrite in favor of sift memory?", true)
        {
            return Ok(Outcome::skipped("declined"));
        }

        let settings_path = self.layout.settings_path();
        let mut doc = SettingsDocument::load(&settings_path)?;

        if permissions::ensure_denied(&mut doc, manifest::DENY_PATTERNS) {
            doc.save(&settings_path)?;
            Ok(Outcome::changed("TodoWrite disabled"))
        } else {
            Ok(Outcome::already("TodoWrite already disabled"))
        }
    }

    fn insert_directive(&self, tag: &str) -> Result<Outcome> {
        let path = self.layout.memory_doc_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(SetupError::storage(&path, err)),
        };

        if editor::has_section(&text) {
            return Ok(Outcome::already("directive section present"));
        }

        let section = editor::wrap(manifest::DIRECTIVE_BODY, &version_token(tag));
        let updated = editor::insert_section(&text, &section);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SetupError::storage(parent, e))?;
        }
        fs::write(&path, updated).map_err(|e| SetupError::storage(&path, e))?;

        Ok(Outcome::changed(format!(
            "inserted directive section into {}",
            path.display()
        )))
    }

    fn migrate_data_dir(&self, cwd: &Path) -> Result<Outcome> {
        let legacy = Layout::legacy_data_dir(cwd);
        let current = Layout::data_dir(cwd);

        if !legacy.exists() {
            return Ok(Outcome::already("no legacy data directory"));
        }
        if current.exists() {
            return Ok(Outcome::skipped(format!(
                "both {} and {} exist; not merging",
                legacy.display(),
                current.display()
            )));
        }

        fs::rename(&legacy, &current)
            .map_err(|e| SetupError::storage(&legacy, e))?;
        Ok(Outcome::changed(format!(
            "renamed {} to {}",
            legacy.display(),
            current.display()
        )))
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &InstallOutput, options: &InstallOptions) -> String {
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

/// Whether a hook group's commands are already registered, by fingerprint.
fn group_configured(doc: &SettingsDocument, group: &manifest::HookGroup) -> bool {
    group
        .commands
        .iter()
        .any(|cmd| hooks::is_configured(doc, group.event, hooks::fingerprint(cmd)))
}

/// Whether an installed hook script matches the manifest's body.
fn script_current(layout: &Layout, script: &manifest::HookScript) -> bool {
    fs::read_to_string(layout.hooks_dir().join(script.name))
        .map(|on_disk| on_disk == script.body)
        .unwrap_or(false)
}

/// Write one hook script, executable.
fn write_hook_script(layout: &Layout, script: &manifest::HookScript) -> Result<()> {
    let path = layout.hooks_dir().join(script.name);
    fs::write(&path, script.body).map_err(|e| SetupError::storage(&path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .map_err(|e| SetupError::storage(&path, e))?;
    }

    Ok(())
}

/// Derive the section version token from a release tag.
///
/// Tags look like `v1.4.2`; the marker grammar only admits digits and dots,
/// so anything else falls back to this crate's own version.
fn version_token(tag: &str) -> String {
    let cleaned = tag.trim_start_matches('v');
    if !cleaned.is_empty()
        && cleaned
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b'.')
    {
        cleaned.to_string()
    } else {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

/// Format output as human-readable text.
fn format_human_readable(output: &InstallOutput) -> String {
    let mut lines = Vec::new();
    lines.push("Sift Installer".to_string());
    lines.push("==============".to_string());

    if let Some(error) = &output.error {
        lines.push(String::new());
        lines.push(format!("Error: {}", error));
        return lines.join("\n") + "\n";
    }

    if let Some(release) = &output.release {
        lines.push(format!("Release: {}", release));
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
        lines.push("Done! Restart Claude Code to apply changes.".to_string());
    } else {
        lines.push("Completed with failures; re-run to retry the failed steps.".to_string());
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::Scripted;
    use crate::prompt::AssumeDefault;
    use crate::registrar::RegistrarOutcome;
    use crate::release::testing::FixedSource;
    use serde_json::json;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Registrar test double recording calls.
    struct FakeRegistrar {
        add_outcome: RegistrarOutcome,
        calls: RefCell<Vec<String>>,
    }

    impl FakeRegistrar {
        fn new(add_outcome: RegistrarOutcome) -> Self {
            Self {
                add_outcome,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Registrar for FakeRegistrar {
        fn add(&self, name: &str, _command: &[&str]) -> Result<RegistrarOutcome> {
            self.calls.borrow_mut().push(format!("add {}", name));
            Ok(self.add_outcome)
        }

        fn remove(&self, name: &str) -> Result<RegistrarOutcome> {
            self.calls.borrow_mut().push(format!("remove {}", name));
            Ok(RegistrarOutcome::Removed)
        }
    }

    fn full_source() -> FixedSource {
        let mut source = FixedSource::with_tag("v1.4.2").asset("sift-linux-x86_64", b"binary");
        for name in manifest::TEMPLATES {
            source = source.asset(name, format!("# {}\n", name).as_bytes());
        }
        source
    }

    fn command_with(
        temp: &TempDir,
        source: FixedSource,
        confirmer: Box<dyn Confirmer>,
    ) -> InstallCommand {
        let layout = Layout::with_roots(temp.path().join(".claude"), temp.path().join("bin"));
        InstallCommand::new(
            layout,
            Platform::LinuxX86_64,
            Box::new(source),
            Box::new(FakeRegistrar::new(RegistrarOutcome::Registered)),
            confirmer,
        )
    }

    fn run_default(temp: &TempDir) -> InstallOutput {
        let cmd = command_with(temp, full_source(), Box::new(AssumeDefault));
        cmd.run(temp.path(), &InstallOptions::default())
    }

    #[test]
    fn test_fresh_install_runs_every_step() {
        let temp = TempDir::new().unwrap();
        let output = run_default(&temp);

        assert!(output.success);
        assert_eq!(output.release.as_deref(), Some("v1.4.2"));

        let claude = temp.path().join(".claude");
        assert_eq!(fs::read(temp.path().join("bin/sift")).unwrap(), b"binary");
        for name in manifest::TEMPLATES {
            assert!(claude.join(name).exists(), "{} missing", name);
        }
        for script in manifest::HOOK_SCRIPTS {
            assert!(claude.join("hooks").join(script.name).exists());
        }

        let settings: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(claude.join("settings.json")).unwrap())
                .unwrap();
        assert!(settings["hooks"]["SessionStart"].is_array());
        assert!(settings["hooks"]["SessionEnd"].is_array());
        assert!(settings["hooks"]["PreCompact"].is_array());
        assert_eq!(
            settings["permissions"]["deny"],
            json!(["TodoWrite(**)", "TodoRead(**)"])
        );

        let memory = fs::read_to_string(claude.join("CLAUDE.md")).unwrap();
        assert!(memory.contains("<!-- begin sift-template-1.4.2 -->"));
        assert!(memory.contains("<!-- end sift-template-1.4.2 -->"));
    }

    #[test]
    fn test_second_run_is_a_noop() {
        let temp = TempDir::new().unwrap();
        run_default(&temp);

        let settings_before =
            fs::read_to_string(temp.path().join(".claude/settings.json")).unwrap();
        let memory_before = fs::read_to_string(temp.path().join(".claude/CLAUDE.md")).unwrap();

        let output = run_default(&temp);
        assert!(output.success);

        // Nothing may have been duplicated or rewritten.
        assert_eq!(
            fs::read_to_string(temp.path().join(".claude/settings.json")).unwrap(),
            settings_before
        );
        assert_eq!(
            fs::read_to_string(temp.path().join(".claude/CLAUDE.md")).unwrap(),
            memory_before
        );

        for step in &output.steps {
            assert_ne!(
                step.status,
                crate::reconcile::StepStatus::Failed,
                "step {} failed",
                step.name
            );
        }

        let settings: serde_json::Value = serde_json::from_str(&settings_before).unwrap();
        assert_eq!(
            settings["hooks"]["SessionStart"].as_array().unwrap().len(),
            1
        );
        assert_eq!(
            settings["permissions"]["deny"].as_array().unwrap().len(),
            2
        );
    }

    #[test]
    fn test_no_release_is_fatal_before_any_mutation() {
        let temp = TempDir::new().unwrap();
        let cmd = command_with(&temp, FixedSource::default(), Box::new(AssumeDefault));

        let output = cmd.run(temp.path(), &InstallOptions::default());
        assert!(!output.success);
        assert!(output.steps.is_empty());
        assert!(output
            .error
            .as_deref()
            .unwrap()
            .contains("latest release"));
        assert!(!temp.path().join(".claude").exists());
    }

    #[test]
    fn test_binary_failure_does_not_abort_later_steps() {
        let temp = TempDir::new().unwrap();
        let mut source = FixedSource::with_tag("v1.4.2").failing_asset("sift-linux-x86_64");
        for name in manifest::TEMPLATES {
            source = source.asset(name, b"content");
        }
        let cmd = command_with(&temp, source, Box::new(AssumeDefault));

        let output = cmd.run(temp.path(), &InstallOptions::default());
        assert!(!output.success);

        let binary_step = &output.steps[0];
        assert_eq!(binary_step.status, crate::reconcile::StepStatus::Failed);
        assert!(!temp.path().join("bin/sift").exists());
        assert!(!temp.path().join("bin/sift.tmp").exists());

        // Later steps still ran to completion.
        assert!(temp.path().join(".claude/MEMORY.md").exists());
        assert!(temp.path().join(".claude/settings.json").exists());
    }

    #[test]
    fn test_install_preserves_unrelated_settings() {
        let temp = TempDir::new().unwrap();
        let claude = temp.path().join(".claude");
        fs::create_dir_all(&claude).unwrap();
        fs::write(
            claude.join("settings.json"),
            r#"{"foo": {"bar": 1}, "hooks": {"PreToolUse": [{"matcher": "Bash", "hooks": [{"type": "command", "command": "my-linter"}]}]}}"#,
        )
        .unwrap();

        let output = run_default(&temp);
        assert!(output.success);

        let settings: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(claude.join("settings.json")).unwrap())
                .unwrap();
        assert_eq!(settings["foo"], json!({"bar": 1}));
        assert_eq!(
            settings["hooks"]["PreToolUse"][0]["hooks"][0]["command"],
            "my-linter"
        );
        assert!(settings["hooks"]["SessionStart"].is_array());
    }

    #[test]
    fn test_corrupt_settings_fails_hook_step_without_clobbering() {
        let temp = TempDir::new().unwrap();
        let claude = temp.path().join(".claude");
        fs::create_dir_all(&claude).unwrap();
        fs::write(claude.join("settings.json"), "{ definitely not json").unwrap();

        let output = run_default(&temp);
        assert!(!output.success);

        let hook_step = output.steps.iter().find(|s| s.name == "hooks").unwrap();
        assert_eq!(hook_step.status, crate::reconcile::StepStatus::Failed);
        assert!(hook_step.detail.as_deref().unwrap().contains("corrupt"));

        // The corrupt file is preserved for the user to repair.
        assert_eq!(
            fs::read_to_string(claude.join("settings.json")).unwrap(),
            "{ definitely not json"
        );
    }

    #[test]
    fn test_declining_prompts_skips_without_writes() {
        let temp = TempDir::new().unwrap();
        // Decline binary, mcp, hooks, deny list. Templates has no prompt on
        // a fresh install.
        let confirmer = Scripted::new(&[false, false, false, false]);
        let cmd = command_with(&temp, full_source(), Box::new(confirmer));

        let output = cmd.run(temp.path(), &InstallOptions::default());
        assert!(output.success);

        assert!(!temp.path().join("bin/sift").exists());
        assert!(!temp.path().join(".claude/hooks").exists());
        assert!(!temp.path().join(".claude/settings.json").exists());

        let statuses: Vec<_> = output.steps.iter().map(|s| (s.name.as_str(), s.status)).collect();
        assert!(statuses.contains(&("binary", crate::reconcile::StepStatus::Skipped)));
        assert!(statuses.contains(&("hooks", crate::reconcile::StepStatus::Skipped)));
        assert!(statuses.contains(&("deny list", crate::reconcile::StepStatus::Skipped)));
    }

    #[test]
    fn test_existing_binary_defaults_to_keep() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("bin")).unwrap();
        fs::write(temp.path().join("bin/sift"), b"existing").unwrap();

        let output = run_default(&temp);
        assert!(output.success);

        // Default answer to "Reinstall?" is no, so the binary is untouched.
        assert_eq!(fs::read(temp.path().join("bin/sift")).unwrap(), b"existing");
        assert_eq!(
            output.steps[0].status,
            crate::reconcile::StepStatus::AlreadyConfigured
        );
    }

    #[test]
    fn test_directive_appends_to_user_memory_doc() {
        let temp = TempDir::new().unwrap();
        let claude = temp.path().join(".claude");
        fs::create_dir_all(&claude).unwrap();
        fs::write(claude.join("CLAUDE.md"), "# My own rules\n").unwrap();

        run_default(&temp);

        let memory = fs::read_to_string(claude.join("CLAUDE.md")).unwrap();
        assert!(memory.starts_with("# My own rules\n\n<!-- begin sift-template-"));
    }

    #[test]
    fn test_directive_skipped_when_legacy_section_present() {
        let temp = TempDir::new().unwrap();
        let claude = temp.path().join(".claude");
        fs::create_dir_all(&claude).unwrap();
        fs::write(
            claude.join("CLAUDE.md"),
            "<!-- sift-template-0.1 -->\n<!-- SIFT_BEGIN -->\nold\n<!-- SIFT_END -->\n",
        )
        .unwrap();

        let output = run_default(&temp);
        let step = output
            .steps
            .iter()
            .find(|s| s.name == "memory directive")
            .unwrap();
        assert_eq!(step.status, crate::reconcile::StepStatus::AlreadyConfigured);
    }

    #[test]
    fn test_data_dir_migration_renames_once() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".sift-data")).unwrap();
        fs::write(temp.path().join(".sift-data/context.db"), b"data").unwrap();

        let output = run_default(&temp);
        assert!(output.success);

        assert!(!temp.path().join(".sift-data").exists());
        assert_eq!(
            fs::read(temp.path().join(".sift/context.db")).unwrap(),
            b"data"
        );

        // Second run: nothing left to migrate.
        let output = run_default(&temp);
        let step = output
            .steps
            .iter()
            .find(|s| s.name == "data migration")
            .unwrap();
        assert_eq!(step.status, crate::reconcile::StepStatus::AlreadyConfigured);
    }

    #[test]
    fn test_data_dir_migration_never_merges() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".sift-data")).unwrap();
        fs::create_dir_all(temp.path().join(".sift")).unwrap();
        fs::write(temp.path().join(".sift/keep.db"), b"current").unwrap();

        let output = run_default(&temp);
        let step = output
            .steps
            .iter()
            .find(|s| s.name == "data migration")
            .unwrap();
        assert_eq!(step.status, crate::reconcile::StepStatus::Skipped);
        assert!(temp.path().join(".sift-data").exists());
        assert_eq!(fs::read(temp.path().join(".sift/keep.db")).unwrap(), b"current");
    }

    #[test]
    fn test_version_token_from_tag() {
        assert_eq!(version_token("v1.4.2"), "1.4.2");
        assert_eq!(version_token("2.0"), "2.0");
        // Tags outside the marker grammar fall back to the crate version.
        assert_eq!(version_token("release-candidate"), env!("CARGO_PKG_VERSION"));
        assert_eq!(version_token("v"), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_format_output_json_and_quiet() {
        let temp = TempDir::new().unwrap();
        let cmd = command_with(&temp, full_source(), Box::new(AssumeDefault));
        let output = cmd.run(temp.path(), &InstallOptions::default());

        let json_options = InstallOptions {
            json: true,
            ..Default::default()
        };
        let formatted = cmd.format_output(&output, &json_options);
        assert!(formatted.contains("\"success\": true"));
        assert!(formatted.contains("\"steps\""));

        let quiet_options = InstallOptions {
            quiet: true,
            ..Default::default()
        };
        assert!(cmd.format_output(&output, &quiet_options).is_empty());
    }

    #[test]
    fn test_format_output_human_readable() {
        let temp = TempDir::new().unwrap();
        let cmd = command_with(&temp, full_source(), Box::new(AssumeDefault));
        let output = cmd.run(temp.path(), &InstallOptions::default());

        let formatted = cmd.format_output(&output, &InstallOptions::default());
        assert!(formatted.contains("Sift Installer"));
        assert!(formatted.contains("Release: v1.4.2"));
        assert!(formatted.contains("binary: done"));
        assert!(formatted.contains("Done! Restart Claude Code"));
    }
}
