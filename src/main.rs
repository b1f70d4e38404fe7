//! sift-setup - Installer for the Sift Claude Code integration
//!
//! CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use sift_setup::config::Layout;
use sift_setup::manifest;
use sift_setup::platform::Platform;
use sift_setup::prompt::{AssumeDefault, Confirmer, TtyConfirmer};
use sift_setup::registrar::ClaudeCli;
use sift_setup::release::GithubReleases;

// =============================================================================
// CLI Definition
// =============================================================================

/// sift-setup - Install and remove the Sift Claude Code integration
#[derive(Parser)]
#[command(name = "sift-setup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install sift: binary, templates, hooks, settings entries
    Install {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Run non-interactively, accepting the default answer for every prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Uninstall sift; per-project .sift/ data is preserved
    Uninstall {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Run non-interactively, accepting the default answer for every prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Show what is and isn't configured, without changing anything
    Status {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("sift-setup error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Pick the confirmer for a run.
fn confirmer_for(yes: bool) -> Box<dyn Confirmer> {
    if yes {
        Box::new(AssumeDefault)
    } else {
        Box::new(TtyConfirmer)
    }
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let layout = Layout::resolve()
        .ok_or("could not determine home directory; set SIFT_CLAUDE_DIR and SIFT_INSTALL_DIR")?;

    match cli.command {
        Commands::Install { json, quiet, yes } => run_install(layout, &cwd, json, quiet, yes),
        Commands::Uninstall { json, quiet, yes } => run_uninstall(layout, json, quiet, yes),
        Commands::Status { json, quiet } => run_status(layout, &cwd, json, quiet),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn run_install(
    layout: Layout,
    cwd: &Path,
    json: bool,
    quiet: bool,
    yes: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use sift_setup::cli::install::{InstallCommand, InstallOptions};

    // Fatal pre-flight: an unsupported host aborts before any mutation.
    let platform = Platform::detect()?;
    let source = GithubReleases::new(manifest::RELEASE_REPO)?;

    let cmd = InstallCommand::new(
        layout,
        platform,
        Box::new(source),
        Box::new(ClaudeCli::new()),
        confirmer_for(yes),
    );
    let options = InstallOptions { json, quiet };

    let output = cmd.run(cwd, &options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_uninstall(
    layout: Layout,
    json: bool,
    quiet: bool,
    yes: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use sift_setup::cli::uninstall::{UninstallCommand, UninstallOptions};

    let cmd = UninstallCommand::new(layout, Box::new(ClaudeCli::new()), confirmer_for(yes));
    let options = UninstallOptions { json, quiet };

    let output = cmd.run(&options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.success))
}

fn run_status(
    layout: Layout,
    cwd: &Path,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use sift_setup::cli::status::{StatusCommand, StatusOptions};

    let cmd = StatusCommand::new(layout);
    let options = StatusOptions { json, quiet };

    let output = cmd.run(cwd, &options);
    let formatted = cmd.format_output(&output, &options);

    if !formatted.is_empty() {
        println!("{}", formatted);
    }

    Ok(success_to_exit_code(output.all_configured))
}

// =============================================================================
// Tests
// =============================================================================
