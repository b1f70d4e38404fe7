//! The canonical desired state for a sift installation.
//!
//! Everything the installer adds and the uninstaller removes is declared
//! here: release coordinates, template documents, hook scripts, hook groups,
//! deny patterns, and the directive section injected into the memory
//! document. Install and uninstall both read this module, so the two can
//! never drift apart.

/// GitHub repository that publishes sift releases.
pub const RELEASE_REPO: &str = "edwardedmonds/sift-releases";

/// Name under which sift registers itself as an MCP server.
pub const MCP_SERVER_NAME: &str = "sift";

/// Arguments passed to the registrar when adding the server.
///
/// Everything after the server name, i.e. `claude mcp add --scope user sift
/// -- sift --mcp`.
pub const MCP_SERVER_COMMAND: &[&str] = &["sift", "--mcp"];

/// The user's memory document.
///
/// Never fetched or deleted wholesale: the user owns it. Install inserts a
/// delimited directive section into it, uninstall strips every sift section
/// out of it and leaves the rest alone.
pub const MEMORY_DOC: &str = "CLAUDE.md";

/// Template documents installed into the Claude directory and deleted
/// outright on uninstall.
pub const TEMPLATES: &[&str] = &[
    "MEMORY.md",
    "FILE_TOOLS.md",
    "SEARCH_TOOLS.md",
    "SQL_TOOLS.md",
    "WEB_TOOLS.md",
    "REPO_TOOLS.md",
    "CONTEXT_TOOLS.md",
];

/// One hook script written into `<claude>/hooks/`.
#[derive(Debug, Clone, Copy)]
pub struct HookScript {
    pub name: &'static str,
    pub body: &'static str,
}

/// Hook scripts installed alongside the settings entries.
pub const HOOK_SCRIPTS: &[HookScript] = &[
    HookScript {
        name: "session-start.sh",
        body: r#"#!/bin/bash
# session-start.sh - Unified session registration
INPUT=$(cat)
SESSION_ID=$(echo "$INPUT" | jq -r '.session_id // empty')
if [[ -n "$SESSION_ID" ]]; then
  sift --session-start "$SESSION_ID" 2>/dev/null || true
fi
"#,
    },
    HookScript {
        name: "session-end.sh",
        body: r#"#!/bin/bash
# session-end.sh - Mark session as ended for consolidation tracking
INPUT=$(cat)
SESSION_ID=$(echo "$INPUT" | jq -r '.session_id // empty')
if [[ -n "$SESSION_ID" ]]; then
  sift --session-end "$SESSION_ID" 2>/dev/null || true
fi
"#,
    },
    HookScript {
        name: "pre-compact.sh",
        body: r#"#!/bin/bash
# pre-compact.sh - Sync transcript to context.db before compaction
INPUT=$(cat)
TRANSCRIPT=$(echo "$INPUT" | jq -r '.transcript_path // empty')
if [[ -n "$TRANSCRIPT" && -f "$TRANSCRIPT" ]]; then
  sift --context-sync "$TRANSCRIPT" 2>/dev/null || true
fi
"#,
    },
];

/// One group of commands registered under a hook event.
#[derive(Debug, Clone, Copy)]
pub struct HookGroup {
    pub event: &'static str,
    pub commands: &'static [&'static str],
}

/// Hook groups registered in the settings document.
///
/// Historical installer variants registered different SessionStart command
/// sets; the richer batch is the canonical one. Each group is appended as a
/// single unit so the host runs its commands as one pipeline.
pub const HOOK_GROUPS: &[HookGroup] = &[
    HookGroup {
        event: "SessionStart",
        commands: &[
            "~/.claude/hooks/session-start.sh",
            "sift --session-context 2>/dev/null || true",
            "sift --quarry refresh 2>/dev/null || sift --quarry init 2>/dev/null || true",
        ],
    },
    HookGroup {
        event: "SessionEnd",
        commands: &["~/.claude/hooks/session-end.sh"],
    },
    HookGroup {
        event: "PreCompact",
        commands: &["~/.claude/hooks/pre-compact.sh"],
    },
];

/// Hook events owned by sift. Uninstall removes these wholesale.
pub fn hook_events() -> impl Iterator<Item = &'static str> {
    HOOK_GROUPS.iter().map(|g| g.event)
}

/// Permission patterns denied so sift's own task tracking is used instead.
pub const DENY_PATTERNS: &[&str] = &["TodoWrite(**)", "TodoRead(**)"];

/// Body of the directive section injected into the memory document.
///
/// The caller wraps this in versioned section delimiters before insertion.
pub const DIRECTIVE_BODY: &str = r#"# Sift

Sift provides persistent memory and workspace context on this machine.

- Prefer the `sift_memory` MCP tools over TodoWrite for task tracking.
- Session context is injected automatically at SessionStart; run
  `sift --session-context` to refresh it manually.
- Tool guides live alongside this file: MEMORY.md, FILE_TOOLS.md,
  SEARCH_TOOLS.md, SQL_TOOLS.md, WEB_TOOLS.md, REPO_TOOLS.md,
  CONTEXT_TOOLS.md.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_exclude_memory_doc() {
        assert!(!TEMPLATES.contains(&MEMORY_DOC));
        assert!(TEMPLATES.contains(&"MEMORY.md"));
    }

    #[test]
    fn test_hook_groups_cover_hook_scripts() {
        // Every installed script must be referenced by some hook command,
        // otherwise it would be dead weight in the hooks directory.
        for script in HOOK_SCRIPTS {
            let referenced = HOOK_GROUPS
                .iter()
                .flat_map(|g| g.commands.iter())
                .any(|cmd| cmd.contains(script.name));
            assert!(referenced, "{} not referenced by any hook group", script.name);
        }
    }

    #[test]
    fn test_hook_events_are_unique() {
        let mut events: Vec<_> = hook_events().collect();
        events.sort_unstable();
        events.dedup();
        assert_eq!(events.len(), HOOK_GROUPS.len());
    }

    #[test]
    fn test_hook_scripts_are_well_formed() {
        for script in HOOK_SCRIPTS {
            assert!(script.body.starts_with("#!/bin/bash"));
            assert!(script.body.ends_with('\n'));
            assert!(script.name.ends_with(".sh"));
        }
    }

    #[test]
    fn test_directive_body_mentions_installed_guides() {
        for name in TEMPLATES {
            assert!(
                DIRECTIVE_BODY.contains(name),
                "directive body should point at {}",
                name
            );
        }
    }
}
