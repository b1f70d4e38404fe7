//! Hook-group operations on the settings document.
//!
//! Hook groups are append-only: a group is one unit of commands the host
//! runs together, so groups are never merged field-by-field. Presence is
//! detected by fingerprint substring match, which tolerates path-qualified
//! vs bare script references.

use serde_json::{json, Value};

use crate::settings::SettingsDocument;

/// The fingerprint of a command: its first whitespace-delimited token when
/// the command is a multi-token invocation, otherwise the whole string.
pub fn fingerprint(command: &str) -> &str {
    if command.contains(' ') {
        command.split_whitespace().next().unwrap_or(command)
    } else {
        command
    }
}

/// Whether any command registered under `event` contains `fingerprint`.
pub fn is_configured(doc: &SettingsDocument, event: &str, fingerprint: &str) -> bool {
    let groups = match doc
        .root()
        .get("hooks")
        .and_then(|h| h.get(event))
        .and_then(Value::as_array)
    {
        Some(groups) => groups,
        None => return false,
    };

    groups
        .iter()
        .filter_map(|group| group.get("hooks").and_then(Value::as_array))
        .flatten()
        .filter_map(|hook| hook.get("command").and_then(Value::as_str))
        .any(|command| command.contains(fingerprint))
}

/// Append one hook group containing `commands` under `event`.
///
/// If any command in the batch is already configured (by fingerprint), the
/// whole batch is treated as installed and nothing is mutated. Returns
/// whether the document changed.
///
/// A malformed slot (a `hooks` value or event entry that is not the
/// expected shape) is left untouched and reported as unchanged rather than
/// clobbered.
pub fn add_hook_group(doc: &mut SettingsDocument, event: &str, commands: &[&str]) -> bool {
    if commands.is_empty() {
        return false;
    }

    if commands
        .iter()
        .any(|cmd| is_configured(doc, event, fingerprint(cmd)))
    {
        return false;
    }

    let hooks = doc
        .root_mut()
        .entry("hooks")
        .or_insert_with(|| json!({}));
    let hooks_obj = match hooks.as_object_mut() {
        Some(obj) => obj,
        None => {
            tracing::warn!("\"hooks\" in settings is not an object; leaving it alone");
            return false;
        }
    };

    let slot = hooks_obj
        .entry(event)
        .or_insert_with(|| json!([]));
    let groups = match slot.as_array_mut() {
        Some(arr) => arr,
        None => {
            tracing::warn!(event, "hook event slot is not an array; leaving it alone");
            return false;
        }
    };

    let entries: Vec<Value> = commands
        .iter()
        .map(|cmd| json!({"type": "command", "command": cmd}))
        .collect();
    groups.push(json!({"hooks": entries}));

    true
}

/// Delete the whole `event` slot, if present. Returns whether a deletion
/// occurred. An emptied `hooks` object is removed too.
pub fn remove_event(doc: &mut SettingsDocument, event: &str) -> bool {
    let hooks_obj = match doc.root_mut().get_mut("hooks").and_then(Value::as_object_mut) {
        Some(obj) => obj,
        None => return false,
    };

    let removed = hooks_obj.remove(event).is_some();
    if removed && hooks_obj.is_empty() {
        doc.root_mut().remove("hooks");
    }
    removed
}
