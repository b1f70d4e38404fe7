//! Deny-list operations on the settings document.
//!
//! `permissions.deny` is a shared, order-preserving list. Sift appends its
//! own patterns exactly once and removes exactly those patterns on
//! uninstall; entries it does not own are never reordered or dropped.

use serde_json::{json, Value};

use crate::settings::SettingsDocument;

/// Ensure every pattern in `patterns` is present in `permissions.deny`,
/// creating the containers if absent. Existing entries keep their order.
/// Returns whether the document changed.
pub fn ensure_denied(doc: &mut SettingsDocument, patterns: &[&str]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let permissions = doc
        .root_mut()
        .entry("permissions")
        .or_insert_with(|| json!({}));
    let permissions_obj = match permissions.as_object_mut() {
        Some(obj) => obj,
        None => {
            tracing::warn!("\"permissions\" in settings is not an object; leaving it alone");
            return false;
        }
    };

    let deny = permissions_obj
        .entry("deny")
        .or_insert_with(|| json!([]));
    let deny_list = match deny.as_array_mut() {
        Some(arr) => arr,
        None => {
            tracing::warn!("\"permissions.deny\" in settings is not an array; leaving it alone");
            return false;
        }
    };

    let mut changed = false;
    for pattern in patterns {
        let present = deny_list
            .iter()
            .any(|entry| entry.as_str() == Some(*pattern));
        if !present {
            deny_list.push(Value::String((*pattern).to_string()));
            changed = true;
        }
    }

    changed
}

/// Whether every pattern in `patterns` is already present in
/// `permissions.deny`.
pub fn all_denied(doc: &SettingsDocument, patterns: &[&str]) -> bool {
    let deny_list = match doc
        .root()
        .get("permissions")
        .and_then(|p| p.get("deny"))
        .and_then(Value::as_array)
    {
        Some(arr) => arr,
        None => return patterns.is_empty(),
    };

    patterns.iter().all(|pattern| {
        deny_list
            .iter()
            .any(|entry| entry.as_str() == Some(*pattern))
    })
}

/// Remove exactly the named patterns from `permissions.deny`. Containers
/// emptied by the removal are pruned. Returns whether the document changed.
pub fn remove_denied(doc: &mut SettingsDocument, patterns: &[&str]) -> bool {
    let permissions_obj = match doc
        .root_mut()
        .get_mut("permissions")
        .and_then(Value::as_object_mut)
    {
        Some(obj) => obj,
        None => return false,
    };

    let deny_list = match permissions_obj.get_mut("deny").and_then(Value::as_array_mut) {
        Some(arr) => arr,
        None => return false,
    };

    let before = deny_list.len();
    deny_list.retain(|entry| {
        entry
            .as_str()
            .map(|s| !patterns.contains(&s))
            .unwrap_or(true)
    });
    let changed = deny_list.len() != before;

    if changed && deny_list.is_empty() {
        permissions_obj.remove("deny");
        if permissions_obj.is_empty() {
            doc.root_mut().remove("permissions");
        }
    }

    changed
}
