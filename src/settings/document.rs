//! In-memory representation of Claude Code's `settings.json`.
//!
//! The document is an open JSON object: sift owns the `hooks` and
//! `permissions.deny` sub-trees and must pass everything else through
//! untouched. Writes are atomic (temp file + rename) and only happen when a
//! caller decided a mutation occurred.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, SetupError};

/// An owned settings document, threaded explicitly through each
/// reconciliation step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDocument {
    root: Map<String, Value>,
}

impl SettingsDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the document from disk.
    ///
    /// A missing file is an empty document. A file that exists but does not
    /// parse as a JSON object is surfaced as
    /// [`SetupError::CorruptSettings`] so the caller can decide what to do —
    /// the file is never silently replaced.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| SetupError::storage(path, e))?;
        let root: Map<String, Value> = serde_json::from_str(&content)
            .map_err(|e| SetupError::corrupt_settings(path, e))?;

        Ok(Self { root })
    }

    /// Load the document, falling back to empty on corruption.
    ///
    /// This is the historical lossy-recovery policy, kept as an explicit
    /// opt-in for read-only callers. Mutating callers use [`load`] so a
    /// corrupt file is never clobbered.
    ///
    /// [`load`]: Self::load
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!("{} (treating settings as empty)", err);
                Self::new()
            }
        }
    }

    /// Write the document to disk.
    ///
    /// Serializes with human-diffable indentation and a trailing newline,
    /// creates parent directories, and renames a temp file into place so a
    /// concurrent reader never sees a partial write.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.root)
            .map_err(|e| SetupError::serde(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SetupError::storage(parent, e))?;
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SetupError::config(format!("invalid settings path: {}", path.display())))?;
        let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| SetupError::storage(&temp_path, e))?;
            file.write_all(json.as_bytes())
                .map_err(|e| SetupError::storage(&temp_path, e))?;
            file.write_all(b"\n")
                .map_err(|e| SetupError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| SetupError::storage(&temp_path, e))?;
        }

        fs::rename(&temp_path, path).map_err(|e| SetupError::storage(path, e))?;

        Ok(())
    }

    /// The underlying JSON object.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Mutable access to the underlying JSON object.
    pub fn root_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.root
    }

    /// Whether the document has no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

impl From<Map<String, Value>> for SettingsDocument {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc_from(value: Value) -> SettingsDocument {
        match value {
            Value::Object(map) => SettingsDocument::from(map),
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let doc = SettingsDocument::load(&temp.path().join("settings.json")).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_surfaced() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SettingsDocument::load(&path).unwrap_err();
        assert!(matches!(err, SetupError::CorruptSettings { .. }));

        // The corrupt file must be left exactly as it was.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_load_non_object_root_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = SettingsDocument::load(&path).unwrap_err();
        assert!(matches!(err, SetupError::CorruptSettings { .. }));
    }

    #[test]
    fn test_load_or_default_swallows_corruption() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let doc = SettingsDocument::load_or_default(&path);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_save_creates_parents_and_trailing_newline() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("settings.json");

        let doc = doc_from(json!({"model": "opus"}));
        doc.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        assert!(content.contains("\"model\""));
        // Multi-line, human-diffable formatting.
        assert!(content.lines().count() > 1);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");

        doc_from(json!({"a": 1})).save(&path).unwrap();

        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["settings.json".to_string()]);
    }

    #[test]
    fn test_roundtrip_preserves_unknown_keys_and_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(
            &path,
            r#"{"zeta": {"bar": 1}, "alpha": true, "hooks": {}}"#,
        )
        .unwrap();

        let doc = SettingsDocument::load(&path).unwrap();
        doc.save(&path).unwrap();

        let reloaded = SettingsDocument::load(&path).unwrap();
        assert_eq!(reloaded.root()["zeta"], json!({"bar": 1}));
        assert_eq!(reloaded.root()["alpha"], json!(true));
        // preserve_order keeps the on-disk key order stable.
        let keys: Vec<&String> = reloaded.root().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "hooks"]);
    }
}
