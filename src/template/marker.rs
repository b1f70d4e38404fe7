//! Marker grammars for sift-owned sections.
//!
//! Two historical formats exist and both must be recognized:
//!
//! - current: `<!-- begin sift-template-X.Y.Z -->` … `<!-- end sift-template-X.Y.Z -->`
//!   (the open and close version tokens vary independently; each only has to
//!   match the version-token grammar)
//! - legacy: a standalone `<!-- sift-template-X.Y.Z -->` line, optionally
//!   followed by a `<!-- SIFT_BEGIN -->` … `<!-- SIFT_END -->` block
//!
//! Each finder scans left-to-right and yields the byte span to delete,
//! including the span's own trailing line terminator. Block finders are
//! non-greedy: a block ends at the first closing marker after its opener.

use std::ops::Range;

const CURRENT_BEGIN_PREFIX: &str = "<!-- begin sift-template-";
const CURRENT_END_PREFIX: &str = "<!-- end sift-template-";
const LEGACY_MARKER_PREFIX: &str = "<!-- sift-template-";
const LEGACY_BEGIN: &str = "<!-- SIFT_BEGIN -->";
const LEGACY_END: &str = "<!-- SIFT_END -->";
const MARKER_SUFFIX: &str = " -->";

/// Whether `text` contains a current-format begin marker.
pub fn has_current_marker(text: &str) -> bool {
    find_versioned(text, 0, CURRENT_BEGIN_PREFIX).is_some()
}

/// Whether `text` contains a legacy begin marker.
pub fn has_legacy_begin(text: &str) -> bool {
    text.contains(LEGACY_BEGIN)
}

/// Whether `text` contains a standalone legacy version marker.
pub fn has_legacy_marker(text: &str) -> bool {
    find_versioned(text, 0, LEGACY_MARKER_PREFIX).is_some()
}

/// Render a current-format begin marker for `version`.
pub fn current_begin(version: &str) -> String {
    format!("{CURRENT_BEGIN_PREFIX}{version}{MARKER_SUFFIX}")
}

/// Render a current-format end marker for `version`.
pub fn current_end(version: &str) -> String {
    format!("{CURRENT_END_PREFIX}{version}{MARKER_SUFFIX}")
}

/// Find the next current-format block at or after `from`.
///
/// The span runs from the begin marker through the first end marker after
/// it, plus the end marker's trailing newline when present. An opener with
/// no closer anywhere after it is not a block.
pub fn find_current_block(text: &str, from: usize) -> Option<Range<usize>> {
    let (start, begin_end) = find_versioned(text, from, CURRENT_BEGIN_PREFIX)?;
    let (_, end) = find_versioned(text, begin_end, CURRENT_END_PREFIX)?;
    Some(start..with_trailing_newline(text, end))
}

/// Find the next legacy `SIFT_BEGIN`/`SIFT_END` block at or after `from`.
pub fn find_legacy_block(text: &str, from: usize) -> Option<Range<usize>> {
    let offset = text[from..].find(LEGACY_BEGIN)?;
    let start = from + offset;
    let close_offset = text[start + LEGACY_BEGIN.len()..].find(LEGACY_END)?;
    let end = start + LEGACY_BEGIN.len() + close_offset + LEGACY_END.len();
    Some(start..with_trailing_newline(text, end))
}

/// Find the next standalone legacy version marker at or after `from`.
pub fn find_legacy_marker(text: &str, from: usize) -> Option<Range<usize>> {
    let (start, end) = find_versioned(text, from, LEGACY_MARKER_PREFIX)?;
    Some(start..with_trailing_newline(text, end))
}

/// Match a versioned marker token starting exactly at `at`.
///
/// Grammar: `prefix`, then a non-empty run of digits and dots, then ` -->`.
/// Returns the token's end offset.
fn match_versioned(text: &str, at: usize, prefix: &str) -> Option<usize> {
    let rest = &text[at..];
    if !rest.starts_with(prefix) {
        return None;
    }
    let after = &rest[prefix.len()..];
    let version_len = after
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.')
        .count();
    if version_len == 0 {
        return None;
    }
    if !after[version_len..].starts_with(MARKER_SUFFIX) {
        return None;
    }
    Some(at + prefix.len() + version_len + MARKER_SUFFIX.len())
}

/// Find the next well-formed versioned marker at or after `from`.
///
/// Returns `(start, end)` of the marker token. Prefix occurrences that are
/// not followed by a valid version token and closer are skipped.
fn find_versioned(text: &str, from: usize, prefix: &str) -> Option<(usize, usize)> {
    let mut pos = from;
    while let Some(offset) = text[pos..].find(prefix) {
        let start = pos + offset;
        if let Some(end) = match_versioned(text, start, prefix) {
            return Some((start, end));
        }
        pos = start + prefix.len();
    }
    None
}

/// Extend `end` past one trailing line terminator, if present.
fn with_trailing_newline(text: &str, end: usize) -> usize {
    if text[end..].starts_with('\n') {
        end + 1
    } else {
        end
    }
}
