//! Insertion and exhaustive removal of sift-owned sections.
//!
//! Insertion appends a current-format section to the end of a document.
//! Removal strips every occurrence of every recognized format in one call
//! and reports how many spans were removed; a zero count means the caller
//! has nothing to write back.

use crate::template::marker;

/// Wrap a section body in current-format delimiters for `version`.
pub fn wrap(body: &str, version: &str) -> String {
    format!(
        "{}\n{}\n{}\n",
        marker::current_begin(version),
        body.trim_end_matches('\n'),
        marker::current_end(version)
    )
}

/// Whether `text` already carries a sift section in any recognized format.
///
/// A standalone legacy version marker with no begin/end block still counts:
/// it is sift-owned residue and removal must be able to claim it.
pub fn has_section(text: &str) -> bool {
    marker::has_current_marker(text)
        || marker::has_legacy_begin(text)
        || marker::has_legacy_marker(text)
}

/// Append `section` (already wrapped in delimiters) to `text`.
///
/// The section is separated from existing content by one blank line. An
/// empty document becomes the section alone, with no leading blank line.
pub fn insert_section(text: &str, section: &str) -> String {
    if text.is_empty() {
        section.to_string()
    } else if text.ends_with('\n') {
        format!("{text}\n{section}")
    } else {
        format!("{text}\n\n{section}")
    }
}

/// Strip every sift section from `text`, across both marker formats.
///
/// Three removal passes run in sequence: current-format blocks, legacy
/// `SIFT_BEGIN`/`SIFT_END` blocks, then standalone legacy version markers.
/// Each removed span includes its own trailing line terminator, and absorbs
/// the separator newline when the span sits right after a blank line, so
/// stripping exactly undoes [`insert_section`]. Content outside the spans
/// is untouched.
///
/// Returns the transformed text and the number of removed spans; the text
/// comes back unchanged when the count is zero.
pub fn strip_all_sections(text: &str) -> (String, usize) {
    let mut out = text.to_string();
    let mut removed = 0;

    let finders: [fn(&str, usize) -> Option<std::ops::Range<usize>>; 3] = [
        marker::find_current_block,
        marker::find_legacy_block,
        marker::find_legacy_marker,
    ];

    for finder in finders {
        let mut pos = 0;
        while let Some(span) = finder(&out, pos) {
            let start = absorb_separator(&out, span.start);
            out.replace_range(start..span.end, "");
            removed += 1;
            pos = start;
        }
    }

    (out, removed)
}

/// Pull the span start back over one newline when the span is immediately
/// preceded by a blank line. That newline is the separator the installer
/// inserted, so it belongs to the section, not the surrounding document.
fn absorb_separator(text: &str, start: usize) -> usize {
    if start >= 2 && text.as_bytes()[start - 1] == b'\n' && text.as_bytes()[start - 2] == b'\n' {
        start - 1
    } else {
        start
    }
}
