//! Marked-section handling for templated Markdown documents.
//!
//! Sift owns regions of the user's memory document delimited by sentinel
//! comment lines. Two historical marker schemes are recognized; [`marker`]
//! knows the grammars and [`editor`] implements insertion and exhaustive
//! removal without disturbing user-authored content around the sections.

pub mod editor;
pub mod marker;
