//! The shared settings document and the operations sift owns inside it.
//!
//! [`document::SettingsDocument`] carries the whole JSON object, including
//! every key this tool does not understand. The [`hooks`] and [`permissions`]
//! modules mutate only the sub-trees sift owns and report whether anything
//! actually changed, so callers can skip the write-back when a run finds
//! everything already configured.

pub mod document;
pub mod hooks;
pub mod permissions;

pub use document::SettingsDocument;
