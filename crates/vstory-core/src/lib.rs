//! Directory-convention resolver for virtual story corpora.
//!
//! A corpus is a three-level tree, `{DOMAIN}/{TOPIC}/{SEQ_NUM}_{DIALOGUE_NAME}_{LANGUAGE_CODE}.txt`.
//! This crate enumerates the domains and topics that hold at least one
//! well-formed story file, decomposes file names into a [`StoryId`], and
//! resolves a single story from partial constraints into a [`StoryRecord`].
//! It never interprets the dialogue text itself.

/// Whole-corpus consistency checks.
pub mod audit;
/// Corpus root configuration.
pub mod config;
/// Domain/topic enumeration and story resolution.
pub mod corpus;
/// Error types used throughout the crate.
pub mod error;
/// Language-code vocabulary and lookup.
pub mod language;
/// File-name schema validation.
pub mod naming;
/// Resolved story records and resolution queries.
pub mod story;

/// Re-export audit types.
pub use audit::{AuditIssue, AuditReport};
/// Re-export configuration.
pub use config::CorpusConfig;
/// Re-export the corpus handle.
pub use corpus::Corpus;
/// Re-export error types.
pub use error::{CorpusError, CorpusResult, NameError};
/// Re-export language types.
pub use language::{BuiltinLanguages, LanguageCode, LanguageResolver};
/// Re-export naming types.
pub use naming::{STORY_FILE_PATTERN, StoryId};
/// Re-export story types.
pub use story::{StoryEntry, StoryQuery, StoryRecord};
