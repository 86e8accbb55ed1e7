//! File-name schema for story files.
//!
//! A story stem splits as `{seq}_{name}_{lang}`: the *first* underscore ends
//! the sequence number and the *last* underscore starts the language code, so
//! dialogue names may themselves contain underscores.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NameError;
use crate::language::{LanguageCode, LanguageResolver};

/// On-disk layout of a story file, relative to the corpus root.
pub const STORY_FILE_PATTERN: &str =
    "{DOMAIN}/{TOPIC}/{SEQ_NUM}_{DIALOGUE_NAME}_{LANGUAGE_CODE}.txt";

/// Extension carried by every story file.
pub const STORY_EXTENSION: &str = "txt";

/// The identity encoded in a story file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoryId {
    /// Position of the dialogue within its topic.
    pub seq_num: u64,
    /// Dialogue name; may contain underscores.
    pub dialogue_name: String,
    /// Resolved language code.
    pub language_code: LanguageCode,
}

impl StoryId {
    /// The canonical file name for this identity. The file on disk may
    /// spell the language differently (`english` for `en`).
    pub fn canonical_file_name(&self) -> String {
        format!("{self}.{STORY_EXTENSION}")
    }

    /// Ordering key used wherever several stories compete: lowest sequence
    /// number first, then name, then language.
    pub(crate) fn sort_key(&self) -> (u64, &str, &str) {
        (
            self.seq_num,
            self.dialogue_name.as_str(),
            self.language_code.as_str(),
        )
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.seq_num, self.dialogue_name, self.language_code
        )
    }
}

/// Decompose a file stem into a [`StoryId`].
pub fn parse_stem<L>(stem: &str, languages: &L) -> Result<StoryId, NameError>
where
    L: LanguageResolver + ?Sized,
{
    let (seq_part, rest) = stem
        .split_once('_')
        .ok_or(NameError::MissingSequenceSeparator)?;
    let (name_part, lang_part) = rest
        .rsplit_once('_')
        .ok_or(NameError::MissingLanguageSeparator)?;

    let seq_num = parse_seq(seq_part)?;

    let language_code = languages
        .resolve(lang_part)
        .ok_or_else(|| NameError::UnknownLanguage(lang_part.to_string()))?;

    if name_part.is_empty() {
        return Err(NameError::EmptyDialogueName);
    }

    Ok(StoryId {
        seq_num,
        dialogue_name: name_part.to_string(),
        language_code,
    })
}

/// Decompose a full file name (`1_greeting_en.txt`) into a [`StoryId`].
pub fn parse_file_name<L>(file_name: &str, languages: &L) -> Result<StoryId, NameError>
where
    L: LanguageResolver + ?Sized,
{
    let stem = file_name
        .strip_suffix(STORY_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
        .ok_or(NameError::WrongExtension)?;
    parse_stem(stem, languages)
}

/// Sequence numbers are plain ASCII digits: no sign, no whitespace, and no
/// leading zero, so `{seq}` in a resolution glob always spells the file's own
/// prefix.
fn parse_seq(part: &str) -> Result<u64, NameError> {
    let padded = part.len() > 1 && part.starts_with('0');
    if part.is_empty() || padded || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NameError::InvalidSequence(part.to_string()));
    }
    part.parse()
        .map_err(|_| NameError::InvalidSequence(part.to_string()))
}
