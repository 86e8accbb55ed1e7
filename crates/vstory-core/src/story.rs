//! Resolution queries, listed story files, and resolved story records.

use serde::{Deserialize, Serialize};

use crate::language::LanguageCode;
use crate::naming::StoryId;

/// Partial constraints used to pick one story out of a topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryQuery {
    /// Required sequence number, if any.
    pub seq_num: Option<u64>,
    /// Required dialogue name, if any.
    pub dialogue_name: Option<String>,
}

impl StoryQuery {
    /// Match on the sequence number only.
    pub fn by_seq(seq_num: u64) -> Self {
        Self {
            seq_num: Some(seq_num),
            dialogue_name: None,
        }
    }

    /// Match on the dialogue name only.
    pub fn by_name(dialogue_name: impl Into<String>) -> Self {
        Self {
            seq_num: None,
            dialogue_name: Some(dialogue_name.into()),
        }
    }

    /// Match on both sequence number and dialogue name.
    pub fn exact(seq_num: u64, dialogue_name: impl Into<String>) -> Self {
        Self {
            seq_num: Some(seq_num),
            dialogue_name: Some(dialogue_name.into()),
        }
    }

    /// True when neither constraint is set.
    pub fn is_unconstrained(&self) -> bool {
        self.seq_num.is_none() && self.dialogue_name.is_none()
    }

    /// Whether a decomposed identity satisfies every supplied constraint.
    pub fn accepts(&self, id: &StoryId) -> bool {
        self.seq_num.is_none_or(|seq| seq == id.seq_num)
            && self
                .dialogue_name
                .as_deref()
                .is_none_or(|name| name == id.dialogue_name)
    }
}

/// A valid story file in a topic: its decomposed identity and its name on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryEntry {
    /// Identity decomposed from the file name.
    pub id: StoryId,
    /// The file name as it exists in the topic directory.
    pub file_name: String,
}

/// A resolved story: where it lives, who it is, and its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRecord {
    /// Domain directory name.
    pub domain: String,
    /// Topic directory name.
    pub topic: String,
    /// Sequence number from the file name.
    pub seq_num: u64,
    /// Dialogue name from the file name.
    pub dialogue_name: String,
    /// Language code resolved from the file name.
    pub language_code: LanguageCode,
    /// The file name as it exists in the topic directory.
    pub file_name: String,
    /// Full file content.
    pub raw_text: String,
}

impl StoryRecord {
    /// The file-name identity of this record.
    pub fn id(&self) -> StoryId {
        StoryId {
            seq_num: self.seq_num,
            dialogue_name: self.dialogue_name.clone(),
            language_code: self.language_code.clone(),
        }
    }

    /// True if the text is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}
