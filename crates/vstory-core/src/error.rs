use std::path::PathBuf;

/// Alias for `Result<T, CorpusError>`.
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors that can occur when enumerating or resolving stories.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// The configured corpus root does not exist or is not a directory.
    #[error("corpus root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// The `domain/topic` directory does not exist.
    #[error("topic not found: {domain}/{topic} ({})", path.display())]
    TopicNotFound {
        /// The requested domain.
        domain: String,
        /// The requested topic.
        topic: String,
        /// The directory that was looked up.
        path: PathBuf,
    },

    /// No story file matched the resolution pattern.
    #[error("no dialogue found for {domain}/{topic} with pattern {pattern}")]
    StoryNotFound {
        /// The requested domain.
        domain: String,
        /// The requested topic.
        topic: String,
        /// The glob pattern that was attempted.
        pattern: String,
    },

    /// Neither a sequence number nor a dialogue name was supplied.
    #[error("either a sequence number or a dialogue name must be provided")]
    MissingConstraint,

    /// A file matched the resolution pattern but violates the naming schema.
    #[error("file name does not match expected pattern: {file_name}")]
    MalformedName {
        /// The offending file name.
        file_name: String,
        /// The rule that the name violates.
        #[source]
        reason: NameError,
    },

    /// A resolution pattern could not be compiled.
    #[error("invalid pattern {pattern}: {message}")]
    InvalidPattern {
        /// The pattern text.
        pattern: String,
        /// Why it was rejected.
        message: String,
    },

    /// A directory listing or file read failed.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CorpusError {
    /// Returns true for the "not found" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound(_) | Self::TopicNotFound { .. } | Self::StoryNotFound { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Reasons a file name fails the `{seq}_{name}_{lang}` schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// The file does not carry the `.txt` extension.
    #[error("expected a .txt file")]
    WrongExtension,

    /// No underscore separates the sequence number from the rest.
    #[error("missing '_' after the sequence number")]
    MissingSequenceSeparator,

    /// No underscore separates the dialogue name from the language code.
    #[error("missing '_' before the language code")]
    MissingLanguageSeparator,

    /// The sequence part is not a base-10 non-negative integer.
    #[error("invalid sequence number: \"{0}\"")]
    InvalidSequence(String),

    /// The language part is neither a known code nor a known language name.
    #[error("unknown language code: \"{0}\"")]
    UnknownLanguage(String),

    /// The dialogue name between the sequence and language parts is empty.
    #[error("empty dialogue name")]
    EmptyDialogueName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_family() {
        assert!(CorpusError::RootNotFound(PathBuf::from("x")).is_not_found());
        assert!(
            CorpusError::StoryNotFound {
                domain: "d".into(),
                topic: "t".into(),
                pattern: "1_*_*.txt".into(),
            }
            .is_not_found()
        );
        assert!(!CorpusError::MissingConstraint.is_not_found());
    }

    #[test]
    fn malformed_name_message_names_file() {
        let err = CorpusError::MalformedName {
            file_name: "abc_name_en.txt".into(),
            reason: NameError::InvalidSequence("abc".into()),
        };
        assert_eq!(
            err.to_string(),
            "file name does not match expected pattern: abc_name_en.txt"
        );
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("invalid sequence number: \"abc\""));
    }
}
