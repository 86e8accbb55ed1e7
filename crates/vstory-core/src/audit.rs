//! Whole-corpus consistency checks.
//!
//! Enumeration silently ignores malformed files and resolution silently picks
//! one winner among duplicates. The audit walks every valid topic and reports
//! both, along with stories whose text is blank.

use std::fmt;

use crate::corpus::Corpus;
use crate::error::{CorpusError, CorpusResult, NameError};
use crate::story::{StoryEntry, StoryQuery};

/// Which constraint a round-trip resolution used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveBy {
    /// Resolved with the sequence number only.
    Seq,
    /// Resolved with the dialogue name only.
    Name,
}

impl fmt::Display for ResolveBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seq => write!(f, "sequence number"),
            Self::Name => write!(f, "dialogue name"),
        }
    }
}

/// A single problem found by [`Corpus::audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditIssue {
    /// A `*.txt` file in a valid topic violates the naming schema.
    MalformedFile {
        /// Domain name.
        domain: String,
        /// Topic name.
        topic: String,
        /// The offending file name.
        file_name: String,
        /// The violated rule.
        reason: NameError,
    },
    /// A story file is empty or whitespace-only.
    BlankStory {
        /// Domain name.
        domain: String,
        /// Topic name.
        topic: String,
        /// The blank story.
        story: StoryEntry,
    },
    /// Resolving a story by its own sequence number or name returned a
    /// different story.
    Shadowed {
        /// Domain name.
        domain: String,
        /// Topic name.
        topic: String,
        /// The story that cannot be reached.
        story: StoryEntry,
        /// The story returned instead.
        by: StoryEntry,
        /// The constraint that was used.
        via: ResolveBy,
    },
    /// A story could not be read or resolved at all.
    Unresolvable {
        /// Domain name.
        domain: String,
        /// Topic name.
        topic: String,
        /// The story that failed.
        story: StoryEntry,
        /// The error message.
        message: String,
    },
}

impl fmt::Display for AuditIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedFile {
                domain,
                topic,
                file_name,
                reason,
            } => write!(f, "{domain}/{topic}/{file_name}: malformed name ({reason})"),
            Self::BlankStory {
                domain,
                topic,
                story,
            } => write!(f, "{domain}/{topic}/{}: blank story", story.file_name),
            Self::Shadowed {
                domain,
                topic,
                story,
                by,
                via,
            } => write!(
                f,
                "{domain}/{topic}/{}: shadowed by {} when resolved by {via}",
                story.file_name, by.file_name
            ),
            Self::Unresolvable {
                domain,
                topic,
                story,
                message,
            } => write!(f, "{domain}/{topic}/{}: {message}", story.file_name),
        }
    }
}

/// Outcome of [`Corpus::audit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Valid domains visited.
    pub domains: usize,
    /// Valid topics visited.
    pub topics: usize,
    /// Valid story files checked.
    pub stories: usize,
    /// Problems found, in traversal order.
    pub issues: Vec<AuditIssue>,
}

impl AuditReport {
    /// True when no issues were found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Corpus {
    /// Check every story in every valid topic.
    ///
    /// Each valid story must be non-blank and must resolve back to itself by
    /// sequence number (same dialogue name) and by dialogue name (same
    /// sequence number). Language variants of one dialogue share both and do
    /// not shadow each other. Fails only when enumeration itself fails.
    pub fn audit(&self) -> CorpusResult<AuditReport> {
        let mut report = AuditReport::default();

        for domain in self.list_domains()? {
            report.domains += 1;
            for topic in self.list_topics(&domain)? {
                report.topics += 1;
                let topic_dir = self.config().topic_dir(&domain, &topic);
                for file in self.scan_topic_dir(&topic_dir)? {
                    let story = match file.parsed {
                        Ok(id) => StoryEntry {
                            id,
                            file_name: file.file_name,
                        },
                        Err(reason) => {
                            report.issues.push(AuditIssue::MalformedFile {
                                domain: domain.clone(),
                                topic: topic.clone(),
                                file_name: file.file_name,
                                reason,
                            });
                            continue;
                        }
                    };
                    report.stories += 1;

                    match std::fs::read_to_string(&file.path) {
                        Ok(text) if text.trim().is_empty() => {
                            report.issues.push(AuditIssue::BlankStory {
                                domain: domain.clone(),
                                topic: topic.clone(),
                                story: story.clone(),
                            });
                        }
                        Ok(_) => {}
                        Err(e) => {
                            report.issues.push(AuditIssue::Unresolvable {
                                domain: domain.clone(),
                                topic: topic.clone(),
                                story,
                                message: CorpusError::io(&file.path, e).to_string(),
                            });
                            continue;
                        }
                    }

                    for via in [ResolveBy::Seq, ResolveBy::Name] {
                        if let Some(issue) = self.round_trip(&domain, &topic, &story, via) {
                            report.issues.push(issue);
                        }
                    }
                }
            }
        }

        tracing::debug!(
            domains = report.domains,
            topics = report.topics,
            stories = report.stories,
            issues = report.issues.len(),
            "Audited corpus"
        );
        Ok(report)
    }

    fn round_trip(
        &self,
        domain: &str,
        topic: &str,
        story: &StoryEntry,
        via: ResolveBy,
    ) -> Option<AuditIssue> {
        let id = &story.id;
        let query = match via {
            ResolveBy::Seq => StoryQuery::by_seq(id.seq_num),
            ResolveBy::Name => StoryQuery::by_name(id.dialogue_name.clone()),
        };
        match self.resolve_raw(domain, topic, &query) {
            Ok(record) => {
                let reached = match via {
                    ResolveBy::Seq => record.dialogue_name == id.dialogue_name,
                    ResolveBy::Name => record.seq_num == id.seq_num,
                };
                (!reached).then(|| AuditIssue::Shadowed {
                    domain: domain.to_string(),
                    topic: topic.to_string(),
                    story: story.clone(),
                    by: StoryEntry {
                        id: record.id(),
                        file_name: record.file_name,
                    },
                    via,
                })
            }
            Err(e) => Some(AuditIssue::Unresolvable {
                domain: domain.to_string(),
                topic: topic.to_string(),
                story: story.clone(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn clean_corpus() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "retail/returns/1_refund_en.txt", "user: refund\n");
        write(dir.path(), "retail/returns/1_refund_de.txt", "user: Rückgabe\n");
        write(dir.path(), "retail/returns/2_exchange_en.txt", "user: swap\n");
        write(dir.path(), "travel/booking/1_flight_fr.txt", "user: vol\n");

        let report = Corpus::at(dir.path()).audit().unwrap();
        assert!(report.is_clean(), "{:?}", report.issues);
        assert_eq!(report.domains, 2);
        assert_eq!(report.topics, 2);
        assert_eq!(report.stories, 4);
    }

    #[test]
    fn reports_malformed_and_blank() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "retail/returns/1_refund_en.txt", "user: refund\n");
        write(dir.path(), "retail/returns/2_empty_en.txt", "  \n\t");
        write(dir.path(), "retail/returns/abc_name_en.txt", "x");

        let report = Corpus::at(dir.path()).audit().unwrap();
        assert_eq!(report.stories, 2);
        assert_eq!(report.issues.len(), 2);
        assert!(report.issues.iter().any(|i| matches!(
            i,
            AuditIssue::BlankStory { story, .. } if story.id.dialogue_name == "empty"
        )));
        assert!(report.issues.iter().any(|i| matches!(
            i,
            AuditIssue::MalformedFile { file_name, reason: NameError::InvalidSequence(_), .. }
                if file_name == "abc_name_en.txt"
        )));
    }

    #[test]
    fn reports_duplicate_sequence_numbers() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "retail/returns/1_refund_en.txt", "a");
        write(dir.path(), "retail/returns/1_exchange_en.txt", "b");

        let report = Corpus::at(dir.path()).audit().unwrap();
        assert_eq!(report.issues.len(), 1);
        match &report.issues[0] {
            AuditIssue::Shadowed { story, by, via, .. } => {
                assert_eq!(story.id.dialogue_name, "refund");
                assert_eq!(by.id.dialogue_name, "exchange");
                assert_eq!(*via, ResolveBy::Seq);
            }
            other => panic!("expected Shadowed, got {other:?}"),
        }
        assert_eq!(
            report.issues[0].to_string(),
            "retail/returns/1_refund_en.txt: shadowed by 1_exchange_en.txt when resolved by sequence number"
        );
    }

    #[test]
    fn reports_duplicate_names() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "retail/returns/1_refund_en.txt", "a");
        write(dir.path(), "retail/returns/5_refund_en.txt", "b");

        let report = Corpus::at(dir.path()).audit().unwrap();
        assert_eq!(report.issues.len(), 1);
        assert!(matches!(
            &report.issues[0],
            AuditIssue::Shadowed { story, via: ResolveBy::Name, .. } if story.id.seq_num == 5
        ));
    }

    #[test]
    fn issues_name_the_file_on_disk() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "retail/returns/1_greeting_english.txt", "\n");
        write(dir.path(), "retail/returns/2_refund_en.txt", "a");
        write(dir.path(), "retail/returns/2_exchange_german.txt", "b");

        let report = Corpus::at(dir.path()).audit().unwrap();
        let lines: Vec<String> = report.issues.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "retail/returns/1_greeting_english.txt: blank story".to_string(),
                "retail/returns/2_refund_en.txt: shadowed by 2_exchange_german.txt when resolved by sequence number".to_string(),
            ]
        );
    }

    #[test]
    fn missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let err = Corpus::at(dir.path().join("missing")).audit().unwrap_err();
        assert!(matches!(err, CorpusError::RootNotFound(_)));
    }
}
