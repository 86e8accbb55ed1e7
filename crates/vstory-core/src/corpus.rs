//! Domain/topic enumeration and story resolution over a corpus directory.
//!
//! Nothing is cached: every call re-reads the filesystem, so results always
//! reflect the tree as it is at call time.

use std::fmt;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::config::CorpusConfig;
use crate::error::{CorpusError, CorpusResult, NameError};
use crate::language::{BuiltinLanguages, LanguageResolver};
use crate::naming::{self, StoryId};
use crate::story::{StoryEntry, StoryQuery, StoryRecord};

/// Pattern every candidate story file must match.
const STORY_GLOB: &str = "*.txt";

/// Shell-style matching: wildcards never match a leading dot or a separator.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A `*.txt` file found in a topic directory, with its decomposition.
#[derive(Debug)]
pub(crate) struct StoryFile {
    pub file_name: String,
    pub path: PathBuf,
    pub parsed: Result<StoryId, NameError>,
}

/// Read-only handle on a story corpus rooted at a directory.
pub struct Corpus {
    config: CorpusConfig,
    languages: Box<dyn LanguageResolver>,
}

impl fmt::Debug for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Corpus")
            .field("root", &self.config.root)
            .finish_non_exhaustive()
    }
}

impl Corpus {
    /// Open a corpus with the built-in language vocabulary.
    pub fn new(config: CorpusConfig) -> Self {
        Self::with_languages(config, BuiltinLanguages)
    }

    /// Open a corpus with a custom language vocabulary.
    pub fn with_languages(config: CorpusConfig, languages: impl LanguageResolver + 'static) -> Self {
        Self {
            config,
            languages: Box::new(languages),
        }
    }

    /// Shorthand for `Corpus::new(CorpusConfig::default().with_root(root))`.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self::new(CorpusConfig::default().with_root(root))
    }

    /// The corpus configuration.
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// The language vocabulary used to validate file names.
    pub fn languages(&self) -> &dyn LanguageResolver {
        self.languages.as_ref()
    }

    /// Decompose a story file name using this corpus's vocabulary.
    pub fn parse_file_name(&self, file_name: &str) -> Result<StoryId, NameError> {
        naming::parse_file_name(file_name, self.languages())
    }

    /// Domains holding at least one valid topic, sorted.
    ///
    /// Directories starting with `_` or containing `{`/`}` are reserved and
    /// never listed.
    pub fn list_domains(&self) -> CorpusResult<Vec<String>> {
        let root = self.config.root();
        if !root.is_dir() {
            return Err(CorpusError::RootNotFound(root.to_path_buf()));
        }

        let mut domains = Vec::new();
        for name in subdirectories(root)? {
            if is_reserved(&name) {
                tracing::trace!(dir = %name, "Skipping reserved directory");
                continue;
            }
            if !self.list_topics(&name)?.is_empty() {
                domains.push(name);
            }
        }
        domains.sort();
        domains.dedup();

        tracing::debug!(root = %root.display(), count = domains.len(), "Listed domains");
        Ok(domains)
    }

    /// Topics of `domain` holding at least one valid story file, sorted.
    ///
    /// An absent domain yields an empty list.
    pub fn list_topics(&self, domain: &str) -> CorpusResult<Vec<String>> {
        let domain_dir = self.config.domain_dir(domain);
        if !domain_dir.is_dir() {
            tracing::debug!(domain, "Domain directory absent");
            return Ok(Vec::new());
        }

        let mut topics = Vec::new();
        for name in subdirectories(&domain_dir)? {
            if self.has_valid_story(&domain_dir.join(&name))? {
                topics.push(name);
            }
        }
        topics.sort();
        topics.dedup();

        tracing::debug!(domain, count = topics.len(), "Listed topics");
        Ok(topics)
    }

    /// Every valid story file in a topic, ordered by sequence number, then
    /// name, language, and file name. An absent topic yields an empty list.
    pub fn list_stories(&self, domain: &str, topic: &str) -> CorpusResult<Vec<StoryEntry>> {
        let topic_dir = self.config.topic_dir(domain, topic);
        if !topic_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut stories: Vec<StoryEntry> = self
            .scan_topic_dir(&topic_dir)?
            .into_iter()
            .filter_map(|f| {
                f.parsed.ok().map(|id| StoryEntry {
                    id,
                    file_name: f.file_name,
                })
            })
            .collect();
        stories.sort_by(|a, b| {
            (a.id.sort_key(), a.file_name.as_str()).cmp(&(b.id.sort_key(), b.file_name.as_str()))
        });
        Ok(stories)
    }

    /// Distinct dialogue names in a topic, sorted.
    pub fn list_dialogues(&self, domain: &str, topic: &str) -> CorpusResult<Vec<String>> {
        let mut names: Vec<String> = self
            .list_stories(domain, topic)?
            .into_iter()
            .map(|entry| entry.id.dialogue_name)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Resolve one story from partial constraints and read its text.
    ///
    /// Files are pre-selected with the glob `{seq|*}_{name|*}_*.txt`, then
    /// decomposed; only decompositions that agree with every supplied
    /// constraint are kept. When several remain, the lowest sequence number
    /// wins (then name, language, file name). If every glob match is
    /// malformed, the first one is reported as [`CorpusError::MalformedName`].
    pub fn resolve_raw(
        &self,
        domain: &str,
        topic: &str,
        query: &StoryQuery,
    ) -> CorpusResult<StoryRecord> {
        if query.is_unconstrained() {
            return Err(CorpusError::MissingConstraint);
        }

        let topic_dir = self.config.topic_dir(domain, topic);
        if !topic_dir.is_dir() {
            return Err(CorpusError::TopicNotFound {
                domain: domain.to_string(),
                topic: topic.to_string(),
                path: topic_dir,
            });
        }

        let pattern_text = query_pattern(query);
        let pattern = compile_pattern(&pattern_text)?;

        let mut best: Option<(StoryId, String, PathBuf)> = None;
        let mut first_malformed: Option<(String, NameError)> = None;

        for (file_name, path) in matching_files(&topic_dir, &pattern)? {
            match self.parse_file_name(&file_name) {
                Ok(id) if query.accepts(&id) => {
                    let better = best
                        .as_ref()
                        .is_none_or(|(current, _, _)| id.sort_key() < current.sort_key());
                    if better {
                        best = Some((id, file_name, path));
                    }
                }
                Ok(_) => {
                    tracing::trace!(file = %file_name, "Glob match rejected by constraints");
                }
                Err(reason) => {
                    tracing::trace!(file = %file_name, %reason, "Glob match is malformed");
                    if first_malformed.is_none() {
                        first_malformed = Some((file_name, reason));
                    }
                }
            }
        }

        let Some((id, file_name, path)) = best else {
            return Err(match first_malformed {
                Some((file_name, reason)) => CorpusError::MalformedName { file_name, reason },
                None => CorpusError::StoryNotFound {
                    domain: domain.to_string(),
                    topic: topic.to_string(),
                    pattern: pattern_text,
                },
            });
        };

        let raw_text = std::fs::read_to_string(&path).map_err(|e| CorpusError::io(&path, e))?;
        tracing::debug!(domain, topic, file = %path.display(), "Resolved story");

        Ok(StoryRecord {
            domain: domain.to_string(),
            topic: topic.to_string(),
            seq_num: id.seq_num,
            dialogue_name: id.dialogue_name,
            language_code: id.language_code,
            file_name,
            raw_text,
        })
    }

    /// All `*.txt` files of a topic directory with their decompositions,
    /// in file-name order.
    pub(crate) fn scan_topic_dir(&self, dir: &Path) -> CorpusResult<Vec<StoryFile>> {
        let pattern = compile_pattern(STORY_GLOB)?;
        Ok(matching_files(dir, &pattern)?
            .into_iter()
            .map(|(file_name, path)| {
                let parsed = self.parse_file_name(&file_name);
                StoryFile {
                    file_name,
                    path,
                    parsed,
                }
            })
            .collect())
    }

    /// Stops at the first file that decomposes.
    fn has_valid_story(&self, dir: &Path) -> CorpusResult<bool> {
        let pattern = compile_pattern(STORY_GLOB)?;
        for (file_name, _) in matching_files(dir, &pattern)? {
            match self.parse_file_name(&file_name) {
                Ok(_) => return Ok(true),
                Err(reason) => {
                    tracing::trace!(file = %file_name, %reason, "Ignoring malformed story file");
                }
            }
        }
        Ok(false)
    }
}

/// Reserved names: private (`_`) and template (`{...}`) directories.
pub fn is_reserved(name: &str) -> bool {
    name.starts_with('_') || name.contains('{') || name.contains('}')
}

/// The resolution glob for a query; literal parts are escaped.
pub fn query_pattern(query: &StoryQuery) -> String {
    let seq = query
        .seq_num
        .map_or_else(|| "*".to_string(), |s| s.to_string());
    let name = query
        .dialogue_name
        .as_deref()
        .map_or_else(|| "*".to_string(), Pattern::escape);
    format!("{seq}_{name}_*.txt")
}

fn compile_pattern(text: &str) -> CorpusResult<Pattern> {
    Pattern::new(text).map_err(|e| CorpusError::InvalidPattern {
        pattern: text.to_string(),
        message: e.msg.to_string(),
    })
}

/// Names of the immediate subdirectories of `dir`, sorted. Entries whose
/// names are not valid UTF-8 are skipped.
fn subdirectories(dir: &Path) -> CorpusResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))? {
        let entry = entry.map_err(|e| CorpusError::io(dir, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::trace!(name = ?raw, "Skipping non-UTF-8 directory"),
        }
    }
    names.sort();
    Ok(names)
}

/// Regular files directly in `dir` whose names match `pattern`, sorted by name.
fn matching_files(dir: &Path, pattern: &Pattern) -> CorpusResult<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))? {
        let entry = entry.map_err(|e| CorpusError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if pattern.matches_with(&name, MATCH_OPTIONS) {
            files.push((name, path));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}
