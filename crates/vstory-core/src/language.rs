//! Language-code vocabulary.
//!
//! File names end in a language token. The token is resolved through a
//! [`LanguageResolver`]: an exact code lookup first, then a common-name
//! fallback (`english` → `en`). [`BuiltinLanguages`] ships a closed table of
//! BCP-47 style codes; corpora with other vocabularies plug in their own
//! resolver.

use std::fmt;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

/// Minimum similarity score for fuzzy common-name matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.9;

/// Tokens shorter than this never take the fuzzy path.
const FUZZY_MIN_LEN: usize = 4;

/// A canonical language code such as `en` or `zh-TW`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Wrap a canonical code. Resolvers call this; callers should go through
    /// [`LanguageResolver::resolve`] instead.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Resolves the trailing token of a story file name into a language code.
pub trait LanguageResolver: Send + Sync {
    /// Look up a canonical code exactly as written.
    fn exact(&self, code: &str) -> Option<LanguageCode>;

    /// Look up a language by its common name (or a loose spelling of its code).
    fn from_common_name(&self, name: &str) -> Option<LanguageCode>;

    /// Exact lookup, falling back to the common name.
    fn resolve(&self, token: &str) -> Option<LanguageCode> {
        self.exact(token).or_else(|| self.from_common_name(token))
    }
}

/// One row of the built-in vocabulary.
struct LanguageEntry {
    code: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
}

const fn entry(
    code: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
) -> LanguageEntry {
    LanguageEntry {
        code,
        name,
        aliases,
    }
}

const LANGUAGES: &[LanguageEntry] = &[
    entry("af", "afrikaans", &[]),
    entry("ar", "arabic", &[]),
    entry("bg", "bulgarian", &[]),
    entry("bn", "bengali", &["bangla"]),
    entry("ca", "catalan", &[]),
    entry("cs", "czech", &[]),
    entry("cy", "welsh", &[]),
    entry("da", "danish", &[]),
    entry("de", "german", &["deutsch"]),
    entry("el", "greek", &[]),
    entry("en", "english", &[]),
    entry("es", "spanish", &["espanol", "castilian"]),
    entry("et", "estonian", &[]),
    entry("fa", "persian", &["farsi"]),
    entry("fi", "finnish", &[]),
    entry("fil", "filipino", &["tagalog"]),
    entry("fr", "french", &["francais"]),
    entry("ga", "irish", &[]),
    entry("gu", "gujarati", &[]),
    entry("he", "hebrew", &[]),
    entry("hi", "hindi", &[]),
    entry("hr", "croatian", &[]),
    entry("hu", "hungarian", &[]),
    entry("id", "indonesian", &[]),
    entry("is", "icelandic", &[]),
    entry("it", "italian", &[]),
    entry("ja", "japanese", &[]),
    entry("kn", "kannada", &[]),
    entry("ko", "korean", &[]),
    entry("lt", "lithuanian", &[]),
    entry("lv", "latvian", &[]),
    entry("ml", "malayalam", &[]),
    entry("mr", "marathi", &[]),
    entry("ms", "malay", &[]),
    entry("nl", "dutch", &["flemish"]),
    entry("no", "norwegian", &[]),
    entry("pa", "punjabi", &[]),
    entry("pl", "polish", &[]),
    entry("pt", "portuguese", &[]),
    entry("pt-BR", "brazilian portuguese", &["portuguese brazil"]),
    entry("ro", "romanian", &[]),
    entry("ru", "russian", &[]),
    entry("sk", "slovak", &[]),
    entry("sl", "slovenian", &[]),
    entry("sr", "serbian", &[]),
    entry("sv", "swedish", &[]),
    entry("sw", "swahili", &[]),
    entry("ta", "tamil", &[]),
    entry("te", "telugu", &[]),
    entry("th", "thai", &[]),
    entry("tr", "turkish", &[]),
    entry("uk", "ukrainian", &[]),
    entry("ur", "urdu", &[]),
    entry("vi", "vietnamese", &[]),
    entry(
        "zh-CN",
        "chinese simplified",
        &["chinese", "simplified chinese", "mandarin"],
    ),
    entry(
        "zh-TW",
        "chinese traditional",
        &["traditional chinese", "taiwanese mandarin"],
    ),
];

/// The built-in language vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLanguages;

impl BuiltinLanguages {
    /// All canonical codes in table order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> {
        LANGUAGES.iter().map(|l| l.code)
    }

    /// The English common name for a canonical code.
    pub fn name_of(&self, code: &LanguageCode) -> Option<&'static str> {
        LANGUAGES
            .iter()
            .find(|l| l.code == code.as_str())
            .map(|l| l.name)
    }
}

impl LanguageResolver for BuiltinLanguages {
    fn exact(&self, code: &str) -> Option<LanguageCode> {
        LANGUAGES
            .iter()
            .find(|l| l.code == code)
            .map(|l| LanguageCode::new(l.code))
    }

    fn from_common_name(&self, name: &str) -> Option<LanguageCode> {
        // Loose spelling of a code: `EN`, `zh-tw`, `zh_TW`.
        let as_code = name.replace('_', "-");
        if let Some(l) = LANGUAGES
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(&as_code))
        {
            return Some(LanguageCode::new(l.code));
        }

        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return None;
        }

        if let Some(l) = LANGUAGES
            .iter()
            .find(|l| l.name == normalized || l.aliases.contains(&normalized.as_str()))
        {
            return Some(LanguageCode::new(l.code));
        }

        if normalized.chars().count() < FUZZY_MIN_LEN {
            return None;
        }

        let mut best: Option<(&LanguageEntry, f64)> = None;
        for l in LANGUAGES {
            let score = std::iter::once(l.name)
                .chain(l.aliases.iter().copied())
                .map(|candidate| jaro_winkler(&normalized, candidate))
                .fold(0.0, f64::max);
            if score >= FUZZY_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
                best = Some((l, score));
            }
        }
        best.map(|(l, _)| LanguageCode::new(l.code))
    }
}

/// Lowercase, with `_` and `-` read as spaces and runs of spaces collapsed.
fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
