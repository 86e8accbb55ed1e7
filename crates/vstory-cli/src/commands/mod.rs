pub mod check;
pub mod dialogues;
pub mod domains;
pub mod parse;
pub mod show;
pub mod topics;

use std::path::Path;

use vstory_core::{Corpus, CorpusConfig};

/// Open the corpus at `root` with the built-in language vocabulary.
fn open_corpus(root: &Path) -> Corpus {
    Corpus::new(CorpusConfig::default().with_root(root))
}
