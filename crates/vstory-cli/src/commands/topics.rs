use std::path::Path;

pub fn run(root: &Path, domain: &str) -> Result<(), String> {
    let corpus = super::open_corpus(root);
    let topics = corpus.list_topics(domain).map_err(|e| e.to_string())?;

    if topics.is_empty() {
        println!("  No topics found in \"{domain}\".");
        return Ok(());
    }

    for topic in &topics {
        println!("{topic}");
    }

    Ok(())
}
