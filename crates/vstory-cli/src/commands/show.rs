use std::path::Path;

use colored::Colorize;
use vstory_core::{BuiltinLanguages, StoryQuery};

pub fn run(
    root: &Path,
    domain: &str,
    topic: &str,
    seq: Option<u64>,
    name: Option<String>,
    json: bool,
    meta_only: bool,
) -> Result<(), String> {
    let corpus = super::open_corpus(root);
    let query = StoryQuery {
        seq_num: seq,
        dialogue_name: name,
    };
    let record = corpus
        .resolve_raw(domain, topic, &query)
        .map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&record).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let language = match BuiltinLanguages.name_of(&record.language_code) {
        Some(name) => format!("{} ({name})", record.language_code),
        None => record.language_code.to_string(),
    };

    println!(
        "  {} [{}]",
        record.dialogue_name.bold(),
        format!("{}/{}", record.domain, record.topic).dimmed()
    );
    println!("  seq:      {}", record.seq_num);
    println!("  language: {language}");
    println!("  file:     {}", record.file_name);

    if meta_only {
        return Ok(());
    }

    println!();
    if record.is_blank() {
        println!("  {}", "(blank)".dimmed());
    } else {
        for line in record.raw_text.lines() {
            println!("  {line}");
        }
    }

    Ok(())
}
