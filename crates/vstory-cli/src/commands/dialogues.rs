use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(root: &Path, domain: &str, topic: &str) -> Result<(), String> {
    let corpus = super::open_corpus(root);
    let stories = corpus
        .list_stories(domain, topic)
        .map_err(|e| e.to_string())?;

    if stories.is_empty() {
        println!("  No stories found in {domain}/{topic}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Seq", "Dialogue", "Language", "File"]);

    for entry in &stories {
        table.add_row(vec![
            entry.id.seq_num.to_string(),
            entry.id.dialogue_name.clone(),
            entry.id.language_code.to_string(),
            entry.file_name.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} stor{}",
        stories.len(),
        if stories.len() == 1 { "y" } else { "ies" }
    );

    Ok(())
}
