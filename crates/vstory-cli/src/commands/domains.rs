use std::path::Path;

pub fn run(root: &Path) -> Result<(), String> {
    let corpus = super::open_corpus(root);
    let domains = corpus.list_domains().map_err(|e| e.to_string())?;

    if domains.is_empty() {
        println!("  No domains found.");
        return Ok(());
    }

    for domain in &domains {
        println!("{domain}");
    }

    Ok(())
}
