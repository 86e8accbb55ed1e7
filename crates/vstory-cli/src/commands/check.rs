use std::path::Path;

use colored::Colorize;

pub fn run(root: &Path) -> Result<(), String> {
    let corpus = super::open_corpus(root);
    let report = corpus.audit().map_err(|e| e.to_string())?;

    for issue in &report.issues {
        eprintln!("  {} {issue}", "warning:".yellow().bold());
    }

    let summary = format!(
        "{} domain{}, {} topic{}, {} stor{}",
        report.domains,
        if report.domains == 1 { "" } else { "s" },
        report.topics,
        if report.topics == 1 { "" } else { "s" },
        report.stories,
        if report.stories == 1 { "y" } else { "ies" },
    );

    if report.is_clean() {
        println!("  All checks passed for '{}'.", root.display());
        println!("  {summary}");
        Ok(())
    } else {
        println!("  {summary}");
        let count = report.issues.len();
        Err(format!(
            "{count} issue{} found",
            if count == 1 { "" } else { "s" }
        ))
    }
}
