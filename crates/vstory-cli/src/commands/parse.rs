use vstory_core::BuiltinLanguages;
use vstory_core::naming::{self, STORY_EXTENSION};

pub fn run(file_name: &str) -> Result<(), String> {
    let suffix = format!(".{STORY_EXTENSION}");
    let id = if file_name.ends_with(&suffix) {
        naming::parse_file_name(file_name, &BuiltinLanguages)
    } else {
        naming::parse_stem(file_name, &BuiltinLanguages)
    }
    .map_err(|e| format!("{file_name}: {e}"))?;

    println!("  seq:      {}", id.seq_num);
    println!("  dialogue: {}", id.dialogue_name);
    println!("  language: {}", id.language_code);
    println!("  file:     {}", id.canonical_file_name());

    Ok(())
}
