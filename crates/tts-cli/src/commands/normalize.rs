//! Normalize command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use g2p::{Lexicon, Normalizer};

/// Run the normalize command.
pub fn run(input: &str, lang: &str, lexicon: Option<&Path>) -> Result<()> {
    let normalizer = Normalizer::new(load_lexicon(lexicon)?, lang);
    let phonemes = normalizer.normalize(input)?;

    println!("Input:    {input}");
    println!("Language: {lang}");
    println!("Phonemes: {phonemes}");

    Ok(())
}

/// Load the lexicon file, or fall back to the built-in pronunciations.
pub(crate) fn load_lexicon(path: Option<&Path>) -> Result<Lexicon> {
    match path {
        Some(path) => Lexicon::from_file(path)
            .with_context(|| format!("failed to load lexicon from {}", path.display())),
        None => Ok(Lexicon::default()),
    }
}
