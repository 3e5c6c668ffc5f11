//! Sequence command implementation.

use std::path::Path;

use anyhow::Result;
use g2p::Normalizer;

use crate::commands::normalize::load_lexicon;

/// Run the sequence command.
///
/// Shows every stage of the text front-end: the phoneme string, the
/// symbol IDs the model consumes, and the symbols they decode back to.
pub fn run(input: &str, lang: &str, lexicon: Option<&Path>) -> Result<()> {
    let normalizer = Normalizer::new(load_lexicon(lexicon)?, lang);
    let phonemes = normalizer.normalize(input)?;

    let cleaners = cleaners_for(lang);
    let ids = symbols::text_to_sequence(&phonemes, &cleaners)?;
    let names = symbols::sequence_to_symbols(&ids);

    println!("Input:    {input}");
    println!("Phonemes: {phonemes}");
    println!("IDs:      {ids:?}");
    println!("Symbols:  {}", names.join(" "));

    Ok(())
}

fn cleaners_for(lang: &str) -> Vec<String> {
    let name = if lang == "en" {
        "english_cleaners"
    } else {
        "basic_cleaners"
    };
    vec![name.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_basic() {
        let result = run("hello", "en", None);
        assert!(result.is_ok());
    }

    #[test]
    fn test_sequence_unsupported_language() {
        let result = run("bonjour", "fr", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_cleaners_per_language() {
        assert_eq!(cleaners_for("en"), ["english_cleaners"]);
        assert_eq!(cleaners_for("zh"), ["basic_cleaners"]);
    }
}
