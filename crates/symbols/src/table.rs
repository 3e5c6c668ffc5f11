//! The symbol inventory.
//!
//! Symbol IDs are positions in one fixed list: padding, the special
//! dash, punctuation, letters, then `@`-prefixed ARPABET, pinyin, and
//! silence phonemes. Checkpoints are trained against these positions,
//! so the order is part of the model contract and must not change.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Padding symbol. Present in the table but never sequenced.
pub const PAD: &str = "_";

/// Legacy end-of-text marker. Not in the table; filtered explicitly.
const EOT: &str = "~";

const SPECIAL: &str = "-";
const PUNCTUATION: &str = "!'(),.:;? ";
const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// ARPABET phonemes; vowels carry stress digits 0-2.
const ARPABET: [&str; 84] = [
    "AA", "AA0", "AA1", "AA2", "AE", "AE0", "AE1", "AE2", "AH", "AH0", "AH1", "AH2", "AO", "AO0",
    "AO1", "AO2", "AW", "AW0", "AW1", "AW2", "AY", "AY0", "AY1", "AY2", "B", "CH", "D", "DH",
    "EH", "EH0", "EH1", "EH2", "ER", "ER0", "ER1", "ER2", "EY", "EY0", "EY1", "EY2", "F", "G",
    "HH", "IH", "IH0", "IH1", "IH2", "IY", "IY0", "IY1", "IY2", "JH", "K", "L", "M", "N", "NG",
    "OW", "OW0", "OW1", "OW2", "OY", "OY0", "OY1", "OY2", "P", "R", "S", "SH", "T", "TH", "UH",
    "UH0", "UH1", "UH2", "UW", "UW0", "UW1", "UW2", "V", "W", "Y", "Z", "ZH",
];

/// Pinyin initials.
const PINYIN_INITIALS: [&str; 23] = [
    "b", "c", "ch", "d", "f", "g", "h", "j", "k", "l", "m", "n", "p", "q", "r", "s", "sh", "t",
    "w", "x", "y", "z", "zh",
];

/// Pinyin finals; the table carries each with tones 1-5 (5 = neutral).
const PINYIN_FINALS: [&str; 37] = [
    "a", "ai", "an", "ang", "ao", "e", "ei", "en", "eng", "er", "i", "ia", "ian", "iang", "iao",
    "ie", "ii", "iii", "in", "ing", "iong", "iou", "o", "ong", "ou", "u", "ua", "uai", "uan",
    "uang", "uei", "uen", "uo", "v", "van", "ve", "vn",
];

/// Erhua retroflex suffix.
const PINYIN_RETROFLEX: &str = "rr";

/// Silence phonemes: short pause, spoken noise, long silence.
const SILENCES: [&str; 3] = ["sp", "spn", "sil"];

/// Every symbol in table order. Positions are the IDs.
pub static SYMBOLS: Lazy<Vec<String>> = Lazy::new(|| {
    let mut symbols = Vec::with_capacity(360);
    symbols.push(PAD.to_string());
    symbols.extend(SPECIAL.chars().map(|c| c.to_string()));
    symbols.extend(PUNCTUATION.chars().map(|c| c.to_string()));
    symbols.extend(LETTERS.chars().map(|c| c.to_string()));
    symbols.extend(ARPABET.iter().map(|s| format!("@{s}")));
    symbols.extend(PINYIN_INITIALS.iter().map(|s| format!("@{s}")));
    for final_ in PINYIN_FINALS {
        for tone in 1..=5 {
            symbols.push(format!("@{final_}{tone}"));
        }
    }
    symbols.push(format!("@{PINYIN_RETROFLEX}"));
    symbols.extend(SILENCES.iter().map(|s| format!("@{s}")));
    symbols
});

static SYMBOL_TO_ID: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    SYMBOLS
        .iter()
        .enumerate()
        .map(|(id, symbol)| (symbol.as_str(), id as i64))
        .collect()
});

/// Total number of symbols.
pub fn symbol_count() -> usize {
    SYMBOLS.len()
}

/// The ID of a symbol, if present.
pub fn symbol_id(symbol: &str) -> Option<i64> {
    SYMBOL_TO_ID.get(symbol).copied()
}

/// The symbol at an ID, if in range.
pub fn id_symbol(id: i64) -> Option<&'static str> {
    usize::try_from(id)
        .ok()
        .and_then(|i| SYMBOLS.get(i))
        .map(String::as_str)
}

/// Symbol ID for one character of cleaned text. Padding and the legacy
/// end marker never sequence, and unknown characters return `None`.
pub(crate) fn char_symbol_id(symbol: &str) -> Option<i64> {
    if symbol == PAD || symbol == EOT {
        return None;
    }
    symbol_id(symbol)
}
