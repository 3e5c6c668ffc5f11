//! Number to words expansion for English text.
//!
//! [`normalize_numbers`] rewrites digit spans in running text: currency,
//! decimals, ordinals, and plain cardinals. Four-digit numbers between
//! 1001 and 2999 are read as years (`1999` becomes `nineteen
//! ninety-nine`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static COMMA_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9][0-9,]+[0-9]").unwrap());
static POUNDS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"£([0-9,]*[0-9]+)").unwrap());
static DOLLARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([0-9.,]*[0-9]+)").unwrap());
static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+\.[0-9]+").unwrap());
static ORDINAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+(?:st|nd|rd|th)").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Expand every digit span in `text` to words.
///
/// Passes run in a fixed order so compound forms resolve before the
/// plain cardinal pass sees their digits: grouping commas are removed,
/// currency is annotated with units, decimal points become the word
/// `point`, ordinal suffixes are folded in, and whatever digits remain
/// are read as cardinals (or years).
pub fn normalize_numbers(text: &str) -> String {
    let text = COMMA_NUMBER_RE.replace_all(text, |caps: &Captures| caps[0].replace(',', ""));
    let text = POUNDS_RE.replace_all(&text, "${1} pounds");
    let text = DOLLARS_RE.replace_all(&text, |caps: &Captures| expand_dollars(&caps[1]));
    let text = DECIMAL_RE.replace_all(&text, |caps: &Captures| caps[0].replace('.', " point "));
    let text = ORDINAL_RE.replace_all(&text, |caps: &Captures| expand_ordinal(&caps[0]));
    let text = NUMBER_RE.replace_all(&text, |caps: &Captures| expand_number(&caps[0]));
    text.into_owned()
}

/// Annotate a dollar amount with units. The digits themselves are left
/// numeric; the trailing cardinal pass reads them out.
fn expand_dollars(amount: &str) -> String {
    let parts: Vec<&str> = amount.split('.').collect();
    if parts.len() > 2 {
        // Unexpected format, e.g. "$1.2.3".
        return format!("{amount} dollars");
    }
    let dollars: u64 = parts.first().and_then(|p| p.parse().ok()).unwrap_or(0);
    let cents: u64 = parts.get(1).and_then(|p| p.parse().ok()).unwrap_or(0);
    let dollar_unit = if dollars == 1 { "dollar" } else { "dollars" };
    let cent_unit = if cents == 1 { "cent" } else { "cents" };
    if dollars > 0 && cents > 0 {
        format!("{dollars} {dollar_unit}, {cents} {cent_unit}")
    } else if dollars > 0 {
        format!("{dollars} {dollar_unit}")
    } else if cents > 0 {
        format!("{cents} {cent_unit}")
    } else {
        "zero dollars".to_string()
    }
}

fn expand_ordinal(matched: &str) -> String {
    let digits = matched.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    match digits.parse::<i64>() {
        Ok(num) => ordinal_to_words(num),
        Err(_) => matched.to_string(),
    }
}

fn expand_number(digits: &str) -> String {
    let Ok(num) = digits.parse::<i64>() else {
        // Longer than i64; leave the digits alone.
        return digits.to_string();
    };
    if num > 1000 && num < 3000 {
        if num == 2000 {
            "two thousand".to_string()
        } else if num > 2000 && num < 2010 {
            format!("two thousand {}", num_to_words(num % 100))
        } else if num % 100 == 0 {
            format!("{} hundred", num_to_words(num / 100))
        } else {
            // Year reading: digit pairs, with "oh" for a leading zero in
            // the second pair.
            let (hi, lo) = (num / 100, num % 100);
            if lo < 10 {
                format!("{} oh {}", num_to_words(hi), num_to_words(lo))
            } else {
                format!("{} {}", num_to_words(hi), num_to_words(lo))
            }
        }
    } else {
        num_to_words(num)
    }
}

// ============================================================================
// Cardinal and ordinal words
// ============================================================================

const ONES: [&str; 20] = [
    "",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Convert hundreds part (0-999) to words.
fn hundreds_to_words(n: i64) -> String {
    let n = n.unsigned_abs() as usize;
    if n == 0 {
        return String::new();
    }

    let mut parts = Vec::new();

    let h = n / 100;
    if h > 0 {
        parts.push(format!("{} hundred", ONES[h]));
    }

    let remainder = n % 100;
    if remainder > 0 {
        if remainder < 20 {
            parts.push(ONES[remainder].to_string());
        } else {
            let tens = remainder / 10;
            let ones = remainder % 10;
            if ones > 0 {
                parts.push(format!("{}-{}", TENS[tens], ONES[ones]));
            } else {
                parts.push(TENS[tens].to_string());
            }
        }
    }

    parts.join(" ")
}

/// Convert a number to cardinal words.
pub fn num_to_words(num: i64) -> String {
    if num == 0 {
        return "zero".to_string();
    }

    let mut parts = Vec::new();
    let mut n = num;

    if n < 0 {
        parts.push("minus".to_string());
        n = -n;
    }

    let billions = n / 1_000_000_000;
    if billions > 0 {
        parts.push(hundreds_to_words(billions));
        parts.push("billion".to_string());
    }
    n %= 1_000_000_000;

    let millions = n / 1_000_000;
    if millions > 0 {
        parts.push(hundreds_to_words(millions));
        parts.push("million".to_string());
    }
    n %= 1_000_000;

    let thousands = n / 1_000;
    if thousands > 0 {
        parts.push(hundreds_to_words(thousands));
        parts.push("thousand".to_string());
    }
    n %= 1_000;

    if n > 0 || parts.is_empty() {
        parts.push(hundreds_to_words(n));
    }

    parts
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a number to ordinal words.
pub fn ordinal_to_words(num: i64) -> String {
    let base = num_to_words(num);

    // Only the final word changes form.
    let (prefix, last) = match base.rfind([' ', '-']) {
        Some(idx) => base.split_at(idx + 1),
        None => ("", base.as_str()),
    };

    let ordinal = match last {
        "one" => "first".to_string(),
        "two" => "second".to_string(),
        "three" => "third".to_string(),
        "five" => "fifth".to_string(),
        "eight" => "eighth".to_string(),
        "nine" => "ninth".to_string(),
        "twelve" => "twelfth".to_string(),
        w if w.ends_with('y') => format!("{}ieth", &w[..w.len() - 1]),
        w => format!("{w}th"),
    };

    format!("{prefix}{ordinal}")
}
