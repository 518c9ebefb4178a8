//! Repair of OCR artifacts before field extraction.
//!
//! The rules run in a fixed order; later rules rely on the output of the
//! earlier ones (decimal repair expects ASCII dashes, for instance). Every
//! rewriting rule is applied until the text stops changing, which keeps
//! `normalize` idempotent even for chained artifacts such as `1o0o1`.

use lazy_static::lazy_static;
use regex::Regex;

/// Token stamped on every page by the scanning app.
pub const WATERMARK: &str = "CamScanner";

lazy_static! {
    static ref DIGIT_O_DIGIT: Regex = Regex::new(r"(\d)[oO](\d)").unwrap();

    /// Literal misreadings seen in scanned facility letters. `Temtoanst` is
    /// often glued to the figure before it, so it carries no anchors.
    static ref MISREADINGS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"Temtoanst").unwrap(), "Term Loan"),
        (Regex::new(r"\btrest\b").unwrap(), "interest"),
        (Regex::new(r"\bBark's\b").unwrap(), "Bank's"),
    ];

    /// `7000,006:00` style amounts where OCR dropped the decimal point.
    static ref SPLIT_DECIMAL: Regex = Regex::new(r"(\d+)[,'](\d+)[-:](\d+)").unwrap();
    static ref DASHED_DECIMAL: Regex = Regex::new(r"(\d+)[-:](\d+)").unwrap();

    static ref MULTI_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Normalize raw OCR text. Never fails; unmatched text passes through.
pub fn normalize(text: &str) -> String {
    let mut text = text.to_string();
    while text.contains(WATERMARK) {
        text = text.replace(WATERMARK, "");
    }

    let text: String = text
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2010}'..='\u{2015}' => '-',
            other => other,
        })
        .collect();

    let mut text = replace_until_stable(&DIGIT_O_DIGIT, text, "${1}0${2}");

    for (pattern, replacement) in MISREADINGS.iter() {
        text = replace_until_stable(pattern, text, replacement);
    }

    let text = replace_until_stable(&SPLIT_DECIMAL, text, "${1}${2}.${3}");
    let text = replace_until_stable(&DASHED_DECIMAL, text, "${1}.${2}");

    MULTI_SPACE.replace_all(&text, " ").trim().to_string()
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

fn replace_until_stable(pattern: &Regex, mut text: String, replacement: &str) -> String {
    // Each pass consumes at least one separator or letter, so this terminates.
    while pattern.is_match(&text) {
        text = pattern.replace_all(&text, replacement).into_owned();
    }
    text
}
