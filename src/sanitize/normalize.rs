// src/sanitize/normalize.rs
//! Progressively looser text normalizations used to detect a title echo.

use once_cell::sync::Lazy;
use regex::Regex;

static FORMATTING_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[*#:\-_\s]+").expect("formatting pattern is valid"));

// Letters, numbers and underscore. Unlike `\w`, combining marks are not word characters.
static NON_WORD_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s]").expect("non-word pattern is valid"));

/// A single normalization step.
pub type Normalization = fn(&str) -> String;

/// Text as written.
pub fn exact(text: &str) -> String {
    text.to_string()
}

/// Lowercased text.
pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Lowercased, with markdown markers, separators and whitespace removed.
pub fn without_formatting(text: &str) -> String {
    FORMATTING_RUNS
        .replace_all(&text.to_lowercase(), "")
        .into_owned()
}

/// Lowercased, keeping only word characters and whitespace.
pub fn alphanumeric(text: &str) -> String {
    NON_WORD_CHARS
        .replace_all(&text.to_lowercase(), "")
        .into_owned()
}

/// The four normalizations, strictest first.
pub const PIPELINE: [Normalization; 4] = [exact, lowercase, without_formatting, alphanumeric];

/// Every normalized form of `text`, in pipeline order.
pub fn variants(text: &str) -> [String; 4] {
    PIPELINE.map(|normalize| normalize(text))
}

/// True when any form of `line` equals, contains, or is contained by any
/// form of `title`. Empty forms only ever match by equality.
pub fn echoes(line: &str, title: &str) -> bool {
    let line_forms = variants(line);
    let title_forms = variants(title);

    line_forms.iter().any(|l| {
        title_forms.iter().any(|t| {
            l == t || (!l.is_empty() && !t.is_empty() && (t.contains(l.as_str()) || l.contains(t.as_str())))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_level_is_looser_than_the_last() {
        let text = "**AI: An_Overview**";
        assert_eq!(exact(text), "**AI: An_Overview**");
        assert_eq!(lowercase(text), "**ai: an_overview**");
        assert_eq!(without_formatting(text), "aianoverview");
        assert_eq!(alphanumeric(text), "ai an_overview");
    }

    #[test]
    fn alphanumeric_keeps_unicode_letters() {
        assert_eq!(alphanumeric("Café — Überblick!"), "café  überblick");
    }

    #[test]
    fn alphanumeric_drops_combining_marks() {
        assert_eq!(alphanumeric("e\u{301}!"), "e");
        assert_eq!(alphanumeric("Cafe\u{301} 2024"), "cafe 2024");
    }

    #[test]
    fn echo_detects_separator_stripped_titles() {
        assert!(echoes("AI An Overview", "AI: An Overview"));
        assert!(echoes("## Machine Learning ##", "Machine Learning"));
        assert!(echoes("machine learning:", "Machine Learning"));
    }

    #[test]
    fn echo_ignores_unrelated_lines() {
        assert!(!echoes("• Data drives modern systems", "Machine Learning"));
    }

    #[test]
    fn echo_matches_by_containment() {
        // A line that merely mentions the title counts as an echo.
        assert!(echoes("• Machine learning improves with data", "Machine Learning"));
    }
}
