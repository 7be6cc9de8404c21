//! Text cleanup and lightweight analysis for extracted page content

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::utils::{
    MAX_CONTENT_LENGTH, MAX_CONTENT_LINES, MIN_CONTENT_LINE_LENGTH, truncate_chars,
};

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static BOILERPLATE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Cookies?\s+Policy",
        r"(?i)Privacy\s+Policy",
        r"(?i)Terms\s+of\s+Service",
        r"(?i)Accept\s+All\s+Cookies",
        r"(?i)This\s+website\s+uses\s+cookies",
        r"(?i)Advertisement",
        r"(?i)Skip\s+to\s+main\s+content",
        r"(?i)Jump\s+to\s+navigation",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid boilerplate regex"))
    .collect()
});

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").expect("Invalid word regex"));

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("Invalid sentence regex"));

const STOP_WORDS: &[&str] = &[
    "the", "and", "but", "for", "with", "are", "was", "were", "been", "have", "has", "had",
    "does", "did", "will", "would", "could", "should", "may", "might", "must", "can", "this",
    "that", "these", "those", "you", "she", "they", "him", "her", "them", "your", "his",
    "its", "our", "their",
];

/// Reduce raw page text to its content lines.
///
/// Blank lines and lines of [`MIN_CONTENT_LINE_LENGTH`] characters or fewer
/// (menus, buttons, bylines) are dropped. At most [`MAX_CONTENT_LINES`]
/// lines are kept and the result is cut to [`MAX_CONTENT_LENGTH`]
/// characters.
#[must_use]
pub fn clean_lines(raw: &str) -> String {
    let kept: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_CONTENT_LINE_LENGTH)
        .take(MAX_CONTENT_LINES)
        .collect();

    let joined = kept.join("\n");
    truncate_chars(&joined, MAX_CONTENT_LENGTH).to_string()
}

/// Collapse whitespace and strip cookie/privacy/navigation boilerplate
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut text = WHITESPACE.replace_all(text.trim(), " ").into_owned();

    for pattern in BOILERPLATE.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }

    text.trim().to_string()
}

/// Most frequent non-stop-words (3+ letters, seen more than once),
/// ties broken by first appearance
#[must_use]
pub fn extract_key_phrases(text: &str, max_phrases: usize) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (order, m) in WORD.find_iter(&lower).enumerate() {
        let entry = counts.entry(m.as_str()).or_insert((0, order));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .filter(|(word, (count, _))| *count > 1 && !STOP_WORDS.contains(word))
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(max_phrases)
        .map(|(word, _, _)| word.to_string())
        .collect()
}

/// Extractive summary of up to `max_sentences` sentences.
///
/// Sentences of 20 characters or fewer are ignored. When there are more
/// candidates than requested, earlier and medium-length sentences win.
#[must_use]
pub fn summarize_content(text: &str, max_sentences: usize) -> String {
    let sentences: Vec<&str> = SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > 20)
        .collect();

    if sentences.is_empty() {
        return String::new();
    }

    if sentences.len() <= max_sentences {
        return format!("{}.", sentences.join(". "));
    }

    let mut scored: Vec<(f64, &str)> = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let words = sentence.split_whitespace().count() as f64;
            let position_score = 1.0 / (i as f64 + 1.0);
            let length_score = (words / 20.0).min(1.0);
            (position_score * 0.6 + length_score * 0.4, *sentence)
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let top: Vec<&str> = scored
        .into_iter()
        .take(max_sentences)
        .map(|(_, s)| s)
        .collect();
    format!("{}.", top.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(BOILERPLATE.len(), 8);
        assert!(WHITESPACE.is_match(" "));
        assert!(WORD.is_match("tokio"));
        assert!(SENTENCE_END.is_match("done."));
    }

    #[test]
    fn clean_lines_drops_short_and_blank_lines() {
        let raw = "Home\n\n  Menu  \nThis line is long enough to keep\nok\nAnother content line here";
        assert_eq!(
            clean_lines(raw),
            "This line is long enough to keep\nAnother content line here"
        );
    }

    #[test]
    fn clean_lines_caps_length_and_line_count() {
        let raw = (0..500)
            .map(|i| format!("content line number {i:04}"))
            .collect::<Vec<_>>()
            .join("\n");
        let cleaned = clean_lines(&raw);
        assert!(cleaned.lines().count() <= MAX_CONTENT_LINES);
        assert!(cleaned.chars().count() <= MAX_CONTENT_LENGTH);
    }

    #[test]
    fn clean_text_removes_boilerplate() {
        let text = "Skip to main content   Rust 1.80   released.\n\nPrivacy  Policy";
        assert_eq!(clean_text(text), "Rust 1.80 released.");
    }

    #[test]
    fn key_phrases_rank_by_frequency() {
        let text = "Tokio runtime. The tokio scheduler and the runtime. Tokio tasks.";
        assert_eq!(extract_key_phrases(text, 5), vec!["tokio", "runtime"]);
    }

    #[test]
    fn short_text_is_summarized_whole() {
        let text = "Rust is a systems programming language. It is fast and memory safe!";
        assert_eq!(
            summarize_content(text, 3),
            "Rust is a systems programming language. It is fast and memory safe."
        );
        assert_eq!(summarize_content("tiny. text.", 3), "");
    }

    #[test]
    fn long_text_keeps_requested_sentence_count() {
        let text = (0..6)
            .map(|i| format!("Sentence number {i} has quite a few words in it"))
            .collect::<Vec<_>>()
            .join(". ");
        let summary = summarize_content(&text, 2);
        assert!(summary.starts_with("Sentence number 0"));
        assert_eq!(summary.matches("Sentence number").count(), 2);
    }
}
