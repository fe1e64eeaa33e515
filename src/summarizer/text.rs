//! Input cleaning and output shaping around the model call.

use crate::{Error, Result};

/// Shortest pasted or uploaded text the form accepts.
pub const MIN_INPUT_CHARS: usize = 50;
/// Fewest words left after cleaning for a summary to be worth requesting.
pub const MIN_INPUT_WORDS: usize = 10;
/// Summaries may run this far past `max_words` before they are cut.
pub const OVERSHOOT_TOLERANCE: f64 = 1.25;

const ALLOWED_PUNCTUATION: &str = ".,!?;:-()[]{}\"'/";

const UNWANTED_PREFIXES: [&str; 4] = [
    "SUMMARY:",
    "Summary:",
    "Here is the summary:",
    "Here's the summary:",
];

const BULLET_MARKERS: [char; 4] = ['-', '*', '•', '+'];

/// Drops characters outside word characters, whitespace and common
/// punctuation, then collapses whitespace runs to single spaces.
pub fn clean_input(text: &str) -> String {
    let filtered: String = text
        .chars()
        .filter(|&c| {
            c.is_alphanumeric() || c == '_' || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(c)
        })
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Form-level checks applied before a request is built.
pub fn validate_source_text(text: &str) -> Result<()> {
    if text.trim().chars().count() < MIN_INPUT_CHARS {
        return Err(Error::invalid_input(format!(
            "Please provide at least {} characters of text for summarization.",
            MIN_INPUT_CHARS
        )));
    }

    let words = clean_input(text).split_whitespace().count();
    if words < MIN_INPUT_WORDS {
        return Err(Error::invalid_input(format!(
            "Text is too short for meaningful summarization (minimum {} words required)",
            MIN_INPUT_WORDS
        )));
    }

    Ok(())
}

fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

/// Whitespace-separated tokens holding at least one letter or digit, so bare
/// bullet markers and dashes are not counted.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().filter(|t| is_word(t)).count()
}

pub fn word_ceiling(max_words: u32) -> usize {
    (f64::from(max_words) * OVERSHOOT_TOLERANCE).ceil() as usize
}

pub fn strip_unwanted_prefixes(text: &str) -> String {
    let mut summary = text.trim();
    for prefix in UNWANTED_PREFIXES {
        if let Some(rest) = summary.strip_prefix(prefix) {
            summary = rest.trim();
        }
    }
    summary.to_string()
}

fn strip_bullet_marker(line: &str) -> &str {
    for marker in BULLET_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            // "**bold**" is emphasis, not a marker
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(after) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if after.is_empty() || after.starts_with(char::is_whitespace) {
                return after.trim_start();
            }
        }
    }

    line
}

/// Rewrites every non-empty line as a `- ` list item.
pub fn normalize_bullets(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_bullet_marker)
        .filter(|item| !item.is_empty())
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cuts `text` after `limit` words at a word boundary. Lines before the cut
/// are kept as they are.
pub fn truncate_words(text: &str, limit: usize) -> String {
    let mut remaining = limit;
    let mut kept: Vec<String> = Vec::new();

    for line in text.lines() {
        if remaining == 0 {
            break;
        }

        let words = count_words(line);
        if words <= remaining {
            kept.push(line.to_string());
            remaining -= words;
            continue;
        }

        let mut taken = Vec::new();
        for token in line.split_whitespace() {
            if is_word(token) {
                if remaining == 0 {
                    break;
                }
                remaining -= 1;
            }
            taken.push(token);
        }
        kept.push(taken.join(" "));
    }

    kept.join("\n").trim_end().to_string()
}
