use super::text::count_words;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MIN_SUMMARY_WORDS: u32 = 50;
pub const MAX_SUMMARY_WORDS: u32 = 500;
pub const DEFAULT_SUMMARY_WORDS: u32 = 150;
pub const DEFAULT_LANGUAGE: &str = "English";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    #[default]
    Brief,
    Detailed,
    BulletPoints,
}

impl SummaryStyle {
    pub const ALL: [Self; 3] = [Self::Brief, Self::Detailed, Self::BulletPoints];

    pub fn label(self) -> &'static str {
        match self {
            Self::Brief => "Brief",
            Self::Detailed => "Detailed",
            Self::BulletPoints => "Bullet Points",
        }
    }

    pub fn form_value(self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Detailed => "detailed",
            Self::BulletPoints => "bullet_points",
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SummaryStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "brief" => Ok(Self::Brief),
            "detailed" => Ok(Self::Detailed),
            "bullet points" | "bullet_points" | "bullet-points" | "bullets" => {
                Ok(Self::BulletPoints)
            }
            other => Err(Error::invalid_input(format!(
                "Unknown summary style: '{}'. Valid styles: brief, detailed, bullet points",
                other
            ))),
        }
    }
}

/// One user action's worth of summarization input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    text: String,
    style: SummaryStyle,
    max_words: u32,
    language: String,
}

impl SummaryRequest {
    /// Rejects empty text, an out-of-range length, or a blank language.
    pub fn new(
        text: impl Into<String>,
        style: SummaryStyle,
        max_words: u32,
        language: impl Into<String>,
    ) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::invalid_input("Text to summarize must not be empty"));
        }
        if !(MIN_SUMMARY_WORDS..=MAX_SUMMARY_WORDS).contains(&max_words) {
            return Err(Error::invalid_input(format!(
                "max_words must be between {} and {}, got {}",
                MIN_SUMMARY_WORDS, MAX_SUMMARY_WORDS, max_words
            )));
        }
        let language = language.into().trim().to_string();
        if language.is_empty() {
            return Err(Error::invalid_input("Output language must not be empty"));
        }

        Ok(Self {
            text,
            style,
            max_words,
            language,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> SummaryStyle {
        self.style
    }

    pub fn max_words(&self) -> u32 {
        self.max_words
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    pub summary_text: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStats {
    pub input_words: usize,
    pub input_chars: usize,
    pub summary_words: usize,
    pub summary_chars: usize,
    pub compression_percent: f64,
}

impl TextStats {
    pub fn compute(input: &str, summary: &str) -> Self {
        // Same counter as `SummaryResult::word_count`, so bare bullet markers are skipped
        let input_words = count_words(input);
        let summary_words = count_words(summary);

        let compression_percent = if input_words > 0 {
            let ratio = (1.0 - summary_words as f64 / input_words as f64) * 100.0;
            (ratio * 10.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            input_words,
            input_chars: input.chars().count(),
            summary_words,
            summary_chars: summary.chars().count(),
            compression_percent,
        }
    }
}
