//! Parsing of model verdicts for pattern detection
//!
//! Models are asked to answer with a `DETECTED: YES/NO` line followed by a
//! `REASONING:` line. Responses that ignore the format still yield a verdict:
//! not detected, with the start of the raw text as reasoning.

/// Outcome extracted from a model response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionVerdict {
    pub detected: bool,
    pub reasoning: String,
}

/// Utilities for extracting verdicts from LLM responses.
pub struct ResponseParser;

impl ResponseParser {
    /// Parse a `DETECTED:` / `REASONING:` response.
    ///
    /// Lines are trimmed. The first `DETECTED:` line decides detection (its
    /// remainder contains "yes", case-insensitive). Scanning stops at the first
    /// `REASONING:` line, whose text after the colon becomes the reasoning.
    /// Without one, the reasoning is the first `preview_chars` characters of the
    /// raw response.
    pub fn parse_detection(response: &str, preview_chars: usize) -> DetectionVerdict {
        let mut detected = None;
        let mut reasoning = None;

        for line in response.lines().map(str::trim) {
            if detected.is_none()
                && let Some(rest) = line.strip_prefix("DETECTED:")
            {
                detected = Some(rest.to_lowercase().contains("yes"));
            } else if let Some(rest) = line.strip_prefix("REASONING:") {
                reasoning = Some(rest.trim().to_string());
                break;
            }
        }

        DetectionVerdict {
            detected: detected.unwrap_or(false),
            reasoning: reasoning.unwrap_or_else(|| Self::preview(response, preview_chars)),
        }
    }

    /// First `max_chars` characters of `text`
    pub fn preview(text: &str, max_chars: usize) -> String {
        text.chars().take(max_chars).collect()
    }
}
