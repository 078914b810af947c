use regex::Regex;
use std::sync::LazyLock;

use crate::workflows::scoring::domain::Intent;

static INTENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Intent\s*:\s*(High|Medium|Low)").expect("valid intent pattern")
});

static REASONING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Reasoning\s*:\s*(.*)").expect("valid reasoning pattern"));

/// Intent, reasoning and point value extracted from a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentVerdict {
    pub intent: Intent,
    pub reasoning: String,
    pub points: u8,
}

impl IntentVerdict {
    pub(crate) fn new(intent: Intent, reasoning: String) -> Self {
        Self {
            intent,
            reasoning,
            points: intent.points(),
        }
    }
}

/// Best-effort parse of the two-line `Intent:` / `Reasoning:` reply.
///
/// A missing intent label defaults to [`Intent::Low`]; a missing reasoning marker falls
/// back to the whole trimmed reply. Never fails.
pub fn parse_response(response: &str) -> IntentVerdict {
    let text = response.trim();

    let intent = INTENT_PATTERN
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|label| Intent::from_label(label.as_str()))
        .unwrap_or_default();

    let reasoning = REASONING_PATTERN
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|reasoning| reasoning.as_str().trim().to_string())
        .unwrap_or_else(|| text.to_string());

    IntentVerdict::new(intent, reasoning)
}
