use serde::{Deserialize, Serialize};

/// One entry of the caller's word list.
///
/// Deserializes from either a bare JSON string or an object
/// `{"text": ..., "weight": ...}`. `value` is accepted in place of `weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WordInput {
    Text(String),
    Weighted {
        text: String,
        #[serde(default, alias = "value")]
        weight: Option<f64>,
    },
}

impl WordInput {
    pub fn text(&self) -> &str {
        match self {
            WordInput::Text(text) => text,
            WordInput::Weighted { text, .. } => text,
        }
    }

    /// The explicit weight, if it is usable. Zero, negative and non-finite
    /// values count as missing.
    pub fn usable_weight(&self) -> Option<f64> {
        match self {
            WordInput::Text(_) => None,
            WordInput::Weighted { weight, .. } => weight.filter(|w| w.is_finite() && *w > 0.0),
        }
    }

    pub fn weighted(text: impl Into<String>, weight: f64) -> Self {
        WordInput::Weighted {
            text: text.into(),
            weight: Some(weight),
        }
    }
}

impl From<&str> for WordInput {
    fn from(text: &str) -> Self {
        WordInput::Text(text.to_string())
    }
}

impl From<String> for WordInput {
    fn from(text: String) -> Self {
        WordInput::Text(text)
    }
}

impl From<(&str, f64)> for WordInput {
    fn from((text, weight): (&str, f64)) -> Self {
        WordInput::weighted(text, weight)
    }
}

const SAMPLE_WORDS: [(&str, f64); 12] = [
    ("sunset blush", 30.0),
    ("dark skin", 20.0),
    ("pregnant and nursing people", 16.0),
    ("micro beauty", 18.0),
    ("broccoli Freckles", 12.0),
    ("succinic acid", 14.0),
    ("sugar plum fairy", 18.0),
    ("olive skin", 16.0),
    ("pearl Skin", 14.0),
    ("Face yoga", 10.0),
    ("boyfriend blush", 14.0),
    ("latte makeup", 12.0),
];

/// The "Beauty Trends" demo list, sized for an 800x500 canvas.
pub fn sample_words() -> Vec<WordInput> {
    SAMPLE_WORDS.iter().map(|&pair| WordInput::from(pair)).collect()
}
