use crate::ir::WordInput;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static INIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%%\{\s*init\s*:\s*(\{.*\})\s*\}%%$").unwrap());
static WEIGHTED_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<text>.*?)\s*[:,|\t]\s*(?P<weight>[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)$")
        .unwrap()
});

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid word array: {0}")]
    InvalidArray(String),
    #[error("line {line}: weight without text")]
    MissingText { line: usize },
}

#[derive(Debug, Default)]
pub struct ParseOutput {
    pub words: Vec<WordInput>,
    pub init_config: Option<serde_json::Value>,
}

/// Parses a word list.
///
/// Two forms are accepted. A JSON (or JSON5) array of strings and
/// `{text, weight}` objects, or one word per line where a trailing
/// `: weight`, `, weight`, `| weight` or tab-separated weight is optional.
/// Input that opens with `[` but is neither valid JSON nor JSON5 and does
/// not close with `]` is read as lines.
/// In the line form, `%%` starts a comment line and
/// `%%{init: {...}}%%` carries config overrides.
pub fn parse_words(input: &str) -> Result<ParseOutput, ParseError> {
    let (body, init_config) = preprocess_input(input);
    if body.is_empty() {
        return Ok(ParseOutput {
            words: Vec::new(),
            init_config,
        });
    }

    let first = body[0].1.as_str();
    let last = body[body.len() - 1].1.as_str();
    let words = if first.starts_with('[') {
        let joined = body
            .iter()
            .map(|(_, line)| line.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        match parse_word_array(&joined) {
            Ok(words) => words,
            // `[beta] release: 3` is a label, not an array.
            Err(_) if !last.ends_with(']') => parse_word_lines(&body)?,
            Err(err) => return Err(err),
        }
    } else {
        parse_word_lines(&body)?
    };

    Ok(ParseOutput { words, init_config })
}

fn parse_word_lines(body: &[(usize, String)]) -> Result<Vec<WordInput>, ParseError> {
    body.iter()
        .map(|(line_no, line)| parse_word_line(*line_no, line))
        .collect()
}

fn parse_word_array(json: &str) -> Result<Vec<WordInput>, ParseError> {
    match serde_json::from_str::<Vec<WordInput>>(json) {
        Ok(words) => Ok(words),
        Err(json_err) => json5::from_str::<Vec<WordInput>>(json)
            .map_err(|_| ParseError::InvalidArray(json_err.to_string())),
    }
}

fn parse_word_line(line_no: usize, line: &str) -> Result<WordInput, ParseError> {
    let Some(caps) = WEIGHTED_LINE_RE.captures(line) else {
        return Ok(WordInput::Text(line.to_string()));
    };
    let text = caps.name("text").map(|m| m.as_str().trim()).unwrap_or("");
    if text.is_empty() {
        return Err(ParseError::MissingText { line: line_no });
    }
    // The pattern only admits numeric literals.
    let weight = caps
        .name("weight")
        .and_then(|m| m.as_str().parse::<f64>().ok());
    Ok(WordInput::Weighted {
        text: text.to_string(),
        weight,
    })
}

/// Strips blank and comment lines, pulls out the init directive and keeps
/// the 1-based line number of everything else.
fn preprocess_input(input: &str) -> (Vec<(usize, String)>, Option<serde_json::Value>) {
    let mut init_config: Option<serde_json::Value> = None;
    let mut lines = Vec::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let trimmed_line = raw_line.trim();
        if trimmed_line.is_empty() {
            continue;
        }
        if let Some(caps) = INIT_RE.captures(trimmed_line) {
            if let Some(json_str) = caps.get(1).map(|m| m.as_str()) {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(json_str) {
                    init_config = Some(value);
                } else if let Ok(value) = json5::from_str::<serde_json::Value>(json_str) {
                    init_config = Some(value);
                }
            }
            continue;
        }
        if trimmed_line.starts_with("%%") {
            continue;
        }
        lines.push((idx + 1, trimmed_line.to_string()));
    }

    (lines, init_config)
}
