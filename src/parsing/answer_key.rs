use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::{AnswerKey, OptionLetter};

/// Tabular keys: `(1.) B (2.) C ...`, possibly spread over several lines.
/// When this matches at all it is used exclusively for the whole key.
static TABULAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*(\d+)\s*\.\s*\)\s*([A-D])").unwrap());

/// `Answer: 2` with no question number: the answer for the next question
/// in sequence.
static SEQUENTIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*Answer\s*:\s*(\d+)").unwrap());

static KEY_PAREN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*\(\s*(\d+)\s*\.\s*\)\s*([A-D])").unwrap());
pub(crate) static KEY_NUMBERED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+)\s*[)\.:]?\s*([A-D])").unwrap());
pub(crate) static KEY_QFORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*Q(\d+)\s*[)\.:]?\s*([A-D])").unwrap());
pub(crate) static KEY_ANSWER_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*Answer\s+(\d+)\s*[)\.:]?\s*([A-D])").unwrap());
pub(crate) static KEY_SPACED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+)\s+([A-D])").unwrap());
static KEY_NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+)\s*[)\.:]?\s*([1-4])").unwrap());

/// How a line rule's second capture is read.
#[derive(Clone, Copy)]
enum KeyValue {
    /// A literal option letter.
    Letter,
    /// An option position 1-4, converted to its letter.
    Position,
}

/// Line-based key grammars in priority order; the first match consumes the
/// line. The order is load-bearing: `1. A` must be read as numbered before
/// the space-separated or numeric rules get a chance.
fn line_rules() -> [(&'static str, &'static Regex, KeyValue); 6] {
    [
        ("parenthesis", &KEY_PAREN_RE, KeyValue::Letter),
        ("numbered", &KEY_NUMBERED_RE, KeyValue::Letter),
        ("q_format", &KEY_QFORMAT_RE, KeyValue::Letter),
        ("answer_word", &KEY_ANSWER_WORD_RE, KeyValue::Letter),
        ("space_separated", &KEY_SPACED_RE, KeyValue::Letter),
        ("numeric_option", &KEY_NUMERIC_RE, KeyValue::Position),
    ]
}

/// Accumulator threaded through the line fold.
///
/// `current_number` drives the sequential `Answer: X` format and is
/// re-synchronized by every numbered match, so the two styles can mix.
#[derive(Default)]
struct KeyState {
    key: AnswerKey,
    current_number: u32,
}

/// Parse the designated answer-key page into a number → letter map.
///
/// `lines` are the page's non-empty trimmed lines. Duplicate entries for a
/// question number overwrite: last write wins.
pub fn parse_answer_key(lines: &[&str]) -> AnswerKey {
    // Tabular format first, over the whole page joined into one string.
    let combined = lines.join(" ");
    let mut tabular = AnswerKey::new();
    for caps in TABULAR_RE.captures_iter(&combined) {
        if let (Ok(number), Ok(letter)) = (
            caps[1].parse::<u32>(),
            OptionLetter::from_char(caps[2].chars().next().unwrap_or_default()),
        ) {
            tabular.assign(number, letter);
        }
    }
    if !tabular.is_empty() {
        debug!(entries = tabular.len(), "answer key parsed as tabular");
        return tabular;
    }

    let state = lines
        .iter()
        .fold(KeyState::default(), |state, line| apply_line(state, line));
    debug!(entries = state.key.len(), "answer key parsed line by line");
    state.key
}

fn apply_line(mut state: KeyState, line: &str) -> KeyState {
    // Sequential `Answer: X` takes the line before the numbered rules do.
    if let Some(caps) = SEQUENTIAL_RE.captures(line) {
        if let Some(letter) = caps[1]
            .parse::<u32>()
            .ok()
            .and_then(|p| OptionLetter::from_position(p).ok())
        {
            state.current_number += 1;
            state.key.assign(state.current_number, letter);
            return state;
        }
        // An out-of-range position falls through to the numbered rules.
    }

    for (name, rule, value) in line_rules() {
        let Some(caps) = rule.captures(line) else {
            continue;
        };
        let Ok(number) = caps[1].parse::<u32>() else {
            continue;
        };
        let letter = match value {
            KeyValue::Letter => {
                OptionLetter::from_char(caps[2].chars().next().unwrap_or_default()).ok()
            }
            KeyValue::Position => caps[2]
                .parse::<u32>()
                .ok()
                .and_then(|p| OptionLetter::from_position(p).ok()),
        };
        if let Some(letter) = letter {
            state.key.assign(number, letter);
            state.current_number = number;
            debug!(number, letter = letter.as_str(), rule = name, "answer key entry");
            break;
        }
    }
    state
}
