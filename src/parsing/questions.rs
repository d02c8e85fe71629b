use std::collections::BTreeMap;
use std::mem;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::format::QuestionFormat;
use crate::types::{OptionLetter, Question};

// Question-start grammars for the line-based parser, tried in priority
// order. Each captures the printed number and the remainder of the line,
// which seeds the stem.
static START_PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\((\d+)\.\)\s*(.*)$").unwrap());
static START_NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\.\s+(.*)$").unwrap());
static START_QFORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*Q(\d+)\s*[:.]?\s*(.*)$").unwrap());
static START_QUESTION_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*Question\s+(\d+)\s*[:.]?\s*(.*)$").unwrap());

/// `A) text`, `B. text`, `C: text`, `D- text`. Uppercase only; lowercase
/// letters at line start are prose, not options.
pub(crate) static OPTION_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-D])\s*[)\.:\-]\s*(.*)$").unwrap());

static DESCRIPTIVE_MARK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Question\s+No\.\s+\d+\s*:").unwrap());
static DESCRIPTIVE_HEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Question\s+No\.\s+(\d+)\s*:\s*(.*)$").unwrap());
/// `1) text` option lines under a descriptive question; positions 1-4 map
/// to letters A-D, anything else is dropped.
static POSITIONAL_OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*[)\.:\-]\s*(.+)$").unwrap());

static INLINE_QUESTION_MARK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+)\.\)").unwrap());
static INLINE_OPTION_MARK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([A-D])\.\)").unwrap());

fn question_start_rules() -> [&'static Regex; 4] {
    [
        &START_PAREN_RE,
        &START_NUMBERED_RE,
        &START_QFORMAT_RE,
        &START_QUESTION_WORD_RE,
    ]
}

fn match_question_start(line: &str) -> Option<(u32, String)> {
    for rule in question_start_rules() {
        if let Some(caps) = rule.captures(line) {
            let number = caps[1].parse().ok()?;
            return Some((number, caps[2].trim().to_string()));
        }
    }
    None
}

fn match_option_line(line: &str) -> Option<(OptionLetter, String)> {
    let caps = OPTION_LINE_RE.captures(line)?;
    let letter = OptionLetter::from_char(caps[1].chars().next()?).ok()?;
    Some((letter, caps[2].trim().to_string()))
}

/// Extract questions from a block in the detected grammar.
pub fn parse_questions(format: QuestionFormat, text: &str) -> Vec<Question> {
    let questions = match format {
        QuestionFormat::Descriptive => parse_descriptive(text),
        QuestionFormat::ParenthesisInline => parse_parenthesis_inline(text),
        QuestionFormat::Numbered | QuestionFormat::QFormat | QuestionFormat::QuestionWord => {
            parse_standard(text)
        }
    };
    debug!(count = questions.len(), ?format, "questions parsed");
    questions
}

/// Line-based parser state. A question is only committed out of
/// `InOptions`, which is what enforces "stem alone is not a question".
enum ParseState {
    NoQuestion,
    InQuestion {
        number: u32,
        stem: String,
    },
    InOptions {
        number: u32,
        stem: String,
        options: BTreeMap<OptionLetter, String>,
    },
}

/// Default parser: one question or option per line.
fn parse_standard(text: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut state = ParseState::NoQuestion;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((number, seed)) = match_question_start(line) {
            commit(&mut questions, mem::replace(&mut state, ParseState::NoQuestion));
            state = ParseState::InQuestion { number, stem: seed };
            continue;
        }

        state = match mem::replace(&mut state, ParseState::NoQuestion) {
            // Preamble before the first question is ignored.
            ParseState::NoQuestion => ParseState::NoQuestion,
            ParseState::InQuestion { number, mut stem } => match match_option_line(line) {
                Some((letter, text)) => {
                    let mut options = BTreeMap::new();
                    options.insert(letter, text);
                    ParseState::InOptions {
                        number,
                        stem,
                        options,
                    }
                }
                None => {
                    // Stem continuation.
                    if !stem.is_empty() {
                        stem.push(' ');
                    }
                    stem.push_str(line);
                    ParseState::InQuestion { number, stem }
                }
            },
            ParseState::InOptions {
                number,
                stem,
                mut options,
            } => {
                if let Some((letter, text)) = match_option_line(line) {
                    // A repeated letter overwrites the earlier value.
                    options.insert(letter, text);
                }
                ParseState::InOptions {
                    number,
                    stem,
                    options,
                }
            }
        };
    }

    commit(&mut questions, state);
    questions
}

fn commit(questions: &mut Vec<Question>, state: ParseState) {
    if let ParseState::InOptions {
        number,
        stem,
        options,
    } = state
    {
        match Question::from_parts(number, stem, options) {
            Some(q) => questions.push(q),
            None => debug!(number, "discarding question with too few options"),
        }
    }
}

/// `Question No. N:` blocks with positionally numbered options.
fn parse_descriptive(text: &str) -> Vec<Question> {
    let starts: Vec<usize> = DESCRIPTIVE_MARK_RE.find_iter(text).map(|m| m.start()).collect();
    let mut questions = Vec::new();

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        if let Some(q) = descriptive_block(&text[start..end]) {
            questions.push(q);
        }
    }
    questions
}

fn descriptive_block(block: &str) -> Option<Question> {
    let mut lines = block.lines();
    let head = lines.next()?;
    let caps = DESCRIPTIVE_HEAD_RE.captures(head.trim())?;
    let number: u32 = caps[1].parse().ok()?;
    let mut stem = caps[2].trim().to_string();

    let mut options = BTreeMap::new();
    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(opt) = POSITIONAL_OPTION_RE.captures(line) {
            // Positions outside 1-4 are consumed but dropped.
            if let Some(letter) = opt[1]
                .parse::<u32>()
                .ok()
                .and_then(|p| OptionLetter::from_position(p).ok())
            {
                options.insert(letter, opt[2].trim().to_string());
            }
        } else if options.is_empty() && !line.to_lowercase().starts_with("options") {
            // Wrapped stem; the bare "Options:" label is noise.
            stem.push(' ');
            stem.push_str(line);
        }
    }

    Question::from_parts(number, stem.trim().to_string(), options)
}

/// `(1.)` questions with `(A.)`-style options run together on one line.
fn parse_parenthesis_inline(text: &str) -> Vec<Question> {
    let marks: Vec<(usize, usize, u32)> = INLINE_QUESTION_MARK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let number = caps.get(1)?.as_str().parse().ok()?;
            Some((whole.start(), whole.end(), number))
        })
        .collect();

    let mut questions = Vec::new();
    for (i, &(_, content_start, number)) in marks.iter().enumerate() {
        let span_end = marks.get(i + 1).map(|m| m.0).unwrap_or(text.len());
        if let Some(q) = inline_question(number, &text[content_start..span_end]) {
            questions.push(q);
        }
    }
    questions
}

fn inline_question(number: u32, content: &str) -> Option<Question> {
    let marks: Vec<(usize, usize, OptionLetter)> = INLINE_OPTION_MARK_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let letter = OptionLetter::from_char(caps.get(1)?.as_str().chars().next()?).ok()?;
            Some((whole.start(), whole.end(), letter))
        })
        .collect();

    let first = marks.first()?;
    let stem = content[..first.0].trim().to_string();

    let mut options = BTreeMap::new();
    for (i, &(_, text_start, letter)) in marks.iter().enumerate() {
        let until = marks.get(i + 1).map(|m| m.0).unwrap_or(content.len());
        let option_text = content[text_start..until].trim();
        if !option_text.is_empty() {
            options.insert(letter, option_text.to_string());
        }
    }

    Question::from_parts(number, stem, options)
}
