use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// The question-numbering grammars a document may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFormat {
    /// `Question No. 1: ...` with numbered option lines below.
    Descriptive,
    /// `(1.)` questions carrying inline `(A.)` options.
    ParenthesisInline,
    /// `1. ...` line prefix.
    Numbered,
    /// `Q1:` / `Q1.` line prefix.
    QFormat,
    /// `Question 1:` line prefix.
    QuestionWord,
}

static DESCRIPTIVE_PROBE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Question\s+No\.\s+\d+:").unwrap());
static PAREN_INLINE_PROBE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^\s*\(\d+\.\)").unwrap());
pub(crate) static NUMBERED_PROBE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*\d+\.\s+").unwrap());
pub(crate) static QFORMAT_PROBE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*Q\d+\s*[:.]?\s+").unwrap());
pub(crate) static QUESTION_WORD_PROBE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*Question\s+\d+\s*[:.]?\s+").unwrap());

/// Format probes in detection priority order. The order is the tie-break
/// when a document would satisfy more than one grammar; it must not be
/// rearranged.
fn probes() -> [(QuestionFormat, &'static Regex); 5] {
    [
        (QuestionFormat::Descriptive, &DESCRIPTIVE_PROBE),
        (QuestionFormat::ParenthesisInline, &PAREN_INLINE_PROBE),
        (QuestionFormat::Numbered, &NUMBERED_PROBE),
        (QuestionFormat::QFormat, &QFORMAT_PROBE),
        (QuestionFormat::QuestionWord, &QUESTION_WORD_PROBE),
    ]
}

/// Detect which grammar dominates the question-area text.
///
/// Probes search anywhere in the block (multiline, case-insensitive);
/// `None` means the document is unparseable.
pub fn detect_format(text: &str) -> Option<QuestionFormat> {
    for (format, probe) in probes() {
        if probe.is_match(text) {
            debug!(?format, "question format detected");
            return Some(format);
        }
    }
    None
}
