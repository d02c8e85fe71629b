use serde::{Deserialize, Serialize};

use crate::types::question::Question;

/// Outcome counts for one question-recovery run.
///
/// `total_questions` counts questions the parser emitted, before the answer
/// key is consulted, so `matched + unmatched == total_questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    pub total_questions: usize,
    pub total_pages: usize,
    /// Resolved 0-based index of the page the answer key was read from.
    pub answer_page: usize,
    pub matched: usize,
    pub unmatched: usize,
}

/// The final result of recovering questions from an extracted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub questions: Vec<Question>,
    pub summary: ParseSummary,
}

/// Why a question-recovery run produced nothing.
///
/// Partial reconciliation is not an error; it surfaces as the `unmatched`
/// count in [`ParseSummary`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("No pages were extracted from the document")]
    NoPagesExtracted,

    #[error("No known question numbering format detected")]
    NoFormatDetected,

    #[error("A question format was detected but no block yielded enough options")]
    NoQuestionsParsed,

    #[error("No answer key entries found on the designated page")]
    NoAnswerKeyFound,
}
