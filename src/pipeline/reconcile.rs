use tracing::warn;

use crate::document::{provenance, PageRecord};
use crate::types::{AnswerKey, ParseSummary, ParsedDocument, Question, QuestionProvenance};

/// Keys carry no difficulty information; reconciled questions all get this.
const DEFAULT_DIFFICULTY: &str = "medium";

/// Join parsed questions to the answer key.
///
/// Questions with a key entry keep their document order and gain `correct`,
/// a default difficulty and an empty explanation; the rest are dropped and
/// only counted. Page attribution reuses the advisory substring heuristic.
pub fn reconcile(
    questions: Vec<Question>,
    key: &AnswerKey,
    pages: &[PageRecord],
    answer_page: usize,
) -> ParsedDocument {
    let total_questions = questions.len();
    let mut kept = Vec::with_capacity(total_questions);
    let mut unmatched = 0usize;

    for mut question in questions {
        match key.get(question.number) {
            Some(letter) => {
                question.correct = Some(letter);
                question.difficulty = DEFAULT_DIFFICULTY.to_string();
                question.explanation = String::new();
                let (page_numbers, sections) = provenance::attribute(&question.text, pages);
                question.metadata = QuestionProvenance {
                    pages: page_numbers,
                    sections,
                };
                kept.push(question);
            }
            None => {
                warn!(number = question.number, "no answer key entry; dropping question");
                unmatched += 1;
            }
        }
    }

    let summary = ParseSummary {
        total_questions,
        total_pages: pages.len(),
        answer_page,
        matched: kept.len(),
        unmatched,
    };
    ParsedDocument {
        questions: kept,
        summary,
    }
}
