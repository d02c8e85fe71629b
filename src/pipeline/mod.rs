pub mod reconcile;

pub use reconcile::reconcile;

use tracing::{debug, warn};

use crate::document::build_page_records;
use crate::parsing::{detect_format, parse_answer_key, parse_questions};
use crate::types::{ParsedDocument, PipelineError};

/// Orchestrates format detection, question parsing, answer-key extraction
/// and reconciliation for one document.
///
/// Stateless and synchronous; every `parse` call is self-contained, so
/// independent documents can be processed concurrently by separate callers.
#[derive(Debug, Default)]
pub struct DocumentPipeline;

impl DocumentPipeline {
    pub fn new() -> Self {
        DocumentPipeline
    }

    /// Recover reconciled questions from ordered per-page text.
    ///
    /// `answer_page` is the 0-based index of the answer-key page; `None`
    /// means the last page. Out-of-range indices clamp to the last page.
    pub fn parse(
        &self,
        pages: &[String],
        answer_page: Option<usize>,
    ) -> Result<ParsedDocument, PipelineError> {
        if pages.is_empty() {
            return Err(PipelineError::NoPagesExtracted);
        }

        let answer_idx = resolve_answer_page(pages.len(), answer_page);

        // 1. Split question area from the key page.
        let question_text = pages
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != answer_idx)
            .map(|(_, p)| p.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        // 2. Detect the numbering grammar and parse questions.
        let format = detect_format(&question_text).ok_or(PipelineError::NoFormatDetected)?;
        let questions = parse_questions(format, &question_text);
        if questions.is_empty() {
            return Err(PipelineError::NoQuestionsParsed);
        }

        // 3. Parse the answer key.
        let key_lines: Vec<&str> = pages[answer_idx]
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let key = parse_answer_key(&key_lines);
        if key.is_empty() {
            return Err(PipelineError::NoAnswerKeyFound);
        }
        debug!(
            questions = questions.len(),
            answers = key.len(),
            "reconciling questions against answer key"
        );

        // 4. Reconcile, with the page map for attribution.
        let page_records = build_page_records(pages);
        Ok(reconcile(questions, &key, &page_records, answer_idx))
    }
}

fn resolve_answer_page(total_pages: usize, requested: Option<usize>) -> usize {
    match requested {
        None => total_pages - 1,
        Some(index) if index >= total_pages => {
            warn!(
                requested = index,
                total_pages, "answer page out of range; using last page"
            );
            total_pages - 1
        }
        Some(index) => index,
    }
}
