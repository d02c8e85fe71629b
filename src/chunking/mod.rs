pub mod tokens;

pub use tokens::{CharRatioEstimator, TokenEstimator};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::document::provenance;
use crate::document::PageRecord;

/// A bounded slice of document text carrying page/section provenance.
///
/// Ephemeral: produced and consumed within one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub token_estimate: usize,
    pub pages: BTreeSet<u32>,
    pub sections: BTreeSet<String>,
}

/// Chunking budget, supplied by the layer that spends the tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    pub max_tokens: usize,
    pub overlap_tokens: usize,
}

// Windows are cut at 90% of the budget so sentence snapping has room,
// and shrinking keeps the same margin.
const TARGET_FILL: f64 = 0.9;
const SHRINK_MARGIN: f64 = 0.9;

const SENTENCE_LOOKBACK: usize = 1_000;
const SENTENCE_LOOKAHEAD: usize = 500;
const SENTENCE_SLACK: usize = 200;

/// Splits document text into budgeted, overlapping, provenance-tagged
/// chunks. Never fails: oversized input degrades to best-effort emission.
pub struct Chunker<T = CharRatioEstimator> {
    estimator: T,
    config: ChunkConfig,
}

impl Chunker<CharRatioEstimator> {
    pub fn new(config: ChunkConfig) -> Self {
        Self {
            estimator: CharRatioEstimator,
            config,
        }
    }
}

impl<T> Chunker<T>
where
    T: TokenEstimator,
{
    pub fn with_estimator(estimator: T, config: ChunkConfig) -> Self {
        Self { estimator, config }
    }

    /// Split `text` into chunks within the token budget, attributing each
    /// chunk to `pages`. Empty input yields an empty list; text already
    /// within budget is returned as a single untouched chunk.
    pub fn chunk(&self, text: &str, pages: &[PageRecord]) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let max_tokens = self.config.max_tokens;
        let whole = self.estimator.estimate(text);
        if whole <= max_tokens {
            return vec![self.whole_document_chunk(text, pages, whole)];
        }

        let target_chars =
            ((self.estimator.chars_for(max_tokens) as f64) * TARGET_FILL).max(1.0) as usize;
        let overlap_chars = self.estimator.chars_for(self.config.overlap_tokens);
        let len = text.len();

        let mut chunks = Vec::new();
        let mut start = 0usize;
        while start < len {
            let raw_end = floor_boundary(text, (start + target_chars).min(len));
            let mut end = raw_end;
            if raw_end < len {
                if let Some(cut) = sentence_cut(text, start, raw_end) {
                    end = cut;
                }
            }
            if end <= start {
                end = ceil_boundary(text, start + 1);
            }

            let mut est = self.estimator.estimate(&text[start..end]);
            if est > max_tokens {
                // Shrink by the overflow ratio, with margin, and re-slice once.
                let ratio = max_tokens as f64 / est as f64;
                let shrunk = (((end - start) as f64) * ratio * SHRINK_MARGIN) as usize;
                let new_end = floor_boundary(text, start + shrunk.max(1));
                if new_end > start {
                    end = new_end;
                    est = self.estimator.estimate(&text[start..end]);
                }
                if est > max_tokens {
                    warn!(
                        tokens = est,
                        budget = max_tokens,
                        "chunk still over budget after shrink; emitting anyway"
                    );
                }
            }

            let slice = &text[start..end];
            let (page_numbers, sections) = provenance::attribute(slice, pages);
            chunks.push(Chunk {
                text: slice.to_string(),
                token_estimate: est,
                pages: page_numbers,
                sections,
            });

            if end >= len {
                break;
            }
            // Overlap with the previous chunk, but always move forward.
            let next = (start + 1).max(end.saturating_sub(overlap_chars));
            start = ceil_boundary(text, next);
        }

        debug!(chunks = chunks.len(), total_tokens = whole, "document chunked");
        chunks
    }

    fn whole_document_chunk(&self, text: &str, pages: &[PageRecord], estimate: usize) -> Chunk {
        // The chunk is the whole document, so attribution is exact.
        let page_numbers = pages.iter().map(|p| p.page_number).collect();
        let sections = pages
            .iter()
            .flat_map(|p| p.sections.iter().map(|s| s.label()))
            .collect();
        Chunk {
            text: text.to_string(),
            token_estimate: estimate,
            pages: page_numbers,
            sections,
        }
    }
}

/// Look for the last sentence terminator near the window end and cut just
/// after it, provided the cut stays within [`SENTENCE_SLACK`] chars of the
/// target end.
fn sentence_cut(text: &str, start: usize, raw_end: usize) -> Option<usize> {
    let from = ceil_boundary(text, raw_end.saturating_sub(SENTENCE_LOOKBACK).max(start));
    let to = floor_boundary(text, (raw_end + SENTENCE_LOOKAHEAD).min(text.len()));
    if from >= to {
        return None;
    }

    let mut best = None;
    let mut chars = text[from..to].char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some((_, next)) = chars.peek() {
                if next.is_whitespace() {
                    best = Some(from + i + c.len_utf8());
                }
            }
        }
    }

    let cut = best?;
    if cut > start && cut.abs_diff(raw_end) <= SENTENCE_SLACK {
        Some(cut)
    } else {
        None
    }
}

fn floor_boundary(text: &str, mut i: usize) -> usize {
    if i >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_boundary(text: &str, mut i: usize) -> usize {
    if i >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}
