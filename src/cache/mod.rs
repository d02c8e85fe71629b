use std::collections::HashMap;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::pipeline::DocumentPipeline;
use crate::types::{ParsedDocument, PipelineError};

/// Content hash of one pipeline input, formatted `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hash pages and the answer-page selection.
    ///
    /// Length-prefixed so page boundaries stay visible to the hash:
    /// `["ab", "c"]` and `["a", "bc"]` must not collide.
    pub fn of_pages(pages: &[String], answer_page: Option<usize>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((pages.len() as u64).to_be_bytes());
        for page in pages {
            hasher.update((page.len() as u64).to_be_bytes());
            hasher.update(page.as_bytes());
        }
        match answer_page {
            None => hasher.update([0u8]),
            Some(index) => {
                hasher.update([1u8]);
                hasher.update((index as u64).to_be_bytes());
            }
        }
        let hash = hasher.finalize();
        Fingerprint(format!("sha256:{}", hex::encode(hash)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Call-scoped memoization of pipeline runs.
///
/// One cache per document-processing call, never shared across calls;
/// `&mut self` makes accidental sharing a compile error. Errors memoize
/// too: a failed parse is as deterministic as a successful one.
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: HashMap<Fingerprint, Result<ParsedDocument, PipelineError>>,
}

impl ParseCache {
    pub fn new() -> Self {
        ParseCache::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the pipeline, or replay the memoized result for identical input.
    pub fn get_or_parse(
        &mut self,
        pipeline: &DocumentPipeline,
        pages: &[String],
        answer_page: Option<usize>,
    ) -> Result<ParsedDocument, PipelineError> {
        let fingerprint = Fingerprint::of_pages(pages, answer_page);
        if let Some(hit) = self.entries.get(&fingerprint) {
            debug!(fingerprint = fingerprint.as_str(), "parse cache hit");
            return hit.clone();
        }
        let result = pipeline.parse(pages, answer_page);
        self.entries.insert(fingerprint, result.clone());
        result
    }
}
