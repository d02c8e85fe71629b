use serde::{Deserialize, Serialize};

use super::sections::{detect_sections, Section};

/// A page of extracted text, positioned within the concatenated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-based position in the document.
    pub page_number: u32,
    pub text: String,
    /// Byte offsets of this page's text inside [`join_pages`] output.
    pub char_range: (usize, usize),
    pub sections: Vec<Section>,
}

/// The concatenated document the `char_range` offsets index into.
pub fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}

/// Build the page map for one run.
///
/// This is the only constructor; records are immutable afterwards and the
/// offsets are consistent with [`join_pages`] by construction.
pub fn build_page_records(pages: &[String]) -> Vec<PageRecord> {
    let mut records = Vec::with_capacity(pages.len());
    let mut offset = 0usize;
    for (idx, text) in pages.iter().enumerate() {
        let page_number = (idx + 1) as u32;
        let start = offset;
        let end = start + text.len();
        records.push(PageRecord {
            page_number,
            text: text.clone(),
            char_range: (start, end),
            sections: detect_sections(page_number, text),
        });
        // +1 for the joining newline
        offset = end + 1;
    }
    records
}
