use std::collections::BTreeSet;

use super::page::PageRecord;

/// Leading span used to look a text span up in the page map.
const PREFIX_PROBE_CHARS: usize = 100;

/// Advisory attribution of a text span to its source pages.
///
/// A page claims the span when its raw text contains the span's first 100
/// characters. Headers repeated verbatim across pages can claim spans they
/// did not produce, so the result is a hint, never a guarantee.
pub fn attribute(span: &str, pages: &[PageRecord]) -> (BTreeSet<u32>, BTreeSet<String>) {
    let mut page_numbers = BTreeSet::new();
    let mut sections = BTreeSet::new();
    let probe = leading_chars(span, PREFIX_PROBE_CHARS);
    if probe.is_empty() {
        return (page_numbers, sections);
    }
    for page in pages {
        if page.text.contains(probe) {
            page_numbers.insert(page.page_number);
            for section in &page.sections {
                sections.insert(section.label());
            }
        }
    }
    (page_numbers, sections)
}

fn leading_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}
