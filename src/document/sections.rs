use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kinds of structural lines a page may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Chapter,
    Section,
    NumberedSection,
    Heading,
    Title,
}

/// A structural line recognized on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    /// Decimal-dotted (`1.2.3`) or roman (`IV`) as printed; absent for
    /// heading and title lines.
    pub number: Option<String>,
    pub title: String,
    /// 1-based page the line was found on.
    pub page: u32,
    /// 1-based line within the page.
    pub line: u32,
}

impl Section {
    /// Human-facing form used as a provenance label.
    pub fn label(&self) -> String {
        match (self.kind, &self.number) {
            (SectionKind::Chapter, Some(n)) if !self.title.is_empty() => {
                format!("Chapter {}: {}", n, self.title)
            }
            (SectionKind::Chapter, Some(n)) => format!("Chapter {}", n),
            (SectionKind::Section, Some(n)) if !self.title.is_empty() => {
                format!("Section {}: {}", n, self.title)
            }
            (SectionKind::Section, Some(n)) => format!("Section {}", n),
            (SectionKind::NumberedSection, Some(n)) => format!("{} {}", n, self.title),
            _ => self.title.clone(),
        }
    }
}

struct SectionMatch {
    number: Option<String>,
    title: String,
}

type LineGrammar = fn(&str) -> Option<SectionMatch>;

/// Line grammars in priority order. The first match wins, no line
/// classifies twice, and the order is the tie-break, so entries must not
/// be rearranged.
const LINE_GRAMMARS: &[(SectionKind, LineGrammar)] = &[
    (SectionKind::Chapter, match_chapter),
    (SectionKind::Section, match_section),
    (SectionKind::NumberedSection, match_numbered_section),
    (SectionKind::Heading, match_heading),
    (SectionKind::Title, match_title),
];

static CHAPTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:Chapter|Ch\.?)\s*(\d+(?:\.\d+)*|[IVXLCDM]+)\b\s*[:\-]?\s*([A-Za-z][A-Za-z\s,.\-]{0,50})?$")
        .unwrap()
});

static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:Section|Sec\.?|§)\s*(\d+(?:\.\d+)*|[IVXLCDM]+)\b\s*[:\-]?\s*([A-Za-z][A-Za-z\s,.\-]{0,80})?$")
        .unwrap()
});

// At least one internal dot, so `1. ...` question lines are left alone.
static NUMBERED_SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)+)\.?\s+(\S.*)$").unwrap());

fn captures_to_match(caps: regex::Captures<'_>) -> SectionMatch {
    let number = caps.get(1).map(|m| m.as_str().to_string());
    let title = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    SectionMatch { number, title }
}

fn match_chapter(line: &str) -> Option<SectionMatch> {
    CHAPTER_RE.captures(line).map(captures_to_match)
}

fn match_section(line: &str) -> Option<SectionMatch> {
    SECTION_RE.captures(line).map(captures_to_match)
}

fn match_numbered_section(line: &str) -> Option<SectionMatch> {
    NUMBERED_SECTION_RE.captures(line).map(captures_to_match)
}

fn match_heading(line: &str) -> Option<SectionMatch> {
    let len = line.chars().count();
    if !(4..=50).contains(&len) {
        return None;
    }
    let mut has_alpha = false;
    for c in line.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if !c.is_uppercase() {
                return None;
            }
        }
    }
    if !has_alpha {
        return None;
    }
    Some(SectionMatch {
        number: None,
        title: line.to_string(),
    })
}

fn match_title(line: &str) -> Option<SectionMatch> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if !(2..=9).contains(&words.len()) {
        return None;
    }
    for word in &words {
        let first = word.chars().next()?;
        if !first.is_uppercase() {
            return None;
        }
    }
    Some(SectionMatch {
        number: None,
        title: line.to_string(),
    })
}

/// Classify the heading-like lines of one page, in line order.
pub fn detect_sections(page_number: u32, text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        for (kind, grammar) in LINE_GRAMMARS {
            if let Some(m) = grammar(line) {
                sections.push(Section {
                    kind: *kind,
                    number: m.number,
                    title: m.title,
                    page: page_number,
                    line: (idx + 1) as u32,
                });
                break;
            }
        }
    }
    sections
}
