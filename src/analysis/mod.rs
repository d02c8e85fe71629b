use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

use crate::parsing::answer_key::{
    KEY_ANSWER_WORD_RE, KEY_NUMBERED_RE, KEY_QFORMAT_RE, KEY_SPACED_RE,
};
use crate::parsing::format::{NUMBERED_PROBE, QFORMAT_PROBE, QUESTION_WORD_PROBE};
use crate::parsing::questions::OPTION_LINE_RE;

/// Marker counts for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMarkerStats {
    pub page_number: u32,
    pub line_count: usize,
    /// Question-start matches per grammar name.
    pub question_markers: BTreeMap<String, usize>,
    /// `A)` / `B.` style option lines.
    pub option_markers: usize,
    /// Answer-key matches per format name.
    pub answer_markers: BTreeMap<String, usize>,
}

/// Per-page marker diagnostics plus document totals.
///
/// For callers that want to explain a failed parse ("page 3 has question
/// markers but no options"); the pipeline itself never consults this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerAnalysis {
    pub total_pages: usize,
    pub pages: Vec<PageMarkerStats>,
    pub total_question_markers: usize,
    pub total_option_markers: usize,
    pub total_answer_markers: usize,
}

fn question_probes() -> [(&'static str, &'static Regex); 3] {
    [
        ("numbered", &NUMBERED_PROBE),
        ("q_format", &QFORMAT_PROBE),
        ("question_word", &QUESTION_WORD_PROBE),
    ]
}

fn answer_probes() -> [(&'static str, &'static Regex); 4] {
    [
        ("numbered", &KEY_NUMBERED_RE),
        ("q_format", &KEY_QFORMAT_RE),
        ("answer_word", &KEY_ANSWER_WORD_RE),
        ("space_separated", &KEY_SPACED_RE),
    ]
}

/// Count recognizable markers on every page.
pub fn analyze_pages(pages: &[String]) -> MarkerAnalysis {
    let mut stats = Vec::with_capacity(pages.len());

    for (idx, text) in pages.iter().enumerate() {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();

        let mut question_markers = BTreeMap::new();
        for (name, probe) in question_probes() {
            let count = lines.iter().filter(|l| probe.is_match(l)).count();
            question_markers.insert(name.to_string(), count);
        }

        let option_markers = lines.iter().filter(|l| OPTION_LINE_RE.is_match(l)).count();

        let mut answer_markers = BTreeMap::new();
        for (name, probe) in answer_probes() {
            let count = lines.iter().filter(|l| probe.is_match(l)).count();
            answer_markers.insert(name.to_string(), count);
        }

        stats.push(PageMarkerStats {
            page_number: (idx + 1) as u32,
            line_count: lines.len(),
            question_markers,
            option_markers,
            answer_markers,
        });
    }

    let total_question_markers = stats
        .iter()
        .map(|p| p.question_markers.values().sum::<usize>())
        .sum();
    let total_option_markers = stats.iter().map(|p| p.option_markers).sum();
    let total_answer_markers = stats
        .iter()
        .map(|p| p.answer_markers.values().sum::<usize>())
        .sum();

    MarkerAnalysis {
        total_pages: pages.len(),
        pages: stats,
        total_question_markers,
        total_option_markers,
        total_answer_markers,
    }
}
