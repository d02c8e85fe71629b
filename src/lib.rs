//! Deterministic document chunking and MCQ answer-key reconciliation.
//!
//! `mcq-core` recovers structured multiple-choice questions from
//! loosely-formatted extracted PDF text: it detects which of several
//! numbering grammars the document uses, parses questions and options,
//! and reconciles them against a separately formatted answer key. It also
//! partitions large documents into token-budgeted, overlapping,
//! provenance-tagged chunks. All operations are deterministic regex and
//! string scans; identical inputs always produce identical outputs,
//! byte-for-byte.
//!
//! PDF text extraction, LLM calls and export rendering live in external
//! collaborators; this crate operates purely on in-memory text.

pub mod analysis;
pub mod cache;
pub mod chunking;
pub mod document;
pub mod parsing;
pub mod pipeline;
pub mod types;
