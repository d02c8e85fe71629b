use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionLetterError {
    #[error("Not an option letter (A-D): {0:?}")]
    NotALetter(char),
    #[error("Option position out of range 1-4: {0}")]
    PositionOutOfRange(u32),
}

/// One of the four option slots a multiple-choice question may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
    ];

    /// Accepts `a`-`d` in either case.
    pub fn from_char(c: char) -> Result<Self, OptionLetterError> {
        match c.to_ascii_uppercase() {
            'A' => Ok(OptionLetter::A),
            'B' => Ok(OptionLetter::B),
            'C' => Ok(OptionLetter::C),
            'D' => Ok(OptionLetter::D),
            other => Err(OptionLetterError::NotALetter(other)),
        }
    }

    /// Converts a printed option position (1-4) to its letter (A-D).
    ///
    /// Keys and descriptive-format options list answers by position;
    /// everything downstream speaks letters.
    pub fn from_position(position: u32) -> Result<Self, OptionLetterError> {
        match position {
            1 => Ok(OptionLetter::A),
            2 => Ok(OptionLetter::B),
            3 => Ok(OptionLetter::C),
            4 => Ok(OptionLetter::D),
            other => Err(OptionLetterError::PositionOutOfRange(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLetter::A => "A",
            OptionLetter::B => "B",
            OptionLetter::C => "C",
            OptionLetter::D => "D",
        }
    }
}

/// Pages and section labels a question was recovered from.
///
/// Advisory metadata only; attribution is heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionProvenance {
    pub pages: BTreeSet<u32>,
    pub sections: BTreeSet<String>,
}

/// A question recovered from the document text.
///
/// `number` is the number as printed, which malformed input may repeat or
/// skip. `correct` stays empty until reconciliation against the answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub number: u32,
    pub text: String,
    pub options: BTreeMap<OptionLetter, String>,
    pub correct: Option<OptionLetter>,
    pub difficulty: String,
    pub explanation: String,
    pub metadata: QuestionProvenance,
}

impl Question {
    /// A question with fewer options than this is malformed and is never emitted.
    pub const MIN_OPTIONS: usize = 2;

    /// Build a question from parser output, or `None` when too few options
    /// were recovered.
    ///
    /// This is the only constructor; it is what enforces the option floor
    /// across every parser variant.
    pub fn from_parts(
        number: u32,
        text: String,
        options: BTreeMap<OptionLetter, String>,
    ) -> Option<Self> {
        if options.len() < Self::MIN_OPTIONS {
            return None;
        }
        Some(Question {
            number,
            text,
            options,
            correct: None,
            difficulty: String::new(),
            explanation: String::new(),
            metadata: QuestionProvenance::default(),
        })
    }
}

/// Question-number → correct-letter map recovered from the designated key page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerKey {
    entries: BTreeMap<u32, OptionLetter>,
}

impl AnswerKey {
    pub fn new() -> Self {
        AnswerKey::default()
    }

    /// Record an answer. A later entry for the same number replaces the
    /// earlier one; keys that restate a question are taken at their word.
    pub fn assign(&mut self, number: u32, letter: OptionLetter) {
        self.entries.insert(number, letter);
    }

    pub fn get(&self, number: u32) -> Option<OptionLetter> {
        self.entries.get(&number).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, OptionLetter)> + '_ {
        self.entries.iter().map(|(n, l)| (*n, *l))
    }
}
