pub mod parsed;
pub mod question;

pub use parsed::{ParseSummary, ParsedDocument, PipelineError};
pub use question::{AnswerKey, OptionLetter, OptionLetterError, Question, QuestionProvenance};
