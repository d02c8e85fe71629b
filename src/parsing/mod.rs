pub mod answer_key;
pub mod format;
pub mod questions;

pub use answer_key::parse_answer_key;
pub use format::{detect_format, QuestionFormat};
pub use questions::parse_questions;
