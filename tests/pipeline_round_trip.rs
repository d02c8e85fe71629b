use mcq_core::pipeline::DocumentPipeline;
use mcq_core::types::{OptionLetter, PipelineError};

fn standard_pages() -> Vec<String> {
    vec![
        "1. What is the capital of France?\n\
         A) London\n\
         B) Paris\n\
         C) Berlin\n\
         D) Madrid\n\
         2. Which planet is the largest?\n\
         A) Earth\n\
         B) Jupiter\n\
         C) Mars\n\
         D) Venus\n"
            .to_string(),
        "3. Which ocean is the deepest?\n\
         A) Atlantic\n\
         B) Indian\n\
         C) Pacific\n\
         D) Arctic\n\
         4. Which metal is liquid at room temperature?\n\
         A) Iron\n\
         B) Mercury\n\
         C) Gold\n\
         D) Copper\n"
            .to_string(),
        "1. B\n2. B\n3. C\n4. B\n".to_string(),
    ]
}

#[test]
fn round_trip_standard_document_reconciles_every_question() {
    let pipeline = DocumentPipeline::new();
    let parsed = pipeline.parse(&standard_pages(), None).unwrap();

    assert_eq!(parsed.questions.len(), 4);
    let numbers: Vec<u32> = parsed.questions.iter().map(|q| q.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4], "document order must be preserved");

    let correct: Vec<OptionLetter> = parsed
        .questions
        .iter()
        .map(|q| q.correct.unwrap())
        .collect();
    assert_eq!(
        correct,
        vec![
            OptionLetter::B,
            OptionLetter::B,
            OptionLetter::C,
            OptionLetter::B
        ]
    );

    for question in &parsed.questions {
        assert_eq!(question.difficulty, "medium");
        assert_eq!(question.explanation, "");
        assert_eq!(question.options.len(), 4);
    }

    // Questions attribute back to the page that printed them.
    assert!(parsed.questions[0].metadata.pages.contains(&1));
    assert!(parsed.questions[2].metadata.pages.contains(&2));

    assert_eq!(parsed.summary.total_questions, 4);
    assert_eq!(parsed.summary.total_pages, 3);
    assert_eq!(parsed.summary.answer_page, 2);
    assert_eq!(parsed.summary.matched, 4);
    assert_eq!(parsed.summary.unmatched, 0);
}

#[test]
fn idempotence_two_runs_serialize_byte_identically() {
    let pipeline = DocumentPipeline::new();
    let pages = standard_pages();

    let first = pipeline.parse(&pages, None).unwrap();
    let second = pipeline.parse(&pages, None).unwrap();

    let json1 = serde_json::to_string_pretty(&first).unwrap();
    let json2 = serde_json::to_string_pretty(&second).unwrap();
    assert_eq!(json1, json2, "pipeline output is not deterministic");
}

#[test]
fn golden_inline_scenario() {
    let pipeline = DocumentPipeline::new();
    let pages = vec![
        "(1.) What is 2+2? (A.) 3 (B.) 4 (C.) 5 (D.) 6".to_string(),
        "(1.) B".to_string(),
    ];

    let parsed = pipeline.parse(&pages, None).unwrap();
    let json = serde_json::to_string_pretty(&parsed).unwrap();

    let expected = r#"{
  "questions": [
    {
      "number": 1,
      "text": "What is 2+2?",
      "options": {
        "A": "3",
        "B": "4",
        "C": "5",
        "D": "6"
      },
      "correct": "B",
      "difficulty": "medium",
      "explanation": "",
      "metadata": {
        "pages": [
          1
        ],
        "sections": []
      }
    }
  ],
  "summary": {
    "total_questions": 1,
    "total_pages": 2,
    "answer_page": 1,
    "matched": 1,
    "unmatched": 0
  }
}"#;
    assert_eq!(json, expected, "golden snapshot mismatch");
}

#[test]
fn unmatched_questions_are_dropped_and_counted() {
    let pipeline = DocumentPipeline::new();
    let pages = vec![
        "1. First?\nA) a\nB) b\n2. Second?\nA) a\nB) b\n3. Third?\nA) a\nB) b\n".to_string(),
        "1. A\n3. C\n".to_string(),
    ];

    let parsed = pipeline.parse(&pages, None).unwrap();

    let numbers: Vec<u32> = parsed.questions.iter().map(|q| q.number).collect();
    assert_eq!(numbers, vec![1, 3]);
    assert_eq!(parsed.summary.total_questions, 3);
    assert_eq!(parsed.summary.matched, 2);
    assert_eq!(parsed.summary.unmatched, 1);
}

#[test]
fn explicit_answer_page_index_is_honored() {
    let pipeline = DocumentPipeline::new();
    let pages = vec![
        "1. B\n2. A\n".to_string(),
        "1. First?\nA) a\nB) b\n2. Second?\nA) a\nB) b\n".to_string(),
    ];

    let parsed = pipeline.parse(&pages, Some(0)).unwrap();

    assert_eq!(parsed.summary.answer_page, 0);
    assert_eq!(parsed.summary.matched, 2);
    assert_eq!(parsed.questions[0].correct, Some(OptionLetter::B));
}

#[test]
fn out_of_range_answer_page_clamps_to_last() {
    let pipeline = DocumentPipeline::new();
    let pages = standard_pages();

    let clamped = pipeline.parse(&pages, Some(99)).unwrap();
    let default = pipeline.parse(&pages, None).unwrap();

    assert_eq!(clamped.summary.answer_page, 2);
    assert_eq!(clamped, default);
}

#[test]
fn error_no_pages() {
    let pipeline = DocumentPipeline::new();
    assert_eq!(
        pipeline.parse(&[], None),
        Err(PipelineError::NoPagesExtracted)
    );
}

#[test]
fn error_no_format_detected_produces_no_partial_output() {
    let pipeline = DocumentPipeline::new();
    let pages = vec![
        "just prose without any markers at all".to_string(),
        "more unstructured prose".to_string(),
    ];

    assert_eq!(
        pipeline.parse(&pages, None),
        Err(PipelineError::NoFormatDetected)
    );
}

#[test]
fn error_no_questions_when_blocks_lack_options() {
    let pipeline = DocumentPipeline::new();
    let pages = vec![
        "1. Lonely question\nA) only option\n".to_string(),
        "1. A\n".to_string(),
    ];

    assert_eq!(
        pipeline.parse(&pages, None),
        Err(PipelineError::NoQuestionsParsed)
    );
}

#[test]
fn error_no_answer_key_found() {
    let pipeline = DocumentPipeline::new();
    let pages = vec![
        "1. First?\nA) a\nB) b\n".to_string(),
        "no answers listed here".to_string(),
    ];

    assert_eq!(
        pipeline.parse(&pages, None),
        Err(PipelineError::NoAnswerKeyFound)
    );
}
