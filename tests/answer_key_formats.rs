use mcq_core::parsing::parse_answer_key;
use mcq_core::types::OptionLetter;

#[test]
fn tabular_key_on_a_single_line() {
    let key = parse_answer_key(&["(1.) B (2.) C (3.) A (4.) A"]);

    assert_eq!(key.len(), 4);
    assert_eq!(key.get(1), Some(OptionLetter::B));
    assert_eq!(key.get(2), Some(OptionLetter::C));
    assert_eq!(key.get(3), Some(OptionLetter::A));
    assert_eq!(key.get(4), Some(OptionLetter::A));
}

#[test]
fn tabular_key_spread_over_lines() {
    let key = parse_answer_key(&["(1.) B", "(2.) C", "( 3 . ) D"]);

    assert_eq!(key.len(), 3);
    assert_eq!(key.get(3), Some(OptionLetter::D));
}

#[test]
fn tabular_format_is_exclusive() {
    // One tabular hit commits the whole key to that format; the numbered
    // line is ignored rather than mixed in.
    let key = parse_answer_key(&["(1.) B (2.) C", "4. D"]);

    assert_eq!(key.len(), 2);
    assert_eq!(key.get(4), None);
}

#[test]
fn line_based_formats_each_parse() {
    let key = parse_answer_key(&[
        "1. A",
        "2) B",
        "3: C",
        "Q4: D",
        "Answer 5: A",
        "6 B",
        "7. 2",
    ]);

    assert_eq!(key.len(), 7);
    assert_eq!(key.get(1), Some(OptionLetter::A));
    assert_eq!(key.get(2), Some(OptionLetter::B));
    assert_eq!(key.get(3), Some(OptionLetter::C));
    assert_eq!(key.get(4), Some(OptionLetter::D));
    assert_eq!(key.get(5), Some(OptionLetter::A));
    assert_eq!(key.get(6), Some(OptionLetter::B));
    // Numeric option: position 2 converts to its letter.
    assert_eq!(key.get(7), Some(OptionLetter::B));
}

#[test]
fn lowercase_letters_normalize() {
    let key = parse_answer_key(&["1. a", "q2: d"]);

    assert_eq!(key.get(1), Some(OptionLetter::A));
    assert_eq!(key.get(2), Some(OptionLetter::D));
}

#[test]
fn boundary_sequential_answers_count_from_one() {
    let key = parse_answer_key(&["Answer: 2", "Answer: 4"]);

    assert_eq!(key.len(), 2);
    assert_eq!(key.get(1), Some(OptionLetter::B));
    assert_eq!(key.get(2), Some(OptionLetter::D));
}

#[test]
fn sequential_counter_resyncs_after_numbered_entries() {
    let key = parse_answer_key(&["5. A", "Answer: 1"]);

    assert_eq!(key.get(5), Some(OptionLetter::A));
    // The bare answer continues from the last explicit number.
    assert_eq!(key.get(6), Some(OptionLetter::A));
}

#[test]
fn out_of_range_sequential_positions_are_ignored() {
    let key = parse_answer_key(&["Answer: 7"]);
    assert!(key.is_empty());
}

#[test]
fn duplicate_entries_overwrite_last_write_wins() {
    let key = parse_answer_key(&["1. A", "1. B"]);

    assert_eq!(key.len(), 1);
    assert_eq!(key.get(1), Some(OptionLetter::B));
}

#[test]
fn unparseable_lines_yield_an_empty_key() {
    let key = parse_answer_key(&["nothing here", "still nothing"]);
    assert!(key.is_empty());

    let key = parse_answer_key(&[]);
    assert!(key.is_empty());
}
