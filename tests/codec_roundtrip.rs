//! Property-based tests for the markdown codec
//!
//! Any question with non-empty text, at least one answer and a letter that
//! points at one of them must survive encode then decode unchanged.

use proptest::prelude::*;
use quiz_editor::codec;
use quiz_editor::{Answer, AnswerLetter, MAX_ANSWERS, Question, QuizDocument};

/// Question text: one to four lines, none of which reads as a headline
fn question_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Z][a-z ]{0,20}\\?", 1..=4).prop_map(|lines| lines.join("\n"))
}

/// Answer text without surrounding whitespace or dots
fn answer_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[a-z0-9]", "[a-z0-9][a-z0-9 ]{0,15}[a-z0-9]",]
}

fn question_strategy() -> impl Strategy<Value = Question> {
    (
        question_text_strategy(),
        prop::collection::vec(answer_text_strategy(), 1..=MAX_ANSWERS),
    )
        .prop_flat_map(|(text, answers)| {
            let len = answers.len();
            (Just(text), Just(answers), 0..len)
        })
        .prop_map(|(text, answers, correct)| {
            Question::new(
                text,
                answers.into_iter().map(Answer::new).collect(),
                AnswerLetter::from_index(correct),
            )
        })
}

proptest! {
    #[test]
    fn test_decode_inverts_encode(question in question_strategy()) {
        let decoded = codec::decode(&codec::encode(&question)).unwrap();
        prop_assert_eq!(decoded, question);
    }

    #[test]
    fn test_encode_is_idempotent(question in question_strategy()) {
        let once = codec::encode(&question);
        let twice = codec::encode(&codec::decode(&once).unwrap());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_exactly_one_correct_answer(question in question_strategy()) {
        let decoded = codec::decode(&codec::encode(&question)).unwrap();
        let correct: Vec<usize> = decoded
            .answers_with_correctness()
            .enumerate()
            .filter(|(_, (_, is_correct))| *is_correct)
            .map(|(index, _)| index)
            .collect();
        prop_assert_eq!(correct.len(), 1);
        prop_assert_eq!(Some(correct[0]), decoded.correct_letter.map(AnswerLetter::index));
    }

    #[test]
    fn test_batch_round_trip(questions in prop::collection::vec(question_strategy(), 0..6)) {
        let batch = codec::decode_batch(&codec::encode_batch(&questions));
        prop_assert!(batch.is_clean());
        prop_assert_eq!(batch.questions, questions);
    }

    #[test]
    fn test_json_keeps_correct_letter(questions in prop::collection::vec(question_strategy(), 1..4)) {
        let mut document = QuizDocument::new("Generated", 15);
        document.questions = questions;

        let json = document.to_json_pretty().unwrap();
        let restored = QuizDocument::from_json_str(&json).unwrap();
        prop_assert_eq!(restored, document);
    }

    #[test]
    fn test_decode_never_panics(input in "(\\*\\*Question\\*\\*|\\*\\*Answers\\*\\*|\\*\\*Correct Answer\\*\\*|[A-Za-z. *#:]{0,12}|\n){0,20}") {
        let _ = codec::decode(&input);
        let _ = codec::decode_batch(&input);
    }
}

#[test]
fn test_worked_example() {
    let input = "**Question**\nWhat is 2+2?\n\n**Answers**\nA. 3\nB. 4\nC. 5\n\n**Correct Answer**\nB";
    let question = codec::decode(input).unwrap();

    assert_eq!(question.text, "What is 2+2?");
    let answers: Vec<&str> = question.answers.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(answers, vec!["3", "4", "5"]);
    assert_eq!(question.correct_letter, AnswerLetter::from_char('B'));
    assert_eq!(codec::encode(&question), input);
}
