//! Parses free-form model text into typed generation payloads
//!
//! The model is asked for JSON but often wraps it in prose or code fences,
//! so the first JSON array is regex-extracted before deserializing.

use crate::material::{Flashcard, NoteSection};
use crate::quiz::{Question, QuestionType};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use super::error::GenerationError;

fn array_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[\s\S]*\]").expect("static regex"))
}

/// Extracts the outermost JSON array from the model text
pub fn extract_json_array(text: &str) -> Result<&str, GenerationError> {
    array_regex()
        .find(text)
        .map(|m| m.as_str())
        .ok_or(GenerationError::MissingJsonArray)
}

/// Question shape as the model emits it; field names vary between runs
#[derive(Deserialize)]
struct RawQuestion {
    #[serde(alias = "question")]
    text: String,
    #[serde(default, alias = "type")]
    question_type: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(alias = "answer")]
    correct_answer: String,
    #[serde(default)]
    explanation: Option<String>,
}

impl From<RawQuestion> for Question {
    fn from(raw: RawQuestion) -> Self {
        let question_type = raw
            .question_type
            .as_deref()
            .and_then(QuestionType::from)
            .unwrap_or(QuestionType::MultipleChoice);

        Question {
            text: raw.text,
            question_type,
            options: raw.options,
            correct_answer: raw.correct_answer,
            explanation: raw.explanation,
        }
    }
}

pub fn parse_questions(text: &str) -> Result<Vec<Question>, GenerationError> {
    let raw: Vec<RawQuestion> = serde_json::from_str(extract_json_array(text)?)?;
    Ok(raw.into_iter().map(Question::from).collect())
}

pub fn parse_flashcards(text: &str) -> Result<Vec<Flashcard>, GenerationError> {
    Ok(serde_json::from_str(extract_json_array(text)?)?)
}

pub fn parse_notes(text: &str) -> Result<Vec<NoteSection>, GenerationError> {
    Ok(serde_json::from_str(extract_json_array(text)?)?)
}

/// Summaries come back as free text, passed through trimmed
pub fn parse_summary(text: &str) -> Result<String, GenerationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_array_from_prose() {
        let text = "Here are your questions:\n```json\n[{\"a\": 1}]\n```\nEnjoy!";
        assert_eq!(extract_json_array(text).unwrap(), "[{\"a\": 1}]");
    }

    #[test]
    fn test_extract_missing_array() {
        assert!(matches!(
            extract_json_array("no json here"),
            Err(GenerationError::MissingJsonArray)
        ));
    }

    #[test]
    fn test_parse_questions_with_aliased_fields() {
        let text = r#"Sure! [
            {
                "question": "Which gas do plants absorb?",
                "type": "multiple_choice",
                "options": ["Oxygen", "Carbon dioxide"],
                "answer": "Carbon dioxide"
            },
            {
                "text": "Photosynthesis happens in the chloroplast.",
                "question_type": "true_false",
                "options": ["true", "false"],
                "correct_answer": "true"
            }
        ]"#;

        let questions = parse_questions(text).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question_type, QuestionType::MultipleChoice);
        assert_eq!(questions[0].correct_answer, "Carbon dioxide");
        assert_eq!(questions[1].question_type, QuestionType::TrueFalse);
    }

    #[test]
    fn test_parse_questions_defaults_unknown_type() {
        let text = r#"[{"question": "Q", "type": "essay", "answer": "A"}]"#;
        let questions = parse_questions(text).unwrap();
        assert_eq!(questions[0].question_type, QuestionType::MultipleChoice);
    }

    #[test]
    fn test_parse_questions_rejects_malformed_json() {
        let text = "[{\"question\": \"Q\", }]";
        assert!(matches!(
            parse_questions(text),
            Err(GenerationError::Json(_))
        ));
    }

    #[test]
    fn test_parse_flashcards() {
        let text = r#"[{"front": "DNA", "back": "Deoxyribonucleic acid"}]"#;
        let cards = parse_flashcards(text).unwrap();
        assert_eq!(cards[0].front, "DNA");
    }

    #[test]
    fn test_parse_notes() {
        let text = r#"Notes below.
        [{"heading": "Key terms", "points": ["Mitosis", "Meiosis"]}]"#;
        let sections = parse_notes(text).unwrap();
        assert_eq!(sections[0].points.len(), 2);
    }

    #[test]
    fn test_parse_summary_trims() {
        assert_eq!(parse_summary("  text \n").unwrap(), "text");
        assert!(matches!(
            parse_summary("   "),
            Err(GenerationError::EmptyResponse)
        ));
    }
}
