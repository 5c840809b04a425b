use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Identification,
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
            QuestionType::Identification => "identification",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "multiple_choice" => Some(QuestionType::MultipleChoice),
            "true_false" => Some(QuestionType::TrueFalse),
            "identification" => Some(QuestionType::Identification),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

/// A single quiz question as stored in the quizzes table (JSON column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    pub fn multiple_choice(text: &str, options: &[&str], correct_answer: &str) -> Self {
        Question {
            text: text.to_string(),
            question_type: QuestionType::MultipleChoice,
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct_answer.to_string(),
            explanation: None,
        }
    }

    pub fn true_false(text: &str, correct_answer: bool) -> Self {
        Question {
            text: text.to_string(),
            question_type: QuestionType::TrueFalse,
            options: vec!["true".to_string(), "false".to_string()],
            correct_answer: if correct_answer { "true" } else { "false" }.to_string(),
            explanation: None,
        }
    }

    pub fn identification(text: &str, correct_answer: &str) -> Self {
        Question {
            text: text.to_string(),
            question_type: QuestionType::Identification,
            options: Vec::new(),
            correct_answer: correct_answer.to_string(),
            explanation: None,
        }
    }
}
