pub mod client;
pub mod error;
pub mod mock;
pub mod parser;

use crate::material::{MaterialContent, MaterialKind};
use crate::quiz::{Difficulty, Question};
use log::warn;

pub use client::{API_KEY_ENV, ModelClient, TextCompletion};
pub use error::GenerationError;

/// Source text is cut here before prompting; enough context for generation
/// without blowing the request size
const SOURCE_TEXT_LIMIT: usize = 8_000;

/// Content generation over a single model call per request
pub struct Generator<M: TextCompletion> {
    model: M,
}

impl<M: TextCompletion> Generator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    fn clipped(source_text: &str) -> &str {
        match source_text.char_indices().nth(SOURCE_TEXT_LIMIT) {
            Some((idx, _)) => &source_text[..idx],
            None => source_text,
        }
    }

    /// Generates quiz questions from extracted document text.
    ///
    /// Unlike material generation there is no mock fallback here; a failed
    /// call or unparseable response is returned to the caller.
    pub fn generate_quiz(
        &self,
        source_text: &str,
        difficulty: &Difficulty,
        question_count: usize,
    ) -> Result<Vec<Question>, GenerationError> {
        let prompt = format!(
            "Create {} {} difficulty quiz questions from the following study text. \
             Respond with a JSON array of objects with fields: text, question_type \
             (multiple_choice, true_false or identification), options, correct_answer, \
             explanation.\n\n{}",
            question_count,
            difficulty.as_str(),
            Self::clipped(source_text)
        );

        let response = self.model.complete(&prompt)?;
        parser::parse_questions(&response)
    }

    /// Generates a study material of the requested kind, falling back to
    /// static mock content on any failure so there is always something to show
    pub fn generate_material(
        &self,
        kind: MaterialKind,
        document_name: &str,
        source_text: &str,
    ) -> MaterialContent {
        match self.try_generate_material(kind, source_text) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "{} generation for {} failed, using mock content: {}",
                    kind.as_str(),
                    document_name,
                    e
                );
                match kind {
                    MaterialKind::Summary => mock::mock_summary(document_name),
                    MaterialKind::Flashcards => mock::mock_flashcards(document_name),
                    MaterialKind::Notes => mock::mock_notes(document_name),
                }
            }
        }
    }

    fn try_generate_material(
        &self,
        kind: MaterialKind,
        source_text: &str,
    ) -> Result<MaterialContent, GenerationError> {
        let clipped = Self::clipped(source_text);

        match kind {
            MaterialKind::Summary => {
                let prompt = format!(
                    "Summarize the following study text in a few short paragraphs.\n\n{}",
                    clipped
                );
                let response = self.model.complete(&prompt)?;
                Ok(MaterialContent::Summary {
                    text: parser::parse_summary(&response)?,
                })
            }
            MaterialKind::Flashcards => {
                let prompt = format!(
                    "Create flashcards from the following study text. Respond with a \
                     JSON array of objects with fields: front, back.\n\n{}",
                    clipped
                );
                let response = self.model.complete(&prompt)?;
                Ok(MaterialContent::Flashcards {
                    cards: parser::parse_flashcards(&response)?,
                })
            }
            MaterialKind::Notes => {
                let prompt = format!(
                    "Create structured study notes from the following text. Respond \
                     with a JSON array of objects with fields: heading, points.\n\n{}",
                    clipped
                );
                let response = self.model.complete(&prompt)?;
                Ok(MaterialContent::Notes {
                    sections: parser::parse_notes(&response)?,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuestionType;

    /// Scripted model for exercising the generation paths without a network
    struct ScriptedModel {
        response: Result<String, ()>,
    }

    impl ScriptedModel {
        fn returning(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
            }
        }

        fn failing() -> Self {
            Self { response: Err(()) }
        }
    }

    impl TextCompletion for ScriptedModel {
        fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(GenerationError::Api {
                    status: 500,
                    message: "scripted failure".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_generate_quiz_parses_questions() {
        let generator = Generator::new(ScriptedModel::returning(
            r#"Here you go: [
                {"text": "2+2?", "question_type": "multiple_choice",
                 "options": ["3", "4"], "correct_answer": "4"}
            ]"#,
        ));

        let questions = generator
            .generate_quiz("arithmetic text", &Difficulty::Easy, 1)
            .unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_type, QuestionType::MultipleChoice);
    }

    #[test]
    fn test_generate_quiz_propagates_failure() {
        let generator = Generator::new(ScriptedModel::failing());
        let result = generator.generate_quiz("text", &Difficulty::Hard, 5);
        assert!(matches!(result, Err(GenerationError::Api { .. })));
    }

    #[test]
    fn test_generate_quiz_propagates_parse_error() {
        let generator = Generator::new(ScriptedModel::returning("no array at all"));
        let result = generator.generate_quiz("text", &Difficulty::Easy, 3);
        assert!(matches!(result, Err(GenerationError::MissingJsonArray)));
    }

    #[test]
    fn test_generate_material_falls_back_to_mock() {
        let generator = Generator::new(ScriptedModel::failing());
        let content = generator.generate_material(MaterialKind::Flashcards, "bio.pdf", "text");

        assert_eq!(content.kind(), MaterialKind::Flashcards);
        let MaterialContent::Flashcards { cards } = content else {
            panic!("expected flashcards");
        };
        assert!(cards.iter().any(|c| c.back.contains("bio.pdf")));
    }

    #[test]
    fn test_generate_material_uses_model_output() {
        let generator = Generator::new(ScriptedModel::returning(
            r#"[{"front": "Cell", "back": "Basic unit of life"}]"#,
        ));
        let content = generator.generate_material(MaterialKind::Flashcards, "bio.pdf", "text");

        let MaterialContent::Flashcards { cards } = content else {
            panic!("expected flashcards");
        };
        assert_eq!(cards[0].front, "Cell");
    }

    #[test]
    fn test_generate_summary_passes_text_through() {
        let generator = Generator::new(ScriptedModel::returning("  A tidy summary.  "));
        let content = generator.generate_material(MaterialKind::Summary, "bio.pdf", "text");

        let MaterialContent::Summary { text } = content else {
            panic!("expected summary");
        };
        assert_eq!(text, "A tidy summary.");
    }

    #[test]
    fn test_clipped_limits_source_text() {
        let long_text = "x".repeat(SOURCE_TEXT_LIMIT * 2);
        assert_eq!(
            Generator::<ScriptedModel>::clipped(&long_text).len(),
            SOURCE_TEXT_LIMIT
        );
    }
}
