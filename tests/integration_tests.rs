use std::collections::BTreeMap;
use std::sync::Arc;
use studykit::file_service::{FileService, FileUpload};
use studykit::generation::{GenerationError, Generator, TextCompletion};
use studykit::material::MaterialKind;
use studykit::quiz::{Difficulty, Question};
use studykit::quiz_service::QuizService;
use studykit::store::Store;

struct ScriptedModel(&'static str);

impl TextCompletion for ScriptedModel {
    fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        Ok(self.0.to_string())
    }
}

fn create_store() -> Arc<Store> {
    Arc::new(Store::new(":memory:").unwrap())
}

fn sheet(entries: &[(usize, &str)]) -> BTreeMap<usize, String> {
    entries
        .iter()
        .map(|(i, answer)| (*i, answer.to_string()))
        .collect()
}

#[test]
fn test_upload_generate_take_quiz_workflow() {
    let store = create_store();
    let files = FileService::new(store.clone());
    let quizzes = QuizService::new(store.clone());

    // Upload a document
    let file_id = files
        .upload(
            "alice",
            &FileUpload {
                original_name: "photosynthesis.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                size_bytes: 84_000,
                extracted_text: "Photosynthesis converts light into chemical energy.".to_string(),
            },
        )
        .unwrap();

    // Generate quiz questions from its text
    let generator = Generator::new(ScriptedModel(
        r#"[
            {"text": "What does photosynthesis produce?",
             "question_type": "multiple_choice",
             "options": ["Glucose", "Proteins"],
             "correct_answer": "Glucose"},
            {"text": "Photosynthesis requires light.",
             "question_type": "true_false",
             "options": ["true", "false"],
             "correct_answer": "true"}
        ]"#,
    ));
    let file = store.get_file(file_id).unwrap().unwrap();
    let questions = generator
        .generate_quiz(&file.extracted_text, &Difficulty::Medium, 2)
        .unwrap();
    assert_eq!(questions.len(), 2);

    let quiz_id = store
        .insert_quiz("alice", Some(file_id), "Photosynthesis Quiz", None, &Difficulty::Medium, &questions)
        .unwrap();
    let quiz = store.get_quiz(quiz_id).unwrap().unwrap();

    // Take the quiz
    let outcome = quizzes
        .submit("alice", &quiz, &sheet(&[(0, "Glucose"), (1, "false")]), 75.0)
        .unwrap();
    assert_eq!(outcome.score, 1);
    assert_eq!(outcome.percentage, 50);

    // The attempt reads back unchanged
    let attempt = store.get_attempt(outcome.attempt_id).unwrap().unwrap();
    assert_eq!(attempt.score, outcome.score);
    assert_eq!(attempt.time_taken_seconds, 75.0);
    let answers = attempt.answers().unwrap();
    assert_eq!(answers["0"].given, "Glucose");
    assert!(answers["0"].correct);
    assert!(!answers["1"].correct);

    // And everything shows up on the dashboard
    let dashboard = store.dashboard("alice");
    assert_eq!(dashboard.files_uploaded, 1);
    assert_eq!(dashboard.quizzes_created, 1);
    assert_eq!(dashboard.attempts_completed, 1);
    assert_eq!(dashboard.current_streak, 1);
    assert!(dashboard.total_study_time_minutes >= 2);
}

#[test]
fn test_material_generation_is_stored_and_counted() {
    let store = create_store();
    let generator = Generator::new(ScriptedModel(
        r#"[{"front": "Chlorophyll", "back": "Pigment absorbing light"}]"#,
    ));

    let content = generator.generate_material(MaterialKind::Flashcards, "photosynthesis.pdf", "text");
    store
        .insert_material("alice", None, "Photosynthesis Cards", &content)
        .unwrap();

    let dashboard = store.dashboard("alice");
    assert_eq!(dashboard.materials_generated, 1);
}

#[test]
fn test_quiz_progress_after_repeat_attempts() {
    let store = create_store();
    let service = QuizService::new(store.clone());

    let questions = vec![
        Question::multiple_choice("Q1", &["A", "B"], "A"),
        Question::multiple_choice("Q2", &["A", "B"], "B"),
        Question::true_false("Q3", true),
        Question::true_false("Q4", false),
        Question::identification("Q5", "ribosome"),
    ];
    let quiz_id = store
        .insert_quiz("alice", None, "Repeatable Quiz", Some("Biology"), &Difficulty::Hard, &questions)
        .unwrap();
    let quiz = store.get_quiz(quiz_id).unwrap().unwrap();

    service
        .submit("alice", &quiz, &sheet(&[(0, "A"), (1, "A"), (2, "true")]), 200.0)
        .unwrap();
    service
        .submit(
            "alice",
            &quiz,
            &sheet(&[(0, "A"), (1, "B"), (2, "true"), (3, "false"), (4, "ribosome")]),
            160.0,
        )
        .unwrap();

    let progress = store.quiz_progress(quiz_id, "alice").unwrap().unwrap();
    assert_eq!(progress.attempts.len(), 2);
    assert_eq!(progress.attempts[0].percentage, 40);
    assert_eq!(progress.attempts[1].percentage, 100);
    assert_eq!(progress.best_score, 5);
    assert!((progress.average_score - 70.0).abs() < 0.001);
    assert!(progress.interpretation.contains("2 attempts"));
}

#[test]
fn test_dashboard_empty_user_is_all_zero() {
    let store = create_store();
    let dashboard = store.dashboard("nobody");

    assert_eq!(dashboard.average_score, 0.0);
    assert_eq!(dashboard.total_study_time_minutes, 0);
    assert_eq!(dashboard.weekly_progress.len(), 7);
    assert!(dashboard.difficulty_breakdown.is_empty());
    assert!(dashboard.subject_performance.is_empty());
    assert!(store.predicted_next_score("nobody").is_none());
}

#[test]
fn test_deleting_source_file_cascades_derived_rows() {
    let store = create_store();
    let files = FileService::new(store.clone());

    let file_id = files
        .upload(
            "alice",
            &FileUpload {
                original_name: "history.md".to_string(),
                mime_type: "text/markdown".to_string(),
                size_bytes: 512,
                extracted_text: "The printing press changed everything.".to_string(),
            },
        )
        .unwrap();

    let questions = vec![Question::true_false("Gutenberg built a printing press.", true)];
    let quiz_id = store
        .insert_quiz("alice", Some(file_id), "History Check", None, &Difficulty::Easy, &questions)
        .unwrap();

    files.delete(file_id).unwrap();

    assert!(store.get_file(file_id).unwrap().is_none());
    assert!(store.get_quiz(quiz_id).unwrap().is_none());
    assert_eq!(store.dashboard("alice").quizzes_created, 0);
}
