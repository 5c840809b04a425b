pub mod analytics;
pub mod attempts;
pub mod connection;
pub mod files;
pub mod materials;
pub mod performance;
pub mod preferences;
pub mod quizzes;
pub mod sessions;
pub mod streaks;

use crate::date_provider::{DateProvider, SystemDateProvider};
use crate::material::MaterialContent;
use crate::quiz::{Difficulty, Question};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, Result};
use std::sync::Arc;

pub use analytics::Analytics;
pub use attempts::{AnswerEntry, AnswerMap, AttemptRecord, AttemptsRepository};
pub use files::{FileRecord, FilesRepository};
pub use materials::{MaterialRecord, MaterialsRepository};
pub use performance::{CumulativePerformance, PerformanceRepository};
pub use preferences::{Preferences, PreferencesRepository};
pub use quizzes::{QuizRecord, QuizzesRepository};
pub use sessions::{Activity, SessionRecord, SessionsRepository};
pub use streaks::{StreakRecord, StreaksRepository};

/// Main Store struct providing access to all repositories
pub struct Store {
    pub conn: Connection,
    date_provider: Arc<dyn DateProvider>,
}

impl Store {
    pub fn new(db_path: &str) -> Result<Self> {
        Self::init(db_path, Arc::new(SystemDateProvider))
    }

    pub fn with_date_provider(db_path: &str, date_provider: Arc<dyn DateProvider>) -> Result<Self> {
        Self::init(db_path, date_provider)
    }

    fn init(db_path: &str, date_provider: Arc<dyn DateProvider>) -> Result<Self> {
        let conn = connection::init_connection(db_path)?;
        Ok(Store {
            conn,
            date_provider,
        })
    }

    /// Current time as seen by the store (delegates to the date provider)
    pub fn current_time(&self) -> DateTime<Utc> {
        self.date_provider.get_current_time()
    }

    pub fn today(&self) -> NaiveDate {
        self.current_time().date_naive()
    }

    // ===== Files Repository Access =====

    pub fn insert_file(
        &self,
        user_id: &str,
        storage_path: &str,
        original_name: &str,
        mime_type: &str,
        size_bytes: i64,
        extracted_text: &str,
    ) -> Result<i64> {
        let repo = FilesRepository::new(&self.conn);
        repo.insert(
            user_id,
            storage_path,
            original_name,
            mime_type,
            size_bytes,
            extracted_text,
            self.current_time(),
        )
    }

    pub fn get_file(&self, file_id: i64) -> Result<Option<FileRecord>> {
        FilesRepository::new(&self.conn).get(file_id)
    }

    pub fn delete_file(&self, file_id: i64) -> Result<()> {
        FilesRepository::new(&self.conn).delete(file_id)
    }

    pub fn count_files(&self, user_id: &str) -> Result<i64> {
        FilesRepository::new(&self.conn).count(user_id)
    }

    // ===== Quizzes Repository Access =====

    pub fn insert_quiz(
        &self,
        user_id: &str,
        file_id: Option<i64>,
        title: &str,
        subject: Option<&str>,
        difficulty: &Difficulty,
        questions: &[Question],
    ) -> Result<i64> {
        let repo = QuizzesRepository::new(&self.conn);
        repo.insert(
            user_id,
            file_id,
            title,
            subject,
            difficulty,
            questions,
            self.current_time(),
        )
    }

    pub fn get_quiz(&self, quiz_id: i64) -> Result<Option<QuizRecord>> {
        QuizzesRepository::new(&self.conn).get(quiz_id)
    }

    pub fn quizzes_for_user(&self, user_id: &str) -> Result<Vec<QuizRecord>> {
        QuizzesRepository::new(&self.conn).for_user(user_id)
    }

    pub fn count_quizzes(&self, user_id: &str) -> Result<i64> {
        QuizzesRepository::new(&self.conn).count(user_id)
    }

    // ===== Attempts Repository Access =====

    pub fn insert_attempt(
        &self,
        user_id: &str,
        quiz_id: i64,
        score: i32,
        total_questions: i32,
        time_taken_seconds: f64,
        answers: &AnswerMap,
    ) -> Result<i64> {
        let repo = AttemptsRepository::new(&self.conn);
        repo.insert(
            user_id,
            quiz_id,
            score,
            total_questions,
            time_taken_seconds,
            answers,
            self.current_time(),
        )
    }

    pub fn get_attempt(&self, attempt_id: i64) -> Result<Option<AttemptRecord>> {
        AttemptsRepository::new(&self.conn).get(attempt_id)
    }

    pub fn attempts_for_quiz(&self, quiz_id: i64, user_id: &str) -> Result<Vec<AttemptRecord>> {
        AttemptsRepository::new(&self.conn).for_quiz(quiz_id, user_id)
    }

    pub fn count_attempts(&self, user_id: &str) -> Result<i64> {
        AttemptsRepository::new(&self.conn).count(user_id)
    }

    // ===== Materials Repository Access =====

    pub fn insert_material(
        &self,
        user_id: &str,
        file_id: Option<i64>,
        title: &str,
        content: &MaterialContent,
    ) -> Result<i64> {
        let repo = MaterialsRepository::new(&self.conn);
        repo.insert(user_id, file_id, title, content, self.current_time())
    }

    pub fn get_material(&self, material_id: i64) -> Result<Option<MaterialRecord>> {
        MaterialsRepository::new(&self.conn).get(material_id)
    }

    // ===== Sessions Repository Access =====

    /// Persists a finished session interval, deriving whole minutes from the
    /// measured span (at least 1)
    pub fn record_session(
        &self,
        user_id: &str,
        activity: Activity,
        resource_name: Option<&str>,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Result<i64> {
        let seconds = (ended_at - started_at).num_seconds().max(0);
        let minutes = ((seconds as f64 / 60.0).ceil() as i64).max(1);

        SessionsRepository::new(&self.conn).insert(
            user_id,
            activity,
            resource_name,
            Some(minutes),
            started_at,
            Some(ended_at),
        )
    }

    pub fn count_sessions(&self, user_id: &str) -> Result<i64> {
        SessionsRepository::new(&self.conn).count(user_id)
    }

    // ===== Streaks / Performance / Preferences Access =====

    pub fn touch_streak(&self, user_id: &str) -> Result<StreakRecord> {
        StreaksRepository::new(&self.conn).touch(user_id, self.today())
    }

    pub fn get_streak(&self, user_id: &str) -> Result<Option<StreakRecord>> {
        StreaksRepository::new(&self.conn).get(user_id)
    }

    pub fn cumulative_performance(&self, user_id: &str) -> Result<Vec<CumulativePerformance>> {
        PerformanceRepository::new(&self.conn).cumulative(user_id)
    }

    pub fn preferences(&self, user_id: &str) -> Result<Preferences> {
        PreferencesRepository::new(&self.conn).get_or_default(user_id)
    }

    pub fn set_preferences(&self, user_id: &str, preferences: &Preferences) -> Result<()> {
        PreferencesRepository::new(&self.conn).set(user_id, preferences)
    }

    // ===== Analytics Access =====

    pub fn dashboard(&self, user_id: &str) -> analytics::DashboardAnalytics {
        Analytics::new(&self.conn).dashboard(user_id, self.today())
    }

    pub fn question_type_trends(&self, user_id: &str) -> Vec<analytics::QuestionTypeTrend> {
        Analytics::new(&self.conn).question_type_trends(user_id)
    }

    pub fn predicted_next_score(&self, user_id: &str) -> Option<f64> {
        Analytics::new(&self.conn).predicted_next_score(user_id)
    }

    pub fn comparative_standing(&self, user_id: &str) -> analytics::ComparativeStanding {
        Analytics::new(&self.conn).comparative_standing(user_id, self.today())
    }

    pub fn quiz_progress(&self, quiz_id: i64, user_id: &str) -> Result<Option<analytics::QuizProgress>> {
        Analytics::new(&self.conn).quiz_progress(quiz_id, user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_provider::FixedDateProvider;

    fn create_test_store() -> Store {
        Store::new(":memory:").expect("Failed to create test store")
    }

    #[test]
    fn test_store_creation() {
        let store = create_test_store();
        assert_eq!(store.count_files("alice").unwrap(), 0);
        assert_eq!(store.count_quizzes("alice").unwrap(), 0);
        assert_eq!(store.count_attempts("alice").unwrap(), 0);
    }

    #[test]
    fn test_insert_file_via_facade() {
        let store = create_test_store();
        let file_id = store
            .insert_file("alice", "alice/notes.pdf", "notes.pdf", "application/pdf", 512, "text")
            .unwrap();

        let file = store.get_file(file_id).unwrap().unwrap();
        assert_eq!(file.original_name, "notes.pdf");
        assert_eq!(store.count_files("alice").unwrap(), 1);
    }

    #[test]
    fn test_fixed_date_provider_drives_timestamps() {
        let provider = Arc::new(FixedDateProvider::from_ymd(2026, 4, 1));
        let store = Store::with_date_provider(":memory:", provider).unwrap();

        let file_id = store
            .insert_file("alice", "alice/a.txt", "a.txt", "text/plain", 1, "")
            .unwrap();
        let file = store.get_file(file_id).unwrap().unwrap();
        assert_eq!(file.uploaded_at.format("%Y-%m-%d").to_string(), "2026-04-01");
        assert_eq!(store.today(), chrono::NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
    }

    #[test]
    fn test_record_session_derives_minutes() {
        let store = create_test_store();
        let started = store.current_time();
        let ended = started + chrono::Duration::seconds(150);

        store
            .record_session("alice", Activity::Quiz, Some("Quiz"), started, ended)
            .unwrap();

        let sessions = SessionsRepository::new(&store.conn).for_user("alice").unwrap();
        assert_eq!(sessions[0].duration_minutes, Some(3));
    }

    #[test]
    fn test_record_session_minimum_one_minute() {
        let store = create_test_store();
        let started = store.current_time();

        store
            .record_session("alice", Activity::Upload, Some("a.pdf"), started, started)
            .unwrap();

        let sessions = SessionsRepository::new(&store.conn).for_user("alice").unwrap();
        assert_eq!(sessions[0].duration_minutes, Some(1));
    }

    #[test]
    fn test_file_deletion_cascades_quizzes_and_materials() {
        let store = create_test_store();
        let file_id = store
            .insert_file("alice", "alice/src.pdf", "src.pdf", "application/pdf", 64, "text")
            .unwrap();

        let questions = vec![Question::true_false("Placeholder", true)];
        let quiz_id = store
            .insert_quiz("alice", Some(file_id), "Derived Quiz", None, &Difficulty::Easy, &questions)
            .unwrap();
        let material_id = store
            .insert_material(
                "alice",
                Some(file_id),
                "Derived Summary",
                &MaterialContent::Summary { text: "points".to_string() },
            )
            .unwrap();

        store.delete_file(file_id).unwrap();

        assert!(store.get_quiz(quiz_id).unwrap().is_none());
        assert!(store.get_material(material_id).unwrap().is_none());
    }
}
