use crate::grading;
use crate::store::sessions::Activity;
use crate::store::{AttemptRecord, PerformanceRepository, QuizRecord, Store};
use chrono::Duration;
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Bounded retry for reading an attempt straight after submission, absorbing
/// read-after-write races the way the original submission page did
const LOAD_RETRY_ATTEMPTS: u32 = 3;
const LOAD_RETRY_DELAY_MS: u64 = 50;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please sign in to save your quiz results")]
    SignInRequired,
    #[error("This quiz has no questions to answer")]
    EmptyQuiz,
    #[error("Stored quiz questions are not readable: {0}")]
    CorruptQuestions(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}

/// What the submission flow hands back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptOutcome {
    pub attempt_id: i64,
    pub score: i32,
    pub total: i32,
    pub percentage: i32,
}

/// Service layer for taking quizzes, decoupled from any front end
pub struct QuizService {
    store: Arc<Store>,
}

impl QuizService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Grades and persists one completed quiz run.
    ///
    /// Writes the immutable attempt row, the per-type performance rows with
    /// their cumulative increments, the day streak, and a quiz study session.
    /// Store errors in the performance updates propagate to the caller.
    pub fn submit(
        &self,
        user_id: &str,
        quiz: &QuizRecord,
        given: &BTreeMap<usize, String>,
        time_taken_seconds: f64,
    ) -> Result<AttemptOutcome, SubmitError> {
        if user_id.trim().is_empty() {
            return Err(SubmitError::SignInRequired);
        }

        let questions = quiz.questions()?;
        if questions.is_empty() {
            return Err(SubmitError::EmptyQuiz);
        }

        let graded = grading::grade_attempt(&questions, given);
        let attempt_id = self.store.insert_attempt(
            user_id,
            quiz.id,
            graded.score,
            graded.total,
            time_taken_seconds,
            &graded.answers,
        )?;

        let now = self.store.current_time();
        let performance = PerformanceRepository::new(&self.store.conn);
        for breakdown in &graded.per_type {
            if breakdown.total == 0 {
                continue;
            }
            performance.record(
                user_id,
                attempt_id,
                &breakdown.question_type,
                breakdown.correct,
                breakdown.total,
                now,
            )?;
        }

        self.store.touch_streak(user_id)?;

        let started_at = now - Duration::milliseconds((time_taken_seconds * 1000.0) as i64);
        self.store
            .record_session(user_id, Activity::Quiz, Some(&quiz.title), started_at, now)?;

        let percentage = if graded.total > 0 {
            (graded.score as f64 / graded.total as f64 * 100.0).round() as i32
        } else {
            0
        };

        info!(
            "Attempt saved: quiz {} | {}/{} ({}%) in {:.0}s",
            quiz.id, graded.score, graded.total, percentage, time_taken_seconds
        );

        Ok(AttemptOutcome {
            attempt_id,
            score: graded.score,
            total: graded.total,
            percentage,
        })
    }

    /// Re-reads a just-saved attempt with a few fixed-delay retries
    pub fn load_completed_attempt(
        &self,
        attempt_id: i64,
    ) -> Result<Option<AttemptRecord>, rusqlite::Error> {
        for attempt in 0..LOAD_RETRY_ATTEMPTS {
            if let Some(record) = self.store.get_attempt(attempt_id)? {
                return Ok(Some(record));
            }
            if attempt + 1 < LOAD_RETRY_ATTEMPTS {
                std::thread::sleep(std::time::Duration::from_millis(LOAD_RETRY_DELAY_MS));
            }
        }
        Ok(None)
    }
}
