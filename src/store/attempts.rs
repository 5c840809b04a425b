use crate::row_factories::AttemptRowFactory;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One graded answer inside an attempt's answer map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub given: String,
    pub correct: bool,
}

/// Answer map keyed by question index, stored as a JSON object
pub type AnswerMap = BTreeMap<String, AnswerEntry>;

/// One completed quiz run; immutable once inserted
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub id: i64,
    pub user_id: String,
    pub quiz_id: i64,
    pub score: i32,
    pub total_questions: i32,
    pub time_taken_seconds: f64,
    pub answers_json: String,
    pub completed_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// Score as a rounded percentage of the attempt's question count
    pub fn percentage(&self) -> i32 {
        if self.total_questions <= 0 {
            return 0;
        }
        (self.score as f64 / self.total_questions as f64 * 100.0).round() as i32
    }

    pub fn answers(&self) -> serde_json::Result<AnswerMap> {
        serde_json::from_str(&self.answers_json)
    }

    /// Correct-answer count, from the per-answer correctness map when it
    /// parses, otherwise back-computed from the stored score
    pub fn correct_count(&self) -> i32 {
        match self.answers() {
            Ok(answers) if !answers.is_empty() => {
                answers.values().filter(|a| a.correct).count() as i32
            }
            _ => self.score,
        }
    }
}

pub struct AttemptsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> AttemptsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        AttemptsRepository { conn }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &self,
        user_id: &str,
        quiz_id: i64,
        score: i32,
        total_questions: i32,
        time_taken_seconds: f64,
        answers: &AnswerMap,
        completed_at: DateTime<Utc>,
    ) -> Result<i64> {
        let answers_json = serde_json::to_string(answers)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        self.conn.execute(
            "INSERT INTO quiz_attempts (user_id, quiz_id, score, total_questions, time_taken_seconds, answers, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user_id,
                quiz_id,
                score,
                total_questions,
                time_taken_seconds,
                answers_json,
                completed_at.to_rfc3339()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, attempt_id: i64) -> Result<Option<AttemptRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, quiz_id, score, total_questions,
                    time_taken_seconds, answers, completed_at
             FROM quiz_attempts WHERE id = ?1",
        )?;

        let mut rows = stmt.query([attempt_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(AttemptRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn for_user(&self, user_id: &str) -> Result<Vec<AttemptRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, quiz_id, score, total_questions,
                    time_taken_seconds, answers, completed_at
             FROM quiz_attempts
             WHERE user_id = ?1
             ORDER BY completed_at ASC, id ASC",
        )?;

        let rows = stmt.query_map([user_id], AttemptRowFactory::from_row)?;

        let mut attempts = Vec::new();
        for attempt in rows {
            attempts.push(attempt?);
        }
        Ok(attempts)
    }

    pub fn for_quiz(&self, quiz_id: i64, user_id: &str) -> Result<Vec<AttemptRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, quiz_id, score, total_questions,
                    time_taken_seconds, answers, completed_at
             FROM quiz_attempts
             WHERE quiz_id = ?1 AND user_id = ?2
             ORDER BY completed_at ASC, id ASC",
        )?;

        let rows = stmt.query_map(params![quiz_id, user_id], AttemptRowFactory::from_row)?;

        let mut attempts = Vec::new();
        for attempt in rows {
            attempts.push(attempt?);
        }
        Ok(attempts)
    }

    pub fn count(&self, user_id: &str) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM quiz_attempts WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
