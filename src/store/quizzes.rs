use crate::quiz::{Difficulty, Question};
use crate::row_factories::QuizRowFactory;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// A quiz row; the question list is embedded as a JSON column
#[derive(Debug, Clone)]
pub struct QuizRecord {
    pub id: i64,
    pub user_id: String,
    pub file_id: Option<i64>,
    pub title: String,
    pub subject: Option<String>,
    pub difficulty: Difficulty,
    pub question_count: i32,
    pub questions_json: String,
    pub created_at: DateTime<Utc>,
}

impl QuizRecord {
    pub fn questions(&self) -> serde_json::Result<Vec<Question>> {
        serde_json::from_str(&self.questions_json)
    }
}

pub struct QuizzesRepository<'a> {
    conn: &'a Connection,
}

impl<'a> QuizzesRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        QuizzesRepository { conn }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &self,
        user_id: &str,
        file_id: Option<i64>,
        title: &str,
        subject: Option<&str>,
        difficulty: &Difficulty,
        questions: &[Question],
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        let questions_json = serde_json::to_string(questions)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        self.conn.execute(
            "INSERT INTO quizzes (user_id, file_id, title, subject, difficulty, question_count, questions, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user_id,
                file_id,
                title,
                subject,
                difficulty.as_str(),
                questions.len() as i32,
                questions_json,
                created_at.to_rfc3339()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, quiz_id: i64) -> Result<Option<QuizRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, file_id, title, subject, difficulty,
                    question_count, questions, created_at
             FROM quizzes WHERE id = ?1",
        )?;

        let mut rows = stmt.query([quiz_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(QuizRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn for_user(&self, user_id: &str) -> Result<Vec<QuizRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, file_id, title, subject, difficulty,
                    question_count, questions, created_at
             FROM quizzes
             WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([user_id], QuizRowFactory::from_row)?;

        let mut quizzes = Vec::new();
        for quiz in rows {
            quizzes.push(quiz?);
        }
        Ok(quizzes)
    }

    /// Replaces the question list after a user edit, keeping the count in sync
    pub fn update_questions(&self, quiz_id: i64, questions: &[Question]) -> Result<()> {
        let questions_json = serde_json::to_string(questions)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        self.conn.execute(
            "UPDATE quizzes SET questions = ?1, question_count = ?2 WHERE id = ?3",
            params![questions_json, questions.len() as i32, quiz_id],
        )?;
        Ok(())
    }

    pub fn delete(&self, quiz_id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM quizzes WHERE id = ?1", [quiz_id])?;
        Ok(())
    }

    pub fn count(&self, user_id: &str) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM quizzes WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
