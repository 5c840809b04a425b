use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, params};
use std::collections::HashMap;

/// Running correct/total aggregate per (user, question type)
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativePerformance {
    pub user_id: String,
    pub question_type: String,
    pub total_correct: i64,
    pub total_questions: i64,
    pub percentage: f64,
}

pub struct PerformanceRepository<'a> {
    conn: &'a Connection,
}

impl<'a> PerformanceRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        PerformanceRepository { conn }
    }

    /// Records one attempt's per-type breakdown: a history row for the trend
    /// estimator plus the cumulative increment.
    ///
    /// The increment is a single upsert statement so that the addition happens
    /// inside the store; two writers cannot lose an update. Callers must pass
    /// total > 0.
    pub fn record(
        &self,
        user_id: &str,
        attempt_id: i64,
        question_type: &str,
        correct: i64,
        total: i64,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let percentage = correct as f64 / total as f64 * 100.0;

        self.conn.execute(
            "INSERT INTO quiz_question_type_performance (user_id, attempt_id, question_type, correct, total, percentage, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user_id,
                attempt_id,
                question_type,
                correct,
                total,
                percentage,
                now.to_rfc3339()
            ],
        )?;

        self.conn.execute(
            "INSERT INTO cumulative_question_type_performance
                 (user_id, question_type, total_correct, total_questions, percentage, updated_at)
             VALUES (?1, ?2, ?3, ?4, CAST(?3 AS REAL) / ?4 * 100.0, ?5)
             ON CONFLICT(user_id, question_type) DO UPDATE SET
                 total_correct = total_correct + excluded.total_correct,
                 total_questions = total_questions + excluded.total_questions,
                 percentage = CAST(total_correct + excluded.total_correct AS REAL)
                     / (total_questions + excluded.total_questions) * 100.0,
                 updated_at = excluded.updated_at",
            params![user_id, question_type, correct, total, now.to_rfc3339()],
        )?;

        Ok(())
    }

    pub fn cumulative(&self, user_id: &str) -> Result<Vec<CumulativePerformance>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, question_type, total_correct, total_questions, percentage
             FROM cumulative_question_type_performance
             WHERE user_id = ?1
             ORDER BY question_type",
        )?;

        let rows = stmt.query_map([user_id], |row| {
            Ok(CumulativePerformance {
                user_id: row.get(0)?,
                question_type: row.get(1)?,
                total_correct: row.get(2)?,
                total_questions: row.get(3)?,
                percentage: row.get(4)?,
            })
        })?;

        let mut result = Vec::new();
        for record in rows {
            result.push(record?);
        }
        Ok(result)
    }

    pub fn get(&self, user_id: &str, question_type: &str) -> Result<Option<CumulativePerformance>> {
        self.conn
            .query_row(
                "SELECT user_id, question_type, total_correct, total_questions, percentage
                 FROM cumulative_question_type_performance
                 WHERE user_id = ?1 AND question_type = ?2",
                params![user_id, question_type],
                |row| {
                    Ok(CumulativePerformance {
                        user_id: row.get(0)?,
                        question_type: row.get(1)?,
                        total_correct: row.get(2)?,
                        total_questions: row.get(3)?,
                        percentage: row.get(4)?,
                    })
                },
            )
            .optional()
    }

    /// Chronological per-attempt percentages grouped by question type,
    /// the input shape of the trend estimator
    pub fn history_by_type(&self, user_id: &str) -> Result<HashMap<String, Vec<f64>>> {
        let mut stmt = self.conn.prepare(
            "SELECT question_type, percentage
             FROM quiz_question_type_performance
             WHERE user_id = ?1
             ORDER BY created_at ASC, id ASC",
        )?;

        let rows = stmt.query_map([user_id], |row| {
            let question_type: String = row.get(0)?;
            let percentage: f64 = row.get(1)?;
            Ok((question_type, percentage))
        })?;

        let mut history: HashMap<String, Vec<f64>> = HashMap::new();
        for row in rows {
            let (question_type, percentage) = row?;
            history.entry(question_type).or_default().push(percentage);
        }
        Ok(history)
    }
}
