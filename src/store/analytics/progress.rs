use crate::store::attempts::{AttemptRecord, AttemptsRepository};
use crate::store::quizzes::QuizzesRepository;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result};

/// One attempt's contribution to the progress view
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptSummary {
    pub attempt_id: i64,
    pub correct: i32,
    pub total: i32,
    pub percentage: i32,
    pub time_taken_seconds: f64,
    pub completed_at: DateTime<Utc>,
}

/// Per-quiz attempt history with derived aggregates and a templated reading
#[derive(Debug, Clone)]
pub struct QuizProgress {
    pub quiz_id: i64,
    pub title: String,
    pub attempts: Vec<AttemptSummary>,
    pub average_score: f64,
    pub best_score: i32,
    pub best_percentage: i32,
    pub interpretation: String,
}

fn score_band(average: f64) -> &'static str {
    if average >= 90.0 {
        "Excellent performance! You've mastered this material."
    } else if average >= 80.0 {
        "Great work! A little more practice will lock it in."
    } else if average >= 70.0 {
        "Good progress. Review the questions you missed and retake the quiz."
    } else if average >= 50.0 {
        "Keep practicing. Focus on the topics you keep missing."
    } else {
        "This material needs more review. Revisit the source document before retaking."
    }
}

fn interpretation(attempts: &[AttemptSummary], average: f64) -> String {
    match attempts.len() {
        0 => "No attempts yet. Take this quiz to start tracking your progress.".to_string(),
        1 => format!(
            "You scored {}% on your first attempt. {}",
            attempts[0].percentage,
            score_band(average)
        ),
        n => format!(
            "Average score {:.0}% across {} attempts. {}",
            average,
            n,
            score_band(average)
        ),
    }
}

/// Builds the progress view for one quiz. Returns None for an unknown quiz;
/// store errors propagate to the caller (the page-level fetch).
pub fn quiz_progress(conn: &Connection, quiz_id: i64, user_id: &str) -> Result<Option<QuizProgress>> {
    let Some(quiz) = QuizzesRepository::new(conn).get(quiz_id)? else {
        return Ok(None);
    };

    let records = AttemptsRepository::new(conn).for_quiz(quiz_id, user_id)?;
    let attempts: Vec<AttemptSummary> = records.iter().map(summarize).collect();

    let average_score = if attempts.is_empty() {
        0.0
    } else {
        attempts.iter().map(|a| a.percentage as f64).sum::<f64>() / attempts.len() as f64
    };
    let best_score = attempts.iter().map(|a| a.correct).max().unwrap_or(0);
    let best_percentage = attempts.iter().map(|a| a.percentage).max().unwrap_or(0);
    let interpretation = interpretation(&attempts, average_score);

    Ok(Some(QuizProgress {
        quiz_id,
        title: quiz.title,
        attempts,
        average_score,
        best_score,
        best_percentage,
        interpretation,
    }))
}

fn summarize(record: &AttemptRecord) -> AttemptSummary {
    AttemptSummary {
        attempt_id: record.id,
        correct: record.correct_count(),
        total: record.total_questions,
        percentage: record.percentage(),
        time_taken_seconds: record.time_taken_seconds,
        completed_at: record.completed_at,
    }
}
