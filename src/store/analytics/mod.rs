pub mod dashboard;
pub mod fetcher;
pub mod progress;
pub mod trend;

use chrono::NaiveDate;
use log::warn;
use rusqlite::Connection;

pub use dashboard::{DailyProgress, DashboardAnalytics, DifficultyStats, SubjectStats};
pub use fetcher::UserRows;
pub use progress::{AttemptSummary, QuizProgress, quiz_progress};
pub use trend::{ComparativeStanding, QuestionTypeTrend, TrendLabel};

use crate::store::performance::PerformanceRepository;

/// Analytics facade providing high-level reporting operations
pub struct Analytics<'a> {
    pub conn: &'a Connection,
}

impl<'a> Analytics<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Analytics { conn }
    }

    /// Fetch rows and reduce them into the dashboard shape. Fetch errors have
    /// already been downgraded to empty collections by the row fetcher, so
    /// this never fails.
    pub fn dashboard(&self, user_id: &str, today: NaiveDate) -> DashboardAnalytics {
        let rows = UserRows::fetch(self.conn, user_id);
        DashboardAnalytics::compute(&rows, today)
    }

    /// Heuristic per-question-type trends; a failed history read degrades to
    /// no trends, matching the row fetcher's policy.
    pub fn question_type_trends(&self, user_id: &str) -> Vec<QuestionTypeTrend> {
        match PerformanceRepository::new(self.conn).history_by_type(user_id) {
            Ok(history) => trend::question_type_trends(&history),
            Err(e) => {
                warn!("question type history fetch failed, skipping trends: {}", e);
                Vec::new()
            }
        }
    }

    /// Next-score estimate from the attempt history, None with too little data
    pub fn predicted_next_score(&self, user_id: &str) -> Option<f64> {
        let rows = UserRows::fetch(self.conn, user_id);
        let percentages: Vec<f64> = rows.attempts.iter().map(|a| a.percentage() as f64).collect();
        if percentages.len() < trend::RECENT_WINDOW {
            return None;
        }

        let average = percentages.iter().sum::<f64>() / percentages.len() as f64;
        let recent = &percentages[percentages.len() - trend::RECENT_WINDOW..];
        let recent_average = recent.iter().sum::<f64>() / recent.len() as f64;

        Some(trend::predict_next_score(average, recent_average))
    }

    /// Standing against the fixed illustrative benchmarks, using the current
    /// average score and the last 7 days of study time
    pub fn comparative_standing(&self, user_id: &str, today: NaiveDate) -> ComparativeStanding {
        let dashboard = self.dashboard(user_id, today);
        let weekly_minutes: i64 = dashboard.weekly_progress.iter().map(|d| d.minutes).sum();
        trend::comparative_standing(dashboard.average_score, weekly_minutes as f64)
    }

    pub fn quiz_progress(&self, quiz_id: i64, user_id: &str) -> rusqlite::Result<Option<QuizProgress>> {
        progress::quiz_progress(self.conn, quiz_id, user_id)
    }
}
