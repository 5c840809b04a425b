use crate::quiz::Difficulty;
use crate::store::analytics::fetcher::UserRows;
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// One calendar-day bucket of the weekly progress series
#[derive(Debug, Clone, PartialEq)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub average_score: f64,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyStats {
    pub difficulty: Difficulty,
    pub quiz_count: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectStats {
    pub subject: String,
    pub quiz_count: usize,
    pub average_score: f64,
    pub minutes: i64,
}

/// The analytics shape consumed by the dashboard
#[derive(Debug, Clone)]
pub struct DashboardAnalytics {
    pub total_study_time_minutes: i64,
    pub average_score: f64,
    pub files_uploaded: usize,
    pub quizzes_created: usize,
    pub attempts_completed: usize,
    pub materials_generated: usize,
    pub current_streak: i32,
    pub weekly_progress: Vec<DailyProgress>,
    pub difficulty_breakdown: Vec<DifficultyStats>,
    pub subject_performance: Vec<SubjectStats>,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Subject label derived from a file name when the quiz carries no subject
pub fn subject_label(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    let label = stem.replace(['_', '-'], " ").trim().to_string();
    if label.is_empty() {
        "General".to_string()
    } else {
        label
    }
}

impl DashboardAnalytics {
    pub fn compute(rows: &UserRows, today: NaiveDate) -> Self {
        let total_study_time_minutes = rows
            .sessions
            .iter()
            .map(|s| s.effective_minutes())
            .sum();

        let percentages: Vec<f64> = rows
            .attempts
            .iter()
            .map(|a| a.percentage() as f64)
            .collect();
        let average_score = mean(&percentages);

        DashboardAnalytics {
            total_study_time_minutes,
            average_score,
            files_uploaded: rows.files.len(),
            quizzes_created: rows.quizzes.len(),
            attempts_completed: rows.attempts.len(),
            materials_generated: rows.materials.len(),
            current_streak: rows.streak.as_ref().map(|s| s.current_streak).unwrap_or(0),
            weekly_progress: Self::weekly_progress(rows, today),
            difficulty_breakdown: Self::difficulty_breakdown(rows),
            subject_performance: Self::subject_performance(rows),
        }
    }

    /// Exactly 7 calendar-day buckets, oldest to newest, ending today.
    /// Events are bucketed on their UTC calendar day.
    fn weekly_progress(rows: &UserRows, today: NaiveDate) -> Vec<DailyProgress> {
        let mut scores_by_day: HashMap<NaiveDate, Vec<f64>> = HashMap::new();
        for attempt in &rows.attempts {
            scores_by_day
                .entry(attempt.completed_at.date_naive())
                .or_default()
                .push(attempt.percentage() as f64);
        }

        let mut minutes_by_day: HashMap<NaiveDate, i64> = HashMap::new();
        for session in &rows.sessions {
            *minutes_by_day
                .entry(session.started_at.date_naive())
                .or_default() += session.effective_minutes();
        }

        (0..7)
            .map(|offset| {
                let date = today - Duration::days(6 - offset);
                DailyProgress {
                    date,
                    average_score: scores_by_day
                        .get(&date)
                        .map(|scores| mean(scores))
                        .unwrap_or(0.0),
                    minutes: minutes_by_day.get(&date).copied().unwrap_or(0),
                }
            })
            .collect()
    }

    fn difficulty_breakdown(rows: &UserRows) -> Vec<DifficultyStats> {
        let difficulty_by_quiz: HashMap<i64, Difficulty> = rows
            .quizzes
            .iter()
            .map(|q| (q.id, q.difficulty.clone()))
            .collect();

        Difficulty::all()
            .into_iter()
            .filter_map(|difficulty| {
                let quiz_count = rows
                    .quizzes
                    .iter()
                    .filter(|q| q.difficulty == difficulty)
                    .count();
                if quiz_count == 0 {
                    return None;
                }

                let scores: Vec<f64> = rows
                    .attempts
                    .iter()
                    .filter(|a| difficulty_by_quiz.get(&a.quiz_id) == Some(&difficulty))
                    .map(|a| a.percentage() as f64)
                    .collect();

                Some(DifficultyStats {
                    difficulty,
                    quiz_count,
                    average_score: mean(&scores),
                })
            })
            .collect()
    }

    fn subject_performance(rows: &UserRows) -> Vec<SubjectStats> {
        let file_names: HashMap<i64, &str> = rows
            .files
            .iter()
            .map(|f| (f.id, f.original_name.as_str()))
            .collect();

        // subject -> (quiz ids, quiz titles)
        let mut groups: BTreeMap<String, Vec<&crate::store::quizzes::QuizRecord>> =
            BTreeMap::new();
        for quiz in &rows.quizzes {
            let subject = quiz
                .subject
                .clone()
                .filter(|s| !s.trim().is_empty())
                .or_else(|| {
                    quiz.file_id
                        .and_then(|id| file_names.get(&id))
                        .map(|name| subject_label(name))
                })
                .unwrap_or_else(|| "General".to_string());
            groups.entry(subject).or_default().push(quiz);
        }

        groups
            .into_iter()
            .map(|(subject, quizzes)| {
                let quiz_ids: Vec<i64> = quizzes.iter().map(|q| q.id).collect();
                let titles: Vec<&str> = quizzes.iter().map(|q| q.title.as_str()).collect();

                let scores: Vec<f64> = rows
                    .attempts
                    .iter()
                    .filter(|a| quiz_ids.contains(&a.quiz_id))
                    .map(|a| a.percentage() as f64)
                    .collect();

                let minutes = rows
                    .sessions
                    .iter()
                    .filter(|s| {
                        s.resource_name
                            .as_deref()
                            .is_some_and(|name| titles.contains(&name))
                    })
                    .map(|s| s.effective_minutes())
                    .sum();

                SubjectStats {
                    subject,
                    quiz_count: quizzes.len(),
                    average_score: mean(&scores),
                    minutes,
                }
            })
            .collect()
    }
}
