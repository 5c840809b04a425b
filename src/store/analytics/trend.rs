use std::collections::HashMap;

/// Score-change threshold separating a real move from noise, in percentage
/// points. Changes within the band are reported as stable.
pub const TREND_THRESHOLD: f64 = 5.0;

/// Number of most-recent data points in the comparison window
pub const RECENT_WINDOW: usize = 3;

/// Weight pulling the next-score estimate toward the recent window
pub const RECENT_WEIGHT: f64 = 0.7;

/// Assumed benchmark values for the comparative standing. These are fixed,
/// illustrative anchors, not measurements of a real cohort.
pub const BENCHMARK_AVERAGE_SCORE: f64 = 75.0;
pub const BENCHMARK_WEEKLY_MINUTES: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendLabel {
    Improving,
    Declining,
    Stable,
}

impl TrendLabel {
    pub fn as_str(&self) -> &str {
        match self {
            TrendLabel::Improving => "improving",
            TrendLabel::Declining => "declining",
            TrendLabel::Stable => "stable",
        }
    }
}

/// Fixed-threshold classification of a score change
pub fn classify(change: f64) -> TrendLabel {
    if change > TREND_THRESHOLD {
        TrendLabel::Improving
    } else if change < -TREND_THRESHOLD {
        TrendLabel::Declining
    } else {
        TrendLabel::Stable
    }
}

/// Heuristic trend for one question type
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionTypeTrend {
    pub question_type: String,
    pub data_points: usize,
    pub recent_average: f64,
    pub change: f64,
    pub label: TrendLabel,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Classifies each question type's history (chronological percentages).
///
/// Types with fewer than RECENT_WINDOW points are skipped. The change is the
/// mean of the most recent window minus the mean of the up-to-RECENT_WINDOW
/// points before it; with no earlier points the type is reported stable.
/// Results are sorted by question type for deterministic output.
pub fn question_type_trends(history: &HashMap<String, Vec<f64>>) -> Vec<QuestionTypeTrend> {
    let mut trends: Vec<QuestionTypeTrend> = history
        .iter()
        .filter(|(_, scores)| scores.len() >= RECENT_WINDOW)
        .map(|(question_type, scores)| {
            let split = scores.len() - RECENT_WINDOW;
            let recent = &scores[split..];
            let earlier = &scores[split.saturating_sub(RECENT_WINDOW)..split];

            let recent_average = mean(recent);
            let change = if earlier.is_empty() {
                0.0
            } else {
                recent_average - mean(earlier)
            };

            QuestionTypeTrend {
                question_type: question_type.clone(),
                data_points: scores.len(),
                recent_average,
                change,
                label: classify(change),
            }
        })
        .collect();

    trends.sort_by(|a, b| a.question_type.cmp(&b.question_type));
    trends
}

/// Next-score estimate: the overall average nudged toward the recent mean.
/// A smoothing heuristic, not a fitted model.
pub fn predict_next_score(average: f64, recent_average: f64) -> f64 {
    (average + RECENT_WEIGHT * (recent_average - average)).clamp(0.0, 100.0)
}

/// Standing against the fixed benchmarks, as clamped pseudo-percentiles
#[derive(Debug, Clone, PartialEq)]
pub struct ComparativeStanding {
    pub score_percentile: f64,
    pub study_time_percentile: f64,
}

pub fn comparative_standing(average_score: f64, weekly_minutes: f64) -> ComparativeStanding {
    let score_percentile = (50.0 + (average_score - BENCHMARK_AVERAGE_SCORE)).clamp(1.0, 99.0);
    let study_time_percentile = (50.0
        + (weekly_minutes - BENCHMARK_WEEKLY_MINUTES) / BENCHMARK_WEEKLY_MINUTES * 50.0)
        .clamp(1.0, 99.0);

    ComparativeStanding {
        score_percentile,
        study_time_percentile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(entries: &[(&str, &[f64])]) -> HashMap<String, Vec<f64>> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect()
    }

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(5.1), TrendLabel::Improving);
        assert_eq!(classify(5.0), TrendLabel::Stable);
        assert_eq!(classify(0.0), TrendLabel::Stable);
        assert_eq!(classify(-5.0), TrendLabel::Stable);
        assert_eq!(classify(-5.1), TrendLabel::Declining);
    }

    #[test]
    fn test_improving_trend() {
        let history = history_of(&[(
            "multiple_choice",
            &[70.0, 72.0, 71.0, 90.0, 92.0, 91.0][..],
        )]);

        let trends = question_type_trends(&history);
        assert_eq!(trends.len(), 1);
        let trend = &trends[0];
        assert!((trend.change - 20.333333).abs() < 0.001);
        assert_eq!(trend.label, TrendLabel::Improving);
        assert!((trend.recent_average - 91.0).abs() < 0.001);
    }

    #[test]
    fn test_stable_trend_within_band() {
        let history = history_of(&[(
            "identification",
            &[78.0, 80.0, 82.0, 80.0, 81.0, 79.0][..],
        )]);

        let trends = question_type_trends(&history);
        assert_eq!(trends[0].label, TrendLabel::Stable);
        assert!(trends[0].change.abs() <= TREND_THRESHOLD);
    }

    #[test]
    fn test_declining_trend() {
        let history = history_of(&[("true_false", &[90.0, 88.0, 92.0, 60.0, 65.0, 62.0][..])]);

        let trends = question_type_trends(&history);
        assert_eq!(trends[0].label, TrendLabel::Declining);
    }

    #[test]
    fn test_too_few_points_skips_type() {
        let history = history_of(&[
            ("multiple_choice", &[80.0, 85.0][..]),
            ("true_false", &[70.0, 75.0, 80.0][..]),
        ]);

        let trends = question_type_trends(&history);
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].question_type, "true_false");
    }

    #[test]
    fn test_exactly_three_points_reports_stable() {
        let history = history_of(&[("multiple_choice", &[40.0, 90.0, 95.0][..])]);

        let trends = question_type_trends(&history);
        assert_eq!(trends[0].change, 0.0);
        assert_eq!(trends[0].label, TrendLabel::Stable);
    }

    #[test]
    fn test_short_earlier_window() {
        // 4 points: earlier window is just the single oldest point
        let history = history_of(&[("multiple_choice", &[50.0, 80.0, 82.0, 84.0][..])]);

        let trends = question_type_trends(&history);
        assert!((trends[0].change - 32.0).abs() < 0.001);
        assert_eq!(trends[0].label, TrendLabel::Improving);
    }

    #[test]
    fn test_predict_next_score_nudges_toward_recent() {
        let predicted = predict_next_score(70.0, 90.0);
        assert!((predicted - 84.0).abs() < 0.001);

        let predicted = predict_next_score(90.0, 70.0);
        assert!((predicted - 76.0).abs() < 0.001);
    }

    #[test]
    fn test_predict_next_score_clamps() {
        assert_eq!(predict_next_score(0.0, 0.0), 0.0);
        assert_eq!(predict_next_score(100.0, 100.0), 100.0);
    }

    #[test]
    fn test_comparative_standing_at_benchmark_is_median() {
        let standing = comparative_standing(BENCHMARK_AVERAGE_SCORE, BENCHMARK_WEEKLY_MINUTES);
        assert!((standing.score_percentile - 50.0).abs() < 0.001);
        assert!((standing.study_time_percentile - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_comparative_standing_clamps() {
        let standing = comparative_standing(0.0, 0.0);
        assert_eq!(standing.score_percentile, 1.0);
        assert_eq!(standing.study_time_percentile, 1.0);

        let standing = comparative_standing(100.0, 10_000.0);
        assert_eq!(standing.score_percentile, 75.0);
        assert_eq!(standing.study_time_percentile, 99.0);
    }
}
