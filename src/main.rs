use colored::Colorize;
use studykit::cli::Args;
use studykit::format::format_minutes;
use studykit::store::Store;
use studykit::store::analytics::TrendLabel;
use studykit::store_factory::StoreFactory;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse_args();
    let override_date = args.validate_override_date()?;

    let store = StoreFactory::create(StoreFactory::config_from_args(&args, override_date))?;
    print_dashboard(&store, &args.user)?;

    Ok(())
}

fn print_dashboard(store: &Store, user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = store.dashboard(user);
    let preferences = store.preferences(user)?;

    println!("{}", format!("Study dashboard for {}", user).bold());
    println!("{}", "=".repeat(40));
    println!();

    println!(
        "Files: {}   Quizzes: {}   Attempts: {}   Materials: {}",
        dashboard.files_uploaded,
        dashboard.quizzes_created,
        dashboard.attempts_completed,
        dashboard.materials_generated
    );
    println!(
        "Total study time: {}   Average score: {:.1}%   Streak: {} day(s)",
        format_minutes(dashboard.total_study_time_minutes),
        dashboard.average_score,
        dashboard.current_streak
    );
    println!();

    println!("{}", "Last 7 days".bold());
    for day in &dashboard.weekly_progress {
        let bar = "#".repeat((day.minutes / 10).min(40) as usize);
        println!(
            "  {}  {:>5.1}%  {:>8}  {}",
            day.date,
            day.average_score,
            format_minutes(day.minutes),
            bar.dimmed()
        );
    }
    println!();

    if !dashboard.difficulty_breakdown.is_empty() {
        println!("{}", "By difficulty".bold());
        for stats in &dashboard.difficulty_breakdown {
            println!(
                "  {:<8} {} quiz(zes), average {:.1}%",
                stats.difficulty.as_str(),
                stats.quiz_count,
                stats.average_score
            );
        }
        println!();
    }

    if !dashboard.subject_performance.is_empty() {
        println!("{}", "By subject".bold());
        for stats in &dashboard.subject_performance {
            println!(
                "  {:<24} {} quiz(zes), average {:.1}%, {}",
                stats.subject,
                stats.quiz_count,
                stats.average_score,
                format_minutes(stats.minutes)
            );
        }
        println!();
    }

    let trends = store.question_type_trends(user);
    if !trends.is_empty() {
        println!("{}", "Question type trends".bold());
        for trend in &trends {
            let label = match trend.label {
                TrendLabel::Improving => trend.label.as_str().green(),
                TrendLabel::Declining => trend.label.as_str().red(),
                TrendLabel::Stable => trend.label.as_str().dimmed(),
            };
            println!(
                "  {:<18} {}  ({:+.1} pts over {} answers, recent {:.1}%)",
                trend.question_type, label, trend.change, trend.data_points, trend.recent_average
            );
        }
        println!();
    }

    if let Some(predicted) = store.predicted_next_score(user) {
        println!("Estimated next quiz score: {:.0}%", predicted);
    }

    let standing = store.comparative_standing(user);
    println!(
        "Against assumed benchmarks: score ~P{:.0}, study time ~P{:.0}",
        standing.score_percentile, standing.study_time_percentile
    );

    let weekly_minutes: i64 = dashboard.weekly_progress.iter().map(|d| d.minutes).sum();
    let goal_minutes = preferences.daily_goal_minutes * 7;
    println!(
        "Weekly goal: {} of {}",
        format_minutes(weekly_minutes),
        format_minutes(goal_minutes)
    );

    Ok(())
}
