use colored::Colorize;
use std::env;
use studykit::store::Store;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: {} <database_file> <user>", args[0]);
        eprintln!();
        eprintln!("Prints per-quiz attempt history with averages and best scores.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  <database_file>  Path to the SQLite store file");
        eprintln!("  <user>           User whose quizzes to report on");
        eprintln!();
        eprintln!("Example: {} ~/studykit.db alice", args[0]);
        std::process::exit(1);
    }

    let db_path = &args[1];
    let user = &args[2];

    let store = match Store::new(db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening store: {}", e);
            std::process::exit(1);
        }
    };

    let quizzes = match store.quizzes_for_user(user) {
        Ok(quizzes) => quizzes,
        Err(e) => {
            eprintln!("Error fetching quizzes: {}", e);
            std::process::exit(1);
        }
    };

    if quizzes.is_empty() {
        println!("No quizzes found for {}.", user);
        return;
    }

    println!("Quiz Progress Report");
    println!("====================");
    println!();

    for quiz in quizzes {
        let progress = match store.quiz_progress(quiz.id, user) {
            Ok(Some(progress)) => progress,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("Error computing progress for quiz {}: {}", quiz.id, e);
                std::process::exit(1);
            }
        };

        println!("{}", progress.title.bold());
        println!("{}", "-".repeat(60));

        for attempt in &progress.attempts {
            println!(
                "  {}  {:>3}/{:<3} ({:>3}%)  {:.0}s",
                attempt.completed_at.format("%Y-%m-%d %H:%M"),
                attempt.correct,
                attempt.total,
                attempt.percentage,
                attempt.time_taken_seconds
            );
        }

        if !progress.attempts.is_empty() {
            println!(
                "  Average: {:.1}%   Best: {} correct ({}%)",
                progress.average_score, progress.best_score, progress.best_percentage
            );
        }
        println!("  {}", progress.interpretation.italic());
        println!();
    }
}
