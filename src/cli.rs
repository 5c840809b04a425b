use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// AI-assisted study toolkit: document-derived quizzes and learning analytics
#[derive(Parser, Debug, Clone)]
#[command(name = "studykit")]
#[command(about = "Study analytics over your quizzes, sessions and materials", long_about = None)]
#[command(version)]
pub struct Args {
    /// User whose analytics to show
    #[arg(long, default_value = "local", help = "User whose analytics to show")]
    pub user: String,

    /// Use in-memory store for testing
    #[arg(long, help = "Use in-memory store for testing")]
    pub test: bool,

    /// Custom store file path
    #[arg(long, value_name = "PATH", help = "Use custom store file path")]
    pub db_path: Option<PathBuf>,

    /// Override current date for testing (YYYY-MM-DD format)
    #[arg(
        long,
        value_name = "DATE",
        help = "Override current date (YYYY-MM-DD format)"
    )]
    pub override_date: Option<String>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the override_date argument if provided
    pub fn validate_override_date(&self) -> Result<Option<NaiveDate>, String> {
        match &self.override_date {
            Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    format!(
                        "Invalid date format for --override-date: '{}'. Expected YYYY-MM-DD",
                        date_str
                    )
                }),
            None => Ok(None),
        }
    }
}
