use crate::store::attempts::{AttemptRecord, AttemptsRepository};
use crate::store::files::{FileRecord, FilesRepository};
use crate::store::materials::{MaterialRecord, MaterialsRepository};
use crate::store::quizzes::{QuizRecord, QuizzesRepository};
use crate::store::sessions::{SessionRecord, SessionsRepository};
use crate::store::streaks::{StreakRecord, StreaksRepository};
use log::warn;
use rusqlite::Connection;

/// Raw per-user rows feeding the aggregator.
///
/// A failed query is logged and replaced by an empty collection so the
/// downstream computations never see an error, only possibly fewer rows.
#[derive(Debug, Default)]
pub struct UserRows {
    pub files: Vec<FileRecord>,
    pub quizzes: Vec<QuizRecord>,
    pub attempts: Vec<AttemptRecord>,
    pub materials: Vec<MaterialRecord>,
    pub sessions: Vec<SessionRecord>,
    pub streak: Option<StreakRecord>,
}

fn or_empty<T>(label: &str, result: rusqlite::Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            warn!("analytics fetch for {} failed, treating as empty: {}", label, e);
            Vec::new()
        }
    }
}

impl UserRows {
    pub fn fetch(conn: &Connection, user_id: &str) -> UserRows {
        let streak = match StreaksRepository::new(conn).get(user_id) {
            Ok(streak) => streak,
            Err(e) => {
                warn!("analytics fetch for streak failed, treating as empty: {}", e);
                None
            }
        };

        UserRows {
            files: or_empty("files", FilesRepository::new(conn).for_user(user_id)),
            quizzes: or_empty("quizzes", QuizzesRepository::new(conn).for_user(user_id)),
            attempts: or_empty("attempts", AttemptsRepository::new(conn).for_user(user_id)),
            materials: or_empty("materials", MaterialsRepository::new(conn).for_user(user_id)),
            sessions: or_empty("sessions", SessionsRepository::new(conn).for_user(user_id)),
            streak,
        }
    }
}
