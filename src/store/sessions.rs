use crate::row_factories::SessionRowFactory;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// Display placeholder for sessions recorded without a measured duration
pub const DEFAULT_SESSION_MINUTES: i64 = 45;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    Quiz,
    Upload,
    Review,
}

impl Activity {
    pub fn as_str(&self) -> &str {
        match self {
            Activity::Quiz => "quiz",
            Activity::Upload => "upload",
            Activity::Review => "review",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "quiz" => Some(Activity::Quiz),
            "upload" => Some(Activity::Upload),
            "review" => Some(Activity::Review),
            _ => None,
        }
    }
}

/// A tracked interval of user activity
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: i64,
    pub user_id: String,
    pub activity_type: Activity,
    pub resource_name: Option<String>,
    pub duration_minutes: Option<i64>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Minutes used by the aggregator; missing durations fall back to the
    /// display placeholder rather than being dropped
    pub fn effective_minutes(&self) -> i64 {
        self.duration_minutes.unwrap_or(DEFAULT_SESSION_MINUTES)
    }
}

pub struct SessionsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SessionsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SessionsRepository { conn }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &self,
        user_id: &str,
        activity_type: Activity,
        resource_name: Option<&str>,
        duration_minutes: Option<i64>,
        started_at: DateTime<Utc>,
        ended_at: Option<DateTime<Utc>>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO study_sessions (user_id, activity_type, resource_name, duration_minutes, started_at, ended_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id,
                activity_type.as_str(),
                resource_name,
                duration_minutes,
                started_at.to_rfc3339(),
                ended_at.map(|t| t.to_rfc3339())
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn for_user(&self, user_id: &str) -> Result<Vec<SessionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, activity_type, resource_name,
                    duration_minutes, started_at, ended_at
             FROM study_sessions
             WHERE user_id = ?1
             ORDER BY started_at ASC, id ASC",
        )?;

        let rows = stmt.query_map([user_id], SessionRowFactory::from_row)?;

        let mut sessions = Vec::new();
        for session in rows {
            sessions.push(session?);
        }
        Ok(sessions)
    }

    pub fn count(&self, user_id: &str) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM study_sessions WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
