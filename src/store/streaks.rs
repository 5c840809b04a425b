use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Running day-streak per user, bumped once per calendar day of activity
#[derive(Debug, Clone, PartialEq)]
pub struct StreakRecord {
    pub user_id: String,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: NaiveDate,
}

pub struct StreaksRepository<'a> {
    conn: &'a Connection,
}

impl<'a> StreaksRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        StreaksRepository { conn }
    }

    pub fn get(&self, user_id: &str) -> Result<Option<StreakRecord>> {
        self.conn
            .query_row(
                "SELECT user_id, current_streak, longest_streak, last_activity_date
                 FROM learning_streaks WHERE user_id = ?1",
                [user_id],
                |row| {
                    Ok(StreakRecord {
                        user_id: row.get(0)?,
                        current_streak: row.get(1)?,
                        longest_streak: row.get(2)?,
                        last_activity_date: row.get(3)?,
                    })
                },
            )
            .optional()
    }

    /// Applies one day of activity: same day is idempotent, the day after
    /// extends the streak, anything later resets it to 1
    pub fn touch(&self, user_id: &str, today: NaiveDate) -> Result<StreakRecord> {
        let current = self.get(user_id)?;

        if let Some(record) = &current {
            if record.last_activity_date == today {
                return Ok(record.clone());
            }
        }

        let streak = match &current {
            Some(record) if record.last_activity_date.succ_opt() == Some(today) => {
                record.current_streak + 1
            }
            _ => 1,
        };

        let longest = current
            .as_ref()
            .map(|r| r.longest_streak.max(streak))
            .unwrap_or(streak);

        self.conn.execute(
            "INSERT INTO learning_streaks (user_id, current_streak, longest_streak, last_activity_date)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id) DO UPDATE SET
                 current_streak = excluded.current_streak,
                 longest_streak = excluded.longest_streak,
                 last_activity_date = excluded.last_activity_date",
            params![user_id, streak, longest, today],
        )?;

        Ok(StreakRecord {
            user_id: user_id.to_string(),
            current_streak: streak,
            longest_streak: longest,
            last_activity_date: today,
        })
    }
}
