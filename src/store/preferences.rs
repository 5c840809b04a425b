use crate::quiz::Difficulty;
use rusqlite::{Connection, OptionalExtension, Result, params};

#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub daily_goal_minutes: i64,
    pub preferred_difficulty: Difficulty,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            daily_goal_minutes: 30,
            preferred_difficulty: Difficulty::Medium,
        }
    }
}

pub struct PreferencesRepository<'a> {
    conn: &'a Connection,
}

impl<'a> PreferencesRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        PreferencesRepository { conn }
    }

    pub fn get_or_default(&self, user_id: &str) -> Result<Preferences> {
        let row = self
            .conn
            .query_row(
                "SELECT daily_goal_minutes, preferred_difficulty
                 FROM user_preferences WHERE user_id = ?1",
                [user_id],
                |row| {
                    let minutes: i64 = row.get(0)?;
                    let difficulty: String = row.get(1)?;
                    Ok((minutes, difficulty))
                },
            )
            .optional()?;

        Ok(match row {
            Some((daily_goal_minutes, difficulty)) => Preferences {
                daily_goal_minutes,
                preferred_difficulty: Difficulty::from(&difficulty)
                    .unwrap_or(Difficulty::Medium),
            },
            None => Preferences::default(),
        })
    }

    pub fn set(&self, user_id: &str, preferences: &Preferences) -> Result<()> {
        self.conn.execute(
            "INSERT INTO user_preferences (user_id, daily_goal_minutes, preferred_difficulty)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET
                 daily_goal_minutes = excluded.daily_goal_minutes,
                 preferred_difficulty = excluded.preferred_difficulty",
            params![
                user_id,
                preferences.daily_goal_minutes,
                preferences.preferred_difficulty.as_str()
            ],
        )?;
        Ok(())
    }
}
