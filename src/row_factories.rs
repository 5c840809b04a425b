use crate::material::MaterialKind;
use crate::quiz::Difficulty;
use crate::store::attempts::AttemptRecord;
use crate::store::files::FileRecord;
use crate::store::materials::MaterialRecord;
use crate::store::quizzes::QuizRecord;
use crate::store::sessions::{Activity, SessionRecord};
use rusqlite::Row;

/// Factory for creating FileRecord objects from store rows
pub struct FileRowFactory;

impl FileRowFactory {
    /// Expected columns: id, user_id, storage_path, original_name, mime_type,
    ///                   size_bytes, extracted_text, uploaded_at
    pub fn from_row(row: &Row) -> rusqlite::Result<FileRecord> {
        Ok(FileRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            storage_path: row.get(2)?,
            original_name: row.get(3)?,
            mime_type: row.get(4)?,
            size_bytes: row.get(5)?,
            extracted_text: row.get(6)?,
            uploaded_at: row.get(7)?,
        })
    }
}

/// Factory for creating QuizRecord objects from store rows
pub struct QuizRowFactory;

impl QuizRowFactory {
    /// Expected columns: id, user_id, file_id, title, subject, difficulty,
    ///                   question_count, questions, created_at
    pub fn from_row(row: &Row) -> rusqlite::Result<QuizRecord> {
        Ok(QuizRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            file_id: row.get(2)?,
            title: row.get(3)?,
            subject: row.get(4)?,
            difficulty: Difficulty::from(&row.get::<_, String>(5)?)
                .unwrap_or(Difficulty::Medium),
            question_count: row.get(6)?,
            questions_json: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}

/// Factory for creating AttemptRecord objects from store rows
pub struct AttemptRowFactory;

impl AttemptRowFactory {
    /// Expected columns: id, user_id, quiz_id, score, total_questions,
    ///                   time_taken_seconds, answers, completed_at
    pub fn from_row(row: &Row) -> rusqlite::Result<AttemptRecord> {
        Ok(AttemptRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            quiz_id: row.get(2)?,
            score: row.get(3)?,
            total_questions: row.get(4)?,
            time_taken_seconds: row.get(5)?,
            answers_json: row.get(6)?,
            completed_at: row.get(7)?,
        })
    }
}

/// Factory for creating MaterialRecord objects from store rows
pub struct MaterialRowFactory;

impl MaterialRowFactory {
    /// Expected columns: id, user_id, file_id, title, kind, content, created_at
    pub fn from_row(row: &Row) -> rusqlite::Result<MaterialRecord> {
        Ok(MaterialRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            file_id: row.get(2)?,
            title: row.get(3)?,
            kind: MaterialKind::from(&row.get::<_, String>(4)?)
                .unwrap_or(MaterialKind::Summary),
            content_json: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

/// Factory for creating SessionRecord objects from store rows
pub struct SessionRowFactory;

impl SessionRowFactory {
    /// Expected columns: id, user_id, activity_type, resource_name,
    ///                   duration_minutes, started_at, ended_at
    pub fn from_row(row: &Row) -> rusqlite::Result<SessionRecord> {
        Ok(SessionRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            activity_type: Activity::from(&row.get::<_, String>(2)?)
                .unwrap_or(Activity::Review),
            resource_name: row.get(3)?,
            duration_minutes: row.get(4)?,
            started_at: row.get(5)?,
            ended_at: row.get(6)?,
        })
    }
}
