use crate::row_factories::FileRowFactory;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// One uploaded document and its extracted text
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub id: i64,
    pub user_id: String,
    pub storage_path: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub extracted_text: String,
    pub uploaded_at: DateTime<Utc>,
}

pub struct FilesRepository<'a> {
    conn: &'a Connection,
}

impl<'a> FilesRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        FilesRepository { conn }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &self,
        user_id: &str,
        storage_path: &str,
        original_name: &str,
        mime_type: &str,
        size_bytes: i64,
        extracted_text: &str,
        uploaded_at: DateTime<Utc>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO files (user_id, storage_path, original_name, mime_type, size_bytes, extracted_text, uploaded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user_id,
                storage_path,
                original_name,
                mime_type,
                size_bytes,
                extracted_text,
                uploaded_at.to_rfc3339()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, file_id: i64) -> Result<Option<FileRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, storage_path, original_name, mime_type,
                    size_bytes, extracted_text, uploaded_at
             FROM files WHERE id = ?1",
        )?;

        let mut rows = stmt.query([file_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(FileRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn for_user(&self, user_id: &str) -> Result<Vec<FileRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, storage_path, original_name, mime_type,
                    size_bytes, extracted_text, uploaded_at
             FROM files
             WHERE user_id = ?1
             ORDER BY uploaded_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([user_id], FileRowFactory::from_row)?;

        let mut files = Vec::new();
        for file in rows {
            files.push(file?);
        }
        Ok(files)
    }

    /// Removes the file row; quizzes and materials derived from it cascade
    pub fn delete(&self, file_id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM files WHERE id = ?1", [file_id])?;
        Ok(())
    }

    pub fn count(&self, user_id: &str) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM files WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::connection::init_connection;

    fn create_test_db() -> Connection {
        init_connection(":memory:").expect("Failed to create test database")
    }

    fn insert_sample(repo: &FilesRepository, user: &str, name: &str) -> i64 {
        repo.insert(
            user,
            &format!("{}/{}", user, name),
            name,
            "application/pdf",
            2048,
            "Photosynthesis converts light energy into chemical energy.",
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_get_file() {
        let conn = create_test_db();
        let repo = FilesRepository::new(&conn);

        let file_id = insert_sample(&repo, "alice", "biology_notes.pdf");
        assert_eq!(file_id, 1);

        let file = repo.get(file_id).unwrap().unwrap();
        assert_eq!(file.original_name, "biology_notes.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.size_bytes, 2048);
        assert!(file.extracted_text.contains("Photosynthesis"));
    }

    #[test]
    fn test_for_user_scopes_by_owner() {
        let conn = create_test_db();
        let repo = FilesRepository::new(&conn);

        insert_sample(&repo, "alice", "chapter1.pdf");
        insert_sample(&repo, "alice", "chapter2.pdf");
        insert_sample(&repo, "bob", "unrelated.pdf");

        let files = repo.for_user("alice").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.user_id == "alice"));
    }

    #[test]
    fn test_get_nonexistent_file() {
        let conn = create_test_db();
        let repo = FilesRepository::new(&conn);
        assert!(repo.get(999).unwrap().is_none());
    }

    #[test]
    fn test_delete_file() {
        let conn = create_test_db();
        let repo = FilesRepository::new(&conn);

        let file_id = insert_sample(&repo, "alice", "to_delete.pdf");
        repo.delete(file_id).unwrap();

        assert!(repo.get(file_id).unwrap().is_none());
        assert_eq!(repo.count("alice").unwrap(), 0);
    }
}
