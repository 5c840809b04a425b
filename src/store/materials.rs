use crate::material::{MaterialContent, MaterialKind};
use crate::row_factories::MaterialRowFactory;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

/// One generated study material (summary, flashcards, or notes)
#[derive(Debug, Clone)]
pub struct MaterialRecord {
    pub id: i64,
    pub user_id: String,
    pub file_id: Option<i64>,
    pub title: String,
    pub kind: MaterialKind,
    pub content_json: String,
    pub created_at: DateTime<Utc>,
}

impl MaterialRecord {
    pub fn content(&self) -> serde_json::Result<MaterialContent> {
        serde_json::from_str(&self.content_json)
    }
}

pub struct MaterialsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> MaterialsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        MaterialsRepository { conn }
    }

    pub fn insert(
        &self,
        user_id: &str,
        file_id: Option<i64>,
        title: &str,
        content: &MaterialContent,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        let content_json = serde_json::to_string(content)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        self.conn.execute(
            "INSERT INTO study_materials (user_id, file_id, title, kind, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user_id,
                file_id,
                title,
                content.kind().as_str(),
                content_json,
                created_at.to_rfc3339()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get(&self, material_id: i64) -> Result<Option<MaterialRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, file_id, title, kind, content, created_at
             FROM study_materials WHERE id = ?1",
        )?;

        let mut rows = stmt.query([material_id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(MaterialRowFactory::from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn for_user(&self, user_id: &str) -> Result<Vec<MaterialRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, file_id, title, kind, content, created_at
             FROM study_materials
             WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([user_id], MaterialRowFactory::from_row)?;

        let mut materials = Vec::new();
        for material in rows {
            materials.push(material?);
        }
        Ok(materials)
    }

    pub fn delete(&self, material_id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM study_materials WHERE id = ?1", [material_id])?;
        Ok(())
    }

    pub fn count(&self, user_id: &str) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM study_materials WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
