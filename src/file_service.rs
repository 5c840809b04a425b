use crate::format::format_file_size;
use crate::store::sessions::Activity;
use crate::store::{FileRecord, Store};
use log::info;
use std::sync::Arc;
use thiserror::Error;

/// Upload cap enforced before anything touches the store
pub const MAX_UPLOAD_BYTES: i64 = 5 * 1024 * 1024;

const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "text/plain",
    "text/markdown",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File is too large ({size}). The maximum upload size is {max}.")]
    TooLarge { size: String, max: String },
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}

/// A document handed in by the user, validated before persisting
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub extracted_text: String,
}

impl FileUpload {
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.size_bytes > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                size: format_file_size(self.size_bytes),
                max: format_file_size(MAX_UPLOAD_BYTES),
            });
        }
        if !ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(UploadError::UnsupportedType(self.mime_type.clone()));
        }
        Ok(())
    }
}

/// Intake service for uploaded documents
pub struct FileService {
    store: Arc<Store>,
}

impl FileService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Validates and persists an upload, recording an upload session
    pub fn upload(&self, user_id: &str, upload: &FileUpload) -> Result<i64, UploadError> {
        upload.validate()?;

        let storage_path = format!("{}/{}", user_id, upload.original_name);
        let file_id = self.store.insert_file(
            user_id,
            &storage_path,
            &upload.original_name,
            &upload.mime_type,
            upload.size_bytes,
            &upload.extracted_text,
        )?;

        let now = self.store.current_time();
        self.store.record_session(
            user_id,
            Activity::Upload,
            Some(&upload.original_name),
            now,
            now,
        )?;

        info!(
            "Uploaded {} ({}) for {}",
            upload.original_name,
            format_file_size(upload.size_bytes),
            user_id
        );
        Ok(file_id)
    }

    pub fn get(&self, file_id: i64) -> Result<Option<FileRecord>, rusqlite::Error> {
        self.store.get_file(file_id)
    }

    /// Removes the file; derived quizzes and materials cascade in the store
    pub fn delete(&self, file_id: i64) -> Result<(), rusqlite::Error> {
        self.store.delete_file(file_id)
    }
}
