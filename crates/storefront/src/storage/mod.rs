//! Blob storage for avatars and listing images.
//!
//! `FileStore` is the bucket abstraction: binary payloads keyed by a
//! generated [`FileId`], stored in the `storefront.file` table alongside
//! filename, content type, and a free-form metadata document. The store is
//! constructed once at startup and passed to handlers through
//! [`crate::state::AppState`] - there is no global bucket handle.
//!
//! A `put` is a single INSERT, so readers never observe a partial record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use clearcart_core::{FileId, UserId};

/// Errors that can occur during blob store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No file matches the given id.
    #[error("file not found: {0}")]
    NotFound(FileId),

    /// Storage backend failure.
    #[error("storage backend error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored metadata could not be decoded.
    #[error("invalid file metadata: {0}")]
    InvalidMetadata(#[from] serde_json::Error),
}

/// Caller-supplied metadata attached to a stored file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Logical folder the file belongs to (e.g., "avatars", "uploads").
    #[serde(default)]
    pub folder: Option<String>,
    /// User who uploaded the file.
    #[serde(default)]
    pub owner: Option<UserId>,
    /// Original client-side filename, before server-side renaming.
    #[serde(default)]
    pub original_name: Option<String>,
}

/// Metadata describing a stored file (no payload).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Generated identifier of the blob.
    pub id: FileId,
    /// Server-side filename.
    pub filename: String,
    /// MIME content type.
    pub content_type: String,
    /// Payload length in bytes.
    pub length: i64,
    /// Caller-supplied metadata.
    pub metadata: FileMetadata,
    /// When the blob was written.
    pub uploaded_at: DateTime<Utc>,
}

/// A stored file together with its payload, ready to be served.
#[derive(Debug)]
pub struct FileDownload {
    /// Payload bytes.
    pub bytes: Vec<u8>,
    /// MIME content type.
    pub content_type: String,
    /// Server-side filename.
    pub filename: String,
    /// Payload length in bytes.
    pub length: i64,
}

/// Database row for `storefront.file` metadata.
#[derive(sqlx::FromRow)]
struct FileRow {
    id: Uuid,
    filename: String,
    content_type: String,
    length: i64,
    metadata: serde_json::Value,
    uploaded_at: DateTime<Utc>,
}

impl FileRow {
    fn into_stored_file(self) -> Result<StoredFile, StorageError> {
        let metadata: FileMetadata = serde_json::from_value(self.metadata)?;
        Ok(StoredFile {
            id: FileId::from(self.id),
            filename: self.filename,
            content_type: self.content_type,
            length: self.length,
            metadata,
            uploaded_at: self.uploaded_at,
        })
    }
}

/// Blob store over the storefront database.
///
/// Cheap to clone; all clones share the same connection pool.
#[derive(Clone)]
pub struct FileStore {
    pool: PgPool,
}

impl FileStore {
    /// Create a new file store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Write a blob and return its metadata record.
    ///
    /// The payload and all attributes land in one INSERT; a failed write
    /// leaves nothing behind for readers to observe.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Database` if the write fails.
    pub async fn put(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
        metadata: FileMetadata,
    ) -> Result<StoredFile, StorageError> {
        let id = FileId::generate();
        let metadata_json = serde_json::to_value(&metadata)?;

        let row = sqlx::query_as::<_, FileRow>(
            r"
            INSERT INTO storefront.file (id, filename, content_type, length, metadata, data)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, filename, content_type, length, metadata, uploaded_at
            ",
        )
        .bind(id.as_uuid())
        .bind(filename)
        .bind(content_type)
        .bind(i64::try_from(bytes.len()).unwrap_or(i64::MAX))
        .bind(metadata_json)
        .bind(bytes)
        .fetch_one(&self.pool)
        .await?;

        row.into_stored_file()
    }

    /// Fetch a blob's payload and serving attributes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no file matches the id.
    /// Returns `StorageError::Database` if the read fails.
    pub async fn get(&self, id: FileId) -> Result<FileDownload, StorageError> {
        let row = sqlx::query_as::<_, DownloadRow>(
            r"
            SELECT data, content_type, filename, length
            FROM storefront.file
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or(StorageError::NotFound(id))?;

        Ok(FileDownload {
            bytes: row.data,
            content_type: row.content_type,
            filename: row.filename,
            length: row.length,
        })
    }

    /// Fetch a blob's metadata without the payload.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no file matches the id.
    /// Returns `StorageError::Database` if the read fails.
    pub async fn info(&self, id: FileId) -> Result<StoredFile, StorageError> {
        let row = sqlx::query_as::<_, FileRow>(
            r"
            SELECT id, filename, content_type, length, metadata, uploaded_at
            FROM storefront.file
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StorageError::NotFound(id))?.into_stored_file()
    }

    /// Delete a blob.
    ///
    /// Deleting an id that doesn't exist is not an error; callers treat
    /// deletion as best-effort cleanup.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Database` if the delete fails.
    pub async fn delete(&self, id: FileId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM storefront.file WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Database row for serving a file.
#[derive(sqlx::FromRow)]
struct DownloadRow {
    data: Vec<u8>,
    content_type: String,
    filename: String,
    length: i64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_roundtrip() {
        let metadata = FileMetadata {
            folder: Some("avatars".to_string()),
            owner: Some(UserId::new(7)),
            original_name: Some("me.png".to_string()),
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["folder"], "avatars");
        assert_eq!(json["owner"], 7);

        let back: FileMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back.folder.as_deref(), Some("avatars"));
        assert_eq!(back.owner, Some(UserId::new(7)));
        assert_eq!(back.original_name.as_deref(), Some("me.png"));
    }

    #[test]
    fn test_metadata_tolerates_missing_fields() {
        let metadata: FileMetadata = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(metadata.folder.is_none());
        assert!(metadata.owner.is_none());
        assert!(metadata.original_name.is_none());
    }
}
