//! Read/write accessor over the reference manager's SQLite database.
//!
//! The schema is owned by the external manager application; this module only
//! reads document, file, folder and contributor rows, and updates the stored
//! file location after a successful move. Opening the store begins one
//! deferred transaction spanning the whole run. `commit` makes the run's
//! location updates visible; dropping the store without committing rolls
//! them back when the connection closes.

use crate::error::{Result, ShelfmarkError};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::Path;
use tracing::{debug, warn};

/// Sentinel folder name for documents without a folder assignment.
pub const UNFILED_FOLDER: &str = "Unsorted";

/// Sentinel contributor name for documents without recorded authors.
pub const UNKNOWN_AUTHOR: &str = "Author";

/// A document's bibliographic metadata, with sentinel defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub uuid: String,
    pub citation_key: Option<String>,
    pub doc_type: String,
    /// Publication venue; defaults to the uppercased document type.
    pub publication: String,
    /// Publication year as a decimal string; defaults to `"Year"`.
    pub year: String,
    /// Title; defaults to `"Title"`.
    pub title: String,
}

/// One tracked file: a content hash attached to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub document_id: i64,
    pub hash: String,
}

/// Accessor over the manager's relational store.
pub struct MetadataStore {
    conn: Connection,
}

impl MetadataStore {
    /// Open an existing metadata database and begin the run's transaction.
    ///
    /// The database must already exist; the manager application owns its
    /// creation and schema.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .map_err(|e| ShelfmarkError::Database {
                message: format!("Failed to open metadata database {}: {}", db_path.display(), e),
                source: Some(e),
            })?;

        conn.execute_batch("BEGIN")
            .map_err(|e| ShelfmarkError::Database {
                message: format!("Failed to begin transaction: {}", e),
                source: Some(e),
            })?;

        debug!("Opened metadata database {}", db_path.display());

        Ok(Self { conn })
    }

    /// Commit the run's transaction, consuming the store.
    pub fn commit(self) -> Result<()> {
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| ShelfmarkError::Database {
                message: format!("Failed to commit transaction: {}", e),
                source: Some(e),
            })?;

        debug!("Committed metadata updates");

        Ok(())
    }

    /// List every (document, file hash) pair known to the store.
    pub fn list_file_records(&self) -> Result<Vec<FileRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT documentId, hash FROM DocumentFiles")?;

        let records = stmt
            .query_map([], |row| {
                Ok(FileRecord {
                    document_id: row.get(0)?,
                    hash: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Get a document's metadata, applying sentinel defaults for missing
    /// optional fields.
    pub fn get_document(&self, doc_id: i64) -> Result<Document> {
        let row: Option<(
            String,
            Option<String>,
            String,
            Option<String>,
            Option<i64>,
            Option<String>,
        )> = self
            .conn
            .query_row(
                "SELECT uuid, citationKey, type, publication, year, title \
                 FROM Documents WHERE id = ?1",
                params![doc_id],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .optional()?;

        let (uuid, citation_key, doc_type, publication, year, title) =
            row.ok_or(ShelfmarkError::DocumentNotFound { doc_id })?;

        let publication = publication.unwrap_or_else(|| doc_type.to_uppercase());
        let year = year.map_or_else(|| "Year".to_string(), |y| y.to_string());
        let title = title.unwrap_or_else(|| "Title".to_string());

        Ok(Document {
            uuid,
            citation_key,
            doc_type,
            publication,
            year,
            title,
        })
    }

    /// Get the stored location URI for a file hash.
    pub fn get_location(&self, hash: &str) -> Result<String> {
        self.conn
            .query_row(
                "SELECT localUrl FROM Files WHERE hash = ?1",
                params![hash],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| ShelfmarkError::FileNotFound {
                hash: hash.to_string(),
            })
    }

    /// Get the folder id a document is filed under, if any.
    ///
    /// An unfiled document is a normal state, not an error.
    pub fn get_folder_id(&self, doc_id: i64) -> Result<Option<i64>> {
        let folder_id: Option<i64> = self
            .conn
            .query_row(
                "SELECT folderId FROM DocumentFolders WHERE documentId = ?1",
                params![doc_id],
                |row| row.get(0),
            )
            .optional()?;

        if folder_id.is_none() {
            debug!("Document {} has no folder assignment", doc_id);
        }

        Ok(folder_id)
    }

    /// Get a folder's name, or the unfiled sentinel for `None`.
    ///
    /// A non-empty id with no matching row means the store is inconsistent
    /// and is reported as `FolderNotFound`.
    pub fn get_folder_name(&self, folder_id: Option<i64>) -> Result<String> {
        let Some(folder_id) = folder_id else {
            return Ok(UNFILED_FOLDER.to_string());
        };

        self.conn
            .query_row(
                "SELECT name FROM Folders WHERE id = ?1",
                params![folder_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(ShelfmarkError::FolderNotFound { folder_id })
    }

    /// Get the last name of a document's first-listed contributor.
    ///
    /// A document without recorded authors is legitimate; it resolves to the
    /// `"Author"` sentinel with a warning.
    pub fn get_primary_contributor_lastname(&self, doc_id: i64) -> Result<String> {
        let last_name: Option<String> = self
            .conn
            .query_row(
                "SELECT lastName FROM DocumentContributors WHERE documentId = ?1",
                params![doc_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(last_name.unwrap_or_else(|| {
            warn!("No contributor found for document {}", doc_id);
            UNKNOWN_AUTHOR.to_string()
        }))
    }

    /// Point a file record at a new location URI.
    ///
    /// Must only be called after the file has actually been moved; the
    /// relocator enforces that ordering.
    pub fn set_location(&self, hash: &str, new_uri: &str) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE Files SET localUrl = ?1 WHERE hash = ?2",
            params![new_uri, hash],
        )?;

        if updated == 0 {
            return Err(ShelfmarkError::FileNotFound {
                hash: hash.to_string(),
            });
        }

        debug!("Updated location for {} -> {}", hash, new_uri);

        Ok(())
    }
}
