//! Batch orchestration: walk every tracked file, plan its relocation and
//! execute it, tolerating per-record failures.

use crate::error::Result;
use crate::naming::resolve_name;
use crate::plan;
use crate::relocate::{self, Outcome};
use crate::store::{FileRecord, MetadataStore};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Tally of one organizer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of file records attempted.
    pub total: usize,
    pub moved: usize,
    pub already_correct: usize,
    pub source_missing: usize,
    pub destination_conflict: usize,
    /// Records skipped because of a per-record error.
    pub failed: usize,
}

/// Walks the manager's file records and reorganizes the library under a root
/// directory, one record at a time.
pub struct Organizer {
    store: MetadataStore,
    library_root: PathBuf,
}

impl Organizer {
    pub fn new(store: MetadataStore, library_root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            library_root: library_root.into(),
        }
    }

    /// Process every file record, then commit the store's transaction.
    ///
    /// A failure on one record is logged with the offending ids and counted;
    /// it never aborts the batch. Each record's relocation is independently
    /// idempotent, so re-running converges the library to the same state.
    pub fn run(self) -> Result<RunSummary> {
        let records = self.store.list_file_records()?;
        let mut summary = RunSummary {
            total: records.len(),
            ..RunSummary::default()
        };

        info!("Organizing {} tracked files", records.len());

        for record in &records {
            match self.organize_record(record) {
                Ok(Outcome::Moved) => summary.moved += 1,
                Ok(Outcome::AlreadyCorrect) => {
                    debug!("Already in place: {}", record.hash);
                    summary.already_correct += 1;
                }
                Ok(Outcome::SourceMissing) => {
                    warn!(
                        "File for document {} ({}) is missing on disk; record left untouched",
                        record.document_id, record.hash
                    );
                    summary.source_missing += 1;
                }
                Ok(Outcome::DestinationConflict) => {
                    warn!(
                        "Target for document {} ({}) already occupied; not overwriting",
                        record.document_id, record.hash
                    );
                    summary.destination_conflict += 1;
                }
                Err(err) => {
                    warn!(
                        "Skipping document {} ({}): {}",
                        record.document_id, record.hash, err
                    );
                    summary.failed += 1;
                }
            }
        }

        self.store.commit()?;

        Ok(summary)
    }

    /// Assemble metadata, plan and execute the relocation for one record.
    fn organize_record(&self, record: &FileRecord) -> Result<Outcome> {
        let document = self.store.get_document(record.document_id)?;
        let folder_id = self.store.get_folder_id(record.document_id)?;
        let folder_name = self.store.get_folder_name(folder_id)?;
        let contributor = self
            .store
            .get_primary_contributor_lastname(record.document_id)?;
        let location = self.store.get_location(&record.hash)?;

        let resolved_name = resolve_name(
            &contributor,
            &document.year,
            &document.publication,
            &document.title,
        );

        let plan = plan::plan(&location, &resolved_name, &folder_name, &self.library_root)?;

        relocate::execute(&self.store, &record.hash, &plan)
    }
}
