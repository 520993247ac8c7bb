//! Plan execution: the filesystem move plus the store repoint.
//!
//! The move happens before the store update. A crash between the two leaves
//! the file at its new location with a stale pointer, which a re-run can
//! detect and repair; the reverse order could leave the pointer aimed at
//! nothing.

use crate::error::{Result, ShelfmarkError};
use crate::plan::RelocationPlan;
use crate::store::MetadataStore;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Result of executing one relocation plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The file was moved and/or its stored location repointed.
    Moved,
    /// File and stored URI already match the plan; nothing to do.
    AlreadyCorrect,
    /// The store references a file that does not exist on disk.
    SourceMissing,
    /// The target path is occupied by a different file; nothing overwritten.
    DestinationConflict,
}

/// Execute a relocation plan for the file identified by `hash`.
pub fn execute(store: &MetadataStore, hash: &str, plan: &RelocationPlan) -> Result<Outcome> {
    let in_place = plan.old_path == plan.new_path;

    if in_place && plan.old_location_uri == plan.new_location_uri {
        return Ok(Outcome::AlreadyCorrect);
    }

    if !plan.old_path.is_file() {
        return Ok(Outcome::SourceMissing);
    }

    if in_place {
        // File already where it belongs; only the stored URI needs
        // normalizing.
        store.set_location(hash, &plan.new_location_uri)?;
        return Ok(Outcome::Moved);
    }

    if plan.new_path.exists() {
        return Ok(Outcome::DestinationConflict);
    }

    fs::create_dir_all(&plan.new_directory)
        .map_err(|e| ShelfmarkError::io_with_path(e, plan.new_directory.clone()))?;

    move_file(&plan.old_path, &plan.new_path)?;

    // Only after a confirmed move may the store be repointed.
    store.set_location(hash, &plan.new_location_uri)?;

    debug!(
        "Moved: {} -> {}",
        plan.old_path.display(),
        plan.new_path.display()
    );

    Ok(Outcome::Moved)
}

/// Move a file, falling back to copy+delete for cross-filesystem moves.
fn move_file(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(src, dest).map_err(|e| ShelfmarkError::Io {
                message: format!(
                    "Failed to copy file: {} -> {}",
                    src.display(),
                    dest.display()
                ),
                path: Some(dest.to_path_buf()),
                source: Some(e),
            })?;
            fs::remove_file(src).map_err(|e| ShelfmarkError::Io {
                message: format!("Failed to clean up source after copy: {}", src.display()),
                path: Some(src.to_path_buf()),
                source: Some(e),
            })?;
            Ok(())
        }
    }
}
