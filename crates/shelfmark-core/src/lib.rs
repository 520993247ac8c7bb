//! Shelfmark Core - Headless library for reorganizing a reference manager's
//! PDF library.
//!
//! For every tracked document, Shelfmark derives a human-readable filename
//! from bibliographic metadata, moves the underlying PDF into a folder tree
//! mirroring the manager's category structure, and repoints the manager's
//! own location record so database and filesystem never diverge.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfmark_core::{MetadataStore, Organizer};
//!
//! fn main() -> shelfmark_core::Result<()> {
//!     let store = MetadataStore::open("/path/to/library.sqlite")?;
//!     let summary = Organizer::new(store, "/path/to/pdfs").run()?;
//!     println!("Moved {} of {} files", summary.moved, summary.total);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod naming;
pub mod organizer;
pub mod plan;
pub mod relocate;
pub mod store;

// Re-export commonly used types
pub use error::{Result, ShelfmarkError};
pub use organizer::{Organizer, RunSummary};
pub use plan::RelocationPlan;
pub use relocate::Outcome;
pub use store::{Document, FileRecord, MetadataStore};
