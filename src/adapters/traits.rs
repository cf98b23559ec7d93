//! Collaborator traits
//!
//! The export pipeline never reaches for ambient state. Everything it needs
//! from the outside world comes through one of these traits, handed to
//! [`crate::core::export::ExportCoordinator`] at construction time.

use crate::adapters::storage::StagingDir;
use crate::domain::{Attachment, Collection, Record, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Source of records and their attachments
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    /// The user's active selection
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::VoyantError::Precondition`] when nothing is
    /// selected.
    async fn active_collection(&self) -> Result<Collection>;

    /// The preferred attachment of a record, if it has one
    async fn best_attachment(&self, record: &Record) -> Result<Option<Attachment>>;

    /// Local file path of an attachment, if it is stored locally
    async fn attachment_path(&self, attachment: &Attachment) -> Result<Option<PathBuf>>;
}

/// Picks where the archive goes
#[async_trait]
pub trait DestinationChooser: Send + Sync {
    /// Returns the chosen output path, or `None` when the user cancelled
    async fn choose(&self, suggested_name: &Path) -> Result<Option<PathBuf>>;
}

/// Hands out uniquely named, writable staging directories
#[async_trait]
pub trait TempStorage: Send + Sync {
    async fn allocate(&self) -> Result<StagingDir>;
}

/// Packs a directory into an archive file
///
/// Implementations must not leave a partial archive at `destination` when
/// they fail.
#[async_trait]
pub trait Archiver: Send + Sync {
    async fn archive(&self, source: &Path, destination: &Path) -> Result<()>;
}
