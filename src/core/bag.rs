//! BagIt skeleton assembly
//!
//! A bag is a directory holding a `bagit.txt` declaration and a `data/`
//! payload directory. Each exported record owns one payload subdirectory:
//!
//! ```text
//! bagit.txt
//! data/<record-id>/MODS.bin
//! data/<record-id>/DC.xml
//! data/<record-id>/CWRC.bin
//! ```
//!
//! No manifest or checksum tag files are written; the archive is a minimal
//! bag by contract with the consuming tool.

use crate::domain::{Result, VoyantError};
use std::path::{Path, PathBuf};

/// Name of the bag declaration file
pub const DECLARATION_FILE: &str = "bagit.txt";

/// Name of the payload directory
pub const PAYLOAD_DIR: &str = "data";

/// Exact contents of `bagit.txt`
pub const DECLARATION: &str = "BagIt-Version: 0.97\nTag-File-Character-Encoding: UTF-8\n";

/// MODS output file name. The `.bin` extension is what the consumer expects.
pub const MODS_FILE: &str = "MODS.bin";

/// Dublin Core output file name
pub const DC_FILE: &str = "DC.xml";

/// Copied attachment file name, whatever the source extension
pub const CONTENT_FILE: &str = "CWRC.bin";

/// Paths of an assembled bag skeleton
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagLayout {
    root: PathBuf,
    payload: PathBuf,
}

impl BagLayout {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn payload(&self) -> &Path {
        &self.payload
    }

    /// Directory that holds one record's files
    pub fn record_dir(&self, record_id: &str) -> PathBuf {
        self.payload.join(record_id)
    }
}

/// Writes the bag declaration and creates the payload root
#[derive(Debug, Default, Clone, Copy)]
pub struct BagAssembler;

impl BagAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Writes `bagit.txt` directly under `bag_root`
    pub async fn write_declaration(&self, bag_root: &Path) -> Result<()> {
        let path = bag_root.join(DECLARATION_FILE);
        tokio::fs::write(&path, DECLARATION).await.map_err(|e| {
            VoyantError::Bag(format!(
                "Failed to write bag declaration {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Creates the `data` directory under `bag_root`
    ///
    /// Fails if the directory already exists or cannot be created.
    pub async fn create_payload_root(&self, bag_root: &Path) -> Result<PathBuf> {
        let payload = bag_root.join(PAYLOAD_DIR);
        tokio::fs::create_dir(&payload).await.map_err(|e| {
            VoyantError::Bag(format!(
                "Failed to create payload directory {}: {}",
                payload.display(),
                e
            ))
        })?;
        Ok(payload)
    }

    /// Writes the declaration and creates the payload root
    pub async fn assemble(&self, bag_root: &Path) -> Result<BagLayout> {
        self.write_declaration(bag_root).await?;
        let payload = self.create_payload_root(bag_root).await?;

        tracing::debug!(
            bag_root = %bag_root.display(),
            payload = %payload.display(),
            "Bag skeleton assembled"
        );

        Ok(BagLayout {
            root: bag_root.to_path_buf(),
            payload,
        })
    }
}
