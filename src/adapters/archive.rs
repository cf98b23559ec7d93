//! ZIP archiver
//!
//! Walks the bag in sorted order and writes a deflated ZIP. The archive is
//! written to a hidden temporary file next to the destination and renamed
//! into place only once it is complete.

use crate::adapters::traits::Archiver;
use crate::domain::{Result, VoyantError};
use async_trait::async_trait;
use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// Produces `.zip` archives
#[derive(Debug, Clone, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Archiver for ZipArchiver {
    async fn archive(&self, source: &Path, destination: &Path) -> Result<()> {
        let source = source.to_path_buf();
        let destination = destination.to_path_buf();

        let entries = tokio::task::spawn_blocking(move || write_archive(&source, &destination))
            .await
            .map_err(|e| VoyantError::Archive(format!("Archive task failed: {e}")))??;

        tracing::debug!(entries, "Archive written");
        Ok(())
    }
}

/// Zip entry name for `path` relative to `root`, always `/`-separated
fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        VoyantError::Archive(format!(
            "{} is outside of {}",
            path.display(),
            root.display()
        ))
    })?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn staging_file(destination: &Path) -> Result<tempfile::NamedTempFile> {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    tempfile::Builder::new()
        .prefix(".voyant-export-")
        .suffix(".partial")
        .tempfile_in(&parent)
        .map_err(|e| {
            VoyantError::Archive(format!(
                "Failed to create temporary archive in {}: {}",
                parent.display(),
                e
            ))
        })
}

/// Entries at or above this size need ZIP64 headers
const LARGE_FILE_THRESHOLD: u64 = u32::MAX as u64;

fn needs_large_file(len: u64) -> bool {
    len >= LARGE_FILE_THRESHOLD
}

fn file_options(len: u64) -> FileOptions<'static, ()> {
    FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644)
        .large_file(needs_large_file(len))
}

fn write_entries<W: Write + Seek>(source: &Path, zip: &mut ZipWriter<W>) -> Result<usize> {
    let dir_options: FileOptions<'_, ()> = FileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .unix_permissions(0o755);

    let mut count = 0;
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(source, entry.path())?;

        if entry.file_type().is_dir() {
            zip.add_directory(name, dir_options)?;
        } else {
            let len = entry.metadata()?.len();
            zip.start_file(name, file_options(len))?;
            let mut file = File::open(entry.path())?;
            io::copy(&mut file, zip)?;
        }
        count += 1;
    }
    Ok(count)
}

fn write_archive(source: &Path, destination: &Path) -> Result<usize> {
    if !source.is_dir() {
        return Err(VoyantError::Archive(format!(
            "Archive source is not a directory: {}",
            source.display()
        )));
    }

    let staging = staging_file(destination)?;
    let mut zip = ZipWriter::new(staging);
    let count = write_entries(source, &mut zip)?;

    let mut staging = zip.finish()?;
    staging.flush()?;
    staging.as_file().sync_all()?;

    staging.persist(destination).map_err(|e| {
        VoyantError::Archive(format!(
            "Failed to move archive into place at {}: {}",
            destination.display(),
            e.error
        ))
    })?;

    Ok(count)
}
