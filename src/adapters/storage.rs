//! Staging directories backed by the system temp location

use crate::adapters::traits::TempStorage;
use crate::domain::{Result, VoyantError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const STAGING_PREFIX: &str = "voyant-export-";

/// A writable directory for one export job
///
/// Managed directories are removed by [`StagingDir::cleanup`] or on drop.
/// Cleanup is best effort: failures are logged, never returned.
#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
    guard: Option<TempDir>,
}

impl StagingDir {
    /// Wraps a temp directory that is deleted on cleanup
    pub fn managed(dir: TempDir) -> Self {
        Self {
            path: dir.path().to_path_buf(),
            guard: Some(dir),
        }
    }

    /// Wraps a directory owned by someone else; cleanup leaves it alone
    pub fn unmanaged(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_managed(&self) -> bool {
        self.guard.is_some()
    }

    /// Removes the directory if it is managed
    pub fn cleanup(self) {
        if let Some(guard) = self.guard {
            if let Err(e) = guard.close() {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove staging directory"
                );
            } else {
                tracing::debug!(path = %self.path.display(), "Removed staging directory");
            }
        }
    }
}

/// Allocates staging directories with `tempfile`
#[derive(Debug, Clone, Default)]
pub struct SystemTempStorage {
    base_dir: Option<PathBuf>,
}

impl SystemTempStorage {
    /// Uses the platform temp directory
    pub fn new() -> Self {
        Self { base_dir: None }
    }

    /// Uses `base_dir` instead of the platform temp directory
    pub fn in_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }
}

#[async_trait]
impl TempStorage for SystemTempStorage {
    async fn allocate(&self) -> Result<StagingDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX);

        let dir = match &self.base_dir {
            Some(base) => builder.tempdir_in(base),
            None => builder.tempdir(),
        }
        .map_err(|e| VoyantError::Io(format!("Failed to allocate staging directory: {e}")))?;

        tracing::debug!(path = %dir.path().display(), "Allocated staging directory");
        Ok(StagingDir::managed(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allocate_unique_directories() {
        let base = TempDir::new().unwrap();
        let storage = SystemTempStorage::in_dir(base.path());

        let first = storage.allocate().await.unwrap();
        let second = storage.allocate().await.unwrap();

        assert_ne!(first.path(), second.path());
        assert!(first.path().is_dir());
        assert!(first
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(STAGING_PREFIX));
    }

    #[tokio::test]
    async fn test_cleanup_removes_managed_directory() {
        let base = TempDir::new().unwrap();
        let staging = SystemTempStorage::in_dir(base.path()).allocate().await.unwrap();
        let path = staging.path().to_path_buf();
        std::fs::write(path.join("file.txt"), "x").unwrap();

        assert!(staging.is_managed());
        staging.cleanup();
        assert!(!path.exists());
    }

    #[test]
    fn test_cleanup_keeps_unmanaged_directory() {
        let base = TempDir::new().unwrap();
        let staging = StagingDir::unmanaged(base.path());

        staging.cleanup();
        assert!(base.path().exists());
    }

    #[tokio::test]
    async fn test_allocate_in_missing_base_fails() {
        let base = TempDir::new().unwrap();
        let storage = SystemTempStorage::in_dir(base.path().join("missing"));

        assert!(matches!(storage.allocate().await, Err(VoyantError::Io(_))));
    }
}
