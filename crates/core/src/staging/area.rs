//! Staging area and scoped staging handles.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::StagingError;

/// Longest file name component kept from the caller-supplied name.
const MAX_NAME_BYTES: usize = 200;

/// Root directory for staged file bytes.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    /// Creates a staging area rooted at `dir`. The directory is created lazily.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a staging area in the OS temporary directory.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join("drivemove"))
    }

    /// Creates a staging area from an optional configured directory.
    pub fn from_config(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::new(dir),
            None => Self::in_temp_dir(),
        }
    }

    /// Returns the staging directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Allocates a unique local path for one file's bytes.
    ///
    /// The returned handle removes its file when dropped.
    pub async fn acquire(&self, name: &str) -> Result<StagingHandle, StagingError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StagingError::DirectoryCreationFailed {
                path: self.dir.clone(),
                source: e,
            })?;

        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(name));
        let path = self.dir.join(file_name);
        debug!(path = %path.display(), "Acquired staging path");

        Ok(StagingHandle {
            path,
            released: false,
        })
    }
}

/// Exclusive ownership of one staged file.
///
/// The file is deleted on drop. Deletion failures are logged, never returned.
#[derive(Debug)]
pub struct StagingHandle {
    path: PathBuf,
    released: bool,
}

impl StagingHandle {
    /// Path of the staged file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `bytes` as the full content of the staged file and syncs it to disk.
    pub async fn write(&self, bytes: &[u8]) -> Result<(), StagingError> {
        let write_failed = |e| StagingError::WriteFailed {
            path: self.path.clone(),
            source: e,
        };

        let mut file = File::create(&self.path).await.map_err(write_failed)?;
        file.write_all(bytes).await.map_err(write_failed)?;
        file.flush().await.map_err(write_failed)?;
        file.sync_all().await.map_err(write_failed)?;
        Ok(())
    }

    /// Releases the handle now instead of at end of scope.
    pub fn release(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed staged file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove staged file"
            ),
        }
    }
}

impl Drop for StagingHandle {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Makes a Drive file name safe to use as a single local path component.
fn sanitize_file_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.len() > MAX_NAME_BYTES {
        let mut end = MAX_NAME_BYTES;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized.truncate(end);
    }

    match sanitized.trim() {
        "" | "." | ".." => "file".to_string(),
        _ => sanitized,
    }
}
