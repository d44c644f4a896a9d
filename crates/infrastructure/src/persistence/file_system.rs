//! Real file system implementation.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clearsight_application::ports::{FileSystem, FileSystemError};
use tokio::fs;

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staged = OsString::from(path.as_os_str());
    staged.push(".tmp");
    PathBuf::from(staged)
}

impl FileSystem for TokioFileSystem {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => FileSystemError::PermissionDenied(path.to_path_buf()),
            _ => FileSystemError::Io(e),
        })
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        // write aside, then swap in
        let staged = staging_path(path);
        fs::write(&staged, contents).await?;
        fs::rename(&staged, path).await.map_err(FileSystemError::Io)
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }
}
