//! File handles supplied by the host page.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ReadError;

/// Metadata the host knows about a dropped or selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// File name as shown to the user.
    pub name: String,
    /// Declared size in bytes.
    pub size: u64,
    /// Declared MIME type, e.g. `image/png`. Empty when unknown.
    pub mime: String,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }

    /// Whether the declared type is an image, i.e. previewable inline.
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// An opaque handle to one file's bytes.
///
/// The host adapts whatever it holds (picked paths, in-memory blobs) into
/// this; the upload controller only ever reads through it.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// The file's metadata.
    fn meta(&self) -> &FileMeta;

    /// Reads the full contents. Called once per preview attempt.
    async fn read(&self) -> Result<Vec<u8>, ReadError>;
}

// =============================================================================
// In-memory source
// =============================================================================

/// A file held entirely in memory.
///
/// The default source for tests and demos; `unreadable` simulates a handle
/// whose bytes cannot be produced.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    meta: FileMeta,
    data: Vec<u8>,
    fail_reason: Option<String>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        let name = name.into();
        let size = data.len() as u64;
        Self {
            meta: FileMeta::new(name, size, mime),
            data,
            fail_reason: None,
        }
    }

    /// A handle that fails every read with the given reason.
    pub fn unreadable(
        name: impl Into<String>,
        mime: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            meta: FileMeta::new(name, 0, mime),
            data: Vec::new(),
            fail_reason: Some(reason.into()),
        }
    }
}

#[async_trait]
impl FileSource for MemoryFile {
    fn meta(&self) -> &FileMeta {
        &self.meta
    }

    async fn read(&self) -> Result<Vec<u8>, ReadError> {
        match &self.fail_reason {
            Some(reason) => Err(ReadError::unreadable(&self.meta.name, reason)),
            None => Ok(self.data.clone()),
        }
    }
}

// =============================================================================
// Disk source
// =============================================================================

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct DiskFile {
    meta: FileMeta,
    path: PathBuf,
}

impl DiskFile {
    /// Opens a path, deriving metadata from the filesystem and the
    /// extension.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ReadError> {
        let path = path.into();
        let metadata = tokio::fs::metadata(&path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let mime = mime_from_extension(&path);

        Ok(Self {
            meta: FileMeta::new(name, metadata.len(), mime),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileSource for DiskFile {
    fn meta(&self) -> &FileMeta {
        &self.meta
    }

    async fn read(&self) -> Result<Vec<u8>, ReadError> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image() {
        assert!(FileMeta::new("a.png", 10, "image/png").is_image());
        assert!(!FileMeta::new("a.pdf", 10, "application/pdf").is_image());
        assert!(!FileMeta::new("a", 10, "").is_image());
    }

    #[tokio::test]
    async fn test_memory_file_roundtrip() {
        let file = MemoryFile::new("hello.txt", "text/plain", b"hello".to_vec());
        assert_eq!(file.meta().size, 5);
        assert_eq!(file.read().await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_unreadable_memory_file() {
        let file = MemoryFile::unreadable("broken.png", "image/png", "corrupt handle");
        let err = file.read().await.unwrap_err();
        assert!(err.to_string().contains("corrupt handle"));
    }
}
