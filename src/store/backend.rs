// store/backend.rs — Storage backends for the task collection.
//
// The store is generic over where the encoded collection lives so tests
// can run against memory instead of disk. Both methods move whole
// snapshots: the store always reads and writes the full collection.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use tokio::fs;

/// Raw byte storage for the encoded task collection.
///
/// `load` returns `None` when nothing has been persisted yet — a fresh
/// store, not an error.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn load(&self) -> io::Result<Option<Vec<u8>>>;
    async fn persist(&mut self, bytes: &[u8]) -> io::Result<()>;
}

// ─── FileBackend ──────────────────────────────────────────────────────────────

/// On-disk backend: one JSON file holding the whole collection.
///
/// Writes go through a temp file and rename so a crash mid-write can
/// never leave a truncated collection behind.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Backend for FileBackend {
    async fn load(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn persist(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Atomic write: write to tmp, then rename
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

// ─── MemoryBackend ────────────────────────────────────────────────────────────

/// In-memory backend for tests and ephemeral stores.
#[derive(Default)]
pub struct MemoryBackend {
    contents: Option<Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-seeded bytes, as if a file already existed.
    pub fn with_contents(contents: Vec<u8>) -> Self {
        Self {
            contents: Some(contents),
        }
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn load(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.contents.clone())
    }

    async fn persist(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.contents = Some(bytes.to_vec());
        Ok(())
    }
}
