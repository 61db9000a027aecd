// store/mod.rs — The task store: file-backed CRUD over the task collection.
//
// Every operation is a one-shot transaction: load the whole collection,
// transform it in memory, and (for mutations) rewrite the whole file.
// A single mutex serialises all operations, reads included, so no caller
// can observe a half-applied mutation and concurrent mutations cannot
// lose each other's writes.

pub mod backend;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub use self::backend::{Backend, FileBackend, MemoryBackend};

// ─── Task ─────────────────────────────────────────────────────────────────────

/// One work-item record. All fields are caller-supplied strings; fields
/// absent from a payload decode to the empty string. The store neither
/// generates nor validates ids — duplicates may coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub status: String,
}

// ─── StoreError ───────────────────────────────────────────────────────────────

/// Failures an operation surfaces to its caller.
///
/// Read and decode failures are deliberately not represented: per the
/// service contract they degrade to an empty collection (logged), so
/// lookups stay infallible and a first run with no file behaves as an
/// empty store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not persist the task file: {0}")]
    Persist(#[source] std::io::Error),

    #[error("could not encode the task collection: {0}")]
    Encode(#[source] serde_json::Error),
}

// ─── TaskStore ────────────────────────────────────────────────────────────────

/// Owns the persisted task collection; the only component that reads or
/// writes it.
pub struct TaskStore {
    backend: Mutex<Box<dyn Backend>>,
}

impl TaskStore {
    /// Store backed by a JSON file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_backend(Box::new(FileBackend::new(path)))
    }

    /// Store backed by memory only. Nothing survives the process.
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryBackend::new()))
    }

    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self {
            backend: Mutex::new(backend),
        }
    }

    /// The full collection in on-disk order. An absent, empty, or
    /// corrupt file yields an empty collection — this never fails.
    pub async fn list(&self) -> Vec<Task> {
        let backend = self.backend.lock().await;
        let tasks = load_collection(&**backend).await;
        debug!(count = tasks.len(), "listed all tasks");
        tasks
    }

    /// First task in storage order whose id matches.
    pub async fn get(&self, id: &str) -> Option<Task> {
        let backend = self.backend.lock().await;
        load_collection(&**backend)
            .await
            .into_iter()
            .find(|t| t.id == id)
    }

    /// Append a task to the end of the collection and persist it.
    pub async fn create(&self, task: Task) -> Result<(), StoreError> {
        let mut backend = self.backend.lock().await;
        let mut tasks = load_collection(&**backend).await;
        let id = task.id.clone();
        tasks.push(task);
        persist_collection(&mut **backend, &tasks).await?;
        info!(id = %id, "task created");
        Ok(())
    }

    /// Substitute every entry matching `id` with `task`, positions
    /// preserved. Returns whether anything matched; on no match the
    /// collection is left untouched and nothing is written.
    pub async fn replace(&self, id: &str, task: Task) -> Result<bool, StoreError> {
        let mut backend = self.backend.lock().await;
        let mut tasks = load_collection(&**backend).await;

        let mut matched = false;
        for slot in tasks.iter_mut().filter(|t| t.id == id) {
            *slot = task.clone();
            matched = true;
        }
        if !matched {
            return Ok(false);
        }

        persist_collection(&mut **backend, &tasks).await?;
        info!(id = %id, "task replaced");
        Ok(true)
    }

    /// Remove every entry matching `id`, preserving the survivors'
    /// relative order. Returns whether anything was removed; on no
    /// match nothing is written.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut backend = self.backend.lock().await;
        let mut tasks = load_collection(&**backend).await;

        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }

        persist_collection(&mut **backend, &tasks).await?;
        info!(id = %id, removed = before - tasks.len(), "task removed");
        Ok(true)
    }
}

/// Decode the stored collection. Missing file and empty file are a
/// fresh store; unreadable or corrupt contents degrade to empty with a
/// warning rather than failing the operation.
async fn load_collection(backend: &dyn Backend) -> Vec<Task> {
    let bytes = match backend.load().await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(err = %e, "could not read the task file — treating the collection as empty");
            return Vec::new();
        }
    };

    if bytes.is_empty() {
        return Vec::new();
    }

    match serde_json::from_slice(&bytes) {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(err = %e, "task file is not a valid task array — treating the collection as empty");
            Vec::new()
        }
    }
}

async fn persist_collection(backend: &mut dyn Backend, tasks: &[Task]) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(tasks).map_err(StoreError::Encode)?;
    backend.persist(&bytes).await.map_err(StoreError::Persist)
}
