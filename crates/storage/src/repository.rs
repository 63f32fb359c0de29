use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rounds_core::model::{ProgressState, TopicCatalog};
use thiserror::Error;

use crate::json::JsonFileRepository;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("i/o error on {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Repository contract for the tracker state.
///
/// Implementations own a single snapshot and always read or write it whole.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the current state.
    ///
    /// Implementations repair what they can (missing or malformed data becomes
    /// an empty state, missing topics are back-filled) instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the backing medium itself fails.
    async fn load(&self) -> Result<ProgressState, StorageError>;

    /// Overwrite the stored state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be written.
    async fn save(&self, state: &ProgressState) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone)]
pub struct InMemoryRepository {
    catalog: Arc<TopicCatalog>,
    state: Arc<Mutex<Option<ProgressState>>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new(catalog: Arc<TopicCatalog>) -> Self {
        Self {
            catalog,
            state: Arc::new(Mutex::new(None)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Seed the repository with an existing state (not counted as a save).
    #[must_use]
    pub fn with_state(catalog: Arc<TopicCatalog>, state: ProgressState) -> Self {
        let repo = Self::new(catalog);
        if let Ok(mut guard) = repo.state.lock() {
            *guard = Some(state);
        }
        repo
    }

    /// Number of successful `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load(&self) -> Result<ProgressState, StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let state = guard.get_or_insert_with(|| ProgressState::empty(&self.catalog));
        state.backfill(&self.catalog);
        Ok(state.clone())
    }

    async fn save(&self, state: &ProgressState) -> Result<(), StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Aggregates the progress repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<TopicCatalog>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(catalog: Arc<TopicCatalog>) -> Self {
        let progress: Arc<dyn ProgressRepository> =
            Arc::new(InMemoryRepository::new(Arc::clone(&catalog)));
        Self { catalog, progress }
    }

    /// Build a `Storage` backed by a JSON file at `path`.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>, catalog: Arc<TopicCatalog>) -> Self {
        let progress: Arc<dyn ProgressRepository> =
            Arc::new(JsonFileRepository::new(path, Arc::clone(&catalog)));
        Self { catalog, progress }
    }
}
