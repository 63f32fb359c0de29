//! JSON file backend.
//!
//! The whole state lives in one pretty-printed file that is read and written
//! in full on every operation. There is no locking and no atomic rename: a
//! single process is assumed, and the last save wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use rounds_core::model::{ProgressState, TopicCatalog};
use tokio::fs;

use crate::repository::{ProgressRepository, StorageError};
use crate::snapshot::{self, ImportError};

/// Default file name for the backing store.
pub const DEFAULT_FILE_NAME: &str = "progress.json";

#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    catalog: Arc<TopicCatalog>,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, catalog: Arc<TopicCatalog>) -> Self {
        Self {
            path: path.into(),
            catalog,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_existing(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::io(&self.path, &err)),
        }
    }

    fn decode_or_repair(&self, bytes: &[u8]) -> ProgressState {
        match snapshot::decode_salvaging(bytes, &self.catalog) {
            Ok((state, salvage)) => {
                if !salvage.is_clean() {
                    tracing::warn!(
                        path = %self.path.display(),
                        dropped_counts = ?salvage.dropped_counts,
                        dropped_log_entries = salvage.dropped_log_entries,
                        counts_discarded = salvage.counts_discarded,
                        log_discarded = salvage.log_discarded,
                        "progress file had malformed entries; keeping the rest"
                    );
                }
                state
            }
            Err(ImportError::Empty) => {
                tracing::debug!(path = %self.path.display(), "progress file is empty; starting fresh");
                ProgressState::empty(&self.catalog)
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "progress file is unreadable; replacing with an empty state"
                );
                ProgressState::empty(&self.catalog)
            }
        }
    }
}

#[async_trait]
impl ProgressRepository for JsonFileRepository {
    async fn load(&self) -> Result<ProgressState, StorageError> {
        let state = match self.read_existing().await? {
            Some(bytes) => self.decode_or_repair(&bytes),
            None => {
                tracing::info!(path = %self.path.display(), "creating progress file");
                ProgressState::empty(&self.catalog)
            }
        };

        // Re-persist so back-filled topics and repairs land on disk right away.
        self.save(&state).await?;
        Ok(state)
    }

    async fn save(&self, state: &ProgressState) -> Result<(), StorageError> {
        let bytes = snapshot::encode_json(state, false)?;
        fs::write(&self.path, bytes)
            .await
            .map_err(|err| StorageError::io(&self.path, &err))
    }
}
