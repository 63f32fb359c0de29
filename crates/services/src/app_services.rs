use std::path::PathBuf;
use std::sync::Arc;

use rounds_core::model::{TopicCatalog, TrackerSettings};
use storage::repository::Storage;

use crate::Clock;
use crate::backup_service::BackupService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    data_file: Option<PathBuf>,
    progress: Arc<ProgressService>,
    backup: Arc<BackupService>,
}

impl AppServices {
    /// Build services backed by the JSON file at `data_file`.
    ///
    /// The file is loaded once up front so a missing or damaged file is
    /// created or repaired before the first user action.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the file cannot be read or written.
    pub async fn new_json(
        data_file: impl Into<PathBuf>,
        clock: Clock,
        settings: TrackerSettings,
    ) -> Result<Self, AppServicesError> {
        let data_file = data_file.into();
        let catalog = Arc::new(TopicCatalog::default());
        let storage = Storage::json_file(&data_file, catalog);
        storage.progress.load().await?;

        let mut services = Self::from_storage(&storage, clock, settings);
        services.data_file = Some(data_file);
        Ok(services)
    }

    /// Build services over an in-memory store.
    #[must_use]
    pub fn in_memory(catalog: Arc<TopicCatalog>, clock: Clock, settings: TrackerSettings) -> Self {
        Self::from_storage(&Storage::in_memory(catalog), clock, settings)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, settings: TrackerSettings) -> Self {
        let progress = Arc::new(ProgressService::new(
            clock,
            settings,
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.progress),
        ));
        let backup = Arc::new(BackupService::new(
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.progress),
        ));

        Self {
            data_file: None,
            progress,
            backup,
        }
    }

    /// Backing file path, when file-backed.
    #[must_use]
    pub fn data_file(&self) -> Option<&std::path::Path> {
        self.data_file.as_deref()
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn backup(&self) -> Arc<BackupService> {
        Arc::clone(&self.backup)
    }
}
