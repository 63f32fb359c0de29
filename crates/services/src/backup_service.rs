use std::path::Path;
use std::sync::Arc;

use rounds_core::model::{ProgressState, TopicCatalog};
use storage::repository::ProgressRepository;
use storage::snapshot::{self, UTF8_BOM};
use tokio::fs;

use crate::error::BackupError;

/// File name offered for JSON backups.
pub const BACKUP_FILE_NAME: &str = "progress-backup.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Full snapshot in the backing-file shape.
    Json { bom: bool },
    /// Flat `topic,count` rows.
    Csv { bom: bool },
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Json { bom: true }
    }
}

/// What an import replaced the state with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub total_rounds: u64,
    pub log_entries: usize,
    /// Imported keys that are not part of the catalog. They are kept and
    /// counted in the total but never drawn on the board.
    pub unknown_topics: Vec<String>,
}

impl ImportSummary {
    fn from_state(state: &ProgressState, catalog: &TopicCatalog) -> Self {
        Self {
            total_rounds: state.total_rounds(),
            log_entries: state.log().len(),
            unknown_topics: state
                .counts()
                .unknown_topics(catalog)
                .map(|(topic, _)| topic.to_owned())
                .collect(),
        }
    }
}

/// Snapshot export and wholesale import.
#[derive(Clone)]
pub struct BackupService {
    catalog: Arc<TopicCatalog>,
    repo: Arc<dyn ProgressRepository>,
}

impl BackupService {
    #[must_use]
    pub fn new(catalog: Arc<TopicCatalog>, repo: Arc<dyn ProgressRepository>) -> Self {
        Self { catalog, repo }
    }

    /// Encode the current state.
    ///
    /// # Errors
    ///
    /// Returns `BackupError::Storage` if loading or encoding fails.
    pub async fn export(&self, format: ExportFormat) -> Result<Vec<u8>, BackupError> {
        let state = self.repo.load().await?;
        let bytes = match format {
            ExportFormat::Json { bom } => snapshot::encode_json(&state, bom)?,
            ExportFormat::Csv { bom } => {
                let csv = snapshot::encode_csv(&state, &self.catalog);
                let mut out = Vec::with_capacity(csv.len() + UTF8_BOM.len());
                if bom {
                    out.extend_from_slice(UTF8_BOM);
                }
                out.extend_from_slice(csv.as_bytes());
                out
            }
        };
        Ok(bytes)
    }

    /// Export the current state to `path`, overwriting it.
    ///
    /// # Errors
    ///
    /// Returns `BackupError::File` if the file cannot be written.
    pub async fn export_to_path(
        &self,
        path: &Path,
        format: ExportFormat,
    ) -> Result<(), BackupError> {
        let bytes = self.export(format).await?;
        fs::write(path, bytes).await.map_err(|e| BackupError::File {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), ?format, "progress exported");
        Ok(())
    }

    /// Replace the whole state with an imported snapshot and persist it.
    ///
    /// The current state is left untouched if the payload is malformed.
    ///
    /// # Errors
    ///
    /// Returns `BackupError::Import` for malformed payloads.
    /// Returns `BackupError::Storage` if persistence fails.
    pub async fn import(&self, raw: &[u8]) -> Result<ImportSummary, BackupError> {
        let state = snapshot::decode(raw, &self.catalog).inspect_err(|err| {
            tracing::warn!(error = %err, "import rejected");
        })?;
        self.repo.save(&state).await?;

        let summary = ImportSummary::from_state(&state, &self.catalog);
        tracing::info!(
            total_rounds = summary.total_rounds,
            log_entries = summary.log_entries,
            unknown_topics = summary.unknown_topics.len(),
            "progress imported"
        );
        Ok(summary)
    }

    /// Read `path` and import it.
    ///
    /// # Errors
    ///
    /// Returns `BackupError::File` if the file cannot be read, otherwise see
    /// [`BackupService::import`].
    pub async fn import_from_path(&self, path: &Path) -> Result<ImportSummary, BackupError> {
        let raw = fs::read(path).await.map_err(|e| BackupError::File {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.import(&raw).await
    }
}
