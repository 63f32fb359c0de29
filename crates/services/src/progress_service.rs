use std::sync::Arc;

use chrono::NaiveDate;
use rounds_core::board::ProgressBoard;
use rounds_core::labels::ShortLabels;
use rounds_core::model::{
    AddOutcome, LogEntry, ProgressError, ProgressState, ResetPolicy, TopicCatalog,
    TrackerSettings,
};
use rounds_core::palette::Palette;
use storage::repository::ProgressRepository;

use crate::Clock;
use crate::error::ProgressServiceError;

/// Orchestrates one load-mutate-save cycle per user action.
///
/// Holds no state of its own beyond configuration: every call reads the
/// repository, applies the change, and writes it back before returning.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    settings: TrackerSettings,
    catalog: Arc<TopicCatalog>,
    labels: Arc<ShortLabels>,
    palette: Palette,
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        settings: TrackerSettings,
        catalog: Arc<TopicCatalog>,
        repo: Arc<dyn ProgressRepository>,
    ) -> Self {
        let labels = Arc::new(ShortLabels::build(&catalog));
        Self {
            clock,
            settings,
            catalog,
            labels,
            palette: Palette::default(),
            repo,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<TopicCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn settings(&self) -> TrackerSettings {
        self.settings
    }

    /// Default date for new records.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Load the current state (self-healing on read).
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn load(&self) -> Result<ProgressState, ProgressServiceError> {
        Ok(self.repo.load().await?)
    }

    /// Record `delta` rounds for `topic` on `date`.
    ///
    /// A zero delta is a no-op and does not touch storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Progress` for topics outside the catalog.
    /// Returns `ProgressServiceError::Storage` if persistence fails.
    pub async fn add_rounds(
        &self,
        topic: &str,
        delta: i64,
        date: NaiveDate,
    ) -> Result<AddOutcome, ProgressServiceError> {
        if delta == 0 {
            if !self.catalog.contains(topic) {
                return Err(ProgressError::UnknownTopic(topic.to_owned()).into());
            }
            tracing::debug!(topic, "zero-round update ignored");
            return Ok(AddOutcome::Unchanged);
        }

        let mut state = self.repo.load().await?;
        let outcome = state.add_rounds(&self.catalog, topic, delta, date)?;
        if let AddOutcome::Applied { count } = outcome {
            self.repo.save(&state).await?;
            tracing::info!(topic, delta, count, %date, "rounds recorded");
        }
        Ok(outcome)
    }

    /// Record `delta` rounds for `topic` dated today.
    ///
    /// # Errors
    ///
    /// See [`ProgressService::add_rounds`].
    pub async fn add_rounds_today(
        &self,
        topic: &str,
        delta: i64,
    ) -> Result<AddOutcome, ProgressServiceError> {
        self.add_rounds(topic, delta, self.today()).await
    }

    /// Zero every count using the configured reset policy.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if persistence fails.
    pub async fn reset_all(&self) -> Result<ProgressState, ProgressServiceError> {
        self.reset_with(self.settings.reset_policy()).await
    }

    /// Zero every count using an explicit reset policy.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if persistence fails.
    pub async fn reset_with(
        &self,
        policy: ResetPolicy,
    ) -> Result<ProgressState, ProgressServiceError> {
        let mut state = self.repo.load().await?;
        state.reset(policy);
        self.repo.save(&state).await?;
        tracing::info!(clear_log = policy.clears_log(), "progress reset");
        Ok(state)
    }

    /// Render data for the progress board.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn board(&self) -> Result<ProgressBoard, ProgressServiceError> {
        let state = self.repo.load().await?;
        Ok(self.board_for(&state))
    }

    /// Render data for an already-loaded state.
    #[must_use]
    pub fn board_for(&self, state: &ProgressState) -> ProgressBoard {
        ProgressBoard::build(
            state,
            &self.catalog,
            &self.labels,
            &self.palette,
            self.settings.min_nonzero_pct(),
        )
    }

    /// Most recent log entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn recent_log(&self, limit: usize) -> Result<Vec<LogEntry>, ProgressServiceError> {
        let state = self.repo.load().await?;
        Ok(state.log().iter().rev().take(limit).cloned().collect())
    }

    /// Sum of all counts, including imported topics outside the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository fails.
    pub async fn total_rounds(&self) -> Result<u64, ProgressServiceError> {
        Ok(self.repo.load().await?.total_rounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rounds_core::time::{fixed_clock, fixed_today};
    use storage::repository::{InMemoryRepository, StorageError};

    fn service_with_repo() -> (ProgressService, InMemoryRepository) {
        let catalog = Arc::new(TopicCatalog::default());
        let repo = InMemoryRepository::new(Arc::clone(&catalog));
        let service = ProgressService::new(
            fixed_clock(),
            TrackerSettings::default(),
            catalog,
            Arc::new(repo.clone()),
        );
        (service, repo)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn zero_delta_skips_save() {
        let (service, repo) = service_with_repo();

        let outcome = service.add_rounds("法務", 0, fixed_today()).await.unwrap();

        assert_eq!(outcome, AddOutcome::Unchanged);
        assert_eq!(repo.save_count(), 0);
        assert!(service.load().await.unwrap().log().is_empty());
    }

    #[tokio::test]
    async fn each_update_is_saved_immediately() {
        let (service, repo) = service_with_repo();

        service.add_rounds("法務", 3, fixed_today()).await.unwrap();
        let outcome = service.add_rounds("法務", -5, fixed_today()).await.unwrap();

        assert_eq!(outcome, AddOutcome::Applied { count: 0 });
        assert_eq!(repo.save_count(), 2);
        let state = repo.load().await.unwrap();
        assert_eq!(state.count("法務"), 0);
        let deltas: Vec<i64> = state.log().iter().map(|e| e.delta).collect();
        assert_eq!(deltas, vec![3, -5]);
    }

    #[tokio::test]
    async fn unknown_topic_is_reported() {
        let (service, repo) = service_with_repo();

        for delta in [0, 1] {
            let err = service.add_rounds("料理", delta, fixed_today()).await.unwrap_err();
            assert!(matches!(
                err,
                ProgressServiceError::Progress(ProgressError::UnknownTopic(_))
            ));
        }
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn network_example_end_to_end() {
        let (service, _repo) = service_with_repo();

        service
            .add_rounds("ネットワーク", 2, date(2024, 1, 10))
            .await
            .unwrap();
        service
            .add_rounds("ネットワーク", -1, date(2024, 1, 11))
            .await
            .unwrap();

        let state = service.load().await.unwrap();
        assert_eq!(state.count("ネットワーク"), 1);
        assert_eq!(
            state.log(),
            &[
                LogEntry::new(date(2024, 1, 10), "ネットワーク", 2),
                LogEntry::new(date(2024, 1, 11), "ネットワーク", -1),
            ]
        );
        assert_eq!(service.total_rounds().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn reset_keeps_log_by_default() {
        let (service, _repo) = service_with_repo();
        service.add_rounds_today("データベース", 2).await.unwrap();

        let state = service.reset_all().await.unwrap();
        assert_eq!(state.total_rounds(), 0);
        assert_eq!(state.log().len(), 1);

        let state = service.reset_with(ResetPolicy::ClearLog).await.unwrap();
        assert!(state.log().is_empty());
    }

    #[tokio::test]
    async fn recent_log_is_newest_first() {
        let (service, _repo) = service_with_repo();
        service.add_rounds("法務", 1, date(2024, 1, 1)).await.unwrap();
        service.add_rounds("法務", 2, date(2024, 1, 2)).await.unwrap();
        service.add_rounds("法務", 3, date(2024, 1, 3)).await.unwrap();

        let recent = service.recent_log(2).await.unwrap();
        let deltas: Vec<i64> = recent.iter().map(|e| e.delta).collect();
        assert_eq!(deltas, vec![3, 2]);
    }

    struct ReadOnlyRepo(InMemoryRepository);

    #[async_trait::async_trait]
    impl ProgressRepository for ReadOnlyRepo {
        async fn load(&self) -> Result<ProgressState, StorageError> {
            self.0.load().await
        }

        async fn save(&self, _state: &ProgressState) -> Result<(), StorageError> {
            Err(StorageError::Connection("read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn save_failures_are_surfaced() {
        let catalog = Arc::new(TopicCatalog::default());
        let repo = ReadOnlyRepo(InMemoryRepository::new(Arc::clone(&catalog)));
        let service = ProgressService::new(
            fixed_clock(),
            TrackerSettings::default(),
            catalog,
            Arc::new(repo),
        );

        let err = service.add_rounds_today("法務", 1).await.unwrap_err();

        assert!(matches!(err, ProgressServiceError::Storage(_)));
        assert_eq!(service.total_rounds().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn board_reflects_latest_counts() {
        let (service, _repo) = service_with_repo();
        service.add_rounds_today("セキュリティ", 4).await.unwrap();
        service.add_rounds_today("法務", 1).await.unwrap();

        let board = service.board().await.unwrap();
        let security = board
            .columns
            .iter()
            .find(|c| c.topic == "セキュリティ")
            .unwrap();
        let law = board.columns.iter().find(|c| c.topic == "法務").unwrap();

        assert!((security.height_pct - 100.0).abs() < 1e-9);
        assert!((law.height_pct - 25.0).abs() < 1e-9);
        assert_eq!(board.total, 5);
    }
}
