use std::sync::Arc;

use chrono::NaiveDate;
use rounds_core::model::{ProgressState, TopicCatalog};
use storage::repository::{ProgressRepository, Storage, StorageError};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn board_view_smoke_renders_columns_and_total() {
    let mut harness = setup_view_harness(ViewKind::Board);
    let progress = harness.services.progress();
    progress
        .add_rounds("ネットワーク", 2, date(2024, 1, 10))
        .await
        .expect("add");
    progress
        .add_rounds("法務", 1, date(2024, 1, 10))
        .await
        .expect("add");

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Total rounds: 3"), "missing total in {html}");
    assert!(html.contains("ネット"), "missing short label in {html}");
    assert!(html.contains("システ2"), "missing suffixed label in {html}");
    assert!(
        html.contains("height: 100.0%; background: #22C55E;"),
        "missing full-height network bar in {html}"
    );
    assert!(html.contains("Record"), "missing record button in {html}");
    assert!(html.contains("Reset all counts"), "missing reset in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn board_view_smoke_defaults_form_to_today() {
    let mut harness = setup_view_harness(ViewKind::Board);

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("2024-01-10"), "missing default date in {html}");
    assert!(html.contains("基礎理論"), "missing first topic option in {html}");
    assert!(html.contains("Total rounds: 0"), "missing zero total in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn log_view_smoke_lists_newest_first() {
    let mut harness = setup_view_harness(ViewKind::Log);
    let progress = harness.services.progress();
    progress
        .add_rounds("ネットワーク", 2, date(2024, 1, 10))
        .await
        .expect("add");
    progress
        .add_rounds("ネットワーク", -1, date(2024, 1, 11))
        .await
        .expect("add");

    harness.settle().await;
    let html = harness.render();

    let newer = html.find("2024-01-11").expect("newer entry rendered");
    let older = html.find("2024-01-10").expect("older entry rendered");
    assert!(newer < older, "log should be newest first: {html}");
    assert!(html.contains("+2"), "missing signed delta in {html}");
    assert!(html.contains("log-delta-down"), "missing decrement style in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn log_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Log);

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("No changes recorded yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn backup_view_smoke_offers_default_file_name() {
    let mut harness = setup_view_harness(ViewKind::Backup);

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("progress-backup.json"), "missing file name in {html}");
    assert!(html.contains("Export JSON"), "missing export in {html}");
    assert!(html.contains("Export CSV"), "missing csv export in {html}");
    assert!(html.contains("Import"), "missing import in {html}");
}

struct FailingProgressRepo;

#[async_trait::async_trait]
impl ProgressRepository for FailingProgressRepo {
    async fn load(&self) -> Result<ProgressState, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn save(&self, _state: &ProgressState) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn board_view_smoke_renders_error_state() {
    let storage = Storage {
        catalog: Arc::new(TopicCatalog::default()),
        progress: Arc::new(FailingProgressRepo),
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::Board, &storage);

    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}
