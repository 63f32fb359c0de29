use std::sync::Arc;

use rounds_core::model::{ProgressState, ResetPolicy, TopicCatalog};
use rounds_core::time::fixed_today;
use storage::json::{DEFAULT_FILE_NAME, JsonFileRepository};
use storage::repository::{ProgressRepository, Storage};
use storage::snapshot::{self, UTF8_BOM};

fn catalog() -> Arc<TopicCatalog> {
    Arc::new(TopicCatalog::default())
}

#[tokio::test]
async fn fresh_store_has_every_topic_at_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = catalog();
    let storage = Storage::json_file(dir.path().join(DEFAULT_FILE_NAME), Arc::clone(&catalog));

    let state = storage.progress.load().await.expect("load");

    for topic in catalog.iter() {
        assert_eq!(state.counts().get(topic), Some(0), "{topic}");
    }
    assert!(state.log().is_empty());
}

#[tokio::test]
async fn garbage_and_empty_files_are_repaired_on_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = catalog();

    for contents in ["", "   \n", "{not json", "[1, 2, 3]", r#"{"counts": 5}"#] {
        let path = dir.path().join(DEFAULT_FILE_NAME);
        std::fs::write(&path, contents).expect("write");
        let repo = JsonFileRepository::new(&path, Arc::clone(&catalog));

        let state = repo.load().await.expect("load never fails on bad content");
        assert_eq!(state, ProgressState::empty(&catalog), "{contents:?}");

        let healed = std::fs::read(&path).expect("read back");
        assert_eq!(
            snapshot::decode(&healed, &catalog).expect("healed file decodes"),
            state
        );
    }
}

#[tokio::test]
async fn malformed_rows_are_dropped_without_losing_the_rest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(DEFAULT_FILE_NAME);
    std::fs::write(
        &path,
        r#"{
            "counts": {"法務": 5, "データベース": 1.5, "セキュリティ": "3"},
            "log": [
                {"date": "2024-01-10", "topic": "法務"},
                {"date": "2024-01-10", "topic": "法務", "delta": 5}
            ]
        }"#,
    )
    .expect("write");
    let catalog = catalog();
    let repo = JsonFileRepository::new(&path, Arc::clone(&catalog));

    let state = repo.load().await.expect("load");

    assert_eq!(state.count("法務"), 5);
    assert_eq!(state.count("データベース"), 0);
    assert_eq!(state.count("セキュリティ"), 0);
    assert_eq!(state.log().len(), 1);
    assert_eq!(state.log()[0].delta, 5);

    let on_disk = std::fs::read_to_string(&path).expect("read back");
    assert!(on_disk.contains("\"法務\": 5"), "{on_disk}");
    let reloaded = JsonFileRepository::new(&path, Arc::clone(&catalog))
        .load()
        .await
        .expect("reload");
    assert_eq!(reloaded, state);
}

#[tokio::test]
async fn log_missing_delta_keeps_counts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(DEFAULT_FILE_NAME);
    std::fs::write(
        &path,
        r#"{"counts": {"法務": 5}, "log": [{"date": "2024-01-10", "topic": "法務"}]}"#,
    )
    .expect("write");

    let state = JsonFileRepository::new(&path, catalog())
        .load()
        .await
        .expect("load");

    assert_eq!(state.count("法務"), 5);
    assert!(state.log().is_empty());
}

#[tokio::test]
async fn load_backfills_missing_topics_and_rewrites_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(DEFAULT_FILE_NAME);
    std::fs::write(&path, r#"{"counts": {"法務": 3, "旧科目": 1}}"#).expect("write");
    let catalog = catalog();
    let repo = JsonFileRepository::new(&path, Arc::clone(&catalog));

    let state = repo.load().await.expect("load");

    assert_eq!(state.count("法務"), 3);
    assert_eq!(state.count("旧科目"), 1);
    assert_eq!(state.counts().len(), catalog.len() + 1);

    let on_disk = std::fs::read_to_string(&path).expect("read back");
    assert!(on_disk.contains("\"基礎理論\": 0"), "{on_disk}");
    assert!(on_disk.contains("\"log\": []"), "{on_disk}");
}

#[tokio::test]
async fn bom_prefixed_file_loads() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(DEFAULT_FILE_NAME);
    let mut raw = UTF8_BOM.to_vec();
    raw.extend_from_slice(r#"{"counts": {"データベース": 2}, "log": []}"#.as_bytes());
    std::fs::write(&path, raw).expect("write");

    let state = JsonFileRepository::new(&path, catalog())
        .load()
        .await
        .expect("load");
    assert_eq!(state.count("データベース"), 2);
}

#[tokio::test]
async fn saved_state_survives_a_new_repository() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(DEFAULT_FILE_NAME);
    let catalog = catalog();

    let repo = JsonFileRepository::new(&path, Arc::clone(&catalog));
    let mut state = repo.load().await.expect("load");
    state
        .add_rounds(&catalog, "ネットワーク", 4, fixed_today())
        .expect("add");
    state.reset(ResetPolicy::KeepLog);
    state
        .add_rounds(&catalog, "セキュリティ", 1, fixed_today())
        .expect("add");
    repo.save(&state).await.expect("save");

    let reopened = JsonFileRepository::new(&path, Arc::clone(&catalog));
    let reloaded = reopened.load().await.expect("reload");
    assert_eq!(reloaded, state);
    assert_eq!(reloaded.log().len(), 2);
    assert_eq!(reloaded.total_rounds(), 1);
}
