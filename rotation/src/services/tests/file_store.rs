//! Tests for FileRotationStore
//!
//! Each test works in its own temp directory.

use chrono::Utc;
use shared::GuildId;
use tempfile::TempDir;
use tokio::fs;

use super::common::{cycle, exercise_contract, members, open_with};
use crate::error::RotationError;
use crate::services::file_store::FileRotationStore;
use crate::traits::RotationStore;

async fn setup_store() -> (TempDir, FileRotationStore) {
    let dir = TempDir::new().unwrap();
    let store = FileRotationStore::open(dir.path().join("rotations.json"))
        .await
        .unwrap();
    (dir, store)
}

#[tokio::test]
async fn test_file_store_contract() {
    let (_dir, store) = setup_store().await;
    exercise_contract(&store).await;
}

#[tokio::test]
async fn test_missing_file_starts_empty() {
    let (_dir, store) = setup_store().await;
    assert!(!store.path().exists());
    assert!(store
        .latest_rotation_for_guild(&GuildId::from("guild"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_reopen_restores_state() {
    let (dir, store) = setup_store().await;
    let rotation = open_with(&store, "guild", &["a", "b", "c"]).await;
    store
        .finalize_rotation(rotation.id, cycle(&rotation.members), Utc::now())
        .await
        .unwrap();
    drop(store);

    let reopened = FileRotationStore::open(dir.path().join("rotations.json"))
        .await
        .unwrap();
    let restored = reopened.get_rotation(rotation.id).await.unwrap().unwrap();

    assert!(!restored.is_open());
    assert_eq!(restored.members, members(&["a", "b", "c"]));
    assert_eq!(restored.assignments, Some(cycle(&rotation.members)));
}

#[tokio::test]
async fn test_no_temp_file_left_behind() {
    let (dir, store) = setup_store().await;
    open_with(&store, "guild", &["a"]).await;

    let mut entries = fs::read_dir(dir.path()).await.unwrap();
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    assert_eq!(names, vec!["rotations.json".to_string()]);
}

#[tokio::test]
async fn test_rejected_mutation_leaves_file_untouched() {
    let (_dir, store) = setup_store().await;
    let rotation = open_with(&store, "guild", &["a"]).await;
    let before = fs::read_to_string(store.path()).await.unwrap();

    let result = store.add_member(rotation.id, "a".into()).await;
    assert!(matches!(result, Err(RotationError::AlreadyJoined { .. })));
    assert_eq!(fs::read_to_string(store.path()).await.unwrap(), before);
}

#[tokio::test]
async fn test_failed_write_keeps_previous_state() {
    let (_dir, store) = setup_store().await;
    let rotation = open_with(&store, "guild", &["a"]).await;

    // A non-empty directory in place of the snapshot makes the rename fail
    fs::remove_file(store.path()).await.unwrap();
    fs::create_dir_all(store.path().join("occupied")).await.unwrap();

    let result = store.add_member(rotation.id, "b".into()).await;
    assert!(matches!(result, Err(RotationError::IoError(_))));

    let cached = store.get_rotation(rotation.id).await.unwrap().unwrap();
    assert_eq!(cached.members, members(&["a"]));

    // The half-finished write is cleaned up
    assert!(!store.path().with_file_name("rotations.json.tmp").exists());
}

#[tokio::test]
async fn test_path_without_file_name_is_rejected() {
    let dir = TempDir::new().unwrap();

    let result = FileRotationStore::open(dir.path().join("..")).await;
    assert!(matches!(result, Err(RotationError::ConfigurationError { .. })));
}

#[tokio::test]
async fn test_corrupt_snapshot_is_a_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rotations.json");
    fs::write(&path, "{ not json").await.unwrap();

    let result = FileRotationStore::open(&path).await;
    assert!(matches!(result, Err(RotationError::JsonError(_))));
}
