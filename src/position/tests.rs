use super::*;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn missing_file_yields_empty_store() {
    let dir = tempdir().unwrap();
    let store = PositionStore::load(dir.path().join("position.txt"));
    assert!(store.is_empty());
}

#[test]
fn corrupt_file_yields_empty_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("position.txt");
    std::fs::write(&path, "this is { not toml").unwrap();

    let store = PositionStore::load(&path);
    assert!(store.is_empty());
}

#[test]
fn load_removes_the_file_after_a_successful_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("position.txt");

    let mut store = PositionStore::load(&path);
    store.record("file:///a.mp3", Duration::from_millis(1234));
    store.save().unwrap();
    assert!(path.exists());

    let reloaded = PositionStore::load(&path);
    assert_eq!(reloaded.len(), 1);
    assert!(!path.exists());
}

#[test]
fn save_then_load_round_trips_the_mapping() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("position.txt");

    let mut store = PositionStore::load(&path);
    store.record("file:///music/one.mp3", Duration::from_millis(90_500));
    store.record("file:///music/two.wav", Duration::from_millis(3));
    store.record("file:///odd name & (chars).mp3", Duration::ZERO);
    store.save().unwrap();

    let reloaded = PositionStore::load(&path);
    assert_eq!(reloaded.len(), 3);
    assert_eq!(
        reloaded.offset_for("file:///music/one.mp3"),
        Some(Duration::from_millis(90_500))
    );
    assert_eq!(
        reloaded.offset_for("file:///music/two.wav"),
        Some(Duration::from_millis(3))
    );
    assert_eq!(
        reloaded.offset_for("file:///odd name & (chars).mp3"),
        Some(Duration::ZERO)
    );
}

#[test]
fn record_is_an_upsert() {
    let dir = tempdir().unwrap();
    let mut store = PositionStore::load(dir.path().join("position.txt"));

    store.record("file:///a.mp3", Duration::from_millis(100));
    store.record("file:///a.mp3", Duration::from_millis(250));
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.offset_for("file:///a.mp3"),
        Some(Duration::from_millis(250))
    );
}

#[test]
fn forget_clears_a_single_entry() {
    let dir = tempdir().unwrap();
    let mut store = PositionStore::load(dir.path().join("position.txt"));

    store.record("file:///a.mp3", Duration::from_millis(100));
    store.record("file:///b.mp3", Duration::from_millis(200));
    store.forget("file:///a.mp3");

    assert_eq!(store.offset_for("file:///a.mp3"), None);
    assert_eq!(
        store.offset_for("file:///b.mp3"),
        Some(Duration::from_millis(200))
    );

    // Forgetting an unknown URL is a no-op.
    store.forget("file:///never-seen.mp3");
    assert_eq!(store.len(), 1);
}

#[test]
fn save_overwrites_prior_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("position.txt");

    let mut store = PositionStore::load(&path);
    store.record("file:///old.mp3", Duration::from_millis(1));
    store.save().unwrap();

    let mut second = PositionStore::load(&path);
    second.forget("file:///old.mp3");
    second.record("file:///new.mp3", Duration::from_millis(2));
    second.save().unwrap();

    let third = PositionStore::load(&path);
    assert_eq!(third.offset_for("file:///old.mp3"), None);
    assert_eq!(
        third.offset_for("file:///new.mp3"),
        Some(Duration::from_millis(2))
    );
}
