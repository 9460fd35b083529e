//! Tests for persisted legend preferences
//!
//! Tests cover:
//! - Resolving persisted choices against computed defaults
//! - Read-merge-write on toggle
//! - Malformed persisted data
//! - The file-backed store
//! - Several memories sharing one store

use std::collections::BTreeMap;

use crate::common::series;
use rigtemp::legend::{
    JsonFileStore, KeyValueStore, LegendMemory, MemoryStore, LEGEND_STORAGE_KEY,
};

fn store_with(json: &str) -> MemoryStore {
    let store = MemoryStore::new();
    store.set(LEGEND_STORAGE_KEY, json).unwrap();
    store
}

fn persisted(store: &MemoryStore) -> BTreeMap<String, bool> {
    serde_json::from_str(&store.get(LEGEND_STORAGE_KEY).unwrap()).unwrap()
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("rigtemp-test-{}-{}", name, std::process::id()))
        .join("local_storage.json")
}

// ============================================
// Resolve Tests
// ============================================

#[test]
fn test_persisted_wins_default_fills_unknown_ignored() {
    let memory = LegendMemory::new(store_with(r#"{"A": true, "B": false}"#));
    let current = vec![series("A", &[], false), series("C", &[], true)];

    let state = memory.resolve(&current);

    assert_eq!(
        state.iter().collect::<Vec<_>>(),
        vec![("A", true), ("C", true)]
    );
    assert!(!state.is_visible("B"));
}

#[test]
fn test_resolve_keeps_series_order() {
    let memory = LegendMemory::new(MemoryStore::new());
    let current = vec![
        series("Z", &[], true),
        series("A", &[], false),
        series("M", &[], true),
    ];
    let state = memory.resolve(&current);
    let names: Vec<&str> = state.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Z", "A", "M"]);
}

#[test]
fn test_resolve_does_not_touch_store() {
    let store = store_with(r#"{"B": false}"#);
    let memory = LegendMemory::new(store.clone());
    memory.resolve(&[series("A", &[], true)]);
    assert_eq!(store.get(LEGEND_STORAGE_KEY).unwrap(), r#"{"B": false}"#);
}

#[test]
fn test_malformed_json_treated_as_empty() {
    for raw in ["not json", "[true]", r#"{"A": "yes"}"#, ""] {
        let memory = LegendMemory::new(store_with(raw));
        let state = memory.resolve(&[series("A", &[], true), series("B", &[], false)]);
        assert!(state.is_visible("A"), "input {:?}", raw);
        assert!(!state.is_visible("B"), "input {:?}", raw);
    }
}

// ============================================
// Merge-Write Tests
// ============================================

#[test]
fn test_toggle_merges_without_dropping_entries() {
    let store = store_with(r#"{"A": true, "B": false}"#);
    let memory = LegendMemory::new(store.clone());

    let mut changes = BTreeMap::new();
    changes.insert("C".to_string(), false);
    memory.record_toggle(&changes);

    let mut expected = BTreeMap::new();
    expected.insert("A".to_string(), true);
    expected.insert("B".to_string(), false);
    expected.insert("C".to_string(), false);
    assert_eq!(persisted(&store), expected);
}

#[test]
fn test_toggle_overwrites_same_key() {
    let store = store_with(r#"{"A": true}"#);
    let memory = LegendMemory::new(store.clone());

    let mut changes = BTreeMap::new();
    changes.insert("A".to_string(), false);
    let merged = memory.record_toggle(&changes);

    assert_eq!(merged.get("A"), Some(&false));
    assert_eq!(persisted(&store).get("A"), Some(&false));
}

#[test]
fn test_toggle_on_empty_store() {
    let store = MemoryStore::new();
    let memory = LegendMemory::new(store.clone());

    let mut changes = BTreeMap::new();
    changes.insert("GPU".to_string(), true);
    memory.record_toggle(&changes);

    assert_eq!(persisted(&store).len(), 1);
}

#[test]
fn test_two_memories_share_store_last_writer_wins() {
    let store = MemoryStore::new();
    let first = LegendMemory::new(store.clone());
    let second = LegendMemory::new(store.clone());

    let mut a = BTreeMap::new();
    a.insert("CPU".to_string(), true);
    a.insert("GPU".to_string(), true);
    first.record_toggle(&a);

    let mut b = BTreeMap::new();
    b.insert("GPU".to_string(), false);
    second.record_toggle(&b);

    let map = persisted(&store);
    assert_eq!(map.get("CPU"), Some(&true));
    assert_eq!(map.get("GPU"), Some(&false));
}

// ============================================
// File Store Tests
// ============================================

#[test]
fn test_file_store_roundtrip() {
    let path = temp_path("roundtrip");
    let _ = std::fs::remove_file(&path);

    let store = JsonFileStore::new(&path);
    assert_eq!(store.get(LEGEND_STORAGE_KEY), None);

    store.set(LEGEND_STORAGE_KEY, r#"{"CPU":true}"#).unwrap();
    store.set("other", "value").unwrap();

    let reopened = JsonFileStore::new(&path);
    assert_eq!(
        reopened.get(LEGEND_STORAGE_KEY).as_deref(),
        Some(r#"{"CPU":true}"#)
    );
    assert_eq!(reopened.get("other").as_deref(), Some("value"));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_file_store_with_legend_memory() {
    let path = temp_path("legend");
    let _ = std::fs::remove_file(&path);

    let memory = LegendMemory::new(JsonFileStore::new(&path));
    let mut changes = BTreeMap::new();
    changes.insert("DDR".to_string(), false);
    memory.record_toggle(&changes);

    let other = LegendMemory::new(JsonFileStore::new(&path));
    let state = other.resolve(&[series("DDR", &[], true)]);
    assert!(!state.is_visible("DDR"));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_file_store_corrupt_file_reads_empty() {
    let path = temp_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{{{").unwrap();

    let store = JsonFileStore::new(&path);
    assert_eq!(store.get(LEGEND_STORAGE_KEY), None);
    store.set(LEGEND_STORAGE_KEY, "{}").unwrap();
    assert_eq!(store.get(LEGEND_STORAGE_KEY).as_deref(), Some("{}"));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
