//! Favorites and theme persistence across restarts on real file storage.

use std::fs;
use std::sync::Arc;

use cinespark_core::storage::test_fixtures::{create_temp_file_storage, sample_item};
use cinespark_core::{
    FavoritesStore, FileStorage, KeyValueStorage, Lifecycle, MemoryStorage, MovieId, StoreError,
    Theme, ThemeStore, ToggleOutcome,
};
use proptest::prelude::*;

fn reopen(storage: &FileStorage) -> FavoritesStore {
    FavoritesStore::open(Arc::new(storage.clone()))
}

#[test]
fn test_favorites_survive_restart() {
    let (_temp_dir, storage) = create_temp_file_storage();

    let mut store = reopen(&storage);
    assert_eq!(store.count(), 0);
    store.add(sample_item(603)).unwrap();
    store.add(sample_item(27205)).unwrap();
    store.add(sample_item(194)).unwrap();
    store.remove(MovieId(27205)).unwrap();
    drop(store);

    let restarted = reopen(&storage);
    let ids: Vec<u64> = restarted.items().iter().map(|item| item.id.as_u64()).collect();
    assert_eq!(ids, vec![603, 194]);
    assert_eq!(restarted.get(MovieId(603)), Some(&sample_item(603)));
}

#[test]
fn test_stored_value_is_plain_json_array() {
    let (_temp_dir, storage) = create_temp_file_storage();

    let mut store = reopen(&storage);
    store.add(sample_item(603)).unwrap();

    let path = storage.data_dir().join("cinesparkFavorites.json");
    let raw = fs::read_to_string(path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value[0]["id"], 603);
    assert_eq!(value[0]["title"], "Movie 603");
    assert_eq!(value[0]["poster_path"], "/poster-603.jpg");
    assert_eq!(value.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_malformed_file_reads_as_empty_until_next_change() {
    let (_temp_dir, storage) = create_temp_file_storage();
    storage.set_item("cinesparkFavorites", "{not json").unwrap();

    let mut store = reopen(&storage);
    assert_eq!(store.lifecycle(), Lifecycle::Ready);
    assert_eq!(store.count(), 0);
    assert_eq!(
        storage.get_item("cinesparkFavorites").unwrap().as_deref(),
        Some("{not json")
    );

    store.add(sample_item(1)).unwrap();
    assert_eq!(reopen(&storage).count(), 1);
}

#[test]
fn test_unknown_fields_survive_rewrite() {
    let (_temp_dir, storage) = create_temp_file_storage();
    storage
        .set_item(
            "cinesparkFavorites",
            r#"[{"id": 603, "title": "The Matrix", "overview": "Neo", "genre_ids": [28, 878]}]"#,
        )
        .unwrap();

    let mut store = reopen(&storage);
    store.add(sample_item(2)).unwrap();

    let restarted = reopen(&storage);
    let matrix = restarted.get(MovieId(603)).unwrap();
    assert_eq!(matrix.extra["overview"], "Neo");
    assert_eq!(matrix.extra["genre_ids"][1], 878);
    assert_eq!(matrix.poster_path, None);
}

#[test]
fn test_duplicate_ids_on_disk_are_collapsed() {
    let (_temp_dir, storage) = create_temp_file_storage();
    storage
        .set_item(
            "cinesparkFavorites",
            r#"[{"id": 1, "title": "First"}, {"id": 1, "title": "Second"}, {"id": 2, "title": "Other"}]"#,
        )
        .unwrap();

    let store = reopen(&storage);
    assert_eq!(store.count(), 2);
    assert_eq!(store.get(MovieId(1)).unwrap().title, "First");
}

#[test]
fn test_mutation_before_load_leaves_disk_untouched() {
    let (_temp_dir, storage) = create_temp_file_storage();
    reopen(&storage).add(sample_item(7)).unwrap();

    let mut store = FavoritesStore::new(Arc::new(storage.clone()));
    assert_eq!(store.toggle(sample_item(7)), Err(StoreError::NotReady));
    assert_eq!(store.add(sample_item(8)), Err(StoreError::NotReady));

    assert_eq!(store.load(), 1);
    assert_eq!(store.toggle(sample_item(7)), Ok(ToggleOutcome::Removed));
    assert_eq!(reopen(&storage).count(), 0);
}

#[test]
fn test_theme_and_favorites_share_data_dir() {
    let (_temp_dir, storage) = create_temp_file_storage();
    let shared: Arc<dyn KeyValueStorage> = Arc::new(storage.clone());

    let mut theme = ThemeStore::open(shared.clone());
    let mut favorites = FavoritesStore::open(shared);
    theme.toggle().unwrap();
    favorites.add(sample_item(42)).unwrap();

    let shared: Arc<dyn KeyValueStorage> = Arc::new(storage);
    assert_eq!(ThemeStore::open(shared.clone()).theme(), Theme::Light);
    assert!(FavoritesStore::open(shared).is_favorite(MovieId(42)));
}

#[derive(Debug, Clone)]
enum Operation {
    Add(u64),
    Remove(u64),
    Toggle(u64),
}

fn operation() -> impl Strategy<Value = Operation> {
    // Small id space so operations collide often
    prop_oneof![
        (0u64..8).prop_map(Operation::Add),
        (0u64..8).prop_map(Operation::Remove),
        (0u64..8).prop_map(Operation::Toggle),
    ]
}

proptest! {
    #[test]
    fn prop_store_matches_model_and_reloads_identically(
        operations in prop::collection::vec(operation(), 0..40)
    ) {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = FavoritesStore::open(storage.clone());
        let mut model: Vec<u64> = Vec::new();

        for operation in operations {
            match operation {
                Operation::Add(id) => {
                    let changed = store.add(sample_item(id)).unwrap();
                    prop_assert_eq!(changed, !model.contains(&id));
                    if changed {
                        model.push(id);
                    }
                }
                Operation::Remove(id) => {
                    let changed = store.remove(MovieId(id)).unwrap();
                    prop_assert_eq!(changed, model.contains(&id));
                    model.retain(|existing| *existing != id);
                }
                Operation::Toggle(id) => {
                    let outcome = store.toggle(sample_item(id)).unwrap();
                    if model.contains(&id) {
                        prop_assert_eq!(outcome, ToggleOutcome::Removed);
                        model.retain(|existing| *existing != id);
                    } else {
                        prop_assert_eq!(outcome, ToggleOutcome::Added);
                        model.push(id);
                    }
                }
            }
        }

        let ids: Vec<u64> = store.items().iter().map(|item| item.id.as_u64()).collect();
        prop_assert_eq!(&ids, &model);

        let reloaded = FavoritesStore::open(storage);
        prop_assert_eq!(reloaded.items(), store.items());
    }
}
