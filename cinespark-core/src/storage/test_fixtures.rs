//! Test fixtures for storage testing.
//!
//! Provides standardized storage setup and sample favorites for consistent
//! testing across storage-related modules.

use super::{FileStorage, KeyValueStorage, StorageError};
use crate::favorites::FavoriteItem;

/// Creates file storage inside a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped.
///
/// # Panics
///
/// Panics if temporary directory creation fails.
/// This is acceptable in test fixtures where failures indicate environment issues.
pub fn create_temp_file_storage() -> (tempfile::TempDir, FileStorage) {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(temp_dir.path().join("cinespark"));
    (temp_dir, storage)
}

/// Builds a favorite with deterministic display fields derived from `id`.
pub fn sample_item(id: u64) -> FavoriteItem {
    FavoriteItem::new(id, format!("Movie {id}"))
        .with_poster_path(format!("/poster-{id}.jpg"))
        .with_vote_average((id % 100) as f64 / 10.0)
        .with_release_date(format!("{}-06-15", 1950 + id % 75))
}

/// Storage whose every operation fails, like a browser with storage disabled.
#[derive(Debug, Default)]
pub struct FailingStorage;

impl KeyValueStorage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable {
            reason: "storage disabled".to_string(),
        })
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable {
            reason: "quota exceeded".to_string(),
        })
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable {
            reason: "storage disabled".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_item_is_deterministic() {
        assert_eq!(sample_item(603), sample_item(603));
        assert_eq!(sample_item(603).release_year(), Some(1953));
    }

    #[test]
    fn test_failing_storage_fails() {
        assert!(FailingStorage.get_item("cinesparkTheme").is_err());
        assert!(FailingStorage.set_item("cinesparkTheme", "dark").is_err());
    }
}
