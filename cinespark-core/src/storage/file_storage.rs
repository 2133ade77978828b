//! File-based storage implementation

use std::fs;
use std::path::{Path, PathBuf};

use super::{KeyValueStorage, StorageError, validate_key};

/// File system-based key-value storage.
///
/// Keeps one file per key inside a data directory. Values are written to a
/// temporary sibling first and then renamed over the target, so a reader
/// sees either the old value or the new one.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
    temp_file_suffix: String,
}

impl FileStorage {
    /// Creates file storage rooted at `data_dir`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            temp_file_suffix: ".tmp".to_string(),
        }
    }

    /// Overrides the suffix used for in-flight writes.
    pub fn with_temp_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.temp_file_suffix = suffix.into();
        self
    }

    /// Directory holding the stored values.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn value_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.data_dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.value_path(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.value_path(key)?;
        fs::create_dir_all(&self.data_dir)?;

        let temp_path = self
            .data_dir
            .join(format!("{key}.json{}", self.temp_file_suffix));
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        tracing::trace!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.value_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use super::*;
    use crate::storage::test_fixtures::create_temp_file_storage;

    #[test]
    fn test_missing_key_reads_as_none() {
        let (_temp_dir, storage) = create_temp_file_storage();
        assert_eq!(storage.get_item("cinesparkFavorites").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let (_temp_dir, storage) = create_temp_file_storage();

        storage.set_item("cinesparkTheme", "light").unwrap();
        assert_eq!(
            storage.get_item("cinesparkTheme").unwrap().as_deref(),
            Some("light")
        );

        storage.set_item("cinesparkTheme", "dark").unwrap();
        assert_eq!(
            storage.get_item("cinesparkTheme").unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_set_creates_data_dir_and_leaves_no_temp_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().join("nested").join("cinespark");
        let storage = FileStorage::new(&data_dir);

        storage.set_item("cinesparkFavorites", "[]").unwrap();

        let entries: Vec<_> = fs::read_dir(&data_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, vec!["cinesparkFavorites.json".to_string()]);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let (_temp_dir, storage) = create_temp_file_storage();

        storage.set_item("cinesparkTheme", "dark").unwrap();
        storage.remove_item("cinesparkTheme").unwrap();
        storage.remove_item("cinesparkTheme").unwrap();

        assert_eq!(storage.get_item("cinesparkTheme").unwrap(), None);
    }

    #[test]
    fn test_invalid_key_rejected() {
        let (_temp_dir, storage) = create_temp_file_storage();

        let result = storage.set_item("../escape", "value");
        assert!(matches!(result, Err(StorageError::InvalidKey { .. })));
    }

    #[test]
    fn test_write_to_read_only_dir_fails() {
        let (_temp_dir, storage) = create_temp_file_storage();
        fs::create_dir_all(storage.data_dir()).unwrap();

        let mut perms = fs::metadata(storage.data_dir()).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(storage.data_dir(), perms).unwrap();

        let result = storage.set_item("cinesparkFavorites", "[]");

        // Root ignores directory permissions, so only assert when denied
        if let Err(e) = result {
            assert!(matches!(e, StorageError::Io(_)));
        }

        let mut perms = fs::metadata(storage.data_dir()).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(storage.data_dir(), perms).unwrap();
    }
}
