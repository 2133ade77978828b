//! Local key-value storage for client state.
//!
//! Mirrors the browser local storage model: string keys mapping to string
//! values, read and written synchronously. Stores serialize their own values
//! and treat every failure reported here as non-fatal.

pub mod file_storage;
pub mod memory;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

pub use file_storage::FileStorage;
pub use memory::MemoryStorage;

/// Synchronous string key-value storage.
///
/// Implementations use interior mutability so a single handle can be shared
/// between the stores that persist through it.
pub trait KeyValueStorage: Send + Sync + std::fmt::Debug {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// - `StorageError::InvalidKey` - If the key cannot be stored by this backend
    /// - `StorageError::Io` - If the backing medium could not be read
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// - `StorageError::InvalidKey` - If the key cannot be stored by this backend
    /// - `StorageError::Io` - If the backing medium could not be written
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// - `StorageError::InvalidKey` - If the key cannot be stored by this backend
    /// - `StorageError::Io` - If the backing medium could not be written
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Errors that occur during local storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Key is empty or contains characters the backend cannot store
    #[error("Invalid storage key: '{key}'")]
    InvalidKey {
        /// The rejected key
        key: String,
    },

    /// Backend refused the write
    #[error("Storage unavailable: {reason}")]
    Unavailable {
        /// Description of why the backend refused
        reason: String,
    },

    /// Standard I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validates a storage key.
///
/// Keys are restricted to ASCII alphanumerics, `-`, `_` and `.` (not leading)
/// so that every backend can use them verbatim as file names.
///
/// # Errors
///
/// - `StorageError::InvalidKey` - If the key is empty or has other characters
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_store_keys() {
        assert!(validate_key("cinesparkFavorites").is_ok());
        assert!(validate_key("cinesparkTheme").is_ok());
        assert!(validate_key("v2.favorites_backup-1").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_paths() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("with space").is_err());
    }
}
