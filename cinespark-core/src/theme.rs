//! Persisted color theme preference.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::lifecycle::{Lifecycle, StoreError};
use crate::storage::KeyValueStorage;

/// Storage key holding the theme preference.
pub const THEME_STORAGE_KEY: &str = "cinesparkTheme";

/// Color theme of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(format!("Invalid theme: '{s}'. Valid options are: dark, light")),
        }
    }
}

/// Theme preference with write-through persistence.
///
/// Shares the favorites lifecycle: changes before [`load`](Self::load) are
/// rejected so the stored preference is never overwritten by the default.
#[derive(Debug)]
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    theme: Theme,
    lifecycle: Lifecycle,
}

impl ThemeStore {
    /// Creates an unloaded store holding the default theme.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, THEME_STORAGE_KEY)
    }

    /// Creates an unloaded store persisting under a custom key.
    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            theme: Theme::default(),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Creates a store and loads the persisted preference.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Reads the persisted preference.
    ///
    /// Only the exact value `dark` loads as dark; any other non-empty value
    /// loads as light. A missing or empty value keeps the default.
    pub fn load(&mut self) -> Theme {
        if self.lifecycle.is_ready() {
            return self.theme;
        }

        self.theme = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) if raw.is_empty() => Theme::default(),
            Ok(Some(raw)) if raw == Theme::Dark.as_str() => Theme::Dark,
            Ok(Some(raw)) => {
                if raw != Theme::Light.as_str() {
                    tracing::debug!(stored = %raw, "Unrecognized stored theme, using light");
                }
                Theme::Light
            }
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read theme");
                Theme::default()
            }
        };

        self.lifecycle = Lifecycle::Ready;
        self.theme
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Sets and persists the theme.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotReady` - If the store has not been loaded
    pub fn set(&mut self, theme: Theme) -> Result<(), StoreError> {
        if !self.lifecycle.is_ready() {
            return Err(StoreError::NotReady);
        }

        self.theme = theme;
        if let Err(e) = self.storage.set_item(&self.key, theme.as_str()) {
            tracing::warn!(error = %e, "Could not persist theme");
        }
        Ok(())
    }

    /// Switches between dark and light, returning the new theme.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotReady` - If the store has not been loaded
    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::storage::test_fixtures::FailingStorage;

    #[test]
    fn test_default_is_dark() {
        let store = ThemeStore::open(Arc::new(MemoryStorage::new()));
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ThemeStore::open(storage.clone());

        assert_eq!(store.toggle().unwrap(), Theme::Light);
        assert_eq!(
            storage.get_item(THEME_STORAGE_KEY).unwrap().as_deref(),
            Some("light")
        );

        let reopened = ThemeStore::open(storage);
        assert_eq!(reopened.theme(), Theme::Light);
    }

    #[test]
    fn test_only_exact_dark_loads_dark() {
        for (stored, expected) in [
            ("dark", Theme::Dark),
            ("light", Theme::Light),
            ("sepia", Theme::Light),
            ("Dark", Theme::Light),
            ("", Theme::Dark),
        ] {
            let storage = Arc::new(MemoryStorage::with_item(THEME_STORAGE_KEY, stored));
            assert_eq!(ThemeStore::open(storage).theme(), expected, "stored {stored:?}");
        }
    }

    #[test]
    fn test_set_rejected_before_load() {
        let storage = Arc::new(MemoryStorage::with_item(THEME_STORAGE_KEY, "light"));
        let mut store = ThemeStore::new(storage.clone());

        assert_eq!(store.set(Theme::Dark), Err(StoreError::NotReady));
        assert_eq!(
            storage.get_item(THEME_STORAGE_KEY).unwrap().as_deref(),
            Some("light")
        );
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn test_custom_key() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ThemeStore::with_key(storage.clone(), "profile-2.theme");
        store.load();
        store.set(Theme::Light).unwrap();

        assert_eq!(storage.get_item(THEME_STORAGE_KEY).unwrap(), None);
        assert_eq!(
            storage.get_item("profile-2.theme").unwrap().as_deref(),
            Some("light")
        );
    }

    #[test]
    fn test_failing_storage_keeps_memory_theme() {
        let mut store = ThemeStore::open(Arc::new(FailingStorage));
        assert_eq!(store.toggle().unwrap(), Theme::Light);
        assert_eq!(store.theme(), Theme::Light);
    }
}
