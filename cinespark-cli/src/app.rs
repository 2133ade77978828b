//! Application context shared by every command.

use std::sync::Arc;
use std::time::Duration;

use cinespark_core::{CinesparkConfig, FavoritesStore, FileStorage, KeyValueStorage, ThemeStore};
use cinespark_search::{CatalogError, MovieCatalogService};

/// Loaded client state plus the catalog used to fill views.
///
/// Both stores are loaded on construction, so commands never see them in
/// the uninitialized state.
#[derive(Debug)]
pub struct App {
    pub catalog: MovieCatalogService,
    pub favorites: FavoritesStore,
    pub theme: ThemeStore,
    pub debounce: Duration,
}

impl App {
    /// Builds the context for a configuration, persisting under its data directory.
    ///
    /// # Errors
    ///
    /// - `CatalogError::InvalidConfiguration` - If the catalog client cannot be built
    pub fn new(config: &CinesparkConfig) -> Result<Self, CatalogError> {
        let storage = FileStorage::new(config.storage.data_dir.clone())
            .with_temp_file_suffix(config.storage.temp_file_suffix);
        let catalog = MovieCatalogService::from_config(config)?;

        Ok(Self::with_parts(catalog, Arc::new(storage), config))
    }

    /// Builds the context from an existing catalog and storage backend.
    pub fn with_parts(
        catalog: MovieCatalogService,
        storage: Arc<dyn KeyValueStorage>,
        config: &CinesparkConfig,
    ) -> Self {
        let mut favorites =
            FavoritesStore::with_key(storage.clone(), config.storage.favorites_key.clone());
        favorites.load();

        let mut theme = ThemeStore::with_key(storage, config.storage.theme_key.clone());
        theme.load();

        Self {
            catalog,
            favorites,
            theme,
            debounce: config.search.debounce,
        }
    }
}
