//! Client-local favorites list.
//!
//! The list lives in memory and is mirrored to local storage as a JSON array
//! under a fixed key. It is read once at startup; afterwards every effective
//! mutation rewrites the stored copy. Storage problems never fail an
//! operation: the in-memory list stays authoritative for the session.

pub mod item;

use std::sync::Arc;

pub use item::{FavoriteItem, MovieId, parse_release_year};

use crate::lifecycle::{Lifecycle, StoreError};
use crate::storage::KeyValueStorage;

/// Storage key holding the serialized favorites list.
pub const FAVORITES_STORAGE_KEY: &str = "cinesparkFavorites";

/// Result of [`FavoritesStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The movie was not a favorite and has been added
    Added,
    /// The movie was a favorite and has been removed
    Removed,
}

impl ToggleOutcome {
    /// Whether the movie is a favorite after the toggle.
    pub fn is_favorite(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Insertion-ordered favorites with write-through persistence.
///
/// Construct one per application run and hand it by reference to whatever
/// needs favorite status. Until [`load`](Self::load) runs the store is
/// `Uninitialized`: queries see an empty list and mutations fail with
/// [`StoreError::NotReady`] without touching storage.
#[derive(Debug)]
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    items: Vec<FavoriteItem>,
    lifecycle: Lifecycle,
}

impl FavoritesStore {
    /// Creates an unloaded store persisting under [`FAVORITES_STORAGE_KEY`].
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, FAVORITES_STORAGE_KEY)
    }

    /// Creates an unloaded store persisting under a custom key.
    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            items: Vec::new(),
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Creates a store and loads the persisted list.
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Reads the persisted list and moves the store to `Ready`.
    ///
    /// A missing, unreadable or malformed value yields an empty list; the
    /// failure is logged and otherwise ignored. Calling this on a store that
    /// is already `Ready` does nothing. Returns the number of favorites held.
    pub fn load(&mut self) -> usize {
        if self.lifecycle.is_ready() {
            tracing::debug!(key = %self.key, "Favorites already loaded");
            return self.items.len();
        }

        self.items = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => match decode_collection(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::error!(key = %self.key, error = %e, "Discarding malformed favorites");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Could not read favorites");
                Vec::new()
            }
        };

        self.lifecycle = Lifecycle::Ready;
        tracing::info!(count = self.items.len(), "Favorites loaded");
        self.items.len()
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Adds `item` unless a favorite with the same id exists.
    ///
    /// Returns whether the list changed.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotReady` - If the store has not been loaded
    pub fn add(&mut self, item: FavoriteItem) -> Result<bool, StoreError> {
        self.ensure_ready()?;

        if self.is_favorite(item.id) {
            return Ok(false);
        }

        tracing::debug!(id = %item.id, title = %item.title, "Adding favorite");
        self.items.push(item);
        self.persist();
        Ok(true)
    }

    /// Removes the favorite with `id`, if present.
    ///
    /// Returns whether the list changed.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotReady` - If the store has not been loaded
    pub fn remove(&mut self, id: MovieId) -> Result<bool, StoreError> {
        self.ensure_ready()?;

        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return Ok(false);
        }

        tracing::debug!(%id, "Removed favorite");
        self.persist();
        Ok(true)
    }

    /// Removes `item` if it is a favorite, adds it otherwise.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotReady` - If the store has not been loaded
    pub fn toggle(&mut self, item: FavoriteItem) -> Result<ToggleOutcome, StoreError> {
        if self.is_favorite(item.id) {
            self.remove(item.id)?;
            Ok(ToggleOutcome::Removed)
        } else {
            self.add(item)?;
            Ok(ToggleOutcome::Added)
        }
    }

    /// Whether a favorite with `id` exists.
    pub fn is_favorite(&self, id: MovieId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Number of favorites.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Favorites in insertion order.
    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    /// Looks up a favorite by id.
    pub fn get(&self, id: MovieId) -> Option<&FavoriteItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn ensure_ready(&self) -> Result<(), StoreError> {
        if self.lifecycle.is_ready() {
            Ok(())
        } else {
            tracing::warn!(key = %self.key, "Favorites mutation rejected before load");
            Err(StoreError::NotReady)
        }
    }

    fn persist(&self) {
        let encoded = match encode_collection(&self.items) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "Could not serialize favorites");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(&self.key, &encoded) {
            tracing::warn!(key = %self.key, error = %e, "Could not persist favorites");
        }
    }
}

/// Serializes a favorites list to its stored JSON form.
///
/// # Errors
///
/// - `serde_json::Error` - If an extra field cannot be represented as JSON
pub fn encode_collection(items: &[FavoriteItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Parses a stored favorites list.
///
/// Later entries sharing an id with an earlier one are dropped so the
/// result never holds duplicates.
///
/// # Errors
///
/// - `serde_json::Error` - If the value is not a JSON array of favorites
pub fn decode_collection(raw: &str) -> Result<Vec<FavoriteItem>, serde_json::Error> {
    let parsed: Vec<FavoriteItem> = serde_json::from_str(raw)?;
    let total = parsed.len();

    let mut items: Vec<FavoriteItem> = Vec::with_capacity(total);
    for item in parsed {
        if !items.iter().any(|existing| existing.id == item.id) {
            items.push(item);
        }
    }

    if items.len() < total {
        tracing::warn!(dropped = total - items.len(), "Dropped duplicate favorites");
    }
    Ok(items)
}
