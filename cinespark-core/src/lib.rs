//! CineSpark Core - Client-local state for movie discovery
//!
//! This crate provides the pieces of CineSpark that live entirely on the
//! client: the persisted favorites list, the theme preference, the
//! pagination window shown under every movie list, local key-value storage
//! and configuration management.

pub mod config;
pub mod favorites;
pub mod lifecycle;
pub mod mode;
pub mod pagination;
pub mod storage;
pub mod theme;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::CinesparkConfig;
pub use favorites::{FavoriteItem, FavoritesStore, MovieId, ToggleOutcome};
pub use lifecycle::{Lifecycle, StoreError};
pub use mode::RuntimeMode;
pub use pagination::{PageMarker, PageNavigation, pagination_window};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use theme::{Theme, ThemeStore};

/// Core errors that can bubble up from any CineSpark subsystem.
///
/// High-level error types representing failures in client-local state.
#[derive(Debug, thiserror::Error)]
pub enum CinesparkError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },
}

impl CinesparkError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            CinesparkError::Store(StoreError::NotReady) => {
                "Saved preferences are still loading".to_string()
            }
            CinesparkError::Configuration { reason } => format!("Configuration error: {reason}"),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(self, CinesparkError::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, CinesparkError>;
