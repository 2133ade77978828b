//! Load lifecycle shared by the persisted client stores.

/// Two-state lifecycle of a store mirrored to local storage.
///
/// A store starts `Uninitialized` and becomes `Ready` once its persisted
/// value has been read. Writes to storage only happen in `Ready`, so a store
/// that has not finished loading can never clobber the stored copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Persisted value not read yet; mutations are rejected
    #[default]
    Uninitialized,
    /// Persisted value read; every mutation is written through
    Ready,
}

impl Lifecycle {
    /// Check if the store finished loading.
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Ready => write!(f, "ready"),
        }
    }
}

/// Errors returned by mutations on a persisted store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Mutation attempted before the stored value was loaded
    #[error("store is not loaded yet")]
    NotReady,
}
