//! CineSpark Search - Movie catalog browsing and discovery

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Wraps the upstream movie metadata API behind a provider trait: category
//! lists with discover filters, free-text search, detail pages with cast,
//! trailer lookup with a language fallback, and a debouncer for search-as-
//! you-type input.

pub mod categories;
pub mod debounce;
pub mod errors;
pub mod providers;
pub mod service;
pub mod types;

// Re-export main types
pub use categories::{Category, DiscoverFilters, SortOrder};
pub use debounce::SearchDebouncer;
pub use errors::CatalogError;
pub use providers::{DemoProvider, MovieCatalogProvider, TmdbProvider};
pub use service::MovieCatalogService;
pub use types::{
    CastMember, Credits, Genre, Movie, MovieDetails, MovieDetailsView, MoviePage, Trailer, Video,
};

/// Convenience type alias for Results with CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;
