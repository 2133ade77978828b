//! Provider implementations for the movie catalog.

use async_trait::async_trait;
use cinespark_core::MovieId;

use crate::categories::{Category, DiscoverFilters};
use crate::errors::CatalogError;
use crate::types::{Credits, Genre, MovieDetails, MoviePage, Video};

pub mod demo;
#[cfg(test)]
pub mod mock;
pub mod tmdb;

pub use demo::DemoProvider;
#[cfg(test)]
pub use mock::MockProvider;
pub use tmdb::TmdbProvider;

/// Trait for movie catalog backends.
///
/// Implementations serve movie metadata through different backends
/// (the TMDB REST API, offline demo data, mock providers for testing).
/// Every call takes the locale the caller wants titles and overviews in.
#[async_trait]
pub trait MovieCatalogProvider: Send + Sync + std::fmt::Debug {
    /// Fetch one page of a category list.
    ///
    /// `filters` only applies to [`Category::Discover`].
    ///
    /// # Errors
    /// - `CatalogError::NetworkError` - Network connectivity issues
    /// - `CatalogError::RequestFailed` - Upstream returned an error status
    /// - `CatalogError::ParseError` - Response body was not a movie page
    async fn list_movies(
        &self,
        category: Category,
        filters: &DiscoverFilters,
        page: u32,
        language: &str,
    ) -> Result<MoviePage, CatalogError>;

    /// Fetch one page of free-text search results.
    ///
    /// # Errors
    /// - `CatalogError::NetworkError` - Network connectivity issues
    /// - `CatalogError::RequestFailed` - Upstream returned an error status
    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        language: &str,
    ) -> Result<MoviePage, CatalogError>;

    /// Fetch the full record of one movie.
    ///
    /// # Errors
    /// - `CatalogError::MovieNotFound` - No movie with this id
    async fn movie_details(&self, id: MovieId, language: &str)
    -> Result<MovieDetails, CatalogError>;

    /// Fetch the credits of one movie.
    ///
    /// # Errors
    /// - `CatalogError::MovieNotFound` - No movie with this id
    async fn movie_credits(&self, id: MovieId, language: &str) -> Result<Credits, CatalogError>;

    /// Fetch the videos published for one movie in a locale.
    ///
    /// # Errors
    /// - `CatalogError::MovieNotFound` - No movie with this id
    async fn movie_videos(&self, id: MovieId, language: &str) -> Result<Vec<Video>, CatalogError>;

    /// Fetch the genre list used by discover filters.
    ///
    /// # Errors
    /// - `CatalogError::NetworkError` - Network connectivity issues
    async fn genres(&self, language: &str) -> Result<Vec<Genre>, CatalogError>;
}
