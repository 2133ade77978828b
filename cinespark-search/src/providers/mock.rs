//! Mock provider implementation for testing.

use std::collections::HashMap;

use async_trait::async_trait;
use cinespark_core::MovieId;
use parking_lot::Mutex;

use super::MovieCatalogProvider;
use crate::categories::{Category, DiscoverFilters};
use crate::errors::CatalogError;
use crate::types::{CastMember, Credits, Genre, Movie, MovieDetails, MoviePage, Video};

/// Call recorded by [`MockProvider`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    /// `list_movies(category, filters, page, language)`
    List(Category, DiscoverFilters, u32, String),
    /// `search_movies(query, page, language)`
    Search(String, u32, String),
    /// `movie_details(id, language)`
    Details(MovieId, String),
    /// `movie_credits(id, language)`
    Credits(MovieId, String),
    /// `movie_videos(id, language)`
    Videos(MovieId, String),
    /// `genres(language)`
    Genres(String),
}

/// Mock provider for testing.
///
/// Serves canned pages and records every call so tests can assert on the
/// requests the service makes.
#[derive(Debug, Default)]
pub struct MockProvider {
    total_pages: u32,
    cast_size: usize,
    videos: HashMap<String, Vec<Video>>,
    fail: bool,
    calls: Mutex<Vec<MockCall>>,
}

impl MockProvider {
    /// Creates a mock reporting a single page and no videos.
    pub fn new() -> Self {
        Self {
            total_pages: 1,
            cast_size: 3,
            ..Self::default()
        }
    }

    /// Sets the page count reported by every list.
    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = total_pages;
        self
    }

    /// Sets the number of cast members returned by credits.
    pub fn with_cast_size(mut self, cast_size: usize) -> Self {
        self.cast_size = cast_size;
        self
    }

    /// Publishes a video in one language.
    pub fn with_video(mut self, language: &str, site: &str, kind: &str, key: &str) -> Self {
        self.videos
            .entry(language.to_string())
            .or_default()
            .push(Video {
                key: key.to_string(),
                site: site.to_string(),
                kind: kind.to_string(),
                name: String::new(),
            });
        self
    }

    /// Makes every call fail with a network error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: MockCall) -> Result<(), CatalogError> {
        self.calls.lock().push(call);
        if self.fail {
            return Err(CatalogError::NetworkError {
                reason: "mock failure".to_string(),
            });
        }
        Ok(())
    }

    fn page(&self, page: u32, title: &str) -> MoviePage {
        MoviePage {
            page,
            results: vec![Movie {
                id: MovieId(u64::from(page)),
                title: title.to_string(),
                poster_path: None,
                vote_average: 7.0,
                vote_count: 100,
                release_date: Some("2020-01-01".to_string()),
                overview: String::new(),
                genre_ids: vec![18],
            }],
            total_pages: self.total_pages,
            total_results: u64::from(self.total_pages) * 20,
        }
    }
}

#[async_trait]
impl MovieCatalogProvider for MockProvider {
    async fn list_movies(
        &self,
        category: Category,
        filters: &DiscoverFilters,
        page: u32,
        language: &str,
    ) -> Result<MoviePage, CatalogError> {
        self.record(MockCall::List(
            category,
            filters.clone(),
            page,
            language.to_string(),
        ))?;
        Ok(self.page(page, category.label()))
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        language: &str,
    ) -> Result<MoviePage, CatalogError> {
        self.record(MockCall::Search(
            query.to_string(),
            page,
            language.to_string(),
        ))?;
        Ok(self.page(page, query))
    }

    async fn movie_details(
        &self,
        id: MovieId,
        language: &str,
    ) -> Result<MovieDetails, CatalogError> {
        self.record(MockCall::Details(id, language.to_string()))?;
        Ok(MovieDetails {
            id,
            title: format!("Movie {id}"),
            tagline: None,
            poster_path: None,
            vote_average: 7.0,
            vote_count: 100,
            release_date: Some("2020-01-01".to_string()),
            runtime: Some(100),
            genres: Vec::new(),
            overview: String::new(),
        })
    }

    async fn movie_credits(&self, id: MovieId, language: &str) -> Result<Credits, CatalogError> {
        self.record(MockCall::Credits(id, language.to_string()))?;
        let cast = (0..self.cast_size as u64)
            .map(|n| CastMember {
                id: n,
                name: format!("Actor {n}"),
                character: None,
                profile_path: None,
            })
            .collect();
        Ok(Credits { cast })
    }

    async fn movie_videos(&self, id: MovieId, language: &str) -> Result<Vec<Video>, CatalogError> {
        self.record(MockCall::Videos(id, language.to_string()))?;
        Ok(self.videos.get(language).cloned().unwrap_or_default())
    }

    async fn genres(&self, language: &str) -> Result<Vec<Genre>, CatalogError> {
        self.record(MockCall::Genres(language.to_string()))?;
        Ok(vec![Genre {
            id: 18,
            name: "Drama".to_string(),
        }])
    }
}
