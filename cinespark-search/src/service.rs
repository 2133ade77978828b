//! Movie catalog service
//!
//! Sits between the views and a [`MovieCatalogProvider`]: applies the
//! configured locale, keeps page numbers inside the range the API serves,
//! trims cast lists and resolves trailers with a language fallback.

use std::sync::Arc;

use cinespark_core::{CinesparkConfig, MovieId};

use crate::categories::{Category, DiscoverFilters};
use crate::errors::CatalogError;
use crate::providers::tmdb::{self, POSTER_SIZE, PROFILE_SIZE};
use crate::providers::{DemoProvider, MovieCatalogProvider, TmdbProvider};
#[cfg(test)]
use crate::providers::MockProvider;
use crate::types::{Genre, MovieDetailsView, MoviePage, Trailer};

/// Movie catalog service used by every view.
#[derive(Debug, Clone)]
pub struct MovieCatalogService {
    provider: Arc<dyn MovieCatalogProvider>,
    language: String,
    fallback_language: String,
    image_base_url: String,
    max_total_pages: u32,
    cast_limit: usize,
}

impl MovieCatalogService {
    /// Creates a service over `provider` using the locale and limits in `config`.
    pub fn new(provider: Arc<dyn MovieCatalogProvider>, config: &CinesparkConfig) -> Self {
        Self {
            provider,
            language: config.api.language.clone(),
            fallback_language: config.api.fallback_language.clone(),
            image_base_url: config.api.image_base_url.clone(),
            max_total_pages: config.api.max_total_pages.max(1),
            cast_limit: config.search.cast_limit,
        }
    }

    /// Creates the service matching the configured runtime mode.
    ///
    /// Production talks to TMDB; development serves the offline demo catalog.
    ///
    /// # Errors
    /// - `CatalogError::InvalidConfiguration` - Production mode without a usable token
    pub fn from_config(config: &CinesparkConfig) -> Result<Self, CatalogError> {
        let provider: Arc<dyn MovieCatalogProvider> = if config.mode.is_development() {
            tracing::info!("Using offline demo catalog");
            Arc::new(DemoProvider::new())
        } else {
            Arc::new(TmdbProvider::new(&config.api)?)
        };

        Ok(Self::new(provider, config))
    }

    /// Creates a service over the offline demo catalog.
    pub fn new_demo(config: &CinesparkConfig) -> Self {
        Self::new(Arc::new(DemoProvider::new()), config)
    }

    /// Creates a service over a mock provider for testing.
    #[cfg(test)]
    pub fn new_with_mock(provider: Arc<MockProvider>) -> Self {
        Self::new(provider, &CinesparkConfig::for_testing())
    }

    /// Locale requested for titles and overviews.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Highest page the service will request.
    pub fn max_total_pages(&self) -> u32 {
        self.max_total_pages
    }

    /// Clamps a requested page into `1..=max_total_pages`.
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.max_total_pages)
    }

    /// Fetch one page of a category list.
    ///
    /// The page is clamped into the served range and the reported page
    /// count is capped to it, never below one. A page past the end of the
    /// list loads the last page instead.
    ///
    /// # Errors
    /// - `CatalogError::NetworkError` - Network connectivity issues
    /// - `CatalogError::RequestFailed` - Upstream returned an error status
    pub async fn browse(
        &self,
        category: Category,
        filters: &DiscoverFilters,
        page: u32,
    ) -> Result<MoviePage, CatalogError> {
        let page = self.clamp_page(page);
        tracing::debug!(category = category.as_str(), page, "Browsing catalog");

        let result = self
            .provider
            .list_movies(category, filters, page, &self.language)
            .await?;
        let last = self.last_page(&result);
        if page <= last {
            return Ok(self.cap_pages(result, page));
        }

        tracing::debug!(page, last, "Page past the end, loading last page");
        let result = self
            .provider
            .list_movies(category, filters, last, &self.language)
            .await?;
        Ok(self.cap_pages(result, last))
    }

    /// Search movies by title.
    ///
    /// A blank query shows the discover list sorted by popularity instead.
    ///
    /// # Errors
    /// - `CatalogError::NetworkError` - Network connectivity issues
    /// - `CatalogError::RequestFailed` - Upstream returned an error status
    pub async fn search(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return self
                .browse(Category::Discover, &DiscoverFilters::default(), page)
                .await;
        }

        let page = self.clamp_page(page);
        tracing::debug!(query, page, "Searching catalog");

        let result = self
            .provider
            .search_movies(query, page, &self.language)
            .await?;
        let last = self.last_page(&result);
        if page <= last {
            return Ok(self.cap_pages(result, page));
        }

        tracing::debug!(query, page, last, "Page past the end, loading last page");
        let result = self
            .provider
            .search_movies(query, last, &self.language)
            .await?;
        Ok(self.cap_pages(result, last))
    }

    /// Fetch a movie's detail page: the full record and its leading cast.
    ///
    /// # Errors
    /// - `CatalogError::MovieNotFound` - No movie with this id
    /// - `CatalogError::NetworkError` - Network connectivity issues
    pub async fn details(&self, id: MovieId) -> Result<MovieDetailsView, CatalogError> {
        let (details, credits) = tokio::try_join!(
            self.provider.movie_details(id, &self.language),
            self.provider.movie_credits(id, &self.language),
        )?;

        let mut cast = credits.cast;
        cast.truncate(self.cast_limit);

        Ok(MovieDetailsView { details, cast })
    }

    /// Find a YouTube trailer or teaser for a movie.
    ///
    /// Looks in the configured language first, then in the fallback language.
    /// A failure of the fallback request counts as no trailer.
    ///
    /// # Errors
    /// - `CatalogError::TrailerUnavailable` - No trailer in either language
    /// - `CatalogError::NetworkError` - The first lookup failed
    pub async fn find_trailer(&self, id: MovieId) -> Result<Trailer, CatalogError> {
        let videos = self.provider.movie_videos(id, &self.language).await?;
        if let Some(video) = videos.iter().find(|video| video.is_youtube_trailer()) {
            return Ok(Trailer {
                key: video.key.clone(),
                language: self.language.clone(),
            });
        }

        if self.fallback_language != self.language {
            tracing::debug!(
                movie = %id,
                fallback = %self.fallback_language,
                "No trailer in primary language, retrying"
            );
            match self
                .provider
                .movie_videos(id, &self.fallback_language)
                .await
            {
                Ok(videos) => {
                    if let Some(video) = videos.iter().find(|video| video.is_youtube_trailer()) {
                        return Ok(Trailer {
                            key: video.key.clone(),
                            language: self.fallback_language.clone(),
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!(movie = %id, error = %e, "Fallback trailer lookup failed");
                }
            }
        }

        Err(CatalogError::TrailerUnavailable { id: id.as_u64() })
    }

    /// Fetch the genre list for the filter panel.
    ///
    /// # Errors
    /// - `CatalogError::NetworkError` - Network connectivity issues
    pub async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        self.provider.genres(&self.language).await
    }

    /// Poster URL at card width, if the movie has a poster.
    pub fn poster_url(&self, poster_path: Option<&str>) -> Option<String> {
        tmdb::image_url(&self.image_base_url, POSTER_SIZE, poster_path)
    }

    /// Portrait URL at cast-list width, if the person has a portrait.
    pub fn profile_url(&self, profile_path: Option<&str>) -> Option<String> {
        tmdb::image_url(&self.image_base_url, PROFILE_SIZE, profile_path)
    }

    fn last_page(&self, result: &MoviePage) -> u32 {
        result.total_pages.clamp(1, self.max_total_pages)
    }

    // Keeps the reported page inside `1..=total_pages`.
    fn cap_pages(&self, mut result: MoviePage, page: u32) -> MoviePage {
        result.total_pages = self.last_page(&result);
        result.page = page.clamp(1, result.total_pages);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::SortOrder;
    use crate::providers::mock::MockCall;

    #[tokio::test]
    async fn test_browse_clamps_page_and_caps_total() {
        let mock = Arc::new(MockProvider::new().with_total_pages(40_210));
        let service = MovieCatalogService::new_with_mock(mock.clone());

        let page = service
            .browse(Category::Popular, &DiscoverFilters::default(), 9_999)
            .await
            .unwrap();

        assert_eq!(page.page, 500);
        assert_eq!(page.total_pages, 500);
        assert_eq!(
            mock.calls(),
            vec![MockCall::List(
                Category::Popular,
                DiscoverFilters::default(),
                500,
                "fr".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_browse_past_last_page_loads_last_page() {
        let mock = Arc::new(MockProvider::new().with_total_pages(3));
        let service = MovieCatalogService::new_with_mock(mock.clone());

        let page = service
            .browse(Category::Popular, &DiscoverFilters::default(), 7)
            .await
            .unwrap();

        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.results[0].id, MovieId(3));
        let pages: Vec<u32> = mock
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::List(_, _, page, _) => Some(page),
                _ => None,
            })
            .collect();
        assert_eq!(pages, vec![7, 3]);
    }

    #[tokio::test]
    async fn test_search_past_last_page_loads_last_page() {
        let mock = Arc::new(MockProvider::new().with_total_pages(2));
        let service = MovieCatalogService::new_with_mock(mock.clone());

        let page = service.search("matrix", 50).await.unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(
            mock.calls(),
            vec![
                MockCall::Search("matrix".to_string(), 50, "fr".to_string()),
                MockCall::Search("matrix".to_string(), 2, "fr".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_browse_page_zero_becomes_first() {
        let mock = Arc::new(MockProvider::new().with_total_pages(0));
        let service = MovieCatalogService::new_with_mock(mock);

        let page = service
            .browse(Category::Upcoming, &DiscoverFilters::default(), 0)
            .await
            .unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_blank_search_falls_back_to_discover() {
        let mock = Arc::new(MockProvider::new());
        let service = MovieCatalogService::new_with_mock(mock.clone());

        service.search("   ", 2).await.unwrap();

        match &mock.calls()[..] {
            [MockCall::List(Category::Discover, filters, 2, _)] => {
                assert_eq!(filters.sort_by, SortOrder::PopularityDesc);
            }
            other => panic!("unexpected calls: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_trims_query() {
        let mock = Arc::new(MockProvider::new());
        let service = MovieCatalogService::new_with_mock(mock.clone());

        service.search("  matrix ", 1).await.unwrap();
        assert_eq!(
            mock.calls(),
            vec![MockCall::Search("matrix".to_string(), 1, "fr".to_string())]
        );
    }

    #[tokio::test]
    async fn test_details_truncates_cast() {
        let mock = Arc::new(MockProvider::new().with_cast_size(20));
        let service = MovieCatalogService::new_with_mock(mock);

        let view = service.details(MovieId(7)).await.unwrap();
        assert_eq!(view.details.id, MovieId(7));
        assert_eq!(view.cast.len(), 8);
        assert_eq!(view.cast[0].name, "Actor 0");
    }

    #[tokio::test]
    async fn test_trailer_in_primary_language() {
        let mock = Arc::new(
            MockProvider::new()
                .with_video("fr", "YouTube", "Teaser", "fr-key")
                .with_video("en", "YouTube", "Trailer", "en-key"),
        );
        let service = MovieCatalogService::new_with_mock(mock.clone());

        let trailer = service.find_trailer(MovieId(1)).await.unwrap();
        assert_eq!(trailer.key, "fr-key");
        assert_eq!(trailer.language, "fr");
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_trailer_falls_back_to_english() {
        let mock = Arc::new(
            MockProvider::new()
                .with_video("fr", "YouTube", "Featurette", "extra")
                .with_video("fr", "Vimeo", "Trailer", "vimeo")
                .with_video("en", "YouTube", "Trailer", "en-key"),
        );
        let service = MovieCatalogService::new_with_mock(mock.clone());

        let trailer = service.find_trailer(MovieId(1)).await.unwrap();
        assert_eq!(trailer.key, "en-key");
        assert_eq!(trailer.language, "en");
        assert_eq!(
            mock.calls(),
            vec![
                MockCall::Videos(MovieId(1), "fr".to_string()),
                MockCall::Videos(MovieId(1), "en".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_trailer_anywhere() {
        let mock = Arc::new(MockProvider::new());
        let service = MovieCatalogService::new_with_mock(mock);

        let error = service.find_trailer(MovieId(9)).await.unwrap_err();
        assert!(matches!(error, CatalogError::TrailerUnavailable { id: 9 }));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let service = MovieCatalogService::new_with_mock(Arc::new(MockProvider::failing()));

        let error = service
            .browse(Category::Popular, &DiscoverFilters::default(), 1)
            .await
            .unwrap_err();
        assert_eq!(error.user_message(), "Unable to load movies. Try again later.");
    }

    #[test]
    fn test_from_config_requires_token_in_production() {
        let config = CinesparkConfig::default();
        assert!(matches!(
            MovieCatalogService::from_config(&config),
            Err(CatalogError::InvalidConfiguration { .. })
        ));

        let demo = MovieCatalogService::from_config(&CinesparkConfig::for_testing());
        assert!(demo.is_ok());
    }

    #[test]
    fn test_image_urls() {
        let service = MovieCatalogService::new_demo(&CinesparkConfig::default());
        assert_eq!(
            service.poster_url(Some("/p.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/p.jpg")
        );
        assert_eq!(
            service.profile_url(Some("/a.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w185/a.jpg")
        );
        assert_eq!(service.poster_url(None), None);
    }
}
