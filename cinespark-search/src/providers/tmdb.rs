//! TMDB catalog provider for production use.

use async_trait::async_trait;
use cinespark_core::MovieId;
use cinespark_core::config::ApiConfig;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::MovieCatalogProvider;
use crate::categories::{Category, DiscoverFilters};
use crate::errors::CatalogError;
use crate::types::{Credits, Genre, MovieDetails, MoviePage, Video};

/// Poster width used on cards and detail pages.
pub const POSTER_SIZE: &str = "w500";

/// Portrait width used in the cast list.
pub const PROFILE_SIZE: &str = "w185";

/// Builds an image CDN URL for a poster or profile path.
///
/// Returns `None` when the movie or person has no image.
pub fn image_url(image_base_url: &str, size: &str, path: Option<&str>) -> Option<String> {
    let path = path.filter(|path| !path.is_empty())?;
    Some(format!(
        "{}/{size}/{}",
        image_base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// TMDB provider talking to the v3 REST API.
///
/// Authenticates every request with a bearer token and maps upstream
/// status codes onto [`CatalogError`] variants.
#[derive(Debug)]
pub struct TmdbProvider {
    client: reqwest::Client,
    base_url: Url,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct VideoList {
    #[serde(default)]
    results: Vec<Video>,
}

impl TmdbProvider {
    /// Create provider from API configuration.
    ///
    /// # Errors
    /// - `CatalogError::InvalidConfiguration` - Missing token, bad base URL or client build failure
    pub fn new(config: &ApiConfig) -> Result<Self, CatalogError> {
        let access_token = config
            .access_token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| CatalogError::InvalidConfiguration {
                reason: "TMDB access token is not set".to_string(),
            })?;

        Self::with_base_url(&config.base_url, access_token, config.request_timeout)
    }

    /// Create provider against a specific API root.
    ///
    /// # Errors
    /// - `CatalogError::InvalidConfiguration` - Bad base URL or client build failure
    pub fn with_base_url(
        base_url: &str,
        access_token: String,
        timeout: std::time::Duration,
    ) -> Result<Self, CatalogError> {
        // Joining relative paths needs the trailing slash
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(
            |e| CatalogError::InvalidConfiguration {
                reason: format!("Invalid API base URL '{base_url}': {e}"),
            },
        )?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::InvalidConfiguration {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    /// Resolve an endpoint path and attach query parameters.
    fn build_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, CatalogError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| CatalogError::RequestFailed {
                endpoint: path.to_string(),
                reason: format!("Invalid endpoint: {e}"),
            })?;

        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                query.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Map a non-success status onto a catalog error.
    fn status_error(status: StatusCode, endpoint: &str, movie: Option<MovieId>) -> CatalogError {
        match status {
            StatusCode::UNAUTHORIZED => CatalogError::Unauthorized {
                reason: "TMDB access token is invalid or missing".to_string(),
            },
            StatusCode::NOT_FOUND => match movie {
                Some(id) => CatalogError::MovieNotFound { id: id.as_u64() },
                None => CatalogError::RequestFailed {
                    endpoint: endpoint.to_string(),
                    reason: "resource not found".to_string(),
                },
            },
            StatusCode::TOO_MANY_REQUESTS => CatalogError::RateLimited,
            _ => CatalogError::RequestFailed {
                endpoint: endpoint.to_string(),
                reason: format!("HTTP {status}"),
            },
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        movie: Option<MovieId>,
    ) -> Result<T, CatalogError> {
        let url = self.build_url(path, params)?;
        tracing::debug!(endpoint = %path, "Requesting TMDB");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError {
                reason: format!("TMDB request to {path} failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint = %path, %status, "TMDB returned error status");
            return Err(Self::status_error(status, path, movie));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::ParseError {
                reason: format!("Failed to parse TMDB response from {path}: {e}"),
            })
    }
}

#[async_trait]
impl MovieCatalogProvider for TmdbProvider {
    async fn list_movies(
        &self,
        category: Category,
        filters: &DiscoverFilters,
        page: u32,
        language: &str,
    ) -> Result<MoviePage, CatalogError> {
        let mut params = vec![
            ("language", language.to_string()),
            ("page", page.to_string()),
        ];
        if category.accepts_filters() {
            params.extend(filters.query_params());
        }

        self.get_json(category.endpoint(), &params, None).await
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        language: &str,
    ) -> Result<MoviePage, CatalogError> {
        let params = [
            ("query", query.to_string()),
            ("language", language.to_string()),
            ("page", page.to_string()),
        ];

        self.get_json("search/movie", &params, None).await
    }

    async fn movie_details(
        &self,
        id: MovieId,
        language: &str,
    ) -> Result<MovieDetails, CatalogError> {
        let params = [("language", language.to_string())];
        self.get_json(&format!("movie/{id}"), &params, Some(id))
            .await
    }

    async fn movie_credits(&self, id: MovieId, language: &str) -> Result<Credits, CatalogError> {
        let params = [("language", language.to_string())];
        self.get_json(&format!("movie/{id}/credits"), &params, Some(id))
            .await
    }

    async fn movie_videos(&self, id: MovieId, language: &str) -> Result<Vec<Video>, CatalogError> {
        let params = [("language", language.to_string())];
        let list: VideoList = self
            .get_json(&format!("movie/{id}/videos"), &params, Some(id))
            .await?;
        Ok(list.results)
    }

    async fn genres(&self, language: &str) -> Result<Vec<Genre>, CatalogError> {
        let params = [("language", language.to_string())];
        let list: GenreList = self.get_json("genre/movie/list", &params, None).await?;
        Ok(list.genres)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn provider() -> TmdbProvider {
        TmdbProvider::with_base_url(
            "https://api.themoviedb.org/3/",
            "token".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_requires_access_token() {
        let config = ApiConfig::default();
        let error = TmdbProvider::new(&config).unwrap_err();
        assert!(matches!(error, CatalogError::InvalidConfiguration { .. }));

        let config = ApiConfig {
            access_token: Some("   ".to_string()),
            ..ApiConfig::default()
        };
        assert!(TmdbProvider::new(&config).is_err());
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result =
            TmdbProvider::with_base_url("not a url", "token".to_string(), Duration::from_secs(5));
        assert!(matches!(
            result,
            Err(CatalogError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_build_url_keeps_api_version() {
        let url = provider()
            .build_url(
                "movie/popular",
                &[("language", "fr".to_string()), ("page", "3".to_string())],
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/popular?language=fr&page=3"
        );
    }

    #[test]
    fn test_build_url_encodes_query() {
        let url = provider()
            .build_url("search/movie", &[("query", "amélie & co".to_string())])
            .unwrap();

        assert_eq!(url.path(), "/3/search/movie");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs[0].1, "amélie & co");
    }

    #[test]
    fn test_discover_url_with_filters() {
        let filters = DiscoverFilters {
            genre: Some(35),
            ..DiscoverFilters::default()
        };
        let mut params = vec![("page", "1".to_string())];
        params.extend(filters.query_params());

        let url = provider().build_url(Category::Discover.endpoint(), &params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/discover/movie?page=1&sort_by=popularity.desc&with_genres=35"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            TmdbProvider::status_error(StatusCode::UNAUTHORIZED, "movie/1", None),
            CatalogError::Unauthorized { .. }
        ));
        assert!(matches!(
            TmdbProvider::status_error(StatusCode::NOT_FOUND, "movie/42", Some(MovieId(42))),
            CatalogError::MovieNotFound { id: 42 }
        ));
        assert!(matches!(
            TmdbProvider::status_error(StatusCode::NOT_FOUND, "genre/movie/list", None),
            CatalogError::RequestFailed { .. }
        ));
        assert!(matches!(
            TmdbProvider::status_error(StatusCode::TOO_MANY_REQUESTS, "movie/popular", None),
            CatalogError::RateLimited
        ));
        assert!(matches!(
            TmdbProvider::status_error(StatusCode::BAD_GATEWAY, "movie/popular", None),
            CatalogError::RequestFailed { .. }
        ));
    }

    #[test]
    fn test_parse_video_and_genre_lists() {
        let videos: VideoList = serde_json::from_str(
            r#"{"id": 603, "results": [
                {"key": "vKQi3bBA1y8", "site": "YouTube", "type": "Trailer", "name": "Official", "iso_639_1": "en"}
            ]}"#,
        )
        .unwrap();
        assert!(videos.results[0].is_youtube_trailer());

        let genres: GenreList =
            serde_json::from_str(r#"{"genres": [{"id": 28, "name": "Action"}]}"#).unwrap();
        assert_eq!(genres.genres[0].name, "Action");
    }

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/", POSTER_SIZE, Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(image_url("https://image.tmdb.org/t/p", PROFILE_SIZE, None), None);
        assert_eq!(image_url("https://image.tmdb.org/t/p", PROFILE_SIZE, Some("")), None);
    }
}
