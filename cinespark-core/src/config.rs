//! Centralized configuration for CineSpark.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

use crate::favorites::FAVORITES_STORAGE_KEY;
use crate::mode::RuntimeMode;
use crate::theme::THEME_STORAGE_KEY;

/// Central configuration for all CineSpark components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct CinesparkConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
    pub mode: RuntimeMode,
}

/// Movie metadata API configuration.
///
/// Controls endpoints, credentials, locale and request limits for the
/// upstream catalog.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST API
    pub base_url: String,
    /// Base URL of the image CDN
    pub image_base_url: String,
    /// Bearer token for the API
    pub access_token: Option<String>,
    /// Locale requested for titles and overviews
    pub language: String,
    /// Locale retried when no trailer exists in `language`
    pub fallback_language: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// Highest page the API will serve for any list
    pub max_total_pages: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            access_token: None,
            language: "fr".to_string(),
            fallback_language: "en".to_string(),
            request_timeout: Duration::from_secs(10),
            max_total_pages: 500,
        }
    }
}

/// Search and detail view configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period before a typed query is sent
    pub debounce: Duration,
    /// Number of cast members shown on a detail page
    pub cast_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(750),
            cast_limit: 8,
        }
    }
}

/// Local storage configuration.
///
/// Controls where client state is kept and the keys it is stored under.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding stored values
    pub data_dir: PathBuf,
    /// Key of the favorites list
    pub favorites_key: String,
    /// Key of the theme preference
    pub theme_key: String,
    /// Suffix of in-flight writes
    pub temp_file_suffix: &'static str,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .map(|dir| dir.join("cinespark"))
            .unwrap_or_else(|| PathBuf::from(".cinespark"));

        Self {
            data_dir,
            favorites_key: FAVORITES_STORAGE_KEY.to_string(),
            theme_key: THEME_STORAGE_KEY.to_string(),
            temp_file_suffix: ".tmp",
        }
    }
}

impl CinesparkConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // API configuration overrides
        config.api.access_token = std::env::var("CINESPARK_TMDB_TOKEN")
            .or_else(|_| std::env::var("TMDB_API_KEY"))
            .ok()
            .filter(|token| !token.trim().is_empty());

        if let Ok(base_url) = std::env::var("CINESPARK_API_BASE_URL") {
            config.api.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(language) = std::env::var("CINESPARK_LANGUAGE")
            && !language.trim().is_empty()
        {
            config.api.language = language.trim().to_string();
        }

        if let Ok(timeout) = std::env::var("CINESPARK_REQUEST_TIMEOUT")
            && let Ok(seconds) = timeout.parse::<u64>()
        {
            config.api.request_timeout = Duration::from_secs(seconds);
        }

        // Search configuration overrides
        if let Ok(debounce) = std::env::var("CINESPARK_SEARCH_DEBOUNCE_MS")
            && let Ok(millis) = debounce.parse::<u64>()
        {
            config.search.debounce = Duration::from_millis(millis);
        }

        // Storage configuration overrides
        if let Ok(data_dir) = std::env::var("CINESPARK_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(mode) = std::env::var("CINESPARK_MODE")
            && let Ok(mode) = mode.parse()
        {
            config.mode = mode;
        }

        config
    }

    /// Creates a configuration optimized for testing.
    ///
    /// Uses the demo catalog, no debounce delay and a data directory under
    /// the system temp dir.
    pub fn for_testing() -> Self {
        Self {
            search: SearchConfig {
                debounce: Duration::ZERO,
                ..Default::default()
            },
            storage: StorageConfig {
                data_dir: std::env::temp_dir().join("cinespark-test"),
                ..Default::default()
            },
            mode: RuntimeMode::Development,
            ..Default::default()
        }
    }

    /// Checks that the configuration can reach the catalog.
    ///
    /// # Errors
    ///
    /// - `CinesparkError::Configuration` - If production mode has no access token
    pub fn validate(&self) -> crate::Result<()> {
        if self.mode.is_production() && self.api.access_token.is_none() {
            return Err(crate::CinesparkError::Configuration {
                reason: "no TMDB access token; set CINESPARK_TMDB_TOKEN or use --demo"
                    .to_string(),
            });
        }
        if self.api.max_total_pages == 0 {
            return Err(crate::CinesparkError::Configuration {
                reason: "max_total_pages must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
