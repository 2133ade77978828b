//! Error types for catalog access.

use thiserror::Error;

/// Errors that can occur while talking to the movie catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog request failed with the specified endpoint and reason.
    #[error("Request to '{endpoint}' failed: {reason}")]
    RequestFailed {
        /// The endpoint that was requested
        endpoint: String,
        /// The reason for the failure
        reason: String,
    },

    /// Network communication error occurred.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Failed to parse the response body.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// Access token rejected or missing.
    #[error("Unauthorized: {reason}")]
    Unauthorized {
        /// The reason reported for the rejection
        reason: String,
    },

    /// Requested movie does not exist upstream.
    #[error("Movie {id} not found")]
    MovieNotFound {
        /// The requested movie id
        id: u64,
    },

    /// Upstream rate limit reached.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// No YouTube trailer or teaser in any tried language.
    #[error("No trailer available for movie {id}")]
    TrailerUnavailable {
        /// The movie whose videos were searched
        id: u64,
    },

    /// Client could not be built from configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What is wrong with the configuration
        reason: String,
    },
}

impl CatalogError {
    /// Message suitable for showing to the user in place of a list or page.
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::MovieNotFound { .. } => "This movie could not be found.",
            CatalogError::TrailerUnavailable { .. } => "No trailer is available for this movie.",
            CatalogError::Unauthorized { .. } | CatalogError::InvalidConfiguration { .. } => {
                "The movie service is not configured correctly."
            }
            CatalogError::RateLimited => "Too many requests. Try again in a moment.",
            CatalogError::RequestFailed { .. }
            | CatalogError::NetworkError { .. }
            | CatalogError::ParseError { .. } => "Unable to load movies. Try again later.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            CatalogError::NetworkError {
                reason: "dns".to_string()
            }
            .user_message(),
            "Unable to load movies. Try again later."
        );
        assert_eq!(
            CatalogError::TrailerUnavailable { id: 1 }.user_message(),
            "No trailer is available for this movie."
        );
    }
}
