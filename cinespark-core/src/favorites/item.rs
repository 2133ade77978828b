//! Favorite item snapshot and movie identifier.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Upstream movie identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl MovieId {
    /// Returns the raw identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MovieId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Movie snapshot retained in the favorites list.
///
/// Display fields are captured when the movie is favorited so the list can
/// be shown without the upstream API. Fields the client does not model are
/// kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    /// Upstream identifier, unique within the collection
    pub id: MovieId,
    /// Display title
    pub title: String,
    /// Poster image path relative to the image CDN
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Average user rating on a 0-10 scale
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Release date as `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: Option<String>,
    /// Remaining upstream fields, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FavoriteItem {
    /// Creates a snapshot with only an id and title.
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster_path: None,
            vote_average: None,
            release_date: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Sets the poster path.
    pub fn with_poster_path(mut self, poster_path: impl Into<String>) -> Self {
        self.poster_path = Some(poster_path.into());
        self
    }

    /// Sets the average rating.
    pub fn with_vote_average(mut self, vote_average: f64) -> Self {
        self.vote_average = Some(vote_average);
        self
    }

    /// Sets the release date.
    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }

    /// Release year parsed from `release_date`.
    ///
    /// Upstream sends an empty string for unreleased titles, which yields `None`.
    pub fn release_year(&self) -> Option<i32> {
        parse_release_year(self.release_date.as_deref()?)
    }
}

/// Parses the year of an upstream `YYYY-MM-DD` release date.
pub fn parse_release_year(release_date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(release_date, "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}
