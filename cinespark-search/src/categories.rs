//! Browsable movie categories and discover filters.

use serde::{Deserialize, Serialize};

/// Movie list shown on the home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Currently popular movies
    #[default]
    Popular,
    /// Highest rated movies
    TopRated,
    /// Movies releasing soon
    Upcoming,
    /// Movies in theaters
    NowPlaying,
    /// Filterable list driven by [`DiscoverFilters`]
    Discover,
}

impl Category {
    /// All categories in tab order.
    pub const ALL: [Category; 5] = [
        Category::Popular,
        Category::TopRated,
        Category::Upcoming,
        Category::NowPlaying,
        Category::Discover,
    ];

    /// API path of the list, relative to the base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            Category::Popular => "movie/popular",
            Category::TopRated => "movie/top_rated",
            Category::Upcoming => "movie/upcoming",
            Category::NowPlaying => "movie/now_playing",
            Category::Discover => "discover/movie",
        }
    }

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Popular => "Popular",
            Category::TopRated => "Top Rated",
            Category::Upcoming => "Upcoming",
            Category::NowPlaying => "Now Playing",
            Category::Discover => "Discover",
        }
    }

    /// Whether discover filters apply to this list.
    pub fn accepts_filters(self) -> bool {
        matches!(self, Category::Discover)
    }

    /// Stable identifier used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Popular => "popular",
            Category::TopRated => "top_rated",
            Category::Upcoming => "upcoming",
            Category::NowPlaying => "now_playing",
            Category::Discover => "discover",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid category: '{s}'. Valid options are: popular, top_rated, upcoming, now_playing, discover"
                )
            })
    }
}

/// Sort order of the discover list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Most popular first
    #[default]
    PopularityDesc,
    /// Least popular first
    PopularityAsc,
    /// Best rated first
    RatingDesc,
    /// Worst rated first
    RatingAsc,
    /// Newest first
    ReleaseDateDesc,
    /// Oldest first
    ReleaseDateAsc,
    /// Title A-Z
    TitleAsc,
    /// Title Z-A
    TitleDesc,
}

impl SortOrder {
    /// All sort orders in menu order.
    pub const ALL: [SortOrder; 8] = [
        SortOrder::PopularityDesc,
        SortOrder::PopularityAsc,
        SortOrder::RatingDesc,
        SortOrder::RatingAsc,
        SortOrder::ReleaseDateDesc,
        SortOrder::ReleaseDateAsc,
        SortOrder::TitleAsc,
        SortOrder::TitleDesc,
    ];

    /// Value of the `sort_by` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortOrder::PopularityDesc => "popularity.desc",
            SortOrder::PopularityAsc => "popularity.asc",
            SortOrder::RatingDesc => "vote_average.desc",
            SortOrder::RatingAsc => "vote_average.asc",
            SortOrder::ReleaseDateDesc => "release_date.desc",
            SortOrder::ReleaseDateAsc => "release_date.asc",
            SortOrder::TitleAsc => "title.asc",
            SortOrder::TitleDesc => "title.desc",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::PopularityDesc => "Popularity (descending)",
            SortOrder::PopularityAsc => "Popularity (ascending)",
            SortOrder::RatingDesc => "Rating (descending)",
            SortOrder::RatingAsc => "Rating (ascending)",
            SortOrder::ReleaseDateDesc => "Release date (newest)",
            SortOrder::ReleaseDateAsc => "Release date (oldest)",
            SortOrder::TitleAsc => "Title (A-Z)",
            SortOrder::TitleDesc => "Title (Z-A)",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_query_value() == s.trim())
            .ok_or_else(|| format!("Invalid sort order: '{s}'"))
    }
}

/// Filters applied to the discover list.
///
/// Empty fields are left out of the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoverFilters {
    /// Genre identifier
    pub genre: Option<u32>,
    /// Release year
    pub year: Option<i32>,
    /// Minimum average rating
    pub min_rating: Option<f32>,
    /// Maximum average rating
    pub max_rating: Option<f32>,
    /// Result ordering
    pub sort_by: SortOrder,
}

impl DiscoverFilters {
    /// Query parameters for the discover endpoint, excluding page and locale.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("sort_by", self.sort_by.as_query_value().to_string())];

        if let Some(genre) = self.genre {
            params.push(("with_genres", genre.to_string()));
        }
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(min_rating) = self.min_rating {
            params.push(("vote_average.gte", min_rating.to_string()));
        }
        if let Some(max_rating) = self.max_rating {
            params.push(("vote_average.lte", max_rating.to_string()));
        }

        params
    }

    /// Whether only the default sort is set.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
