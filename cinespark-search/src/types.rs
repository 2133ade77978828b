//! Data types for the movie catalog.

use cinespark_core::favorites::{FavoriteItem, MovieId, parse_release_year};
use serde::{Deserialize, Serialize};

/// Movie summary as returned in list and search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Upstream identifier
    pub id: MovieId,
    /// Localized title
    pub title: String,
    /// Poster path relative to the image CDN
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Average rating on a 0-10 scale
    #[serde(default)]
    pub vote_average: f64,
    /// Number of ratings
    #[serde(default)]
    pub vote_count: u64,
    /// Release date as `YYYY-MM-DD`, empty when unknown
    #[serde(default)]
    pub release_date: Option<String>,
    /// Localized synopsis
    #[serde(default)]
    pub overview: String,
    /// Genre identifiers
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl Movie {
    /// Release year, if the date is known.
    pub fn release_year(&self) -> Option<i32> {
        parse_release_year(self.release_date.as_deref()?)
    }
}

/// One page of a movie list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    /// Page number (1-indexed)
    #[serde(default = "first_page")]
    pub page: u32,
    /// Movies on this page
    #[serde(default)]
    pub results: Vec<Movie>,
    /// Number of pages available
    #[serde(default = "first_page")]
    pub total_pages: u32,
    /// Number of movies across all pages
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl MoviePage {
    /// A page with no results.
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            results: Vec::new(),
            total_pages: 1,
            total_results: 0,
        }
    }
}

/// Genre label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre identifier used by discover filters
    pub id: u32,
    /// Localized genre name
    pub name: String,
}

/// Full movie record for a detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// Upstream identifier
    pub id: MovieId,
    /// Localized title
    pub title: String,
    /// Marketing tagline
    #[serde(default)]
    pub tagline: Option<String>,
    /// Poster path relative to the image CDN
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Average rating on a 0-10 scale
    #[serde(default)]
    pub vote_average: f64,
    /// Number of ratings
    #[serde(default)]
    pub vote_count: u64,
    /// Release date as `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Genres of the movie
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Localized synopsis
    #[serde(default)]
    pub overview: String,
}

impl MovieDetails {
    /// Release year, if the date is known.
    pub fn release_year(&self) -> Option<i32> {
        parse_release_year(self.release_date.as_deref()?)
    }
}

/// Cast member of a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    /// Person identifier
    pub id: u64,
    /// Actor name
    pub name: String,
    /// Role played
    #[serde(default)]
    pub character: Option<String>,
    /// Portrait path relative to the image CDN
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Credits of a movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    /// Cast in billing order
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// Video attached to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Site-specific video key
    pub key: String,
    /// Hosting site, e.g. `YouTube`
    pub site: String,
    /// Video kind, e.g. `Trailer`, `Teaser`, `Featurette`
    #[serde(rename = "type")]
    pub kind: String,
    /// Video title
    #[serde(default)]
    pub name: String,
}

impl Video {
    /// Whether this video can be shown in the trailer viewer.
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && matches!(self.kind.as_str(), "Trailer" | "Teaser")
    }
}

/// Trailer ready to embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trailer {
    /// YouTube video key
    pub key: String,
    /// Language the trailer was found in
    pub language: String,
}

impl Trailer {
    /// Embeddable player URL with autoplay and no related videos.
    pub fn embed_url(&self) -> String {
        format!(
            "https://www.youtube.com/embed/{}?autoplay=1&rel=0",
            self.key
        )
    }
}

/// Detail page content: the movie plus its leading cast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetailsView {
    /// Movie record
    pub details: MovieDetails,
    /// Leading cast members, truncated to the configured limit
    pub cast: Vec<CastMember>,
}

impl From<&Movie> for FavoriteItem {
    fn from(movie: &Movie) -> Self {
        let mut item = FavoriteItem::new(movie.id, movie.title.clone())
            .with_vote_average(movie.vote_average);
        item.poster_path = movie.poster_path.clone();
        item.release_date = movie.release_date.clone();
        item.extra
            .insert("overview".to_string(), movie.overview.clone().into());
        item.extra
            .insert("vote_count".to_string(), movie.vote_count.into());
        item
    }
}

impl From<&MovieDetails> for FavoriteItem {
    fn from(details: &MovieDetails) -> Self {
        let mut item = FavoriteItem::new(details.id, details.title.clone())
            .with_vote_average(details.vote_average);
        item.poster_path = details.poster_path.clone();
        item.release_date = details.release_date.clone();
        item.extra
            .insert("overview".to_string(), details.overview.clone().into());
        item.extra
            .insert("vote_count".to_string(), details.vote_count.into());
        if let Some(runtime) = details.runtime {
            item.extra.insert("runtime".to_string(), runtime.into());
        }
        if let Ok(genres) = serde_json::to_value(&details.genres) {
            item.extra.insert("genres".to_string(), genres);
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_page() {
        let json = r#"{
            "page": 2,
            "results": [
                {"id": 603, "title": "Matrix", "poster_path": "/m.jpg", "vote_average": 8.2,
                 "vote_count": 25000, "release_date": "1999-03-30", "overview": "Neo",
                 "genre_ids": [28, 878], "adult": false}
            ],
            "total_pages": 40210,
            "total_results": 804196
        }"#;

        let page: MoviePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 40210);
        assert_eq!(page.results[0].id, MovieId(603));
        assert_eq!(page.results[0].release_year(), Some(1999));
        assert_eq!(page.results[0].genre_ids, vec![28, 878]);
    }

    #[test]
    fn test_parse_sparse_movie() {
        let movie: Movie =
            serde_json::from_str(r#"{"id": 1, "title": "Untitled", "poster_path": null, "release_date": ""}"#)
                .unwrap();
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.release_year(), None);
        assert_eq!(movie.vote_average, 0.0);
    }

    #[test]
    fn test_video_filter() {
        let trailer = Video {
            key: "abc".to_string(),
            site: "YouTube".to_string(),
            kind: "Teaser".to_string(),
            name: String::new(),
        };
        assert!(trailer.is_youtube_trailer());

        let featurette = Video {
            kind: "Featurette".to_string(),
            ..trailer.clone()
        };
        assert!(!featurette.is_youtube_trailer());

        let vimeo = Video {
            site: "Vimeo".to_string(),
            ..trailer
        };
        assert!(!vimeo.is_youtube_trailer());
    }

    #[test]
    fn test_embed_url() {
        let trailer = Trailer {
            key: "m8e-FF8MsqU".to_string(),
            language: "en".to_string(),
        };
        assert_eq!(
            trailer.embed_url(),
            "https://www.youtube.com/embed/m8e-FF8MsqU?autoplay=1&rel=0"
        );
    }

    #[test]
    fn test_favorite_snapshot_from_details() {
        let details = MovieDetails {
            id: MovieId(27205),
            title: "Inception".to_string(),
            tagline: None,
            poster_path: Some("/inception.jpg".to_string()),
            vote_average: 8.4,
            vote_count: 36000,
            release_date: Some("2010-07-15".to_string()),
            runtime: Some(148),
            genres: vec![Genre {
                id: 28,
                name: "Action".to_string(),
            }],
            overview: "Dreams".to_string(),
        };

        let item = FavoriteItem::from(&details);
        assert_eq!(item.id, MovieId(27205));
        assert_eq!(item.poster_path.as_deref(), Some("/inception.jpg"));
        assert_eq!(item.vote_average, Some(8.4));
        assert_eq!(item.release_year(), Some(2010));
        assert_eq!(item.extra["runtime"], 148);
        assert_eq!(item.extra["genres"][0]["name"], "Action");
    }
}
