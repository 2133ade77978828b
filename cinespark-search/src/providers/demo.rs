//! Offline catalog for development and demos.

use std::cmp::Ordering;

use async_trait::async_trait;
use cinespark_core::MovieId;

use super::MovieCatalogProvider;
use crate::categories::{Category, DiscoverFilters, SortOrder};
use crate::errors::CatalogError;
use crate::types::{CastMember, Credits, Genre, Movie, MovieDetails, MoviePage, Video};

/// Movies per demo page.
pub const DEMO_PAGE_SIZE: usize = 6;

struct DemoMovie {
    id: u64,
    title: &'static str,
    tagline: &'static str,
    vote_average: f64,
    vote_count: u64,
    release_date: &'static str,
    runtime: u32,
    genre_ids: &'static [u32],
    overview: &'static str,
    cast: &'static [(&'static str, &'static str)],
    // (language, youtube key)
    trailers: &'static [(&'static str, &'static str)],
}

const GENRES: &[(u32, &str, &str)] = &[
    (28, "Action", "Action"),
    (12, "Adventure", "Aventure"),
    (16, "Animation", "Animation"),
    (35, "Comedy", "Comédie"),
    (80, "Crime", "Crime"),
    (18, "Drama", "Drame"),
    (14, "Fantasy", "Fantastique"),
    (10749, "Romance", "Romance"),
    (878, "Science Fiction", "Science-Fiction"),
    (53, "Thriller", "Thriller"),
];

const CATALOG: &[DemoMovie] = &[
    DemoMovie {
        id: 603,
        title: "The Matrix",
        tagline: "Welcome to the Real World.",
        vote_average: 8.2,
        vote_count: 26_000,
        release_date: "1999-03-30",
        runtime: 136,
        genre_ids: &[28, 878],
        overview: "A hacker learns the world he lives in is a simulation.",
        cast: &[("Keanu Reeves", "Neo"), ("Carrie-Anne Moss", "Trinity"), ("Laurence Fishburne", "Morpheus")],
        trailers: &[("en", "vKQi3bBA1y8"), ("fr", "m8e-FF8MsqU")],
    },
    DemoMovie {
        id: 27205,
        title: "Inception",
        tagline: "Your mind is the scene of the crime.",
        vote_average: 8.4,
        vote_count: 36_000,
        release_date: "2010-07-15",
        runtime: 148,
        genre_ids: &[28, 878, 12],
        overview: "A thief who steals secrets through dreams takes one last job.",
        cast: &[("Leonardo DiCaprio", "Cobb"), ("Joseph Gordon-Levitt", "Arthur"), ("Elliot Page", "Ariadne")],
        trailers: &[("en", "YoHD9XEInc0")],
    },
    DemoMovie {
        id: 194,
        title: "Amélie",
        tagline: "One person can change your life forever.",
        vote_average: 7.9,
        vote_count: 11_000,
        release_date: "2001-04-25",
        runtime: 122,
        genre_ids: &[35, 10749],
        overview: "A shy waitress decides to change the lives of those around her.",
        cast: &[("Audrey Tautou", "Amélie Poulain"), ("Mathieu Kassovitz", "Nino Quincampoix")],
        trailers: &[("fr", "HUECWi5pX7o")],
    },
    DemoMovie {
        id: 129,
        title: "Spirited Away",
        tagline: "",
        vote_average: 8.5,
        vote_count: 16_000,
        release_date: "2001-07-20",
        runtime: 125,
        genre_ids: &[16, 14],
        overview: "A girl wanders into a world ruled by gods and witches.",
        cast: &[("Rumi Hiiragi", "Chihiro"), ("Miyu Irino", "Haku")],
        trailers: &[("en", "ByXuk9QqQkk")],
    },
    DemoMovie {
        id: 680,
        title: "Pulp Fiction",
        tagline: "Just because you are a character doesn't mean you have character.",
        vote_average: 8.5,
        vote_count: 27_000,
        release_date: "1994-09-10",
        runtime: 154,
        genre_ids: &[53, 80],
        overview: "The lives of two mob hitmen and a boxer intertwine.",
        cast: &[("John Travolta", "Vincent Vega"), ("Samuel L. Jackson", "Jules Winnfield"), ("Uma Thurman", "Mia Wallace")],
        trailers: &[("en", "s7EdQ4FqbhY")],
    },
    DemoMovie {
        id: 496243,
        title: "Parasite",
        tagline: "Act like you own the place.",
        vote_average: 8.5,
        vote_count: 17_000,
        release_date: "2019-05-30",
        runtime: 133,
        genre_ids: &[35, 53, 18],
        overview: "A poor family schemes to become employed by a wealthy one.",
        cast: &[("Song Kang-ho", "Kim Ki-taek"), ("Choi Woo-shik", "Kim Ki-woo")],
        trailers: &[("en", "5xH0HfJHsaY"), ("fr", "eQvDf1G0p2Q")],
    },
    DemoMovie {
        id: 438631,
        title: "Dune",
        tagline: "Beyond fear, destiny awaits.",
        vote_average: 7.8,
        vote_count: 11_500,
        release_date: "2021-09-15",
        runtime: 155,
        genre_ids: &[878, 12],
        overview: "A noble family becomes embroiled in a war for a desert planet.",
        cast: &[("Timothée Chalamet", "Paul Atreides"), ("Rebecca Ferguson", "Lady Jessica"), ("Zendaya", "Chani")],
        trailers: &[("en", "n9xhJrPXop4")],
    },
    DemoMovie {
        id: 872585,
        title: "Oppenheimer",
        tagline: "The world forever changes.",
        vote_average: 8.1,
        vote_count: 8_500,
        release_date: "2023-07-19",
        runtime: 181,
        genre_ids: &[18],
        overview: "The story of the physicist behind the atomic bomb.",
        cast: &[("Cillian Murphy", "J. Robert Oppenheimer"), ("Emily Blunt", "Kitty Oppenheimer")],
        trailers: &[("en", "uYPbbksJxIg")],
    },
    DemoMovie {
        id: 693134,
        title: "Dune: Part Two",
        tagline: "Long live the fighters.",
        vote_average: 8.2,
        vote_count: 6_000,
        release_date: "2024-02-27",
        runtime: 167,
        genre_ids: &[878, 12],
        overview: "Paul Atreides unites with the Fremen to seek revenge.",
        cast: &[("Timothée Chalamet", "Paul Atreides"), ("Zendaya", "Chani")],
        trailers: &[("en", "Way9Dexny3w"), ("fr", "x4WJq4pFnS8")],
    },
    DemoMovie {
        id: 13,
        title: "Forrest Gump",
        tagline: "The world will never be the same once you've seen it through the eyes of Forrest Gump.",
        vote_average: 8.5,
        vote_count: 27_500,
        release_date: "1994-06-23",
        runtime: 142,
        genre_ids: &[35, 18, 10749],
        overview: "A man with a low IQ witnesses defining moments of history.",
        cast: &[("Tom Hanks", "Forrest Gump"), ("Robin Wright", "Jenny Curran")],
        trailers: &[("en", "bLvqoHBptjg")],
    },
    DemoMovie {
        id: 372058,
        title: "Your Name.",
        tagline: "",
        vote_average: 8.5,
        vote_count: 11_000,
        release_date: "2016-08-26",
        runtime: 106,
        genre_ids: &[16, 10749, 18],
        overview: "Two teenagers share a profound magical connection.",
        cast: &[("Ryunosuke Kamiki", "Taki Tachibana"), ("Mone Kamishiraishi", "Mitsuha Miyamizu")],
        trailers: &[],
    },
    DemoMovie {
        id: 120,
        title: "The Fellowship of the Ring",
        tagline: "One ring to rule them all.",
        vote_average: 8.4,
        vote_count: 24_000,
        release_date: "2001-12-18",
        runtime: 179,
        genre_ids: &[12, 14, 28],
        overview: "A hobbit sets out to destroy a powerful ring.",
        cast: &[("Elijah Wood", "Frodo Baggins"), ("Ian McKellen", "Gandalf"), ("Viggo Mortensen", "Aragorn")],
        trailers: &[("en", "V75dMMIW2B4")],
    },
    DemoMovie {
        id: 335984,
        title: "Blade Runner 2049",
        tagline: "The key to the future is finally unearthed.",
        vote_average: 7.6,
        vote_count: 13_000,
        release_date: "2017-10-04",
        runtime: 164,
        genre_ids: &[878, 18],
        overview: "A young blade runner uncovers a long-buried secret.",
        cast: &[("Ryan Gosling", "K"), ("Harrison Ford", "Rick Deckard")],
        trailers: &[("en", "gCcx85zbxz4")],
    },
    DemoMovie {
        id: 1022789,
        title: "Inside Out 2",
        tagline: "Make room for new emotions.",
        vote_average: 7.6,
        vote_count: 4_500,
        release_date: "2024-06-11",
        runtime: 97,
        genre_ids: &[16, 35],
        overview: "Riley's mind makes room for some unexpected new emotions.",
        cast: &[("Amy Poehler", "Joy (voice)"), ("Maya Hawke", "Anxiety (voice)")],
        trailers: &[("en", "LEjhY15eCx0")],
    },
];

impl DemoMovie {
    fn summary(&self) -> Movie {
        Movie {
            id: MovieId(self.id),
            title: self.title.to_string(),
            poster_path: Some(format!("/demo-{}.jpg", self.id)),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            release_date: Some(self.release_date.to_string()),
            overview: self.overview.to_string(),
            genre_ids: self.genre_ids.to_vec(),
        }
    }

    fn year(&self) -> Option<i32> {
        self.release_date.get(..4)?.parse().ok()
    }

    fn matches(&self, filters: &DiscoverFilters) -> bool {
        let rating = self.vote_average as f32;
        filters
            .genre
            .is_none_or(|genre| self.genre_ids.contains(&genre))
            && filters.year.is_none_or(|year| self.year() == Some(year))
            && filters.min_rating.is_none_or(|min| rating >= min)
            && filters.max_rating.is_none_or(|max| rating <= max)
    }
}

fn compare(order: SortOrder, a: &DemoMovie, b: &DemoMovie) -> Ordering {
    let by_rating = || a.vote_average.total_cmp(&b.vote_average);
    match order {
        SortOrder::PopularityDesc => b.vote_count.cmp(&a.vote_count),
        SortOrder::PopularityAsc => a.vote_count.cmp(&b.vote_count),
        SortOrder::RatingDesc => by_rating().reverse(),
        SortOrder::RatingAsc => by_rating(),
        SortOrder::ReleaseDateDesc => b.release_date.cmp(a.release_date),
        SortOrder::ReleaseDateAsc => a.release_date.cmp(b.release_date),
        SortOrder::TitleAsc => a.title.cmp(b.title),
        SortOrder::TitleDesc => b.title.cmp(a.title),
    }
}

/// Demo provider serving a fixed offline catalog.
///
/// Lists are paged in slices of [`DEMO_PAGE_SIZE`] and discover filters are
/// applied locally, so every view works without network access or a token.
/// Trailers only exist in some locales, which exercises the language
/// fallback.
#[derive(Debug, Default)]
pub struct DemoProvider;

impl DemoProvider {
    /// Creates a new demo provider.
    pub fn new() -> Self {
        Self
    }

    fn find(id: MovieId) -> Result<&'static DemoMovie, CatalogError> {
        CATALOG
            .iter()
            .find(|movie| movie.id == id.as_u64())
            .ok_or(CatalogError::MovieNotFound { id: id.as_u64() })
    }

    fn paginate(movies: Vec<&DemoMovie>, page: u32) -> MoviePage {
        let total_results = movies.len();
        let total_pages = total_results.div_ceil(DEMO_PAGE_SIZE).max(1);
        let start = (page.max(1) as usize - 1) * DEMO_PAGE_SIZE;

        MoviePage {
            page,
            results: movies
                .into_iter()
                .skip(start)
                .take(DEMO_PAGE_SIZE)
                .map(DemoMovie::summary)
                .collect(),
            total_pages: total_pages as u32,
            total_results: total_results as u64,
        }
    }
}

#[async_trait]
impl MovieCatalogProvider for DemoProvider {
    async fn list_movies(
        &self,
        category: Category,
        filters: &DiscoverFilters,
        page: u32,
        _language: &str,
    ) -> Result<MoviePage, CatalogError> {
        let mut movies: Vec<&DemoMovie> = CATALOG.iter().collect();

        let order = match category {
            Category::Popular => SortOrder::PopularityDesc,
            Category::TopRated => SortOrder::RatingDesc,
            Category::Upcoming => SortOrder::ReleaseDateDesc,
            Category::NowPlaying => {
                movies.retain(|movie| movie.year().is_some_and(|year| year >= 2019));
                SortOrder::ReleaseDateDesc
            }
            Category::Discover => {
                movies.retain(|movie| movie.matches(filters));
                filters.sort_by
            }
        };
        movies.sort_by(|a, b| compare(order, a, b));

        Ok(Self::paginate(movies, page))
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
        _language: &str,
    ) -> Result<MoviePage, CatalogError> {
        let needle = query.trim().to_lowercase();
        let movies = CATALOG
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .collect();

        Ok(Self::paginate(movies, page))
    }

    async fn movie_details(
        &self,
        id: MovieId,
        language: &str,
    ) -> Result<MovieDetails, CatalogError> {
        let movie = Self::find(id)?;
        let genres = self
            .genres(language)
            .await?
            .into_iter()
            .filter(|genre| movie.genre_ids.contains(&genre.id))
            .collect();

        Ok(MovieDetails {
            id,
            title: movie.title.to_string(),
            tagline: Some(movie.tagline.to_string()).filter(|tagline| !tagline.is_empty()),
            poster_path: Some(format!("/demo-{}.jpg", movie.id)),
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            release_date: Some(movie.release_date.to_string()),
            runtime: Some(movie.runtime),
            genres,
            overview: movie.overview.to_string(),
        })
    }

    async fn movie_credits(&self, id: MovieId, _language: &str) -> Result<Credits, CatalogError> {
        let movie = Self::find(id)?;
        let cast = movie
            .cast
            .iter()
            .zip(1u64..)
            .map(|((name, character), order)| CastMember {
                id: movie.id * 100 + order,
                name: name.to_string(),
                character: Some(character.to_string()),
                profile_path: None,
            })
            .collect();

        Ok(Credits { cast })
    }

    async fn movie_videos(&self, id: MovieId, language: &str) -> Result<Vec<Video>, CatalogError> {
        let movie = Self::find(id)?;
        Ok(movie
            .trailers
            .iter()
            .filter(|(trailer_language, _)| *trailer_language == language)
            .map(|(_, key)| Video {
                key: key.to_string(),
                site: "YouTube".to_string(),
                kind: "Trailer".to_string(),
                name: format!("{} - Official Trailer", movie.title),
            })
            .collect())
    }

    async fn genres(&self, language: &str) -> Result<Vec<Genre>, CatalogError> {
        let french = language.starts_with("fr");
        Ok(GENRES
            .iter()
            .map(|(id, english, french_name)| Genre {
                id: *id,
                name: (if french { french_name } else { english }).to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_popular_pages() {
        let provider = DemoProvider::new();
        let filters = DiscoverFilters::default();

        let first = provider
            .list_movies(Category::Popular, &filters, 1, "fr")
            .await
            .unwrap();
        assert_eq!(first.results.len(), DEMO_PAGE_SIZE);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_results, CATALOG.len() as u64);
        assert_eq!(first.results[0].id, MovieId(27205));

        let last = provider
            .list_movies(Category::Popular, &filters, 3, "fr")
            .await
            .unwrap();
        assert_eq!(last.results.len(), CATALOG.len() - 2 * DEMO_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_discover_filters() {
        let provider = DemoProvider::new();
        let filters = DiscoverFilters {
            genre: Some(878),
            min_rating: Some(8.0),
            sort_by: SortOrder::ReleaseDateAsc,
            ..DiscoverFilters::default()
        };

        let page = provider
            .list_movies(Category::Discover, &filters, 1, "fr")
            .await
            .unwrap();
        let titles: Vec<_> = page.results.iter().map(|movie| movie.title.as_str()).collect();
        assert_eq!(titles, vec!["The Matrix", "Inception", "Dune: Part Two"]);
    }

    #[tokio::test]
    async fn test_filters_ignored_outside_discover() {
        let provider = DemoProvider::new();
        let filters = DiscoverFilters {
            year: Some(1800),
            ..DiscoverFilters::default()
        };

        let page = provider
            .list_movies(Category::TopRated, &filters, 1, "fr")
            .await
            .unwrap();
        assert!(!page.results.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let provider = DemoProvider::new();
        let page = provider.search_movies("DUNE", 1, "fr").await.unwrap();
        assert_eq!(page.total_results, 2);

        let empty = provider.search_movies("zzz", 1, "fr").await.unwrap();
        assert!(empty.results.is_empty());
        assert_eq!(empty.total_pages, 1);
    }

    #[tokio::test]
    async fn test_details_localizes_genres() {
        let provider = DemoProvider::new();
        let details = provider.movie_details(MovieId(194), "fr").await.unwrap();
        let names: Vec<_> = details.genres.iter().map(|genre| genre.name.as_str()).collect();
        assert_eq!(names, vec!["Comédie", "Romance"]);
        assert_eq!(details.runtime, Some(122));

        let missing = provider.movie_details(MovieId(1), "fr").await;
        assert!(matches!(missing, Err(CatalogError::MovieNotFound { id: 1 })));
    }

    #[tokio::test]
    async fn test_videos_per_language() {
        let provider = DemoProvider::new();
        assert!(provider.movie_videos(MovieId(27205), "fr").await.unwrap().is_empty());
        assert_eq!(
            provider.movie_videos(MovieId(27205), "en").await.unwrap()[0].key,
            "YoHD9XEInc0"
        );
    }
}
