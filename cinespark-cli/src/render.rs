//! Plain-text rendering of catalog views.

use cinespark_core::pagination::render_page_selector;
use cinespark_core::{FavoriteItem, FavoritesStore, Theme};
use cinespark_search::{Genre, Movie, MovieCatalogService, MovieDetailsView, MoviePage};

const NOT_AVAILABLE: &str = "N/A";

fn rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(rating) if rating > 0.0 => format!("{rating:.2}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn year(release_year: Option<i32>) -> String {
    release_year.map_or_else(|| NOT_AVAILABLE.to_string(), |year| year.to_string())
}

/// Joins lines, each ending in a newline.
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

fn heart(is_favorite: bool) -> char {
    if is_favorite { '♥' } else { '♡' }
}

/// One card line: favorite marker, id, title, rating and year.
pub fn movie_line(movie: &Movie, is_favorite: bool) -> String {
    format!(
        "{} {:>8}  {}  ★ {} • {}",
        heart(is_favorite),
        movie.id.as_u64(),
        movie.title,
        rating(Some(movie.vote_average)),
        year(movie.release_year())
    )
}

/// A list page followed by its page selector.
pub fn movie_page(title: &str, page: &MoviePage, favorites: &FavoritesStore) -> String {
    let mut lines = vec![format!("{title} (page {} of {})", page.page, page.total_pages)];

    if page.results.is_empty() {
        lines.push("No movies found.".to_string());
    }
    lines.extend(
        page.results
            .iter()
            .map(|movie| movie_line(movie, favorites.is_favorite(movie.id))),
    );

    let selector = render_page_selector(page.page, page.total_pages);
    if !selector.is_empty() {
        lines.push(String::new());
        lines.push(selector);
    }
    block(lines)
}

/// Detail page: header, facts, overview and leading cast.
pub fn details(
    view: &MovieDetailsView,
    catalog: &MovieCatalogService,
    is_favorite: bool,
) -> String {
    let movie = &view.details;
    let mut lines = vec![format!(
        "{} {} ({})",
        heart(is_favorite),
        movie.title,
        year(movie.release_year())
    )];

    if let Some(tagline) = &movie.tagline {
        lines.push(format!("  \"{tagline}\""));
    }
    lines.push(format!(
        "  ★ {} ({} votes)",
        rating(Some(movie.vote_average)),
        movie.vote_count
    ));
    if let Some(runtime) = movie.runtime.filter(|minutes| *minutes > 0) {
        lines.push(format!("  {}h{:02}", runtime / 60, runtime % 60));
    }
    if !movie.genres.is_empty() {
        let names: Vec<&str> = movie.genres.iter().map(|genre| genre.name.as_str()).collect();
        lines.push(format!("  {}", names.join(", ")));
    }
    if let Some(poster) = catalog.poster_url(movie.poster_path.as_deref()) {
        lines.push(format!("  Poster: {poster}"));
    }
    if !movie.overview.is_empty() {
        lines.push(String::new());
        lines.push(movie.overview.clone());
    }

    if !view.cast.is_empty() {
        lines.push(String::new());
        lines.push("Cast".to_string());
        for member in &view.cast {
            let character = member.character.as_deref().unwrap_or(NOT_AVAILABLE);
            let portrait = catalog
                .profile_url(member.profile_path.as_deref())
                .map(|profile| format!("  [{profile}]"))
                .unwrap_or_default();
            lines.push(format!("  {} as {character}{portrait}", member.name));
        }
    }
    block(lines)
}

/// Saved favorites with a count header, or the empty-state hint.
pub fn favorites(items: &[FavoriteItem]) -> String {
    let plural = if items.len() > 1 { "s" } else { "" };
    let mut lines = vec![format!("My favorites ({} movie{plural})", items.len())];

    if items.is_empty() {
        lines.push("No favorites yet. Use 'cinespark favorites add <id>' to save a movie.".to_string());
    }
    lines.extend(items.iter().map(|item| {
        format!(
            "{} {:>8}  {}  ★ {} • {}",
            heart(true),
            item.id.as_u64(),
            item.title,
            rating(item.vote_average),
            year(item.release_year())
        )
    }));
    block(lines)
}

/// Genre table for the discover filters.
pub fn genres(genres: &[Genre]) -> String {
    block(
        genres
            .iter()
            .map(|genre| format!("{:>6}  {}", genre.id, genre.name))
            .collect(),
    )
}

/// Theme status line.
pub fn theme(theme: Theme) -> String {
    match theme {
        Theme::Dark => "Theme: dark".to_string(),
        Theme::Light => "Theme: light".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cinespark_core::storage::test_fixtures::sample_item;
    use cinespark_core::{MemoryStorage, MovieId};

    use super::*;
    use super::genres as render_genres;

    fn movie(id: u64, vote_average: f64, release_date: Option<&str>) -> Movie {
        Movie {
            id: MovieId(id),
            title: format!("Movie {id}"),
            poster_path: None,
            vote_average,
            vote_count: 10,
            release_date: release_date.map(str::to_string),
            overview: String::new(),
            genre_ids: Vec::new(),
        }
    }

    #[test]
    fn test_movie_line_formats_rating_and_year() {
        let line = movie_line(&movie(603, 8.2, Some("1999-03-30")), true);
        assert_eq!(line, "♥      603  Movie 603  ★ 8.20 • 1999");
    }

    #[test]
    fn test_missing_rating_and_date_show_placeholder() {
        let line = movie_line(&movie(1, 0.0, Some("")), false);
        assert!(line.starts_with('♡'));
        assert!(line.ends_with("★ N/A • N/A"));
    }

    #[test]
    fn test_page_marks_favorites_and_renders_selector() {
        let mut store = FavoritesStore::open(Arc::new(MemoryStorage::new()));
        store.add(sample_item(2)).unwrap();

        let page = MoviePage {
            page: 5,
            results: vec![movie(1, 7.0, None), movie(2, 6.5, None)],
            total_pages: 10,
            total_results: 200,
        };

        let text = movie_page("Popular", &page, &store);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Popular (page 5 of 10)");
        assert!(lines[1].starts_with('♡'));
        assert!(lines[2].starts_with('♥'));
        assert_eq!(lines.last().copied(), Some("< 1 ... 3 4 [5] 6 7 ... 10 >"));
    }

    #[test]
    fn test_single_page_has_no_selector() {
        let store = FavoritesStore::open(Arc::new(MemoryStorage::new()));
        let page = MoviePage::empty(1);

        let text = movie_page("Search", &page, &store);
        assert_eq!(text, "Search (page 1 of 1)\nNo movies found.\n");
    }

    #[test]
    fn test_favorites_count_and_empty_state() {
        assert!(favorites(&[]).contains("(0 movie)"));
        assert!(favorites(&[]).contains("No favorites yet"));

        let text = favorites(&[sample_item(1), sample_item(2)]);
        assert!(text.starts_with("My favorites (2 movies)"));
        assert_eq!(text.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_details_layout() {
        let catalog = MovieCatalogService::new_demo(&cinespark_core::CinesparkConfig::for_testing());
        let view = catalog.details(MovieId(27205)).await.unwrap();

        let text = details(&view, &catalog, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "♡ Inception (2010)");
        assert_eq!(lines[1], "  \"Your mind is the scene of the crime.\"");
        assert_eq!(lines[2], "  ★ 8.40 (36000 votes)");
        assert_eq!(lines[3], "  2h28");
        assert!(text.contains("  Poster: https://image.tmdb.org/t/p/w500/demo-27205.jpg\n"));
        assert!(text.ends_with("\nCast\n  Leonardo DiCaprio as Cobb\n  Joseph Gordon-Levitt as Arthur\n  Elliot Page as Ariadne\n"));
    }

    #[test]
    fn test_genres_table() {
        let genres = [
            Genre { id: 28, name: "Action".to_string() },
            Genre { id: 878, name: "Science Fiction".to_string() },
        ];
        assert_eq!(render_genres(&genres), "    28  Action\n   878  Science Fiction\n");
        assert_eq!(render_genres(&[]), "");
    }
}
