//! Catalog workflows against the offline demo catalog.

use std::sync::Arc;
use std::time::Duration;

use cinespark_core::storage::test_fixtures::create_temp_file_storage;
use cinespark_core::{CinesparkConfig, FavoriteItem, FavoritesStore, MovieId};
use cinespark_search::{
    CatalogError, Category, DiscoverFilters, MovieCatalogService, SearchDebouncer, SortOrder,
};
use tokio_test::{assert_err, assert_ok};

fn demo_catalog() -> MovieCatalogService {
    MovieCatalogService::new_demo(&CinesparkConfig::for_testing())
}

#[tokio::test]
async fn test_browse_every_category() {
    let catalog = demo_catalog();

    for category in Category::ALL {
        let page = assert_ok!(
            catalog
                .browse(category, &DiscoverFilters::default(), 1)
                .await
        );
        assert_eq!(page.page, 1);
        assert!(page.total_pages >= 1);
        assert!(!page.results.is_empty(), "{category} returned nothing");
    }
}

#[tokio::test]
async fn test_out_of_range_page_lands_on_last_page() {
    let catalog = demo_catalog();

    for requested in [4, 7, 10_000] {
        let page = assert_ok!(
            catalog
                .browse(Category::Popular, &DiscoverFilters::default(), requested)
                .await
        );
        assert!(page.page <= page.total_pages);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert!(!page.results.is_empty());
    }

    let search = assert_ok!(catalog.search("the", 99).await);
    assert!(search.page >= 1 && search.page <= search.total_pages);
    assert!(!search.results.is_empty());
}

#[tokio::test]
async fn test_blank_search_matches_popular_discover() {
    let catalog = demo_catalog();

    let blank = assert_ok!(catalog.search("  ", 1).await);
    let discover = assert_ok!(
        catalog
            .browse(
                Category::Discover,
                &DiscoverFilters {
                    sort_by: SortOrder::PopularityDesc,
                    ..DiscoverFilters::default()
                },
                1
            )
            .await
    );
    assert_eq!(blank, discover);
}

#[tokio::test]
async fn test_discover_by_year() {
    let catalog = demo_catalog();
    let filters = DiscoverFilters {
        year: Some(2001),
        sort_by: SortOrder::TitleAsc,
        ..DiscoverFilters::default()
    };

    let page = assert_ok!(catalog.browse(Category::Discover, &filters, 1).await);
    let titles: Vec<&str> = page.results.iter().map(|movie| movie.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Amélie", "Spirited Away", "The Fellowship of the Ring"]
    );
}

#[tokio::test]
async fn test_favorite_from_details_survives_restart() {
    let catalog = demo_catalog();
    let (_temp_dir, storage) = create_temp_file_storage();

    let view = assert_ok!(catalog.details(MovieId(27205)).await);
    assert!(view.cast.len() <= 8);

    let mut store = FavoritesStore::open(Arc::new(storage.clone()));
    assert!(assert_ok!(store.add(FavoriteItem::from(&view.details))));

    let restarted = FavoritesStore::open(Arc::new(storage));
    let saved = restarted.get(MovieId(27205)).unwrap();
    assert_eq!(saved.title, "Inception");
    assert_eq!(saved.release_year(), Some(2010));
    assert_eq!(saved.extra["runtime"], 148);
    assert_eq!(
        catalog.poster_url(saved.poster_path.as_deref()).as_deref(),
        Some("https://image.tmdb.org/t/p/w500/demo-27205.jpg")
    );
}

#[tokio::test]
async fn test_trailer_language_fallback() {
    let catalog = demo_catalog();

    let french = assert_ok!(catalog.find_trailer(MovieId(194)).await);
    assert_eq!(french.language, "fr");

    let english = assert_ok!(catalog.find_trailer(MovieId(27205)).await);
    assert_eq!(english.language, "en");
    assert_eq!(
        english.embed_url(),
        "https://www.youtube.com/embed/YoHD9XEInc0?autoplay=1&rel=0"
    );

    let missing = assert_err!(catalog.find_trailer(MovieId(372058)).await);
    assert!(matches!(missing, CatalogError::TrailerUnavailable { id: 372058 }));
}

#[tokio::test]
async fn test_unknown_movie_details() {
    let catalog = demo_catalog();
    let error = assert_err!(catalog.details(MovieId(999_999)).await);
    assert_eq!(error.user_message(), "This movie could not be found.");
}

#[tokio::test(start_paused = true)]
async fn test_debounced_typing_issues_one_search() {
    let catalog = demo_catalog();
    let (debouncer, mut settled) = SearchDebouncer::spawn(Duration::from_millis(750));

    for term in ["d", "du", "dun", "dune"] {
        debouncer.push(term);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    debouncer.close().await;

    let mut searches = Vec::new();
    while let Some(term) = settled.recv().await {
        searches.push(assert_ok!(catalog.search(&term, 1).await));
    }

    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].total_results, 2);
}
