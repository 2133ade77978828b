//! CLI command implementations

use anyhow::{Result, anyhow};
use cinespark_core::{CinesparkError, FavoriteItem, MovieId, StoreError, Theme, ToggleOutcome};
use cinespark_search::{CatalogError, Category, DiscoverFilters, SearchDebouncer, SortOrder};
use clap::{Args, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::App;
use crate::render;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse a movie category
    Browse {
        /// popular, top_rated, upcoming, now_playing or discover
        #[arg(default_value = "popular")]
        category: Category,
        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Search movies by title
    Search {
        /// Title to look for; leave empty for popular movies
        query: Option<String>,
        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Read queries from stdin as you type
        #[arg(short, long, conflicts_with = "query")]
        interactive: bool,
    },
    /// Show a movie's details and cast
    Details {
        /// Movie id
        id: MovieId,
    },
    /// Find a movie's trailer
    Trailer {
        /// Movie id
        id: MovieId,
    },
    /// List genres usable with --genre
    Genres,
    /// Manage saved favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Show or change the color theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

/// Discover filters, ignored for other categories
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Genre id (see `cinespark genres`)
    #[arg(long)]
    pub genre: Option<u32>,
    /// Release year
    #[arg(long)]
    pub year: Option<i32>,
    /// Minimum average rating
    #[arg(long)]
    pub min_rating: Option<f32>,
    /// Maximum average rating
    #[arg(long)]
    pub max_rating: Option<f32>,
    /// Sort order, e.g. popularity.desc or vote_average.desc
    #[arg(long, default_value = "popularity.desc")]
    pub sort: SortOrder,
}

impl From<FilterArgs> for DiscoverFilters {
    fn from(args: FilterArgs) -> Self {
        Self {
            genre: args.genre,
            year: args.year,
            min_rating: args.min_rating,
            max_rating: args.max_rating,
            sort_by: args.sort,
        }
    }
}

/// Favorites subcommands
#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// List saved favorites
    List,
    /// Save a movie
    Add { id: MovieId },
    /// Remove a saved movie
    Remove { id: MovieId },
    /// Save a movie, or remove it if already saved
    Toggle { id: MovieId },
}

/// Theme subcommands
#[derive(Subcommand, Debug)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between dark and light
    Toggle,
    /// Set a specific theme
    Set { theme: Theme },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the user-facing message of whichever catalog or store call fails
pub async fn handle_command(app: &mut App, command: Commands) -> Result<()> {
    match command {
        Commands::Browse {
            category,
            page,
            filters,
        } => browse(app, category, filters.into(), page).await,
        Commands::Search {
            interactive: true, ..
        } => interactive_search(app).await,
        Commands::Search { query, page, .. } => {
            search(app, query.as_deref().unwrap_or_default(), page).await
        }
        Commands::Details { id } => details(app, id).await,
        Commands::Trailer { id } => trailer(app, id).await,
        Commands::Genres => genres(app).await,
        Commands::Favorites { action } => favorites(app, action).await,
        Commands::Theme { action } => theme(app, action),
    }
}

/// Logs the underlying failure and keeps only the user-facing message.
fn user_facing(error: CatalogError) -> anyhow::Error {
    tracing::error!(error = %error, "Catalog request failed");
    anyhow!(error.user_message())
}

/// Same as [`user_facing`] for favorites and theme store failures.
fn store_failure(error: StoreError) -> anyhow::Error {
    let error = CinesparkError::from(error);
    tracing::error!(error = %error, "Store change rejected");
    anyhow!(error.user_message())
}

/// Print one page of a category list
///
/// # Errors
/// - Catalog request failed
pub async fn browse(
    app: &App,
    category: Category,
    filters: DiscoverFilters,
    page: u32,
) -> Result<()> {
    if !category.accepts_filters() && !filters.is_default() {
        tracing::warn!(category = category.as_str(), "Filters only apply to discover");
    }

    let result = app
        .catalog
        .browse(category, &filters, page)
        .await
        .map_err(user_facing)?;
    print!("{}", render::movie_page(category.label(), &result, &app.favorites));
    Ok(())
}

/// Print one page of search results
///
/// # Errors
/// - Catalog request failed
pub async fn search(app: &App, query: &str, page: u32) -> Result<()> {
    let result = app
        .catalog
        .search(query, page)
        .await
        .map_err(user_facing)?;

    let title = if query.trim().is_empty() {
        "Popular".to_string()
    } else {
        format!("Results for \"{}\"", query.trim())
    };
    print!("{}", render::movie_page(&title, &result, &app.favorites));
    Ok(())
}

/// Search as you type: each stdin line replaces the query, and results are
/// shown once typing pauses.
///
/// # Errors
/// - Reading stdin failed
pub async fn interactive_search(app: &App) -> Result<()> {
    let (debouncer, mut settled) = SearchDebouncer::spawn(app.debounce);
    let mut debouncer = Some(debouncer);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a title and press Enter. Ctrl-D to quit.");

    loop {
        tokio::select! {
            line = lines.next_line(), if debouncer.is_some() => match line? {
                Some(line) => {
                    if let Some(debouncer) = &debouncer {
                        debouncer.push(line);
                    }
                }
                None => {
                    if let Some(debouncer) = debouncer.take() {
                        debouncer.close().await;
                    }
                }
            },
            term = settled.recv() => match term {
                Some(term) => {
                    // Keep the session alive when one lookup fails
                    if let Err(e) = search(app, &term, 1).await {
                        eprintln!("{e}");
                    }
                }
                None => break,
            },
        }
    }

    Ok(())
}

/// Print a movie's detail page
///
/// # Errors
/// - Movie not found or catalog request failed
pub async fn details(app: &App, id: MovieId) -> Result<()> {
    let view = app.catalog.details(id).await.map_err(user_facing)?;
    print!(
        "{}",
        render::details(&view, &app.catalog, app.favorites.is_favorite(id))
    );
    Ok(())
}

/// Print the embeddable trailer URL
///
/// # Errors
/// - No trailer in either language or catalog request failed
pub async fn trailer(app: &App, id: MovieId) -> Result<()> {
    let trailer = app.catalog.find_trailer(id).await.map_err(user_facing)?;
    println!("Trailer ({}): {}", trailer.language, trailer.embed_url());
    Ok(())
}

/// Print the genre list
///
/// # Errors
/// - Catalog request failed
pub async fn genres(app: &App) -> Result<()> {
    let genres = app.catalog.genres().await.map_err(user_facing)?;
    print!("{}", render::genres(&genres));
    Ok(())
}

async fn favorite_snapshot(app: &App, id: MovieId) -> Result<FavoriteItem> {
    let view = app.catalog.details(id).await.map_err(user_facing)?;
    Ok(FavoriteItem::from(&view.details))
}

/// Run a favorites subcommand
///
/// # Errors
/// - Movie lookup failed or the store is not loaded
pub async fn favorites(app: &mut App, action: FavoritesAction) -> Result<()> {
    match action {
        FavoritesAction::List => {
            print!("{}", render::favorites(app.favorites.items()));
        }
        FavoritesAction::Add { id } => {
            if app.favorites.is_favorite(id) {
                println!("Movie {id} is already in your favorites");
                return Ok(());
            }
            let item = favorite_snapshot(app, id).await?;
            let title = item.title.clone();
            app.favorites.add(item).map_err(store_failure)?;
            println!("Added \"{title}\" to favorites");
        }
        FavoritesAction::Remove { id } => {
            if app.favorites.remove(id).map_err(store_failure)? {
                println!("Removed movie {id} from favorites");
            } else {
                println!("Movie {id} is not in your favorites");
            }
        }
        FavoritesAction::Toggle { id } => {
            let item = match app.favorites.get(id) {
                Some(item) => item.clone(),
                None => favorite_snapshot(app, id).await?,
            };
            let title = item.title.clone();
            match app.favorites.toggle(item).map_err(store_failure)? {
                ToggleOutcome::Added => println!("Added \"{title}\" to favorites"),
                ToggleOutcome::Removed => println!("Removed \"{title}\" from favorites"),
            }
        }
    }
    Ok(())
}

/// Run a theme subcommand
///
/// # Errors
/// - The store is not loaded
pub fn theme(app: &mut App, action: ThemeAction) -> Result<()> {
    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            app.theme.toggle().map_err(store_failure)?;
        }
        ThemeAction::Set { theme } => app.theme.set(theme).map_err(store_failure)?,
    }
    println!("{}", render::theme(app.theme.theme()));
    Ok(())
}
