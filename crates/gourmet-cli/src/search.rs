//! `search` and `favorites` command handlers.

use std::time::Duration;

use anyhow::bail;
use clap::Args;
use gourmet_api::GourmetClient;
use gourmet_core::{Amenity, AppConfig, Coordinates, SearchCriteria, SearchRange};
use gourmet_session::{
    locate_with_timeout, page_window, total_pages, Bookmarks, FixedLocator, JsonFileStore,
    Locator, RequestStatus, SearchSession, SessionState, ShopSource,
};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text keyword (e.g., "yakitori")
    #[arg(long)]
    pub keyword: Option<String>,
    /// Latitude of the search centre
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Longitude of the search centre
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,
    /// Radius tier: 1=300m 2=500m 3=1km 4=2km 5=3km
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub range: u8,
    /// Genre code (see `gourmet genres`)
    #[arg(long)]
    pub genre: Option<String>,
    /// Budget code (see `gourmet budgets`)
    #[arg(long)]
    pub budget: Option<String>,
    /// Required facility; repeat for several (see `gourmet amenities`)
    #[arg(long = "amenity")]
    pub amenities: Vec<Amenity>,
    /// Page to show (20 shops per page)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

impl SearchArgs {
    /// Builds criteria around an already-resolved location.
    ///
    /// # Errors
    ///
    /// Returns an error if `range` is outside 1..=5.
    pub fn to_criteria(&self, location: Option<Coordinates>) -> anyhow::Result<SearchCriteria> {
        let mut criteria = SearchCriteria::new(SearchRange::new(self.range)?);
        criteria.location = location;
        criteria.keyword.clone_from(&self.keyword);
        criteria.genre.clone_from(&self.genre);
        criteria.budget.clone_from(&self.budget);
        criteria.amenities.extend(self.amenities.iter().copied());
        Ok(criteria)
    }

    fn flag_location(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

/// Run a fresh search and print the requested page.
///
/// Without `--lat`/`--lng` the search runs with no location. When a position
/// is requested and cannot be obtained, no search is made.
///
/// # Errors
///
/// Returns an error if the position cannot be obtained, the client cannot be
/// built, or the search fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    args: &SearchArgs,
    json: bool,
) -> anyhow::Result<()> {
    let locator = args
        .flag_location()
        .map(|position| FixedLocator::new(Some(position)));
    let limit = Duration::from_secs(config.locate_timeout_secs);

    let client = GourmetClient::from_config(config)?;
    let session = execute_search(client, locator.as_ref(), limit, args).await?;

    let bookmarks = Bookmarks::load(JsonFileStore::new(&config.bookmarks_dir))?;
    report(&session, &bookmarks, json)
}

/// Resolves the position (when one is requested), then searches and moves to
/// `args.page`.
///
/// # Errors
///
/// Returns the locator's user-facing message if the position is unavailable;
/// the search is not started in that case.
pub(crate) async fn execute_search<L, S>(
    source: S,
    locator: Option<&L>,
    limit: Duration,
    args: &SearchArgs,
) -> anyhow::Result<SearchSession<S>>
where
    L: Locator + Sync,
    S: ShopSource,
{
    let location = match locator {
        Some(locator) => match locate_with_timeout(locator, limit).await {
            Ok(position) => Some(position),
            Err(e) => bail!("{}", e.user_message()),
        },
        None => None,
    };

    let criteria = args.to_criteria(location)?;
    let mut session = SearchSession::new(source);
    session.search(criteria).await;
    goto_page(&mut session, args.page).await;
    Ok(session)
}

/// Look up bookmarked shops and print the requested page.
///
/// # Errors
///
/// Returns an error if bookmarks cannot be read or the lookup fails.
pub(crate) async fn run_favorites(config: &AppConfig, page: u32, json: bool) -> anyhow::Result<()> {
    let bookmarks = Bookmarks::load(JsonFileStore::new(&config.bookmarks_dir))?;
    if bookmarks.ids().is_empty() && !json {
        println!("no bookmarks yet; run `gourmet bookmark <id>` first");
        return Ok(());
    }

    let mut session = SearchSession::new(GourmetClient::from_config(config)?);
    session.search_by_ids(bookmarks.ids().to_vec()).await;
    goto_page(&mut session, page).await;

    report(&session, &bookmarks, json)
}

/// Moves past page 1 only when the first page loaded.
pub(crate) async fn goto_page<S: ShopSource>(session: &mut SearchSession<S>, page: u32) {
    if page > 1 && session.state().status == RequestStatus::Succeeded {
        session.change_page(page).await;
    }
}

fn report<S: ShopSource>(
    session: &SearchSession<S>,
    bookmarks: &Bookmarks<JsonFileStore>,
    json: bool,
) -> anyhow::Result<()> {
    let state = session.state();
    if let RequestStatus::Failed(message) = &state.status {
        bail!("{message}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
        return Ok(());
    }

    print_listing(state, bookmarks);
    Ok(())
}

fn print_listing(state: &SessionState, bookmarks: &Bookmarks<JsonFileStore>) {
    if state.results.is_empty() {
        println!("no shops found");
        return;
    }

    println!(
        "{} shops found (page {})",
        state.results.total_available, state.page
    );
    println!("{:<2}{:<13}{:<32}{:<20}ACCESS", "", "ID", "NAME", "GENRE");
    for shop in &state.results.shops {
        let mark = if bookmarks.is_bookmarked(&shop.id) { "*" } else { "" };
        println!(
            "{:<2}{:<13}{:<32}{:<20}{}",
            mark,
            shop.id,
            truncate(&shop.name, 30),
            truncate(&shop.genre.name, 18),
            truncate(&shop.access, 40)
        );
    }

    if let Some(window) = page_window(state.page, total_pages(state.results.total_available)) {
        let pages: Vec<String> = window
            .pages
            .iter()
            .map(|&p| {
                if p == state.page {
                    format!("[{p}]")
                } else {
                    p.to_string()
                }
            })
            .collect();
        println!();
        println!(
            "{} {} {}",
            if window.has_prev { "<" } else { " " },
            pages.join(" "),
            if window.has_next { ">" } else { " " }
        );
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
