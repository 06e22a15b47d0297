use anyhow::{anyhow, bail};
use gourmet_api::GourmetClient;
use gourmet_core::{load_amenity_keywords, Amenity, AmenityKeywords, AppConfig, Shop};
use gourmet_session::{Bookmarks, JsonFileStore, RequestStatus, SearchSession};

/// Toggle a bookmark and report the new state.
///
/// # Errors
///
/// Returns an error if the bookmark file cannot be read or written.
pub(crate) fn run_bookmark(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let id = id.trim();
    if id.is_empty() {
        bail!("shop id must not be empty");
    }

    let mut bookmarks = Bookmarks::load(JsonFileStore::new(&config.bookmarks_dir))?;
    if bookmarks.toggle(id)? {
        println!("bookmarked {id} ({} total)", bookmarks.ids().len());
    } else {
        println!("removed bookmark {id} ({} total)", bookmarks.ids().len());
    }
    Ok(())
}

/// Fetch one shop by id and print its details.
///
/// # Errors
///
/// Returns an error if the lookup fails or no shop has that id.
pub(crate) async fn run_show(config: &AppConfig, id: &str, json: bool) -> anyhow::Result<()> {
    let keywords = amenity_keywords(config)?;
    let mut session = SearchSession::new(GourmetClient::from_config(config)?);
    session.search_by_ids(vec![id.to_string()]).await;

    let state = session.state();
    if let RequestStatus::Failed(message) = &state.status {
        bail!("{message}");
    }
    let shop = state
        .results
        .shops
        .iter()
        .find(|shop| shop.id == id)
        .ok_or_else(|| anyhow!("shop '{id}' not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(shop)?);
        return Ok(());
    }

    let bookmarks = Bookmarks::load(JsonFileStore::new(&config.bookmarks_dir))?;
    print_detail(shop, &keywords, bookmarks.is_bookmarked(id));
    Ok(())
}

fn amenity_keywords(config: &AppConfig) -> anyhow::Result<AmenityKeywords> {
    match &config.amenity_keywords_path {
        Some(path) => {
            let keywords = load_amenity_keywords(path)?;
            tracing::debug!(path = %path.display(), "loaded amenity keywords");
            Ok(keywords)
        }
        None => Ok(AmenityKeywords::default()),
    }
}

fn print_detail(shop: &Shop, keywords: &AmenityKeywords, bookmarked: bool) {
    let star = if bookmarked { " *" } else { "" };
    println!("{} ({}){star}", shop.name, shop.id);
    if !shop.catch_copy.is_empty() {
        println!("{}", shop.catch_copy);
    }
    println!();

    let rows = [
        ("Genre", shop.genre.name.as_str()),
        ("Budget", shop.budget.name.as_str()),
        ("Address", shop.address.as_str()),
        ("Station", shop.station_name.as_str()),
        ("Access", shop.access.as_str()),
        ("Open", shop.open.as_str()),
        ("Closed", shop.close.as_str()),
        ("Capacity", shop.capacity.as_str()),
        ("Phone", shop.tel.as_str()),
        ("Web", shop.urls.pc.as_str()),
    ];
    for (label, value) in rows {
        if !value.trim().is_empty() {
            println!("{label:<10}{value}");
        }
    }
    if let Some(map) = shop.map_url() {
        println!("{:<10}{map}", "Map");
    }
    if let Some(image) = shop.primary_image() {
        println!("{:<10}{image}", "Image");
    }
    if let Some(memo) = shop.memo() {
        println!();
        println!("{memo}");
    }

    println!();
    println!("Facilities");
    for amenity in Amenity::ALL {
        let text = shop.amenity_text(amenity);
        let status = keywords.classify(text);
        println!(
            "  {} {:<20}{}",
            status.mark(),
            amenity.label(),
            text.unwrap_or("\u{2014}")
        );
    }
}
