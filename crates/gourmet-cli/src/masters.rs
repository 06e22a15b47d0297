//! Master-data listings (genre and budget codes).

use anyhow::anyhow;
use gourmet_api::GourmetClient;
use gourmet_core::AppConfig;

pub(crate) async fn run_genres(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let client = GourmetClient::from_config(config)?;
    let genres = client
        .list_genres()
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&genres)?);
        return Ok(());
    }

    print_codes(genres.iter().map(|g| (g.code.as_str(), g.name.as_str())));
    Ok(())
}

pub(crate) async fn run_budgets(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let client = GourmetClient::from_config(config)?;
    let budgets = client
        .list_budgets()
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&budgets)?);
        return Ok(());
    }

    print_codes(budgets.iter().map(|b| (b.code.as_str(), b.name.as_str())));
    Ok(())
}

fn print_codes<'a>(rows: impl Iterator<Item = (&'a str, &'a str)>) {
    println!("{:<8}NAME", "CODE");
    for (code, name) in rows {
        println!("{code:<8}{name}");
    }
}
