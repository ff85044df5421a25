mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use combined_sources::prelude::*;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let agg = Aggregator::new(&config).context("failed to build sources")?;

    match cli.command {
        Commands::Home => {
            let sink = |section: HomeSection| {
                if let Ok(json) = serde_json::to_string(&section) {
                    println!("{}", json);
                }
            };
            agg.home_sections(&sink).await;
        }
        Commands::Search { query, source, page } => {
            let mut request = SearchRequest::title(query);
            if let Some(tag) = source {
                request = request.with_tag(Tag::new(tag.as_str(), tag.display_name()));
            }
            let token = page.map(|page| PageToken { page });
            print_json(&agg.search(&request, token).await?)?;
        }
        Commands::Details { id } => print_json(&agg.manga_details(&id).await?)?,
        Commands::Chapters { id } => print_json(&agg.chapters(&id).await?)?,
        Commands::Pages { manga_id, chapter_id } => {
            print_json(&agg.chapter_details(&manga_id, &chapter_id).await?)?
        }
        Commands::Tags => print_json(&agg.search_tags().await)?,
        Commands::Share { id } => println!("{}", agg.share_url(&id)?),
        Commands::Info => print_json(&SOURCE_INFO)?,
    }
    Ok(())
}
