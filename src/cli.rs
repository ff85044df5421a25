use std::path::PathBuf;

use clap::{Parser, Subcommand};

use combined_sources::ids::SourceTag;

/// CLI for poking at the combined sources
#[derive(Parser)]
#[command(name = "combined-sources")]
#[command(about = "Query TruyenGG, MimiHentai and NHentai through one interface", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stream home page sections as they load
    Home,
    /// Search all sources, or one with --source
    Search {
        query: String,
        /// Restrict to one source (truyengg, mimihentai, nhentai)
        #[arg(short, long)]
        source: Option<SourceTag>,
        /// 1-based page
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Show details for a namespaced manga id
    Details { id: String },
    /// List chapters for a namespaced manga id
    Chapters { id: String },
    /// List page image URLs for a chapter
    Pages { manga_id: String, chapter_id: String },
    /// List searchable tags
    Tags,
    /// Print the public URL for a manga id
    Share { id: String },
    /// Print extension metadata
    Info,
}
