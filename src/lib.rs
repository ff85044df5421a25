pub mod aggregator;
pub mod config;
pub mod error;
pub mod host;
pub mod html;
pub mod ids;
pub mod info;
pub mod parse;
pub mod sources;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::aggregator::Aggregator;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::host::{HttpRequester, Method, Request, Requester, Response, RETRY_BUDGET};
    pub use crate::ids::SourceTag;
    pub use crate::info::SOURCE_INFO;
    pub use crate::sources::{SectionSink, SiteSource, Source};
    pub use crate::types::{
        Chapter, ChapterDetails, HomeSection, HomeSectionType, LanguageCode, MangaDetails, MangaStatus, PageToken,
        PagedResults, SearchRequest, Tag, TagSection, Tile,
    };
}

pub use aggregator::Aggregator;
pub use error::{Error, Result};
