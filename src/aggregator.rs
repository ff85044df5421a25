use std::sync::Arc;

use futures::future::join3;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::host::{HttpRequester, Request, Requester};
use crate::ids::{detect_tag, SourceTag};
use crate::sources::{mimihentai, nhentai, truyengg, SectionSink, SiteSource, Source};
use crate::types::{
    Chapter, ChapterDetails, MangaDetails, PageToken, PagedResults, SearchRequest, Tag, TagSection, Tile,
};

pub const SOURCES_SECTION_ID: &str = "sources";

/// Aggregator owns one adapter per source and exposes them as a single source:
/// per-item calls are routed by id prefix, listings fan out to all three.
pub struct Aggregator {
    truyengg: Arc<dyn Source>,
    mimihentai: Arc<dyn Source>,
    nhentai: Arc<dyn Source>,
}

impl Aggregator {
    /// Build the three site adapters over the default HTTP requester.
    pub fn new(config: &Config) -> Result<Self> {
        let requester: Arc<dyn Requester> = Arc::new(HttpRequester::new(config)?);
        Ok(Self::with_requester(config, requester))
    }

    pub fn with_requester(config: &Config, requester: Arc<dyn Requester>) -> Self {
        let site = |cfg: crate::sources::SiteConfig| -> Arc<dyn Source> {
            let base = config.base_url(cfg.tag);
            Arc::new(SiteSource::new(cfg.with_base_url(base), requester.clone()).with_retries(config.retries()))
        };
        Self::from_sources(site(truyengg::config()), site(mimihentai::config()), site(nhentai::config()))
    }

    pub fn from_sources(truyengg: Arc<dyn Source>, mimihentai: Arc<dyn Source>, nhentai: Arc<dyn Source>) -> Self {
        Self { truyengg, mimihentai, nhentai }
    }

    pub fn source(&self, tag: SourceTag) -> &dyn Source {
        match tag {
            SourceTag::TruyenGG => self.truyengg.as_ref(),
            SourceTag::MimiHentai => self.mimihentai.as_ref(),
            SourceTag::NHentai => self.nhentai.as_ref(),
        }
    }

    fn route(&self, manga_id: &str) -> Result<&dyn Source> {
        detect_tag(manga_id).map(|t| self.source(t)).ok_or_else(|| Error::UnknownSource(manga_id.to_string()))
    }

    pub fn share_url(&self, manga_id: &str) -> Result<String> {
        Ok(self.route(manga_id)?.share_url(manga_id))
    }

    /// Only TruyenGG sits behind an anti-bot challenge.
    pub fn bypass_request(&self) -> Option<Request> {
        self.truyengg.bypass_request()
    }

    /// Runs every source's home sections concurrently against the same sink.
    pub async fn home_sections(&self, sink: &SectionSink<'_>) {
        join3(
            self.truyengg.home_sections(sink),
            self.mimihentai.home_sections(sink),
            self.nhentai.home_sections(sink),
        )
        .await;
    }

    pub async fn manga_details(&self, manga_id: &str) -> Result<MangaDetails> {
        self.route(manga_id)?.manga_details(manga_id).await
    }

    pub async fn chapters(&self, manga_id: &str) -> Result<Vec<Chapter>> {
        self.route(manga_id)?.chapters(manga_id).await
    }

    pub async fn chapter_details(&self, manga_id: &str, chapter_id: &str) -> Result<ChapterDetails> {
        self.route(manga_id)?.chapter_details(manga_id, chapter_id).await
    }

    /// A source tag among the included tags restricts the search to that
    /// source. Otherwise all sources are queried with the same page and their
    /// results concatenated in fixed order; the merged result continues while
    /// any source still reports a next page.
    pub async fn search(&self, query: &SearchRequest, token: Option<PageToken>) -> Result<PagedResults<Tile>> {
        if let Some(tag) = selected_source(query) {
            return self.source(tag).search(query, token).await;
        }

        let page = PageToken::page_or_first(token);
        info!(query = ?query.title, page, "searching all sources");
        let (a, b, c) = join3(
            self.truyengg.search(query, token),
            self.mimihentai.search(query, token),
            self.nhentai.search(query, token),
        )
        .await;

        let mut results = Vec::new();
        let mut more = false;
        for (tag, outcome) in SourceTag::ALL.into_iter().zip([a, b, c]) {
            match outcome {
                Ok(sub) => {
                    more |= sub.next.is_some();
                    results.extend(sub.results);
                }
                Err(e) => warn!(source = %tag, error = %e, "search failed; skipping source"),
            }
        }
        let next = if more { PageToken::after(page) } else { None };
        Ok(PagedResults { results, next })
    }

    /// The synthetic "sources" section first, then each source's own tags.
    pub async fn search_tags(&self) -> Vec<TagSection> {
        let (a, b, c) = join3(
            self.truyengg.search_tags(),
            self.mimihentai.search_tags(),
            self.nhentai.search_tags(),
        )
        .await;
        let mut sections = vec![sources_section()];
        sections.extend(a);
        sections.extend(b);
        sections.extend(c);
        sections
    }
}

fn selected_source(query: &SearchRequest) -> Option<SourceTag> {
    query.included_tags.iter().find_map(|t| SourceTag::ALL.into_iter().find(|s| s.as_str() == t.id))
}

fn sources_section() -> TagSection {
    TagSection {
        id: SOURCES_SECTION_ID.to_string(),
        label: "Sources".to_string(),
        tags: SourceTag::ALL.into_iter().map(|t| Tag::new(t.as_str(), t.display_name())).collect(),
    }
}
