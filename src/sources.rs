//! Backend adapters.
//!
//! Every upstream site is a [`SiteSource`]: one generic extractor driven by a
//! [`SiteConfig`] table of paths and selectors. Site-specific behaviour that is
//! not just a different selector (synthetic chapters, page URLs derived from
//! thumbnail links) is expressed as a policy enum in the table.

pub mod mimihentai;
pub mod nhentai;
pub mod truyengg;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};
use url::Url;

use crate::error::Result;
use crate::host::{Request, Requester, RETRY_BUDGET};
use crate::html::{
    attr_of, element_text, exists, first_attr, first_attr_within, parse, select_all, select_within, text_of,
    text_within,
};
use crate::ids::{self, SourceTag};
use crate::parse::{chapter_number, last_segment, relative_time};
use crate::types::{
    Chapter, ChapterDetails, HomeSection, HomeSectionType, LanguageCode, MangaDetails, MangaStatus, PageToken,
    PagedResults, SearchRequest, Tag, TagSection, Tile,
};

/// Receives home sections; called from concurrently resolving fetches.
pub type SectionSink<'a> = dyn Fn(HomeSection) + Send + Sync + 'a;

const UNKNOWN: &str = "Unknown";

#[async_trait]
pub trait Source: Send + Sync {
    fn tag(&self) -> SourceTag;

    fn name(&self) -> &'static str {
        self.tag().display_name()
    }

    fn share_url(&self, manga_id: &str) -> String;

    fn supports_latest(&self) -> bool {
        false
    }

    /// Request the host must complete to pass the site's anti-bot challenge.
    fn bypass_request(&self) -> Option<Request> {
        None
    }

    /// Emits every section empty first, then each populated one as its fetch completes.
    async fn home_sections(&self, sink: &SectionSink<'_>);

    async fn manga_details(&self, manga_id: &str) -> Result<MangaDetails>;

    async fn chapters(&self, manga_id: &str) -> Result<Vec<Chapter>>;

    async fn chapter_details(&self, manga_id: &str, chapter_id: &str) -> Result<ChapterDetails>;

    async fn search(&self, query: &SearchRequest, token: Option<PageToken>) -> Result<PagedResults<Tile>>;

    async fn search_tags(&self) -> Vec<TagSection>;
}

// --- site tables ---

/// How to turn a listing container into a [`Tile`].
#[derive(Debug, Clone)]
pub struct TileRule {
    pub container: &'static str,
    pub title: &'static str,
    /// Element whose `href` carries the native id.
    pub link: &'static str,
    pub image: &'static str,
    pub image_attrs: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct SectionRule {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: HomeSectionType,
    pub path: &'static str,
    pub tiles: TileRule,
}

impl SectionRule {
    fn empty_section(&self) -> HomeSection {
        HomeSection { id: self.id.to_string(), title: self.title.to_string(), kind: self.kind, items: Vec::new() }
    }
}

#[derive(Debug, Clone)]
pub enum StatusRule {
    Fixed(MangaStatus),
    /// Completed when the lower-cased text contains any marker.
    Text { selector: &'static str, completed: &'static [&'static str] },
}

/// Restricts tag lookup to containers whose text contains a marker.
#[derive(Debug, Clone)]
pub struct TagScope {
    pub container: &'static str,
    pub contains: &'static str,
}

#[derive(Debug, Clone)]
pub struct TagRule {
    pub section_label: &'static str,
    pub scope: Option<TagScope>,
    pub item: &'static str,
    /// Child holding the label; the item's own text when `None`.
    pub label: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct DetailRule {
    pub title: &'static str,
    pub description: &'static str,
    pub cover: &'static str,
    pub cover_attrs: &'static [&'static str],
    pub status: StatusRule,
    pub author: Option<&'static str>,
    pub artist: Option<&'static str>,
    pub tags: TagRule,
}

#[derive(Debug, Clone)]
pub enum ChapterRule {
    /// One chapter per row on the detail page.
    Listed { row: &'static str, link: &'static str, time: &'static str, lang: LanguageCode },
    /// The site has no chapters; the item itself is the only one.
    Single { name: &'static str, lang: LanguageCode },
}

#[derive(Debug, Clone)]
pub enum PageRule {
    /// Image nodes on the reading page at `path` (`{id}` and `{chapter}` are
    /// native ids), attributes tried in order.
    Images { path: &'static str, selector: &'static str, attrs: &'static [&'static str] },
    /// Thumbnail links on the detail page; each link's file stem is a page
    /// number under `<cdn>/galleries/<id>/`.
    Gallery { links: &'static str, cdn: &'static str },
}

#[derive(Debug, Clone)]
pub struct SearchRule {
    pub path: &'static str,
    pub tiles: TileRule,
    pub next: &'static str,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub tag: SourceTag,
    pub base_url: String,
    pub supports_latest: bool,
    pub cloudflare_bypass: bool,
    /// Detail page path; `{id}` is the native id.
    pub detail_path: &'static str,
    pub sections: Vec<SectionRule>,
    pub detail: DetailRule,
    pub chapters: ChapterRule,
    pub pages: PageRule,
    pub search: SearchRule,
    pub search_tags: fn() -> Vec<TagSection>,
}

impl SiteConfig {
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn detail_url(&self, native_id: &str) -> String {
        self.url(&self.detail_path.replace("{id}", native_id))
    }

    fn chapter_url(&self, path: &str, native_manga: &str, native_chapter: &str) -> String {
        self.url(&path.replace("{id}", native_manga).replace("{chapter}", native_chapter))
    }
}

// --- generic adapter ---

pub struct SiteSource {
    config: SiteConfig,
    requester: Arc<dyn Requester>,
    retries: u32,
}

impl SiteSource {
    pub fn new(config: SiteConfig, requester: Arc<dyn Requester>) -> Self {
        Self { config, requester, retries: RETRY_BUDGET }
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(source = %self.config.tag, url, "scheduling request");
        let resp = self.requester.schedule(&Request::get(url), self.retries).await?;
        Ok(resp.data)
    }

    fn native<'a>(&self, id: &'a str) -> &'a str {
        ids::strip(id, self.config.tag)
    }

    fn namespaced(&self, id: &str) -> String {
        ids::prefix(self.native(id), self.config.tag)
    }
}

#[async_trait]
impl Source for SiteSource {
    fn tag(&self) -> SourceTag {
        self.config.tag
    }

    fn share_url(&self, manga_id: &str) -> String {
        self.config.detail_url(self.native(manga_id))
    }

    fn supports_latest(&self) -> bool {
        self.config.supports_latest
    }

    fn bypass_request(&self) -> Option<Request> {
        self.config.cloudflare_bypass.then(|| Request::get(self.config.base_url.clone()))
    }

    async fn home_sections(&self, sink: &SectionSink<'_>) {
        let rules = &self.config.sections;
        for rule in rules {
            sink(rule.empty_section());
        }

        let fetches = rules.iter().map(|rule| async move {
            match self.fetch(&self.config.url(rule.path)).await {
                Ok(body) => {
                    let mut section = rule.empty_section();
                    section.items = extract_tiles(&parse(&body), &rule.tiles, self.config.tag);
                    sink(section);
                }
                Err(e) => warn!(source = %self.config.tag, section = rule.id, error = %e, "home section failed"),
            }
        });
        join_all(fetches).await;
    }

    async fn manga_details(&self, manga_id: &str) -> Result<MangaDetails> {
        let body = self.fetch(&self.config.detail_url(self.native(manga_id))).await?;
        Ok(extract_details(&parse(&body), &self.config, self.namespaced(manga_id)))
    }

    async fn chapters(&self, manga_id: &str) -> Result<Vec<Chapter>> {
        let manga_id = self.namespaced(manga_id);
        match &self.config.chapters {
            ChapterRule::Single { name, lang } => Ok(vec![Chapter {
                id: manga_id.clone(),
                manga_id,
                chap_num: 1.0,
                lang_code: *lang,
                name: name.to_string(),
                time: Utc::now(),
                volume: 0.0,
            }]),
            ChapterRule::Listed { row, link, time, lang } => {
                let body = self.fetch(&self.config.detail_url(self.native(&manga_id))).await?;
                let rows = ChapterRows { row: *row, link: *link, time: *time, lang: *lang };
                Ok(extract_chapters(&parse(&body), &rows, self.config.tag, &manga_id))
            }
        }
    }

    async fn chapter_details(&self, manga_id: &str, chapter_id: &str) -> Result<ChapterDetails> {
        let manga = self.native(manga_id);
        let chapter = self.native(chapter_id);
        let pages = match &self.config.pages {
            PageRule::Images { path, selector, attrs } => {
                let body = self.fetch(&self.config.chapter_url(path, manga, chapter)).await?;
                extract_images(&parse(&body), selector, attrs)
            }
            PageRule::Gallery { links, cdn } => {
                let body = self.fetch(&self.config.detail_url(manga)).await?;
                extract_gallery(&parse(&body), links, cdn, manga)
            }
        };
        Ok(ChapterDetails {
            id: self.namespaced(chapter_id),
            manga_id: self.namespaced(manga_id),
            pages,
            long_strip: false,
        })
    }

    async fn search(&self, query: &SearchRequest, token: Option<PageToken>) -> Result<PagedResults<Tile>> {
        let page = PageToken::page_or_first(token);
        let mut url = Url::parse(&self.config.url(self.config.search.path))?;
        url.query_pairs_mut()
            .append_pair("q", query.title.as_deref().unwrap_or(""))
            .append_pair("page", &page.to_string());

        let body = self.fetch(url.as_str()).await?;
        let doc = parse(&body);
        let results = extract_tiles(&doc, &self.config.search.tiles, self.config.tag);
        let next = if exists(&doc, self.config.search.next) { PageToken::after(page) } else { None };
        Ok(PagedResults { results, next })
    }

    async fn search_tags(&self) -> Vec<TagSection> {
        (self.config.search_tags)()
    }
}

// --- extraction ---

fn native_id_from(el: ElementRef<'_>) -> Option<String> {
    attr_of(el, &["href"]).as_deref().and_then(last_segment).map(str::to_string)
}

/// Tiles missing an id or a title are dropped.
pub(crate) fn extract_tiles(doc: &Html, rule: &TileRule, tag: SourceTag) -> Vec<Tile> {
    select_all(doc, rule.container)
        .into_iter()
        .filter_map(|container| {
            let title = text_within(container, rule.title);
            let id = select_within(container, rule.link).into_iter().next().and_then(native_id_from)?;
            if title.is_empty() {
                return None;
            }
            Some(Tile {
                id: ids::prefix(&id, tag),
                title,
                image: first_attr_within(container, rule.image, rule.image_attrs).unwrap_or_default(),
                subtitle: tag.display_name().to_string(),
            })
        })
        .collect()
}

pub(crate) fn extract_details(doc: &Html, config: &SiteConfig, id: String) -> MangaDetails {
    let rule = &config.detail;
    let status = match &rule.status {
        StatusRule::Fixed(s) => *s,
        StatusRule::Text { selector, completed } => {
            let text = text_of(doc, selector).to_lowercase();
            if completed.iter().any(|m| text.contains(m)) { MangaStatus::Completed } else { MangaStatus::Ongoing }
        }
    };
    let person = |sel: Option<&str>| {
        sel.map(|s| text_of(doc, s)).filter(|s| !s.is_empty()).unwrap_or_else(|| UNKNOWN.to_string())
    };

    MangaDetails {
        id,
        titles: vec![text_of(doc, rule.title)],
        image: first_attr(doc, rule.cover, rule.cover_attrs).unwrap_or_default(),
        status,
        author: person(rule.author),
        artist: person(rule.artist),
        desc: text_of(doc, rule.description),
        tags: vec![extract_tags(doc, &rule.tags)],
        source: config.tag.display_name().to_string(),
    }
}

/// Tags without an href-derived id or a label are dropped.
pub(crate) fn extract_tags(doc: &Html, rule: &TagRule) -> TagSection {
    let items: Vec<ElementRef<'_>> = match &rule.scope {
        Some(scope) => select_all(doc, scope.container)
            .into_iter()
            .filter(|c| element_text(*c).contains(scope.contains))
            .flat_map(|c| select_within(c, rule.item))
            .collect(),
        None => select_all(doc, rule.item),
    };

    let tags = items
        .into_iter()
        .filter_map(|item| {
            let label = match rule.label {
                Some(sel) => text_within(item, sel),
                None => element_text(item).trim().to_string(),
            };
            let id = native_id_from(item)?;
            (!label.is_empty()).then(|| Tag::new(id, label))
        })
        .collect();

    TagSection { id: "0".to_string(), label: rule.section_label.to_string(), tags }
}

struct ChapterRows<'a> {
    row: &'a str,
    link: &'a str,
    time: &'a str,
    lang: LanguageCode,
}

fn extract_chapters(doc: &Html, rows: &ChapterRows<'_>, tag: SourceTag, manga_id: &str) -> Vec<Chapter> {
    let now = Utc::now();
    select_all(doc, rows.row)
        .into_iter()
        .filter_map(|row| {
            let link = select_within(row, rows.link).into_iter().next()?;
            let name = element_text(link).trim().to_string();
            let id = native_id_from(link)?;
            let time_text = text_within(row, rows.time);
            let time = if time_text.is_empty() { now } else { relative_time(&time_text, now) };
            Some(Chapter {
                id: ids::prefix(&id, tag),
                manga_id: manga_id.to_string(),
                chap_num: chapter_number(&name),
                lang_code: rows.lang,
                name,
                time,
                volume: 0.0,
            })
        })
        .collect()
}

fn extract_images(doc: &Html, selector: &str, attrs: &[&str]) -> Vec<String> {
    select_all(doc, selector).into_iter().filter_map(|img| attr_of(img, attrs)).collect()
}

fn extract_gallery(doc: &Html, links: &str, cdn: &str, gallery: &str) -> Vec<String> {
    select_all(doc, links)
        .into_iter()
        .filter_map(|a| {
            let href = attr_of(a, &["href"])?;
            let stem = last_segment(&href)?.split('.').next().filter(|s| !s.is_empty())?.to_string();
            Some(format!("{}/galleries/{}/{}.jpg", cdn, gallery, stem))
        })
        .collect()
}
