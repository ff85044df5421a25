use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: String,
    pub title: String,
    pub image: String,
    /// Name of the originating source.
    pub subtitle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MangaStatus {
    Ongoing,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "vi")]
    Vietnamese,
    #[serde(rename = "en")]
    English,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub label: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSection {
    pub id: String,
    pub label: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangaDetails {
    pub id: String,
    pub titles: Vec<String>,
    pub image: String,
    pub status: MangaStatus,
    pub author: String,
    pub artist: String,
    pub desc: String,
    pub tags: Vec<TagSection>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub manga_id: String,
    pub chap_num: f64,
    pub lang_code: LanguageCode,
    pub name: String,
    pub time: DateTime<Utc>,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterDetails {
    pub id: String,
    pub manga_id: String,
    pub pages: Vec<String>,
    pub long_strip: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeSectionType {
    Featured,
    SingleRowNormal,
}

/// A named listing on the home page. Emitted once empty and once populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeSection {
    pub id: String,
    pub title: String,
    pub kind: HomeSectionType,
    pub items: Vec<Tile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub included_tags: Vec<Tag>,
}

impl SearchRequest {
    pub fn title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), included_tags: Vec::new() }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.included_tags.push(tag);
        self
    }
}

/// Continuation for paged queries: the 1-based page to request next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToken {
    pub page: u32,
}

impl PageToken {
    /// Page 0 is treated as the first page.
    pub fn page_or_first(token: Option<PageToken>) -> u32 {
        token.map(|t| t.page).filter(|&p| p > 0).unwrap_or(1)
    }

    /// Token for the page following `page`; `None` when the counter would overflow.
    pub fn after(page: u32) -> Option<PageToken> {
        page.checked_add(1).map(|page| PageToken { page })
    }
}

/// `next` is `None` once the query is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResults<T> {
    pub results: Vec<T>,
    pub next: Option<PageToken>,
}

impl<T> PagedResults<T> {
    pub fn empty() -> Self {
        Self { results: Vec::new(), next: None }
    }
}
