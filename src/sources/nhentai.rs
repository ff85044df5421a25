//! NHentai has galleries rather than chaptered series: every item is exposed
//! as a single chapter sharing the item's id, and page URLs are rebuilt from
//! the thumbnail links instead of being read from image nodes.

use crate::ids::SourceTag;
use crate::sources::{
    ChapterRule, DetailRule, PageRule, SearchRule, SectionRule, SiteConfig, StatusRule, TagRule, TagScope,
    TileRule,
};
use crate::types::{HomeSectionType, LanguageCode, MangaStatus, Tag, TagSection};

pub const BASE_URL: &str = "https://nhentai.net";
pub const IMAGE_CDN: &str = "https://i.nhentai.net";

fn gallery_tiles() -> TileRule {
    TileRule {
        container: ".gallery",
        title: "a div.caption",
        link: "a",
        image: "a img",
        image_attrs: &["data-src", "src"],
    }
}

pub fn config() -> SiteConfig {
    SiteConfig {
        tag: SourceTag::NHentai,
        base_url: BASE_URL.to_string(),
        supports_latest: true,
        cloudflare_bypass: false,
        detail_path: "/g/{id}",
        sections: vec![
            SectionRule {
                id: "nhentai-new",
                title: "NHentai - New Uploads",
                kind: HomeSectionType::SingleRowNormal,
                path: "",
                tiles: gallery_tiles(),
            },
            SectionRule {
                id: "nhentai-popular",
                title: "NHentai - Popular Now",
                kind: HomeSectionType::SingleRowNormal,
                path: "/popular",
                tiles: gallery_tiles(),
            },
        ],
        detail: DetailRule {
            title: "#info h1",
            description: "#info h2",
            cover: "#cover img",
            cover_attrs: &["data-src", "src"],
            status: StatusRule::Fixed(MangaStatus::Completed),
            author: None,
            artist: None,
            tags: TagRule {
                section_label: "genres",
                scope: Some(TagScope { container: "#tags .tag-container", contains: "Tags:" }),
                item: ".tag",
                label: Some(".name"),
            },
        },
        chapters: ChapterRule::Single { name: "Chapter", lang: LanguageCode::English },
        pages: PageRule::Gallery { links: "#thumbnail-container a", cdn: IMAGE_CDN },
        search: SearchRule { path: "/search/", tiles: gallery_tiles(), next: ".pagination .next" },
        search_tags,
    }
}

fn search_tags() -> Vec<TagSection> {
    vec![TagSection {
        id: "genres".to_string(),
        label: "Genres".to_string(),
        tags: vec![
            Tag::new("english", "English"),
            Tag::new("japanese", "Japanese"),
            Tag::new("chinese", "Chinese"),
        ],
    }]
}
