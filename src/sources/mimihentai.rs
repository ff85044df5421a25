use crate::ids::SourceTag;
use crate::sources::{
    ChapterRule, DetailRule, PageRule, SearchRule, SectionRule, SiteConfig, StatusRule, TagRule, TileRule,
};
use crate::types::{HomeSectionType, LanguageCode, MangaStatus, Tag, TagSection};

pub const BASE_URL: &str = "https://mimihentai.com";

// the site serves eager `src` on listings
const IMAGE_ATTRS: &[&str] = &["src"];

pub fn config() -> SiteConfig {
    SiteConfig {
        tag: SourceTag::MimiHentai,
        base_url: BASE_URL.to_string(),
        supports_latest: true,
        cloudflare_bypass: false,
        detail_path: "/truyen/{id}",
        sections: vec![
            SectionRule {
                id: "mimihentai-new",
                title: "MimiHentai - Truyện Mới",
                kind: HomeSectionType::SingleRowNormal,
                path: "/home",
                tiles: TileRule {
                    container: ".truyen-moi .card",
                    title: ".card-title a",
                    link: ".card-title a",
                    image: "img",
                    image_attrs: IMAGE_ATTRS,
                },
            },
            SectionRule {
                id: "mimihentai-top",
                title: "MimiHentai - TOP 3",
                kind: HomeSectionType::Featured,
                path: "/home",
                tiles: TileRule {
                    container: ".top-3 .card",
                    title: ".card-title",
                    link: "a",
                    image: "img",
                    image_attrs: IMAGE_ATTRS,
                },
            },
        ],
        detail: DetailRule {
            title: ".manga-title",
            description: ".manga-description",
            cover: ".manga-cover img",
            cover_attrs: IMAGE_ATTRS,
            status: StatusRule::Fixed(MangaStatus::Ongoing),
            author: Some(".manga-author"),
            artist: Some(".manga-artist"),
            tags: TagRule { section_label: "genres", scope: None, item: ".manga-tags .tag", label: None },
        },
        chapters: ChapterRule::Listed {
            row: ".list-chapters .chapter-item",
            link: "a",
            time: ".chapter-time",
            lang: LanguageCode::Vietnamese,
        },
        pages: PageRule::Images {
            path: "/truyen/{id}/{chapter}",
            selector: ".reading-content img",
            attrs: &["data-src", "src"],
        },
        search: SearchRule {
            path: "/tim-kiem",
            tiles: TileRule {
                container: ".search-results .manga-item",
                title: ".manga-title a",
                link: ".manga-title a",
                image: "img",
                image_attrs: IMAGE_ATTRS,
            },
            next: ".pagination .next",
        },
        search_tags,
    }
}

fn search_tags() -> Vec<TagSection> {
    vec![TagSection {
        id: "genres".to_string(),
        label: "Thể loại".to_string(),
        tags: vec![
            Tag::new("big-boobs", "Big Boobs"),
            Tag::new("ahegao", "Ahegao"),
            Tag::new("bondage", "Bondage"),
            Tag::new("vanilla", "Vanilla"),
            Tag::new("ntr", "NTR"),
        ],
    }]
}
