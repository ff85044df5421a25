use crate::ids::SourceTag;
use crate::sources::{
    ChapterRule, DetailRule, PageRule, SearchRule, SectionRule, SiteConfig, StatusRule, TagRule, TileRule,
};
use crate::types::{HomeSectionType, LanguageCode, Tag, TagSection};

pub const BASE_URL: &str = "https://truyengg.net";

const IMAGE_ATTRS: &[&str] = &["src", "data-src"];

fn home_tiles(container: &'static str) -> TileRule {
    TileRule { container, title: ".manga-title", link: "a", image: "img", image_attrs: IMAGE_ATTRS }
}

pub fn config() -> SiteConfig {
    SiteConfig {
        tag: SourceTag::TruyenGG,
        base_url: BASE_URL.to_string(),
        supports_latest: true,
        cloudflare_bypass: true,
        detail_path: "/truyen-tranh/{id}",
        sections: vec![
            SectionRule {
                id: "truyengg-hot",
                title: "TruyenGG - Truyện Hot",
                kind: HomeSectionType::Featured,
                path: "",
                tiles: home_tiles(".hot-manga .item"),
            },
            SectionRule {
                id: "truyengg-new",
                title: "TruyenGG - Truyện Mới Cập Nhật",
                kind: HomeSectionType::SingleRowNormal,
                path: "",
                tiles: home_tiles(".new-manga .item"),
            },
        ],
        detail: DetailRule {
            title: ".manga-title",
            description: ".manga-description",
            cover: ".manga-cover img",
            cover_attrs: IMAGE_ATTRS,
            status: StatusRule::Text { selector: ".manga-status", completed: &["hoàn thành", "đã hoàn thành"] },
            author: Some(".manga-author"),
            artist: Some(".manga-artist"),
            tags: TagRule { section_label: "thể loại", scope: None, item: ".manga-genres .genre", label: None },
        },
        chapters: ChapterRule::Listed {
            row: ".list-chapters .chapter-item",
            link: "a",
            time: ".chapter-time",
            lang: LanguageCode::Vietnamese,
        },
        pages: PageRule::Images {
            path: "/truyen-tranh/{id}/{chapter}",
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
            Tag::new("action", "Action"),
            Tag::new("adventure", "Adventure"),
            Tag::new("comedy", "Comedy"),
            Tag::new("drama", "Drama"),
            Tag::new("fantasy", "Fantasy"),
            Tag::new("horror", "Horror"),
            Tag::new("romance", "Romance"),
            Tag::new("school-life", "School Life"),
            Tag::new("sci-fi", "Sci-Fi"),
            Tag::new("slice-of-life", "Slice of Life"),
        ],
    }]
}
