use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentRating {
    Everyone,
    Mature,
    Adult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Info,
    Danger,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Badge {
    pub text: &'static str,
    pub kind: BadgeKind,
}

/// What the host may ask of this extension.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Intents {
    pub manga_chapters: bool,
    pub homepage_sections: bool,
    pub cloudflare_bypass_required: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SourceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub content_rating: ContentRating,
    pub badges: &'static [Badge],
    pub intents: Intents,
}

pub const SOURCE_INFO: SourceInfo = SourceInfo {
    name: "Combined Vietnamese Sources",
    version: env!("CARGO_PKG_VERSION"),
    description: "Extension that combines TruyenGG, MimiHentai, and NHentai sources",
    content_rating: ContentRating::Adult,
    badges: &[
        Badge { text: "Vietnamese", kind: BadgeKind::Info },
        Badge { text: "Adult Content", kind: BadgeKind::Danger },
    ],
    intents: Intents { manga_chapters: true, homepage_sections: true, cloudflare_bypass_required: true },
};
