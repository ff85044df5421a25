use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use combined_sources::prelude::*;

struct FakeSource {
    tag: SourceTag,
    results: usize,
    has_next: bool,
    fail_search: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    fn new(tag: SourceTag, results: usize, has_next: bool) -> Arc<Self> {
        Arc::new(Self { tag, results, has_next, fail_search: false, calls: Mutex::new(Vec::new()) })
    }

    fn failing(tag: SourceTag) -> Arc<Self> {
        Arc::new(Self { tag, results: 0, has_next: true, fail_search: true, calls: Mutex::new(Vec::new()) })
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Source for FakeSource {
    fn tag(&self) -> SourceTag {
        self.tag
    }

    fn share_url(&self, manga_id: &str) -> String {
        format!("fake://{}", manga_id)
    }

    async fn home_sections(&self, sink: &SectionSink<'_>) {
        self.record("home".into());
        let section = HomeSection {
            id: format!("{}-only", self.tag),
            title: self.name().into(),
            kind: HomeSectionType::SingleRowNormal,
            items: Vec::new(),
        };
        sink(section.clone());
        tokio::task::yield_now().await;
        sink(HomeSection { items: vec![tile(self.tag, 0)], ..section });
    }

    async fn manga_details(&self, manga_id: &str) -> Result<MangaDetails> {
        self.record(format!("details {}", manga_id));
        Ok(MangaDetails {
            id: manga_id.into(),
            titles: vec!["t".into()],
            image: String::new(),
            status: MangaStatus::Ongoing,
            author: "Unknown".into(),
            artist: "Unknown".into(),
            desc: String::new(),
            tags: Vec::new(),
            source: self.name().into(),
        })
    }

    async fn chapters(&self, manga_id: &str) -> Result<Vec<Chapter>> {
        self.record(format!("chapters {}", manga_id));
        Ok(vec![Chapter {
            id: manga_id.into(),
            manga_id: manga_id.into(),
            chap_num: 1.0,
            lang_code: LanguageCode::Vietnamese,
            name: "c".into(),
            time: Utc::now(),
            volume: 0.0,
        }])
    }

    async fn chapter_details(&self, manga_id: &str, chapter_id: &str) -> Result<ChapterDetails> {
        self.record(format!("pages {} {}", manga_id, chapter_id));
        Ok(ChapterDetails { id: chapter_id.into(), manga_id: manga_id.into(), pages: Vec::new(), long_strip: false })
    }

    async fn search(&self, query: &SearchRequest, token: Option<PageToken>) -> Result<PagedResults<Tile>> {
        self.record(format!("search {:?} {:?}", query.title, token.map(|t| t.page)));
        if self.fail_search {
            return Err(Error::Fetch { url: "fake://search".into(), attempts: 3, reason: "down".into() });
        }
        let page = PageToken::page_or_first(token);
        Ok(PagedResults {
            results: (0..self.results).map(|i| tile(self.tag, i)).collect(),
            next: if self.has_next { PageToken::after(page) } else { None },
        })
    }

    async fn search_tags(&self) -> Vec<TagSection> {
        vec![TagSection {
            id: format!("{}-genres", self.tag),
            label: "Genres".into(),
            tags: vec![Tag::new("x", "X")],
        }]
    }
}

fn tile(tag: SourceTag, i: usize) -> Tile {
    Tile { id: format!("{}-{}", tag, i), title: format!("{} {}", tag, i), image: String::new(), subtitle: tag.display_name().into() }
}

fn aggregator(a: &Arc<FakeSource>, b: &Arc<FakeSource>, c: &Arc<FakeSource>) -> Aggregator {
    Aggregator::from_sources(a.clone(), b.clone(), c.clone())
}

fn fakes(next: [bool; 3]) -> (Arc<FakeSource>, Arc<FakeSource>, Arc<FakeSource>) {
    (
        FakeSource::new(SourceTag::TruyenGG, 2, next[0]),
        FakeSource::new(SourceTag::MimiHentai, 3, next[1]),
        FakeSource::new(SourceTag::NHentai, 1, next[2]),
    )
}

#[tokio::test]
async fn details_are_routed_to_exactly_one_source() {
    let (a, b, c) = fakes([false; 3]);
    let agg = aggregator(&a, &b, &c);

    let details = agg.manga_details("truyengg-123").await.unwrap();
    assert_eq!(details.id, "truyengg-123");
    assert_eq!(a.calls(), vec!["details truyengg-123"]);
    assert!(b.calls().is_empty());
    assert!(c.calls().is_empty());

    agg.chapters("nhentai-9").await.unwrap();
    agg.chapter_details("mimihentai-x", "mimihentai-ch-1").await.unwrap();
    assert_eq!(c.calls(), vec!["chapters nhentai-9"]);
    assert_eq!(b.calls(), vec!["pages mimihentai-x mimihentai-ch-1"]);
}

#[tokio::test]
async fn unknown_prefix_is_a_routing_failure() {
    let (a, b, c) = fakes([false; 3]);
    let agg = aggregator(&a, &b, &c);

    let err = agg.manga_details("mangadex-1").await.unwrap_err();
    assert!(matches!(err, Error::UnknownSource(ref id) if id == "mangadex-1"));
    assert!(agg.chapters("1234").await.unwrap_err().is_routing());
    assert!(agg.chapter_details("x", "truyengg-1").await.unwrap_err().is_routing());
    assert!(a.calls().is_empty() && b.calls().is_empty() && c.calls().is_empty());
}

#[tokio::test]
async fn search_concatenates_in_fixed_order() {
    let (a, b, c) = fakes([false, true, false]);
    let agg = aggregator(&a, &b, &c);

    let res = agg.search(&SearchRequest::title("x"), None).await.unwrap();
    let ids: Vec<_> = res.results.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["truyengg-0", "truyengg-1", "mimihentai-0", "mimihentai-1", "mimihentai-2", "nhentai-0"]);
    assert_eq!(res.next, Some(PageToken { page: 2 }));
}

#[tokio::test]
async fn search_is_exhausted_only_when_every_source_is() {
    let (a, b, c) = fakes([false; 3]);
    let agg = aggregator(&a, &b, &c);
    let res = agg.search(&SearchRequest::title("x"), Some(PageToken { page: 4 })).await.unwrap();
    assert_eq!(res.next, None);

    let (a, b, c) = fakes([false, false, true]);
    let agg = aggregator(&a, &b, &c);
    let res = agg.search(&SearchRequest::title("x"), Some(PageToken { page: 4 })).await.unwrap();
    assert_eq!(res.next, Some(PageToken { page: 5 }));
    // exhausted sources keep being asked for the same page
    assert_eq!(a.calls(), vec!["search Some(\"x\") Some(4)"]);
}

#[tokio::test]
async fn merged_search_stops_at_the_last_page_number() {
    let (a, b, c) = fakes([true; 3]);
    let agg = aggregator(&a, &b, &c);

    let res = agg.search(&SearchRequest::title("x"), Some(PageToken { page: u32::MAX })).await.unwrap();
    assert_eq!(res.results.len(), 6);
    assert_eq!(res.next, None);

    let res = agg.search(&SearchRequest::title("x"), Some(PageToken { page: 0 })).await.unwrap();
    assert_eq!(res.next, Some(PageToken { page: 2 }));
}

#[tokio::test]
async fn source_tag_restricts_search_to_one_source() {
    let (a, b, c) = fakes([true, true, false]);
    let agg = aggregator(&a, &b, &c);

    let query = SearchRequest::title("x").with_tag(Tag::new("nhentai", "NHentai"));
    let res = agg.search(&query, None).await.unwrap();
    assert_eq!(res.results.len(), 1);
    assert_eq!(res.next, None);
    assert!(a.calls().is_empty());
    assert!(b.calls().is_empty());
    assert_eq!(c.calls().len(), 1);
}

#[tokio::test]
async fn selected_source_failure_propagates() {
    let a = FakeSource::failing(SourceTag::TruyenGG);
    let (_, b, c) = fakes([false; 3]);
    let agg = aggregator(&a, &b, &c);

    let query = SearchRequest::title("x").with_tag(Tag::new("truyengg", "TruyenGG"));
    assert!(matches!(agg.search(&query, None).await, Err(Error::Fetch { .. })));
}

#[tokio::test]
async fn failing_source_contributes_nothing_to_merged_search() {
    let a = FakeSource::failing(SourceTag::TruyenGG);
    let (_, b, c) = fakes([false; 3]);
    let agg = aggregator(&a, &b, &c);

    let res = agg.search(&SearchRequest::title("x"), None).await.unwrap();
    assert_eq!(res.results.len(), 4);
    assert_eq!(res.next, None);
}

#[tokio::test]
async fn search_tags_lead_with_sources_section() {
    let (a, b, c) = fakes([false; 3]);
    let agg = aggregator(&a, &b, &c);

    let sections = agg.search_tags().await;
    assert_eq!(sections[0].id, "sources");
    let ids: Vec<_> = sections[0].tags.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["truyengg", "mimihentai", "nhentai"]);
    let rest: Vec<_> = sections[1..].iter().map(|s| s.id.as_str()).collect();
    assert_eq!(rest, ["truyengg-genres", "mimihentai-genres", "nhentai-genres"]);
}

#[tokio::test]
async fn home_sections_fan_out_to_every_source() {
    let (a, b, c) = fakes([false; 3]);
    let agg = aggregator(&a, &b, &c);

    let seen = Mutex::new(Vec::new());
    let sink = |s: HomeSection| seen.lock().unwrap().push((s.id, s.items.len()));
    agg.home_sections(&sink).await;

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 6);
    for tag in SourceTag::ALL {
        let id = format!("{}-only", tag);
        let mine: Vec<_> = seen.iter().filter(|(s, _)| *s == id).map(|(_, n)| *n).collect();
        assert_eq!(mine, [0, 1]);
    }
}

#[tokio::test]
async fn real_sources_search_tags_are_static() {
    let agg = Aggregator::new(&Config::default()).unwrap();
    let sections = agg.search_tags().await;
    assert_eq!(sections.len(), 4);
    assert_eq!(sections[1].tags.len(), 10);
    assert_eq!(sections[2].tags.len(), 5);
    assert_eq!(sections[3].label, "Genres");
    assert_eq!(sections[3].tags.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), ["english", "japanese", "chinese"]);
}
