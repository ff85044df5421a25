//! Small query layer over `scraper`, shaped after the jQuery-style lookups the
//! site tables are written against: text of all matches, attribute of the first.
//!
//! `Html` is not `Send`, so documents are parsed and dropped inside synchronous
//! extraction functions and never held across an `.await`.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

pub fn parse(body: &str) -> Html {
    Html::parse_document(body)
}

pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!(selector = css, error = ?e, "invalid selector");
            None
        }
    }
}

/// All elements of the document matching `css`, in document order.
pub fn select_all<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => doc.select(&sel).collect(),
        None => Vec::new(),
    }
}

/// Descendants of `scope` matching `css`.
pub fn select_within<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => scope.select(&sel).collect(),
        None => Vec::new(),
    }
}

pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Concatenated, trimmed text of every match.
pub fn text_of(doc: &Html, css: &str) -> String {
    select_all(doc, css).into_iter().map(element_text).collect::<String>().trim().to_string()
}

pub fn text_within(scope: ElementRef<'_>, css: &str) -> String {
    select_within(scope, css).into_iter().map(element_text).collect::<String>().trim().to_string()
}

/// First non-empty value among `attrs` on `el`, tried in order.
pub fn attr_of(el: ElementRef<'_>, attrs: &[&str]) -> Option<String> {
    attrs
        .iter()
        .filter_map(|a| el.value().attr(a))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Attributes of the first match, tried in order.
pub fn first_attr(doc: &Html, css: &str, attrs: &[&str]) -> Option<String> {
    select_all(doc, css).into_iter().next().and_then(|el| attr_of(el, attrs))
}

pub fn first_attr_within(scope: ElementRef<'_>, css: &str, attrs: &[&str]) -> Option<String> {
    select_within(scope, css).into_iter().next().and_then(|el| attr_of(el, attrs))
}

pub fn exists(doc: &Html, css: &str) -> bool {
    !select_all(doc, css).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div class="box"><a href="/a">One</a><img src="s.jpg" data-src="d.jpg"></div>
        <div class="box"><a href="/b"> Two </a><img data-src="only.jpg"></div>
    "#;

    #[test]
    fn text_concatenates_matches() {
        let doc = parse(PAGE);
        assert_eq!(text_of(&doc, ".box a"), "One Two");
    }

    #[test]
    fn attributes_follow_preference_order() {
        let doc = parse(PAGE);
        let boxes = select_all(&doc, ".box");
        assert_eq!(first_attr_within(boxes[0], "img", &["data-src", "src"]).as_deref(), Some("d.jpg"));
        assert_eq!(first_attr_within(boxes[0], "img", &["src", "data-src"]).as_deref(), Some("s.jpg"));
        assert_eq!(first_attr_within(boxes[1], "img", &["src", "data-src"]).as_deref(), Some("only.jpg"));
        assert_eq!(first_attr_within(boxes[1], "img", &["src"]), None);
    }

    #[test]
    fn invalid_selector_matches_nothing() {
        let doc = parse(PAGE);
        assert!(select_all(&doc, "::nope((").is_empty());
        assert!(!exists(&doc, ".missing"));
        assert!(exists(&doc, ".box"));
    }
}
