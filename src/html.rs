//! Turning fetched HTML into terminal text and search result links.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::form_urlencoded;

use crate::config::SEARCH_RESULT_PREFIX;

// CSS selector strings
const CONTENT_SELECTOR_STR: &str = "p, h1, h2, h3, h4, h5, h6, a, ul, li";
const ANCHOR_SELECTOR_STR: &str = "a[href]";

static CONTENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(CONTENT_SELECTOR_STR).expect("Failed to parse content selector - this is a bug")
});

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(ANCHOR_SELECTOR_STR).expect("Failed to parse anchor selector - this is a bug")
});

/// Renders the readable parts of an HTML page as plain text.
///
/// Elements are visited in document order:
/// - headings get their own line, underlined with `-`
/// - paragraphs are preceded by a blank line
/// - links print as `Link: <href>`
/// - list items print as `  - <text>`, list containers print their text
pub fn render_page(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    for element in document.select(&CONTENT_SELECTOR) {
        let text = element_text(&element);
        match element.value().name() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                out.push('\n');
                out.push_str(&text);
                out.push('\n');
                out.push_str(&"-".repeat(text.chars().count()));
                out.push('\n');
            }
            "p" => {
                out.push('\n');
                out.push_str(&text);
                out.push('\n');
            }
            "a" => {
                out.push_str("\nLink: ");
                out.push_str(element.value().attr("href").unwrap_or_default());
                out.push('\n');
            }
            "li" => {
                out.push_str("  - ");
                out.push_str(&text);
                out.push('\n');
            }
            _ => {
                out.push_str(&text);
                out.push('\n');
            }
        }
    }

    out
}

/// Extracts result links from a search results page.
///
/// Result anchors look like `/url?q=<target>&sa=...`; the decoded `q`
/// parameter of each is returned in document order.
pub fn extract_search_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.starts_with(SEARCH_RESULT_PREFIX))
        .filter_map(|href| {
            let query = href.split_once('?').map(|(_, query)| query)?;
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "q")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|link| !link.is_empty())
        .collect()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
