//! Favorites listing pages
//!
//! A favorites page only links each song's detail page; no other field is
//! shown, so the result is a list of song ids.

use crate::extract::error::{ExtractResult, ExtractionError};
use scraper::{Html, Selector};

/// Query that carries the song id in a detail link
const DETAIL_LINK: &str = "songinfo.php?id=";

/// Ids of every detail link on a favorites page, in document order
///
/// Ids are returned verbatim: a song linked twice appears twice.
///
/// # Example
///
/// ```
/// use anfo::extract::parse_favorites_page;
///
/// let html = r#"<a href="songinfo.php?id=3">A</a> <a href="songinfo.php?id=1">B</a>"#;
/// assert_eq!(parse_favorites_page(html).unwrap(), vec![3, 1]);
/// ```
pub fn parse_favorites_page(html: &str) -> ExtractResult<Vec<u32>> {
    let document = Html::parse_document(html);
    let mut ids = Vec::new();

    if let Ok(link_selector) = Selector::parse("a[href]") {
        for element in document.select(&link_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if let Some(id) = detail_link_id(href)? {
                ids.push(id);
            }
        }
    }

    Ok(ids)
}

/// Song id carried by a detail link, `None` for any other link
fn detail_link_id(href: &str) -> ExtractResult<Option<u32>> {
    let Some(index) = href.find(DETAIL_LINK) else {
        return Ok(None);
    };
    let tail = &href[index + DETAIL_LINK.len()..];
    let digits_end = tail
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tail.len());
    let digits = &tail[..digits_end];

    digits
        .parse()
        .map(Some)
        .map_err(|_| ExtractionError::invalid_value("id", digits, href))
}
