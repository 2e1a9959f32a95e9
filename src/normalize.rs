//! Normalizer: coerces raw extracted strings into typed fields
//!
//! The site renders numbers for humans: `3:45` durations, `8.12/10 (34 votes)`
//! ratings, `-` for "not rated yet" and blanks for unknown years. The helpers
//! here turn those displays into plain values and canonicalize the
//! comma-separated genre and tag lists into ordered string sequences.
//!
//! Parsers return `None` for text they do not recognize; the extractors turn
//! that into an [`ExtractionError`](crate::ExtractionError) with the
//! offending chunk attached.

use scraper::Html;

/// Separator used when a list field is flattened into a single string for
/// storage
pub const LIST_DELIMITER: char = '@';

/// Placeholder the site shows for a value that does not exist yet
const UNSET: &str = "-";

/// Decodes HTML entities and drops any markup left in an extracted value
///
/// ```
/// use anfo::normalize::clean_text;
///
/// assert_eq!(clean_text(" Simon &amp; Garfunkel "), "Simon & Garfunkel");
/// assert_eq!(clean_text("<b>Don&#039;t</b>"), "Don't");
/// ```
pub fn clean_text(raw: &str) -> String {
    if !raw.contains('&') && !raw.contains('<') {
        return raw.trim().to_string();
    }
    let fragment = Html::parse_fragment(raw);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parses a `minutes:seconds` display into total seconds
///
/// ```
/// use anfo::normalize::parse_duration;
///
/// assert_eq!(parse_duration("3:45"), Some(225));
/// assert_eq!(parse_duration("10:00"), Some(600));
/// assert_eq!(parse_duration("3.45"), None);
/// ```
pub fn parse_duration(display: &str) -> Option<u32> {
    let (minutes, seconds) = display.trim().split_once(':')?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    let seconds: u32 = seconds.trim().parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Parses a rating value, mapping the `-` placeholder to `0.0`
pub fn parse_rating(display: &str) -> Option<f64> {
    let display = display.trim();
    if display == UNSET {
        return Some(0.0);
    }
    let rating: f64 = display.parse().ok()?;
    rating.is_finite().then_some(rating)
}

/// Parses a count or small integer, mapping blank and `-` to `0`
///
/// Used for vote totals, user ratings and years.
pub fn parse_count<T>(display: &str) -> Option<T>
where
    T: std::str::FromStr + Default,
{
    let display = display.trim();
    if display.is_empty() || display == UNSET {
        return Some(T::default());
    }
    display.parse().ok()
}

/// Parses the combined rating cell of a detail page
///
/// The cell reads `8.12/10 (34 votes)` for a rated song and `- (0 votes)`
/// before anyone voted. Returns `(rating, total_rates)`.
///
/// ```
/// use anfo::normalize::parse_rating_display;
///
/// assert_eq!(parse_rating_display("8.12/10 (34 votes)"), Some((8.12, 34)));
/// assert_eq!(parse_rating_display("- (0 votes)"), Some((0.0, 0)));
/// ```
pub fn parse_rating_display(display: &str) -> Option<(f64, u32)> {
    let (head, tail) = display.split_once('(')?;
    let score = head.split('/').next().unwrap_or(head);
    let rating = parse_rating(score)?;

    let votes = tail.split([' ', ')']).next().unwrap_or_default();
    let total_rates = parse_count(votes)?;

    Some((rating, total_rates))
}

/// Splits a comma-separated genre cell into an ordered list
///
/// Whitespace around each genre is dropped, as are empty entries, so an
/// empty cell yields an empty list. Duplicates are kept.
pub fn split_genres(display: &str) -> Vec<String> {
    display
        .split(',')
        .map(clean_text)
        .filter(|genre| !genre.is_empty())
        .collect()
}

/// Cleans tag candidates taken from a tag list, keeping page order
///
/// Separators between tag links show up as candidates too (`, `, `|`),
/// so blank and punctuation-only entries are discarded.
pub fn clean_tags<'a, I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .map(clean_text)
        .filter(|tag| !is_noise(tag))
        .collect()
}

fn is_noise(candidate: &str) -> bool {
    candidate
        .chars()
        .all(|c| c.is_whitespace() || c.is_ascii_punctuation())
}

/// Flattens a list field into one delimited string
///
/// Inverse of [`decode_list`] for lists of non-empty strings that do not
/// contain [`LIST_DELIMITER`].
pub fn encode_list(items: &[String]) -> String {
    let mut encoded = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            encoded.push(LIST_DELIMITER);
        }
        encoded.push_str(item);
    }
    encoded
}

/// Splits a delimited string produced by [`encode_list`]
///
/// An empty string decodes to an empty list.
pub fn decode_list(encoded: &str) -> Vec<String> {
    if encoded.is_empty() {
        return Vec::new();
    }
    encoded.split(LIST_DELIMITER).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("3:45"), Some(225));
        assert_eq!(parse_duration("10:00"), Some(600));
        assert_eq!(parse_duration(" 0:07 "), Some(7));
        assert_eq!(parse_duration("125:30"), Some(7530));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("3"), None);
        assert_eq!(parse_duration("3:"), None);
        assert_eq!(parse_duration("a:45"), None);
        assert_eq!(parse_duration("3:75"), None);
        assert_eq!(parse_duration("1:02:03"), None);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("8.12"), Some(8.12));
        assert_eq!(parse_rating(" 10 "), Some(10.0));
        assert_eq!(parse_rating("-"), Some(0.0));
        assert_eq!(parse_rating("NaN"), None);
        assert_eq!(parse_rating("great"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count::<u32>("34"), Some(34));
        assert_eq!(parse_count::<u32>(""), Some(0));
        assert_eq!(parse_count::<u8>("-"), Some(0));
        assert_eq!(parse_count::<u8>(" 7"), Some(7));
        assert_eq!(parse_count::<u8>("x"), None);
        assert_eq!(parse_count::<u8>("300"), None);
    }

    #[test]
    fn test_parse_rating_display() {
        assert_eq!(parse_rating_display("8.12/10 (34 votes)"), Some((8.12, 34)));
        assert_eq!(parse_rating_display("- (0 votes)"), Some((0.0, 0)));
        assert_eq!(parse_rating_display("-/10 ( votes)"), Some((0.0, 0)));
        assert_eq!(parse_rating_display("7/10 (1)"), Some((7.0, 1)));
        assert_eq!(parse_rating_display("8.12/10"), None);
        assert_eq!(parse_rating_display("x/10 (3 votes)"), None);
    }

    #[test]
    fn test_split_genres() {
        assert_eq!(split_genres("Rock, Pop"), strings(&["Rock", "Pop"]));
        assert_eq!(split_genres("Rock,Pop,Rock"), strings(&["Rock", "Pop", "Rock"]));
        assert_eq!(split_genres("Drum &amp; Bass"), strings(&["Drum & Bass"]));
        assert!(split_genres("").is_empty());
        assert!(split_genres(" , ").is_empty());
    }

    #[test]
    fn test_clean_tags_drops_noise() {
        let tags = clean_tags(["vocal", ", ", "", "female", "|", " 2000s "]);
        assert_eq!(tags, strings(&["vocal", "female", "2000s"]));
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  plain  "), "plain");
        assert_eq!(clean_text("&quot;Quoted&quot;"), "\"Quoted\"");
        assert_eq!(clean_text("Tom &amp; Jerry @ Home"), "Tom & Jerry @ Home");
        assert_eq!(clean_text("<span>inner</span>"), "inner");
    }

    #[test]
    fn test_list_round_trip() {
        for items in [
            strings(&[]),
            strings(&["Rock"]),
            strings(&["Rock", "Pop"]),
            strings(&["J-Pop", "Rock", "J-Pop"]),
            strings(&["it's", "\"quoted\"", "a, b"]),
        ] {
            assert_eq!(decode_list(&encode_list(&items)), items);
        }
    }

    #[test]
    fn test_encode_list() {
        assert_eq!(encode_list(&strings(&["Rock", "Pop"])), "Rock@Pop");
        assert_eq!(encode_list(&[]), "");
    }
}
