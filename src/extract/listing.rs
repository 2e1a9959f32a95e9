//! Catalog listing pages (`playlist.php?ajax=true&page=N`)
//!
//! Every song on a listing page links to the playlist twice: once in the
//! "artist - title" heading and once in the block holding everything else.
//! Splitting on that link yields chunks in heading/detail pairs.

use crate::extract::cursor::{text_runs, Cursor};
use crate::extract::error::{ExtractResult, ExtractionError};
use crate::model::Track;
use crate::normalize::{clean_tags, clean_text, parse_count, parse_duration, parse_rating, split_genres};

/// Internal link that opens both halves of a song entry
const ENTRY_MARKER: &str = "playlist.php";

/// Cutoff strings of the detail block, in markup order
mod cutoffs {
    pub const ALBUM: &str = ">";
    pub const DURATION: &str = "<br/>";
    pub const USER_RATING: &str = "My rating: ";
    pub const RATING: &str = "Song rating: ";
    pub const TOTAL_RATES: &str = "(";
    pub const GENRES: &str = "Genre(s): ";
    pub const TAGS: &str = "Tag(s):";
    pub const ID: &str = "songinfo.php?id=";
}

/// Parses every song entry of a listing page, in page order
///
/// Entries with a blank artist are placeholder rows the site keeps in its
/// catalog; they are skipped.
///
/// # Errors
///
/// Returns [`ExtractionError`] with the entry's raw chunk when any cutoff
/// string of a non-placeholder entry is missing or a value does not parse.
pub fn parse_listing_page(html: &str) -> ExtractResult<Vec<Track>> {
    let chunks: Vec<&str> = html.split(ENTRY_MARKER).skip(1).collect();
    let mut tracks = Vec::with_capacity(chunks.len() / 2);

    for pair in chunks.chunks(2) {
        let heading = pair[0];
        let Some((artist, title)) = parse_heading(heading)? else {
            tracing::debug!("Skipping placeholder entry without artist");
            continue;
        };

        let detail = pair
            .get(1)
            .ok_or_else(|| ExtractionError::missing_marker(ENTRY_MARKER, heading))?;
        tracks.push(parse_entry_detail(artist, title, detail)?);
    }

    Ok(tracks)
}

/// Artist and title from the heading chunk, `None` for a placeholder row
fn parse_heading(heading: &str) -> ExtractResult<Option<(String, String)>> {
    let runs = text_runs(heading);
    let artist = runs
        .first()
        .map(|run| clean_text(run))
        .ok_or_else(|| ExtractionError::missing_marker(">", heading))?;

    if artist.is_empty() {
        return Ok(None);
    }

    // The second run reads " - Title"
    let title = runs
        .get(1)
        .ok_or_else(|| ExtractionError::missing_marker("</a>", heading))?;
    let title = clean_text(title.strip_prefix(" - ").unwrap_or(title));

    Ok(Some((artist, title)))
}

/// Walks the detail chunk of one entry
///
/// Each cutoff is searched for after the previous one, so the order of the
/// statements below mirrors the order of the fields in the markup.
fn parse_entry_detail(artist: String, title: String, detail: &str) -> ExtractResult<Track> {
    let mut cursor = Cursor::new(detail);

    cursor.skip_past(cutoffs::ALBUM)?;
    let album = clean_text(cursor.peek_until("<")?);

    cursor.skip_past(cutoffs::DURATION)?;
    let duration_text = duration_display(&cursor)?;
    let duration =
        parse_duration(duration_text).ok_or_else(|| cursor.invalid("duration", duration_text))?;

    cursor.skip_past(cutoffs::USER_RATING)?;
    let user_rating_text: String = cursor
        .rest()
        .trim_start()
        .chars()
        .take(2)
        .take_while(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    let user_rating = Some(user_rating_text.as_str())
        .filter(|text| !text.is_empty())
        .and_then(parse_count::<u8>)
        .filter(|rating| *rating <= 10)
        .ok_or_else(|| cursor.invalid("user rating", &user_rating_text))?;

    cursor.skip_past(cutoffs::RATING)?;
    let rating = if cursor.rest().starts_with('-') {
        0.0
    } else {
        let rating_text = cursor.peek_until(" ")?;
        let score = rating_text.split('/').next().unwrap_or(rating_text);
        parse_rating(score).ok_or_else(|| cursor.invalid("rating", rating_text))?
    };

    cursor.skip_past(cutoffs::TOTAL_RATES)?;
    let total_rates_text = cursor.peek_until(" ")?;
    let total_rates =
        parse_count(total_rates_text).ok_or_else(|| cursor.invalid("total rates", total_rates_text))?;

    cursor.skip_past(cutoffs::GENRES)?;
    let genres = split_genres(cursor.peek_until("<br/>")?);

    cursor.skip_past(cutoffs::TAGS)?;
    let tags = clean_tags(text_runs(cursor.peek_until("</td>")?));

    cursor.skip_past(cutoffs::ID)?;
    let id_text = cursor.peek_until("\"")?;
    let id = id_text
        .parse()
        .map_err(|_| cursor.invalid("id", id_text))?;

    Ok(Track {
        id,
        artist,
        title,
        album,
        // Listing pages show neither the year nor favorite status
        year: 0,
        genres,
        tags,
        rating,
        total_rates,
        duration,
        user_rating,
        user_favorite: false,
    })
}

/// The `M:SS` text at the cursor: everything up to two characters past the
/// first colon
fn duration_display<'a>(cursor: &Cursor<'a>) -> ExtractResult<&'a str> {
    let rest = cursor.rest();
    let colon = rest.find(':').ok_or_else(|| cursor.missing(":"))?;
    let mut end = colon + 1;
    for _ in 0..2 {
        match rest[end..].chars().next() {
            Some(c) => end += c.len_utf8(),
            None => break,
        }
    }
    Ok(rest[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry<'a> {
        id: u32,
        artist: &'a str,
        title: &'a str,
        user_rating: &'a str,
        rating: &'a str,
        votes: &'a str,
        genres: &'a str,
        tags: &'a [&'a str],
    }

    fn entry_html(entry: &Entry<'_>) -> String {
        let tags: Vec<String> = entry
            .tags
            .iter()
            .map(|tag| format!(r#"<a href="tags.php?tag={0}">{0}</a>"#, tag))
            .collect();
        format!(
            concat!(
                r#"<tr><td class="title"><a href="playlist.php?artist={artist}">{artist}</a> - {title}</td></tr>"#,
                "\n",
                r#"<tr><td class="info">Album: <a href="playlist.php?album=x">Some Album</a><br/> 4:05<br/>"#,
                r#"My rating: {user_rating}<br/>Song rating: {rating} ({votes} votes)<br/>"#,
                r#"Genre(s): {genres}<br/>Tag(s): {tags}</td>"#,
                r#"<td><a href="songinfo.php?id={id}">Info</a></td></tr>"#,
                "\n"
            ),
            artist = entry.artist,
            title = entry.title,
            user_rating = entry.user_rating,
            rating = entry.rating,
            votes = entry.votes,
            genres = entry.genres,
            tags = tags.join(", "),
            id = entry.id,
        )
    }

    fn page(entries: &[Entry<'_>]) -> String {
        let mut html = String::from(r#"<div id="pager"><a href="javascript:goToPage(2)">2</a></div><table>"#);
        for entry in entries {
            html.push_str(&entry_html(entry));
        }
        html.push_str("</table>");
        html
    }

    fn entry(id: u32, artist: &'static str) -> Entry<'static> {
        Entry {
            id,
            artist,
            title: "Connect",
            user_rating: "8",
            rating: "8.50",
            votes: "120",
            genres: "Rock, Pop",
            tags: &["anime", "opening"],
        }
    }

    #[test]
    fn test_parse_single_entry() {
        let tracks = parse_listing_page(&page(&[entry(501, "ClariS")])).unwrap();
        assert_eq!(tracks.len(), 1);

        let track = &tracks[0];
        assert_eq!(track.id, 501);
        assert_eq!(track.artist, "ClariS");
        assert_eq!(track.title, "Connect");
        assert_eq!(track.album, "Some Album");
        assert_eq!(track.duration, 245);
        assert_eq!(track.user_rating, 8);
        assert_eq!(track.rating, 8.5);
        assert_eq!(track.total_rates, 120);
        assert_eq!(track.genres, vec!["Rock", "Pop"]);
        assert_eq!(track.tags, vec!["anime", "opening"]);
        assert_eq!(track.year, 0);
        assert!(!track.user_favorite);
    }

    #[test]
    fn test_entries_keep_page_order_and_skip_placeholders() {
        let html = page(&[entry(1, "First"), entry(2, ""), entry(3, "Third")]);
        let tracks = parse_listing_page(&html).unwrap();
        let ids: Vec<u32> = tracks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_unset_ratings_are_zero() {
        let mut unrated = entry(9, "Nobody");
        unrated.user_rating = "-";
        unrated.rating = "-";
        unrated.votes = "0";

        let tracks = parse_listing_page(&page(&[unrated])).unwrap();
        assert_eq!(tracks[0].user_rating, 0);
        assert_eq!(tracks[0].rating, 0.0);
        assert_eq!(tracks[0].total_rates, 0);
    }

    #[test]
    fn test_rating_with_scale_suffix() {
        let mut scaled = entry(8, "Scaled");
        scaled.rating = "7.25/10";
        let tracks = parse_listing_page(&page(&[scaled])).unwrap();
        assert_eq!(tracks[0].rating, 7.25);
        assert_eq!(tracks[0].total_rates, 120);
    }

    #[test]
    fn test_user_rating_must_be_a_number() {
        let html = page(&[entry(7, "Odd")]).replace("My rating: 8", "My rating: <b>8</b>");
        let err = parse_listing_page(&html).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidValue { ref field, .. } if field == "user rating"));
    }

    #[test]
    fn test_ten_user_rating() {
        let mut loved = entry(10, "Favorite");
        loved.user_rating = "10";
        let tracks = parse_listing_page(&page(&[loved])).unwrap();
        assert_eq!(tracks[0].user_rating, 10);
    }

    #[test]
    fn test_empty_genres_and_tags() {
        let mut bare = entry(11, "Bare");
        bare.genres = "";
        bare.tags = &[];
        let tracks = parse_listing_page(&page(&[bare])).unwrap();
        assert!(tracks[0].genres.is_empty());
        assert!(tracks[0].tags.is_empty());
    }

    #[test]
    fn test_escaped_text_is_decoded() {
        let mut quoted = entry(12, "Simon &amp; Garfunkel");
        quoted.title = "Don&#039;t &quot;Stop&quot;";
        let tracks = parse_listing_page(&page(&[quoted])).unwrap();
        assert_eq!(tracks[0].artist, "Simon & Garfunkel");
        assert_eq!(tracks[0].title, "Don't \"Stop\"");
    }

    #[test]
    fn test_page_without_entries() {
        assert!(parse_listing_page("<p>Nothing here</p>").unwrap().is_empty());
    }

    #[test]
    fn test_missing_cutoff_reports_chunk() {
        let html = page(&[entry(13, "Drifted")]).replace("My rating: ", "Your rating: ");
        match parse_listing_page(&html) {
            Err(ExtractionError::MissingMarker { marker, chunk }) => {
                assert_eq!(marker, "My rating: ");
                assert!(chunk.contains("Your rating: 8"));
            }
            other => panic!("expected MissingMarker, got {:?}", other),
        }
    }

    #[test]
    fn test_reordered_fields_fail() {
        // Genres moved in front of the rating: the sequential walk cannot see them
        let html = page(&[entry(14, "Moved")])
            .replace("Genre(s): Rock, Pop<br/>", "")
            .replace("My rating: ", "Genre(s): Rock, Pop<br/>My rating: ");
        let err = parse_listing_page(&html).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingMarker { ref marker, .. } if marker == "Genre(s): "));
    }

    #[test]
    fn test_invalid_duration() {
        let html = page(&[entry(15, "Slow")]).replace("4:05", "4:xx");
        let err = parse_listing_page(&html).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidValue { ref field, .. } if field == "duration"));
    }

    #[test]
    fn test_truncated_entry() {
        let html = page(&[entry(16, "Cut")]);
        let cut = &html[..html.rfind("playlist.php?album").unwrap()];
        let err = parse_listing_page(cut).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingMarker { ref marker, .. } if marker == "playlist.php"));
    }
}
