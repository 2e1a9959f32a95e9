//! Single song page (`songinfo.php?id=N`)
//!
//! The page is a two-column table: a label cell followed by its value
//! cell. Optional rows such as an album homepage link appear on some songs
//! only, which shifts every later row, so fields are located by their label
//! rather than by position.

use crate::extract::cursor::{cell_text, link_or_cell_text, text_runs};
use crate::extract::error::{ExtractResult, ExtractionError};
use crate::model::Track;
use crate::normalize::{
    clean_tags, clean_text, parse_count, parse_duration, parse_rating_display, split_genres,
};

/// Splits the page into one chunk per table cell
const CELL_MARKER: &str = "<td class=";

/// Opening of the first tag link inside the tags cell
const TAG_LIST_OPEN: &str = "<span";

/// End of a table cell
const CELL_CLOSE: &str = "</td>";

/// Row labels as printed on the page, without the trailing colon
pub mod labels {
    pub const SONG_ID: &str = "Song ID";
    pub const ARTIST: &str = "Artist";
    pub const TITLE: &str = "Title";
    pub const ALBUM: &str = "Album";
    pub const YEAR: &str = "Year";
    pub const GENRES: &str = "Genre(s)";
    pub const RATING: &str = "Rating";
    pub const DURATION: &str = "Duration";
    pub const TAGS: &str = "Tags";

    /// Every label a detail page must carry
    pub const REQUIRED: [&str; 9] = [
        SONG_ID, ARTIST, TITLE, ALBUM, YEAR, GENRES, RATING, DURATION, TAGS,
    ];
}

/// A detail page cut into table cells
struct DetailPage<'a> {
    html: &'a str,
    cells: Vec<&'a str>,
}

impl<'a> DetailPage<'a> {
    fn new(html: &'a str) -> Self {
        Self {
            html,
            cells: html.split(CELL_MARKER).collect(),
        }
    }

    /// The cell right after the one labelled `label`
    ///
    /// Only the first cell of a row can be a label, so a value whose text
    /// happens to equal a label is never taken for one.
    fn value_cell(&self, label: &str) -> ExtractResult<&'a str> {
        let position = (1..self.cells.len())
            .find(|&index| {
                opens_row(self.cells[index - 1]) && is_label_cell(self.cells[index], label)
            })
            .ok_or_else(|| ExtractionError::missing_label(label, self.html))?;

        self.cells
            .get(position + 1)
            .copied()
            .ok_or_else(|| ExtractionError::missing_marker(CELL_MARKER, self.cells[position]))
    }

    /// Plain text of the value cell
    fn value_text(&self, label: &str) -> ExtractResult<&'a str> {
        let cell = self.value_cell(label)?;
        cell_text(cell).ok_or_else(|| ExtractionError::missing_marker(">", cell))
    }

    /// Link text of the value cell, falling back to plain text
    fn value_link_text(&self, label: &str) -> ExtractResult<&'a str> {
        let cell = self.value_cell(label)?;
        link_or_cell_text(cell).ok_or_else(|| ExtractionError::missing_marker(">", cell))
    }
}

/// Whether the markup before a cell ends with a `<tr ...>` opening tag
fn opens_row(before: &str) -> bool {
    let before = before.trim_end();
    if !before.ends_with('>') {
        return false;
    }
    before
        .rfind('<')
        .and_then(|open| before[open + 1..].split(|c: char| c == '>' || c.is_whitespace()).next())
        .map(|tag| tag.eq_ignore_ascii_case("tr"))
        .unwrap_or(false)
}

fn is_label_cell(cell: &str, label: &str) -> bool {
    cell_text(cell)
        .map(|text| text.trim().trim_end_matches(':').trim_end() == label)
        .unwrap_or(false)
}

/// Parses a song detail page into a [`Track`]
///
/// The user-specific fields are not on this page and are left at their
/// defaults; see [`Track::preserve_user_fields`].
///
/// # Errors
///
/// [`ExtractionError::MissingLabel`] names the first required row that is
/// absent; [`ExtractionError::InvalidValue`] reports a row whose text does
/// not parse.
pub fn parse_detail_page(html: &str) -> ExtractResult<Track> {
    let page = DetailPage::new(html);

    let id_text = page.value_text(labels::SONG_ID)?;
    let id = id_text
        .trim()
        .parse()
        .map_err(|_| invalid(&page, labels::SONG_ID, id_text))?;

    let artist = clean_text(page.value_link_text(labels::ARTIST)?);
    let title = clean_text(page.value_text(labels::TITLE)?);
    let album = clean_text(page.value_link_text(labels::ALBUM)?);

    let year_text = page.value_text(labels::YEAR)?;
    let year = parse_count(year_text).ok_or_else(|| invalid(&page, labels::YEAR, year_text))?;

    let genres = split_genres(page.value_text(labels::GENRES)?);

    let rating_text = page.value_text(labels::RATING)?;
    let (rating, total_rates) = parse_rating_display(rating_text)
        .ok_or_else(|| invalid(&page, labels::RATING, rating_text))?;

    let duration_text = page.value_text(labels::DURATION)?;
    let duration = parse_duration(duration_text)
        .ok_or_else(|| invalid(&page, labels::DURATION, duration_text))?;

    let tags = parse_tag_cell(page.value_cell(labels::TAGS)?)?;

    Ok(Track {
        id,
        artist,
        title,
        album,
        year,
        genres,
        tags,
        rating,
        total_rates,
        duration,
        user_rating: 0,
        user_favorite: false,
    })
}

fn invalid(page: &DetailPage<'_>, label: &str, value: &str) -> ExtractionError {
    let cell = page.value_cell(label).unwrap_or(page.html);
    ExtractionError::invalid_value(label, value, cell)
}

/// Tag names inside the tags cell; a cell without tag links has no tags
fn parse_tag_cell(cell: &str) -> ExtractResult<Vec<String>> {
    let Some(open) = cell.find(TAG_LIST_OPEN) else {
        return Ok(Vec::new());
    };
    let list = &cell[open..];
    let close = list
        .find(CELL_CLOSE)
        .ok_or_else(|| ExtractionError::missing_marker(CELL_CLOSE, cell))?;
    Ok(clean_tags(text_runs(&list[..close])))
}
