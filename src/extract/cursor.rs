//! Text-scanning primitives shared by the extractors
//!
//! The site's markup has no stable ids, so fields are found by searching
//! for literal marker strings and slicing between them.

use crate::extract::error::{ExtractResult, ExtractionError};

/// Forward-only position inside one chunk of page text
///
/// Each successful [`skip_past`](Cursor::skip_past) moves the cursor beyond
/// the marker, so later searches only see what follows it. Field order in
/// the markup is therefore a hard dependency of the caller.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    chunk: &'a str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    pub fn new(chunk: &'a str) -> Self {
        Self { chunk, rest: chunk }
    }

    /// Text not consumed yet
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    /// Advances past the next occurrence of `marker`
    pub fn skip_past(&mut self, marker: &str) -> ExtractResult<()> {
        let index = self
            .rest
            .find(marker)
            .ok_or_else(|| self.missing(marker))?;
        self.rest = &self.rest[index + marker.len()..];
        Ok(())
    }

    /// Text from the cursor up to the next `marker`, without advancing
    pub fn peek_until(&self, marker: &str) -> ExtractResult<&'a str> {
        self.rest
            .find(marker)
            .map(|index| &self.rest[..index])
            .ok_or_else(|| self.missing(marker))
    }

    /// Error for a marker absent from the remaining text
    pub fn missing(&self, marker: &str) -> ExtractionError {
        ExtractionError::missing_marker(marker, self.chunk)
    }

    /// Error for a located value that does not parse
    pub fn invalid(&self, field: &str, value: &str) -> ExtractionError {
        ExtractionError::invalid_value(field, value, self.chunk)
    }
}

/// Every `>text<` run in `markup`, in document order
///
/// A run never spans a line break, and empty runs (`><`) are included so
/// positional callers see the same sequence the page has.
pub fn text_runs(markup: &str) -> Vec<&str> {
    let bytes = markup.as_bytes();
    let mut runs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'>' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut j = start;
        while j < bytes.len() && bytes[j] != b'<' && bytes[j] != b'\n' {
            j += 1;
        }
        if j < bytes.len() && bytes[j] == b'<' {
            runs.push(&markup[start..j]);
            i = j + 1;
        } else {
            i = start;
        }
    }

    runs
}

/// Text of the first element opened in `chunk`: after the first `>`, up to
/// the following `<`
pub fn cell_text(chunk: &str) -> Option<&str> {
    let (_, after) = chunk.split_once('>')?;
    Some(after.split('<').next().unwrap_or(after))
}

/// Text of the first link in `chunk`, or the plain cell text when the cell
/// holds no link
pub fn link_or_cell_text(chunk: &str) -> Option<&str> {
    match chunk.split_once("</a>") {
        Some((before, _)) => before.rsplit("\">").next(),
        None => cell_text(chunk),
    }
}

/// Integer following each occurrence of `prefix` in `text`, in document order
///
/// Occurrences not followed by at least one digit are reported as errors:
/// the prefix only ever precedes an id on the site.
pub fn ids_after(text: &str, prefix: &str) -> ExtractResult<Vec<u32>> {
    let mut ids = Vec::new();
    for (index, _) in text.match_indices(prefix) {
        let tail = &text[index + prefix.len()..];
        let digits_end = tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tail.len());
        let digits = &tail[..digits_end];
        let id = digits.parse().map_err(|_| {
            let context_end = floor_char_boundary(tail, (digits_end + 16).min(tail.len()));
            let context = &text[index..index + prefix.len() + context_end];
            ExtractionError::invalid_value("id", digits, context)
        })?;
        ids.push(id);
    }
    Ok(ids)
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
