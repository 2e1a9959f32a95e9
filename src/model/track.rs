use std::collections::HashSet;
use std::fmt;

/// Metadata for one song of the radio catalog
///
/// `id` is the only authoritative field. Everything else is a snapshot of
/// the site at scrape time and is replaced wholesale on refresh, except the
/// two user-specific fields which no scrape produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    /// Song id assigned by the site
    pub id: u32,

    pub artist: String,
    pub title: String,
    pub album: String,

    /// Release year, `0` when the site does not show one
    pub year: u32,

    pub genres: Vec<String>,
    pub tags: Vec<String>,

    /// Average rating on the site's 0-10 scale, `0.0` when nobody rated yet
    pub rating: f64,

    /// Number of votes behind `rating`
    pub total_rates: u32,

    /// Length in seconds
    pub duration: u32,

    /// This user's rating (1-10), `0` when unrated
    pub user_rating: u8,

    pub user_favorite: bool,
}

impl Track {
    /// Copies the user-specific fields of a stored record onto a freshly
    /// scraped one
    ///
    /// Detail pages never carry `user_rating`/`user_favorite`, so a refresh
    /// would otherwise reset them.
    pub fn preserve_user_fields(&mut self, previous: &Track) {
        self.user_rating = previous.user_rating;
        self.user_favorite = previous.user_favorite;
    }

    /// Formats `duration` as `M:SS`
    pub fn duration_display(&self) -> String {
        format!("{}:{:02}", self.duration / 60, self.duration % 60)
    }
}

impl fmt::Display for Track {
    /// Tab-separated single line, in field declaration order
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.2}\t{}\t{}\t{}\t{}",
            self.id,
            self.artist,
            self.title,
            self.album,
            self.year,
            self.genres.join(", "),
            self.tags.join(", "),
            self.rating,
            self.total_rates,
            self.duration_display(),
            self.user_rating,
            self.user_favorite
        )
    }
}

/// Flags every track whose id appears in `favorite_ids`
///
/// Tracks missing from the list are left untouched. Returns the number of
/// tracks flagged.
pub fn mark_favorites(tracks: &mut [Track], favorite_ids: &[u32]) -> usize {
    let favorites: HashSet<u32> = favorite_ids.iter().copied().collect();
    let mut marked = 0;
    for track in tracks.iter_mut().filter(|t| favorites.contains(&t.id)) {
        track.user_favorite = true;
        marked += 1;
    }
    marked
}
