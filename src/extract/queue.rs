//! Live request queue page (`queuelist.php`)

use crate::extract::cursor::ids_after;
use crate::extract::error::ExtractResult;

/// Prefix of the song link in every queue entry
const QUEUE_ENTRY: &str = "Song: <a href=\"songinfo.php?id=";

/// Ids of the queued songs, soonest to play first
///
/// Every entry is returned, including the block of most-requested songs
/// the site lists alongside the queue.
pub fn parse_queue_page(html: &str) -> ExtractResult<Vec<u32>> {
    ids_after(html, QUEUE_ENTRY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_order() {
        let html = r#"
            <div class="queue">
              <p>1. Song: <a href="songinfo.php?id=300">Hacking to the Gate</a> (Kanako Itou)</p>
              <p>2. Song: <a href="songinfo.php?id=12">Sorairo Days</a> (Shoko Nakagawa)</p>
              <p>3. Song: <a href="songinfo.php?id=300">Hacking to the Gate</a> (Kanako Itou)</p>
            </div>
            <p>Now playing: <a href="songinfo.php?id=999">not a queue entry</a></p>
        "#;
        assert_eq!(parse_queue_page(html).unwrap(), vec![300, 12, 300]);
    }

    #[test]
    fn test_empty_queue() {
        assert!(parse_queue_page("<div class=\"queue\"></div>").unwrap().is_empty());
    }
}
