//! Page count discovery for paginated listings

/// Opening of the page-jump call the listing's pager links use,
/// e.g. `goToPage(12)`
const PAGE_JUMP: &str = "goToPage(";

/// Highest page number referenced by a listing page
///
/// Scans every `goToPage(N)` directive and returns the largest `N`.
/// A listing without any directive fits on one page, so the result is
/// never below `1`.
///
/// ```
/// use anfo::extract::max_page;
///
/// let html = "<a onclick=\"goToPage(1)\">1</a> goToPage(3) goToPage(2) goToPage(3)";
/// assert_eq!(max_page(html), 3);
/// assert_eq!(max_page("<p>no pager</p>"), 1);
/// ```
pub fn max_page(listing: &str) -> u32 {
    listing
        .match_indices(PAGE_JUMP)
        .filter_map(|(index, _)| {
            let args = &listing[index + PAGE_JUMP.len()..];
            let (number, _) = args.split_once(')')?;
            if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            number.parse::<u32>().ok()
        })
        .fold(1, u32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_page_unordered_with_duplicates() {
        let html = r#"
            <a href="javascript:goToPage(3)">3</a>
            <a href="javascript:goToPage(1)">1</a>
            <a href="javascript:goToPage(2)">2</a>
            <a href="javascript:goToPage(3)">last</a>
        "#;
        assert_eq!(max_page(html), 3);
    }

    #[test]
    fn test_max_page_defaults_to_one() {
        assert_eq!(max_page(""), 1);
        assert_eq!(max_page("<table></table>"), 1);
    }

    #[test]
    fn test_max_page_ignores_malformed_directives() {
        let html = "goToPage() goToPage(x) goToPage(4 goToPage(-9) goToPage(2)";
        assert_eq!(max_page(html), 2);
    }

    #[test]
    fn test_max_page_multi_digit() {
        assert_eq!(max_page("goToPage(9) goToPage(412) goToPage(87)"), 412);
    }
}
