//! Field extractors for the radio site's pages
//!
//! This module contains one parser per page type:
//! - song detail pages, one [`Track`](crate::Track) each
//! - catalog listing pages, many tracks each
//! - favorites pages and the live queue, song ids only
//! - pagination discovery for the listings
//!
//! None of them touch the network; they take page text and return records
//! or an [`ExtractionError`] carrying the markup that failed to match.

mod cursor;
mod detail;
mod error;
mod favorites;
mod listing;
mod pagination;
mod queue;

pub use cursor::{text_runs, Cursor};
pub use detail::{labels, parse_detail_page};
pub use error::{ExtractResult, ExtractionError};
pub use favorites::parse_favorites_page;
pub use listing::parse_listing_page;
pub use pagination::max_page;
pub use queue::parse_queue_page;
