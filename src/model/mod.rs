//! Record types produced by the extractors

mod track;

pub use track::{mark_favorites, Track};
