//! Web page fetching and HTML block extraction for kbforge.
//!
//! [`PageFetcher`] GETs a page and returns the text of its content-bearing
//! elements in document order. Joining, splitting, and classification of
//! those blocks happen downstream in `kbforge-core`.

pub mod fetch;

pub use fetch::{PageFetcher, extract_blocks};
