// Job search.
// The client collapses concurrent identical queries; sources, fallback and
// notifier plug in behind the traits in `source`.

pub mod client;
pub mod fallback;
pub mod handlers;
pub mod scraper;
pub mod source;

pub use client::SearchClient;
