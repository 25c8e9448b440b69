pub mod api;
pub mod client;

pub use api::SEARCH_RESULT_LIMIT;
pub use client::OmdbClient;
