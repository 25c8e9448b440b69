use crate::error::LookupError;
use async_trait::async_trait;
use marquee_models::{Movie, SearchCandidate};

/// Boundary to the external movie database.
///
/// Implementations issue exactly one request per call: no retry, no caching.
#[async_trait]
pub trait MovieLookup: Send + Sync {
    /// Title search, capped at [`crate::SEARCH_RESULT_LIMIT`] candidates
    async fn search(&self, title: &str) -> Result<Vec<SearchCandidate>, LookupError>;

    /// Full record for an external id. The returned movie has no category.
    async fn details(&self, imdb_id: &str) -> Result<Movie, LookupError>;
}
