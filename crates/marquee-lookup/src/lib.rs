pub mod error;
pub mod omdb;
pub mod traits;

pub use error::LookupError;
pub use omdb::{OmdbClient, SEARCH_RESULT_LIMIT};
pub use traits::MovieLookup;
