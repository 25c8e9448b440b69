pub mod movie;
pub mod recommendation;
pub mod review;
pub mod theme;

pub use movie::{Movie, SearchCandidate, DEFAULT_CATEGORY, NOT_AVAILABLE};
pub use recommendation::RecommendedMovie;
pub use review::{Recommend, Review};
pub use theme::Theme;
