pub mod admin;
pub mod catalog;
pub mod error;
pub mod recommendations;
pub mod reviews;
pub mod session;
pub mod stamp;
pub mod stats;
pub mod storage;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin::{AdminGate, AdminState};
pub use catalog::{CatalogStore, MovieFilter};
pub use error::{AuthError, MarqueeError, Result, StorageError, ValidationError};
pub use recommendations::RecommendationStore;
pub use reviews::{ReviewDraft, ReviewStore, MAX_RATING, MIN_RATING};
pub use session::Session;
pub use stats::DashboardStats;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use theme::ThemePreference;
