pub mod config;
pub mod paths;

pub use config::{default_categories, AdminConfig, Config, LoggingConfig, OmdbConfig, DEFAULT_ADMIN_PASSWORD, DEFAULT_OMDB_BASE_URL, OMDB_API_KEY_ENV};
pub use paths::{container_base_path, PathManager};
