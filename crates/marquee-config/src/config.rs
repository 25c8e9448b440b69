use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

/// Demo password of the admin area. The gate is a visibility toggle, not access control.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Environment variable that overrides `omdb.api_key`
pub const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminConfig {
    #[serde(default = "default_admin_password")]
    pub password: String,
    /// Fixed category list offered in the admin area
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

pub fn default_categories() -> Vec<String> {
    [
        "Action",
        "Drama",
        "Comedy",
        "Horror",
        "Sci-Fi",
        "Thriller",
        "Romance",
        "Documentary",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: default_admin_password(),
            categories: default_categories(),
        }
    }
}

impl OmdbConfig {
    /// The configured API key, or an error when none is set
    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(anyhow::anyhow!(
                "OMDb API key is not configured. Set omdb.api_key in config.toml or the {} environment variable",
                OMDB_API_KEY_ENV
            ));
        }
        Ok(key)
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if present, otherwise start from defaults. Environment overrides apply either way.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(OMDB_API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.omdb.api_key = key;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.omdb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("omdb.base_url cannot be empty"));
        }
        if self.admin.password.is_empty() {
            return Err(anyhow::anyhow!("admin.password cannot be empty"));
        }
        if let Some(blank) = self.admin.categories.iter().position(|c| c.trim().is_empty()) {
            return Err(anyhow::anyhow!("admin.categories[{}] is blank", blank));
        }
        Ok(())
    }
}
