pub mod admin;
pub mod config;
pub mod prompts;
pub mod recommend;
pub mod review;
pub mod search;
pub mod tables;
pub mod theme;
pub mod ui;

use crate::output::Output;
use color_eyre::eyre::{eyre, Result};
use marquee_config::{Config, PathManager};
use marquee_core::{FileStore, Session, ThemePreference};
use marquee_lookup::OmdbClient;
use std::sync::Arc;
use tracing::debug;

/// Resolved paths and configuration shared by every command
pub struct Context {
    pub paths: PathManager,
    pub config: Config,
}

impl Context {
    pub fn load() -> Result<Self> {
        Self::load_from(PathManager::default())
    }

    /// Read the config without validating it, so `config show` and
    /// `config init` still work on a broken file
    pub fn load_from(paths: PathManager) -> Result<Self> {
        let config_file = paths.config_file();
        let mut config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load {}: {}", config_file.display(), e))?;
        if config.logging.file.is_none() && paths.log_dir().exists() {
            config.logging.file = Some(paths.default_log_file());
        }
        Ok(Self { paths, config })
    }

    fn validated_config(&self) -> Result<&Config> {
        self.config.validate().map_err(|e| {
            eyre!(
                "Invalid configuration in {}: {}. Run 'marquee config init' to fix it.",
                self.paths.config_file().display(),
                e
            )
        })?;
        Ok(&self.config)
    }

    fn storage(&self) -> Result<Arc<FileStore>> {
        let storage_dir = self.paths.storage_dir();
        debug!("Opening storage at {}", storage_dir.display());
        Ok(Arc::new(FileStore::new(&storage_dir)?))
    }

    pub fn open_session(&self) -> Result<Session> {
        let config = self.validated_config()?;
        Ok(Session::open(self.storage()?, &config.admin)?)
    }

    /// Theme preference only; needs no valid config
    pub fn theme_preference(&self) -> Result<ThemePreference> {
        Ok(ThemePreference::new(self.storage()?))
    }

    pub fn lookup(&self) -> Result<OmdbClient> {
        let config = self.validated_config()?;
        OmdbClient::from_config(&config.omdb).map_err(|e| eyre!("{}", e))
    }
}

/// Turn a store result into a command outcome.
///
/// Notices (bad input, lookup failures, duplicates, auth) are printed and
/// end the command normally with `None`. Storage failures abort the command.
pub fn notice<T>(output: &Output, result: marquee_core::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_notice() => {
            output.error(e.to_string());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Gate for every admin-only command
pub fn require_admin(session: &Session, output: &Output) -> Result<bool> {
    Ok(notice(output, session.admin.require())?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_models::Theme;
    use tempfile::TempDir;

    fn context_with_config(contents: &str) -> (TempDir, Context) {
        let dir = TempDir::new().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        std::fs::write(paths.config_file(), contents).unwrap();
        let ctx = Context::load_from(paths).unwrap();
        (dir, ctx)
    }

    #[test]
    fn test_invalid_config_still_loads_but_blocks_stores() {
        let (_dir, ctx) = context_with_config("[admin]\npassword = \"\"\n");
        assert!(ctx.config.admin.password.is_empty());

        let err = ctx.open_session().err().unwrap();
        assert!(err.to_string().contains("admin.password"));
        assert!(ctx.lookup().is_err());
    }

    #[test]
    fn test_theme_preference_ignores_config_validity() {
        let (_dir, ctx) = context_with_config("[admin]\npassword = \"\"\n");
        let preference = ctx.theme_preference().unwrap();
        assert_eq!(preference.get().unwrap(), Theme::Dark);

        preference.set(Theme::Light).unwrap();
        assert_eq!(ctx.theme_preference().unwrap().get().unwrap(), Theme::Light);
    }

    #[test]
    fn test_valid_config_opens_session() {
        let (_dir, ctx) = context_with_config("[admin]\npassword = \"secret\"\n");
        assert!(ctx.open_session().is_ok());
    }
}
