use crate::error::StorageError;
use crate::storage::{keys, KeyValueStore};
use marquee_models::Theme;
use std::sync::Arc;
use tracing::debug;

/// Persisted dark/light preference. Dark when unset or unreadable.
pub struct ThemePreference {
    storage: Arc<dyn KeyValueStore>,
}

impl ThemePreference {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> Result<Theme, StorageError> {
        let stored = self.storage.get(keys::THEME)?;
        Ok(stored
            .and_then(|value| value.parse().ok())
            .unwrap_or_default())
    }

    pub fn set(&self, theme: Theme) -> Result<Theme, StorageError> {
        self.storage.set(keys::THEME, theme.as_str())?;
        debug!("Theme set to {}", theme.as_str());
        Ok(theme)
    }

    pub fn toggle(&self) -> Result<Theme, StorageError> {
        let next = self.get()?.toggled();
        self.set(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_to_dark_and_toggles() {
        let storage = Arc::new(MemoryStore::new());
        let theme = ThemePreference::new(storage.clone());
        assert_eq!(theme.get().unwrap(), Theme::Dark);

        assert_eq!(theme.toggle().unwrap(), Theme::Light);
        assert_eq!(storage.get(keys::THEME).unwrap().as_deref(), Some("light"));
        assert_eq!(theme.toggle().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_garbage_value_reads_as_dark() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(keys::THEME, "sepia").unwrap();
        assert_eq!(ThemePreference::new(storage).get().unwrap(), Theme::Dark);
    }
}
