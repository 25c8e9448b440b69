use crate::admin::AdminGate;
use crate::catalog::CatalogStore;
use crate::error::StorageError;
use crate::recommendations::RecommendationStore;
use crate::reviews::ReviewStore;
use crate::stats::DashboardStats;
use crate::storage::KeyValueStore;
use crate::theme::ThemePreference;
use marquee_config::AdminConfig;
use std::sync::Arc;

/// Every store, loaded once from the same storage handle.
pub struct Session {
    pub catalog: CatalogStore,
    pub reviews: ReviewStore,
    pub recommendations: RecommendationStore,
    pub admin: AdminGate,
    pub theme: ThemePreference,
    fixed_categories: Vec<String>,
}

impl Session {
    pub fn open(storage: Arc<dyn KeyValueStore>, admin: &AdminConfig) -> Result<Self, StorageError> {
        Ok(Self {
            catalog: CatalogStore::load(storage.clone())?,
            reviews: ReviewStore::load(storage.clone())?,
            recommendations: RecommendationStore::load(storage.clone())?,
            admin: AdminGate::new(storage.clone(), admin.password.clone()),
            theme: ThemePreference::new(storage),
            fixed_categories: admin.categories.clone(),
        })
    }

    /// Configured categories plus any others present in the catalog
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories(&self.fixed_categories)
    }

    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::compute(
            self.catalog.movies(),
            self.reviews.reviews(),
            self.categories().len(),
        )
    }
}
