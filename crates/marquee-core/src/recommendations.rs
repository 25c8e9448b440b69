use crate::error::{Result, StorageError, ValidationError};
use crate::stamp::{display_date, time_derived_id};
use crate::storage::{keys, load_collection, save_collection, KeyValueStore};
use chrono::{DateTime, Local};
use marquee_models::RecommendedMovie;
use std::sync::Arc;
use tracing::{debug, info};

pub struct RecommendationStore {
    storage: Arc<dyn KeyValueStore>,
    recommendations: Vec<RecommendedMovie>,
}

impl RecommendationStore {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> std::result::Result<Self, StorageError> {
        let recommendations = load_collection(storage.as_ref(), keys::RECOMMENDED_MOVIES)?;
        Ok(Self {
            storage,
            recommendations,
        })
    }

    pub fn recommendations(&self) -> &[RecommendedMovie] {
        &self.recommendations
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// Record a recommendation for a movie title with a reason
    pub fn recommend(&mut self, title: &str, reason: &str) -> Result<&RecommendedMovie> {
        self.recommend_at(title, reason, Local::now())
    }

    pub fn recommend_at(
        &mut self,
        title: &str,
        reason: &str,
        now: DateTime<Local>,
    ) -> Result<&RecommendedMovie> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if reason.trim().is_empty() {
            return Err(ValidationError::EmptyReason.into());
        }

        let id = time_derived_id(&now, |id| self.recommendations.iter().any(|r| r.id == id));
        self.add(RecommendedMovie {
            id,
            title: title.trim().to_string(),
            reason: reason.trim().to_string(),
            date: display_date(&now),
        })
    }

    pub fn add(&mut self, recommendation: RecommendedMovie) -> Result<&RecommendedMovie> {
        let mut next = self.recommendations.clone();
        info!("Adding recommendation {} for \"{}\"", recommendation.id, recommendation.title);
        next.push(recommendation);
        self.commit(next)?;
        Ok(&self.recommendations[self.recommendations.len() - 1])
    }

    pub fn delete(&mut self, id: &str) -> Result<Option<RecommendedMovie>> {
        let Some(index) = self.recommendations.iter().position(|r| r.id == id) else {
            debug!("delete: recommendation {} not found", id);
            return Ok(None);
        };

        let mut next = self.recommendations.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        info!("Deleted recommendation {}", removed.id);
        Ok(Some(removed))
    }

    fn commit(&mut self, next: Vec<RecommendedMovie>) -> std::result::Result<(), StorageError> {
        save_collection(self.storage.as_ref(), keys::RECOMMENDED_MOVIES, &next)?;
        self.recommendations = next;
        Ok(())
    }
}
