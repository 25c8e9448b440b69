use crate::error::{Result, StorageError, ValidationError};
use crate::stamp::{display_date, time_derived_id};
use crate::storage::{keys, load_collection, save_collection, KeyValueStore};
use chrono::{DateTime, Local};
use marquee_models::{Recommend, Review};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Raw review form input, checked by [`ReviewDraft::validate`] before it can reach the store.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub movie_id: String,
    pub name: String,
    /// Kept wide so out-of-range input can be represented and rejected
    pub rating: i64,
    pub comment: String,
    pub recommend: Option<Recommend>,
}

impl ReviewDraft {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.movie_id.trim().is_empty() {
            return Err(ValidationError::MissingMovie);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange(self.rating));
        }
        if self.comment.trim().is_empty() {
            return Err(ValidationError::EmptyComment);
        }
        Ok(())
    }
}

/// Shape of entries in the legacy `reviewedMovies` document: a movie record
/// with the review fields merged in.
#[derive(Debug, Deserialize)]
struct LegacyReviewedMovie {
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(default)]
    review: String,
    #[serde(default)]
    reviewer: String,
    /// Stored as a string by the old form, occasionally as a number
    #[serde(default)]
    rating: Value,
    #[serde(default)]
    recommend: Option<String>,
}

impl LegacyReviewedMovie {
    fn into_draft(self) -> ReviewDraft {
        let rating = match &self.rating {
            Value::Number(n) => n.as_i64().unwrap_or(0),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        };
        ReviewDraft {
            movie_id: self.imdb_id,
            name: self.reviewer,
            rating,
            comment: self.review,
            recommend: self.recommend.and_then(|r| r.parse().ok()),
        }
    }
}

/// Submitted reviews. Append or delete only; a review is never edited.
pub struct ReviewStore {
    storage: Arc<dyn KeyValueStore>,
    reviews: Vec<Review>,
}

impl ReviewStore {
    /// Load `reviews`, folding in any legacy `reviewedMovies` entries
    pub fn load(storage: Arc<dyn KeyValueStore>) -> std::result::Result<Self, StorageError> {
        Self::load_at(storage, Local::now())
    }

    pub fn load_at(
        storage: Arc<dyn KeyValueStore>,
        now: DateTime<Local>,
    ) -> std::result::Result<Self, StorageError> {
        let reviews = load_collection(storage.as_ref(), keys::REVIEWS)?;
        let mut store = Self { storage, reviews };
        store.migrate_legacy(&now)?;
        Ok(store)
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn for_movie(&self, movie_id: &str) -> Vec<&Review> {
        self.reviews.iter().filter(|r| r.movie_id == movie_id).collect()
    }

    /// Validate a form draft and store the resulting review
    pub fn submit(&mut self, draft: ReviewDraft) -> Result<&Review> {
        self.submit_at(draft, Local::now())
    }

    pub fn submit_at(&mut self, draft: ReviewDraft, now: DateTime<Local>) -> Result<&Review> {
        draft.validate()?;
        let review = build_review(draft, &now, &self.reviews);
        self.add(review)
    }

    /// Append a fully formed review
    pub fn add(&mut self, review: Review) -> Result<&Review> {
        let mut next = self.reviews.clone();
        info!(
            "Adding review {} by {} for {} ({}/5)",
            review.id, review.name, review.movie_id, review.rating
        );
        next.push(review);
        self.commit(next)?;
        Ok(&self.reviews[self.reviews.len() - 1])
    }

    /// Remove one review. Returns None (and writes nothing) when the id is absent.
    pub fn delete(&mut self, id: &str) -> Result<Option<Review>> {
        let Some(index) = self.reviews.iter().position(|r| r.id == id) else {
            debug!("delete: review {} not found", id);
            return Ok(None);
        };

        let mut next = self.reviews.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        info!("Deleted review {}", removed.id);
        Ok(Some(removed))
    }

    /// Drop every review and persist the empty collection; returns how many were removed
    pub fn clear_all(&mut self) -> Result<usize> {
        let removed = self.reviews.len();
        self.commit(Vec::new())?;
        info!("Cleared {} reviews", removed);
        Ok(removed)
    }

    fn migrate_legacy(&mut self, now: &DateTime<Local>) -> std::result::Result<usize, StorageError> {
        if self.storage.get(keys::LEGACY_REVIEWED_MOVIES)?.is_none() {
            return Ok(0);
        }

        let legacy: Vec<LegacyReviewedMovie> =
            load_collection(self.storage.as_ref(), keys::LEGACY_REVIEWED_MOVIES)?;
        let total = legacy.len();

        let mut next = self.reviews.clone();
        for entry in legacy {
            let draft = entry.into_draft();
            if let Err(e) = draft.validate() {
                warn!("Skipping legacy review for {:?}: {}", draft.movie_id, e);
                continue;
            }
            let review = build_review(draft, now, &next);
            next.push(review);
        }
        let migrated = next.len() - self.reviews.len();

        if migrated > 0 {
            self.commit(next)?;
        }
        self.storage.remove(keys::LEGACY_REVIEWED_MOVIES)?;
        info!(
            "Migrated {} of {} legacy reviewed movies into reviews",
            migrated, total
        );
        Ok(migrated)
    }

    fn commit(&mut self, next: Vec<Review>) -> std::result::Result<(), StorageError> {
        save_collection(self.storage.as_ref(), keys::REVIEWS, &next)?;
        self.reviews = next;
        Ok(())
    }
}

fn build_review(draft: ReviewDraft, now: &DateTime<Local>, existing: &[Review]) -> Review {
    let id = time_derived_id(now, |id| existing.iter().any(|r| r.id == id));
    Review {
        id,
        movie_id: draft.movie_id.trim().to_string(),
        name: draft.name.trim().to_string(),
        // validate() bounds the rating to 1..=5
        rating: draft.rating as u8,
        comment: draft.comment.trim().to_string(),
        avatar: String::new(),
        date: display_date(now),
        recommend: draft.recommend,
    }
}
