use crate::error::{MarqueeError, Result, StorageError, ValidationError};
use crate::storage::{keys, load_collection, save_collection, KeyValueStore};
use futures::future::try_join_all;
use marquee_lookup::MovieLookup;
use marquee_models::{Movie, SearchCandidate, DEFAULT_CATEGORY};
use std::sync::Arc;
use tracing::{debug, info};

/// Predicate for bulk deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieFilter {
    All,
    /// Exact match on the category label; entries without one count as Uncategorized
    Category(String),
}

impl MovieFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            MovieFilter::All => true,
            MovieFilter::Category(name) => movie.category_or_default() == name,
        }
    }
}

/// The locally persisted movie catalog, unique by IMDb id.
///
/// Every mutation rewrites the whole `movies` document before the in-memory
/// collection is replaced, so a failed write leaves both sides unchanged.
pub struct CatalogStore {
    storage: Arc<dyn KeyValueStore>,
    movies: Vec<Movie>,
}

impl CatalogStore {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> std::result::Result<Self, StorageError> {
        let movies = load_collection(storage.as_ref(), keys::MOVIES)?;
        Ok(Self { storage, movies })
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, imdb_id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.imdb_id == imdb_id)
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.get(imdb_id).is_some()
    }

    /// Title search through the lookup client. Never touches the catalog.
    pub async fn search_and_stage(
        &self,
        lookup: &dyn MovieLookup,
        title: &str,
    ) -> Result<Vec<SearchCandidate>> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let candidates = lookup.search(title).await?;
        debug!("Staged {} candidates for {:?}", candidates.len(), title);
        Ok(candidates)
    }

    /// Title search followed by a detail fetch for every match, run concurrently.
    /// One failed fetch fails the whole search. Never touches the catalog.
    pub async fn search_with_details(
        &self,
        lookup: &dyn MovieLookup,
        title: &str,
    ) -> Result<Vec<Movie>> {
        let candidates = self.search_and_stage(lookup, title).await?;
        let movies = try_join_all(candidates.iter().map(|c| lookup.details(&c.imdb_id))).await?;
        debug!("Fetched details for {} matches of {:?}", movies.len(), title);
        Ok(movies)
    }

    /// Resolve a staged candidate to its full record and append it.
    ///
    /// Duplicates are rejected before any network call. A blank or missing
    /// category becomes [`DEFAULT_CATEGORY`].
    pub async fn add(
        &mut self,
        lookup: &dyn MovieLookup,
        candidate: &SearchCandidate,
        category: Option<&str>,
    ) -> Result<&Movie> {
        self.ensure_absent(&candidate.imdb_id, &candidate.title)?;

        let mut movie = lookup.details(&candidate.imdb_id).await?;
        movie.category = Some(normalize_category(category));
        self.insert(movie)
    }

    /// Append an already resolved movie. Rejects a duplicate id.
    pub fn insert(&mut self, movie: Movie) -> Result<&Movie> {
        self.ensure_absent(&movie.imdb_id, &movie.title)?;

        let mut next = self.movies.clone();
        info!(
            "Adding \"{}\" ({}) to catalog as {}",
            movie.title,
            movie.imdb_id,
            movie.category_or_default()
        );
        next.push(movie);
        self.commit(next)?;

        Ok(&self.movies[self.movies.len() - 1])
    }

    /// Replace the category of one entry. Returns false (and writes nothing) when the id is absent.
    pub fn update_category(&mut self, imdb_id: &str, category: &str) -> Result<bool> {
        let Some(index) = self.movies.iter().position(|m| m.imdb_id == imdb_id) else {
            debug!("update_category: {} not in catalog", imdb_id);
            return Ok(false);
        };

        let mut next = self.movies.clone();
        next[index].category = Some(normalize_category(Some(category)));
        info!(
            "Moved \"{}\" to category {}",
            next[index].title,
            next[index].category_or_default()
        );
        self.commit(next)?;
        Ok(true)
    }

    /// Remove one entry. Returns the removed movie, or None (and writes nothing) when absent.
    pub fn delete(&mut self, imdb_id: &str) -> Result<Option<Movie>> {
        let Some(index) = self.movies.iter().position(|m| m.imdb_id == imdb_id) else {
            debug!("delete: {} not in catalog", imdb_id);
            return Ok(None);
        };

        let mut next = self.movies.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        info!("Deleted \"{}\" ({}) from catalog", removed.title, removed.imdb_id);
        Ok(Some(removed))
    }

    /// Remove every entry matching `filter`; returns how many were removed
    pub fn bulk_delete(&mut self, filter: &MovieFilter) -> Result<usize> {
        if let MovieFilter::Category(name) = filter {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyCategory.into());
            }
        }

        let next: Vec<Movie> = self
            .movies
            .iter()
            .filter(|m| !filter.matches(m))
            .cloned()
            .collect();
        let removed = self.movies.len() - next.len();
        self.commit(next)?;
        info!("Bulk delete {:?} removed {} movies", filter, removed);
        Ok(removed)
    }

    /// Case-insensitive title match, optionally restricted to one category
    pub fn filter(&self, query: &str, category: Option<&str>) -> Vec<&Movie> {
        let query = query.trim().to_lowercase();
        self.movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&query))
            .filter(|m| category.map_or(true, |c| m.category_or_default() == c))
            .collect()
    }

    /// The fixed list first, then any other labels found on catalog entries
    pub fn categories(&self, fixed: &[String]) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        let found = self.movies.iter().map(Movie::category_or_default);
        for category in fixed.iter().map(String::as_str).chain(found) {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
        categories
    }

    fn ensure_absent(&self, imdb_id: &str, title: &str) -> Result<()> {
        if self.contains(imdb_id) {
            return Err(MarqueeError::Duplicate {
                id: imdb_id.to_string(),
                title: title.to_string(),
            });
        }
        Ok(())
    }

    fn commit(&mut self, next: Vec<Movie>) -> std::result::Result<(), StorageError> {
        save_collection(self.storage.as_ref(), keys::MOVIES, &next)?;
        self.movies = next;
        Ok(())
    }
}

fn normalize_category(category: Option<&str>) -> String {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}
