use marquee_models::{Movie, Review};
use serde::Serialize;

/// How many recent movies and reviews the dashboard shows
pub const RECENT_LIMIT: usize = 5;

/// Admin dashboard summary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardStats {
    pub total_movies: usize,
    pub total_reviews: usize,
    pub categories: usize,
    /// Mean review rating with one decimal, "0.0" without reviews
    pub average_rating: String,
    /// Newest first
    pub recent_movies: Vec<Movie>,
    /// Newest first
    pub recent_reviews: Vec<Review>,
}

impl DashboardStats {
    pub fn compute(movies: &[Movie], reviews: &[Review], categories: usize) -> Self {
        let average_rating = if reviews.is_empty() {
            "0.0".to_string()
        } else {
            let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            let mean = f64::from(total) / reviews.len() as f64;
            // Halves round up: 4.25 shows as 4.3
            format!("{:.1}", (mean * 10.0).round() / 10.0)
        };

        Self {
            total_movies: movies.len(),
            total_reviews: reviews.len(),
            categories,
            average_rating,
            recent_movies: movies.iter().rev().take(RECENT_LIMIT).cloned().collect(),
            recent_reviews: reviews.iter().rev().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    fn review(id: &str, rating: u8) -> Review {
        Review {
            id: id.to_string(),
            movie_id: "tt1".to_string(),
            name: "Ann".to_string(),
            rating,
            comment: "ok".to_string(),
            avatar: String::new(),
            date: "1/1/2024".to_string(),
            recommend: None,
        }
    }

    #[test]
    fn test_empty_dashboard() {
        let stats = DashboardStats::compute(&[], &[], 8);
        assert_eq!(stats.average_rating, "0.0");
        assert_eq!(stats.categories, 8);
        assert!(stats.recent_movies.is_empty());
    }

    #[test]
    fn test_average_and_recent_order() {
        let movies: Vec<Movie> = (1..=7).map(|i| movie(&format!("tt{}", i), "M")).collect();
        let reviews = vec![review("1", 5), review("2", 4), review("3", 4)];

        let stats = DashboardStats::compute(&movies, &reviews, 3);
        assert_eq!(stats.average_rating, "4.3");
        assert_eq!(stats.total_movies, 7);
        assert_eq!(stats.recent_movies.len(), RECENT_LIMIT);
        assert_eq!(stats.recent_movies[0].imdb_id, "tt7");
        assert_eq!(stats.recent_reviews[0].id, "3");
    }

    #[test]
    fn test_average_rounds_halves_up() {
        let ratings = |values: &[u8]| -> Vec<Review> {
            values
                .iter()
                .enumerate()
                .map(|(i, r)| review(&i.to_string(), *r))
                .collect()
        };
        assert_eq!(DashboardStats::compute(&[], &ratings(&[4, 5, 4, 4]), 0).average_rating, "4.3");
        assert_eq!(DashboardStats::compute(&[], &ratings(&[1, 2, 1, 1]), 0).average_rating, "1.3");
        assert_eq!(DashboardStats::compute(&[], &ratings(&[3, 4]), 0).average_rating, "3.5");
    }
}
