use serde::{Deserialize, Serialize};

/// Sentinel OMDb uses for any field it has no value for (including posters).
pub const NOT_AVAILABLE: &str = "N/A";

/// Category assigned to catalog entries added without one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A fully resolved movie record.
///
/// Field names follow the OMDb payload so persisted documents stay readable
/// by anything that already consumes the `movies` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Plot")]
    pub plot: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "Director")]
    pub director: String,
    #[serde(rename = "Actors")]
    pub actors: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Movie {
    /// Category label, falling back to [`DEFAULT_CATEGORY`]
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn has_poster(&self) -> bool {
        !self.poster.is_empty() && self.poster != NOT_AVAILABLE
    }

    /// First entry of the comma-joined genre list, if any
    pub fn primary_genre(&self) -> Option<&str> {
        first_of_list(&self.genre)
    }

    /// First entry of the comma-joined director list, if any
    pub fn primary_director(&self) -> Option<&str> {
        first_of_list(&self.director)
    }
}

fn first_of_list(list: &str) -> Option<&str> {
    if list == NOT_AVAILABLE {
        return None;
    }
    list.split(',').map(str::trim).find(|s| !s.is_empty())
}

/// A search hit that has not been promoted to a full [`Movie`] yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCandidate {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster")]
    pub poster: String,
    #[serde(rename = "Type")]
    pub media_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Movie {
        Movie {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster: NOT_AVAILABLE.to_string(),
            plot: "A thief who steals corporate secrets.".to_string(),
            genre: "Action, Adventure, Sci-Fi".to_string(),
            imdb_rating: "8.8".to_string(),
            director: "Christopher Nolan".to_string(),
            actors: "Leonardo DiCaprio, Joseph Gordon-Levitt".to_string(),
            category: None,
        }
    }

    #[test]
    fn test_movie_uses_omdb_field_names() {
        let json = serde_json::to_value(movie()).unwrap();
        assert_eq!(json["imdbID"], "tt1375666");
        assert_eq!(json["Title"], "Inception");
        assert_eq!(json["imdbRating"], "8.8");
        assert!(json.get("category").is_none());
    }

    #[test]
    fn test_movie_without_category_deserializes() {
        let json = r#"{"imdbID":"tt1","Title":"T","Year":"1999","Poster":"N/A","Plot":"p","Genre":"Drama","imdbRating":"7.0","Director":"D","Actors":"A"}"#;
        let parsed: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.category_or_default(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_display_helpers() {
        let mut m = movie();
        assert!(!m.has_poster());
        assert_eq!(m.primary_genre(), Some("Action"));
        assert_eq!(m.primary_director(), Some("Christopher Nolan"));

        m.genre = NOT_AVAILABLE.to_string();
        assert_eq!(m.primary_genre(), None);
    }
}
