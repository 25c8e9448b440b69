use serde::{Deserialize, Serialize};

/// Whether the reviewer recommends the movie.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Recommend {
    Yes,
    No,
}

impl Recommend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommend::Yes => "yes",
            Recommend::No => "no",
        }
    }
}

impl std::str::FromStr for Recommend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(Recommend::Yes),
            "no" | "n" | "false" => Ok(Recommend::No),
            other => Err(format!("Invalid recommendation: {}. Use 'yes' or 'no'", other)),
        }
    }
}

/// A submitted review. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    /// External (IMDb) id of the reviewed movie. Not checked against the catalog.
    pub movie_id: String,
    pub name: String,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub avatar: String,
    /// Display-formatted submission date
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommend: Option<Recommend>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_serializes_camel_case() {
        let review = Review {
            id: "1700000000000".to_string(),
            movie_id: "tt0111161".to_string(),
            name: "Ann".to_string(),
            rating: 5,
            comment: "Great".to_string(),
            avatar: String::new(),
            date: "1/2/2024".to_string(),
            recommend: Some(Recommend::Yes),
        };
        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["movieId"], "tt0111161");
        assert_eq!(json["recommend"], "yes");
    }

    #[test]
    fn test_recommend_parse() {
        assert_eq!("Yes".parse::<Recommend>(), Ok(Recommend::Yes));
        assert_eq!("n".parse::<Recommend>(), Ok(Recommend::No));
        assert!("maybe".parse::<Recommend>().is_err());
    }
}
