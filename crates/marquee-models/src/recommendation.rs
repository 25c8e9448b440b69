use serde::{Deserialize, Serialize};

/// A movie someone recommended, with a short reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendedMovie {
    pub id: String,
    pub title: String,
    pub reason: String,
    pub date: String,
}
