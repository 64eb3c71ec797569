use serde::{Deserialize, Serialize};

/// A movie suggested for a user with its estimated rating
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub user_id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub est_rating: f64,
}
