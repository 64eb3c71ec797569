use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the ratings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub rating: f64,
    /// Unix epoch seconds
    pub timestamp: i64,
}

impl Rating {
    /// When the rating was made, if the timestamp is representable
    pub fn rated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// A user's rating enriched with the rated movie's title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRating {
    pub user_id: i64,
    pub movie_id: i64,
    pub movie_title: String,
    pub rating: f64,
    pub timestamp: i64,
    pub rated_at: Option<DateTime<Utc>>,
}

impl UserRating {
    pub fn new(rating: &Rating, movie_title: String) -> Self {
        Self {
            user_id: rating.user_id,
            movie_id: rating.movie_id,
            movie_title,
            rating: rating.rating,
            timestamp: rating.timestamp,
            rated_at: rating.rated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rated_at() {
        let rating = Rating {
            user_id: 1,
            movie_id: 1,
            rating: 4.0,
            timestamp: 964_982_703,
        };
        let rated_at = rating.rated_at().unwrap();
        assert_eq!(rated_at.to_rfc3339(), "2000-07-30T18:45:03+00:00");
    }

    #[test]
    fn test_user_rating_copies_fields() {
        let rating = Rating {
            user_id: 7,
            movie_id: 3,
            rating: 3.5,
            timestamp: 0,
        };
        let enriched = UserRating::new(&rating, "Grumpier Old Men".to_string());
        assert_eq!(enriched.user_id, 7);
        assert_eq!(enriched.movie_id, 3);
        assert_eq!(enriched.movie_title, "Grumpier Old Men");
        assert_eq!(enriched.rating, 3.5);
        assert_eq!(enriched.rated_at, rating.rated_at());
    }
}
