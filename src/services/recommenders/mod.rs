//! Scoring strategies behind the recommendation endpoint.
//!
//! Every strategy receives the full catalog and must return exactly `n`
//! items with distinct movie ids. The caller has already checked that the
//! catalog holds at least `n` movies. A trained model can replace the random
//! placeholder without callers noticing.

use crate::{
    error::AppResult,
    models::{Movie, RecommendationItem},
};

pub mod random;

pub use random::RandomRecommender;

/// Lowest estimated rating any strategy may report
pub const MIN_EST_RATING: f64 = 3.5;
/// Highest estimated rating any strategy may report
pub const MAX_EST_RATING: f64 = 5.0;

/// Trait for recommendation strategies
#[cfg_attr(test, mockall::automock)]
pub trait Recommender: Send + Sync {
    /// Picks `n` distinct movies from the catalog for the user, with estimated ratings
    fn recommend(
        &self,
        user_id: i64,
        catalog: &[Movie],
        n: usize,
    ) -> AppResult<Vec<RecommendationItem>>;

    /// Strategy name for logging and debugging
    fn name(&self) -> &'static str;
}
