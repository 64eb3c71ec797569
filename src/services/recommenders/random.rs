use parking_lot::Mutex;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use super::{Recommender, MAX_EST_RATING, MIN_EST_RATING};
use crate::{
    error::AppResult,
    models::{Movie, RecommendationItem},
};

/// Placeholder strategy: a uniform sample of the catalog with random scores.
///
/// The user's rating history is ignored and the scores carry no meaning.
pub struct RandomRecommender {
    rng: Mutex<StdRng>,
}

impl Default for RandomRecommender {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomRecommender {
    /// Creates a recommender seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a recommender with reproducible output
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

/// Rounds to two decimal places
fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

impl Recommender for RandomRecommender {
    fn recommend(
        &self,
        user_id: i64,
        catalog: &[Movie],
        n: usize,
    ) -> AppResult<Vec<RecommendationItem>> {
        let mut rng = self.rng.lock();

        let items = catalog
            .choose_multiple(&mut *rng, n)
            .map(|movie| RecommendationItem {
                user_id,
                movie_id: movie.movie_id,
                movie_title: movie.title.clone(),
                est_rating: round_score(rng.gen_range(MIN_EST_RATING..=MAX_EST_RATING)),
            })
            .collect();

        Ok(items)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
