use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::recommenders::{RandomRecommender, Recommender},
    store::{CachedRecordStore, CsvRecordStore, RecordStore},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub recommender: Arc<dyn Recommender>,
    pub default_recommendation_count: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, recommender: Arc<dyn Recommender>) -> Self {
        Self {
            store,
            recommender,
            default_recommendation_count: Config::default().default_recommendation_count,
        }
    }

    /// Builds the CSV-backed state described by the configuration
    pub fn from_config(config: &Config) -> Self {
        let csv_store = CsvRecordStore::new(&config.data_dir);
        let store: Arc<dyn RecordStore> = if config.cache_enabled {
            Arc::new(CachedRecordStore::new(csv_store))
        } else {
            Arc::new(csv_store)
        };

        let recommender: Arc<dyn Recommender> = match config.recommender_seed {
            Some(seed) => Arc::new(RandomRecommender::with_seed(seed)),
            None => Arc::new(RandomRecommender::new()),
        };

        tracing::info!(
            data_dir = %config.data_dir.display(),
            store = store.name(),
            recommender = recommender.name(),
            "Application state initialized"
        );

        Self::new(store, recommender)
            .with_default_recommendation_count(config.default_recommendation_count)
    }

    pub fn with_default_recommendation_count(mut self, count: usize) -> Self {
        self.default_recommendation_count = count;
        self
    }

    /// Runs a store query on the blocking pool
    ///
    /// Loads parse whole files, so they stay off the async workers.
    pub async fn run_blocking<T, F>(&self, query: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn RecordStore, &dyn Recommender) -> AppResult<T> + Send + 'static,
    {
        let store = self.store.clone();
        let recommender = self.recommender.clone();

        tokio::task::spawn_blocking(move || query(store.as_ref(), recommender.as_ref()))
            .await
            .map_err(|e| AppError::Internal(format!("Query task failed: {}", e)))?
    }
}
