use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Root directory holding the extracted `ml-latest-small` and `tmdb_metadata` folders
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Keep loaded tables in memory and reload them when the files change
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    /// Number of recommendations returned when the caller does not ask for a count
    #[serde(default = "default_recommendation_count")]
    pub default_recommendation_count: usize,

    /// Fixed seed for the placeholder recommender
    #[serde(default)]
    pub recommender_seed: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cache_enabled() -> bool {
    true
}

fn default_recommendation_count() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            host: default_host(),
            port: default_port(),
            cache_enabled: default_cache_enabled(),
            default_recommendation_count: default_recommendation_count(),
            recommender_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert!(config.cache_enabled);
        assert_eq!(config.default_recommendation_count, 10);
        assert_eq!(config.recommender_seed, None);
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("DATA_DIR".to_string(), "/srv/movies".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("CACHE_ENABLED".to_string(), "false".to_string()),
            ("RECOMMENDER_SEED".to_string(), "42".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/movies"));
        assert_eq!(config.port, 8080);
        assert!(!config.cache_enabled);
        assert_eq!(config.recommender_seed, Some(42));
    }
}
