use std::env;
use std::time::Duration;

use crate::athlete_fetch::DEFAULT_API_URL;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub page_limit: Option<u32>,
    pub cache_ttl: Duration,
    pub search_debounce: Duration,
    pub fetch_threads: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            page_limit: None,
            cache_ttl: Duration::from_secs(60),
            search_debounce: Duration::from_millis(500),
            fetch_threads: 4,
        }
    }
}

impl AppConfig {
    /// Reads the environment; call after `dotenvy` has loaded any `.env` files.
    pub fn from_env() -> Self {
        let api_base_url = env::var("FUTSCOUT_API_URL")
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let page_limit = env::var("FUTSCOUT_PAGE_LIMIT")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .filter(|val| *val > 0)
            .map(|val| val.min(100));
        let cache_secs = env::var("FUTSCOUT_CACHE_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(60)
            .min(3600);
        let debounce_ms = env::var("SEARCH_DEBOUNCE_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(500)
            .clamp(50, 5000);
        let fetch_threads = env::var("FETCH_THREADS")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(4)
            .clamp(1, 16);

        Self {
            api_base_url,
            page_limit,
            cache_ttl: Duration::from_secs(cache_secs),
            search_debounce: Duration::from_millis(debounce_ms),
            fetch_threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::AppConfig;
    use crate::athlete_fetch::DEFAULT_API_URL;

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.page_limit, None);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.search_debounce, Duration::from_millis(500));
        assert_eq!(config.fetch_threads, 4);
    }
}
