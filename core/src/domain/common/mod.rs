use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

pub mod entities;
pub mod lenient;
pub mod ports;
pub mod services;
#[cfg(test)]
pub(crate) mod testing;

pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";
pub const LOCAL_STORE_FILE: &str = "local_storage.json";

#[derive(Clone, Debug)]
pub struct HealthyDayConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub cache: CacheConfig,
    pub search: SearchConfig,
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(LOCAL_STORE_FILE)
    }
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub recipe_ttl: Duration,
    pub nutrition_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            recipe_ttl: Duration::from_secs(60 * 60),
            nutrition_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Input inactivity before the suggestion lookup fires.
    pub debounce: Duration,
    /// Inactivity before the AI nutrition fallback fires, measured from the same input.
    pub fallback_delay: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            fallback_delay: Duration::from_millis(1500),
        }
    }
}

/// Milliseconds since the epoch, the unit every cache timestamp is stored in.
pub fn timestamp_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

/// Trimmed, lower-cased form used for name comparison and cache keys.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
