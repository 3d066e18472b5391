// src/config.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::ServerError;

pub const DEFAULT_GRID_SIZE: f64 = 0.005; // ~500 meters
pub const DEFAULT_STOP_WORDS: [&str; 6] = ["lagos", "nigeria", "state", "lga", "area", "estate"];

/// Knobs consumed by the normalizer and the grid keyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Grid cell size in degrees.
    pub grid_size: f64,
    /// Tokens dropped during normalization. Stored lowercased.
    pub stop_words: BTreeSet<String>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl LocationConfig {
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        self
    }

    pub fn validate(&self) -> Result<(), ServerError> {
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(ServerError::Validation(format!(
                "grid size must be a positive number of degrees, got {}",
                self.grid_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file.
    pub db_path: String,
    /// Server bind address.
    pub bind_addr: String,
    /// Worker threads for the blocking server.
    pub max_workers: usize,
    /// Load demo listings into an empty store at startup.
    pub seed_demo: bool,
    pub location: LocationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "geo_buckets.sqlite3".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
            max_workers: 8,
            seed_demo: false,
            location: LocationConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("GEO_DB_PATH") {
            config.db_path = path;
        }
        if let Some(addr) = lookup("GEO_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(val) = lookup("GEO_MAX_WORKERS") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.max_workers = n,
                _ => tracing::warn!(value = %val, "ignoring invalid GEO_MAX_WORKERS"),
            }
        }
        if let Some(val) = lookup("GEO_SEED_DEMO") {
            config.seed_demo = matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(val) = lookup("GEO_BUCKET_GRID_SIZE") {
            match val.parse::<f64>() {
                Ok(g) if g.is_finite() && g > 0.0 => config.location.grid_size = g,
                _ => tracing::warn!(value = %val, "ignoring invalid GEO_BUCKET_GRID_SIZE"),
            }
        }
        if let Some(val) = lookup("GEO_STOP_WORDS") {
            config.location = config.location.with_stop_words(val.split(','));
        }

        config
    }

    pub fn validate(&self) -> Result<(), ServerError> {
        self.location.validate()
    }
}
