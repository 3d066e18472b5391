// src/geo/normalize.rs

use std::collections::BTreeSet;

use crate::config::LocationConfig;

/// Turns free-text location input into a canonical token string.
///
/// Examples (default stop words):
///   "Sangotedo, Ajah"  -> "ajah sangotedo"
///   "SANGOTEDO LAGOS"  -> "sangotedo"
///   "  Sangotedo  "    -> "sangotedo"
#[derive(Debug, Clone)]
pub struct Normalizer {
    stop_words: BTreeSet<String>,
}

impl Normalizer {
    pub fn new(cfg: &LocationConfig) -> Self {
        Self {
            stop_words: cfg.stop_words.clone(),
        }
    }

    /// Lowercase, punctuation to spaces, drop stop words, then sort + dedup.
    /// Returns an empty string when nothing survives.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.trim().to_lowercase();

        let cleaned: String = lowered
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        let tokens: BTreeSet<&str> = cleaned
            .split_whitespace()
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        tokens.into_iter().collect::<Vec<_>>().join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&LocationConfig::default())
    }
}
