//! Tracker configuration.
//!
//! Defaults match the public PokeAPI deployment. The bridge may post a JSON
//! object of overrides to `/api/config` at startup; unknown keys are ignored
//! and missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

use crate::error::{Result, TrackerError};
use crate::logging;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// REST root, without trailing slash.
    pub api_base: String,
    /// Sprite repository root, without trailing slash.
    pub sprite_base: String,
    /// Number of species requested from the index endpoint.
    pub species_limit: u32,
    /// Infinite-scroll page size.
    pub page_size: usize,
    pub suggestion_limit: usize,
    /// Minimum search length before suggestions are offered.
    pub suggestion_min_chars: usize,
    /// Toast auto-dismiss delay.
    pub toast_ms: u32,
    pub collection_key: String,
    pub theme_key: String,
    /// Console log level: `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base: "https://pokeapi.co/api/v2".to_string(),
            sprite_base: "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon"
                .to_string(),
            species_limit: 1025,
            page_size: 50,
            suggestion_limit: 5,
            suggestion_min_chars: 2,
            toast_ms: 3000,
            collection_key: "poke-collection".to_string(),
            theme_key: "darkMode".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Parse a JSON override object on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: TrackerConfig =
            serde_json::from_str(json).map_err(|e| TrackerError::json("config", e))?;
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        config.sprite_base = config.sprite_base.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(TrackerError::Config("page_size must be at least 1".to_string()));
        }
        if self.species_limit == 0 {
            return Err(TrackerError::Config("species_limit must be at least 1".to_string()));
        }
        if self.collection_key.is_empty() || self.theme_key.is_empty() {
            return Err(TrackerError::Config("storage keys must not be empty".to_string()));
        }
        logging::parse_level(&self.log_level)?;
        Ok(())
    }
}

thread_local! {
    static CONFIG: RefCell<TrackerConfig> = RefCell::new(TrackerConfig::default());
}

/// Snapshot of the active configuration.
pub fn current() -> TrackerConfig {
    CONFIG.with(|c| c.borrow().clone())
}

/// Install a new configuration for the rest of the worker's lifetime.
pub fn install(config: TrackerConfig) {
    if let Ok(level) = logging::parse_level(&config.log_level) {
        logging::set_level(level);
    }
    log::info!(
        "config installed: api={} limit={} page={}",
        config.api_base,
        config.species_limit,
        config.page_size
    );
    CONFIG.with(|c| *c.borrow_mut() = config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_public_api() {
        let config = TrackerConfig::default();
        assert_eq!(config.species_limit, 1025);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.collection_key, "poke-collection");
        assert_eq!(config.theme_key, "darkMode");
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config = TrackerConfig::from_json(r#"{"page_size": 24, "api_base": "http://localhost:8080/api/"}"#)
            .unwrap();
        assert_eq!(config.page_size, 24);
        assert_eq!(config.api_base, "http://localhost:8080/api");
        assert_eq!(config.toast_ms, 3000);
    }

    #[test]
    fn zero_page_size_rejected() {
        let err = TrackerConfig::from_json(r#"{"page_size": 0}"#).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn unknown_log_level_rejected() {
        let config = TrackerConfig::from_json(r#"{"log_level": "Debug"}"#).unwrap();
        assert_eq!(config.log_level, "Debug");
        let err = TrackerConfig::from_json(r#"{"log_level": "chatty"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown log level"));
    }

    #[test]
    fn malformed_override_rejected() {
        assert!(TrackerConfig::from_json("{page_size").is_err());
    }

    #[test]
    fn install_replaces_current() {
        let mut config = TrackerConfig::default();
        config.suggestion_limit = 9;
        install(config);
        assert_eq!(current().suggestion_limit, 9);
        install(TrackerConfig::default());
    }
}
