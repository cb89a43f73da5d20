//! Remote catalog client: PokeAPI endpoint builders and payload validation.
//!
//! The worker bridge performs the actual HTTP requests; everything it hands
//! back is decoded here into typed records. Shape mismatches are rejected
//! rather than trusted.

pub mod detail;
pub mod evolution;
pub mod species;

use serde::{Deserialize, Serialize};

use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};

/// One entry of the national dex index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    /// 1-based national dex number (list position in the index).
    pub id: u32,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct RawIndex {
    results: Vec<RawIndexEntry>,
}

#[derive(Debug, Deserialize)]
struct RawIndexEntry {
    name: String,
    url: String,
}

/// Decode the `/pokemon?limit=N` index. Ids are assigned by position and the
/// list is truncated to `limit`.
pub fn parse_index(json: &str, limit: u32) -> Result<Vec<Species>> {
    let raw: RawIndex =
        serde_json::from_str(json).map_err(|e| TrackerError::json("species index", e))?;
    if raw.results.is_empty() {
        return Err(TrackerError::Catalog("species index is empty".to_string()));
    }
    Ok(raw
        .results
        .into_iter()
        .take(limit as usize)
        .enumerate()
        .map(|(i, entry)| Species {
            id: i as u32 + 1,
            name: entry.name,
            url: entry.url,
        })
        .collect())
}

// ── Endpoints ──────────────────────────────────────────────────────

pub fn index_url(config: &TrackerConfig) -> String {
    format!("{}/pokemon?limit={}", config.api_base, config.species_limit)
}

pub fn pokemon_url(config: &TrackerConfig, id: u32) -> String {
    format!("{}/pokemon/{}", config.api_base, id)
}

pub fn species_url(config: &TrackerConfig, id: u32) -> String {
    format!("{}/pokemon-species/{}", config.api_base, id)
}

pub fn artwork_url(config: &TrackerConfig, id: u32, shiny: bool) -> String {
    if shiny {
        format!("{}/other/official-artwork/shiny/{}.png", config.sprite_base, id)
    } else {
        format!("{}/other/official-artwork/{}.png", config.sprite_base, id)
    }
}

/// Small front sprite used in suggestion lists and evolution chains.
pub fn sprite_url(config: &TrackerConfig, id: u32) -> String {
    format!("{}/{}.png", config.sprite_base, id)
}
