//! Evolution chains as an owned tree.
//!
//! `/evolution-chain/{id}` nests `evolves_to` links recursively. Each node
//! keeps only the first `evolution_details` entry, which is what the chain
//! view labels its arrows with.

use serde::Deserialize;

use crate::error::{Result, TrackerError};
use crate::names::{clean_name, id_from_url};

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionNode {
    pub species_name: String,
    pub species_url: String,
    pub min_level: Option<u32>,
    pub trigger: Option<String>,
    pub item: Option<String>,
    pub evolves_to: Vec<EvolutionNode>,
}

impl EvolutionNode {
    /// Dex id parsed from the species URL.
    pub fn species_id(&self) -> Option<u32> {
        id_from_url(&self.species_url)
    }

    /// Label for the arrow leading into this node.
    pub fn transition_label(&self) -> String {
        if let Some(level) = self.min_level {
            format!("Lvl {}", level)
        } else if self.item.is_some() {
            "Item".to_string()
        } else if let Some(ref trigger) = self.trigger {
            clean_name(trigger)
        } else {
            String::new()
        }
    }
}

#[derive(Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Deserialize)]
struct SpeciesRef {
    name: String,
    url: String,
}

#[derive(Deserialize)]
struct RawDetails {
    #[serde(default)]
    min_level: Option<u32>,
    #[serde(default)]
    trigger: Option<NamedRef>,
    #[serde(default)]
    item: Option<NamedRef>,
}

#[derive(Deserialize)]
struct RawLink {
    species: SpeciesRef,
    #[serde(default)]
    evolution_details: Vec<RawDetails>,
    #[serde(default)]
    evolves_to: Vec<RawLink>,
}

#[derive(Deserialize)]
struct RawChain {
    chain: RawLink,
}

fn build(link: RawLink) -> EvolutionNode {
    let first = link.evolution_details.into_iter().next();
    let (min_level, trigger, item) = match first {
        Some(d) => (
            d.min_level.filter(|l| *l > 0),
            d.trigger.map(|t| t.name),
            d.item.map(|i| i.name),
        ),
        None => (None, None, None),
    };
    EvolutionNode {
        species_name: link.species.name,
        species_url: link.species.url,
        min_level,
        trigger,
        item,
        evolves_to: link.evolves_to.into_iter().map(build).collect(),
    }
}

/// Decode an `/evolution-chain/{id}` payload into its root node.
pub fn parse_chain(value: serde_json::Value) -> Result<EvolutionNode> {
    let raw: RawChain =
        serde_json::from_value(value).map_err(|e| TrackerError::json("evolution chain", e))?;
    Ok(build(raw.chain))
}
