//! Per-species detail: types, base stats, size, and type weaknesses.

use serde::Deserialize;

use crate::catalog::evolution::{self, EvolutionNode};
use crate::catalog::species::{self, SpeciesInfo};
use crate::error::{Result, TrackerError};

#[derive(Debug, Clone, PartialEq)]
pub struct BaseStat {
    pub name: String,
    pub base_stat: u32,
}

impl BaseStat {
    /// Short label shown next to the stat bar.
    pub fn label(&self) -> &str {
        match self.name.as_str() {
            "hp" => "HP",
            "attack" => "ATK",
            "defense" => "DEF",
            "special-attack" => "SpA",
            "special-defense" => "SpD",
            "speed" => "SPD",
            other => other,
        }
    }

    /// Bar width in percent of the 255 stat ceiling, capped at 100.
    pub fn bar_percent(&self) -> f64 {
        (self.base_stat as f64 / 255.0 * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PokemonDetail {
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub types: Vec<String>,
    pub stats: Vec<BaseStat>,
}

impl PokemonDetail {
    pub fn height_m(&self) -> f64 {
        self.height as f64 / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight as f64 / 10.0
    }
}

#[derive(Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Deserialize)]
struct RawTypeSlot {
    #[serde(rename = "type")]
    kind: NamedRef,
}

#[derive(Deserialize)]
struct RawStat {
    base_stat: u32,
    stat: NamedRef,
}

#[derive(Deserialize)]
struct RawPokemon {
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    types: Vec<RawTypeSlot>,
    #[serde(default)]
    stats: Vec<RawStat>,
}

impl From<RawPokemon> for PokemonDetail {
    fn from(raw: RawPokemon) -> Self {
        Self {
            name: raw.name,
            height: raw.height,
            weight: raw.weight,
            types: raw.types.into_iter().map(|t| t.kind.name).collect(),
            stats: raw
                .stats
                .into_iter()
                .map(|s| BaseStat {
                    name: s.stat.name,
                    base_stat: s.base_stat,
                })
                .collect(),
        }
    }
}

pub fn parse_pokemon(value: serde_json::Value) -> Result<PokemonDetail> {
    let raw: RawPokemon =
        serde_json::from_value(value).map_err(|e| TrackerError::json("pokemon detail", e))?;
    Ok(raw.into())
}

// ── Type weaknesses ────────────────────────────────────────────────

/// Damage taken by one defending type, as published by `/type/{name}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageRelations {
    pub double_damage_from: Vec<String>,
    pub half_damage_from: Vec<String>,
    pub no_damage_from: Vec<String>,
}

#[derive(Deserialize)]
struct RawRelations {
    #[serde(default)]
    double_damage_from: Vec<NamedRef>,
    #[serde(default)]
    half_damage_from: Vec<NamedRef>,
    #[serde(default)]
    no_damage_from: Vec<NamedRef>,
}

#[derive(Deserialize)]
struct RawType {
    damage_relations: RawRelations,
}

fn names(refs: Vec<NamedRef>) -> Vec<String> {
    refs.into_iter().map(|r| r.name).collect()
}

pub fn parse_type(value: serde_json::Value) -> Result<DamageRelations> {
    let raw: RawType =
        serde_json::from_value(value).map_err(|e| TrackerError::json("type relations", e))?;
    let r = raw.damage_relations;
    Ok(DamageRelations {
        double_damage_from: names(r.double_damage_from),
        half_damage_from: names(r.half_damage_from),
        no_damage_from: names(r.no_damage_from),
    })
}

/// Combined multiplier per attacking type across all of a species' types,
/// in first-seen order.
pub fn damage_multipliers(relations: &[DamageRelations]) -> Vec<(String, f64)> {
    let mut factors: Vec<(String, f64)> = Vec::new();
    let mut apply = |name: &str, factor: f64| match factors.iter_mut().find(|(n, _)| n == name) {
        Some((_, m)) => *m *= factor,
        None => factors.push((name.to_string(), factor)),
    };
    for rel in relations {
        for t in &rel.double_damage_from {
            apply(t, 2.0);
        }
        for t in &rel.half_damage_from {
            apply(t, 0.5);
        }
        for t in &rel.no_damage_from {
            apply(t, 0.0);
        }
    }
    factors
}

/// Attacking types that deal more than neutral damage.
pub fn weaknesses(relations: &[DamageRelations]) -> Vec<String> {
    damage_multipliers(relations)
        .into_iter()
        .filter(|(_, m)| *m > 1.0)
        .map(|(name, _)| name)
        .collect()
}

// ── Bundle ─────────────────────────────────────────────────────────

/// Everything the detail modal needs, as collected by the bridge:
/// `{ "pokemon": .., "types": [..], "species": .. | null, "evolution": .. | null }`.
#[derive(Debug, Clone)]
pub struct DetailBundle {
    pub id: u32,
    pub pokemon: PokemonDetail,
    pub weaknesses: Vec<String>,
    pub species: Option<SpeciesInfo>,
    pub evolution: Option<EvolutionNode>,
}

#[derive(Deserialize)]
struct RawBundle {
    id: u32,
    pokemon: serde_json::Value,
    #[serde(default)]
    types: Vec<serde_json::Value>,
    #[serde(default)]
    species: Option<serde_json::Value>,
    #[serde(default)]
    evolution: Option<serde_json::Value>,
}

/// Decode a detail bundle. The `pokemon` record is required; type, species,
/// and evolution payloads degrade to absent when malformed.
pub fn parse_bundle(json: &str) -> Result<DetailBundle> {
    let raw: RawBundle =
        serde_json::from_str(json).map_err(|e| TrackerError::json("detail bundle", e))?;
    let id = raw.id;
    if id == 0 {
        return Err(TrackerError::Catalog("detail bundle has id 0".to_string()));
    }
    let pokemon = parse_pokemon(raw.pokemon)?;

    let relations: Vec<DamageRelations> = raw
        .types
        .into_iter()
        .filter_map(|v| match parse_type(v) {
            Ok(r) => Some(r),
            Err(e) => {
                log::warn!("skipping type payload for #{}: {}", id, e);
                None
            }
        })
        .collect();

    let species = raw.species.and_then(|v| match species::parse_species(v) {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("species metadata for #{} unusable: {}", id, e);
            None
        }
    });

    let evolution = raw.evolution.and_then(|v| match evolution::parse_chain(v) {
        Ok(chain) => Some(chain),
        Err(e) => {
            log::warn!("evolution chain for #{} unusable: {}", id, e);
            None
        }
    });

    Ok(DetailBundle {
        id,
        pokemon,
        weaknesses: weaknesses(&relations),
        species,
        evolution,
    })
}
