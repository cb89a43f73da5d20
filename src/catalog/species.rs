//! `/pokemon-species/{id}` metadata.

use serde::Deserialize;

use crate::error::{Result, TrackerError};
use crate::names::clean_name;

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesInfo {
    /// First English flavor text, form feeds flattened to spaces.
    pub flavor_text: Option<String>,
    /// Regional dex names (cleaned), national dex excluded.
    pub regional_dexes: Vec<String>,
    /// Raw generation name, e.g. `generation-iv`.
    pub generation: String,
    pub evolution_chain_url: Option<String>,
}

impl SpeciesInfo {
    /// `generation-iv` → `Gen iv`.
    pub fn generation_label(&self) -> String {
        self.generation.replacen("generation-", "Gen ", 1)
    }
}

#[derive(Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Deserialize)]
struct RawFlavor {
    flavor_text: String,
    language: NamedRef,
}

#[derive(Deserialize)]
struct RawDexNumber {
    pokedex: NamedRef,
}

#[derive(Deserialize)]
struct UrlRef {
    url: String,
}

#[derive(Deserialize)]
struct RawSpecies {
    #[serde(default)]
    flavor_text_entries: Vec<RawFlavor>,
    #[serde(default)]
    pokedex_numbers: Vec<RawDexNumber>,
    generation: NamedRef,
    #[serde(default)]
    evolution_chain: Option<UrlRef>,
}

pub fn parse_species(value: serde_json::Value) -> Result<SpeciesInfo> {
    let raw: RawSpecies =
        serde_json::from_value(value).map_err(|e| TrackerError::json("species metadata", e))?;

    let flavor_text = raw
        .flavor_text_entries
        .into_iter()
        .find(|f| f.language.name == "en")
        .map(|f| f.flavor_text.replace('\u{000C}', " "));

    let regional_dexes = raw
        .pokedex_numbers
        .into_iter()
        .filter(|d| d.pokedex.name != "national")
        .map(|d| clean_name(&d.pokedex.name))
        .collect();

    Ok(SpeciesInfo {
        flavor_text,
        regional_dexes,
        generation: raw.generation.name,
        evolution_chain_url: raw.evolution_chain.map(|c| c.url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eevee() -> serde_json::Value {
        json!({
            "flavor_text_entries": [
                {"flavor_text": "Sa structure génétique", "language": {"name": "fr"}},
                {"flavor_text": "Its genetic code is\u{000C}irregular.", "language": {"name": "en"}},
                {"flavor_text": "Second English entry", "language": {"name": "en"}}
            ],
            "pokedex_numbers": [
                {"entry_number": 133, "pokedex": {"name": "national"}},
                {"entry_number": 133, "pokedex": {"name": "original-johto"}},
                {"entry_number": 184, "pokedex": {"name": "kalos-central"}}
            ],
            "generation": {"name": "generation-i", "url": "u"},
            "evolution_chain": {"url": "https://pokeapi.co/api/v2/evolution-chain/67/"}
        })
    }

    #[test]
    fn picks_first_english_flavor_text() {
        let info = parse_species(eevee()).unwrap();
        assert_eq!(info.flavor_text.as_deref(), Some("Its genetic code is irregular."));
    }

    #[test]
    fn regional_dexes_skip_national() {
        let info = parse_species(eevee()).unwrap();
        assert_eq!(info.regional_dexes, vec!["johto", "kalos central"]);
    }

    #[test]
    fn generation_label_and_chain() {
        let info = parse_species(eevee()).unwrap();
        assert_eq!(info.generation_label(), "Gen i");
        assert_eq!(
            info.evolution_chain_url.as_deref(),
            Some("https://pokeapi.co/api/v2/evolution-chain/67/")
        );
    }

    #[test]
    fn missing_generation_rejected() {
        assert!(parse_species(json!({"flavor_text_entries": []})).is_err());
    }

    #[test]
    fn no_english_text_is_none() {
        let info = parse_species(json!({
            "flavor_text_entries": [{"flavor_text": "x", "language": {"name": "ja"}}],
            "generation": {"name": "generation-ix"}
        }))
        .unwrap();
        assert!(info.flavor_text.is_none());
        assert!(info.evolution_chain_url.is_none());
    }
}
