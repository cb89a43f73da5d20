//! The user's caught/shiny collection.
//!
//! Keys are national dex ids. A missing entry, or a missing field inside an
//! entry, reads as `false`. On the wire the map is a JSON object keyed by the
//! decimal id: `{"25":{"caught":true,"shiny":true}}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, TrackerError};

/// Per-species user state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    #[serde(default)]
    pub caught: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shiny: Option<bool>,
}

impl CollectionEntry {
    pub fn is_shiny(&self) -> bool {
        self.shiny.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    entries: BTreeMap<u32, CollectionEntry>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, id: u32) -> CollectionEntry {
        self.entries.get(&id).copied().unwrap_or_default()
    }

    pub fn is_caught(&self, id: u32) -> bool {
        self.entry(id).caught
    }

    pub fn is_shiny(&self, id: u32) -> bool {
        self.entry(id).is_shiny()
    }

    /// Copy with one entry's `caught` flag replaced.
    pub fn with_caught(&self, id: u32, caught: bool) -> Self {
        let mut next = self.clone();
        next.entries.entry(id).or_default().caught = caught;
        next
    }

    /// Copy with one entry's `shiny` flag replaced.
    pub fn with_shiny(&self, id: u32, shiny: bool) -> Self {
        let mut next = self.clone();
        next.entries.entry(id).or_default().shiny = Some(shiny);
        next
    }

    /// Copy with `caught` set on every id in `ids`. Shiny flags are kept.
    pub fn with_caught_all<I>(&self, ids: I, caught: bool) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut next = self.clone();
        for id in ids {
            next.entries.entry(id).or_default().caught = caught;
        }
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, CollectionEntry)> + '_ {
        self.entries.iter().map(|(id, e)| (*id, *e))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Strict decode: the payload must be an object of positive dex ids.
    pub fn from_json(json: &str) -> Result<Self> {
        let collection: Collection =
            serde_json::from_str(json).map_err(|e| TrackerError::json("collection", e))?;
        collection.validate()?;
        Ok(collection)
    }

    /// Decode from a `serde_json::Value` already extracted from a larger document.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let collection: Collection =
            serde_json::from_value(value).map_err(|e| TrackerError::json("collection", e))?;
        collection.validate()?;
        Ok(collection)
    }

    fn validate(&self) -> Result<()> {
        if self.entries.contains_key(&0) {
            return Err(TrackerError::InvalidImport(
                "id 0 is not a national dex number".to_string(),
            ));
        }
        Ok(())
    }
}

impl FromIterator<(u32, CollectionEntry)> for Collection {
    fn from_iter<T: IntoIterator<Item = (u32, CollectionEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caught(shiny: Option<bool>) -> CollectionEntry {
        CollectionEntry { caught: true, shiny }
    }

    #[test]
    fn missing_entries_read_false() {
        let c: Collection = [(1, caught(Some(true)))].into_iter().collect();
        for id in [2, 3, 151, 1025] {
            assert!(!c.is_caught(id));
            assert!(!c.is_shiny(id));
        }
        assert!(c.is_caught(1));
        assert!(c.is_shiny(1));
    }

    #[test]
    fn missing_fields_read_false() {
        let c = Collection::from_json(r#"{"4": {"shiny": true}, "7": {}}"#).unwrap();
        assert!(!c.is_caught(4));
        assert!(c.is_shiny(4));
        assert!(!c.is_caught(7));
        assert!(!c.is_shiny(7));
    }

    #[test]
    fn with_caught_does_not_mutate_original() {
        let c = Collection::new();
        let next = c.with_caught(25, true);
        assert!(c.is_empty());
        assert!(next.is_caught(25));
        assert!(!next.is_shiny(25));
    }

    #[test]
    fn with_caught_all_keeps_shiny() {
        let c = Collection::new().with_shiny(6, true);
        let next = c.with_caught_all([4, 5, 6], true);
        assert!(next.is_caught(4) && next.is_caught(5) && next.is_caught(6));
        assert!(next.is_shiny(6));
        let released = next.with_caught_all([4, 5, 6], false);
        assert!(!released.is_caught(6));
        assert!(released.is_shiny(6));
    }

    #[test]
    fn wire_format_uses_string_keys() {
        let c = Collection::new().with_caught(25, true).with_shiny(25, true);
        assert_eq!(c.to_json(), r#"{"25":{"caught":true,"shiny":true}}"#);
        let plain = Collection::new().with_caught(1, true);
        assert_eq!(plain.to_json(), r#"{"1":{"caught":true}}"#);
    }

    #[test]
    fn rejects_non_numeric_and_zero_keys() {
        assert!(Collection::from_json(r#"{"pikachu": {"caught": true}}"#).is_err());
        assert!(Collection::from_json(r#"{"0": {"caught": true}}"#).is_err());
        assert!(Collection::from_json(r#"{"-3": {"caught": true}}"#).is_err());
        assert!(Collection::from_json(r#"[1,2]"#).is_err());
        assert!(Collection::from_json(r#"{"1": {"caught": "yes"}}"#).is_err());
    }
}
