//! Cloud persistence: one `users/{uid}` document holding `{ collection }`.
//!
//! The main thread owns the cloud SDK through a `pokedexCloud` object with
//! `save(uid, doc)`, `listen(uid)` and `unlisten()`. Snapshots come back as
//! `{ "uid": .., "exists": bool, "data": {..} | null }` on `/api/sync/snapshot`.

use serde::Deserialize;

use super::js_string;
use crate::error::{Result, TrackerError};
use crate::tracker::collection::Collection;
use crate::tracker::store::RemoteSnapshot;

#[derive(Debug, Deserialize)]
pub struct SnapshotEvent {
    pub uid: String,
    pub exists: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Decode a snapshot event into the uid it belongs to and what it says.
pub fn parse_snapshot(json: &str) -> Result<(String, RemoteSnapshot)> {
    let event: SnapshotEvent =
        serde_json::from_str(json).map_err(|e| TrackerError::json("remote snapshot", e))?;
    if event.uid.is_empty() {
        return Err(TrackerError::InvalidImport("snapshot without uid".to_string()));
    }
    if !event.exists {
        return Ok((event.uid, RemoteSnapshot::Missing));
    }
    let collection = event
        .data
        .and_then(|mut doc| doc.get_mut("collection").map(serde_json::Value::take))
        .filter(|value| !value.is_null())
        .and_then(|value| match Collection::from_value(value) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("remote collection for {} unreadable: {}", event.uid, e);
                None
            }
        });
    Ok((event.uid, RemoteSnapshot::Present(collection)))
}

/// Merge-write `{collection}` into the user's document.
pub fn save_script(uid: &str, collection_json: &str) -> String {
    format!(
        r#"<script>
if(window.pokedexCloud)pokedexCloud.save({uid}, {{collection: JSON.parse({json})}});
</script>"#,
        uid = js_string(uid),
        json = js_string(collection_json)
    )
}

pub fn listen_script(uid: &str) -> String {
    format!(
        r#"<script>
if(window.pokedexCloud)pokedexCloud.listen({uid});
console.log('[pokedex] Listening for cloud updates');
</script>"#,
        uid = js_string(uid)
    )
}

pub fn unlisten_script() -> String {
    r#"<script>
if(window.pokedexCloud)pokedexCloud.unlisten();
console.log('[pokedex] Stopped cloud updates');
</script>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document() {
        let (uid, snap) = parse_snapshot(r#"{"uid":"ash","exists":false}"#).unwrap();
        assert_eq!(uid, "ash");
        assert_eq!(snap, RemoteSnapshot::Missing);
    }

    #[test]
    fn document_with_collection() {
        let (_, snap) = parse_snapshot(
            r#"{"uid":"ash","exists":true,"data":{"collection":{"25":{"caught":true}},"other":1}}"#,
        )
        .unwrap();
        match snap {
            RemoteSnapshot::Present(Some(c)) => assert!(c.is_caught(25)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn document_without_usable_collection() {
        for data in [r#"{}"#, r#"{"collection":null}"#, r#"{"collection":[1]}"#] {
            let json = format!(r#"{{"uid":"ash","exists":true,"data":{}}}"#, data);
            let (_, snap) = parse_snapshot(&json).unwrap();
            assert_eq!(snap, RemoteSnapshot::Present(None));
        }
    }

    #[test]
    fn malformed_events_rejected() {
        assert!(parse_snapshot("nope").is_err());
        assert!(parse_snapshot(r#"{"uid":"","exists":false}"#).is_err());
    }

    #[test]
    fn save_script_wraps_collection() {
        let script = save_script("ash", r#"{"1":{"caught":true}}"#);
        assert!(script.contains(r#"pokedexCloud.save("ash", {collection: JSON.parse("{\"1\":{\"caught\":true}}")})"#));
    }
}
