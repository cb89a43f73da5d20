//! Bridges between the in-memory collection and the outside world.
//!
//! Nothing here touches storage directly. Each module renders the `<script>`
//! the main thread runs to perform the write, or validates what it read.

pub mod local;
pub mod remote;
pub mod transfer;

use crate::tracker::store::StoreEffect;

/// Quote `s` as a JS string literal that is also safe inside `<script>`.
pub fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

/// Render the storage side of a store effect. Notifications are not
/// storage and render as nothing here.
pub fn effect_script(effect: &StoreEffect) -> String {
    match effect {
        StoreEffect::SaveLocal { json } => local::save_collection_script(json),
        StoreEffect::SaveRemote { uid, json } => remote::save_script(uid, json),
        StoreEffect::Subscribe { uid } => remote::listen_script(uid),
        StoreEffect::Unsubscribe => remote::unlisten_script(),
        StoreEffect::Notify(_) => String::new(),
    }
}
