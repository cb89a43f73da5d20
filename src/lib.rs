//! Pokédex tracker in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Web Worker
//! bridge to call. Routing uses `matchit`. The bridge owns all network and
//! storage I/O: it posts raw catalog payloads, storage reads and cloud
//! events in, and executes the `<script>` effects that come back out.

use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod names;
pub mod persistence;
pub mod routes;
pub mod tracker;

/// Process an HTTP-like request and return an HTML fragment.
///
/// # Arguments
/// * `method`: HTTP method (`GET` or `POST`)
/// * `path`  : URL path (e.g. `/api/pokemon`)
/// * `query` : Query string (e.g. `?today=2024-05-01`)
/// * `body`  : Request body: form data or raw JSON. Empty for GET.
///
/// # Returns
/// An HTML string fragment suitable for HTMX to swap into the DOM.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    logging::ensure_installed();
    let mut router = matchit::Router::new();

    // Bootstrap
    router.insert("/api/config", "config").ok();
    router.insert("/api/catalog", "catalog").ok();
    router.insert("/api/catalog/endpoints", "catalog_endpoints").ok();

    // Grid and collection marks
    router.insert("/api/pokemon", "pokemon").ok();
    router.insert("/api/pokemon/more", "pokemon_more").ok();
    router.insert("/api/pokemon/toggle", "pokemon_toggle").ok();
    router.insert("/api/pokemon/bulk", "pokemon_bulk").ok();
    router.insert("/api/pokemon/progress", "pokemon_progress").ok();
    router.insert("/api/search/suggestions", "suggestions").ok();

    // View state
    router.insert("/api/view", "view").ok();
    router.insert("/api/keyboard", "keyboard").ok();
    router.insert("/api/theme", "theme").ok();
    router.insert("/api/stats", "stats").ok();
    router.insert("/api/detail", "detail").ok();
    router.insert("/api/detail/close", "detail_close").ok();
    router.insert("/api/toast/dismiss", "toast_dismiss").ok();

    // Persistence
    router.insert("/api/collection/restore", "collection_restore").ok();
    router.insert("/api/collection/export", "collection_export").ok();
    router.insert("/api/collection/import", "collection_import").ok();

    // Auth and cloud sync
    router.insert("/api/auth", "auth").ok();
    router.insert("/api/auth/error", "auth_error").ok();
    router.insert("/api/sync/snapshot", "sync_snapshot").ok();
    router.insert("/api/sync/error", "sync_error").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            // GET routes
            ("catalog_endpoints", "GET") => routes::catalog::handle_endpoints_get(query),
            ("pokemon", "GET") => routes::pokemon::handle_grid_get(query),
            ("pokemon_progress", "GET") => routes::pokemon::handle_progress_get(query),
            ("suggestions", "GET") => routes::pokemon::handle_suggestions_get(query),
            ("stats", "GET") => routes::stats::handle(query),
            ("collection_export", "GET") => routes::collection::handle_export_get(query),

            // POST routes
            ("config", "POST") => routes::catalog::handle_config_post(body),
            ("catalog", "POST") => routes::catalog::handle_catalog_post(body),
            ("pokemon_more", "POST") => routes::pokemon::handle_more_post(body),
            ("pokemon_toggle", "POST") => routes::pokemon::handle_toggle_post(body),
            ("pokemon_bulk", "POST") => routes::pokemon::handle_bulk_post(body),
            ("view", "POST") => routes::view::handle_view_post(body),
            ("keyboard", "POST") => routes::view::handle_keyboard_post(body),
            ("theme", "POST") => routes::view::handle_theme_post(body),
            ("detail", "POST") => routes::detail::handle_open_post(body),
            ("detail_close", "POST") => routes::detail::handle_close_post(body),
            ("toast_dismiss", "POST") => routes::feedback::handle_dismiss_post(body),
            ("collection_restore", "POST") => routes::collection::handle_restore_post(body),
            ("collection_import", "POST") => routes::collection::handle_import_post(body),
            ("auth", "POST") => routes::sync::handle_auth_post(body),
            ("auth_error", "POST") => routes::sync::handle_auth_error_post(body),
            ("sync_snapshot", "POST") => routes::sync::handle_snapshot_post(body),
            ("sync_error", "POST") => routes::sync::handle_sync_error_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-red-500">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-500">405 — method not allowed</span>"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::state::{reset_app, with_app};

    const INDEX: &str = r#"{"results": [
        {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
        {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"},
        {"name": "venusaur", "url": "https://pokeapi.co/api/v2/pokemon/3/"},
        {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"}
    ]}"#;

    #[test]
    fn returns_404_for_unknown_route() {
        let html = handle_request("GET", "/api/nonexistent", "", "");
        assert!(html.contains("404"));
    }

    #[test]
    fn returns_405_for_wrong_method() {
        assert!(handle_request("POST", "/api/stats", "", "").contains("405"));
        assert!(handle_request("GET", "/api/pokemon/toggle", "", "").contains("405"));
    }

    #[test]
    fn routes_catalog_then_grid() {
        reset_app();
        handle_request("POST", "/api/catalog", "", INDEX);
        let html = handle_request("GET", "/api/pokemon", "", "");
        assert_eq!(html.matches(r#"<div id="poke-"#).count(), 4);
        reset_app();
    }

    #[test]
    fn routes_toggle_and_progress() {
        reset_app();
        handle_request("POST", "/api/catalog", "", INDEX);
        let html = handle_request("POST", "/api/pokemon/toggle", "", "id=4&field=caught");
        assert!(html.contains("Caught charmander!"));
        let progress = handle_request("GET", "/api/pokemon/progress", "", "");
        assert!(progress.contains("1 / 4"));
        assert!(progress.contains("(25%)"));
        reset_app();
    }

    #[test]
    fn routes_export_import_round_trip() {
        reset_app();
        handle_request("POST", "/api/catalog", "", INDEX);
        handle_request("POST", "/api/pokemon/toggle", "", "id=2&field=shiny");
        let before = with_app(|app| app.store.collection().clone());
        let export = handle_request("GET", "/api/collection/export", "?today=2024-05-01", "");
        assert!(export.contains("pokedex-backup-2024-05-01.json"));

        let json = before.to_json_pretty();
        handle_request("POST", "/api/pokemon/bulk", "", "action=catch");
        handle_request("POST", "/api/collection/import", "", &json);
        with_app(|app| assert_eq!(app.store.collection(), &before));
        reset_app();
    }

    #[test]
    fn routes_sort_reverses_order() {
        reset_app();
        handle_request("POST", "/api/catalog", "", INDEX);
        let asc = handle_request("POST", "/api/view", "", "action=sort&value=id-asc");
        let desc = handle_request("POST", "/api/view", "", "action=sort&value=id-desc");
        let order = |html: &str| -> Vec<usize> {
            (1..=4)
                .map(|id| html.find(&format!(r#"id="poke-{}""#, id)).unwrap_or(usize::MAX))
                .collect()
        };
        let a = order(&asc);
        let d = order(&desc);
        assert!(a.windows(2).all(|w| w[0] < w[1]));
        assert!(d.windows(2).all(|w| w[0] > w[1]));
        reset_app();
    }

    #[test]
    fn routes_stats_and_keyboard() {
        reset_app();
        assert!(handle_request("GET", "/api/stats", "", "").contains("Collection Stats"));
        let html = handle_request("POST", "/api/keyboard", "", "key=Escape");
        assert!(html.contains("stats-modal"));
        reset_app();
    }

    #[test]
    fn routes_sync_flow() {
        reset_app();
        handle_request("POST", "/api/catalog", "", INDEX);
        handle_request("POST", "/api/auth", "", "uid=ash");
        handle_request(
            "POST",
            "/api/sync/snapshot",
            "",
            r#"{"uid":"ash","exists":true,"data":{"collection":{"3":{"caught":true}}}}"#,
        );
        with_app(|app| assert!(app.store.collection().is_caught(3)));
        let html = handle_request("POST", "/api/sync/error", "", "kind=save&msg=quota");
        assert!(html.contains("Error saving to cloud"));
        reset_app();
    }
}
