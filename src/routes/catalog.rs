//! Catalog bootstrap: configuration overrides, endpoint discovery for the
//! bridge, and the species index upload.

use serde_json::json;

use crate::catalog;
use crate::config::{self, TrackerConfig};
use crate::routes::pokemon::render_grid;
use crate::routes::util::{escape_html, get_param, parse_query};
use crate::tracker::state::with_app_mut;

// ── POST /api/config ───────────────────────────────────────────────

/// Handle POST /api/config with a JSON object of overrides.
pub fn handle_config_post(body: &str) -> String {
    let trimmed = body.trim();
    let parsed = if trimmed.is_empty() {
        Ok(TrackerConfig::default())
    } else {
        TrackerConfig::from_json(trimmed)
    };
    match parsed {
        Ok(config) => {
            let page_size = config.page_size;
            config::install(config);
            with_app_mut(|app| app.ui.visible_count = page_size);
            "ok".to_string()
        }
        Err(e) => {
            log::warn!("config rejected: {}", e);
            format!("error: {}", e)
        }
    }
}

// ── GET /api/catalog/endpoints ─────────────────────────────────────

/// URLs the bridge should fetch. Without `id` this is the species index;
/// with `id` it is the detail bundle's first two requests. Type and
/// evolution URLs come from those payloads.
pub fn handle_endpoints_get(query: &str) -> String {
    let params = parse_query(query);
    let config = config::current();
    let body = match get_param(&params, "id").map(|v| v.parse::<u32>()) {
        None => json!({ "index": catalog::index_url(&config) }),
        Some(Ok(id)) if id > 0 => json!({
            "id": id,
            "pokemon": catalog::pokemon_url(&config, id),
            "species": catalog::species_url(&config, id),
        }),
        Some(_) => json!({ "error": "invalid id" }),
    };
    body.to_string()
}

// ── POST /api/catalog ──────────────────────────────────────────────

/// Handle POST /api/catalog with the raw `/pokemon?limit=N` response.
pub fn handle_catalog_post(body: &str) -> String {
    let limit = config::current().species_limit;
    match catalog::parse_index(body, limit) {
        Ok(species) => with_app_mut(|app| {
            log::info!("catalog loaded: {} species", species.len());
            app.catalog = species;
            render_grid(app)
        }),
        Err(e) => {
            log::warn!("catalog unavailable: {}", e);
            format!(
                r#"<div class="col-span-full text-center py-20 text-red-500">Failed to load Pokédex: {}</div>"#,
                escape_html(&e.to_string())
            )
        }
    }
}
