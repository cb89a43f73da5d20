//! Collection persistence routes: startup restore, backup export, and
//! backup import.

use crate::persistence::transfer;
use crate::routes::feedback;
use crate::routes::pokemon::{render_grid, render_grid_oob};
use crate::routes::util::{get_param, parse_form_body, parse_query};
use crate::tracker::state::with_app_mut;
use crate::tracker::store::CollectionStore;
use crate::tracker::ui::Toast;

// ── POST /api/collection/restore ───────────────────────────────────

/// Handle POST /api/collection/restore with the saved local-storage string,
/// either raw or as `saved=`. Ignored once a user is signed in.
pub fn handle_restore_post(body: &str) -> String {
    let params = parse_form_body(body);
    let saved = get_param(&params, "saved").unwrap_or(body.trim());
    with_app_mut(|app| {
        if app.store.signed_in_uid().is_some() {
            log::debug!("restore skipped: remote collection is authoritative");
        } else {
            app.store = CollectionStore::load(Some(saved));
            log::info!("restored {} local entries", app.store.collection().len());
        }
        render_grid(app)
    })
}

// ── GET /api/collection/export ─────────────────────────────────────

/// Handle GET /api/collection/export?today=YYYY-MM-DD
pub fn handle_export_get(query: &str) -> String {
    let params = parse_query(query);
    let today = get_param(&params, "today").unwrap_or("");
    with_app_mut(|app| {
        let mut html = transfer::export_script(app.store.collection(), today);
        html.push_str(&feedback::show(app, Toast::info("Backup downloaded!")));
        html
    })
}

// ── POST /api/collection/import ────────────────────────────────────

/// Handle POST /api/collection/import with the file contents as the body.
/// The bridge confirms the overwrite before posting.
pub fn handle_import_post(body: &str) -> String {
    let imported = match transfer::import(body) {
        Ok(collection) => collection,
        Err(e) => {
            log::warn!("import rejected: {}", e);
            return transfer::invalid_file_script();
        }
    };
    with_app_mut(|app| {
        log::info!("importing {} entries", imported.len());
        let effects = app.store.set(imported);
        let mut html = feedback::apply_effects(app, effects);
        html.push_str(&feedback::show(app, Toast::success("Collection loaded successfully!")));
        html.push_str(&render_grid_oob(app));
        html
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::pokemon::tests::seed_catalog;
    use crate::tracker::collection::Collection;
    use crate::tracker::state::{reset_app, with_app};

    #[test]
    fn restore_loads_saved_collection() {
        seed_catalog(10);
        let html = handle_restore_post(r#"{"3":{"caught":true,"shiny":true}}"#);
        assert!(html.contains(r#"id="poke-3" data-caught="true" data-shiny="true""#));
        reset_app();
    }

    #[test]
    fn restore_tolerates_garbage() {
        seed_catalog(3);
        handle_restore_post("saved=%7Bbroken");
        with_app(|app| assert!(app.store.collection().is_empty()));
        reset_app();
    }

    #[test]
    fn export_names_file_by_date() {
        seed_catalog(3);
        let html = handle_export_get("?today=2024-05-01");
        assert!(html.contains("pokedex-backup-2024-05-01.json"));
        assert!(html.contains("Backup downloaded!"));
        reset_app();
    }

    #[test]
    fn import_replaces_collection() {
        seed_catalog(10);
        handle_restore_post(r#"{"1":{"caught":true}}"#);
        let html = handle_import_post(r#"{"7": {"caught": true}}"#);
        assert!(html.contains("Collection loaded successfully!"));
        assert!(html.contains("localStorage.setItem"));
        with_app(|app| {
            assert_eq!(app.store.collection(), &Collection::new().with_caught(7, true));
        });
        reset_app();
    }

    #[test]
    fn invalid_import_alerts_and_keeps_collection() {
        seed_catalog(10);
        handle_restore_post(r#"{"1":{"caught":true}}"#);
        let html = handle_import_post("definitely not json");
        assert_eq!(html, r#"<script>alert("Invalid file.");</script>"#);
        with_app(|app| assert!(app.store.collection().is_caught(1)));
        reset_app();
    }
}
