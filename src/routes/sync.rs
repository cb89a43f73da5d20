//! Authentication and cloud sync events reported by the bridge.

use crate::persistence::remote;
use crate::routes::feedback;
use crate::routes::pokemon::render_grid_oob;
use crate::routes::util::{escape_html, get_param, parse_form_body};
use crate::tracker::state::{AppState, with_app_mut};
use crate::tracker::store::FailureKind;
use crate::tracker::ui::Toast;

/// Login/logout button reflecting the active backend.
fn render_auth(app: &AppState) -> String {
    match app.store.signed_in_uid() {
        Some(uid) => format!(
            r#"<div id="auth" hx-swap-oob="true" class="flex items-center gap-3" data-uid="{uid}">
  <span class="text-sm text-green-600 dark:text-green-400 font-bold">Cloud sync on</span>
  <button onclick="if(window.pokedexCloud)pokedexCloud.logout()" class="px-4 py-2 rounded-lg bg-slate-200 dark:bg-slate-700 text-slate-700 dark:text-white font-bold text-sm">Logout</button>
</div>"#,
            uid = escape_html(uid)
        ),
        None => r#"<div id="auth" hx-swap-oob="true" class="flex items-center gap-3">
  <button onclick="if(window.pokedexCloud)pokedexCloud.login()" class="px-4 py-2 rounded-lg bg-blue-600 hover:bg-blue-700 text-white font-bold text-sm">Login with Google</button>
</div>"#
            .to_string(),
    }
}

// ── POST /api/auth ─────────────────────────────────────────────────

/// Handle POST /api/auth with `uid=` (empty when signed out), `local=` (the
/// current local-storage string) and `interactive=true` after a popup login.
pub fn handle_auth_post(body: &str) -> String {
    let params = parse_form_body(body);
    let uid = get_param(&params, "uid").map(str::trim).filter(|u| !u.is_empty());
    let local = get_param(&params, "local");
    let interactive = get_param(&params, "interactive") == Some("true");

    with_app_mut(|app| {
        let was_signed_in = app.store.signed_in_uid().is_some();
        let effects = app.store.on_auth_change(uid, local);
        let mut html = feedback::apply_effects(app, effects);
        if interactive && uid.is_some() && !was_signed_in {
            html.push_str(&feedback::show(app, Toast::success("Logged in successfully!")));
        }
        html.push_str(&render_auth(app));
        html.push_str(&render_grid_oob(app));
        html
    })
}

// ── POST /api/auth/error ───────────────────────────────────────────

pub fn handle_auth_error_post(body: &str) -> String {
    let params = parse_form_body(body);
    let detail = get_param(&params, "msg").unwrap_or("");
    with_app_mut(|app| {
        let effects = app.store.report_failure(FailureKind::Auth, detail);
        feedback::apply_effects(app, effects)
    })
}

// ── POST /api/sync/snapshot ────────────────────────────────────────

/// Handle POST /api/sync/snapshot with `{uid, exists, data}` as JSON.
pub fn handle_snapshot_post(body: &str) -> String {
    let (uid, snapshot) = match remote::parse_snapshot(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("snapshot rejected: {}", e);
            return String::new();
        }
    };
    with_app_mut(|app| {
        let effects = app.store.on_remote_snapshot(&uid, snapshot);
        let mut html = feedback::apply_effects(app, effects);
        html.push_str(&render_grid_oob(app));
        html
    })
}

// ── POST /api/sync/error ───────────────────────────────────────────

/// Handle POST /api/sync/error with `kind=save|listen&msg=`.
pub fn handle_sync_error_post(body: &str) -> String {
    let params = parse_form_body(body);
    let kind = match get_param(&params, "kind") {
        Some("save") => FailureKind::RemoteSave,
        Some("listen") => FailureKind::RemoteListen,
        _ => return r#"<span class="text-red-500">Unknown sync error kind</span>"#.to_string(),
    };
    let detail = get_param(&params, "msg").unwrap_or("");
    with_app_mut(|app| {
        let effects = app.store.report_failure(kind, detail);
        feedback::apply_effects(app, effects)
    })
}
