//! Toast notifications and the rendering of store effects.

use crate::config;
use crate::persistence;
use crate::routes::util::escape_html;
use crate::tracker::state::{AppState, with_app_mut};
use crate::tracker::store::StoreEffect;
use crate::tracker::ui::{Action, Toast, ToastKind};

/// Out-of-band toast fragment with its own auto-dismiss timer.
pub fn render_toast(toast: &Toast) -> String {
    let (palette, icon) = match toast.kind {
        ToastKind::Success => (
            "bg-green-100 text-green-800 border-green-200 dark:bg-green-900 dark:text-green-100 dark:border-green-800",
            "M5 13l4 4L19 7",
        ),
        ToastKind::Info => (
            "bg-blue-100 text-blue-800 border-blue-200 dark:bg-blue-900 dark:text-blue-100 dark:border-blue-800",
            "M13 16h-1v-4h-1m1-4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
        ),
    };
    format!(
        r#"<div id="toast" hx-swap-oob="true" data-kind="{kind}"
  class="fixed top-4 left-1/2 transform -translate-x-1/2 z-50 px-6 py-3 rounded-full shadow-lg border animate-fade-in-down flex items-center gap-3 font-semibold text-sm {palette}"
  hx-post="/api/toast/dismiss" hx-trigger="load delay:{ms}ms" hx-swap="outerHTML">
  <svg class="w-5 h-5" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="{icon}"/></svg>
  {message}
</div>"#,
        kind = toast.kind.as_str(),
        palette = palette,
        ms = config::current().toast_ms,
        icon = icon,
        message = escape_html(&toast.message),
    )
}

/// Empty toast slot, used once a toast is dismissed.
pub fn empty_toast() -> String {
    r#"<div id="toast"></div>"#.to_string()
}

/// Show a toast: record it in the UI state and render it.
pub fn show(app: &mut AppState, toast: Toast) -> String {
    let html = render_toast(&toast);
    app.dispatch(Action::ShowToast(toast));
    html
}

/// Render every effect. Storage effects become scripts; notifications
/// become the (latest) toast.
pub fn apply_effects(app: &mut AppState, effects: Vec<StoreEffect>) -> String {
    let mut html = String::new();
    for effect in effects {
        match effect {
            StoreEffect::Notify(toast) => html.push_str(&show(app, toast)),
            other => html.push_str(&persistence::effect_script(&other)),
        }
    }
    html
}

// ── POST /api/toast/dismiss ────────────────────────────────────────

pub fn handle_dismiss_post(_body: &str) -> String {
    with_app_mut(|app| app.dispatch(Action::DismissToast));
    empty_toast()
}
