//! View controls: search, filter, sort, generation tabs, keyboard shortcuts,
//! and the theme toggle.

use crate::persistence::local;
use crate::routes::pokemon::{render_grid, render_grid_oob, render_suggestions};
use crate::routes::util::{escape_html, get_param, parse_form_body};
use crate::tracker::generation::GENERATIONS;
use crate::tracker::state::{AppState, with_app_mut};
use crate::tracker::ui::{Action, KeyCommand, resolve_key};
use crate::tracker::view::{SortOrder, StatusFilter};

fn tab_class(active: bool) -> &'static str {
    if active {
        "bg-blue-600 text-white shadow-md"
    } else {
        "bg-white text-slate-600 hover:bg-slate-50 dark:bg-slate-800 dark:text-slate-300 dark:hover:bg-slate-700"
    }
}

/// Generation tabs, filter pills, sort select, and bulk buttons.
pub fn render_controls(app: &AppState, oob: bool) -> String {
    let ui = &app.ui;
    let mut html = format!(
        r#"<div id="controls"{} class="flex flex-col gap-4 mb-6">
  <div class="flex gap-2 flex-wrap justify-center">"#,
        if oob { r#" hx-swap-oob="true""# } else { "" }
    );
    for generation in GENERATIONS.iter() {
        html.push_str(&format!(
            r##"
    <button hx-post="/api/view" hx-vals='{{"action":"generation","value":"{id}"}}' hx-target="#pokemon-grid" hx-swap="innerHTML"
      class="px-3 py-1 rounded-lg font-bold text-sm transition {class}">{name}</button>"##,
            id = generation.id,
            class = tab_class(generation.id == ui.generation),
            name = generation.name,
        ));
    }
    html.push_str(
        r##"
  </div>
  <div class="flex flex-col md:flex-row justify-center items-center gap-4">
    <select name="value" hx-post="/api/view" hx-vals='{"action":"sort"}' hx-target="#pokemon-grid" hx-swap="innerHTML"
      class="bg-white dark:bg-slate-800 border border-slate-200 dark:border-slate-700 text-slate-700 dark:text-white py-2 px-4 rounded-lg font-bold shadow-sm cursor-pointer">"##,
    );
    for sort in SortOrder::ALL {
        html.push_str(&format!(
            r#"
      <option value="{value}"{selected}>{label}</option>"#,
            value = sort.as_str(),
            selected = if sort == ui.sort { " selected" } else { "" },
            label = sort.label(),
        ));
    }
    html.push_str(
        r#"
    </select>
    <div class="flex gap-2 flex-wrap justify-center">"#,
    );
    for filter in StatusFilter::ALL {
        html.push_str(&format!(
            r##"
      <button hx-post="/api/view" hx-vals='{{"action":"filter","value":"{value}"}}' hx-target="#pokemon-grid" hx-swap="innerHTML"
        class="px-4 py-2 rounded-full font-bold text-sm transition {class}">{label}</button>"##,
            value = filter.as_str(),
            class = tab_class(filter == ui.filter),
            label = filter.label(),
        ));
    }
    html.push_str(&format!(
        r##"
    </div>
    <div class="flex gap-2">
      <button hx-post="/api/pokemon/bulk" hx-vals='{{"action":"catch"}}' hx-target="#pokemon-grid" hx-swap="innerHTML"
        class="px-4 py-2 rounded-lg font-bold text-sm bg-green-500 hover:bg-green-600 text-white shadow-sm">Catch All</button>
      <button hx-post="/api/pokemon/bulk" hx-vals='{{"action":"release"}}' hx-target="#pokemon-grid" hx-swap="innerHTML"
        hx-confirm="Clear all marks for {scope}?"
        class="px-4 py-2 rounded-lg font-bold text-sm bg-red-500 hover:bg-red-600 text-white shadow-sm">Release All</button>
    </div>
  </div>
</div>"##,
        scope = escape_html(ui.scope_label()),
    ));
    html
}

fn suggestions_oob(app: &AppState) -> String {
    format!(
        r#"<div id="suggestions" hx-swap-oob="true">{}</div>"#,
        render_suggestions(app)
    )
}

fn search_input_script(value: &str) -> String {
    format!(
        r#"<script>(function(){{var i=document.getElementById('search-input');if(i)i.value={};}})();</script>"#,
        crate::persistence::js_string(value)
    )
}

// ── POST /api/view ─────────────────────────────────────────────────

/// Handle POST /api/view with `action=search|clear_search|pick|filter|sort|generation`
/// and an optional `value`. Returns the grid plus out-of-band controls.
pub fn handle_view_post(body: &str) -> String {
    let params = parse_form_body(body);
    let value = get_param(&params, "value").unwrap_or("");
    let action = match get_param(&params, "action") {
        Some("search") => Action::SetSearch(value.to_string()),
        Some("clear_search") => Action::ClearSearch,
        Some("pick") => Action::PickSuggestion(value.to_string()),
        Some("filter") => match StatusFilter::parse(value) {
            Some(filter) => Action::SetFilter(filter),
            None => return format!(r#"<span class="text-red-500">Unknown filter: {}</span>"#, escape_html(value)),
        },
        Some("sort") => match SortOrder::parse(value) {
            Some(sort) => Action::SetSort(sort),
            None => return format!(r#"<span class="text-red-500">Unknown sort: {}</span>"#, escape_html(value)),
        },
        Some("generation") => match value.parse::<u8>() {
            Ok(id) => Action::SelectGeneration(id),
            Err(_) => return r#"<span class="text-red-500">Invalid generation</span>"#.to_string(),
        },
        _ => return r#"<span class="text-red-500">Unknown view action</span>"#.to_string(),
    };

    with_app_mut(|app| {
        let rewrites_input = matches!(action, Action::ClearSearch | Action::PickSuggestion(_));
        app.dispatch(action);
        log::debug!(
            "view: gen={} filter={} sort={} search={:?}",
            app.ui.generation,
            app.ui.filter.as_str(),
            app.ui.sort.as_str(),
            app.ui.search
        );
        let mut html = render_grid(app);
        html.push_str(&render_controls(app, true));
        html.push_str(&suggestions_oob(app));
        if rewrites_input {
            html.push_str(&search_input_script(&app.ui.search));
        }
        html
    })
}

// ── POST /api/keyboard ─────────────────────────────────────────────

/// Handle POST /api/keyboard with `key=` and `ctrl=true|false`.
/// Everything in the response is out-of-band, so the bridge can swap "none".
pub fn handle_keyboard_post(body: &str) -> String {
    let params = parse_form_body(body);
    let key = get_param(&params, "key").unwrap_or("").to_string();
    let ctrl = get_param(&params, "ctrl") == Some("true");

    with_app_mut(|app| {
        let command = resolve_key(&app.ui, &key, ctrl);
        app.dispatch(Action::Key { key, ctrl });
        match command {
            KeyCommand::FocusSearch => {
                r#"<script>(function(){var i=document.getElementById('search-input');if(i)i.focus();})();</script>"#
                    .to_string()
            }
            KeyCommand::CloseDetail => r#"<div id="detail-modal" hx-swap-oob="true"></div>"#.to_string(),
            KeyCommand::CloseStats => r#"<div id="stats-modal" hx-swap-oob="true"></div>"#.to_string(),
            KeyCommand::ClearSearch => {
                let mut html = render_grid_oob(app);
                html.push_str(&render_controls(app, true));
                html.push_str(&suggestions_oob(app));
                html.push_str(&search_input_script(""));
                html
            }
            KeyCommand::None => String::new(),
        }
    })
}

// ── POST /api/theme ────────────────────────────────────────────────

/// Handle POST /api/theme. With `saved=` the stored preference is restored,
/// otherwise the theme flips. The response persists and applies it.
pub fn handle_theme_post(body: &str) -> String {
    let params = parse_form_body(body);
    with_app_mut(|app| {
        match get_param(&params, "saved") {
            Some(saved) => app.dispatch(Action::SetTheme(local::decode_theme(Some(saved)))),
            None => app.dispatch(Action::ToggleTheme),
        }
        let dark = app.ui.dark_mode;
        format!(
            r#"<button id="theme-toggle" hx-post="/api/theme" hx-swap="outerHTML" title="Toggle theme"
  class="p-2 rounded-full bg-white dark:bg-slate-800 shadow-sm text-xl">{icon}</button>
{script}"#,
            icon = if dark { "☀️" } else { "🌙" },
            script = local::theme_script(dark),
        )
    })
}
