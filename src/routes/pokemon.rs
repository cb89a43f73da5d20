//! `/api/pokemon/*` routes: the card grid with HTMX infinite scroll, per-card
//! toggles, bulk actions, progress bars, and search suggestions.

use crate::catalog::{self, Species};
use crate::config::{self, TrackerConfig};
use crate::names::{capitalize, clean_name, dex_number};
use crate::routes::feedback;
use crate::routes::util::{escape_html, get_param, parse_form_body};
use crate::tracker::state::{AppState, with_app, with_app_mut};
use crate::tracker::stats::{bar_width, percent};
use crate::tracker::ui::{Action, Toast};
use crate::tracker::view::{self, View, ViewQuery};

/// Run the view engine over the current state.
pub fn view_of(app: &AppState) -> View<'_> {
    let query = ViewQuery {
        generation: app.ui.generation(),
        search: &app.ui.search,
        filter: app.ui.filter,
        sort: app.ui.sort,
        visible_count: app.ui.visible_count,
    };
    view::compute_view(&app.catalog, app.store.collection(), &query)
}

// ── Rendering ──────────────────────────────────────────────────────

fn render_card(config: &TrackerConfig, species: &Species, caught: bool, shiny: bool) -> String {
    let id = species.id;
    let name = escape_html(&species.name);
    let frame = if caught {
        "bg-white border-blue-500 dark:border-blue-500 opacity-100 ring-2 ring-blue-100 dark:ring-blue-900"
    } else {
        "bg-white border-transparent opacity-60 grayscale hover:opacity-100 hover:grayscale-0"
    };
    let star = if shiny {
        "text-yellow-400 hover:text-yellow-500"
    } else {
        "text-gray-300 hover:text-yellow-400 dark:text-slate-600"
    };
    let ball = if caught {
        "bg-blue-500 border-blue-600"
    } else {
        "bg-gray-100 border-gray-300 hover:bg-gray-200 dark:bg-slate-700 dark:border-slate-600"
    };
    let check = if caught {
        r#"<svg class="w-3 h-3 text-white" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="3" d="M5 13l4 4L19 7"/></svg>"#
    } else {
        ""
    };

    format!(
        r##"<div id="poke-{id}" data-caught="{caught}" data-shiny="{shiny}"
  onclick="if(window.pokedexCatalog)pokedexCatalog.openDetail({id})"
  class="relative cursor-pointer p-3 rounded-xl border-2 transition-all duration-300 transform hover:scale-105 flex flex-col items-center justify-between shadow-sm group min-h-[160px] dark:bg-slate-800 dark:border-slate-700 {frame}">
  <button hx-post="/api/pokemon/toggle" hx-vals='{{"id":"{id}","field":"shiny"}}' hx-target="#pokemon-grid" hx-swap="innerHTML"
    onclick="event.stopPropagation()" title="Toggle Shiny"
    class="absolute top-2 left-2 p-1 rounded-full transition-colors z-20 {star}">
    <svg class="w-6 h-6 fill-current" viewBox="0 0 24 24"><path d="M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z"/></svg>
  </button>
  <button hx-post="/api/pokemon/toggle" hx-vals='{{"id":"{id}","field":"caught"}}' hx-target="#pokemon-grid" hx-swap="innerHTML"
    onclick="event.stopPropagation()" title="Toggle Caught"
    class="absolute top-2 right-2 w-6 h-6 rounded-full flex items-center justify-center border transition-colors z-20 {ball}">{check}</button>
  <img src="{img}" alt="{name}" loading="lazy"
    class="w-20 h-20 md:w-24 md:h-24 object-contain z-10 transition-transform group-hover:scale-110 mb-2">
  <div class="text-center w-full">
    <span class="font-bold text-slate-700 dark:text-slate-200 capitalize text-sm block leading-tight">{name}</span>
    <span class="text-[10px] text-slate-400 dark:text-slate-500 font-mono block mb-2">{dex}</span>
  </div>
</div>"##,
        id = id,
        caught = caught,
        shiny = shiny,
        frame = frame,
        star = star,
        ball = ball,
        check = check,
        img = catalog::artwork_url(config, id, shiny),
        name = name,
        dex = dex_number(id),
    )
}

/// Sentinel that asks for the next page once it scrolls into view.
fn render_sentinel() -> String {
    r#"<div hx-post="/api/pokemon/more"
     hx-trigger="intersect once threshold:0.3"
     hx-swap="outerHTML"
     class="col-span-full h-16"
     data-scroll-load="true"></div>"#
        .to_string()
}

/// Cards `from..` of the visible slice, followed by a sentinel while more remain.
fn render_cards(app: &AppState, view: &View<'_>, from: usize) -> String {
    let config = config::current();
    let collection = app.store.collection();
    let mut html = String::new();
    for species in view.visible.iter().skip(from) {
        html.push_str(&render_card(
            &config,
            species,
            collection.is_caught(species.id),
            collection.is_shiny(species.id),
        ));
    }
    if view.has_more() {
        html.push_str(&render_sentinel());
    }
    html
}

fn progress_bar(label: &str, caught: usize, total: usize, gradient: &str) -> String {
    format!(
        r#"<div class="mb-3">
  <div class="flex justify-between mb-1 text-sm font-bold">
    <span class="text-slate-700 dark:text-slate-200">{label}</span>
    <span class="text-slate-500 dark:text-slate-400 font-mono">{caught} / {total} <span class="text-green-600 dark:text-green-400 font-bold">({pct}%)</span></span>
  </div>
  <div class="h-6 bg-slate-100 dark:bg-slate-700 rounded-full overflow-hidden border border-slate-200 dark:border-slate-600 relative">
    <div class="h-full bg-gradient-to-r {gradient} transition-all duration-700" style="width: {width:.2}%"></div>
  </div>
</div>"#,
        label = escape_html(label),
        caught = caught,
        total = total,
        pct = percent(caught, total),
        gradient = gradient,
        width = bar_width(caught, total),
    )
}

/// National and in-view progress. `oob` marks it for an out-of-band swap.
pub fn render_progress(app: &AppState, view: &View<'_>, oob: bool) -> String {
    let scope = if app.ui.search.is_empty() {
        app.ui.generation().name.to_string()
    } else {
        format!("Search: {}", app.ui.search)
    };
    format!(
        r#"<div id="progress"{oob}>
{national}{in_view}</div>"#,
        oob = if oob { r#" hx-swap-oob="true""# } else { "" },
        national = progress_bar("Total Progress", view.total_caught, app.catalog.len(), "from-blue-500 to-indigo-600"),
        in_view = progress_bar(&scope, view.in_view_caught, view.in_view_total, "from-green-400 to-emerald-600"),
    )
}

fn render_grid_body(app: &AppState, view: &View<'_>) -> String {
    if app.catalog.is_empty() {
        return r#"<div class="col-span-full text-center py-20 text-slate-400 animate-pulse">Loading Pokédex...</div>"#
            .to_string();
    }
    if view.filtered_len == 0 {
        return r#"<div class="col-span-full text-center py-20 text-slate-400">No Pokémon found.</div>"#
            .to_string();
    }
    render_cards(app, view, 0)
}

/// Full grid body plus the out-of-band progress panel.
pub fn render_grid(app: &AppState) -> String {
    let view = view_of(app);
    let mut html = render_grid_body(app, &view);
    html.push_str(&render_progress(app, &view, true));
    html
}

/// Same as [`render_grid`], with the grid itself swapped out-of-band.
pub fn render_grid_oob(app: &AppState) -> String {
    let view = view_of(app);
    format!(
        r#"<div id="pokemon-grid" hx-swap-oob="innerHTML">{}</div>{}"#,
        render_grid_body(app, &view),
        render_progress(app, &view, true)
    )
}

fn parse_id(params: &[(String, String)]) -> Option<u32> {
    get_param(params, "id")
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|id| *id > 0)
}

// ── GET /api/pokemon ───────────────────────────────────────────────

pub fn handle_grid_get(_query: &str) -> String {
    with_app(render_grid)
}

// ── POST /api/pokemon/more ─────────────────────────────────────────

/// Sentinel fired: grow the page and return only the newly revealed cards.
pub fn handle_more_post(_body: &str) -> String {
    with_app_mut(|app| {
        let shown = app.ui.visible_count;
        app.dispatch(Action::ReachedEnd);
        let view = view_of(app);
        log::debug!("page grown to {} of {}", view.visible.len(), view.filtered_len);
        render_cards(app, &view, shown.min(view.visible.len()))
    })
}

// ── POST /api/pokemon/toggle ───────────────────────────────────────

pub fn handle_toggle_post(body: &str) -> String {
    let params = parse_form_body(body);
    let id = match parse_id(&params) {
        Some(id) => id,
        None => return r#"<span class="text-red-500">Missing or invalid id</span>"#.to_string(),
    };
    let field = get_param(&params, "field").unwrap_or("caught");

    with_app_mut(|app| {
        let notices = match field {
            "shiny" => {
                let (shiny, effects) = app.store.toggle_shiny(id);
                let mut html = feedback::apply_effects(app, effects);
                if shiny {
                    html.push_str(&feedback::show(app, Toast::info("Marked as Shiny!")));
                }
                html
            }
            "caught" => {
                let (caught, effects) = app.store.toggle_caught(id);
                let mut html = feedback::apply_effects(app, effects);
                if caught {
                    let name = app
                        .catalog
                        .iter()
                        .find(|s| s.id == id)
                        .map(|s| s.name.clone())
                        .unwrap_or_else(|| "Pokemon".to_string());
                    html.push_str(&feedback::show(app, Toast::success(format!("Caught {}!", name))));
                }
                html
            }
            other => {
                return format!(r#"<span class="text-red-500">Unknown field: {}</span>"#, escape_html(other));
            }
        };
        log::debug!("toggled {} on #{}", field, id);
        let mut html = render_grid(app);
        html.push_str(&notices);
        html
    })
}

// ── POST /api/pokemon/bulk ─────────────────────────────────────────

/// Catch or release everything the current filter selects (all pages).
pub fn handle_bulk_post(body: &str) -> String {
    let params = parse_form_body(body);
    let caught = match get_param(&params, "action") {
        Some("catch") => true,
        Some("release") => false,
        _ => return r#"<span class="text-red-500">Unknown bulk action</span>"#.to_string(),
    };

    with_app_mut(|app| {
        let ids = view_of(app).filtered_ids;
        log::info!("bulk {} over {} species", if caught { "catch" } else { "release" }, ids.len());
        let effects = app.store.bulk_set(ids, caught);
        let mut html = feedback::apply_effects(app, effects);
        let message = if caught { "Marked all as caught!" } else { "Cleared marks!" };
        html.push_str(&feedback::show(app, Toast::info(message)));
        let mut out = render_grid(app);
        out.push_str(&html);
        out
    })
}

// ── GET /api/pokemon/progress ──────────────────────────────────────

pub fn handle_progress_get(_query: &str) -> String {
    with_app(|app| {
        let view = view_of(app);
        render_progress(app, &view, false)
    })
}

// ── GET /api/search/suggestions ────────────────────────────────────

pub fn handle_suggestions_get(_query: &str) -> String {
    with_app(render_suggestions)
}

/// Suggestion dropdown, or nothing when hidden or too short.
pub fn render_suggestions(app: &AppState) -> String {
    if !app.ui.show_suggestions {
        return String::new();
    }
    let config = config::current();
    let matches = view::suggestions(
        &app.catalog,
        &app.ui.search,
        config.suggestion_min_chars,
        config.suggestion_limit,
    );
    if matches.is_empty() {
        return String::new();
    }
    let mut html = String::from(
        r#"<div class="absolute top-full left-0 w-full mt-2 bg-white dark:bg-slate-800 rounded-xl shadow-xl z-50 overflow-hidden">"#,
    );
    for species in matches {
        let name = escape_html(&species.name);
        html.push_str(&format!(
            r##"
  <div hx-post="/api/view" hx-vals='{{"action":"pick","value":"{name}"}}' hx-target="#pokemon-grid" hx-swap="innerHTML"
    class="px-4 py-3 hover:bg-slate-50 dark:hover:bg-slate-700 cursor-pointer flex items-center gap-3 border-b border-slate-50 dark:border-slate-700">
    <img src="{sprite}" alt="" class="w-8 h-8">
    <span class="capitalize text-slate-700 dark:text-slate-200">{label}</span>
  </div>"##,
            name = name,
            sprite = catalog::sprite_url(&config, species.id),
            label = escape_html(&capitalize(&clean_name(&species.name))),
        ));
    }
    html.push_str("\n</div>");
    html
}
