//! `/api/detail`: the species detail modal.
//!
//! The bridge gathers `/pokemon/{id}`, each `/type/{name}`, the species
//! record, and its evolution chain, then posts them as one JSON bundle.

use crate::catalog::detail::{self, BaseStat, DetailBundle};
use crate::catalog::evolution::EvolutionNode;
use crate::catalog;
use crate::config::{self, TrackerConfig};
use crate::names::{clean_name, dex_number};
use crate::routes::util::escape_html;
use crate::tracker::state::with_app_mut;
use crate::tracker::ui::Action;

pub fn type_color(name: &str) -> &'static str {
    match name {
        "normal" => "bg-neutral-400",
        "fire" => "bg-red-500",
        "water" => "bg-blue-500",
        "electric" => "bg-yellow-400",
        "grass" => "bg-green-500",
        "ice" => "bg-cyan-300",
        "fighting" => "bg-red-700",
        "poison" => "bg-purple-500",
        "ground" => "bg-amber-600",
        "flying" => "bg-indigo-400",
        "psychic" => "bg-pink-500",
        "bug" => "bg-lime-500",
        "rock" => "bg-yellow-700",
        "ghost" => "bg-purple-800",
        "dragon" => "bg-indigo-700",
        "steel" => "bg-zinc-400",
        "fairy" => "bg-pink-300",
        _ => "bg-gray-400",
    }
}

fn stat_color(name: &str) -> &'static str {
    match name {
        "hp" => "bg-green-500",
        "attack" => "bg-red-500",
        "defense" => "bg-blue-500",
        "special-attack" => "bg-pink-500",
        "special-defense" => "bg-purple-500",
        "speed" => "bg-cyan-500",
        _ => "bg-slate-500",
    }
}

fn type_badges(types: &[String], size: &str) -> String {
    types
        .iter()
        .map(|t| {
            format!(
                r#"<span class="{color} text-white px-3 py-1 rounded-full {size} font-bold uppercase">{name}</span>"#,
                color = type_color(t),
                size = size,
                name = escape_html(t),
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn render_stat(stat: &BaseStat) -> String {
    format!(
        r#"
      <div class="flex items-center gap-3 text-xs md:text-sm">
        <span class="w-10 font-bold text-slate-500 dark:text-slate-400 uppercase text-right">{label}</span>
        <div class="flex-1 h-3 bg-slate-100 dark:bg-slate-700 rounded-full overflow-hidden">
          <div class="h-full {color}" style="width: {width:.2}%"></div>
        </div>
        <span class="w-8 font-bold text-slate-700 dark:text-slate-200 text-left">{value}</span>
      </div>"#,
        label = escape_html(stat.label()),
        color = stat_color(&stat.name),
        width = stat.bar_percent(),
        value = stat.base_stat,
    )
}

/// One chain stage and, recursively, its branches.
fn render_evolution(config: &TrackerConfig, node: &EvolutionNode) -> String {
    let sprite = match node.species_id() {
        Some(id) => format!(
            r#"<img src="{}" alt="{}" class="w-16 h-16 object-contain" onerror="this.style.display='none'">"#,
            catalog::sprite_url(config, id),
            escape_html(&node.species_name)
        ),
        None => String::new(),
    };
    let mut html = format!(
        r#"<div class="flex flex-row items-center gap-2 md:gap-4">
  <div class="flex flex-col items-center min-w-[80px]">
    {sprite}
    <span class="capitalize font-bold text-sm text-slate-700 dark:text-slate-200 text-center leading-tight">{name}</span>
  </div>"#,
        sprite = sprite,
        name = escape_html(&node.species_name),
    );
    if !node.evolves_to.is_empty() {
        html.push_str(r#"<div class="flex flex-col gap-2">"#);
        for next in &node.evolves_to {
            html.push_str(&format!(
                r#"<div class="flex flex-row items-center">
    <div class="flex flex-col items-center px-1 md:px-2">
      <span class="text-slate-400 text-lg dark:text-slate-500">&rarr;</span>
      <span class="text-[10px] text-slate-400 dark:text-slate-500 font-mono text-center leading-none max-w-[60px]">{label}</span>
    </div>
    {child}
  </div>"#,
                label = escape_html(&next.transition_label()),
                child = render_evolution(config, next),
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

fn render_modal(bundle: &DetailBundle) -> String {
    let config = config::current();
    let p = &bundle.pokemon;
    let description = bundle
        .species
        .as_ref()
        .and_then(|s| s.flavor_text.as_deref())
        .unwrap_or("No description available.");
    let stats: String = p.stats.iter().map(render_stat).collect();

    let weaknesses = if bundle.weaknesses.is_empty() {
        String::new()
    } else {
        format!(
            r#"
    <div class="mb-6">
      <h3 class="font-bold text-slate-700 dark:text-slate-200 mb-3 text-sm uppercase tracking-wide">Weak Against</h3>
      <div class="flex flex-wrap gap-2">
        {}
      </div>
    </div>"#,
            type_badges(&bundle.weaknesses, "text-xs")
        )
    };

    let evolution = match &bundle.evolution {
        Some(chain) => format!(
            r#"
    <div class="mb-6 bg-slate-50 dark:bg-slate-700/50 p-4 rounded-xl">
      <h3 class="text-center font-bold text-slate-700 dark:text-slate-300 mb-4 uppercase text-xs tracking-wider">Evolution Chain</h3>
      <div class="flex justify-center overflow-x-auto pb-2">{}</div>
    </div>"#,
            render_evolution(&config, chain)
        ),
        None => String::new(),
    };

    let generation = match &bundle.species {
        Some(species) => format!(
            r#"
      <div class="bg-slate-50 dark:bg-slate-700 p-3 rounded-xl text-center col-span-2">
        <span class="block text-xs text-slate-400 dark:text-slate-400 uppercase font-bold">Generation</span>
        <span class="text-lg font-semibold text-slate-700 dark:text-white capitalize">{}</span>
      </div>"#,
            escape_html(&species.generation_label())
        ),
        None => String::new(),
    };

    let regional = match &bundle.species {
        Some(species) if !species.regional_dexes.is_empty() => {
            let badges: String = species
                .regional_dexes
                .iter()
                .map(|dex| {
                    format!(
                        r#"<span class="px-3 py-1 bg-white dark:bg-slate-800 text-blue-600 dark:text-blue-300 border border-blue-200 dark:border-blue-700 text-xs rounded-full capitalize font-semibold shadow-sm">{}</span>"#,
                        escape_html(dex)
                    )
                })
                .collect();
            format!(
                r#"
    <div class="bg-blue-50 dark:bg-blue-900/30 p-5 rounded-xl border border-blue-100 dark:border-blue-800">
      <h3 class="font-bold text-blue-800 dark:text-blue-200 mb-3 text-sm uppercase tracking-wide">Appears in Regional Dexes:</h3>
      <div class="flex flex-wrap gap-2">{}</div>
    </div>"#,
                badges
            )
        }
        _ => String::new(),
    };

    format!(
        r##"<div class="fixed inset-0 bg-black/60 z-50 flex items-center justify-center p-4 backdrop-blur-sm"
  hx-post="/api/detail/close" hx-trigger="click target:this" hx-target="#detail-modal" hx-swap="innerHTML">
  <div class="bg-white dark:bg-slate-800 rounded-2xl shadow-2xl w-full max-w-lg max-h-[90vh] overflow-y-auto relative animate-fade-in-up">
    <button hx-post="/api/detail/close" hx-target="#detail-modal" hx-swap="innerHTML"
      class="absolute top-4 right-4 p-2 bg-gray-100 dark:bg-slate-700 rounded-full hover:bg-gray-200 dark:hover:bg-slate-600 transition z-10">
      <svg class="w-6 h-6 text-gray-600 dark:text-gray-300" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/></svg>
    </button>
    <div class="p-6">
    <div class="text-center mb-6 border-b dark:border-slate-700 pb-6 border-gray-100">
      <img src="{artwork}" alt="{name}" class="w-48 h-48 mx-auto mb-4 drop-shadow-md">
      <h2 class="text-3xl font-bold capitalize text-slate-800 dark:text-white">{display}</h2>
      <p class="text-slate-400 font-mono text-sm">{dex}</p>
      <div class="flex justify-center gap-2 mt-3">
        {types}
      </div>
      <p class="mt-4 text-slate-600 dark:text-slate-300 italic leading-relaxed">"{description}"</p>
    </div>
    <div class="mb-6">
      <h3 class="font-bold text-slate-700 dark:text-slate-200 mb-3 text-sm uppercase tracking-wide">Base Stats</h3>
      <div class="space-y-2">{stats}
      </div>
    </div>{weaknesses}{evolution}
    <div class="grid grid-cols-2 gap-4 mb-6">
      <div class="bg-slate-50 dark:bg-slate-700 p-3 rounded-xl text-center">
        <span class="block text-xs text-slate-400 dark:text-slate-400 uppercase font-bold">Height</span>
        <span class="text-lg font-semibold text-slate-700 dark:text-white">{height} m</span>
      </div>
      <div class="bg-slate-50 dark:bg-slate-700 p-3 rounded-xl text-center">
        <span class="block text-xs text-slate-400 dark:text-slate-400 uppercase font-bold">Weight</span>
        <span class="text-lg font-semibold text-slate-700 dark:text-white">{weight} kg</span>
      </div>{generation}
    </div>{regional}
    <div class="mt-6 text-center">
      <a href="https://bulbapedia.bulbagarden.net/wiki/{name}_(Pok%C3%A9mon)" target="_blank" rel="noreferrer"
        class="text-blue-500 dark:text-blue-400 hover:text-blue-700 dark:hover:text-blue-300 hover:underline text-sm font-medium">Full details on Bulbapedia &rarr;</a>
    </div>
    </div>
  </div>
</div>"##,
        artwork = catalog::artwork_url(&config, bundle.id, false),
        name = escape_html(&p.name),
        display = escape_html(&clean_name(&p.name)),
        dex = dex_number(bundle.id),
        types = type_badges(&p.types, "text-sm"),
        description = escape_html(description),
        stats = stats,
        weaknesses = weaknesses,
        evolution = evolution,
        height = p.height_m(),
        weight = p.weight_kg(),
        generation = generation,
        regional = regional,
    )
}

// ── POST /api/detail ───────────────────────────────────────────────

/// Handle POST /api/detail with the raw JSON bundle as the body.
pub fn handle_open_post(body: &str) -> String {
    let bundle = match detail::parse_bundle(body) {
        Ok(bundle) => bundle,
        Err(e) => {
            log::warn!("detail bundle rejected: {}", e);
            return r#"<div class="p-6 text-center text-red-500">Could not load details.</div>"#.to_string();
        }
    };
    with_app_mut(|app| app.dispatch(Action::OpenDetail(bundle.id)));
    log::debug!("detail opened for {}", dex_number(bundle.id));
    render_modal(&bundle)
}

// ── POST /api/detail/close ─────────────────────────────────────────

pub fn handle_close_post(_body: &str) -> String {
    with_app_mut(|app| app.dispatch(Action::CloseDetail));
    String::new()
}
