//! `/api/stats`: the collection stats modal.

use crate::routes::util::{get_param, parse_query};
use crate::tracker::state::{AppState, with_app_mut};
use crate::tracker::stats::{self, GenerationProgress};
use crate::tracker::ui::Action;

fn render_generation_row(row: &GenerationProgress) -> String {
    let pct = row.percent();
    format!(
        r#"
    <div class="bg-slate-50 dark:bg-slate-700/50 p-3 rounded-lg flex items-center gap-4">
      <span class="w-16 font-bold text-slate-600 dark:text-slate-300">{name}</span>
      <div class="flex-1 h-3 bg-slate-200 dark:bg-slate-600 rounded-full overflow-hidden">
        <div class="h-full bg-blue-500" style="width: {pct}%"></div>
      </div>
      <span class="text-sm font-mono text-slate-500 dark:text-slate-400 w-24 text-right">{caught}/{total} ({pct}%)</span>
    </div>"#,
        name = row.generation.name,
        pct = pct,
        caught = row.caught,
        total = row.total,
    )
}

fn render_modal(app: &AppState) -> String {
    let collection = app.store.collection();
    let summary = stats::summarize(&app.catalog, collection);
    let rows: String = stats::by_generation(collection)
        .iter()
        .map(render_generation_row)
        .collect();

    format!(
        r##"<div class="fixed inset-0 bg-black/60 z-50 flex items-center justify-center p-4 backdrop-blur-sm"
  hx-get="/api/stats?action=close" hx-trigger="click target:this" hx-target="#stats-modal" hx-swap="innerHTML">
  <div class="bg-white dark:bg-slate-800 rounded-2xl shadow-2xl w-full max-w-2xl max-h-[90vh] overflow-y-auto p-6 relative">
    <button hx-get="/api/stats?action=close" hx-target="#stats-modal" hx-swap="innerHTML"
      class="absolute top-4 right-4 text-slate-400 hover:text-slate-600 dark:hover:text-slate-200">
      <svg class="w-6 h-6" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/></svg>
    </button>
    <h2 class="text-3xl font-bold mb-6 text-slate-800 dark:text-white text-center">Collection Stats</h2>
    <div class="grid grid-cols-1 md:grid-cols-3 gap-4 mb-8">
      <div class="bg-blue-50 dark:bg-blue-900/30 p-4 rounded-xl text-center border border-blue-100 dark:border-blue-800">
        <span class="block text-3xl font-bold text-blue-600 dark:text-blue-400">{caught}</span>
        <span class="text-sm text-slate-500 dark:text-slate-400 font-bold uppercase">Total Caught</span>
      </div>
      <div class="bg-yellow-50 dark:bg-yellow-900/30 p-4 rounded-xl text-center border border-yellow-100 dark:border-yellow-800">
        <span class="block text-3xl font-bold text-yellow-600 dark:text-yellow-400">{shiny}</span>
        <span class="text-sm text-slate-500 dark:text-slate-400 font-bold uppercase">Total Shinies</span>
      </div>
      <div class="bg-green-50 dark:bg-green-900/30 p-4 rounded-xl text-center border border-green-100 dark:border-green-800">
        <span class="block text-3xl font-bold text-green-600 dark:text-green-400">{completion}%</span>
        <span class="text-sm text-slate-500 dark:text-slate-400 font-bold uppercase">Completion</span>
      </div>
    </div>
    <h3 class="text-xl font-bold mb-4 text-slate-700 dark:text-slate-200">Progress by Generation</h3>
    <div class="space-y-4">{rows}
    </div>
  </div>
</div>"##,
        caught = summary.caught,
        shiny = summary.shiny,
        completion = summary.completion(),
        rows = rows,
    )
}

/// Handle GET /api/stats. `?action=close` closes the modal; anything else
/// opens it with fresh numbers.
pub fn handle(query: &str) -> String {
    let params = parse_query(query);
    with_app_mut(|app| {
        if get_param(&params, "action") == Some("close") {
            app.dispatch(Action::CloseStats);
            return String::new();
        }
        app.dispatch(Action::OpenStats);
        render_modal(app)
    })
}
