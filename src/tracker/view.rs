//! View/filter engine.
//!
//! `compute_view` is a pure function of the catalog, the collection, and the
//! view parameters. It is cheap enough to rerun after every state change.

use std::cmp::Ordering;

use crate::catalog::Species;
use crate::tracker::collection::Collection;
use crate::tracker::generation::Generation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Caught,
    Missing,
    Shiny,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [Self::All, Self::Caught, Self::Missing, Self::Shiny];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "caught" => Some(Self::Caught),
            "missing" => Some(Self::Missing),
            "shiny" => Some(Self::Shiny),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Caught => "Caught",
            Self::Missing => "Missing",
            Self::Shiny => "Shiny",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Caught => "caught",
            Self::Missing => "missing",
            Self::Shiny => "shiny",
        }
    }

    fn admits(&self, collection: &Collection, id: u32) -> bool {
        match self {
            Self::All => true,
            Self::Caught => collection.is_caught(id),
            Self::Missing => !collection.is_caught(id),
            Self::Shiny => collection.is_shiny(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    IdAsc,
    IdDesc,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [Self::IdAsc, Self::IdDesc, Self::NameAsc, Self::NameDesc];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id-asc" => Some(Self::IdAsc),
            "id-desc" => Some(Self::IdDesc),
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdAsc => "id-asc",
            Self::IdDesc => "id-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::IdAsc => "Lowest #",
            Self::IdDesc => "Highest #",
            Self::NameAsc => "A-Z",
            Self::NameDesc => "Z-A",
        }
    }

    fn compare(&self, a: &Species, b: &Species) -> Ordering {
        match self {
            Self::IdAsc => a.id.cmp(&b.id),
            Self::IdDesc => b.id.cmp(&a.id),
            Self::NameAsc => locale_cmp(&a.name, &b.name).then(a.id.cmp(&b.id)),
            Self::NameDesc => locale_cmp(&b.name, &a.name).then(b.id.cmp(&a.id)),
        }
    }
}

/// Collation key: lower-cased with the Latin-1 accented vowels, `ç`, `ñ` and
/// `ý` folded, so `"Flabébé"` sorts next to `"flabebe"`. Other scripts and
/// marks compare by code point. PokeAPI slugs are ASCII apart from a few
/// accented Latin names.
fn collation_key(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'ç' => 'c',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ñ' => 'n',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ý' | 'ÿ' => 'y',
            other => other,
        })
        .collect()
}

/// Name comparison: folded key first, raw text as the tie-breaker. Not a full
/// Unicode collation; `collation_key` lists what folds.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b)).then_with(|| a.cmp(b))
}

/// Everything the engine needs besides the data itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewQuery<'a> {
    pub generation: &'a Generation,
    pub search: &'a str,
    pub filter: StatusFilter,
    pub sort: SortOrder,
    pub visible_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    /// First `visible_count` entries of the filtered, sorted list.
    pub visible: Vec<&'a Species>,
    /// Length of the filtered list before pagination.
    pub filtered_len: usize,
    /// Every id in the filtered list, in display order.
    pub filtered_ids: Vec<u32>,
    pub total_caught: usize,
    pub total_shiny: usize,
    pub in_view_caught: usize,
    pub in_view_total: usize,
}

impl View<'_> {
    pub fn has_more(&self) -> bool {
        self.visible.len() < self.filtered_len
    }
}

/// Case-insensitive substring match on the species name.
pub fn matches_search(species: &Species, search: &str) -> bool {
    species.name.to_lowercase().contains(&search.to_lowercase())
}

/// Base set: search results when searching, otherwise the generation band.
pub fn base_set<'a>(catalog: &'a [Species], generation: &Generation, search: &str) -> Vec<&'a Species> {
    if search.is_empty() {
        catalog.iter().filter(|s| generation.contains(s.id)).collect()
    } else {
        catalog.iter().filter(|s| matches_search(s, search)).collect()
    }
}

pub fn compute_view<'a>(catalog: &'a [Species], collection: &Collection, query: &ViewQuery<'_>) -> View<'a> {
    let base = base_set(catalog, query.generation, query.search);
    let in_view_total = base.len();
    let in_view_caught = base.iter().filter(|s| collection.is_caught(s.id)).count();

    let mut filtered: Vec<&Species> = base
        .into_iter()
        .filter(|s| query.filter.admits(collection, s.id))
        .collect();
    filtered.sort_by(|a, b| query.sort.compare(a, b));

    let filtered_len = filtered.len();
    let filtered_ids = filtered.iter().map(|s| s.id).collect();
    filtered.truncate(query.visible_count);

    View {
        visible: filtered,
        filtered_len,
        filtered_ids,
        total_caught: catalog.iter().filter(|s| collection.is_caught(s.id)).count(),
        total_shiny: catalog.iter().filter(|s| collection.is_shiny(s.id)).count(),
        in_view_caught,
        in_view_total,
    }
}

/// Up to `limit` species in catalog order, once `search` has `min_chars`.
pub fn suggestions<'a>(catalog: &'a [Species], search: &str, min_chars: usize, limit: usize) -> Vec<&'a Species> {
    if search.chars().count() < min_chars {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|s| matches_search(s, search))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::generation::{self, GENERATIONS};

    fn catalog() -> Vec<Species> {
        [
            "bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon", "charizard",
            "squirtle", "wartortle", "blastoise", "caterpie",
        ]
        .iter()
        .enumerate()
        .map(|(i, name)| Species {
            id: i as u32 + 1,
            name: name.to_string(),
            url: format!("https://pokeapi.co/api/v2/pokemon/{}/", i + 1),
        })
        .collect()
    }

    fn query<'a>(search: &'a str, filter: StatusFilter, sort: SortOrder) -> ViewQuery<'a> {
        ViewQuery {
            generation: generation::all(),
            search,
            filter,
            sort,
            visible_count: 50,
        }
    }

    fn ids(view: &View<'_>) -> Vec<u32> {
        view.visible.iter().map(|s| s.id).collect()
    }

    #[test]
    fn bulk_caught_then_filter_returns_scope() {
        let cat = catalog();
        let scope = [4, 5, 6];
        let c = Collection::new().with_caught_all(scope, true);
        let view = compute_view(&cat, &c, &query("", StatusFilter::Caught, SortOrder::IdAsc));
        assert_eq!(ids(&view), vec![4, 5, 6]);
    }

    #[test]
    fn missing_is_complement_of_caught() {
        let cat = catalog();
        let c = Collection::new().with_caught_all([1, 2], true);
        let view = compute_view(&cat, &c, &query("", StatusFilter::Missing, SortOrder::IdAsc));
        assert_eq!(ids(&view), (3..=10).collect::<Vec<_>>());
    }

    #[test]
    fn shiny_filter_ignores_caught() {
        let cat = catalog();
        let c = Collection::new().with_shiny(7, true).with_caught(8, true);
        let view = compute_view(&cat, &c, &query("", StatusFilter::Shiny, SortOrder::IdAsc));
        assert_eq!(ids(&view), vec![7]);
    }

    #[test]
    fn id_desc_reverses_id_asc() {
        let cat = catalog();
        let c = Collection::new();
        let asc = ids(&compute_view(&cat, &c, &query("", StatusFilter::All, SortOrder::IdAsc)));
        let mut desc = ids(&compute_view(&cat, &c, &query("", StatusFilter::All, SortOrder::IdDesc)));
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn name_sort_is_alphabetical() {
        let cat = catalog();
        let view = compute_view(&cat, &Collection::new(), &query("char", StatusFilter::All, SortOrder::NameAsc));
        let names: Vec<_> = view.visible.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["charizard", "charmander", "charmeleon"]);
        let view = compute_view(&cat, &Collection::new(), &query("char", StatusFilter::All, SortOrder::NameDesc));
        assert_eq!(view.visible[0].name, "charmeleon");
    }

    #[test]
    fn locale_cmp_folds_case_and_accents() {
        assert_eq!(locale_cmp("Flabébé", "flabebe"), Ordering::Less);
        assert_eq!(locale_cmp("flabébé", "floette"), Ordering::Less);
        assert_eq!(locale_cmp("Zubat", "abra"), Ordering::Greater);
        // Outside Latin-1 there is no folding.
        assert_eq!(locale_cmp("ő", "p"), Ordering::Greater);
    }

    #[test]
    fn search_overrides_generation() {
        let cat = catalog();
        let gen2 = generation::by_id(2);
        let mut q = query("SAUR", StatusFilter::All, SortOrder::IdAsc);
        q.generation = gen2;
        let view = compute_view(&cat, &Collection::new(), &q);
        assert_eq!(ids(&view), vec![1, 2, 3]);
        assert_eq!(view.in_view_total, 3);
    }

    #[test]
    fn generation_scopes_base_set() {
        let cat: Vec<Species> = (1..=300)
            .map(|id| Species { id, name: format!("mon{}", id), url: String::new() })
            .collect();
        let mut q = query("", StatusFilter::All, SortOrder::IdAsc);
        q.generation = &GENERATIONS[2];
        q.visible_count = 1000;
        let view = compute_view(&cat, &Collection::new(), &q);
        assert_eq!(view.filtered_len, 100);
        assert_eq!(view.visible.first().map(|s| s.id), Some(152));
        assert_eq!(view.visible.last().map(|s| s.id), Some(251));
    }

    #[test]
    fn pagination_truncates_but_counts_do_not() {
        let cat = catalog();
        let c = Collection::new().with_caught_all(1..=10, true).with_shiny(2, true);
        let mut q = query("", StatusFilter::All, SortOrder::IdAsc);
        q.visible_count = 4;
        let view = compute_view(&cat, &c, &q);
        assert_eq!(view.visible.len(), 4);
        assert_eq!(view.filtered_len, 10);
        assert_eq!(view.filtered_ids.len(), 10);
        assert!(view.has_more());
        assert_eq!(view.total_caught, 10);
        assert_eq!(view.total_shiny, 1);
        assert_eq!(view.in_view_caught, 10);
    }

    #[test]
    fn in_view_counts_ignore_status_filter() {
        let cat = catalog();
        let c = Collection::new().with_caught(1, true);
        let view = compute_view(&cat, &c, &query("", StatusFilter::Missing, SortOrder::IdAsc));
        assert_eq!(view.in_view_total, 10);
        assert_eq!(view.in_view_caught, 1);
        assert_eq!(view.filtered_len, 9);
    }

    #[test]
    fn empty_search_result() {
        let cat = catalog();
        let view = compute_view(&cat, &Collection::new(), &query("mewtwo", StatusFilter::All, SortOrder::IdAsc));
        assert!(view.visible.is_empty());
        assert_eq!(view.in_view_total, 0);
        assert!(!view.has_more());
    }

    #[test]
    fn suggestions_need_two_chars() {
        let cat = catalog();
        assert!(suggestions(&cat, "c", 2, 5).is_empty());
        let s = suggestions(&cat, "ch", 2, 5);
        assert_eq!(s.len(), 3);
        let capped = suggestions(&cat, "a", 1, 5);
        assert_eq!(capped.len(), 5);
        assert_eq!(capped[0].name, "bulbasaur");
    }

    #[test]
    fn one_char_search_still_filters() {
        let cat = catalog();
        let view = compute_view(&cat, &Collection::new(), &query("z", StatusFilter::All, SortOrder::IdAsc));
        assert_eq!(ids(&view), vec![6]);
    }
}
