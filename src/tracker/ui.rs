//! Screen state and the reducer that drives it.
//!
//! Routes never poke fields directly: they build an [`Action`] and swap in
//! the result of [`reduce`].

use crate::tracker::generation::{self, Generation};
use crate::tracker::view::{SortOrder, StatusFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Success }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Info }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub dark_mode: bool,
    pub search: String,
    pub show_suggestions: bool,
    pub filter: StatusFilter,
    pub sort: SortOrder,
    pub generation: u8,
    pub visible_count: usize,
    pub selected_species: Option<u32>,
    pub show_stats: bool,
    pub toast: Option<Toast>,
}

impl UiState {
    pub fn new(page_size: usize) -> Self {
        Self {
            dark_mode: false,
            search: String::new(),
            show_suggestions: false,
            filter: StatusFilter::All,
            sort: SortOrder::IdAsc,
            generation: 0,
            visible_count: page_size,
            selected_species: None,
            show_stats: false,
            toast: None,
        }
    }

    pub fn generation(&self) -> &'static Generation {
        generation::by_id(self.generation)
    }

    /// Names the bulk-action scope in confirmation prompts.
    pub fn scope_label(&self) -> &'static str {
        if self.search.is_empty() {
            self.generation().name
        } else {
            "search"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetSearch(String),
    ClearSearch,
    PickSuggestion(String),
    SetFilter(StatusFilter),
    SetSort(SortOrder),
    SelectGeneration(u8),
    ReachedEnd,
    OpenDetail(u32),
    CloseDetail,
    OpenStats,
    CloseStats,
    ToggleTheme,
    SetTheme(bool),
    ShowToast(Toast),
    DismissToast,
    Key { key: String, ctrl: bool },
}

/// What a key press means in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    FocusSearch,
    CloseDetail,
    CloseStats,
    ClearSearch,
    None,
}

pub fn resolve_key(state: &UiState, key: &str, ctrl: bool) -> KeyCommand {
    let detail_open = state.selected_species.is_some();
    match key {
        "/" if !detail_open => KeyCommand::FocusSearch,
        "k" | "K" if ctrl && !detail_open => KeyCommand::FocusSearch,
        "Escape" if detail_open => KeyCommand::CloseDetail,
        "Escape" if state.show_stats => KeyCommand::CloseStats,
        "Escape" if !state.search.is_empty() => KeyCommand::ClearSearch,
        _ => KeyCommand::None,
    }
}

pub fn reduce(state: &UiState, action: Action, page_size: usize) -> UiState {
    let mut next = state.clone();
    match action {
        Action::SetSearch(text) => {
            next.show_suggestions = !text.is_empty();
            next.search = text;
            next.visible_count = page_size;
        }
        Action::ClearSearch => {
            next.search.clear();
            next.show_suggestions = false;
            next.visible_count = page_size;
        }
        Action::PickSuggestion(name) => {
            next.search = name;
            next.show_suggestions = false;
            next.visible_count = page_size;
        }
        Action::SetFilter(filter) => {
            next.filter = filter;
            next.visible_count = page_size;
        }
        Action::SetSort(sort) => next.sort = sort,
        Action::SelectGeneration(id) => {
            next.generation = generation::by_id(id).id;
            next.filter = StatusFilter::All;
            next.sort = SortOrder::IdAsc;
            next.visible_count = page_size;
        }
        Action::ReachedEnd => next.visible_count = state.visible_count.saturating_add(page_size),
        Action::OpenDetail(id) => next.selected_species = Some(id),
        Action::CloseDetail => next.selected_species = None,
        Action::OpenStats => next.show_stats = true,
        Action::CloseStats => next.show_stats = false,
        Action::ToggleTheme => next.dark_mode = !state.dark_mode,
        Action::SetTheme(dark) => next.dark_mode = dark,
        Action::ShowToast(toast) => next.toast = Some(toast),
        Action::DismissToast => next.toast = None,
        Action::Key { key, ctrl } => {
            return match resolve_key(state, &key, ctrl) {
                KeyCommand::CloseDetail => reduce(state, Action::CloseDetail, page_size),
                KeyCommand::CloseStats => reduce(state, Action::CloseStats, page_size),
                KeyCommand::ClearSearch => reduce(state, Action::ClearSearch, page_size),
                KeyCommand::FocusSearch => {
                    next.show_suggestions = !state.search.is_empty();
                    next
                }
                KeyCommand::None => next,
            };
        }
    }
    next
}
