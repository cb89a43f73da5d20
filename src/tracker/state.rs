//! Worker-lifetime application state.
//!
//! `thread_local!` + `RefCell`: the WASM module is single-threaded and lives
//! as long as the Web Worker, so state persists across `handle_request` calls.

use std::cell::RefCell;

use crate::catalog::Species;
use crate::config;
use crate::tracker::store::CollectionStore;
use crate::tracker::ui::{Action, UiState};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Species index in national dex order. Empty until the bridge posts it.
    pub catalog: Vec<Species>,
    pub store: CollectionStore,
    pub ui: UiState,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            catalog: Vec::new(),
            store: CollectionStore::default(),
            ui: UiState::new(page_size),
        }
    }

    /// Run the UI reducer with the configured page size.
    pub fn dispatch(&mut self, action: Action) {
        let page_size = config::current().page_size;
        self.ui = crate::tracker::ui::reduce(&self.ui, action, page_size);
    }
}

thread_local! {
    static APP: RefCell<AppState> = RefCell::new(AppState::new(config::current().page_size));
}

pub fn with_app<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    APP.with(|s| f(&s.borrow()))
}

pub fn with_app_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    APP.with(|s| f(&mut s.borrow_mut()))
}

/// Drop everything back to a fresh session.
pub fn reset_app() {
    let fresh = AppState::new(config::current().page_size);
    APP.with(|s| *s.borrow_mut() = fresh);
}
