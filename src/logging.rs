//! Routes `log` records to the browser console.
//!
//! The backend is installed on the first request the worker handles. The
//! level can be changed afterwards through the `log_level` config key.

use std::cell::Cell;

use log::Level;

use crate::error::{Result, TrackerError};

/// Parse a level name (`error`, `warn`, `info`, `debug`, `trace`), any case.
pub fn parse_level(name: &str) -> Result<Level> {
    name.trim()
        .parse::<Level>()
        .map_err(|_| TrackerError::Config(format!("unknown log level: {}", name)))
}

/// Install the console backend at `level`. A second call only moves the
/// level.
#[cfg(target_arch = "wasm32")]
pub fn install(level: Level) {
    if console_log::init_with_level(level).is_err() {
        set_level(level);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn install(level: Level) {
    set_level(level);
}

thread_local! {
    static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Install the backend at `info` unless this worker already did.
pub fn ensure_installed() {
    if !INSTALLED.with(|flag| flag.replace(true)) {
        install(Level::Info);
        log::info!("pokedex tracker worker ready");
    }
}

pub fn set_level(level: Level) {
    log::set_max_level(level.to_level_filter());
}
