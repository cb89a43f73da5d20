//! Collection tracking: the store, the view engine, and the screen state
//! that sits on top of them.

pub mod collection;
pub mod generation;
pub mod state;
pub mod stats;
pub mod store;
pub mod ui;
pub mod view;
