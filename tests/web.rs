//! Browser smoke test for the exported request handler.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use pokedex_tracker::handle_request;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const INDEX: &str = r#"{"results": [
    {"name": "pichu", "url": "https://pokeapi.co/api/v2/pokemon/172/"},
    {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon/25/"}
]}"#;

#[wasm_bindgen_test]
fn unknown_route_is_404() {
    assert!(handle_request("GET", "/api/nope", "", "").contains("404"));
}

#[wasm_bindgen_test]
fn catalog_toggle_and_export() {
    let grid = handle_request("POST", "/api/catalog", "", INDEX);
    assert!(grid.contains(r#"id="poke-2""#));

    let html = handle_request("POST", "/api/pokemon/toggle", "", "id=2&field=caught");
    assert!(html.contains("Caught pikachu!"));
    assert!(html.contains("localStorage.setItem"));

    let export = handle_request("GET", "/api/collection/export", "?today=2025-01-01", "");
    assert!(export.contains("pokedex-backup-2025-01-01.json"));
}
