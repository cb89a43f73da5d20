//! Local-storage persistence for the signed-out collection and the theme.

use super::js_string;
use crate::config;

/// Saved theme flag. Anything but `"true"` reads as light mode.
pub fn decode_theme(saved: Option<&str>) -> bool {
    saved.map(str::trim) == Some("true")
}

pub fn encode_theme(dark: bool) -> &'static str {
    if dark { "true" } else { "false" }
}

/// Write the serialized collection under the configured key.
pub fn save_collection_script(json: &str) -> String {
    let key = config::current().collection_key;
    format!(
        r#"<script>
localStorage.setItem({key}, {value});
console.log('[pokedex] Collection saved locally');
</script>"#,
        key = js_string(&key),
        value = js_string(json)
    )
}

/// Persist the theme flag and apply it to the document root.
pub fn theme_script(dark: bool) -> String {
    let key = config::current().theme_key;
    format!(
        r#"<script>
localStorage.setItem({key}, '{value}');
document.documentElement.classList.{op}('dark');
</script>"#,
        key = js_string(&key),
        value = encode_theme(dark),
        op = if dark { "add" } else { "remove" }
    )
}
