//! Backup files: pretty JSON download and validated import.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::Result;
use crate::tracker::collection::Collection;

/// `pokedex-backup-YYYY-MM-DD.json`. Characters other than digits and `-`
/// are dropped from the caller's date.
pub fn export_filename(today: &str) -> String {
    let date: String = today
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if date.is_empty() {
        "pokedex-backup.json".to_string()
    } else {
        format!("pokedex-backup-{}.json", date)
    }
}

/// Script that downloads the collection as a pretty-printed JSON file.
pub fn export_script(collection: &Collection, today: &str) -> String {
    let payload = STANDARD.encode(collection.to_json_pretty());
    format!(
        r#"<script>
(function() {{
  var b = new Blob([atob('{payload}')], {{type: 'application/json'}});
  var a = document.createElement('a');
  a.href = URL.createObjectURL(b);
  a.download = '{filename}';
  a.click();
  URL.revokeObjectURL(a.href);
  console.log('[pokedex] Backup exported');
}})();
</script>"#,
        payload = payload,
        filename = export_filename(today)
    )
}

/// Validate an uploaded backup.
pub fn import(contents: &str) -> Result<Collection> {
    Collection::from_json(contents.trim())
}

pub fn invalid_file_script() -> String {
    r#"<script>alert("Invalid file.");</script>"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_carries_date() {
        assert_eq!(export_filename("2024-05-01"), "pokedex-backup-2024-05-01.json");
        assert_eq!(export_filename("2024-05-01'); evil()"), "pokedex-backup-2024-05-01.json");
        assert_eq!(export_filename(""), "pokedex-backup.json");
    }

    #[test]
    fn export_then_import_is_identity() {
        let c = Collection::new()
            .with_caught(1, true)
            .with_shiny(1, true)
            .with_caught(1025, true);
        let script = export_script(&c, "2024-05-01");
        let start = script.find("atob('").unwrap() + 6;
        let end = start + script[start..].find('\'').unwrap();
        let bytes = STANDARD.decode(&script[start..end]).unwrap();
        let json = String::from_utf8(bytes).unwrap();
        assert!(json.contains("\n  \"1\": {"));
        assert_eq!(import(&json).unwrap(), c);
    }

    #[test]
    fn import_rejects_garbage() {
        assert!(import("not json").is_err());
        assert!(import(r#"{"abc": {"caught": true}}"#).is_err());
        assert!(import(r#"{"1": true}"#).is_err());
        assert!(import("{}").unwrap().is_empty());
    }
}
