//! Error type shared by the catalog, persistence and tracker layers.
//!
//! Routes never surface these to the bridge as failures: `handle_request`
//! always answers with a fragment, so every error is turned into either a
//! degraded view, a toast, or a blocking alert at the route boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// Payload was not valid JSON or did not match the expected shape.
    #[error("JSON error in {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Imported collection file parsed but failed validation.
    #[error("Invalid import: {0}")]
    InvalidImport(String),

    /// Catalog data was structurally valid JSON but semantically unusable.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration override could not be applied.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TrackerError {
    /// Wrap a serde_json error with the payload it came from.
    pub fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_names_context() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = TrackerError::json("species index", source);
        assert!(err.to_string().starts_with("JSON error in species index"));
    }

    #[test]
    fn import_error_display() {
        let err = TrackerError::InvalidImport("id 0 is not a dex number".to_string());
        assert_eq!(err.to_string(), "Invalid import: id 0 is not a dex number");
    }
}
