use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading resources or building the locale registry.
///
/// Lookups and language switches never produce these: a missing key falls
/// back to the raw key and an unknown locale is rejected with `false`.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("resource bundle {origin} must be a JSON object, found {found}")]
    NotAnObject { origin: String, found: &'static str },

    #[error("unknown locale code: '{0}'")]
    UnknownLocale(String),

    #[error("invalid locale registry: {0}")]
    InvalidRegistry(String),
}
