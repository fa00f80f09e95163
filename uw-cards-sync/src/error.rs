use uw_cards_core::{ReconcileError, SchemaError};

/// Errors that abort a locale's sync.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("Cannot read {path}: {source}")]
    LocalSheet {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: String, column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl SyncError {
    pub fn local_sheet(path: impl AsRef<std::path::Path>, source: csv::Error) -> Self {
        Self::LocalSheet {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Errors loading the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Set prefix key '{0}' is not a set id")]
    InvalidSetId(String),

    #[error("Locale '{0}' is not configured")]
    UnknownLocale(String),
}
