use thiserror::Error;

use uw_cards_sync::{SettingsError, SyncError};

/// Errors that stop the CLI before any locale runs.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Settings file or locale selection error
    #[error("Config error: {0}")]
    Config(#[from] SettingsError),

    /// HTTP client could not be built
    #[error("{0}")]
    Sync(#[from] SyncError),

    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
