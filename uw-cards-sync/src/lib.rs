//! Fetching, file I/O and the per-locale sync pipeline.
//!
//! `uw-cards-core` decides how cards are merged; this crate feeds it the
//! upstream API response and the curated spreadsheet, writes the merged and
//! missing-card files, and keeps the local image cache filled.

pub mod client;
pub mod error;
pub mod files;
pub mod images;
pub mod pipeline;
pub mod progress;
pub mod settings;

pub use client::{HttpClient, UpstreamClient};
pub use error::{SettingsError, SyncError};
pub use images::{ImageCache, ImageOutcome, ImageStats};
pub use pipeline::{LocaleOutcome, LocalePaths, LocaleReport, SyncOptions, sync_all, sync_locale};
pub use progress::{SilentProgress, SyncProgress};
pub use settings::{Settings, settings_path};
