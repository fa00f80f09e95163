//! Per-locale sync: fetch, adapt, read the spreadsheet, reconcile, write the
//! outputs and fill the image cache.
//!
//! Output files are only written once reconciliation has succeeded, and the
//! two are renamed into place together, so a locale that fails leaves the
//! previous run's files untouched.

use std::path::{Path, PathBuf};

use uw_cards_core::{Reconciler, adapt_cards};

use crate::client::UpstreamClient;
use crate::error::SyncError;
use crate::files;
use crate::images::{ImageCache, ImageStats};
use crate::progress::SyncProgress;
use crate::settings::Settings;

/// Run-time options that are not part of the settings file.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory holding the spreadsheets, outputs and image cache
    pub data_dir: PathBuf,
    /// Skip the image cache pass when false
    pub fetch_images: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            fetch_images: true,
        }
    }
}

/// File locations for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePaths {
    /// Curated spreadsheet, `cards-<locale>.csv`
    pub local: PathBuf,
    /// Merged output, `cards-<locale>.json`
    pub merged: PathBuf,
    /// Unmatched upstream cards, `cards-Missing-<locale>.csv`
    pub missing: PathBuf,
}

impl LocalePaths {
    pub fn new(data_dir: &Path, locale: &str) -> Self {
        Self {
            local: data_dir.join(format!("cards-{locale}.csv")),
            merged: data_dir.join(format!("cards-{locale}.json")),
            missing: data_dir.join(format!("cards-Missing-{locale}.csv")),
        }
    }
}

/// Summary of a successful locale sync.
#[derive(Debug, Clone)]
pub struct LocaleReport {
    pub locale: String,
    pub upstream: usize,
    pub merged: usize,
    pub missing: usize,
    pub conflicts: usize,
    pub name_mismatches: usize,
    /// `None` when images were not requested
    pub images: Option<ImageStats>,
    pub paths: LocalePaths,
}

/// Result of one locale within a full run.
#[derive(Debug)]
pub struct LocaleOutcome {
    pub locale: String,
    pub result: Result<LocaleReport, SyncError>,
}

/// Sync a single locale.
pub fn sync_locale(
    client: &dyn UpstreamClient,
    settings: &Settings,
    locale: &str,
    options: &SyncOptions,
    progress: &dyn SyncProgress,
) -> Result<LocaleReport, SyncError> {
    let tables = settings.tables()?;
    let paths = LocalePaths::new(&options.data_dir, locale);

    progress.on_phase(&format!("Fetching {locale} cards"));
    let raw = match client.fetch_cards(locale) {
        Ok(raw) => raw,
        // Treated as an empty upstream set; the reconciler rejects it below.
        Err(SyncError::UpstreamStatus { status, url }) => {
            log::error!("Error ({status}) fetching upstream cards from {url}");
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    let upstream = adapt_cards(raw)?;

    let local = files::read_local_cards(&paths.local, &tables.int_fields)?;

    progress.on_phase(&format!(
        "Reconciling {} spreadsheet cards with {} upstream cards",
        local.len(),
        upstream.len()
    ));
    let reconciler = Reconciler::new(tables);
    let result = reconciler.reconcile(&upstream, local)?;

    files::write_outputs(&paths.merged, &result.merged, &paths.missing, &result.missing)?;

    let images = if options.fetch_images {
        progress.on_phase("Checking card images");
        let cache = ImageCache::new(options.data_dir.join(&settings.image_dir));
        Some(cache.fill(client, &result.merged, progress)?)
    } else {
        None
    };

    let report = LocaleReport {
        locale: locale.to_string(),
        upstream: upstream.len(),
        merged: result.merged.len(),
        missing: result.missing.len(),
        conflicts: result.conflicts(),
        name_mismatches: result.name_mismatches(),
        images,
        paths,
    };
    progress.on_complete(&format!(
        "{locale}: {} merged, {} missing",
        report.merged, report.missing
    ));
    Ok(report)
}

/// Sync each locale in turn. Locales are independent: a failure is
/// recorded and the next locale still runs.
pub fn sync_all(
    client: &dyn UpstreamClient,
    settings: &Settings,
    locales: &[String],
    options: &SyncOptions,
    progress: &dyn SyncProgress,
) -> Vec<LocaleOutcome> {
    locales
        .iter()
        .map(|locale| LocaleOutcome {
            locale: locale.clone(),
            result: sync_locale(client, settings, locale, options, progress),
        })
        .collect()
}
