//! Local card image cache.
//!
//! One file per image filename, downloaded the first time a merged card
//! references it. Cached files are never re-fetched or invalidated.

use std::fs;
use std::path::{Component, Path, PathBuf};

use uw_cards_core::{CardField, CardRecord};

use crate::client::UpstreamClient;
use crate::error::SyncError;
use crate::files::write_atomic;
use crate::progress::SyncProgress;

/// What happened to one card's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Downloaded(PathBuf),
    AlreadyCached(PathBuf),
    /// No usable filename or URL on the card
    Skipped(String),
    /// Download failed; nothing was written
    Failed(String),
}

/// Counters for a locale's image pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageStats {
    pub downloaded: usize,
    pub cached: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ImageStats {
    fn record(&mut self, outcome: &ImageOutcome) {
        match outcome {
            ImageOutcome::Downloaded(_) => self.downloaded += 1,
            ImageOutcome::AlreadyCached(_) => self.cached += 1,
            ImageOutcome::Skipped(_) => self.skipped += 1,
            ImageOutcome::Failed(_) => self.failed += 1,
        }
    }
}

pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache path for `filename`, or `None` if it is empty or not a bare
    /// file name.
    pub fn path_for(&self, filename: &str) -> Option<PathBuf> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(self.dir.join(name)),
            _ => None,
        }
    }

    /// Make sure `card`'s image is cached, downloading it if needed.
    ///
    /// Download failures are returned as [`ImageOutcome::Failed`]; only
    /// local file-system errors are errors.
    pub fn ensure(
        &self,
        client: &dyn UpstreamClient,
        card: &CardRecord,
    ) -> Result<ImageOutcome, SyncError> {
        let filename = card
            .attribute(CardField::ImageFilename)
            .map(|v| v.to_string())
            .unwrap_or_default();
        let Some(dest) = self.path_for(&filename) else {
            return Ok(ImageOutcome::Skipped(format!(
                "'{}' has no usable image filename ({filename:?})",
                card.name
            )));
        };

        if dest.exists() {
            return Ok(ImageOutcome::AlreadyCached(dest));
        }

        let url = card
            .attribute(CardField::ImageUrl)
            .map(|v| v.to_string())
            .unwrap_or_default();
        if url.is_empty() {
            return Ok(ImageOutcome::Skipped(format!(
                "'{}' has no image URL",
                card.name
            )));
        }

        fs::create_dir_all(&self.dir)?;
        match client.fetch_image(&url) {
            Ok(bytes) => {
                write_atomic(&dest, &bytes)?;
                Ok(ImageOutcome::Downloaded(dest))
            }
            Err(e) => Ok(ImageOutcome::Failed(format!(
                "'{}' image {url}: {e}",
                card.name
            ))),
        }
    }

    /// Fill the cache for every card. The cache directory is created even
    /// when every image is already present.
    pub fn fill(
        &self,
        client: &dyn UpstreamClient,
        cards: &[CardRecord],
        progress: &dyn SyncProgress,
    ) -> Result<ImageStats, SyncError> {
        fs::create_dir_all(&self.dir)?;

        let mut stats = ImageStats::default();
        for (i, card) in cards.iter().enumerate() {
            let outcome = self.ensure(client, card)?;
            match &outcome {
                ImageOutcome::Downloaded(path) => log::debug!("Downloaded {}", path.display()),
                ImageOutcome::AlreadyCached(_) => {}
                ImageOutcome::Skipped(reason) => log::warn!("Skipping image: {reason}"),
                ImageOutcome::Failed(reason) => log::warn!("Failed to download image: {reason}"),
            }
            stats.record(&outcome);
            progress.on_image(i + 1, cards.len(), &card.name);
        }
        Ok(stats)
    }
}
