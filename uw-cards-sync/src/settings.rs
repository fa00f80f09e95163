//! Sync settings: upstream endpoint, locales and the lookup tables.
//!
//! Every key is optional. A run with no settings file uses the built-in
//! defaults, which describe the public Warhammer Underworlds card API.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use uw_cards_core::CardTables;

use crate::error::SettingsError;

/// Name of the settings file looked up inside the data directory.
pub const LOCAL_SETTINGS_FILE: &str = "uw-cards.toml";

const DEFAULT_ENDPOINT: &str = "https://warhammerunderworlds.com/wp-json/wp/v2/cards/";

/// Canonical path to the per-user settings file: `~/.config/uw-cards/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("uw-cards").join("settings.toml")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Card listing endpoint
    pub endpoint: String,
    /// Sent as `ver=`
    pub api_version: u32,
    /// Sent as `per_page=`
    pub page_size: u32,
    /// Locale fetched without a `lang=` parameter
    pub default_locale: String,
    /// Locales processed by a full run, in order
    pub locales: Vec<String>,
    /// Image cache directory, relative to the data directory
    pub image_dir: PathBuf,
    /// Replaces the built-in alias table when present
    pub aliases: BTreeMap<String, String>,
    /// Set id (as a string key) -> prefix; replaces the built-in table when present
    pub set_prefixes: BTreeMap<String, String>,
    pub int_fields: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let tables = CardTables::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: 13,
            page_size: 1000,
            default_locale: "en".to_string(),
            locales: vec!["en".to_string(), "de".to_string()],
            image_dir: PathBuf::from("card_images"),
            aliases: tables.aliases,
            set_prefixes: tables
                .set_prefixes
                .into_iter()
                .map(|(id, prefix)| (id.to_string(), prefix))
                .collect(),
            int_fields: tables.int_fields,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text. `origin` names the source in errors.
    pub fn from_toml(contents: &str, origin: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents).map_err(|e| SettingsError::Parse {
            path: origin.to_string(),
            source: e,
        })?;
        // Reject bad set ids at load time rather than mid-run.
        settings.tables()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&contents, &path.display().to_string())
    }

    /// Resolve settings using a priority chain:
    ///
    /// 1. Explicit path (if `Some`)
    /// 2. `uw-cards.toml` in the data directory
    /// 3. `~/.config/uw-cards/settings.toml`
    /// 4. Built-in defaults
    pub fn resolve(explicit: Option<&Path>, data_dir: &Path) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = data_dir.join(LOCAL_SETTINGS_FILE);
        if local.is_file() {
            log::debug!("Using settings from {}", local.display());
            return Self::load(&local);
        }

        let user = settings_path();
        if user.is_file() {
            log::debug!("Using settings from {}", user.display());
            return Self::load(&user);
        }

        Ok(Self::default())
    }

    /// The lookup tables handed to the reconciler.
    pub fn tables(&self) -> Result<CardTables, SettingsError> {
        let mut set_prefixes = BTreeMap::new();
        for (key, prefix) in &self.set_prefixes {
            let id: i64 = key
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidSetId(key.clone()))?;
            set_prefixes.insert(id, prefix.clone());
        }

        Ok(CardTables {
            aliases: self.aliases.clone(),
            set_prefixes,
            int_fields: self.int_fields.clone(),
        })
    }

    pub fn is_default_locale(&self, locale: &str) -> bool {
        locale == self.default_locale
    }

    /// Pick the locales for a run: all configured ones, or the requested
    /// subset in the requested order.
    pub fn select_locales(&self, requested: &[String]) -> Result<Vec<String>, SettingsError> {
        if requested.is_empty() {
            return Ok(self.locales.clone());
        }
        requested
            .iter()
            .map(|locale| {
                if self.locales.contains(locale) {
                    Ok(locale.clone())
                } else {
                    Err(SettingsError::UnknownLocale(locale.clone()))
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
