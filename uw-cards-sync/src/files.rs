//! Spreadsheet input and the two per-locale output files.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use uw_cards_core::{CardRecord, FieldValue, UpstreamCard, coerce_fields};

use crate::error::SyncError;

/// Read a locale's curated spreadsheet, coercing `int_fields` on every row.
pub fn read_local_cards(path: &Path, int_fields: &[String]) -> Result<Vec<CardRecord>, SyncError> {
    let file = fs::File::open(path).map_err(|e| SyncError::local_sheet(path, e.into()))?;
    parse_local_cards(file, int_fields).map_err(|e| match e {
        SyncError::Csv(source) => SyncError::local_sheet(path, source),
        SyncError::MissingColumn { column, .. } => SyncError::MissingColumn {
            path: path.display().to_string(),
            column,
        },
        other => other,
    })
}

/// Parse spreadsheet rows. The header row names the columns; a `name`
/// column is required. Short rows leave their trailing columns unset.
pub fn parse_local_cards<R: Read>(
    reader: R,
    int_fields: &[String],
) -> Result<Vec<CardRecord>, SyncError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h == "name") {
        return Err(SyncError::MissingColumn {
            path: String::new(),
            column: "name".to_string(),
        });
    }

    let mut cards = Vec::new();
    for result in reader.records() {
        let row = result?;
        let mut card = CardRecord::from_columns(
            headers
                .iter()
                .zip(row.iter())
                .map(|(key, value)| (key, FieldValue::text(value))),
        );
        coerce_fields(&mut card, int_fields);
        cards.push(card);
    }

    Ok(cards)
}

/// Serialize merged cards as a pretty-printed JSON array with sorted keys.
pub fn merged_json(cards: &[CardRecord]) -> Result<String, SyncError> {
    Ok(serde_json::to_string_pretty(cards)?)
}

/// Render the missing-cards report: a header row of the upstream attribute
/// names, then one row per card.
pub fn missing_csv(cards: &[UpstreamCard]) -> Result<Vec<u8>, SyncError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(UpstreamCard::COLUMNS.iter().map(|f| f.as_str()))?;
    for card in cards {
        writer.write_record(card.attributes().iter().map(|(_, v)| v.to_string()))?;
    }
    writer.into_inner().map_err(|e| SyncError::Io(e.into_error()))
}

/// Write a locale's merged JSON and missing-cards CSV as a pair.
///
/// Both files are rendered and staged next to their targets before either
/// is renamed into place, so a failure leaves the previous pair untouched.
pub fn write_outputs(
    merged_path: &Path,
    merged: &[CardRecord],
    missing_path: &Path,
    missing: &[UpstreamCard],
) -> Result<(), SyncError> {
    let json = merged_json(merged)?;
    let csv = missing_csv(missing)?;

    let merged_tmp = stage(merged_path, json.as_bytes())?;
    let missing_tmp = match stage(missing_path, &csv) {
        Ok(tmp) => tmp,
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&merged_tmp) {
                log::debug!("Could not remove {}: {cleanup}", merged_tmp.display());
            }
            return Err(e.into());
        }
    };

    fs::rename(&merged_tmp, merged_path)?;
    fs::rename(&missing_tmp, missing_path)?;
    Ok(())
}

/// Write through a temporary sibling file and rename, so readers never see
/// a half-written file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = stage(path, bytes)?;
    fs::rename(&tmp, path)
}

/// Write `bytes` to `<path>.tmp`, creating the parent directory.
fn stage(path: &Path, bytes: &[u8]) -> io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);
    fs::write(&tmp, bytes)?;
    Ok(tmp)
}

#[cfg(test)]
#[path = "tests/files_tests.rs"]
mod tests;
