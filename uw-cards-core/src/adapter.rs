//! Flattening of raw upstream records.
//!
//! The upstream API is a WordPress REST endpoint: each card has its taxonomy
//! ids in lists and the card-specific data under `acf` (custom fields).
//! Every key read here is required. A missing key means the upstream schema
//! changed and the locale must not be merged.

use serde::Deserialize;

use crate::error::SchemaError;
use crate::normalize::normalize_name;
use crate::types::{FieldValue, UpstreamCard};

/// One card as returned by the upstream API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCard {
    pub id: i64,
    pub title: RenderedText,
    pub card_types: Vec<i64>,
    pub sets: Vec<i64>,
    pub warbands: Vec<i64>,
    pub acf: CustomFields,
}

/// WordPress wraps display strings as `{"rendered": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderedText {
    pub rendered: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomFields {
    /// Text in some locales, a number in others
    pub card_number: serde_json::Value,
    pub card_image: CardImage,
    pub is_new: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardImage {
    pub url: String,
    pub filename: String,
}

/// Adapt one raw record into an [`UpstreamCard`].
pub fn adapt_card(raw: &RawCard) -> Result<UpstreamCard, SchemaError> {
    Ok(UpstreamCard {
        gw_id: raw.id,
        name: normalize_name(&raw.title.rendered),
        gw_card_type_id: first(raw.id, "card_types", &raw.card_types)?,
        gw_card_set_id: first(raw.id, "sets", &raw.sets)?,
        gw_warband_id: first(raw.id, "warbands", &raw.warbands)?,
        gw_number: FieldValue::from_json(&raw.acf.card_number),
        image_url: raw.acf.card_image.url.clone(),
        image_filename: raw.acf.card_image.filename.clone(),
        is_new: FieldValue::from_json(&raw.acf.is_new),
    })
}

/// Adapt a full API response, failing on the first record that does not
/// match the expected shape.
pub fn adapt_cards(raw: Vec<serde_json::Value>) -> Result<Vec<UpstreamCard>, SchemaError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            let card: RawCard = serde_json::from_value(value)
                .map_err(|source| SchemaError::Malformed { index, source })?;
            adapt_card(&card)
        })
        .collect()
}

fn first(card: i64, field: &'static str, ids: &[i64]) -> Result<i64, SchemaError> {
    ids.first()
        .copied()
        .ok_or(SchemaError::EmptyList { card, field })
}

#[cfg(test)]
#[path = "tests/adapter_tests.rs"]
mod tests;
