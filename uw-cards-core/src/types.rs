//! Card record types shared by the adapter, coercer and reconciler.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A single cell value, from either a spreadsheet column or an upstream
/// JSON field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Null and the empty string count as "not authored".
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Compare by rendered text, so spreadsheet text `"5"` equals JSON `5`.
    pub fn same_as(&self, other: &FieldValue) -> bool {
        self.to_string() == other.to_string()
    }

    /// Interpret the value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Null => None,
        }
    }

    /// Convert a scalar JSON value. Nested structures are kept as their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Text(n.to_string()),
            },
            serde_json::Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Attributes with a dedicated slot on [`CardRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardField {
    Name,
    Number,
    Id,
    Glory,
    GwId,
    GwCardTypeId,
    GwCardSetId,
    GwWarbandId,
    GwNumber,
    ImageUrl,
    ImageFilename,
    IsNew,
    SetPrefix,
}

impl CardField {
    pub const ALL: [CardField; 13] = [
        CardField::Name,
        CardField::Number,
        CardField::Id,
        CardField::Glory,
        CardField::GwId,
        CardField::GwCardTypeId,
        CardField::GwCardSetId,
        CardField::GwWarbandId,
        CardField::GwNumber,
        CardField::ImageUrl,
        CardField::ImageFilename,
        CardField::IsNew,
        CardField::SetPrefix,
    ];

    /// Column / JSON key for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            CardField::Name => "name",
            CardField::Number => "number",
            CardField::Id => "id",
            CardField::Glory => "glory",
            CardField::GwId => "gw_id",
            CardField::GwCardTypeId => "gw_card_type_id",
            CardField::GwCardSetId => "gw_card_set_id",
            CardField::GwWarbandId => "gw_warband_id",
            CardField::GwNumber => "gw_number",
            CardField::ImageUrl => "image_url",
            CardField::ImageFilename => "image_filename",
            CardField::IsNew => "is_new",
            CardField::SetPrefix => "set_prefix",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One curated card: a spreadsheet row, and after reconciliation the merged
/// output record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardRecord {
    pub name: String,
    pub number: Option<FieldValue>,
    pub id: Option<FieldValue>,
    pub glory: Option<FieldValue>,
    pub gw_id: Option<FieldValue>,
    pub gw_card_type_id: Option<FieldValue>,
    pub gw_card_set_id: Option<FieldValue>,
    pub gw_warband_id: Option<FieldValue>,
    pub gw_number: Option<FieldValue>,
    pub image_url: Option<FieldValue>,
    pub image_filename: Option<FieldValue>,
    pub is_new: Option<FieldValue>,
    pub set_prefix: Option<FieldValue>,
    /// Authored columns with no dedicated slot, passed through untouched.
    pub extra: BTreeMap<String, FieldValue>,
}

impl CardRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a record from `(column, value)` pairs, e.g. one spreadsheet row.
    pub fn from_columns<K, V, I>(columns: I) -> Self
    where
        K: AsRef<str>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Self::default();
        for (key, value) in columns {
            record.set_column(key.as_ref(), value.into());
        }
        record
    }

    fn slot(&self, field: CardField) -> Option<&Option<FieldValue>> {
        match field {
            CardField::Name => None,
            CardField::Number => Some(&self.number),
            CardField::Id => Some(&self.id),
            CardField::Glory => Some(&self.glory),
            CardField::GwId => Some(&self.gw_id),
            CardField::GwCardTypeId => Some(&self.gw_card_type_id),
            CardField::GwCardSetId => Some(&self.gw_card_set_id),
            CardField::GwWarbandId => Some(&self.gw_warband_id),
            CardField::GwNumber => Some(&self.gw_number),
            CardField::ImageUrl => Some(&self.image_url),
            CardField::ImageFilename => Some(&self.image_filename),
            CardField::IsNew => Some(&self.is_new),
            CardField::SetPrefix => Some(&self.set_prefix),
        }
    }

    fn slot_mut(&mut self, field: CardField) -> Option<&mut Option<FieldValue>> {
        match field {
            CardField::Name => None,
            CardField::Number => Some(&mut self.number),
            CardField::Id => Some(&mut self.id),
            CardField::Glory => Some(&mut self.glory),
            CardField::GwId => Some(&mut self.gw_id),
            CardField::GwCardTypeId => Some(&mut self.gw_card_type_id),
            CardField::GwCardSetId => Some(&mut self.gw_card_set_id),
            CardField::GwWarbandId => Some(&mut self.gw_warband_id),
            CardField::GwNumber => Some(&mut self.gw_number),
            CardField::ImageUrl => Some(&mut self.image_url),
            CardField::ImageFilename => Some(&mut self.image_filename),
            CardField::IsNew => Some(&mut self.is_new),
            CardField::SetPrefix => Some(&mut self.set_prefix),
        }
    }

    /// Value of a non-name attribute. `name` is always available directly.
    pub fn attribute(&self, field: CardField) -> Option<&FieldValue> {
        self.slot(field).and_then(|v| v.as_ref())
    }

    /// Set an attribute; setting [`CardField::Name`] replaces the name with
    /// the value's text.
    pub fn set_attribute(&mut self, field: CardField, value: FieldValue) {
        match self.slot_mut(field) {
            Some(slot) => *slot = Some(value),
            None => self.name = value.to_string(),
        }
    }

    /// Look up any column by key, known or extra. `name` is not a column here.
    pub fn column(&self, key: &str) -> Option<&FieldValue> {
        match CardField::from_key(key) {
            Some(field) => self.attribute(field),
            None => self.extra.get(key),
        }
    }

    pub fn set_column(&mut self, key: &str, value: FieldValue) {
        match CardField::from_key(key) {
            Some(field) => self.set_attribute(field, value),
            None => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// The authored number, used for the numeric fallback lookup.
    pub fn number(&self) -> Option<i64> {
        self.number.as_ref().and_then(FieldValue::as_int)
    }
}

/// Serializes as a flat JSON object with keys in alphabetical order.
impl Serialize for CardRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let name = FieldValue::Text(self.name.clone());
        let mut fields: BTreeMap<&str, &FieldValue> = BTreeMap::new();
        fields.insert(CardField::Name.as_str(), &name);
        for field in CardField::ALL {
            if let Some(value) = self.attribute(field) {
                fields.insert(field.as_str(), value);
            }
        }
        for (key, value) in &self.extra {
            fields.insert(key.as_str(), value);
        }

        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One card as published by the upstream database, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamCard {
    pub gw_id: i64,
    pub name: String,
    pub gw_card_type_id: i64,
    pub gw_card_set_id: i64,
    pub gw_warband_id: i64,
    /// Locale-specific sequence number; the API sends either text or a number.
    pub gw_number: FieldValue,
    pub image_url: String,
    pub image_filename: String,
    pub is_new: FieldValue,
}

impl UpstreamCard {
    /// Attribute order for the missing-cards report.
    pub const COLUMNS: [CardField; 9] = [
        CardField::GwId,
        CardField::Name,
        CardField::GwCardTypeId,
        CardField::GwCardSetId,
        CardField::GwWarbandId,
        CardField::GwNumber,
        CardField::ImageUrl,
        CardField::ImageFilename,
        CardField::IsNew,
    ];

    pub fn number(&self) -> Option<i64> {
        self.gw_number.as_int()
    }

    /// All nine attributes in [`Self::COLUMNS`] order.
    pub fn attributes(&self) -> [(CardField, FieldValue); 9] {
        [
            (CardField::GwId, FieldValue::Int(self.gw_id)),
            (CardField::Name, FieldValue::text(self.name.as_str())),
            (CardField::GwCardTypeId, FieldValue::Int(self.gw_card_type_id)),
            (CardField::GwCardSetId, FieldValue::Int(self.gw_card_set_id)),
            (CardField::GwWarbandId, FieldValue::Int(self.gw_warband_id)),
            (CardField::GwNumber, self.gw_number.clone()),
            (CardField::ImageUrl, FieldValue::text(self.image_url.as_str())),
            (
                CardField::ImageFilename,
                FieldValue::text(self.image_filename.as_str()),
            ),
            (CardField::IsNew, self.is_new.clone()),
        ]
    }
}
