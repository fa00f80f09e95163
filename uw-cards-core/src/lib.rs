//! Card data model and reconciliation engine.
//!
//! This crate holds everything that decides how a curated card spreadsheet
//! and the upstream card database are matched and merged. It performs no
//! I/O: fetching, file formats and the image cache live in `uw-cards-sync`.

pub mod adapter;
pub mod coerce;
pub mod error;
pub mod normalize;
pub mod reconcile;
pub mod tables;
pub mod types;

pub use adapter::{RawCard, adapt_card, adapt_cards};
pub use coerce::{coerce_fields, coerce_value};
pub use error::{ReconcileError, SchemaError};
pub use normalize::normalize_name;
pub use reconcile::{Diagnostic, Reconciler, Reconciliation, UpstreamIndex};
pub use tables::CardTables;
pub use types::{CardField, CardRecord, FieldValue, UpstreamCard};
