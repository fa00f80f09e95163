//! Matching and hydration of curated cards against upstream cards.
//!
//! Local cards are matched by name, after alias correction, and then by
//! number when the name is unknown upstream. Each match is hydrated with the
//! upstream attributes. Authored values win on conflict; upstream values fill
//! the gaps. Upstream cards that no local card claimed are reported as
//! missing.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::coerce::coerce_fields;
use crate::error::ReconcileError;
use crate::tables::CardTables;
use crate::types::{CardField, CardRecord, FieldValue, UpstreamCard};

/// A recovered problem noticed during reconciliation.
///
/// None of these stop the run; they are logged as they happen and returned
/// so callers can summarise them.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The local name was unknown upstream and was corrected via its number
    NameMismatch {
        number: i64,
        attempted: String,
        corrected: String,
    },
    /// Local and upstream disagree on a field; the local value was kept
    FieldConflict {
        card: String,
        field: CardField,
        upstream: FieldValue,
        local: FieldValue,
    },
    /// Two upstream cards normalize to the same name; the later one wins
    DuplicateUpstreamName { name: String },
    /// Two local cards resolved to the same canonical name; the later one wins
    DuplicateLocalName { name: String },
    /// An upstream card number is not an integer, so it cannot be a fallback target
    UnparsableNumber { name: String, value: FieldValue },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NameMismatch {
                number,
                attempted,
                corrected,
            } => write!(f, "Name mismatch (#{number}): {attempted} -> {corrected}"),
            Diagnostic::FieldConflict {
                card,
                field,
                upstream,
                local,
            } => write!(
                f,
                "Upstream data for '{card}' differs from the spreadsheet, keeping the spreadsheet value\n  upstream:    {field}: {upstream}\n  spreadsheet: {field}: {local}"
            ),
            Diagnostic::DuplicateUpstreamName { name } => {
                write!(f, "Duplicate upstream card name '{name}', using the later card")
            }
            Diagnostic::DuplicateLocalName { name } => {
                write!(f, "Duplicate spreadsheet card '{name}', using the later row")
            }
            Diagnostic::UnparsableNumber { name, value } => {
                write!(f, "Upstream card '{name}' has a non-numeric number '{value}'")
            }
        }
    }
}

/// Name and number lookups over one locale's upstream cards.
pub struct UpstreamIndex<'a> {
    by_name: HashMap<&'a str, &'a UpstreamCard>,
    by_number: HashMap<i64, &'a UpstreamCard>,
}

impl<'a> UpstreamIndex<'a> {
    /// Build both indexes. Duplicates are last-write-wins and reported.
    pub fn build(cards: &'a [UpstreamCard], diagnostics: &mut Vec<Diagnostic>) -> Self {
        let mut by_name = HashMap::with_capacity(cards.len());
        let mut by_number = HashMap::with_capacity(cards.len());

        for card in cards {
            if by_name.insert(card.name.as_str(), card).is_some() {
                report(
                    diagnostics,
                    Diagnostic::DuplicateUpstreamName {
                        name: card.name.clone(),
                    },
                );
            }
            match card.number() {
                Some(number) => {
                    by_number.insert(number, card);
                }
                None => report(
                    diagnostics,
                    Diagnostic::UnparsableNumber {
                        name: card.name.clone(),
                        value: card.gw_number.clone(),
                    },
                ),
            }
        }

        Self { by_name, by_number }
    }

    pub fn by_name(&self, name: &str) -> Option<&'a UpstreamCard> {
        self.by_name.get(name).copied()
    }

    pub fn by_number(&self, number: i64) -> Option<&'a UpstreamCard> {
        self.by_number.get(&number).copied()
    }
}

/// Outcome of reconciling one locale.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Hydrated cards, one per canonical name, in first-seen order
    pub merged: Vec<CardRecord>,
    /// Upstream cards no local card resolved to, in upstream order
    pub missing: Vec<UpstreamCard>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Reconciliation {
    pub fn conflicts(&self) -> usize {
        self.count(|d| matches!(d, Diagnostic::FieldConflict { .. }))
    }

    pub fn name_mismatches(&self) -> usize {
        self.count(|d| matches!(d, Diagnostic::NameMismatch { .. }))
    }

    fn count(&self, pred: impl Fn(&Diagnostic) -> bool) -> usize {
        self.diagnostics.iter().filter(|d| pred(d)).count()
    }
}

/// The merge engine.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    tables: CardTables,
}

impl Reconciler {
    pub fn new(tables: CardTables) -> Self {
        Self { tables }
    }

    /// Reconcile a locale's local cards against its upstream cards.
    ///
    /// Fails if the upstream list is empty or a local card resolves neither
    /// by name nor by number. There is no partial result in either case.
    pub fn reconcile(
        &self,
        upstream: &[UpstreamCard],
        local: Vec<CardRecord>,
    ) -> Result<Reconciliation, ReconcileError> {
        if upstream.is_empty() {
            return Err(ReconcileError::EmptyUpstream);
        }

        let mut diagnostics = Vec::new();
        let index = UpstreamIndex::build(upstream, &mut diagnostics);

        let mut merged: Vec<CardRecord> = Vec::with_capacity(local.len());
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(local.len());

        for mut card in local {
            let source = self.resolve(&index, &mut card, &mut diagnostics)?;
            self.hydrate(&mut card, source, &mut diagnostics);
            coerce_fields(&mut card, &self.tables.int_fields);

            match positions.get(&card.name) {
                Some(&pos) => {
                    report(
                        &mut diagnostics,
                        Diagnostic::DuplicateLocalName {
                            name: card.name.clone(),
                        },
                    );
                    merged[pos] = card;
                }
                None => {
                    positions.insert(card.name.clone(), merged.len());
                    merged.push(card);
                }
            }
        }

        let claimed: HashSet<&str> = merged.iter().map(|c| c.name.as_str()).collect();
        let missing = upstream
            .iter()
            .filter(|c| !claimed.contains(c.name.as_str()))
            .cloned()
            .collect();

        Ok(Reconciliation {
            merged,
            missing,
            diagnostics,
        })
    }

    /// Find the upstream card for `card`, rewriting its name to the
    /// canonical one.
    fn resolve<'a>(
        &self,
        index: &UpstreamIndex<'a>,
        card: &mut CardRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<&'a UpstreamCard, ReconcileError> {
        let attempted = self
            .tables
            .alias_for(&card.name)
            .unwrap_or(&card.name)
            .to_string();

        if let Some(source) = index.by_name(&attempted) {
            card.name = attempted;
            return Ok(source);
        }

        let number = card.number().unwrap_or(0);
        let source = index
            .by_number(number)
            .ok_or_else(|| ReconcileError::Unresolved {
                name: attempted.clone(),
                number,
            })?;

        report(
            diagnostics,
            Diagnostic::NameMismatch {
                number,
                attempted,
                corrected: source.name.clone(),
            },
        );
        card.name = source.name.clone();
        Ok(source)
    }

    /// Copy upstream attributes into `card`, keeping authored values that
    /// disagree, then derive `set_prefix`.
    pub fn hydrate(
        &self,
        card: &mut CardRecord,
        source: &UpstreamCard,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for (field, value) in source.attributes() {
            // The name is the merge key and is never taken from upstream.
            if field == CardField::Name {
                continue;
            }

            if let Some(local) = card.attribute(field) {
                if !local.is_empty() && !local.same_as(&value) {
                    let conflict = Diagnostic::FieldConflict {
                        card: card.name.clone(),
                        field,
                        upstream: value,
                        local: local.clone(),
                    };
                    report(diagnostics, conflict);
                    continue;
                }
            }

            card.set_attribute(field, value);
        }

        let prefix = card
            .attribute(CardField::GwCardSetId)
            .and_then(FieldValue::as_int)
            .and_then(|set_id| self.tables.set_prefix(set_id));
        if let Some(prefix) = prefix {
            card.set_prefix = Some(FieldValue::text(prefix));
        }
    }
}

fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!("{diagnostic}");
    diagnostics.push(diagnostic);
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
