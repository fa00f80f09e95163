//! Static lookup data consulted during reconciliation.

use std::collections::BTreeMap;

/// Alias, set-prefix and numeric-field tables.
///
/// Built once (defaults or a settings file) and handed to the
/// [`Reconciler`](crate::Reconciler); never mutated during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardTables {
    /// Known-wrong spreadsheet name -> upstream name
    pub aliases: BTreeMap<String, String>,
    /// Upstream set id -> short prefix stored as `set_prefix`
    pub set_prefixes: BTreeMap<i64, String>,
    /// Columns forced to integers in every output record
    pub int_fields: Vec<String>,
}

impl Default for CardTables {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::from([(
                "Deathly Fortitude".to_string(),
                "Deathly Fortune".to_string(),
            )]),
            set_prefixes: BTreeMap::from([(143, "L".to_string())]),
            int_fields: vec!["glory".to_string(), "id".to_string(), "number".to_string()],
        }
    }
}

impl CardTables {
    /// An empty table set: no aliases, no prefixes, no numeric fields.
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
            set_prefixes: BTreeMap::new(),
            int_fields: Vec::new(),
        }
    }

    pub fn alias_for(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn set_prefix(&self, set_id: i64) -> Option<&str> {
        self.set_prefixes.get(&set_id).map(String::as_str)
    }
}
