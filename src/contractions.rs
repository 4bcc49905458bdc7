use std::collections::HashMap;

use tracing::debug;

use crate::data;
use crate::error::Result;

/// Lowercased contracted form to its ordered expansion.
#[derive(Debug, Clone, Default)]
pub struct ContractionTable {
    entries: HashMap<String, Vec<String>>,
}

impl ContractionTable {
    /// The table shipped in `data/contractions.json`.
    pub fn builtin() -> Result<Self> {
        Ok(Self::from_entries(data::load_contractions()?))
    }

    pub fn from_entries(entries: HashMap<String, Vec<String>>) -> Self {
        let mut table = Self::default();
        table.extend(entries);
        table
    }

    /// Adds entries, replacing existing expansions for the same form.
    pub fn extend(&mut self, entries: HashMap<String, Vec<String>>) {
        for (form, expansion) in entries {
            self.entries.insert(form.to_lowercase(), expansion);
        }
    }

    pub fn get(&self, form: &str) -> Option<&[String]> {
        self.entries.get(&form.to_lowercase()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expands a matched contraction into output tokens.
    ///
    /// Forms missing from the table are split at the last `'s` (kept as a
    /// literal token) or the last `n't` (rewritten to `not`); anything else is
    /// returned whole.
    pub fn expand(&self, matched: &str) -> Vec<String> {
        if let Some(expansion) = self.get(matched) {
            return expansion.to_vec();
        }

        if let Some(idx) = matched.rfind("'s") {
            debug!(form = matched, "splitting possessive");
            vec![matched[..idx].to_string(), "'s".to_string()]
        } else if let Some(idx) = matched.rfind("n't") {
            debug!(form = matched, "splitting negation");
            vec![matched[..idx].to_string(), "not".to_string()]
        } else {
            vec![matched.to_string()]
        }
    }
}
