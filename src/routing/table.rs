//! Immutable in-memory path table.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::routing::Resolver;

/// One declared redirect rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathEntry {
    /// Exact request path (e.g. "/github").
    pub path: String,

    /// Redirect target. Stored verbatim, never validated.
    pub url: String,
}

impl PathEntry {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Exact-match path → URL lookup, frozen after construction.
///
/// Later entries overwrite earlier ones with the same path.
#[derive(Debug, Clone)]
pub struct MappingTable {
    name: String,
    entries: HashMap<String, String>,
}

impl MappingTable {
    /// Build a table from entries in sequence order.
    pub fn from_entries(entries: impl IntoIterator<Item = PathEntry>) -> Self {
        Self {
            name: "table".to_string(),
            entries: entries
                .into_iter()
                .map(|entry| (entry.path, entry.url))
                .collect(),
        }
    }

    /// Rename the table. The name shows up in logs and metric labels.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::from_entries(Vec::new())
    }
}

impl FromIterator<PathEntry> for MappingTable {
    fn from_iter<I: IntoIterator<Item = PathEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl Resolver for MappingTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, path: &str) -> Option<Cow<'_, str>> {
        self.get(path).map(Cow::Borrowed)
    }
}
