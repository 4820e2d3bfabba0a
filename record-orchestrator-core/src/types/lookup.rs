//! Lookup table types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::FieldOption;

/// Display text for identifiers missing from their lookup table.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Identifier → label mapping for one foreign-key field.
///
/// Seed files wrap the mapping as `{ "data": { ... } }`; a bare object is
/// accepted as well. Serializes as the bare object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LookupTableRepr", into = "BTreeMap<String, String>")]
pub struct LookupTable {
    entries: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LookupTableRepr {
    Wrapped { data: BTreeMap<String, String> },
    Bare(BTreeMap<String, String>),
}

impl From<LookupTableRepr> for LookupTable {
    fn from(repr: LookupTableRepr) -> Self {
        match repr {
            LookupTableRepr::Wrapped { data } | LookupTableRepr::Bare(data) => {
                Self { entries: data }
            }
        }
    }
}

impl From<LookupTable> for BTreeMap<String, String> {
    fn from(table: LookupTable) -> Self {
        table.entries
    }
}

impl<K, V> FromIterator<(K, V)> for LookupTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl LookupTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.entries.insert(id.into(), label.into());
    }

    #[must_use]
    pub fn label(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// First identifier (in identifier order) carrying `label`.
    #[must_use]
    pub fn identifier(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(id, _)| id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries as form options, in identifier order.
    #[must_use]
    pub fn options(&self) -> Vec<FieldOption> {
        self.entries
            .iter()
            .map(|(id, label)| FieldOption::new(id.clone(), label.clone()))
            .collect()
    }
}

/// Result of forward (identifier → label) resolution.
///
/// Serializes as its display text, so `Unknown` becomes the marker string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Known(String),
    Unknown,
}

impl Label {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(label) => label,
            Self::Unknown => UNKNOWN_LABEL,
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
