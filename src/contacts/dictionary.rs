//! Per-row field dictionary

use serde::Serialize;
use std::collections::BTreeMap;

use super::field::{ContactField, HeaderLookup};

/// True when a value is empty or whitespace-only
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Trimmed text values for one data row, keyed by logical field
///
/// Every known field is always present; absent or blank cells are "".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldDictionary {
    values: BTreeMap<ContactField, String>,
}

impl Default for FieldDictionary {
    fn default() -> Self {
        Self {
            values: ContactField::ALL
                .iter()
                .map(|f| (*f, String::new()))
                .collect(),
        }
    }
}

impl FieldDictionary {
    /// Pair a header row with a data row positionally
    ///
    /// Headers with no mapping are ignored. When two columns resolve to the
    /// same field, the later column wins.
    pub fn from_row<S: AsRef<str>>(headers: &[S], row: &[S], lookup: &HeaderLookup) -> Self {
        let mut dict = Self::default();
        for (idx, header) in headers.iter().enumerate() {
            if let Some(field) = lookup.resolve(header.as_ref()) {
                let value = row.get(idx).map(|c| c.as_ref()).unwrap_or_default();
                dict.set(field, value);
            }
        }
        dict
    }

    pub fn get(&self, field: ContactField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Store a trimmed value
    pub fn set(&mut self, field: ContactField, value: &str) {
        self.values.insert(field, value.trim().to_string());
    }

    /// True when the field's value is blank
    pub fn is_blank(&self, field: ContactField) -> bool {
        is_blank(self.get(field))
    }

    /// Iterate over the non-blank values
    pub fn populated(&self) -> impl Iterator<Item = (ContactField, &str)> {
        self.values
            .iter()
            .filter(|(_, v)| !is_blank(v))
            .map(|(f, v)| (*f, v.as_str()))
    }
}
