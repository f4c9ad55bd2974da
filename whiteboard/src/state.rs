//! Whiteboard document state and the reducer that folds operations into it.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One edit carried by a diff message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    /// Create or replace the content at `key`.
    Set { key: String, value: String },
    /// Remove `key` entirely.
    Delete { key: String },
    /// Drop every key before the following operations apply.
    Clear,
}

impl Operation {
    #[must_use]
    pub fn set(key: &str, value: &str) -> Self {
        Self::Set {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    #[must_use]
    pub fn delete(key: &str) -> Self {
        Self::Delete {
            key: key.to_owned(),
        }
    }
}

/// Immutable snapshot of the whiteboard document: cell key to content.
///
/// The empty state is the canonical initial state. Keys are kept sorted so
/// iteration order is a function of the contents alone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhiteboardState {
    cells: BTreeMap<String, String>,
}

impl WhiteboardState {
    /// Empty whiteboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the underlying sorted map.
    #[must_use]
    pub fn cells(&self) -> &BTreeMap<String, String> {
        &self.cells
    }
}

impl<K, V> FromIterator<(K, V)> for WhiteboardState
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Apply `ops` in order to a copy of `prior`. `prior` is left untouched.
///
/// Every operation is total: deleting an absent key is a no-op.
#[must_use]
pub fn apply_diff(prior: &WhiteboardState, ops: &[Operation]) -> WhiteboardState {
    let mut cells = prior.cells.clone();
    for op in ops {
        match op {
            Operation::Set { key, value } => {
                cells.insert(key.clone(), value.clone());
            }
            Operation::Delete { key } => {
                cells.remove(key);
            }
            Operation::Clear => cells.clear(),
        }
    }
    WhiteboardState { cells }
}
