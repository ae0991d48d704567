//! Column visibility state.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Column id -> visible. Columns without an entry are visible.
///
/// Purely cosmetic: changing visibility never recomputes rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnVisibility {
    columns: BTreeMap<String, bool>,
}

impl ColumnVisibility {
    /// Creates a visibility map with every column visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` unless the column was hidden.
    pub fn is_visible(&self, column_id: &str) -> bool {
        self.columns.get(column_id).copied().unwrap_or(true)
    }

    /// Shows or hides a column.
    pub fn set_visible(&mut self, column_id: &str, visible: bool) {
        self.columns.insert(column_id.to_string(), visible);
    }

    /// Flips a column's visibility and returns the new value.
    pub fn toggle(&mut self, column_id: &str) -> bool {
        let visible = !self.is_visible(column_id);
        self.set_visible(column_id, visible);
        visible
    }

    /// Returns the ids of hidden columns.
    pub fn hidden_ids(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

impl FromIterator<(String, bool)> for ColumnVisibility {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_visible() {
        let mut visibility = ColumnVisibility::new();
        assert!(visibility.is_visible("name"));
        assert!(!visibility.toggle("name"));
        assert_eq!(visibility.hidden_ids(), vec!["name"]);
        assert!(visibility.toggle("name"));
        assert!(visibility.hidden_ids().is_empty());
    }
}
