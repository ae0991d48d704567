//! Sorting state.

use serde::Deserialize;
use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Returns the wire name (`asc` / `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One sorted column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingEntry {
    /// The sorted column.
    pub column_id: String,
    /// `true` for descending order.
    #[serde(default)]
    pub descending: bool,
}

impl SortingEntry {
    /// Creates a sorting entry.
    pub fn new(column_id: impl Into<String>, descending: bool) -> Self {
        Self {
            column_id: column_id.into(),
            descending,
        }
    }

    /// Returns the entry's direction.
    pub fn direction(&self) -> SortDirection {
        if self.descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Ordered multi-column sort, primary column first.
///
/// # Example
///
/// ```
/// use datatable_lib::state::Sorting;
///
/// let sorting = Sorting::desc("createdAt").then_asc("name");
/// assert_eq!(sorting.entries().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sorting {
    entries: Vec<SortingEntry>,
}

impl Sorting {
    /// Creates an empty sorting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an ascending sort on a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            entries: vec![SortingEntry::new(column_id, false)],
        }
    }

    /// Creates a descending sort on a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            entries: vec![SortingEntry::new(column_id, true)],
        }
    }

    /// Adds a secondary ascending sort.
    pub fn then_asc(mut self, column_id: impl Into<String>) -> Self {
        self.entries.push(SortingEntry::new(column_id, false));
        self
    }

    /// Adds a secondary descending sort.
    pub fn then_desc(mut self, column_id: impl Into<String>) -> Self {
        self.entries.push(SortingEntry::new(column_id, true));
        self
    }

    /// Returns the entries, primary first.
    pub fn entries(&self) -> &[SortingEntry] {
        &self.entries
    }

    /// Returns `true` if nothing is sorted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the direction a column is sorted in, if any.
    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|entry| entry.column_id == column_id)
            .map(SortingEntry::direction)
    }

    /// Cycles a column through ascending, descending and unsorted.
    ///
    /// With `multi` the column is added to or updated within the existing
    /// entries, otherwise it replaces them.
    pub fn toggle(&mut self, column_id: &str, multi: bool) {
        let next = match self.direction_of(column_id) {
            None => Some(false),
            Some(SortDirection::Asc) => Some(true),
            Some(SortDirection::Desc) => None,
        };

        if !multi {
            self.entries.retain(|entry| entry.column_id == column_id);
        }
        let position = self.entries.iter().position(|e| e.column_id == column_id);
        match (next, position) {
            (Some(descending), Some(i)) => self.entries[i].descending = descending,
            (Some(descending), None) => {
                self.entries.push(SortingEntry::new(column_id, descending));
            }
            (None, Some(i)) => {
                self.entries.remove(i);
            }
            (None, None) => {}
        }
    }
}

impl FromIterator<SortingEntry> for Sorting {
    fn from_iter<I: IntoIterator<Item = SortingEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
