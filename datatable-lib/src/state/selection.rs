//! Row selection state.

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

/// Selection mode for table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// Single row selection (radio-button style).
    Single,
    /// Multiple rows can be selected (checkbox style).
    #[default]
    Multi,
}

/// Tracks selected rows by id.
///
/// Absence means unselected. Replacing the table's data does not clear the
/// selection; callers reset it explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    mode: SelectionMode,
    selected: HashSet<String>,
}

impl RowSelection {
    /// Creates an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    /// Returns the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Changes the mode. Switching to `None` clears the selection and
    /// switching to `Single` keeps at most one row.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        match mode {
            SelectionMode::None => self.selected.clear(),
            SelectionMode::Single if self.selected.len() > 1 => {
                let keep = self.selected_ids().into_iter().next();
                self.selected.clear();
                self.selected.extend(keep);
            }
            _ => {}
        }
    }

    /// Selects or deselects a row. Returns `true` if the selection changed.
    pub fn set_selected(&mut self, id: &str, selected: bool) -> bool {
        match (self.mode, selected) {
            (SelectionMode::None, _) => false,
            (_, false) => self.selected.remove(id),
            (SelectionMode::Single, true) => {
                if self.selected.len() == 1 && self.selected.contains(id) {
                    return false;
                }
                self.selected.clear();
                self.selected.insert(id.to_string())
            }
            (SelectionMode::Multi, true) => self.selected.insert(id.to_string()),
        }
    }

    /// Selects a single row, clearing any other selection.
    pub fn select(&mut self, id: &str) -> bool {
        if self.mode == SelectionMode::None {
            return false;
        }
        let already = self.selected.len() == 1 && self.selected.contains(id);
        self.selected.clear();
        self.selected.insert(id.to_string());
        !already
    }

    /// Toggles a row. Returns `true` if the selection changed.
    pub fn toggle(&mut self, id: &str) -> bool {
        let selected = self.is_selected(id);
        self.set_selected(id, !selected)
    }

    /// Selects every given id (multi mode only). Returns the newly selected.
    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        if self.mode != SelectionMode::Multi {
            return Vec::new();
        }
        ids.into_iter()
            .filter(|id| self.selected.insert(id.to_string()))
            .map(str::to_string)
            .collect()
    }

    /// Clears the selection. Returns the deselected ids.
    pub fn clear(&mut self) -> Vec<String> {
        let removed = self.selected_ids();
        self.selected.clear();
        removed
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Returns the selected ids, sorted.
    pub fn selected_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns the selection as an id -> `true` map.
    pub fn to_map(&self) -> BTreeMap<String, bool> {
        self.selected.iter().map(|id| (id.clone(), true)).collect()
    }
}
