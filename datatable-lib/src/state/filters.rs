//! Column filter state.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// An inclusive date range; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest matching instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    /// Latest matching instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// Returns `true` if at least one bound is set.
    pub fn is_active(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Returns `true` if the instant lies within the bounds.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| *instant >= from) && self.to.is_none_or(|to| *instant <= to)
    }
}

/// The value of a column filter.
///
/// The shape selects the default row predicate: substring for text, set
/// membership for faceted, inclusive bounds for date ranges and equality for
/// exact values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    /// Case-insensitive substring match.
    Text(String),
    /// Row value must be one of these keys.
    Faceted(Vec<String>),
    /// Row value must be a timestamp within the range.
    DateRange(DateRange),
    /// Row value must equal this value.
    Exact(Value),
}

impl FilterValue {
    /// Creates a text filter value.
    pub fn text(text: impl Into<String>) -> Self {
        FilterValue::Text(text.into())
    }

    /// Creates a faceted filter value.
    pub fn faceted<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        FilterValue::Faceted(values.into_iter().map(Into::into).collect())
    }

    /// Creates a date range filter value.
    pub fn date_range(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        FilterValue::DateRange(DateRange::new(from, to))
    }

    /// Creates an exact match filter value.
    pub fn exact(value: impl Into<Value>) -> Self {
        FilterValue::Exact(value.into())
    }

    /// Returns `true` if this value carries no predicate.
    ///
    /// Setting an empty value removes the column's filter entry instead of
    /// storing it.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(text) => text.is_empty(),
            FilterValue::Faceted(values) => values.is_empty(),
            FilterValue::DateRange(range) => !range.is_active(),
            FilterValue::Exact(value) => value.is_null(),
        }
    }

    /// Tests a cell value against this filter.
    ///
    /// An empty faceted set matches every row.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FilterValue::Text(text) => {
                text.is_empty() || value.search_text().contains(&text.to_lowercase())
            }
            FilterValue::Faceted(selected) => {
                selected.is_empty()
                    || value
                        .facet_keys()
                        .iter()
                        .any(|key| selected.contains(key))
            }
            FilterValue::DateRange(range) => {
                !range.is_active() || value.as_datetime().is_some_and(|dt| range.contains(dt))
            }
            FilterValue::Exact(expected) => match value {
                _ if expected.is_null() => true,
                Value::List(items) => items.contains(expected),
                other => other == expected,
            },
        }
    }
}

/// An active filter on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterEntry {
    /// The filtered column.
    pub column_id: String,
    /// The filter value (never empty).
    pub value: FilterValue,
}

impl FilterEntry {
    /// Creates a filter entry.
    pub fn new(column_id: impl Into<String>, value: FilterValue) -> Self {
        Self {
            column_id: column_id.into(),
            value,
        }
    }
}

/// Callback receiving the full filter sequence after every change.
pub type FiltersChangeFn = Box<dyn FnMut(&[FilterEntry])>;

/// Holds the active column filters.
///
/// At most one entry exists per column and entries keep insertion order, so
/// "active filter" chips render deterministically. All entries are ANDed.
#[derive(Default)]
pub struct FilterState {
    entries: Vec<FilterEntry>,
    revision: u64,
    on_change: Option<FiltersChangeFn>,
}

impl FilterState {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter state seeded with entries.
    ///
    /// Empty values are dropped and later duplicates replace earlier ones.
    pub fn with_entries(entries: impl IntoIterator<Item = FilterEntry>) -> Self {
        let mut state = Self::new();
        for entry in entries {
            state.upsert(entry.column_id, entry.value);
        }
        state
    }

    /// Registers the change callback.
    pub fn on_change(&mut self, callback: impl FnMut(&[FilterEntry]) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Sets or removes the filter for a column.
    ///
    /// An empty value removes any existing entry; anything else replaces the
    /// column's value in place or appends a new entry.
    pub fn set_filter(&mut self, column_id: &str, value: FilterValue) {
        if value.is_empty() {
            self.entries.retain(|entry| entry.column_id != column_id);
            log::trace!("[filters] cleared {}", column_id);
        } else {
            self.upsert(column_id.to_string(), value);
            log::trace!("[filters] set {}", column_id);
        }
        self.changed();
    }

    /// Returns the current value for a column.
    pub fn get_filter(&self, column_id: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|entry| entry.column_id == column_id)
            .map(|entry| &entry.value)
    }

    /// Clears every filter.
    pub fn reset_filters(&mut self) {
        self.entries.clear();
        log::trace!("[filters] reset");
        self.changed();
    }

    /// Returns `true` if any filter is active.
    pub fn is_filtered(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Returns the active entries in insertion order.
    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    /// Returns a counter bumped on every change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn upsert(&mut self, column_id: String, value: FilterValue) {
        if value.is_empty() {
            return;
        }
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.column_id == column_id)
        {
            Some(entry) => entry.value = value,
            None => self.entries.push(FilterEntry { column_id, value }),
        }
    }

    fn changed(&mut self) {
        self.revision += 1;
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.entries);
        }
    }
}

impl std::fmt::Debug for FilterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterState")
            .field("entries", &self.entries)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
