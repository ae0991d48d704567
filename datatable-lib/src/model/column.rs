//! Column definitions

use std::rc::Rc;

use super::Record;
use super::Value;
use crate::state::FilterValue;

/// Reads a cell value off a row.
pub type Accessor<T> = Rc<dyn Fn(&T) -> Value>;

/// Custom row predicate: `(row, column_id, filter_value) -> matches`.
pub type FilterFn<T> = Rc<dyn Fn(&T, &str, &FilterValue) -> bool>;

/// A table column definition.
///
/// Columns are supplied once per table and stay fixed for its lifetime.
/// Sorting, hiding and filtering are enabled unless switched off; faceting is
/// opt-in.
///
/// # Example
///
/// ```
/// use datatable_lib::model::{ColumnDef, Record, Value};
///
/// let status = ColumnDef::<Record>::field("status")
///     .header("Status")
///     .faceted();
///
/// let name = ColumnDef::new("name")
///     .accessor(|r: &Record| r.get("name").cloned().unwrap_or(Value::Null))
///     .disable_hiding();
/// ```
pub struct ColumnDef<T> {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text, defaults to the id.
    pub header: String,
    pub(crate) accessor: Option<Accessor<T>>,
    pub(crate) filter_fn: Option<FilterFn<T>>,
    /// Whether the column takes part in sorting.
    pub enable_sorting: bool,
    /// Whether the column may be hidden.
    pub enable_hiding: bool,
    /// Whether filters on this column are applied.
    pub enable_filtering: bool,
    /// Whether faceted unique values are computed for this column.
    pub faceted: bool,
}

impl<T> ColumnDef<T> {
    /// Creates a column with the given id and no accessor.
    ///
    /// A column without an accessor is display only (actions, checkboxes):
    /// it reads as `Value::Null` for sorting, filtering and faceting.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            header: id.clone(),
            id,
            accessor: None,
            filter_fn: None,
            enable_sorting: true,
            enable_hiding: true,
            enable_filtering: true,
            faceted: false,
        }
    }

    /// Sets the header text.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Sets how the cell value is read from a row.
    pub fn accessor(mut self, accessor: impl Fn(&T) -> Value + 'static) -> Self {
        self.accessor = Some(Rc::new(accessor));
        self
    }

    /// Overrides the default predicate for this column's filter.
    pub fn filter_fn(mut self, filter: impl Fn(&T, &str, &FilterValue) -> bool + 'static) -> Self {
        self.filter_fn = Some(Rc::new(filter));
        self
    }

    /// Marks the column for faceted unique value computation.
    pub fn faceted(mut self) -> Self {
        self.faceted = true;
        self
    }

    /// Excludes the column from sorting.
    pub fn disable_sorting(mut self) -> Self {
        self.enable_sorting = false;
        self
    }

    /// Prevents the column from being hidden.
    pub fn disable_hiding(mut self) -> Self {
        self.enable_hiding = false;
        self
    }

    /// Makes the row model ignore filters on this column.
    pub fn disable_filtering(mut self) -> Self {
        self.enable_filtering = false;
        self
    }

    /// Returns `true` if the column has an accessor.
    pub fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }

    /// Reads this column's value off a row.
    pub fn value(&self, row: &T) -> Value {
        self.accessor
            .as_ref()
            .map(|accessor| accessor(row))
            .unwrap_or(Value::Null)
    }

    /// Tests a row against a filter value for this column.
    ///
    /// Uses the custom predicate if one is set, otherwise the predicate
    /// implied by the filter value's shape.
    pub fn matches(&self, row: &T, filter: &FilterValue) -> bool {
        match &self.filter_fn {
            Some(filter_fn) => filter_fn(row, &self.id, filter),
            None => filter.matches(&self.value(row)),
        }
    }
}

impl ColumnDef<Record> {
    /// Creates a column reading the record field of the same name.
    pub fn field(id: impl Into<String>) -> Self {
        let id = id.into();
        let field = id.clone();
        Self::new(id).accessor(move |record: &Record| {
            record.get(&field).cloned().unwrap_or(Value::Null)
        })
    }
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            filter_fn: self.filter_fn.clone(),
            enable_sorting: self.enable_sorting,
            enable_hiding: self.enable_hiding,
            enable_filtering: self.enable_filtering,
            faceted: self.faceted,
        }
    }
}

impl<T> std::fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("has_accessor", &self.accessor.is_some())
            .field("has_filter_fn", &self.filter_fn.is_some())
            .field("enable_sorting", &self.enable_sorting)
            .field("enable_hiding", &self.enable_hiding)
            .field("enable_filtering", &self.enable_filtering)
            .field("faceted", &self.faceted)
            .finish()
    }
}
