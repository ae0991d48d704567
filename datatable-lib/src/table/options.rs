//! Table construction options

use crate::model::ColumnDef;
use crate::state::ColumnVisibility;
use crate::state::DEFAULT_PAGE_SIZE;
use crate::state::FilterEntry;
use crate::state::FiltersChangeFn;
use crate::state::PaginationChangeFn;
use crate::state::PaginationState;
use crate::state::SelectionMode;
use crate::state::Sorting;

use super::TableConfig;

/// Callback receiving the new sorting after every change.
pub type SortingChangeFn = Box<dyn FnMut(&Sorting)>;

/// Everything a [`DataTable`](super::DataTable) is built from.
///
/// # Example
///
/// ```
/// use datatable_lib::model::{ColumnDef, Record};
/// use datatable_lib::table::{DataTable, TableOptions};
///
/// let table = DataTable::new(
///     TableOptions::new(Vec::<Record>::new(), vec![ColumnDef::field("name")])
///         .manual_pagination(true)
///         .page_count(5)
///         .on_pagination_change(|state| println!("fetch page {}", state.page_index)),
/// );
/// assert_eq!(table.page_count(), 5);
/// ```
pub struct TableOptions<T> {
    /// Rows for this render: the full set in client mode, one page in
    /// server mode.
    pub data: Vec<T>,
    /// Column definitions, fixed for the table's lifetime.
    pub columns: Vec<ColumnDef<T>>,
    /// Total page count (server mode only).
    pub page_count: Option<usize>,
    /// Selects server-driven pagination.
    pub manual_pagination: bool,
    /// Initial page size.
    pub default_per_page: usize,
    /// Return to the first page when filters or sorting change (client mode).
    pub auto_reset_page_index: bool,
    /// Row selection mode.
    pub selection_mode: SelectionMode,
    /// Seed sorting.
    pub initial_sorting: Sorting,
    /// Seed filters.
    pub initial_column_filters: Vec<FilterEntry>,
    /// Seed column visibility.
    pub initial_column_visibility: ColumnVisibility,
    pub(crate) on_pagination_change: Option<PaginationChangeFn>,
    pub(crate) on_filters_change: Option<FiltersChangeFn>,
    pub(crate) on_sorting_change: Option<SortingChangeFn>,
}

impl<T> TableOptions<T> {
    /// Creates client-mode options with default settings.
    pub fn new(data: Vec<T>, columns: Vec<ColumnDef<T>>) -> Self {
        Self {
            data,
            columns,
            page_count: None,
            manual_pagination: false,
            default_per_page: DEFAULT_PAGE_SIZE,
            auto_reset_page_index: true,
            selection_mode: SelectionMode::Multi,
            initial_sorting: Sorting::new(),
            initial_column_filters: Vec::new(),
            initial_column_visibility: ColumnVisibility::new(),
            on_pagination_change: None,
            on_filters_change: None,
            on_sorting_change: None,
        }
    }

    /// Creates options from a shared config.
    pub fn from_config(config: TableConfig, data: Vec<T>, columns: Vec<ColumnDef<T>>) -> Self {
        Self {
            manual_pagination: config.manual_pagination,
            default_per_page: config.default_per_page,
            auto_reset_page_index: config.auto_reset_page_index,
            selection_mode: config.selection_mode,
            initial_sorting: config.initial_sorting,
            initial_column_filters: config.initial_column_filters,
            initial_column_visibility: config.initial_column_visibility,
            ..Self::new(data, columns)
        }
    }

    /// Sets the total page count supplied by the server.
    pub fn page_count(mut self, page_count: usize) -> Self {
        self.page_count = Some(page_count);
        self
    }

    /// Enables or disables server-driven pagination.
    pub fn manual_pagination(mut self, manual: bool) -> Self {
        self.manual_pagination = manual;
        self
    }

    /// Sets the initial page size.
    pub fn default_per_page(mut self, size: usize) -> Self {
        self.default_per_page = size;
        self
    }

    /// Enables or disables the page reset on filter/sort changes.
    pub fn auto_reset_page_index(mut self, reset: bool) -> Self {
        self.auto_reset_page_index = reset;
        self
    }

    /// Sets the selection mode.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Seeds the sorting.
    pub fn initial_sorting(mut self, sorting: Sorting) -> Self {
        self.initial_sorting = sorting;
        self
    }

    /// Seeds the filters.
    pub fn initial_column_filters(mut self, filters: Vec<FilterEntry>) -> Self {
        self.initial_column_filters = filters;
        self
    }

    /// Seeds the column visibility.
    pub fn initial_column_visibility(mut self, visibility: ColumnVisibility) -> Self {
        self.initial_column_visibility = visibility;
        self
    }

    /// Called with the full pagination state on every change.
    ///
    /// In server mode this is where the caller refetches.
    pub fn on_pagination_change(mut self, callback: impl FnMut(PaginationState) + 'static) -> Self {
        self.on_pagination_change = Some(Box::new(callback));
        self
    }

    /// Called with the full filter sequence on every change.
    pub fn on_filters_change(mut self, callback: impl FnMut(&[FilterEntry]) + 'static) -> Self {
        self.on_filters_change = Some(Box::new(callback));
        self
    }

    /// Called with the new sorting on every change.
    pub fn on_sorting_change(mut self, callback: impl FnMut(&Sorting) + 'static) -> Self {
        self.on_sorting_change = Some(Box::new(callback));
        self
    }
}
