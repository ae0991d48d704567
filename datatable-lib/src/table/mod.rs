//! Table composition layer.
//!
//! [`DataTable`] assembles rows, column definitions and the state stores
//! into one table model, in one of two pagination modes:
//!
//! - **Client mode** (default): rows are filtered, sorted and sliced into
//!   pages locally; the page count is derived from the filtered row count.
//! - **Server mode** (`manual_pagination`): the rows supplied are exactly
//!   one page and are passed through untouched; the caller supplies the page
//!   count and refetches from `on_pagination_change`.

mod config;
mod filters;
mod options;
mod row_model;

pub use config::TableConfig;
pub use options::SortingChangeFn;
pub use options::TableOptions;

use std::cell::Ref;
use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::model::ColumnDef;
use crate::model::TableRow;
use crate::state::ColumnVisibility;
use crate::state::FilterState;
use crate::state::FilterValue;
use crate::state::PaginationState;
use crate::state::PaginationStore;
use crate::state::RowSelection;
use crate::state::SelectionMode;
use crate::state::Sorting;

use row_model::RowModel;
use row_model::RowModelKey;

/// A table model over rows of type `T`.
///
/// Owns all filter, pagination, sorting, visibility and selection state for
/// one mounted table view. Derived row models are memoized and recomputed
/// only when the data, filters or sorting change.
///
/// # Example
///
/// ```
/// use datatable_lib::model::{ColumnDef, Record};
/// use datatable_lib::table::{DataTable, TableOptions};
///
/// let rows: Vec<Record> = (0..25)
///     .map(|i| Record::new(i.to_string()).set("name", format!("Kit {i}")))
///     .collect();
///
/// let mut table = DataTable::new(TableOptions::new(rows, vec![ColumnDef::field("name")]));
/// assert_eq!(table.page_count(), 3);
///
/// table.set_text_filter("name", "kit 2");
/// assert_eq!(table.filtered_row_count(), 6);
/// ```
pub struct DataTable<T: TableRow> {
    data: Vec<T>,
    data_revision: u64,
    columns: Vec<ColumnDef<T>>,
    manual_pagination: bool,
    auto_reset_page_index: bool,
    page_count: Option<usize>,
    filters: FilterState,
    pagination: PaginationStore,
    sorting: Sorting,
    sorting_revision: u64,
    on_sorting_change: Option<SortingChangeFn>,
    visibility: ColumnVisibility,
    selection: RowSelection,
    row_model: RefCell<RowModel>,
}

impl<T: TableRow> DataTable<T> {
    /// Creates a table from options.
    pub fn new(options: TableOptions<T>) -> Self {
        let mut filters = FilterState::with_entries(options.initial_column_filters);
        if let Some(callback) = options.on_filters_change {
            filters.on_change(callback);
        }

        let mut pagination = PaginationStore::new(options.default_per_page);
        if let Some(callback) = options.on_pagination_change {
            pagination.on_change(callback);
        }

        log::debug!(
            "[table] created with {} rows, {} columns, {} pagination",
            options.data.len(),
            options.columns.len(),
            if options.manual_pagination { "server" } else { "client" }
        );

        Self {
            data: options.data,
            data_revision: 0,
            columns: options.columns,
            manual_pagination: options.manual_pagination,
            auto_reset_page_index: options.auto_reset_page_index,
            page_count: options.page_count,
            filters,
            pagination,
            sorting: options.initial_sorting,
            sorting_revision: 0,
            on_sorting_change: options.on_sorting_change,
            visibility: options.initial_column_visibility,
            selection: RowSelection::new(options.selection_mode),
            row_model: RefCell::new(RowModel::default()),
        }
    }

    /// Returns `true` in server mode.
    pub fn is_manual_pagination(&self) -> bool {
        self.manual_pagination
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Returns the rows as supplied.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Replaces the rows.
    ///
    /// Selection is kept so it survives background refetches. The page index
    /// is not clamped; guard with [`can_next_page`](Self::can_next_page).
    pub fn set_data(&mut self, data: Vec<T>) {
        log::debug!("[table] data replaced: {} rows", data.len());
        self.data = data;
        self.data_revision += 1;
    }

    /// Updates the server-supplied page count.
    pub fn set_page_count(&mut self, page_count: usize) {
        self.page_count = Some(page_count);
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Returns all column definitions.
    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    /// Finds a column by id.
    pub fn column(&self, column_id: &str) -> Option<&ColumnDef<T>> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Returns the columns currently shown, in definition order.
    pub fn visible_columns(&self) -> Vec<&ColumnDef<T>> {
        self.columns
            .iter()
            .filter(|c| self.visibility.is_visible(&c.id))
            .collect()
    }

    /// Returns the visibility state.
    pub fn column_visibility(&self) -> &ColumnVisibility {
        &self.visibility
    }

    /// Shows or hides a column. No-op for unknown or unhideable columns.
    pub fn set_column_visibility(&mut self, column_id: &str, visible: bool) {
        if self.column(column_id).is_some_and(|c| c.enable_hiding) {
            self.visibility.set_visible(column_id, visible);
        }
    }

    /// Flips a column's visibility. Returns the new value, or `None` if the
    /// column is unknown or cannot be hidden.
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> Option<bool> {
        if self.column(column_id).is_some_and(|c| c.enable_hiding) {
            Some(self.visibility.toggle(column_id))
        } else {
            None
        }
    }

    /// Replaces the whole visibility map.
    pub fn set_column_visibility_state(&mut self, visibility: ColumnVisibility) {
        self.visibility = visibility;
    }

    // -------------------------------------------------------------------------
    // Filters
    // -------------------------------------------------------------------------

    /// Returns the filter state.
    pub fn filter_state(&self) -> &FilterState {
        &self.filters
    }

    /// Sets or removes a column filter; an empty value removes it.
    pub fn set_filter(&mut self, column_id: &str, value: FilterValue) {
        self.filters.set_filter(column_id, value);
        self.reset_page_after_change();
    }

    /// Returns a column's filter value.
    pub fn get_filter(&self, column_id: &str) -> Option<&FilterValue> {
        self.filters.get_filter(column_id)
    }

    /// Clears every filter.
    pub fn reset_filters(&mut self) {
        self.filters.reset_filters();
        self.reset_page_after_change();
    }

    /// Returns `true` if any filter is active.
    pub fn is_filtered(&self) -> bool {
        self.filters.is_filtered()
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Returns the sorting.
    ///
    /// In server mode this is state for the caller to send upstream; rows
    /// are not re-sorted locally.
    pub fn sorting(&self) -> &Sorting {
        &self.sorting
    }

    /// Replaces the sorting.
    pub fn set_sorting(&mut self, sorting: Sorting) {
        if sorting == self.sorting {
            return;
        }
        self.sorting = sorting;
        self.sorting_changed();
    }

    /// Cycles a column through ascending, descending and unsorted.
    /// No-op for unknown or unsortable columns.
    pub fn toggle_sorting(&mut self, column_id: &str, multi: bool) {
        if !self.column(column_id).is_some_and(|c| c.enable_sorting) {
            return;
        }
        self.sorting.toggle(column_id, multi);
        self.sorting_changed();
    }

    /// Clears the sorting.
    pub fn clear_sorting(&mut self) {
        self.set_sorting(Sorting::new());
    }

    fn sorting_changed(&mut self) {
        self.sorting_revision += 1;
        log::trace!("[table] sorting now {:?}", self.sorting.entries());
        if let Some(callback) = self.on_sorting_change.as_mut() {
            callback(&self.sorting);
        }
        self.reset_page_after_change();
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Returns the pagination state.
    pub fn pagination(&self) -> PaginationState {
        self.pagination.state()
    }

    /// Jumps to a page.
    pub fn set_page_index(&mut self, index: usize) {
        self.pagination.set_page_index(index);
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.pagination.set_page_size(size);
    }

    /// Advances one page.
    pub fn next_page(&mut self) {
        self.pagination.next_page();
    }

    /// Goes back one page, stopping at the first.
    pub fn previous_page(&mut self) {
        self.pagination.previous_page();
    }

    /// Returns `true` if a page exists after the current one.
    pub fn can_next_page(&self) -> bool {
        self.pagination.can_next_page(self.page_count())
    }

    /// Returns `true` unless on the first page.
    pub fn can_previous_page(&self) -> bool {
        self.pagination.can_previous_page()
    }

    /// Returns the total page count.
    ///
    /// Client mode derives it from the filtered rows; server mode returns the
    /// supplied count, or 0 before one is known.
    pub fn page_count(&self) -> usize {
        if self.manual_pagination {
            self.page_count.unwrap_or(0)
        } else {
            self.row_count().div_ceil(self.pagination.page_size())
        }
    }

    fn reset_page_after_change(&mut self) {
        if self.auto_reset_page_index && !self.manual_pagination {
            self.pagination.replace(PaginationState {
                page_index: 0,
                ..self.pagination.state()
            });
        }
    }

    // -------------------------------------------------------------------------
    // Row models
    // -------------------------------------------------------------------------

    fn row_model(&self) -> Ref<'_, RowModel> {
        let key = RowModelKey {
            data: self.data_revision,
            filters: self.filters.revision(),
            sorting: self.sorting_revision,
        };
        if self.row_model.borrow().key != Some(key) {
            let model = RowModel::compute(
                key,
                &self.data,
                &self.columns,
                self.filters.entries(),
                &self.sorting,
                self.manual_pagination,
            );
            *self.row_model.borrow_mut() = model;
        }
        self.row_model.borrow()
    }

    /// Returns the rows passing the filters, in data order.
    pub fn filtered_rows(&self) -> Vec<&T> {
        let model = self.row_model();
        model.filtered.iter().map(|&i| &self.data[i]).collect()
    }

    /// Returns the number of rows passing the filters.
    pub fn filtered_row_count(&self) -> usize {
        self.row_model().filtered.len()
    }

    /// Returns the row count pagination is computed from: the filtered rows
    /// in client mode, the supplied rows in server mode.
    pub fn row_count(&self) -> usize {
        if self.manual_pagination {
            self.data.len()
        } else {
            self.filtered_row_count()
        }
    }

    /// Returns the filtered rows in sorted order, before pagination.
    pub fn sorted_rows(&self) -> Vec<&T> {
        let model = self.row_model();
        model.sorted.iter().map(|&i| &self.data[i]).collect()
    }

    /// Returns the rows of the current page.
    ///
    /// Server mode returns the supplied data verbatim.
    pub fn page_rows(&self) -> Vec<&T> {
        if self.manual_pagination {
            return self.data.iter().collect();
        }
        let model = self.row_model();
        let start = self.pagination.state().offset().min(model.sorted.len());
        let end = start
            .saturating_add(self.pagination.page_size())
            .min(model.sorted.len());
        model.sorted[start..end].iter().map(|&i| &self.data[i]).collect()
    }

    /// Returns the distinct values of a faceted column over the filtered
    /// rows, with the number of rows carrying each.
    ///
    /// `None` for unknown or non-faceted columns.
    pub fn faceted_unique_values(&self, column_id: &str) -> Option<BTreeMap<String, usize>> {
        self.row_model().facets.get(column_id).cloned()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Returns the selection state.
    pub fn row_selection(&self) -> &RowSelection {
        &self.selection
    }

    /// Changes the selection mode.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection.set_mode(mode);
    }

    /// Selects or deselects a row by id.
    pub fn set_row_selected(&mut self, id: &str, selected: bool) -> bool {
        self.selection.set_selected(id, selected)
    }

    /// Toggles a row's selection.
    pub fn toggle_row_selected(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Returns `true` if the row is selected.
    pub fn is_row_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Selects every row on the current page. Returns the newly selected ids.
    pub fn select_all_page_rows(&mut self) -> Vec<String> {
        let ids: Vec<String> = self.page_rows().iter().map(|row| row.id()).collect();
        self.selection.select_all(ids.iter().map(String::as_str))
    }

    /// Selects every filtered row. Returns the newly selected ids.
    pub fn select_all_rows(&mut self) -> Vec<String> {
        let ids: Vec<String> = self.filtered_rows().iter().map(|row| row.id()).collect();
        self.selection.select_all(ids.iter().map(String::as_str))
    }

    /// Clears the selection. Returns the deselected ids.
    pub fn clear_selection(&mut self) -> Vec<String> {
        self.selection.clear()
    }

    /// Returns the selected rows present in the current data.
    pub fn selected_rows(&self) -> Vec<&T> {
        self.data
            .iter()
            .filter(|row| self.selection.is_selected(&row.id()))
            .collect()
    }
}

impl<T: TableRow> std::fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("manual_pagination", &self.manual_pagination)
            .field("page_count", &self.page_count)
            .field("filters", &self.filters)
            .field("pagination", &self.pagination)
            .field("sorting", &self.sorting)
            .field("visibility", &self.visibility)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
