//! Table state stores
//!
//! Each store owns one concern of a table's state:
//!
//! - [`FilterState`] - active column filters
//! - [`PaginationStore`] - page index and page size
//! - [`Sorting`] - ordered sort entries
//! - [`RowSelection`] - selected row ids
//! - [`ColumnVisibility`] - hidden columns

mod filters;
mod pagination;
mod selection;
mod sorting;
mod visibility;

pub use filters::DateRange;
pub use filters::FilterEntry;
pub use filters::FilterState;
pub use filters::FilterValue;
pub use filters::FiltersChangeFn;
pub use pagination::DEFAULT_PAGE_SIZE;
pub use pagination::PaginationChangeFn;
pub use pagination::PaginationState;
pub use pagination::PaginationStore;
pub use selection::RowSelection;
pub use selection::SelectionMode;
pub use sorting::SortDirection;
pub use sorting::Sorting;
pub use sorting::SortingEntry;
pub use visibility::ColumnVisibility;
