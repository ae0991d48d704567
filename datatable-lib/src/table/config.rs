//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::state::ColumnVisibility;
use crate::state::DEFAULT_PAGE_SIZE;
use crate::state::FilterEntry;
use crate::state::SelectionMode;
use crate::state::Sorting;

/// Serializable table settings shared by every screen of one kind.
///
/// Loaded from JSON or built in code; turned into
/// [`TableOptions`](super::TableOptions) with `TableOptions::from_config`.
///
/// # Example
///
/// ```
/// use datatable_lib::state::Sorting;
/// use datatable_lib::table::TableConfig;
///
/// let config = TableConfig::default()
///     .with_default_per_page(25)
///     .with_initial_sorting(Sorting::desc("createdAt"));
///
/// let loaded = TableConfig::from_json(r#"{"manual_pagination": true}"#).unwrap();
/// assert!(loaded.manual_pagination);
/// assert_eq!(loaded.default_per_page, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Initial page size.
    ///
    /// Default: 10
    pub default_per_page: usize,

    /// Page sizes offered by the page-size selector.
    ///
    /// Default: 10, 20, 30, 40, 50
    pub page_size_options: Vec<usize>,

    /// Server-driven pagination.
    ///
    /// Default: false
    pub manual_pagination: bool,

    /// Return to the first page when filters or sorting change (client mode).
    ///
    /// Default: true
    pub auto_reset_page_index: bool,

    /// Row selection mode.
    ///
    /// Default: multi
    pub selection_mode: SelectionMode,

    /// Sorting applied on first render.
    pub initial_sorting: Sorting,

    /// Filters applied on first render.
    pub initial_column_filters: Vec<FilterEntry>,

    /// Column visibility on first render.
    pub initial_column_visibility: ColumnVisibility,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 30, 40, 50],
            manual_pagination: false,
            auto_reset_page_index: true,
            selection_mode: SelectionMode::Multi,
            initial_sorting: Sorting::new(),
            initial_column_filters: Vec::new(),
            initial_column_visibility: ColumnVisibility::new(),
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_per_page == 0 {
            return Err(ConfigError::invalid(
                "default_per_page",
                "page size must be at least 1",
            ));
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::invalid(
                "page_size_options",
                "page sizes must be at least 1",
            ));
        }
        Ok(())
    }

    /// Sets the initial page size.
    pub fn with_default_per_page(mut self, size: usize) -> Self {
        self.default_per_page = size;
        self
    }

    /// Sets the page-size selector options.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Enables or disables server-driven pagination.
    pub fn with_manual_pagination(mut self, manual: bool) -> Self {
        self.manual_pagination = manual;
        self
    }

    /// Enables or disables the page reset on filter/sort changes.
    pub fn with_auto_reset_page_index(mut self, reset: bool) -> Self {
        self.auto_reset_page_index = reset;
        self
    }

    /// Sets the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Sets the initial sorting.
    pub fn with_initial_sorting(mut self, sorting: Sorting) -> Self {
        self.initial_sorting = sorting;
        self
    }

    /// Sets the initial filters.
    pub fn with_initial_column_filters(mut self, filters: Vec<FilterEntry>) -> Self {
        self.initial_column_filters = filters;
        self
    }

    /// Sets the initial column visibility.
    pub fn with_initial_column_visibility(mut self, visibility: ColumnVisibility) -> Self {
        self.initial_column_visibility = visibility;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FilterValue;

    #[test]
    fn test_from_json_full() {
        let json = r#"{
            "default_per_page": 20,
            "manual_pagination": true,
            "selection_mode": "single",
            "initial_sorting": [{"column_id": "createdAt", "descending": true}],
            "initial_column_filters": [
                {"column_id": "status", "value": {"faceted": ["active"]}}
            ],
            "initial_column_visibility": {"notes": false}
        }"#;
        let config = TableConfig::from_json(json).unwrap();
        assert_eq!(config.default_per_page, 20);
        assert!(config.manual_pagination);
        assert_eq!(config.selection_mode, SelectionMode::Single);
        assert_eq!(config.initial_sorting, Sorting::desc("createdAt"));
        assert_eq!(
            config.initial_column_filters,
            vec![FilterEntry::new("status", FilterValue::faceted(["active"]))]
        );
        assert!(!config.initial_column_visibility.is_visible("notes"));
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = TableConfig::from_json(r#"{"default_per_page": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "default_per_page", .. }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = TableConfig::from_json("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
