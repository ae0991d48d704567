//! Typed filter accessors.
//!
//! Thin wrappers over the generic `(column_id, FilterValue)` interface, one
//! per filter shape the toolbar renders: text inputs, faceted multi-select
//! popovers and date-range pickers.

use chrono::DateTime;
use chrono::Utc;

use crate::model::TableRow;
use crate::state::DateRange;
use crate::state::FilterEntry;
use crate::state::FilterValue;

use super::DataTable;

impl<T: TableRow> DataTable<T> {
    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    /// Returns a column's text filter, or `""` if unset.
    pub fn text_filter(&self, column_id: &str) -> String {
        match self.get_filter(column_id) {
            Some(FilterValue::Text(text)) => text.clone(),
            _ => String::new(),
        }
    }

    /// Sets a column's text filter; `""` clears it.
    pub fn set_text_filter(&mut self, column_id: &str, text: impl Into<String>) {
        self.set_filter(column_id, FilterValue::Text(text.into()));
    }

    // -------------------------------------------------------------------------
    // Faceted
    // -------------------------------------------------------------------------

    /// Returns a column's selected facet values, empty if unset.
    pub fn faceted_filter(&self, column_id: &str) -> Vec<String> {
        match self.get_filter(column_id) {
            Some(FilterValue::Faceted(values)) => values.clone(),
            _ => Vec::new(),
        }
    }

    /// Replaces a column's selected facet values; an empty set clears it.
    pub fn set_faceted_filter<S: Into<String>>(
        &mut self,
        column_id: &str,
        values: impl IntoIterator<Item = S>,
    ) {
        let mut selected: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !selected.contains(&value) {
                selected.push(value);
            }
        }
        self.set_filter(column_id, FilterValue::Faceted(selected));
    }

    /// Adds a facet value if absent, removes it if present.
    ///
    /// Removing the last value removes the column's filter entry entirely,
    /// so the column matches every row again.
    pub fn toggle_faceted_filter(&mut self, column_id: &str, value: &str) {
        let mut selected = self.faceted_filter(column_id);
        match selected.iter().position(|v| v == value) {
            Some(i) => {
                selected.remove(i);
            }
            None => selected.push(value.to_string()),
        }
        self.set_filter(column_id, FilterValue::Faceted(selected));
    }

    // -------------------------------------------------------------------------
    // Date range
    // -------------------------------------------------------------------------

    /// Returns a column's date range, unbounded if unset.
    pub fn date_range_filter(&self, column_id: &str) -> DateRange {
        match self.get_filter(column_id) {
            Some(FilterValue::DateRange(range)) => *range,
            _ => DateRange::default(),
        }
    }

    /// Sets a column's date range; clearing both bounds removes the filter.
    pub fn set_date_range_filter(
        &mut self,
        column_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) {
        self.set_filter(column_id, FilterValue::date_range(from, to));
    }

    // -------------------------------------------------------------------------
    // Reset
    // -------------------------------------------------------------------------

    /// Clears one column's filter.
    pub fn reset_filter(&mut self, column_id: &str) {
        if self.get_filter(column_id).is_some() {
            self.set_filter(column_id, FilterValue::Text(String::new()));
        }
    }

    /// Clears every filter.
    pub fn reset_all_filters(&mut self) {
        self.reset_filters();
    }

    /// Returns the active filters in insertion order.
    pub fn active_filters(&self) -> &[FilterEntry] {
        self.filters.entries()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::ColumnDef;
    use crate::model::Record;
    use crate::table::TableOptions;

    fn table() -> DataTable<Record> {
        let day = |d| Utc.with_ymd_and_hms(2024, 5, d, 12, 0, 0).unwrap();
        let rows = vec![
            Record::new("o-1").set("status", "pending").set("placedAt", day(1)),
            Record::new("o-2").set("status", "shipped").set("placedAt", day(10)),
            Record::new("o-3").set("status", "delivered").set("placedAt", day(20)),
            Record::new("o-4").set("status", "shipped"),
        ];
        let columns = vec![
            ColumnDef::field("status").faceted(),
            ColumnDef::field("placedAt"),
        ];
        DataTable::new(TableOptions::new(rows, columns))
    }

    #[test]
    fn test_text_filter_defaults_to_empty() {
        let mut table = table();
        assert_eq!(table.text_filter("status"), "");
        table.set_text_filter("status", "ship");
        assert_eq!(table.text_filter("status"), "ship");
        assert_eq!(table.filtered_row_count(), 2);
        table.set_text_filter("status", "");
        assert!(table.active_filters().is_empty());
    }

    #[test]
    fn test_toggle_faceted_filter() {
        let mut table = table();
        table.toggle_faceted_filter("status", "shipped");
        table.toggle_faceted_filter("status", "pending");
        assert_eq!(table.faceted_filter("status"), vec!["shipped", "pending"]);
        assert_eq!(table.filtered_row_count(), 3);

        table.toggle_faceted_filter("status", "shipped");
        table.toggle_faceted_filter("status", "pending");
        assert!(table.faceted_filter("status").is_empty());
        assert!(table.active_filters().is_empty());
        assert!(!table.is_filtered());
        assert_eq!(table.filtered_row_count(), 4);
    }

    #[test]
    fn test_set_faceted_filter_dedupes() {
        let mut table = table();
        table.set_faceted_filter("status", ["shipped", "shipped"]);
        assert_eq!(table.faceted_filter("status"), vec!["shipped"]);
        table.set_faceted_filter("status", Vec::<String>::new());
        assert!(!table.is_filtered());
    }

    #[test]
    fn test_date_range_filter() {
        let mut table = table();
        let from = Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 0).unwrap();
        table.set_date_range_filter("placedAt", Some(from), None);
        assert!(table.date_range_filter("placedAt").is_active());
        let ids: Vec<_> = table.filtered_rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["o-2", "o-3"]);

        table.set_date_range_filter("placedAt", None, None);
        assert!(!table.is_filtered());
        assert_eq!(table.date_range_filter("placedAt"), DateRange::default());
    }

    #[test]
    fn test_reset_filter() {
        let mut table = table();
        table.set_text_filter("status", "ship");
        table.toggle_faceted_filter("status", "pending");
        assert_eq!(table.active_filters().len(), 1);
        table.set_date_range_filter("placedAt", None, Some(Utc::now()));
        table.reset_filter("status");
        assert_eq!(table.active_filters()[0].column_id, "placedAt");
        table.reset_all_filters();
        assert!(table.active_filters().is_empty());
    }

    #[test]
    fn test_faceted_counts_follow_filters() {
        let mut table = table();
        let all = table.faceted_unique_values("status").unwrap();
        assert_eq!(all.get("shipped"), Some(&2));

        table.set_text_filter("status", "deliv");
        let filtered = table.faceted_unique_values("status").unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.get("delivered"), Some(&1));
    }
}
