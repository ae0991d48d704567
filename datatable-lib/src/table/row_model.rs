//! Derived row models: filtered, sorted and faceted views over the data.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::model::ColumnDef;
use crate::model::Value;
use crate::state::FilterEntry;
use crate::state::Sorting;

/// Revisions of the inputs a row model was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RowModelKey {
    pub data: u64,
    pub filters: u64,
    pub sorting: u64,
}

/// Row indices after filtering and sorting, plus facet counts.
///
/// Indices point into the table's data. In server mode both index lists are
/// the data in its original order.
#[derive(Debug, Default)]
pub(super) struct RowModel {
    pub key: Option<RowModelKey>,
    pub filtered: Vec<usize>,
    pub sorted: Vec<usize>,
    pub facets: HashMap<String, BTreeMap<String, usize>>,
}

impl RowModel {
    pub fn compute<T>(
        key: RowModelKey,
        data: &[T],
        columns: &[ColumnDef<T>],
        filters: &[FilterEntry],
        sorting: &Sorting,
        manual: bool,
    ) -> Self {
        let (filtered, sorted) = if manual {
            let all: Vec<usize> = (0..data.len()).collect();
            (all.clone(), all)
        } else {
            let filtered = filter_rows(data, columns, filters);
            let sorted = sort_rows(data, columns, sorting, &filtered);
            (filtered, sorted)
        };
        let facets = facet_counts(data, columns, &filtered);

        log::debug!(
            "[row_model] {} rows, {} after filters, {} faceted columns",
            data.len(),
            filtered.len(),
            facets.len()
        );

        Self {
            key: Some(key),
            filtered,
            sorted,
            facets,
        }
    }
}

/// Returns the indices of rows passing every applicable filter.
///
/// Filters naming an unknown column or a column with filtering disabled are
/// ignored.
fn filter_rows<T>(data: &[T], columns: &[ColumnDef<T>], filters: &[FilterEntry]) -> Vec<usize> {
    let active: Vec<_> = filters
        .iter()
        .filter_map(|entry| {
            columns
                .iter()
                .find(|c| c.id == entry.column_id && c.enable_filtering)
                .map(|column| (column, &entry.value))
        })
        .collect();

    data.iter()
        .enumerate()
        .filter(|(_, row)| active.iter().all(|(column, value)| column.matches(row, value)))
        .map(|(i, _)| i)
        .collect()
}

/// Stable multi-column sort of the given indices.
///
/// Nulls sort last in either direction. Entries naming an unknown,
/// unsortable or accessor-less column are skipped.
fn sort_rows<T>(
    data: &[T],
    columns: &[ColumnDef<T>],
    sorting: &Sorting,
    indices: &[usize],
) -> Vec<usize> {
    let keys: Vec<_> = sorting
        .entries()
        .iter()
        .filter_map(|entry| {
            columns
                .iter()
                .find(|c| c.id == entry.column_id && c.enable_sorting && c.has_accessor())
                .map(|column| (column, entry.descending))
        })
        .collect();

    if keys.is_empty() {
        return indices.to_vec();
    }

    let mut decorated: Vec<(usize, Vec<Value>)> = indices
        .iter()
        .map(|&i| (i, keys.iter().map(|(c, _)| c.value(&data[i])).collect()))
        .collect();

    decorated.sort_by(|(_, a), (_, b)| {
        for ((x, y), (_, descending)) in a.iter().zip(b.iter()).zip(keys.iter()) {
            let ord = match (x.is_null(), y.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) if *descending => x.compare(y).reverse(),
                (false, false) => x.compare(y),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    decorated.into_iter().map(|(i, _)| i).collect()
}

/// Counts distinct facet keys per faceted column over the filtered rows.
fn facet_counts<T>(
    data: &[T],
    columns: &[ColumnDef<T>],
    filtered: &[usize],
) -> HashMap<String, BTreeMap<String, usize>> {
    columns
        .iter()
        .filter(|column| column.faceted)
        .map(|column| {
            let mut counts = BTreeMap::new();
            for &i in filtered {
                for key in column.value(&data[i]).facet_keys() {
                    *counts.entry(key).or_insert(0) += 1;
                }
            }
            (column.id.clone(), counts)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::state::FilterValue;

    fn key() -> RowModelKey {
        RowModelKey {
            data: 0,
            filters: 0,
            sorting: 0,
        }
    }

    fn rows() -> Vec<Record> {
        vec![
            Record::new("1").set("name", "Carol").set("kits", 3i64).set("status", "active"),
            Record::new("2").set("name", "alice").set("kits", 5i64).set("status", "inactive"),
            Record::new("3").set("name", "Bob").set("status", "active"),
            Record::new("4").set("name", "Dave").set("kits", 3i64).set("status", "active"),
        ]
    }

    fn columns() -> Vec<ColumnDef<Record>> {
        vec![
            ColumnDef::field("name"),
            ColumnDef::field("kits"),
            ColumnDef::field("status").faceted(),
            ColumnDef::new("actions"),
        ]
    }

    #[test]
    fn test_multi_sort_is_stable_with_nulls_last() {
        let sorting = Sorting::desc("kits").then_asc("name");
        let model = RowModel::compute(key(), &rows(), &columns(), &[], &sorting, false);
        assert_eq!(model.sorted, vec![1, 0, 3, 2]);

        let sorting = Sorting::asc("kits");
        let model = RowModel::compute(key(), &rows(), &columns(), &[], &sorting, false);
        assert_eq!(model.sorted, vec![0, 3, 1, 2]);
    }

    #[test]
    fn test_sort_skips_columns_without_accessor() {
        let sorting = Sorting::asc("actions");
        let model = RowModel::compute(key(), &rows(), &columns(), &[], &sorting, false);
        assert_eq!(model.sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_filters_ignore_unknown_columns() {
        let filters = vec![
            FilterEntry::new("missing", FilterValue::text("zzz")),
            FilterEntry::new("status", FilterValue::faceted(["active"])),
        ];
        let model = RowModel::compute(key(), &rows(), &columns(), &filters, &Sorting::new(), false);
        assert_eq!(model.filtered, vec![0, 2, 3]);
    }

    #[test]
    fn test_facets_count_filtered_rows() {
        let filters = vec![FilterEntry::new("kits", FilterValue::exact(3i64))];
        let model = RowModel::compute(key(), &rows(), &columns(), &filters, &Sorting::new(), false);
        let status = &model.facets["status"];
        assert_eq!(status.get("active"), Some(&2));
        assert_eq!(status.get("inactive"), None);
        assert!(!model.facets.contains_key("name"));
    }

    #[test]
    fn test_manual_passes_through() {
        let filters = vec![FilterEntry::new("name", FilterValue::text("zzz"))];
        let model =
            RowModel::compute(key(), &rows(), &columns(), &filters, &Sorting::asc("name"), true);
        assert_eq!(model.filtered, vec![0, 1, 2, 3]);
        assert_eq!(model.sorted, vec![0, 1, 2, 3]);
    }
}
