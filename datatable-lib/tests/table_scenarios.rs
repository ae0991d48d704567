use std::cell::RefCell;
use std::rc::Rc;

use datatable_lib::model::ColumnDef;
use datatable_lib::model::Record;
use datatable_lib::model::TableRow;
use datatable_lib::state::FilterValue;
use datatable_lib::state::PaginationState;
use datatable_lib::state::Sorting;
use datatable_lib::table::DataTable;
use datatable_lib::table::TableConfig;
use datatable_lib::table::TableOptions;

fn users(names: &[&str]) -> Vec<Record> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Record::new(format!("u-{}", i + 1)).set("name", *name))
        .collect()
}

fn numbered(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| Record::new(format!("k-{i}")).set("serial", format!("SN-{i:03}")))
        .collect()
}

fn ids(rows: &[&Record]) -> Vec<String> {
    rows.iter().map(|r| r.id()).collect()
}

#[test]
fn test_filter_upsert_and_removal() {
    let mut table = DataTable::new(TableOptions::new(
        users(&["Alice", "Bob"]),
        vec![ColumnDef::field("name"), ColumnDef::field("role")],
    ));

    table.set_filter("name", FilterValue::text("a"));
    table.set_filter("role", FilterValue::text("admin"));
    table.set_filter("name", FilterValue::text("b"));

    let active = table.active_filters();
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].column_id, "name");
    assert_eq!(active[0].value, FilterValue::text("b"));

    table.set_filter("name", FilterValue::text(""));
    assert_eq!(table.active_filters().len(), 1);
    assert!(table.get_filter("name").is_none());
}

#[test]
fn test_is_filtered_tracks_active_filters() {
    let mut table = DataTable::new(TableOptions::new(
        users(&["Alice"]),
        vec![ColumnDef::field("name")],
    ));
    assert_eq!(table.is_filtered(), !table.active_filters().is_empty());

    table.set_text_filter("name", "al");
    assert!(table.is_filtered());
    assert_eq!(table.is_filtered(), !table.active_filters().is_empty());

    table.reset_all_filters();
    assert!(!table.is_filtered());
    assert_eq!(table.is_filtered(), !table.active_filters().is_empty());
}

#[test]
fn test_page_size_change_resets_index() {
    let mut table = DataTable::new(TableOptions::new(
        numbered(60),
        vec![ColumnDef::field("serial")],
    ));
    table.set_page_index(3);
    assert_eq!(table.pagination().page_index, 3);

    table.set_page_size(25);
    assert_eq!(
        table.pagination(),
        PaginationState {
            page_index: 0,
            page_size: 25
        }
    );
    assert_eq!(table.page_count(), 3);
}

#[test]
fn test_boundary_navigation() {
    let mut table = DataTable::new(TableOptions::new(
        numbered(30),
        vec![ColumnDef::field("serial")],
    ));
    assert!(!table.can_previous_page());
    assert!(table.can_next_page());

    table.previous_page();
    assert_eq!(table.pagination().page_index, 0);

    table.set_page_index(2);
    assert!(!table.can_next_page());
    assert!(table.can_previous_page());
}

#[test]
fn test_empty_faceted_set_removes_entry() {
    let rows = vec![
        Record::new("c-1").set("status", "active"),
        Record::new("c-2").set("status", "archived"),
    ];
    let mut table = DataTable::new(TableOptions::new(
        rows,
        vec![ColumnDef::field("status").faceted()],
    ));

    table.set_faceted_filter("status", ["active"]);
    assert_eq!(table.filtered_row_count(), 1);

    table.set_filter("status", FilterValue::faceted(Vec::<String>::new()));
    assert!(table.get_filter("status").is_none());
    assert_eq!(table.filtered_row_count(), 2);
}

#[test]
fn test_ninety_five_rows_make_ten_pages() {
    let mut table = DataTable::new(TableOptions::new(
        numbered(95),
        vec![ColumnDef::field("serial")],
    ));
    assert_eq!(table.row_count(), 95);
    assert_eq!(table.page_count(), 10);
    assert_eq!(table.page_rows().len(), 10);

    table.set_page_index(9);
    let last = table.page_rows();
    assert_eq!(last.len(), 5);
    assert_eq!(last[0].id(), "k-91");
    assert!(!table.can_next_page());
}

#[test]
fn test_default_text_filter_is_substring() {
    let mut table = DataTable::new(TableOptions::new(
        users(&["Alice", "Bob", "Alicia", "Carol"]),
        vec![ColumnDef::field("name")],
    ));

    table.set_text_filter("name", "Alice");
    assert_eq!(ids(&table.filtered_rows()), vec!["u-1"]);

    table.set_text_filter("name", "Ali");
    let names: Vec<String> = table
        .page_rows()
        .iter()
        .map(|r| r.get("name").map(|v| v.to_string()).unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["Alice", "Alicia"]);
}

#[test]
fn test_custom_filter_fn_groups_name_stems() {
    let stem = |s: &str| s.to_lowercase().chars().take(4).collect::<String>();
    let column = ColumnDef::field("name").filter_fn(move |row: &Record, column_id, filter| {
        match (row.get(column_id), filter) {
            (Some(value), FilterValue::Text(query)) => stem(&value.to_string()) == stem(query),
            _ => true,
        }
    });
    let mut table = DataTable::new(TableOptions::new(
        users(&["Alice", "Bob", "Alicia"]),
        vec![column],
    ));

    table.set_text_filter("name", "Alice");
    assert_eq!(ids(&table.filtered_rows()), vec!["u-1", "u-3"]);
}

#[test]
fn test_server_mode_notifies_once_and_passes_rows_through() {
    let seen: Rc<RefCell<Vec<PaginationState>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let page = numbered(10);
    let mut table = DataTable::new(
        TableOptions::new(page.clone(), vec![ColumnDef::field("serial")])
            .manual_pagination(true)
            .page_count(5)
            .on_pagination_change(move |state| sink.borrow_mut().push(state)),
    );

    table.set_page_index(2);

    assert_eq!(
        *seen.borrow(),
        vec![PaginationState {
            page_index: 2,
            page_size: 10
        }]
    );
    let rows: Vec<Record> = table.page_rows().into_iter().cloned().collect();
    assert_eq!(rows, page);
}

#[test]
fn test_server_mode_reselecting_page_notifies_again() {
    let seen: Rc<RefCell<Vec<PaginationState>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut table = DataTable::new(
        TableOptions::new(numbered(10), vec![ColumnDef::field("serial")])
            .manual_pagination(true)
            .page_count(5)
            .on_pagination_change(move |state| sink.borrow_mut().push(state)),
    );

    table.set_page_index(2);
    table.set_page_index(2);
    table.previous_page();
    table.previous_page();
    table.previous_page();

    let indices: Vec<usize> = seen.borrow().iter().map(|s| s.page_index).collect();
    assert_eq!(indices, vec![2, 2, 1, 0]);
}

#[test]
fn test_server_mode_ignores_local_filters_and_sorting() {
    let page = users(&["Carol", "Alice", "Bob"]);
    let mut table = DataTable::new(
        TableOptions::new(page.clone(), vec![ColumnDef::field("name")])
            .manual_pagination(true)
            .page_count(4),
    );
    table.set_page_index(3);
    table.set_text_filter("name", "zzz");
    table.set_sorting(Sorting::asc("name"));

    assert_eq!(table.pagination().page_index, 3);
    assert_eq!(ids(&table.page_rows()), vec!["u-1", "u-2", "u-3"]);
}

#[test]
fn test_client_filter_resets_page_index() {
    let mut table = DataTable::new(TableOptions::new(
        numbered(50),
        vec![ColumnDef::field("serial")],
    ));
    table.set_page_index(4);
    table.set_text_filter("serial", "SN-0");
    assert_eq!(table.pagination().page_index, 0);
    assert_eq!(table.filtered_row_count(), 50);

    table.set_page_index(2);
    table.toggle_sorting("serial", false);
    assert_eq!(table.pagination().page_index, 0);
    assert_eq!(table.page_rows()[0].id(), "k-1");
}

#[test]
fn test_table_from_config() {
    let config = TableConfig::from_json(
        r#"{
            "default_per_page": 20,
            "initial_sorting": [{"column_id": "serial", "descending": true}]
        }"#,
    )
    .unwrap();
    let table = DataTable::new(TableOptions::from_config(
        config,
        numbered(45),
        vec![ColumnDef::field("serial")],
    ));

    assert_eq!(table.pagination().page_size, 20);
    assert_eq!(table.page_count(), 3);
    assert_eq!(table.page_rows()[0].id(), "k-45");
}
