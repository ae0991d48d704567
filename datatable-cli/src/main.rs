use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use datatable_lib::error::ConfigError;
use datatable_lib::model::ColumnDef;
use datatable_lib::model::Record;
use datatable_lib::model::TableRow;
use datatable_lib::state::SortingEntry;
use datatable_lib::table::DataTable;
use datatable_lib::table::TableConfig;
use datatable_lib::table::TableOptions;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid rows file: {0}")]
    Rows(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Print one page of a JSON rows file as a table
#[derive(Parser, Debug)]
#[command(name = "datatable-cli")]
#[command(about = "Filter, sort and page a JSON array of records", long_about = None)]
struct Args {
    /// JSON array of records, each with an `_id`
    rows: PathBuf,

    /// Table config JSON file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// 1-based page number
    #[arg(long = "page", default_value = "1")]
    page: usize,

    /// Rows per page (overrides the config)
    #[arg(long = "size")]
    size: Option<usize>,

    /// Text filter as COLUMN=TEXT, repeatable
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Sort as COLUMN or COLUMN:asc|desc, primary first, repeatable
    #[arg(long = "sort", value_parser = parse_sort)]
    sort: Vec<SortingEntry>,
}

fn parse_filter(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(column, text)| (column.to_string(), text.to_string()))
        .ok_or_else(|| format!("expected COLUMN=TEXT, got `{}`", value))
}

fn parse_sort(value: &str) -> Result<SortingEntry, String> {
    match value.split_once(':') {
        None => Ok(SortingEntry::new(value, false)),
        Some((column, "asc")) => Ok(SortingEntry::new(column, false)),
        Some((column, "desc")) => Ok(SortingEntry::new(column, true)),
        Some((_, direction)) => Err(format!("unknown direction `{}`", direction)),
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn run(args: Args) -> Result<(), CliError> {
    let rows: Vec<Record> = serde_json::from_str(&read(&args.rows)?)?;
    let config = match &args.config {
        Some(path) => TableConfig::from_json(&read(path)?)?,
        None => TableConfig::default(),
    };

    let mut field_names: Vec<String> = Vec::new();
    for row in &rows {
        for name in row.field_names() {
            if !field_names.iter().any(|n| n == name) {
                field_names.push(name.to_string());
            }
        }
    }
    let columns = field_names.iter().map(ColumnDef::<Record>::field).collect();

    log::info!("[cli] loaded {} rows from {}", rows.len(), args.rows.display());

    let mut table = DataTable::new(TableOptions::from_config(config, rows, columns));
    if let Some(size) = args.size {
        table.set_page_size(size);
    }
    for (column, text) in &args.filters {
        table.set_text_filter(column, text.as_str());
    }
    if !args.sort.is_empty() {
        table.set_sorting(args.sort.into_iter().collect());
    }
    table.set_page_index(args.page.saturating_sub(1));

    let headers: Vec<&str> = table
        .visible_columns()
        .iter()
        .map(|column| column.header.as_str())
        .collect();
    println!("id\t{}", headers.join("\t"));
    for row in table.page_rows() {
        let cells: Vec<String> = table
            .visible_columns()
            .iter()
            .map(|column| column.value(row).to_string())
            .collect();
        println!("{}\t{}", row.id(), cells.join("\t"));
    }

    let state = table.pagination();
    println!(
        "page {} of {} ({} of {} rows match)",
        state.page_index.saturating_add(1),
        table.page_count().max(1),
        table.filtered_row_count(),
        table.data().len()
    );
    Ok(())
}

fn init_logging(path: &Path) -> Result<(), CliError> {
    let log_file = File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;
    Ok(())
}

fn main() {
    if let Err(e) = init_logging(Path::new("datatable-cli.log")) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use datatable_lib::state::Sorting;

    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "datatable-cli",
            "kits.json",
            "--page",
            "3",
            "--filter",
            "serial=SN",
            "--sort",
            "createdAt:desc",
            "--sort",
            "serial",
        ])
        .unwrap();
        assert_eq!(args.rows, PathBuf::from("kits.json"));
        assert_eq!(args.page, 3);
        assert_eq!(args.filters, vec![("serial".to_string(), "SN".to_string())]);
        let sorting: Sorting = args.sort.into_iter().collect();
        assert_eq!(sorting, Sorting::desc("createdAt").then_asc("serial"));
    }

    #[test]
    fn test_page_defaults_to_first() {
        let args = Args::try_parse_from(["datatable-cli", "rows.json"]).unwrap();
        assert_eq!(args.page, 1);
        assert!(args.sort.is_empty());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(Args::try_parse_from(["datatable-cli"]).is_err());
        assert!(Args::try_parse_from(["datatable-cli", "rows.json", "--size", "ten"]).is_err());
        assert!(Args::try_parse_from(["datatable-cli", "rows.json", "--verbose"]).is_err());
        assert!(Args::try_parse_from(["datatable-cli", "rows.json", "--filter", "serial"]).is_err());
        assert!(Args::try_parse_from(["datatable-cli", "rows.json", "--sort", "name:up"]).is_err());
    }

    #[test]
    fn test_init_logging_reports_failures() {
        let missing = std::env::temp_dir().join("datatable-cli-missing-dir").join("cli.log");
        assert!(matches!(init_logging(&missing), Err(CliError::Io { .. })));

        let path = std::env::temp_dir().join("datatable-cli-test.log");
        let _ = init_logging(&path);
        assert!(matches!(init_logging(&path), Err(CliError::Logger(_))));
    }
}
