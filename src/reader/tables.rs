use std::collections::HashMap;
use std::path::Path;

use getset::Getters;
use glob::{glob, Pattern};

use crate::data::*;
use crate::error::{QueryError, Result};
use crate::reader::TblReader;

#[derive(Getters, Debug, Clone)]
pub struct TableInput {
    #[getset(get = "pub")]
    input_files: Vec<String>,
}

/// Finds the partition files of every table under `directory`. A table may be
/// a single `<table>.tbl` or partitions like `<table>.tbl.1`, `<table>.tbl.2`.
pub fn load_tables(directory: &Path) -> Result<HashMap<String, TableInput>> {
    log::info!("Specified Input Directory: {}", directory.display());
    let directory = Pattern::escape(&directory.to_string_lossy());
    let mut table_input = HashMap::new();
    for tpch_table in TPCH_TABLES {
        let pattern = Path::new(&directory).join(format!("{}.tbl*", tpch_table));
        let pattern = pattern.to_string_lossy();
        let entries = glob(&pattern)
            .map_err(|e| QueryError::InvalidArgument(format!("{}: {}", pattern, e)))?;
        let mut input_files = vec![];
        for entry in entries {
            match entry {
                Ok(path) => input_files.push(path.to_string_lossy().to_string()),
                Err(e) => log::warn!("{:?}", e),
            }
        }
        if input_files.is_empty() {
            return Err(QueryError::MissingTable(tpch_table.to_string()));
        }
        // To sort slices correctly taking into account the partition numbers.
        alphanumeric_sort::sort_str_slice(&mut input_files);
        table_input.insert(tpch_table.to_string(), TableInput { input_files });
    }
    log::debug!("Evaluating On Files");
    log::debug!("{:?}", table_input);
    Ok(table_input)
}

fn read_table<T>(table: &str, table_input: &HashMap<String, TableInput>) -> Result<Vec<T>>
where
    T: for<'a> TryFrom<&'a Row, Error = QueryError>,
{
    let input = table_input
        .get(table)
        .ok_or_else(|| QueryError::MissingTable(table.to_string()))?;
    let rows = TblReader::new(tpch_schema(table)?).read_files(input.input_files())?;
    let records = convert_rows(&rows)?;
    log::debug!("Loaded {} {} rows", rows.len(), table);
    Ok(records)
}

/// Loads the six tables the query reads from a directory of `.tbl` files.
pub fn load_tpch_tables(directory: &Path) -> Result<TpchTables> {
    let table_input = load_tables(directory)?;
    Ok(TpchTables {
        region: read_table("region", &table_input)?,
        nation: read_table("nation", &table_input)?,
        supplier: read_table("supplier", &table_input)?,
        customer: read_table("customer", &table_input)?,
        orders: read_table("orders", &table_input)?,
        lineitem: read_table("lineitem", &table_input)?,
    })
}
