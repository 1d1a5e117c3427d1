use std::path::Path;
use std::sync::Arc;

use crate::data::{Row, Schema};
use crate::error::Result;

/// Reads `|`-delimited TPC-H `.tbl` files into generic rows.
pub struct TblReader {
    delimiter: u8,
    schema: Arc<Schema>,
}

impl TblReader {
    pub fn new(schema: Schema) -> Self {
        TblReader {
            delimiter: b'|',
            schema: Arc::new(schema),
        }
    }

    /// Reads every file in order and concatenates their rows. Lines whose
    /// field count does not match the schema are skipped.
    pub fn read_files<P: AsRef<Path>>(&self, files: &[P]) -> Result<Vec<Row>> {
        let mut rows = vec![];
        for file in files {
            self.read_file(file.as_ref(), &mut rows)?;
        }
        Ok(rows)
    }

    fn read_file(&self, path: &Path, rows: &mut Vec<Row>) -> Result<()> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_path(path)?;
        let num_columns = self.schema.len();
        let mut skipped = 0usize;
        for result in reader.records() {
            let record = result?;
            let mut values = record.iter().map(|x| x.to_string()).collect::<Vec<String>>();
            // dbgen terminates every line with the delimiter.
            if values.len() == num_columns + 1 && values.last().map_or(false, |x| x.is_empty()) {
                values.pop();
            }
            if values.len() != num_columns {
                skipped += 1;
                continue;
            }
            rows.push(Row::new(self.schema.clone(), values));
        }
        if skipped > 0 {
            log::warn!(
                "Skipped {} malformed rows in {} ({} columns expected)",
                skipped,
                path.display(),
                num_columns
            );
        }
        Ok(())
    }
}
