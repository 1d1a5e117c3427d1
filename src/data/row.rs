use std::sync::Arc;

use crate::data::schema::Schema;
use crate::error::{QueryError, Result};

/// A generic table row: text values addressed by the column names of the
/// shared table schema. No type coercion happens here.
#[derive(Debug, Clone)]
pub struct Row {
    schema: Arc<Schema>,
    values: Vec<String>,
}

impl Row {
    pub fn new(schema: Arc<Schema>, values: Vec<String>) -> Row {
        Row { schema, values }
    }

    /// Builds a row from `(column, value)` pairs; columns the schema does not
    /// know are ignored and absent columns are left empty.
    pub fn from_pairs(schema: Arc<Schema>, pairs: &[(&str, &str)]) -> Row {
        let mut values = vec![String::new(); schema.len()];
        for (column, value) in pairs {
            if let Some(index) = schema.index(column) {
                values[index] = value.to_string();
            }
        }
        Row { schema, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.schema
            .index(column)
            .and_then(|i| self.values.get(i))
            .map(|x| x.as_str())
    }

    /// Like `get`, but a missing column is an error naming the table.
    pub fn field(&self, column: &str) -> Result<&str> {
        self.get(column).ok_or_else(|| QueryError::MissingColumn {
            table: self.schema.table.clone(),
            column: column.to_string(),
        })
    }
}
