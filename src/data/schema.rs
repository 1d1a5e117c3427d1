use crate::error::{QueryError, Result};
use rustc_hash::FxHashMap;

pub const TPCH_TABLES: [&str; 6] = ["region", "nation", "supplier", "customer", "orders", "lineitem"];

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
}

impl Column {
    pub fn from_field(name: &str) -> Column {
        Column {
            name: name.to_string(),
        }
    }
}

/// Ordered column names of one table, with a name -> position index so rows
/// can be addressed by column name without scanning.
#[derive(Debug, Clone)]
pub struct Schema {
    pub table: String,
    pub columns: Vec<Column>,
    column_index: FxHashMap<String, usize>,
}

impl Schema {
    pub fn new(table: String, columns: Vec<Column>) -> Schema {
        let column_index = columns
            .iter()
            .enumerate()
            .map(|(i, x)| (x.name.clone(), i))
            .collect();
        Schema {
            table,
            columns,
            column_index,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index(&self, column: &str) -> Option<usize> {
        self.column_index.get(column).copied()
    }
}

pub fn tpch_schema(table: &str) -> Result<Schema> {
    let columns = match table {
        "lineitem" => vec![
            Column::from_field("l_orderkey"),
            Column::from_field("l_partkey"),
            Column::from_field("l_suppkey"),
            Column::from_field("l_linenumber"),
            Column::from_field("l_quantity"),
            Column::from_field("l_extendedprice"),
            Column::from_field("l_discount"),
            Column::from_field("l_tax"),
            Column::from_field("l_returnflag"),
            Column::from_field("l_linestatus"),
            Column::from_field("l_shipdate"),
            Column::from_field("l_commitdate"),
            Column::from_field("l_receiptdate"),
            Column::from_field("l_shipinstruct"),
            Column::from_field("l_shipmode"),
            Column::from_field("l_comment"),
        ],
        "orders" => vec![
            Column::from_field("o_orderkey"),
            Column::from_field("o_custkey"),
            Column::from_field("o_orderstatus"),
            Column::from_field("o_totalprice"),
            Column::from_field("o_orderdate"),
            Column::from_field("o_orderpriority"),
            Column::from_field("o_clerk"),
            Column::from_field("o_shippriority"),
            Column::from_field("o_comment"),
        ],
        "customer" => vec![
            Column::from_field("c_custkey"),
            Column::from_field("c_name"),
            Column::from_field("c_address"),
            Column::from_field("c_nationkey"),
            Column::from_field("c_phone"),
            Column::from_field("c_acctbal"),
            Column::from_field("c_mktsegment"),
            Column::from_field("c_comment"),
        ],
        "supplier" => vec![
            Column::from_field("s_suppkey"),
            Column::from_field("s_name"),
            Column::from_field("s_address"),
            Column::from_field("s_nationkey"),
            Column::from_field("s_phone"),
            Column::from_field("s_acctbal"),
            Column::from_field("s_comment"),
        ],
        "nation" => vec![
            Column::from_field("n_nationkey"),
            Column::from_field("n_name"),
            Column::from_field("n_regionkey"),
            Column::from_field("n_comment"),
        ],
        "region" => vec![
            Column::from_field("r_regionkey"),
            Column::from_field("r_name"),
            Column::from_field("r_comment"),
        ],
        _ => vec![],
    };
    if columns.is_empty() {
        Err(QueryError::MissingTable(table.to_string()))
    } else {
        Ok(Schema::new(String::from(table), columns))
    }
}
