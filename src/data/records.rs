use crate::data::row::Row;
use crate::error::Result;

/// Opaque identifier token. Keys are compared by exact text equality and
/// never parsed as numbers.
pub type Key = String;

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub regionkey: Key,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nation {
    pub nationkey: Key,
    pub name: String,
    pub regionkey: Key,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    pub suppkey: Key,
    pub nationkey: Key,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub custkey: Key,
    pub nationkey: Key,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub orderkey: Key,
    pub custkey: Key,
    /// Canonical `YYYY-MM-DD`; ordered lexicographically.
    pub orderdate: String,
}

/// Price and discount stay as text until the line item joins, so only
/// contributing rows pay for (and can fail) numeric parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub orderkey: Key,
    pub suppkey: Key,
    pub extendedprice: String,
    pub discount: String,
}

impl Region {
    pub fn new(regionkey: &str, name: &str) -> Self {
        Region {
            regionkey: regionkey.into(),
            name: name.into(),
        }
    }
}

impl Nation {
    pub fn new(nationkey: &str, name: &str, regionkey: &str) -> Self {
        Nation {
            nationkey: nationkey.into(),
            name: name.into(),
            regionkey: regionkey.into(),
        }
    }
}

impl Supplier {
    pub fn new(suppkey: &str, nationkey: &str) -> Self {
        Supplier {
            suppkey: suppkey.into(),
            nationkey: nationkey.into(),
        }
    }
}

impl Customer {
    pub fn new(custkey: &str, nationkey: &str) -> Self {
        Customer {
            custkey: custkey.into(),
            nationkey: nationkey.into(),
        }
    }
}

impl Order {
    pub fn new(orderkey: &str, custkey: &str, orderdate: &str) -> Self {
        Order {
            orderkey: orderkey.into(),
            custkey: custkey.into(),
            orderdate: orderdate.into(),
        }
    }
}

impl LineItem {
    pub fn new(orderkey: &str, suppkey: &str, extendedprice: &str, discount: &str) -> Self {
        LineItem {
            orderkey: orderkey.into(),
            suppkey: suppkey.into(),
            extendedprice: extendedprice.into(),
            discount: discount.into(),
        }
    }
}

impl TryFrom<&Row> for Region {
    type Error = crate::error::QueryError;

    fn try_from(row: &Row) -> Result<Self> {
        Ok(Region::new(row.field("r_regionkey")?, row.field("r_name")?))
    }
}

impl TryFrom<&Row> for Nation {
    type Error = crate::error::QueryError;

    fn try_from(row: &Row) -> Result<Self> {
        Ok(Nation::new(
            row.field("n_nationkey")?,
            row.field("n_name")?,
            row.field("n_regionkey")?,
        ))
    }
}

impl TryFrom<&Row> for Supplier {
    type Error = crate::error::QueryError;

    fn try_from(row: &Row) -> Result<Self> {
        Ok(Supplier::new(row.field("s_suppkey")?, row.field("s_nationkey")?))
    }
}

impl TryFrom<&Row> for Customer {
    type Error = crate::error::QueryError;

    fn try_from(row: &Row) -> Result<Self> {
        Ok(Customer::new(row.field("c_custkey")?, row.field("c_nationkey")?))
    }
}

impl TryFrom<&Row> for Order {
    type Error = crate::error::QueryError;

    fn try_from(row: &Row) -> Result<Self> {
        Ok(Order::new(
            row.field("o_orderkey")?,
            row.field("o_custkey")?,
            row.field("o_orderdate")?,
        ))
    }
}

impl TryFrom<&Row> for LineItem {
    type Error = crate::error::QueryError;

    fn try_from(row: &Row) -> Result<Self> {
        Ok(LineItem::new(
            row.field("l_orderkey")?,
            row.field("l_suppkey")?,
            row.field("l_extendedprice")?,
            row.field("l_discount")?,
        ))
    }
}

/// The six inputs of the query, fully materialized.
#[derive(Debug, Clone, Default)]
pub struct TpchTables {
    pub region: Vec<Region>,
    pub nation: Vec<Nation>,
    pub supplier: Vec<Supplier>,
    pub customer: Vec<Customer>,
    pub orders: Vec<Order>,
    pub lineitem: Vec<LineItem>,
}

impl TpchTables {
    /// Converts generic rows into typed records, once, at the load boundary.
    pub fn from_rows(
        region: &[Row],
        nation: &[Row],
        supplier: &[Row],
        customer: &[Row],
        orders: &[Row],
        lineitem: &[Row],
    ) -> Result<Self> {
        Ok(TpchTables {
            region: convert_rows(region)?,
            nation: convert_rows(nation)?,
            supplier: convert_rows(supplier)?,
            customer: convert_rows(customer)?,
            orders: convert_rows(orders)?,
            lineitem: convert_rows(lineitem)?,
        })
    }
}

pub fn convert_rows<'a, T>(rows: &'a [Row]) -> Result<Vec<T>>
where
    T: TryFrom<&'a Row, Error = crate::error::QueryError>,
{
    rows.iter().map(T::try_from).collect()
}
