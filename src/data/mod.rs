mod records;
mod row;
mod schema;

pub use records::*;
pub use row::*;
pub use schema::*;
