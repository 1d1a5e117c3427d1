pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod reader;
pub mod utils;

pub use error::{QueryError, Result};
pub use query::{execute_query5, QueryParams, RevenueByNation};
