mod tables;
mod tblreader;

pub use tables::*;
pub use tblreader::*;
