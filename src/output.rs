use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::query::{rank, RevenueByNation};

pub const REPORT_HEADER: [&str; 2] = ["Nation Name", "Revenue"];

/// Writes the ranked report: a `Nation Name|Revenue` header, then one line
/// per nation with revenue rounded to two decimals.
pub fn write_report(result_path: &Path, revenue: &RevenueByNation) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'|')
        .quote_style(csv::QuoteStyle::Never)
        .from_path(result_path)?;
    writer.write_record(REPORT_HEADER)?;
    for (nation, value) in rank(revenue) {
        writer.write_record([nation.as_str(), format!("{:.2}", value).as_str()])?;
    }
    writer.flush()?;
    log::info!("Results written to: {}", result_path.display());
    Ok(())
}

#[derive(Serialize, Debug, Clone)]
pub struct MetaQueryResult<'a> {
    pub r_name: &'a str,
    pub start_date: &'a str,
    pub end_date: &'a str,
    pub num_threads: usize,
    pub num_nations: usize,
    pub load_time_ns: u128,
    pub query_time_ns: u128,
}

/// `<result_path>.meta.json`
pub fn meta_path(result_path: &Path) -> PathBuf {
    let mut path = result_path.as_os_str().to_owned();
    path.push(".meta.json");
    PathBuf::from(path)
}

pub fn save_meta_result(result_path: &Path, meta: &MetaQueryResult) -> Result<PathBuf> {
    let meta_json = serde_json::to_string(meta)?;
    let meta_path = meta_path(result_path);
    let mut meta_file: File = File::create(&meta_path)?;
    meta_file.write_all(meta_json.as_bytes())?;
    log::info!("Wrote meta query result to {}", meta_path.display());
    Ok(meta_path)
}
