#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

use std::path::PathBuf;
use std::process;

use local_supplier::output::{save_meta_result, write_report, MetaQueryResult};
use local_supplier::query::{execute_query5, rank, QueryParams};
use local_supplier::reader::load_tpch_tables;
use local_supplier::utils::timed;
use local_supplier::Result;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "query5",
    about = "Revenue of local-supplier trades per nation of a region (TPC-H Q5)."
)]
struct Opt {
    /// Region name, matched exactly (e.g. ASIA)
    #[structopt(long = "r_name")]
    r_name: String,

    /// First order date included, YYYY-MM-DD
    #[structopt(long = "start_date")]
    start_date: String,

    /// First order date excluded, YYYY-MM-DD
    #[structopt(long = "end_date")]
    end_date: String,

    /// Advisory worker count for the line-item scan; never changes the result
    #[structopt(long = "threads", default_value = "1")]
    threads: usize,

    /// Directory holding region.tbl, nation.tbl, ... (partitions like lineitem.tbl.1 allowed)
    #[structopt(long = "table_path", parse(from_os_str))]
    table_path: PathBuf,

    /// Report file to write
    #[structopt(long = "result_path", parse(from_os_str))]
    result_path: PathBuf,

    /// Also write timing metadata to <result_path>.meta.json
    #[structopt(long = "save_meta")]
    save_meta: bool,
}

fn run(opt: &Opt) -> Result<()> {
    let params = QueryParams::new(&opt.r_name, &opt.start_date, &opt.end_date, opt.threads);
    params.validate()?;

    log::info!("Loading TPCH data...");
    let (tables, load_duration) = timed("load", || load_tpch_tables(&opt.table_path));
    let tables = tables?;
    log::info!("Data loading completed in {:.2?}", load_duration);

    log::info!("Executing Query 5 with {} threads...", opt.threads);
    let (result, query_duration) = timed("query5", || execute_query5(&params, &tables));
    let result = result?;
    log::info!("Query execution completed in {:.2?}", query_duration);

    write_report(&opt.result_path, &result)?;
    for (nation, revenue) in rank(&result) {
        log::info!("{}: {:.2}", nation, revenue);
    }

    if opt.save_meta {
        save_meta_result(
            &opt.result_path,
            &MetaQueryResult {
                r_name: &opt.r_name,
                start_date: &opt.start_date,
                end_date: &opt.end_date,
                num_threads: opt.threads,
                num_nations: result.len(),
                load_time_ns: load_duration.as_nanos(),
                query_time_ns: query_duration.as_nanos(),
            },
        )?;
    }
    log::info!("Total runtime: {:.2?}", load_duration + query_duration);
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .init();

    let opt = Opt::from_args();
    if let Err(e) = run(&opt) {
        log::error!("{}", e);
        eprintln!("query5: {}", e);
        process::exit(1);
    }
}
