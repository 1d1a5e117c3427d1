use quick_error::quick_error;

pub type Result<T> = std::result::Result<T, QueryError>;

quick_error! {
    #[derive(Debug)]
    pub enum QueryError {
        RegionNotFound(r_name: String) {
            display("Region not found: {}", r_name)
        }
        MalformedNumericField { column: &'static str, value: String, orderkey: String } {
            display("Malformed numeric field {}={:?} in line item of order {}", column, value, orderkey)
        }
        MissingColumn { table: String, column: String } {
            display("Column {} missing from {} row", column, table)
        }
        MissingTable(table: String) {
            display("No input files found for table {}", table)
        }
        InvalidArgument(message: String) {
            display("Invalid argument: {}", message)
        }
        Io(err: std::io::Error) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
        Csv(err: csv::Error) {
            from()
            source(err)
            display("CSV error: {}", err)
        }
        Json(err: serde_json::Error) {
            from()
            source(err)
            display("JSON error: {}", err)
        }
        ThreadPool(err: rayon::ThreadPoolBuildError) {
            from()
            source(err)
            display("Failed to build thread pool: {}", err)
        }
    }
}
