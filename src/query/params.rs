use getset::Getters;

use crate::error::{QueryError, Result};

/// Scalar inputs of one query run.
///
/// `num_threads` is an advisory hint: it may change how the line-item scan is
/// scheduled but never the result.
#[derive(Getters, Debug, Clone, PartialEq)]
pub struct QueryParams {
    #[getset(get = "pub")]
    r_name: String,
    #[getset(get = "pub")]
    start_date: String,
    #[getset(get = "pub")]
    end_date: String,
    #[getset(get = "pub")]
    num_threads: usize,
}

impl QueryParams {
    pub fn new(r_name: &str, start_date: &str, end_date: &str, num_threads: usize) -> Self {
        QueryParams {
            r_name: r_name.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            num_threads,
        }
    }

    /// Boundary checks for values coming from the command line. The engine
    /// itself runs with whatever it is given.
    pub fn validate(&self) -> Result<()> {
        if self.r_name.is_empty() {
            return Err(QueryError::InvalidArgument("region name is empty".into()));
        }
        for (flag, date) in [("start_date", &self.start_date), ("end_date", &self.end_date)] {
            if !is_canonical_date(date) {
                return Err(QueryError::InvalidArgument(format!(
                    "{} {:?} is not in YYYY-MM-DD form",
                    flag, date
                )));
            }
        }
        if self.start_date > self.end_date {
            return Err(QueryError::InvalidArgument(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        if self.num_threads == 0 {
            return Err(QueryError::InvalidArgument("threads must be positive".into()));
        }
        Ok(())
    }
}

/// `YYYY-MM-DD` with ASCII digits. Only the shape matters: dates are compared
/// as text, which orders canonical dates chronologically.
pub fn is_canonical_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_params() {
        let params = QueryParams::new("ASIA", "1994-01-01", "1995-01-01", 4);
        assert!(params.validate().is_ok());
        assert_eq!(params.r_name(), "ASIA");
        assert_eq!(*params.num_threads(), 4);
    }

    #[test]
    fn rejects_bad_params() {
        let cases = vec![
            QueryParams::new("", "1994-01-01", "1995-01-01", 1),
            QueryParams::new("ASIA", "1994/01/01", "1995-01-01", 1),
            QueryParams::new("ASIA", "1994-01-01", "95-01-01", 1),
            QueryParams::new("ASIA", "1995-01-01", "1994-01-01", 1),
            QueryParams::new("ASIA", "1994-01-01", "1995-01-01", 0),
        ];
        for params in cases {
            assert!(
                matches!(params.validate(), Err(QueryError::InvalidArgument(_))),
                "{:?}",
                params
            );
        }
    }

    #[test]
    fn empty_window_is_allowed() {
        let params = QueryParams::new("ASIA", "1994-01-01", "1994-01-01", 1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn canonical_date_shape() {
        assert!(is_canonical_date("1994-01-01"));
        assert!(!is_canonical_date("1994-1-01"));
        assert!(!is_canonical_date("1994-01-01T00"));
        assert!(!is_canonical_date("abcd-ef-gh"));
    }
}
