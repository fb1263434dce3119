use chrono::NaiveDate;

use super::error::DatasetError;
use super::model::{RawRecord, Transaction};

// ---------------------------------------------------------------------------
// Date parsing and the month bucket
// ---------------------------------------------------------------------------

/// Accepted INSTANCE_DATE formats, tried in order. The Dubai open-data
/// exports use ISO dates, occasionally with a time component; older extracts
/// use day-first dates.
const DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d-%m-%Y",
];

/// Parse a raw INSTANCE_DATE cell, trying each accepted format in turn.
pub fn parse_instance_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Year-month bucket of a date, formatted `YYYY-MM`. Lexicographic order of
/// buckets is chronological order.
pub fn month_bucket(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parse every record's date and attach the derived month bucket.
/// Order- and row-count-preserving; one unparseable date aborts the load.
pub fn with_month_buckets(records: Vec<RawRecord>) -> Result<Vec<Transaction>, DatasetError> {
    records
        .into_iter()
        .enumerate()
        .map(|(row, rec)| {
            let date = parse_instance_date(&rec.instance_date).ok_or_else(|| DatasetError::Date {
                row,
                value: rec.instance_date.clone(),
            })?;
            Ok(Transaction {
                trans_value: rec.trans_value,
                actual_area: rec.actual_area,
                procedure_area: rec.procedure_area,
                group: rec.group,
                area: rec.area,
                date,
                month: month_bucket(date),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
