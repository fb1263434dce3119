/// Data layer: core types, loading, derivation, and reductions.
///
/// Architecture:
/// ```text
///  transactions.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  parse INSTANCE_DATE, attach month bucket
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ TransactionTable  │  immutable, threaded by reference
///   └──────────────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐  ┌───────────┐  ┌───────────┐
///   │  filter   │  │ aggregate  │  │ aggregate  │
///   │ quantile  │  │ means/topN │  │ correlation│
///   └──────────┘  └───────────┘  └───────────┘
/// ```

pub mod aggregate;
pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

use std::path::Path;

use error::DatasetError;
use model::TransactionTable;

/// Load a transactions export end to end: CSV → raw records → date parsing
/// and month buckets → immutable table. Any stage failure aborts the load.
pub fn load_table(path: &Path) -> Result<TransactionTable, DatasetError> {
    let records = loader::load_csv(path)?;
    let rows = derive::with_month_buckets(records)?;
    Ok(TransactionTable::from_rows(rows))
}
