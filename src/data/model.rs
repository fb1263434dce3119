use std::collections::BTreeSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Required columns of a transactions export. The loader rejects any file
/// missing one of these.
pub const COL_TRANS_VALUE: &str = "TRANS_VALUE";
pub const COL_ACTUAL_AREA: &str = "ACTUAL_AREA";
pub const COL_PROCEDURE_AREA: &str = "PROCEDURE_AREA";
pub const COL_GROUP: &str = "GROUP_EN";
pub const COL_AREA: &str = "AREA_EN";
pub const COL_INSTANCE_DATE: &str = "INSTANCE_DATE";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_TRANS_VALUE,
    COL_ACTUAL_AREA,
    COL_PROCEDURE_AREA,
    COL_GROUP,
    COL_AREA,
    COL_INSTANCE_DATE,
];

/// The three numeric columns fed into the correlation matrix.
pub const NUMERIC_COLUMNS: [&str; 3] = [COL_TRANS_VALUE, COL_ACTUAL_AREA, COL_PROCEDURE_AREA];

// ---------------------------------------------------------------------------
// RawRecord – one CSV row before date parsing
// ---------------------------------------------------------------------------

/// A transaction row as it appears in the file: numerics parsed (empty cells
/// become `None`), the date still raw text.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub trans_value: Option<f64>,
    pub actual_area: Option<f64>,
    pub procedure_area: Option<f64>,
    pub group: String,
    pub area: String,
    pub instance_date: String,
}

// ---------------------------------------------------------------------------
// Transaction – one row of the augmented table
// ---------------------------------------------------------------------------

/// A transaction with its date parsed and the derived year-month bucket
/// attached. `None` numerics are skipped by every reduction.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub trans_value: Option<f64>,
    pub actual_area: Option<f64>,
    pub procedure_area: Option<f64>,
    pub group: String,
    pub area: String,
    pub date: NaiveDate,
    /// Year-month bucket of `date`, formatted `YYYY-MM`.
    pub month: String,
}

// ---------------------------------------------------------------------------
// TransactionTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full augmented dataset. Immutable after construction; every reduction
/// takes it by reference.
#[derive(Debug, Clone)]
pub struct TransactionTable {
    /// All transactions, in file order.
    pub rows: Vec<Transaction>,
    /// Sorted set of distinct GROUP_EN labels (drives the scatter colours).
    pub group_labels: BTreeSet<String>,
}

impl TransactionTable {
    /// Build the table and its group-label index from augmented rows.
    pub fn from_rows(rows: Vec<Transaction>) -> Self {
        let group_labels = rows.iter().map(|r| r.group.clone()).collect();
        TransactionTable { rows, group_labels }
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
